use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Response,
};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, instrument};
use url::Url;

use crate::{
    entities::project::{NewProject, Project},
    errors::{AppError, BackendError},
    repositories::{project::ProjectRepository, storage::ScreenshotStorage},
    settings::AppConfig,
};

/// Thin client for the hosted backend: a PostgREST table endpoint plus an
/// object-storage bucket that serves public URLs.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    table: String,
    bucket: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl SupabaseClient {
    pub fn new(config: &AppConfig) -> Result<Self, BackendError> {
        let mut base_url = Url::parse(config.supabase_url.trim())
            .map_err(|e| BackendError::InvalidConfig(format!("supabase_url: {e}")))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let key = config.supabase_anon_key.trim();
        let mut api_key = HeaderValue::from_str(key)
            .map_err(|_| BackendError::InvalidConfig("supabase_anon_key is not a valid header value".into()))?;
        api_key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {key}"))
            .map_err(|_| BackendError::InvalidConfig("supabase_anon_key is not a valid header value".into()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", api_key);
        headers.insert(AUTHORIZATION, bearer);

        let http = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            table: config.projects_table.clone(),
            bucket: config.storage_bucket.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", self.base_url.path(), path.trim_start_matches('/'));
        url.set_path(&joined);
        url
    }

    pub fn table_url(&self) -> Url {
        self.endpoint(&format!("rest/v1/{}", self.table))
    }

    pub fn object_url(&self, path: &str) -> Url {
        self.endpoint(&format!("storage/v1/object/{}/{}", self.bucket, path))
    }

    pub fn public_object_url(&self, path: &str) -> String {
        self.endpoint(&format!("storage/v1/object/public/{}/{}", self.bucket, path))
            .to_string()
    }

    async fn ensure_success(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.message.or(b.error))
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status.canonical_reason().unwrap_or("unknown error").to_string()
                } else {
                    trimmed.chars().take(200).collect()
                }
            });

        Err(BackendError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProjectRepository for SupabaseClient {
    #[instrument(skip(self))]
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let response = self.http
            .get(self.table_url())
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await
            .map_err(BackendError::from)?;

        let projects: Vec<Project> = Self::read_json(response).await?;
        debug!("Fetched {} projects", projects.len());
        Ok(projects)
    }

    #[instrument(skip(self))]
    async fn get_project(&self, id: i64) -> Result<Project, AppError> {
        let id_filter = format!("eq.{id}");
        let response = self.http
            .get(self.table_url())
            .query(&[("select", "*"), ("id", id_filter.as_str()), ("limit", "1")])
            .send()
            .await
            .map_err(BackendError::from)?;

        let rows: Vec<Project> = Self::read_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound(format!("Project {id}")))
    }

    #[instrument(skip(self, project), fields(title = %project.title))]
    async fn insert_project(&self, project: &NewProject) -> Result<Project, AppError> {
        let response = self.http
            .post(self.table_url())
            .header("Prefer", "return=representation")
            .json(&[project])
            .send()
            .await
            .map_err(BackendError::from)?;

        let rows: Vec<Project> = Self::read_json(response).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| AppError::Backend("Insert returned no row".to_string()))
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        let response = self.http
            .get(self.table_url())
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await
            .map_err(BackendError::from)?;

        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ScreenshotStorage for SupabaseClient {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        let response = self.http
            .post(self.object_url(path))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(BackendError::from)?;

        Self::ensure_success(response).await?;
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        self.public_object_url(path)
    }
}
