use actix_multipart::form::{tempfile::TempFile, text::Text, MultipartForm};
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::{
    constants::{LINKS_REQUIRED, MAX_SCREENSHOTS},
    errors::{AppError, FieldError},
    utils::{html::is_http_url, image::{sniff_image, upload_extension}},
};

// ───── Backend Models ───────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub hosted_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub screenshots: Vec<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn cover_image(&self) -> Option<&str> {
        self.screenshots.first().map(String::as_str)
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }

    /// The viewer link is only offered when there is more than the cover image.
    pub fn has_screenshot_gallery(&self) -> bool {
        self.screenshots.len() > 1
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Row sent to the backend on insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub title: String,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub hosted_url: Option<String>,
    pub screenshots: Vec<String>,
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ProjectSubmission {
    #[validate(custom(function = "validate_title"))]
    pub title: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub github_url: Option<String>,

    #[validate(custom(function = "validate_link"))]
    pub hosted_url: Option<String>,

    pub author_name: Option<String>,

    #[validate(email(message = "Please enter a valid email address"))]
    pub author_email: Option<String>,

    #[serde(skip)]
    #[validate(range(max = 5, message = "Maximum 5 screenshots allowed"))]
    pub screenshot_count: usize,
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut err = ValidationError::new("title_required");
        err.message = Some("Project title is required".into());
        return Err(err);
    }
    Ok(())
}

/// Links end up as `href`s on the public gallery, so only web URLs pass.
fn validate_link(url: &str) -> Result<(), ValidationError> {
    if !is_http_url(url) {
        let mut err = ValidationError::new("url");
        err.message = Some("Please enter a valid URL".into());
        return Err(err);
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ProjectSubmission {
    /// Trims every field; blank optional fields become `None`.
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: non_blank(self.description),
            github_url: non_blank(self.github_url),
            hosted_url: non_blank(self.hosted_url),
            author_name: non_blank(self.author_name),
            author_email: non_blank(self.author_email),
            screenshot_count: self.screenshot_count,
        }
    }

    pub fn has_link_or_screenshot(&self) -> bool {
        self.github_url.is_some() || self.hosted_url.is_some() || self.screenshot_count > 0
    }

    /// Every problem with the submission, not just the first one.
    pub fn field_errors(&self) -> Vec<FieldError> {
        let mut errors = match self.validate() {
            Ok(()) => Vec::new(),
            Err(e) => FieldError::collect(&e),
        };

        for error in errors.iter_mut().filter(|e| e.field == "screenshot_count") {
            error.field = "screenshots".to_string();
        }

        if !self.has_link_or_screenshot() {
            errors.push(FieldError::new("links", LINKS_REQUIRED));
        }

        errors
    }

    pub fn check(&self) -> Result<(), AppError> {
        let errors = self.field_errors();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::ValidationError(errors))
        }
    }

    pub fn into_new_project(self, screenshots: Vec<String>) -> NewProject {
        NewProject {
            title: self.title,
            description: self.description,
            github_url: self.github_url,
            hosted_url: self.hosted_url,
            screenshots,
            author_name: self.author_name,
            author_email: self.author_email,
        }
    }
}

// ───── Screenshots ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ScreenshotFile {
    pub fn new(file_name: Option<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self { file_name, content_type, bytes }
    }

    /// A file input left empty still posts a zero-length part.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Sniffed image type, falling back to a declared `image/*` type.
    pub fn mime_type(&self) -> Option<String> {
        sniff_image(&self.bytes)
            .map(|kind| kind.mime_type().to_string())
            .or_else(|| {
                self.content_type
                    .as_deref()
                    .filter(|ct| ct.starts_with("image/"))
                    .map(str::to_string)
            })
    }

    pub fn extension(&self) -> String {
        upload_extension(self.file_name.as_deref(), &self.bytes)
    }

    pub fn check(&self, max_bytes: usize) -> Result<(), String> {
        let name = self.file_name.as_deref().unwrap_or("screenshot");
        if self.bytes.len() > max_bytes {
            return Err(format!(
                "{} is larger than {} MB",
                name,
                max_bytes as f64 / 1024.0 / 1024.0
            ));
        }
        if self.mime_type().is_none() {
            return Err(format!("{} is not an image", name));
        }
        Ok(())
    }
}

// ───── Multipart Upload ─────────────────────────────────────────────

#[derive(Debug, MultipartForm)]
pub struct ProjectUploadForm {
    pub title: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub github_url: Option<Text<String>>,
    pub hosted_url: Option<Text<String>>,
    pub author_name: Option<Text<String>>,
    pub author_email: Option<Text<String>>,
    pub screenshots: Vec<TempFile>,
}

impl ProjectUploadForm {
    /// Splits the form into its text fields and the non-empty screenshot files.
    pub async fn into_submission(self) -> Result<(ProjectSubmission, Vec<ScreenshotFile>), AppError> {
        let text = |field: Option<Text<String>>| field.map(Text::into_inner);

        let submission = ProjectSubmission {
            title: text(self.title).unwrap_or_default(),
            description: text(self.description),
            github_url: text(self.github_url),
            hosted_url: text(self.hosted_url),
            author_name: text(self.author_name),
            author_email: text(self.author_email),
            screenshot_count: 0,
        };

        let reads = self
            .screenshots
            .into_iter()
            .filter(|file| file.size > 0)
            .map(|file| async move {
                let bytes = tokio::fs::read(file.file.path()).await?;
                Ok::<_, AppError>(ScreenshotFile::new(
                    file.file_name,
                    file.content_type.map(|ct| ct.to_string()),
                    bytes,
                ))
            });
        let screenshots = try_join_all(reads).await?;

        Ok((submission, screenshots))
    }
}
