use std::{collections::HashMap, net::TcpListener, sync::Arc};

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use chexplore::{
    backend::supabase::SupabaseClient,
    constants::DEFAULT_MAX_SCREENSHOT_BYTES,
    entities::project::NewProject,
    errors::AppError,
    repositories::{project::ProjectRepository, storage::ScreenshotStorage},
    settings::{AppConfig, AppEnvironment},
};
use parking_lot::Mutex;
use serde_json::{json, Value};

const ANON_KEY: &str = "fake-anon-key";

#[derive(Default)]
struct Recorded {
    queries: Mutex<Vec<HashMap<String, String>>>,
    inserts: Mutex<Vec<Value>>,
    uploads: Mutex<Vec<(String, String, usize)>>,
}

fn authorized(req: &HttpRequest) -> bool {
    let header = |name: &str| req.headers().get(name).and_then(|v| v.to_str().ok());
    header("apikey") == Some(ANON_KEY)
        && header("authorization") == Some(format!("Bearer {ANON_KEY}").as_str())
}

fn row(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": null,
        "github_url": "https://github.com/example/app",
        "hosted_url": null,
        "screenshots": null,
        "author_name": null,
        "author_email": null,
        "created_at": "2026-03-01T12:00:00Z"
    })
}

async fn select_rows(
    req: HttpRequest,
    query: web::Query<HashMap<String, String>>,
    recorded: web::Data<Recorded>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().json(json!({ "message": "Invalid API key" }));
    }
    let query = query.into_inner();
    recorded.queries.lock().push(query.clone());

    match query.get("id").map(String::as_str) {
        Some("eq.1") => HttpResponse::Ok().json(vec![row(1, "First")]),
        Some(_) => HttpResponse::Ok().json(Vec::<Value>::new()),
        None => HttpResponse::Ok().json(vec![row(2, "Second"), row(1, "First")]),
    }
}

async fn insert_row(
    req: HttpRequest,
    body: web::Json<Value>,
    recorded: web::Data<Recorded>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let prefer = req.headers().get("prefer").and_then(|v| v.to_str().ok());
    if prefer != Some("return=representation") {
        return HttpResponse::Created().finish();
    }

    let body = body.into_inner();
    recorded.inserts.lock().push(body.clone());

    let mut stored = body[0].clone();
    stored["id"] = json!(3);
    stored["created_at"] = json!("2026-03-02T08:30:00Z");
    HttpResponse::Created().json(vec![stored])
}

async fn broken_table() -> HttpResponse {
    HttpResponse::NotFound().json(json!({
        "code": "42P01",
        "message": "relation \"public.missing\" does not exist"
    }))
}

async fn upload_object(
    req: HttpRequest,
    path: web::Path<(String, String)>,
    body: web::Bytes,
    recorded: web::Data<Recorded>,
) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    let (bucket, object) = path.into_inner();
    if bucket != "shots" {
        return HttpResponse::BadRequest().json(json!({ "error": "Bucket not found" }));
    }
    let content_type = req
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    recorded.uploads.lock().push((object.clone(), content_type, body.len()));
    HttpResponse::Ok().json(json!({ "Key": format!("{bucket}/{object}") }))
}

struct FakeBackend {
    address: String,
    recorded: web::Data<Recorded>,
}

impl FakeBackend {
    async fn spawn() -> Self {
        let recorded = web::Data::from(Arc::new(Recorded::default()));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let data = recorded.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .route("/rest/v1/projects", web::get().to(select_rows))
                .route("/rest/v1/projects", web::post().to(insert_row))
                .route("/rest/v1/missing", web::get().to(broken_table))
                .route("/storage/v1/object/{bucket}/{object:.*}", web::post().to(upload_object))
        })
        .listen(listener)
        .expect("Failed to bind fake backend")
        .workers(1)
        .run();

        tokio::spawn(server);

        Self { address, recorded }
    }

    fn client(&self, table: &str, bucket: &str) -> SupabaseClient {
        SupabaseClient::new(&config(&self.address, table, bucket)).unwrap()
    }
}

fn config(url: &str, table: &str, bucket: &str) -> AppConfig {
    AppConfig {
        env: AppEnvironment::Testing,
        name: "Chexplore Test".to_string(),
        port: 0,
        host: "127.0.0.1".to_string(),
        worker_count: 1,
        cors_allowed_origins: vec!["*".to_string()],
        supabase_url: url.to_string(),
        supabase_anon_key: ANON_KEY.to_string(),
        projects_table: table.to_string(),
        storage_bucket: bucket.to_string(),
        request_timeout_secs: 5,
        redirect_delay_secs: 2,
        max_screenshot_bytes: DEFAULT_MAX_SCREENSHOT_BYTES,
        submission_burst: 5,
        submission_refill_per_minute: 2,
        trust_x_forwarded_for: false,
    }
}

#[actix_web::test]
async fn list_projects_orders_by_creation_date() {
    let backend = FakeBackend::spawn().await;
    let client = backend.client("projects", "shots");

    let projects = client.list_projects().await.unwrap();

    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].title, "Second");
    assert!(projects[0].screenshots.is_empty());

    let queries = backend.recorded.queries.lock().clone();
    assert_eq!(queries[0].get("select").map(String::as_str), Some("*"));
    assert_eq!(queries[0].get("order").map(String::as_str), Some("created_at.desc"));
}

#[actix_web::test]
async fn get_project_filters_by_id() {
    let backend = FakeBackend::spawn().await;
    let client = backend.client("projects", "shots");

    let project = client.get_project(1).await.unwrap();
    assert_eq!(project.title, "First");

    let missing = client.get_project(5).await;
    assert!(matches!(missing, Err(AppError::NotFound(_))));

    let queries = backend.recorded.queries.lock().clone();
    assert_eq!(queries[1].get("id").map(String::as_str), Some("eq.5"));
    assert_eq!(queries[1].get("limit").map(String::as_str), Some("1"));
}

#[actix_web::test]
async fn insert_project_sends_nulls_for_blank_fields() {
    let backend = FakeBackend::spawn().await;
    let client = backend.client("projects", "shots");

    let new_project = NewProject {
        title: "Inserted".to_string(),
        description: None,
        github_url: None,
        hosted_url: Some("https://inserted.example.com".to_string()),
        screenshots: vec!["https://cdn/a.png".to_string()],
        author_name: None,
        author_email: None,
    };
    let stored = client.insert_project(&new_project).await.unwrap();

    assert_eq!(stored.id, 3);
    assert_eq!(stored.screenshots, vec!["https://cdn/a.png".to_string()]);

    let inserts = backend.recorded.inserts.lock().clone();
    assert!(inserts[0].is_array());
    assert_eq!(inserts[0][0]["description"], Value::Null);
    assert_eq!(inserts[0][0]["title"], "Inserted");
}

#[actix_web::test]
async fn backend_error_message_is_surfaced() {
    let backend = FakeBackend::spawn().await;
    let client = backend.client("missing", "shots");

    let err = client.list_projects().await.unwrap_err();

    match err {
        AppError::Backend(message) => {
            assert!(message.contains("404"));
            assert!(message.contains("does not exist"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[actix_web::test]
async fn upload_posts_to_bucket_and_builds_public_url() {
    let backend = FakeBackend::spawn().await;
    let client = backend.client("projects", "shots");

    client
        .upload("screenshots/1-abc.png", vec![1, 2, 3], "image/png")
        .await
        .unwrap();

    let uploads = backend.recorded.uploads.lock().clone();
    assert_eq!(
        uploads,
        vec![("screenshots/1-abc.png".to_string(), "image/png".to_string(), 3)]
    );
    assert_eq!(
        client.public_url("screenshots/1-abc.png"),
        format!("{}/storage/v1/object/public/shots/screenshots/1-abc.png", backend.address)
    );
}

#[actix_web::test]
async fn upload_to_unknown_bucket_fails() {
    let backend = FakeBackend::spawn().await;
    let client = backend.client("projects", "nope");

    let err = client.upload("screenshots/x.png", vec![0], "image/png").await;

    assert!(matches!(err, Err(AppError::Backend(message)) if message.contains("Bucket not found")));
}
