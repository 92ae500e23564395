
use reqwest::StatusCode;
use serde_json::Value;
use test_utils::*;

#[actix_web::test]
async fn list_projects_returns_json() {
    let app = TestApp::spawn().await;
    app.backend.seed("Alpha", 0, 10);
    app.backend.seed("Beta", 1, 1);

    let response = app.get("/api/v1/projects").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Beta", "Alpha"]);
}

#[actix_web::test]
async fn get_project_returns_404_for_unknown_id() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/v1/projects/7").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("Project 7"));
}

#[actix_web::test]
async fn create_project_returns_receipt() {
    let app = TestApp::spawn().await;

    let form = project_form("Api Build").part("screenshots", png_part("shot.png"));
    let response = app.post_form("/api/v1/projects", form).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["project"]["title"], "Api Build");
    assert_eq!(body["uploaded_screenshots"], 1);
    assert_eq!(body["skipped_screenshots"], 0);
}

#[actix_web::test]
async fn create_project_reports_field_errors() {
    let app = TestApp::spawn().await;

    let form = reqwest::multipart::Form::new()
        .text("title", "Bad links")
        .text("github_url", "not a url")
        .text("author_email", "nobody");
    let response = app.post_form("/api/v1/projects", form).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    let fields: Vec<&str> = body["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"github_url"));
    assert!(fields.contains(&"author_email"));
}

#[actix_web::test]
async fn create_project_requires_multipart_body() {
    let app = TestApp::spawn().await;

    let response = app
        .client
        .post(app.url("/api/v1/projects"))
        .json(&serde_json::json!({ "title": "json" }))
        .send()
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert!(app.backend.projects.lock().is_empty());
}

#[actix_web::test]
async fn health_reports_backend_state() {
    let app = TestApp::spawn().await;

    let healthy: Value = app.get("/health").await.json().await.unwrap();
    assert_eq!(healthy["status"], "healthy");
    assert_eq!(healthy["backend"], "OK");

    app.backend.go_offline();
    let degraded: Value = app.get("/health").await.json().await.unwrap();
    assert_eq!(degraded["status"], "degraded");
}
