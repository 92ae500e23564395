use actix_web::{http::{header::ContentType, StatusCode}, HttpResponse};

pub mod gallery;
pub mod layout;
pub mod upload;

pub fn html_response(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}
