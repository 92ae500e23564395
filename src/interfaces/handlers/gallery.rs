use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    constants::GALLERY_LOAD_FAILED,
    errors::AppError,
    views::{gallery::{render_gallery, render_gallery_error, render_viewer}, html_response},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct ViewerQuery {
    pub index: Option<i64>,
}

#[instrument(skip(state))]
pub async fn gallery_page(state: web::Data<AppState>) -> HttpResponse {
    match state.gallery_handler.list_projects().await {
        Ok(projects) => html_response(StatusCode::OK, render_gallery(&projects)),
        Err(e) => {
            tracing::error!("Error fetching projects: {}", e);
            html_response(StatusCode::BAD_GATEWAY, render_gallery_error(GALLERY_LOAD_FAILED))
        }
    }
}

#[instrument(skip(state))]
pub async fn screenshot_viewer(
    project_id: web::Path<i64>,
    query: Option<web::Query<ViewerQuery>>,
    state: web::Data<AppState>,
) -> HttpResponse {
    // An unparseable index opens the first screenshot.
    let index = query.and_then(|q| q.index).unwrap_or(0);

    match state.gallery_handler.open_viewer(project_id.into_inner(), index).await {
        Ok((project, viewer)) => html_response(StatusCode::OK, render_viewer(&project, &viewer)),
        Err(e @ AppError::NotFound(_)) => {
            html_response(e.status_code(), render_gallery_error("Screenshots not found."))
        }
        Err(e) => {
            tracing::error!("Error opening screenshot viewer: {}", e);
            html_response(StatusCode::BAD_GATEWAY, render_gallery_error(GALLERY_LOAD_FAILED))
        }
    }
}
