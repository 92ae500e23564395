use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::project::ProjectUploadForm,
    errors::AppError,
    use_cases::extractors::ClientIp,
    AppState,
};

#[instrument(skip(state))]
pub async fn list_projects(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let projects = state.gallery_handler.list_projects().await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn get_project(
    project_id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let project = state.gallery_handler.get_project(project_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state, form))]
pub async fn create_project(
    client_ip: ClientIp,
    state: web::Data<AppState>,
    form: MultipartForm<ProjectUploadForm>,
) -> Result<impl Responder, AppError> {
    state
        .limiter
        .check(&client_ip.0)
        .map_err(|retry_after| AppError::RateLimited { retry_after })?;

    let (submission, screenshots) = form.into_inner().into_submission().await?;
    let receipt = state.submission_handler.submit(submission, screenshots).await?;

    Ok(HttpResponse::Created().json(receipt))
}
