use actix_multipart::form::MultipartForm;
use actix_web::{
    http::{header, StatusCode},
    web, HttpResponse, ResponseError,
};
use tracing::instrument;

use crate::{
    constants::{SUBMISSION_FAILED, SUBMISSION_SUCCEEDED},
    entities::project::{ProjectSubmission, ProjectUploadForm},
    errors::AppError,
    use_cases::extractors::ClientIp,
    views::{html_response, upload::{render_upload, Notice, UploadView}},
    AppState,
};

fn form_with_notice(status: StatusCode, values: &ProjectSubmission, notice: Notice) -> HttpResponse {
    let mut view = UploadView::blank(values);
    view.notice = Some(notice);
    html_response(status, render_upload(view))
}

#[instrument]
pub async fn upload_page() -> HttpResponse {
    let values = ProjectSubmission::default();
    html_response(StatusCode::OK, render_upload(UploadView::blank(&values)))
}

#[instrument(skip(state, form))]
pub async fn submit_upload(
    client_ip: ClientIp,
    state: web::Data<AppState>,
    form: Result<MultipartForm<ProjectUploadForm>, actix_web::Error>,
) -> HttpResponse {
    let empty = ProjectSubmission::default();

    if let Err(retry_after) = state.limiter.check(&client_ip.0) {
        tracing::warn!("Submission rate limit hit for {}", client_ip.0);
        let mut response = form_with_notice(
            StatusCode::TOO_MANY_REQUESTS,
            &empty,
            Notice::Error(format!(
                "Too many submissions. Please wait {} seconds and try again.",
                retry_after
            )),
        );
        if let Ok(value) = header::HeaderValue::from_str(&retry_after.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    let form = match form {
        Ok(form) => form.into_inner(),
        Err(e) => {
            tracing::warn!("Rejected upload form: {}", e);
            return form_with_notice(
                e.as_response_error().status_code(),
                &empty,
                Notice::Error(format!("{} {}", SUBMISSION_FAILED, e)),
            );
        }
    };

    let (submission, screenshots) = match form.into_submission().await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("Failed to read uploaded screenshots: {}", e);
            return form_with_notice(e.status_code(), &empty, Notice::Error(SUBMISSION_FAILED.into()));
        }
    };

    let mut values = submission.clone();
    values.screenshot_count = screenshots.iter().filter(|s| !s.is_empty()).count();

    match state.submission_handler.submit(submission, screenshots).await {
        Ok(receipt) => {
            tracing::info!("Submission {} accepted from {}", receipt.project.id, client_ip.0);

            if state.redirect_delay_secs == 0 {
                return HttpResponse::SeeOther()
                    .insert_header((header::LOCATION, "/"))
                    .finish();
            }

            let mut view = UploadView::blank(&empty);
            view.notice = Some(Notice::Success(SUBMISSION_SUCCEEDED.into()));
            view.refresh_after = Some(state.redirect_delay_secs);
            html_response(StatusCode::OK, render_upload(view))
        }
        Err(AppError::ValidationError(errors)) => {
            // Files cannot be re-populated into a file input.
            values.screenshot_count = 0;
            html_response(
                StatusCode::BAD_REQUEST,
                render_upload(UploadView {
                    values: &values,
                    errors: &errors,
                    notice: None,
                    refresh_after: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!("Error submitting project: {}", e);
            values.screenshot_count = 0;
            form_with_notice(e.status_code(), &values, Notice::Error(SUBMISSION_FAILED.into()))
        }
    }
}
