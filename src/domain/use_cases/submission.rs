use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    constants::MAX_SCREENSHOTS,
    entities::project::{Project, ProjectSubmission, ScreenshotFile},
    errors::{AppError, FieldError},
    repositories::{project::ProjectRepository, storage::ScreenshotStorage},
    utils::object_path::screenshot_object_path,
};

#[derive(Debug, Serialize)]
pub struct SubmissionReceipt {
    pub project: Project,
    pub uploaded_screenshots: usize,
    pub skipped_screenshots: usize,
}

pub struct SubmissionHandler<R, S>
where
    R: ProjectRepository,
    S: ScreenshotStorage,
{
    pub project_repo: R,
    pub storage: S,
    max_screenshot_bytes: usize,
}

impl<R, S> SubmissionHandler<R, S>
where
    R: ProjectRepository,
    S: ScreenshotStorage,
{
    pub fn new(project_repo: R, storage: S, max_screenshot_bytes: usize) -> Self {
        SubmissionHandler {
            project_repo,
            storage,
            max_screenshot_bytes,
        }
    }

    /// Validates the submission, uploads its screenshots, then inserts the
    /// project referencing the uploaded files.
    ///
    /// A screenshot whose upload fails is logged and left out; the project is
    /// still created with the rest.
    pub async fn submit(
        &self,
        submission: ProjectSubmission,
        screenshots: Vec<ScreenshotFile>,
    ) -> Result<SubmissionReceipt, AppError> {
        let screenshots: Vec<ScreenshotFile> = screenshots
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();

        let mut submission = submission.normalized();
        submission.screenshot_count = screenshots.len();

        let mut errors = submission.field_errors();
        if screenshots.len() <= MAX_SCREENSHOTS {
            if let Some(message) = screenshots
                .iter()
                .find_map(|s| s.check(self.max_screenshot_bytes).err())
            {
                errors.push(FieldError::new("screenshots", message));
            }
        }
        if !errors.is_empty() {
            return Err(AppError::ValidationError(errors));
        }

        let mut screenshot_urls = Vec::with_capacity(screenshots.len());
        let mut skipped = 0;

        for screenshot in screenshots {
            let path = screenshot_object_path(&screenshot.extension(), Utc::now());
            let content_type = screenshot
                .mime_type()
                .unwrap_or_else(|| "application/octet-stream".to_string());

            match self.storage.upload(&path, screenshot.bytes, &content_type).await {
                Ok(()) => screenshot_urls.push(self.storage.public_url(&path)),
                Err(e) => {
                    warn!("Upload error for {}: {}", path, e);
                    skipped += 1;
                }
            }
        }

        let uploaded = screenshot_urls.len();
        let new_project = submission.into_new_project(screenshot_urls);
        let project = self.project_repo.insert_project(&new_project).await?;

        info!(
            "Project {} '{}' shared with {} screenshot(s), {} skipped",
            project.id, project.title, uploaded, skipped
        );

        Ok(SubmissionReceipt {
            project,
            uploaded_screenshots: uploaded,
            skipped_screenshots: skipped,
        })
    }
}
