use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod constants;
pub mod graceful_shutdown;
pub mod background_task;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes, views};
pub use infrastructure::{backend, limiter, utils};

use backend::supabase::SupabaseClient;
use errors::BackendError;
use limiter::rate_limiter::SubmissionLimiter;
use repositories::{project::ProjectRepository, storage::ScreenshotStorage};
use use_cases::{gallery::GalleryHandler, submission::SubmissionHandler};

pub type SharedProjectRepo = Arc<dyn ProjectRepository>;
pub type SharedScreenshotStorage = Arc<dyn ScreenshotStorage>;

pub type AppGalleryHandler = GalleryHandler<SharedProjectRepo>;
pub type AppSubmissionHandler = SubmissionHandler<SharedProjectRepo, SharedScreenshotStorage>;

pub struct AppState {
    pub gallery_handler: AppGalleryHandler,
    pub submission_handler: AppSubmissionHandler,
    pub limiter: SubmissionLimiter,
    pub redirect_delay_secs: u64,
    pub trust_x_forwarded_for: bool,
}

impl AppState {
    /// Builds the state against the hosted backend named in the configuration.
    pub fn new(config: &settings::AppConfig) -> Result<Self, BackendError> {
        let client = Arc::new(SupabaseClient::new(config)?);
        let projects: SharedProjectRepo = client.clone();
        let storage: SharedScreenshotStorage = client;

        Ok(Self::with_backend(config, projects, storage))
    }

    /// Builds the state around any repository/storage pair.
    pub fn with_backend(
        config: &settings::AppConfig,
        projects: SharedProjectRepo,
        storage: SharedScreenshotStorage,
    ) -> Self {
        let gallery_handler = GalleryHandler::new(projects.clone());
        let submission_handler = SubmissionHandler::new(
            projects,
            storage,
            config.max_screenshot_bytes,
        );
        let limiter = SubmissionLimiter::new(
            config.submission_burst,
            config.submission_refill_per_minute,
        );

        AppState {
            gallery_handler,
            submission_handler,
            limiter,
            redirect_delay_secs: config.redirect_delay_secs,
            trust_x_forwarded_for: config.trust_x_forwarded_for,
        }
    }
}
