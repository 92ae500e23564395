use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

pub const MAX_SCREENSHOTS: usize = 5;
pub const DEFAULT_MAX_SCREENSHOT_BYTES: usize = 5 * 1024 * 1024;

/// Storage folder every screenshot object is written under.
pub const SCREENSHOT_PREFIX: &str = "screenshots";

pub const GALLERY_LOAD_FAILED: &str = "Failed to load projects. Please try again later.";
pub const SUBMISSION_SUCCEEDED: &str = "Project shared successfully! Redirecting...";
pub const SUBMISSION_FAILED: &str = "Failed to share project. Please try again.";
pub const LINKS_REQUIRED: &str = "At least one of GitHub link, hosted link, or screenshots is required";
