pub mod extractors;
pub mod gallery;
pub mod lightbox;
pub mod submission;
