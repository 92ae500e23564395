pub mod api;
pub mod gallery;
pub mod system;
pub mod upload;
