pub mod project;
pub mod storage;
