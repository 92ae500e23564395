use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    entities::project::{NewProject, Project},
    errors::AppError,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// All projects, newest first
    async fn list_projects(&self) -> Result<Vec<Project>, AppError>;

    /// One project by id
    async fn get_project(&self, id: i64) -> Result<Project, AppError>;

    /// Inserts a project and returns the stored row
    async fn insert_project(&self, project: &NewProject) -> Result<Project, AppError>;

    /// Cheap reachability probe used by the health check
    async fn check_connection(&self) -> Result<(), AppError>;
}

#[async_trait]
impl<T: ProjectRepository + ?Sized> ProjectRepository for Arc<T> {
    async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        (**self).list_projects().await
    }

    async fn get_project(&self, id: i64) -> Result<Project, AppError> {
        (**self).get_project(id).await
    }

    async fn insert_project(&self, project: &NewProject) -> Result<Project, AppError> {
        (**self).insert_project(project).await
    }

    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }
}
