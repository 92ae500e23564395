use crate::{
    entities::project::Project,
    errors::AppError,
    repositories::project::ProjectRepository,
    use_cases::lightbox::ScreenshotViewer,
};

pub struct GalleryHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> GalleryHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        GalleryHandler { project_repo }
    }

    /// Every submitted project, newest first
    pub async fn list_projects(&self) -> Result<Vec<Project>, AppError> {
        let mut projects = self.project_repo.list_projects().await?;
        projects.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(projects)
    }

    pub async fn get_project(&self, id: i64) -> Result<Project, AppError> {
        self.project_repo.get_project(id).await
    }

    /// Opens the screenshot viewer on a project at `index`
    pub async fn open_viewer(
        &self,
        id: i64,
        index: i64
    ) -> Result<(Project, ScreenshotViewer), AppError> {
        let project = self.project_repo.get_project(id).await?;

        let viewer = ScreenshotViewer::open(project.screenshots.clone(), index)
            .ok_or_else(|| AppError::NotFound(format!("Project {id} has no screenshots")))?;

        Ok((project, viewer))
    }

    /// "OK" or "Unavailable", for the health report
    pub async fn backend_status(&self) -> &'static str {
        match self.project_repo.check_connection().await {
            Ok(()) => "OK",
            Err(e) => {
                tracing::warn!("Backend health probe failed: {}", e);
                "Unavailable"
            }
        }
    }
}
