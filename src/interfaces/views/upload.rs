use crate::{
    constants::MAX_SCREENSHOTS,
    entities::project::ProjectSubmission,
    errors::FieldError,
    utils::html::html_escape,
};

use super::layout::{render_page, NavTab, Page};

#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Success(String),
    Error(String),
}

pub struct UploadView<'a> {
    pub values: &'a ProjectSubmission,
    pub errors: &'a [FieldError],
    pub notice: Option<Notice>,
    pub refresh_after: Option<u64>,
}

impl<'a> UploadView<'a> {
    pub fn blank(values: &'a ProjectSubmission) -> Self {
        UploadView {
            values,
            errors: &[],
            notice: None,
            refresh_after: None,
        }
    }

    fn error_for(&self, field: &str) -> String {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| format!(r#"<p class="form-error">{}</p>"#, html_escape(&e.message)))
            .collect()
    }
}

fn value(field: &Option<String>) -> String {
    html_escape(field.as_deref().unwrap_or_default())
}

fn render_notice(notice: &Notice) -> String {
    let (kind, text) = match notice {
        Notice::Success(text) => ("success", text),
        Notice::Error(text) => ("error", text),
    };
    format!(
        r#"<div class="alert alert-{kind}"><span>{}</span></div>"#,
        html_escape(text)
    )
}

pub fn render_upload(view: UploadView<'_>) -> String {
    let values = view.values;
    let notice = view.notice.as_ref().map(render_notice).unwrap_or_default();

    let has_link = values.screenshot_count > 0
        || values.github_url.as_deref().is_some_and(|u| !u.trim().is_empty())
        || values.hosted_url.as_deref().is_some_and(|u| !u.trim().is_empty());
    let hint = if has_link {
        "✓ Required fields filled"
    } else {
        "⚠ At least one link or screenshot required"
    };

    let body = format!(
        r#"<div class="container">
  <div class="page-header">
    <h1 class="page-title">Share Your Project</h1>
    <p class="page-description">Showcase your work with the community. At least one of GitHub link, hosted link, or screenshots is required.</p>
  </div>
  {notice}
  <div class="card">
    <form method="post" action="/upload" enctype="multipart/form-data">
      <div class="card-body">
        <div class="form-group">
          <label for="title" class="form-label form-label-required">Project Title</label>
          <input type="text" id="title" name="title" class="form-input" placeholder="Enter your project name" value="{title}">
          {title_error}
        </div>
        <div class="form-group">
          <label for="description" class="form-label">Description</label>
          <textarea id="description" name="description" class="form-textarea" rows="4" placeholder="Describe your project, technologies used, features, etc.">{description}</textarea>
        </div>
        <div class="form-group">
          <label class="form-label">Project Links <span class="form-hint">(at least one required)</span></label>
          <input type="url" name="github_url" class="form-input" placeholder="https://github.com/username/project" value="{github_url}">
          {github_url_error}
          <input type="url" name="hosted_url" class="form-input" placeholder="https://your-project.vercel.app" value="{hosted_url}">
          {hosted_url_error}
          {links_error}
        </div>
        <div class="form-group">
          <label for="screenshots" class="form-label">Screenshots <span class="form-hint">(max {max_screenshots})</span></label>
          <input type="file" id="screenshots" name="screenshots" accept="image/*" multiple class="file-upload">
          <p class="file-upload-hint">PNG, JPG, GIF up to 5MB each</p>
          {screenshots_error}
        </div>
        <div class="form-group">
          <label class="form-label">Author Information (Optional)</label>
          <input type="text" name="author_name" class="form-input" placeholder="Your name" value="{author_name}">
          <input type="email" name="author_email" class="form-input" placeholder="your@email.com" value="{author_email}">
          {author_email_error}
        </div>
      </div>
      <div class="card-footer">
        <span class="form-hint">{hint}</span>
        <a href="/" class="btn btn-secondary">Cancel</a>
        <button type="submit" class="btn btn-primary">Share Project</button>
      </div>
    </form>
  </div>
</div>"#,
        notice = notice,
        title = html_escape(&values.title),
        title_error = view.error_for("title"),
        description = value(&values.description),
        github_url = value(&values.github_url),
        github_url_error = view.error_for("github_url"),
        hosted_url = value(&values.hosted_url),
        hosted_url_error = view.error_for("hosted_url"),
        links_error = view.error_for("links"),
        max_screenshots = MAX_SCREENSHOTS,
        screenshots_error = view.error_for("screenshots"),
        author_name = value(&values.author_name),
        author_email = value(&values.author_email),
        author_email_error = view.error_for("author_email"),
        hint = hint,
    );

    render_page(Page {
        title: "Share Your Project",
        active: NavTab::AddProject,
        refresh_after: view.refresh_after,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SUBMISSION_SUCCEEDED;

    #[test]
    fn blank_form_warns_about_links() {
        let values = ProjectSubmission::default();
        let html = render_upload(UploadView::blank(&values));

        assert!(html.contains("⚠ At least one link or screenshot required"));
        assert!(html.contains(r#"enctype="multipart/form-data""#));
        assert!(!html.contains("form-error\">"));
    }

    #[test]
    fn preserves_values_and_shows_errors() {
        let values = ProjectSubmission {
            title: "\"Quoted\" title".into(),
            github_url: Some("nope".into()),
            ..Default::default()
        };
        let errors = vec![FieldError::new("github_url", "Please enter a valid URL")];
        let html = render_upload(UploadView {
            values: &values,
            errors: &errors,
            notice: None,
            refresh_after: None,
        });

        assert!(html.contains(r#"value="&quot;Quoted&quot; title""#));
        assert!(html.contains(r#"value="nope""#));
        assert!(html.contains(r#"<p class="form-error">Please enter a valid URL</p>"#));
        assert!(html.contains("✓ Required fields filled"));
    }

    #[test]
    fn success_notice_with_refresh() {
        let values = ProjectSubmission::default();
        let html = render_upload(UploadView {
            values: &values,
            errors: &[],
            notice: Some(Notice::Success(SUBMISSION_SUCCEEDED.into())),
            refresh_after: Some(2),
        });

        assert!(html.contains(r#"<div class="alert alert-success"><span>Project shared successfully! Redirecting...</span></div>"#));
        assert!(html.contains(r#"content="2;url=/""#));
    }
}
