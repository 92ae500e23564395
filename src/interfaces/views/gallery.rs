use crate::{
    entities::project::Project,
    use_cases::lightbox::ScreenshotViewer,
    utils::html::{html_escape, is_http_url, sanitize_fragment},
};

use super::layout::{render_page, NavTab, Page};

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

fn render_card(project: &Project) -> String {
    let title = html_escape(&project.title);

    let image = match project.cover_image() {
        Some(src) => format!(r#"<img src="{}" alt="{}" loading="lazy">"#, html_escape(src), title),
        None => r#"<div class="project-image-placeholder">No screenshot</div>"#.to_string(),
    };

    let description = project
        .description_text()
        .map(html_escape)
        .unwrap_or_else(|| "No description provided".to_string());

    let mut links = String::new();
    if let Some(url) = project.github_url.as_deref().filter(|u| is_http_url(u)) {
        links.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="project-link">GitHub</a>"#,
            html_escape(url)
        ));
    }
    if let Some(url) = project.hosted_url.as_deref().filter(|u| is_http_url(u)) {
        links.push_str(&format!(
            r#"<a href="{}" target="_blank" rel="noopener noreferrer" class="project-link">Live Demo</a>"#,
            html_escape(url)
        ));
    }
    if project.has_screenshot_gallery() {
        links.push_str(&format!(
            r#"<a href="/projects/{}/screenshots" class="project-link">{} Screenshots</a>"#,
            project.id,
            project.screenshots.len()
        ));
    }

    let author = project
        .author_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| format!(r#"<p class="project-author">By {}</p>"#, html_escape(name)))
        .unwrap_or_default();

    let card = format!(
        r#"<article class="project-card">
  <div class="project-image">{image}</div>
  <div class="project-content">
    <h3 class="project-title">{title}</h3>
    <p class="project-description">{description}</p>
    <div class="project-links">{links}</div>
    {author}
  </div>
</article>"#
    );

    sanitize_fragment(&card)
}

fn render_submissions(projects: &[Project]) -> String {
    if projects.is_empty() {
        return r#"<div class="empty-state">
  <h3 class="empty-state-title">No submissions yet</h3>
  <p class="empty-state-description">Be the first to submit your project for the Vibe-Coding Challenge!</p>
  <a href="/upload" class="btn btn-primary">Submit Your Project</a>
</div>"#
            .to_string();
    }

    let cards: String = projects.iter().map(render_card).collect();
    format!(
        r#"<div class="submission-count"><span>{count} project{s} submitted</span></div>
<div class="project-grid">{cards}</div>"#,
        count = projects.len(),
        s = plural(projects.len()),
        cards = cards,
    )
}

/// The landing page: hero, challenge info, submissions grid and call to action.
pub fn render_gallery(projects: &[Project]) -> String {
    let body = format!(
        r##"<section class="competition-hero">
  <div class="container">
    <div class="hero-badge"><span>March 2026</span></div>
    <h1 class="competition-title">Vibe-Coding <span class="gradient-text">Challenge</span></h1>
    <p class="competition-tagline">Solve the real problem in blazing fast.</p>
    <p class="competition-description">Share your projects, get feedback, and compete for amazing prizes.</p>
    <div class="hero-cta">
      <a href="/upload" class="btn btn-primary btn-lg">Submit Your Project</a>
      <a href="#projects" class="btn btn-secondary btn-lg">View Submissions</a>
    </div>
    <div class="competition-stats">
      <div class="stat-item"><span class="stat-value">{count}</span> <span class="stat-label">Submissions</span></div>
    </div>
  </div>
</section>
<section class="competition-info">
  <div class="container info-grid">
    <div class="info-card"><h3>Blazing Fast</h3><p>Build and ship your project in record time. Speed matters, but quality wins.</p></div>
    <div class="info-card"><h3>Real Problems</h3><p>Solve genuine challenges that people face. Impactful solutions rise to the top.</p></div>
    <div class="info-card"><h3>Win Big</h3><p>Compete for cash prizes and certificates.</p></div>
  </div>
</section>
<section id="projects" class="projects-section">
  <div class="container">
    <div class="section-header">
      <h2 class="section-title">Competition Submissions</h2>
      <p class="section-description">Check out what developers are building for the Vibe-Coding Challenge</p>
    </div>
    {submissions}
  </div>
</section>
<section class="cta-section">
  <div class="container cta-content">
    <h2>Ready to Join the Challenge?</h2>
    <p>Submit your projects to us.</p>
    <a href="/upload" class="btn btn-primary btn-lg">Submit Your Project Now</a>
  </div>
</section>"##,
        count = projects.len(),
        submissions = render_submissions(projects),
    );

    render_page(Page {
        title: "Projects",
        active: NavTab::Projects,
        refresh_after: None,
        body,
    })
}

pub fn render_gallery_error(message: &str) -> String {
    render_page(Page {
        title: "Projects",
        active: NavTab::Projects,
        refresh_after: None,
        body: format!(
            r#"<div class="container"><div class="alert alert-error"><span>{}</span></div></div>"#,
            html_escape(message)
        ),
    })
}

pub fn render_viewer(project: &Project, viewer: &ScreenshotViewer) -> String {
    let nav = if viewer.has_navigation() {
        format!(
            r#"<div class="screenshot-modal-nav">
  <a href="/projects/{id}/screenshots?index={prev}" class="btn screenshot-modal-btn">Previous</a>
  <span class="screenshot-modal-counter">{counter}</span>
  <a href="/projects/{id}/screenshots?index={next}" class="btn screenshot-modal-btn">Next</a>
</div>"#,
            id = project.id,
            prev = viewer.previous_index(),
            next = viewer.next_index(),
            counter = viewer.counter(),
        )
    } else {
        String::new()
    };

    let body = format!(
        r#"<div class="container screenshot-modal">
  <a href="/#projects" class="screenshot-modal-close">Close</a>
  <h2>{title}</h2>
  <div class="screenshot-modal-image">
    <img src="{src}" alt="Screenshot {position} of {total}">
  </div>
  {nav}
</div>"#,
        title = html_escape(&project.title),
        src = html_escape(viewer.current()),
        position = viewer.index() + 1,
        total = viewer.len(),
        nav = nav,
    );

    render_page(Page {
        title: &project.title,
        active: NavTab::Projects,
        refresh_after: None,
        body,
    })
}
