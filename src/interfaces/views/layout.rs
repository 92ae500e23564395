use chrono::{Datelike, Utc};

use crate::utils::html::html_escape;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTab {
    Projects,
    AddProject,
    None,
}

pub struct Page<'a> {
    pub title: &'a str,
    pub active: NavTab,
    /// Seconds before the browser follows a refresh to `/`
    pub refresh_after: Option<u64>,
    pub body: String,
}

const STYLE: &str = r#"
:root { --bg: #0d1117; --card: #161b22; --text: #e6edf3; --muted: #8b949e; --accent: #3fb950; --error: #f85149; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }
a { color: var(--accent); }
.container { max-width: 1100px; margin: 0 auto; padding: 0 1rem; }
.header-content, .footer-content { display: flex; align-items: center; justify-content: space-between; padding: 1rem 0; }
.nav-link { margin-right: 1rem; color: var(--muted); text-decoration: none; }
.nav-link.active { color: var(--text); font-weight: 600; }
.btn { display: inline-block; padding: .5rem 1rem; border-radius: 6px; border: 1px solid var(--muted); color: var(--text); background: transparent; text-decoration: none; cursor: pointer; }
.btn-primary { background: var(--accent); border-color: var(--accent); color: #000; }
.project-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; }
.project-card, .card, .info-card { background: var(--card); border-radius: 8px; overflow: hidden; }
.project-image img, .project-image-placeholder { width: 100%; height: 180px; object-fit: cover; display: flex; align-items: center; justify-content: center; color: var(--muted); }
.project-content, .card-body, .card-footer, .info-card { padding: 1rem; }
.project-description, .project-author, .form-hint { color: var(--muted); }
.project-link { margin-right: .75rem; }
.alert { padding: .75rem 1rem; border-radius: 6px; margin: 1rem 0; }
.alert-success { border: 1px solid var(--accent); }
.alert-error, .form-error { color: var(--error); }
.alert-error { border: 1px solid var(--error); }
.form-group { margin-bottom: 1.25rem; }
.form-label { display: block; margin-bottom: .4rem; }
.form-input, .form-textarea { width: 100%; padding: .6rem; border-radius: 6px; border: 1px solid var(--muted); background: var(--bg); color: var(--text); }
.screenshot-modal { display: flex; flex-direction: column; align-items: center; padding: 2rem 0; }
.screenshot-modal-image img { max-width: 100%; max-height: 75vh; }
.screenshot-modal-nav { display: flex; gap: 1rem; align-items: center; margin-top: 1rem; }
"#;

fn nav_link(href: &str, label: &str, active: bool) -> String {
    format!(
        r#"<a href="{href}" class="nav-link{class}">{label}</a>"#,
        href = href,
        class = if active { " active" } else { "" },
        label = label,
    )
}

pub fn render_page(page: Page<'_>) -> String {
    let refresh = page
        .refresh_after
        .map(|secs| format!(r#"<meta http-equiv="refresh" content="{secs};url=/">"#))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>{title} · Chexplore</title>
<style>{style}</style>
</head>
<body>
<div class="app">
<header class="header">
  <div class="container header-content">
    <a href="/" class="logo">Vibe Coding</a>
    <nav class="nav">
      {projects}
      {add_project}
    </nav>
    <a href="/upload" class="btn btn-primary btn-sm">Share Project</a>
  </div>
</header>
<main>
{body}
</main>
<footer class="footer">
  <div class="container footer-content">
    <p class="footer-text">© {year} Chexplore. Share your creations with the world.</p>
    <p class="footer-text">Made with 💚 for developers</p>
  </div>
</footer>
</div>
</body>
</html>"#,
        refresh = refresh,
        title = html_escape(page.title),
        style = STYLE,
        projects = nav_link("/", "Projects", page.active == NavTab::Projects),
        add_project = nav_link("/upload", "Add Project", page.active == NavTab::AddProject),
        body = page.body,
        year = Utc::now().year(),
    )
}
