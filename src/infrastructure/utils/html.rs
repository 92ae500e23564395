use std::collections::HashSet;

use ammonia::{Builder, UrlRelative};
use url::Url;

/// Escapes text for use in HTML bodies and quoted attributes.
pub fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// True for absolute `http`/`https` URLs, the only kind offered as links.
pub fn is_http_url(value: &str) -> bool {
    Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

/// Sanitizes a rendered fragment built from backend rows. Links keep only
/// http(s) or site-relative targets and always open without an opener.
pub fn sanitize_fragment(fragment: &str) -> String {
    Builder::default()
        .url_schemes(HashSet::from(["http", "https"]))
        .url_relative(UrlRelative::PassThrough)
        .link_rel(Some("noopener noreferrer"))
        .add_generic_attributes(&["class"])
        .add_tag_attributes("a", &["target"])
        .add_tag_attributes("img", &["loading"])
        .clean(fragment)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_and_quotes() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#x27;Jerry&#x27;&lt;/a&gt;"
        );
    }

    #[test]
    fn only_absolute_http_urls_qualify() {
        assert!(is_http_url("https://github.com/me/app"));
        assert!(is_http_url(" http://localhost:3000 "));
        assert!(!is_http_url("javascript:alert(document.cookie)"));
        assert!(!is_http_url("ftp://files.example.com/app.zip"));
        assert!(!is_http_url("data:text/html,<script>1</script>"));
        assert!(!is_http_url("/relative/path"));
    }

    #[test]
    fn sanitizer_strips_script_links() {
        let html = sanitize_fragment(
            r#"<a href="javascript:alert(1)" class="project-link">GitHub</a><script>alert(2)</script>"#,
        );

        assert!(!html.contains("javascript:"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"class="project-link""#));
    }

    #[test]
    fn sanitizer_keeps_http_and_relative_links() {
        let html = sanitize_fragment(
            r#"<a href="https://demo.example.com" target="_blank">Live</a><a href="/projects/3/screenshots">Shots</a>"#,
        );

        assert!(html.contains(r#"href="https://demo.example.com""#));
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"href="/projects/3/screenshots""#));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }
}
