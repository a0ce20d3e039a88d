//! Full-page HTML wrapper for rendered fragments.

use crate::config::OutputConfig;
use crate::render::escape_html;

/// Page-level settings for [`wrap_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    pub title: String,
    /// Href of an external stylesheet, if any.
    pub stylesheet: Option<String>,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self::from(&OutputConfig::default())
    }
}

impl From<&OutputConfig> for DocumentOptions {
    fn from(output: &OutputConfig) -> Self {
        Self {
            title: output.title.clone(),
            stylesheet: output.stylesheet.clone(),
        }
    }
}

/// Wrap an already-rendered `body` fragment in an HTML5 page.
pub fn wrap_document(body: &str, options: &DocumentOptions) -> String {
    let stylesheet = options
        .stylesheet
        .as_deref()
        .map(|href| {
            format!(
                "\n    <link rel=\"stylesheet\" href=\"{}\">",
                escape_html(href)
            )
        })
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>{stylesheet}
</head>
<body>
<div class="chat-content">
{body}
</div>
</body>
</html>
"#,
        title = escape_html(&options.title),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_body_with_escaped_title() {
        let options = DocumentOptions {
            title: "Q&A <1>".into(),
            stylesheet: None,
        };
        let html = wrap_document("<p>hi</p>", &options);
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<meta charset=\"utf-8\">"));
        assert!(html.contains("<title>Q&amp;A &lt;1&gt;</title>"));
        assert!(html.contains("<div class=\"chat-content\">\n<p>hi</p>\n</div>"));
        assert!(!html.contains("stylesheet"));
    }

    #[test]
    fn links_escaped_stylesheet() {
        let options = DocumentOptions {
            title: "t".into(),
            stylesheet: Some("a.css?v=\"1\"".into()),
        };
        let html = wrap_document("", &options);
        assert!(html.contains("<link rel=\"stylesheet\" href=\"a.css?v=&quot;1&quot;\">"));
    }

    #[test]
    fn options_follow_output_config() {
        let output = OutputConfig {
            title: "Chat".into(),
            stylesheet: Some("s.css".into()),
            ..OutputConfig::default()
        };
        let options = DocumentOptions::from(&output);
        assert_eq!(options.title, "Chat");
        assert_eq!(options.stylesheet.as_deref(), Some("s.css"));
    }

    #[test]
    fn default_options_match_default_output_config() {
        let options = DocumentOptions::default();
        assert_eq!(options.title, OutputConfig::default().title);
        assert_eq!(options.stylesheet, None);
    }
}
