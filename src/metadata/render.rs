/// Renders free-text documentation markup for display.
///
/// Markdown (or any other markup) rendering lives outside the engine; the
/// metadata facade only hands raw markup to an implementation of this trait.
pub trait DocRenderer {
    /// Plain terminal text.
    fn to_text(&self, markup: &str) -> String;

    /// An HTML fragment.
    fn to_html(&self, markup: &str) -> String;
}

/// Renderer that treats markup as plain text.
///
/// Blank lines separate paragraphs; within a paragraph lines are joined.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl PlainRenderer {
    fn paragraphs(markup: &str) -> Vec<String> {
        markup
            .split("\n\n")
            .map(|p| p.split_whitespace().collect::<Vec<_>>().join(" "))
            .filter(|p| !p.is_empty())
            .collect()
    }
}

impl DocRenderer for PlainRenderer {
    fn to_text(&self, markup: &str) -> String {
        Self::paragraphs(markup).join("\n\n")
    }

    fn to_html(&self, markup: &str) -> String {
        Self::paragraphs(markup)
            .iter()
            .map(|p| format!("<p>{}</p>", escape_html(p)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_joins_paragraph_lines() {
        let markup = "First line\ncontinues.\n\nSecond   paragraph.\n";
        assert_eq!(
            PlainRenderer.to_text(markup),
            "First line continues.\n\nSecond paragraph."
        );
    }

    #[test]
    fn test_html_escapes() {
        assert_eq!(
            PlainRenderer.to_html("a < b & \"c\""),
            "<p>a &lt; b &amp; &quot;c&quot;</p>"
        );
        assert_eq!(PlainRenderer.to_html(""), "");
    }
}
