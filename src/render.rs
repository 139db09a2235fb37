//! HTML rendering of stored art.

use crate::art::AsciiImage;

/// Wrap the art in a styled `<pre>` block.
pub fn to_html(art: &AsciiImage) -> String {
    format!(
        "<pre style=\"{}\">{}</pre>",
        art.style().css(),
        escape_html(&art.to_text())
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::art::StyleCode;

    #[test]
    fn test_html_uses_style_css() {
        let art = AsciiImage::from_text("@.\n.@", StyleCode::BlackOnWhite).unwrap();
        assert_eq!(
            to_html(&art),
            "<pre style=\"background-color: white; color: black; line-height: 10px\">@.\n.@</pre>"
        );
    }

    #[test]
    fn test_html_escapes_markup() {
        let art = AsciiImage::from_text("<&>", StyleCode::WhiteOnBlack).unwrap();
        assert!(to_html(&art).contains("&lt;&amp;&gt;"));
    }
}
