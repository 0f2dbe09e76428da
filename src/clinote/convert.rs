//! Conversion between the markdown rendering and the wire markup of a note.

use crate::error::{ClinoteError, Result};
use pulldown_cmark::{html, Options, Parser};

/// Converts note content between markdown and wire markup. Implementations are
/// pure functions of their input.
pub trait ContentConverter {
    /// Renders markdown as inner wire markup, without the document envelope.
    fn to_wire_markup(&self, markdown: &str) -> String;

    /// Renders inner wire markup as markdown.
    fn to_markdown(&self, markup: &str) -> Result<String>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownConverter;

impl ContentConverter for MarkdownConverter {
    fn to_wire_markup(&self, markdown: &str) -> String {
        let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES;
        let parser = Parser::new_ext(markdown, options);
        let mut out = String::new();
        html::push_html(&mut out, parser);
        out
    }

    fn to_markdown(&self, markup: &str) -> Result<String> {
        let mut out = String::new();
        let mut links: Vec<String> = Vec::new();
        let mut rest = markup;

        while let Some(open) = rest.find('<') {
            push_text(&mut out, &rest[..open]);
            let tail = &rest[open..];
            let close = tail.find('>').ok_or_else(|| {
                ClinoteError::Conversion(format!("unterminated tag at byte {}", markup.len() - tail.len()))
            })?;
            let tag = &tail[1..close];
            rest = &tail[close + 1..];
            if !tag.starts_with('!') && !tag.starts_with('?') {
                apply_tag(&mut out, &mut links, tag);
            }
        }
        push_text(&mut out, rest);

        Ok(collapse_blank_lines(&out))
    }
}

fn apply_tag(out: &mut String, links: &mut Vec<String>, tag: &str) {
    let closing = tag.starts_with('/');
    let name = tag
        .trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    match (name.as_str(), closing) {
        ("p" | "blockquote" | "table", _) => block_break(out),
        ("div" | "tr", _) => line_break(out),
        ("br", _) => out.push('\n'),
        ("hr", _) => {
            block_break(out);
            out.push_str("***");
            block_break(out);
        }
        (h, false) if is_heading(h) => {
            block_break(out);
            let level = h[1..].parse::<usize>().unwrap_or(1);
            out.push_str(&"#".repeat(level));
            out.push(' ');
        }
        (h, true) if is_heading(h) => block_break(out),
        ("ul" | "ol", false) => line_break(out),
        ("ul" | "ol", true) => block_break(out),
        ("li", false) => {
            line_break(out);
            out.push_str("- ");
        }
        ("strong" | "b", _) => out.push_str("**"),
        ("em" | "i", _) => out.push('*'),
        ("del" | "s", _) => out.push_str("~~"),
        ("code", _) => out.push('`'),
        ("pre", false) => {
            block_break(out);
            out.push_str("```\n");
        }
        ("pre", true) => {
            line_break(out);
            out.push_str("```");
            block_break(out);
        }
        ("td" | "th", true) => out.push(' '),
        ("a", false) => {
            links.push(attribute(tag, "href").unwrap_or_default());
            out.push('[');
        }
        ("a", true) => {
            let href = links.pop().unwrap_or_default();
            out.push_str("](");
            out.push_str(&href);
            out.push(')');
        }
        ("en-todo", false) => {
            if attribute(tag, "checked").as_deref() == Some("true") {
                out.push_str("[x] ");
            } else {
                out.push_str("[ ] ");
            }
        }
        _ => {}
    }
}

fn is_heading(name: &str) -> bool {
    matches!(name, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

fn block_break(out: &mut String) {
    if out.is_empty() {
        return;
    }
    while !out.ends_with("\n\n") {
        out.push('\n');
    }
}

fn line_break(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

fn attribute(tag: &str, name: &str) -> Option<String> {
    for quote in ['"', '\''] {
        let needle = format!("{}={}", name, quote);
        if let Some(start) = tag.find(&needle) {
            let value = &tag[start + needle.len()..];
            let end = value.find(quote)?;
            return Some(decode_entities(&value[..end]));
        }
    }
    None
}

fn push_text(out: &mut String, text: &str) {
    // Whitespace between block elements is layout, not content.
    if text.trim().is_empty() && text.contains('\n') {
        return;
    }
    out.push_str(&decode_entities(text));
}

fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= 10)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        _ => {
            let code = entity.strip_prefix('#')?;
            let value = match code.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => code.parse().ok()?,
            };
            char::from_u32(value)
        }
    }
}

fn collapse_blank_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut newlines = 0;
    for c in text.chars() {
        if c == '\n' {
            newlines += 1;
            if newlines > 2 {
                continue;
            }
        } else {
            newlines = 0;
        }
        out.push(c);
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_renders_to_markup() {
        let markup = MarkdownConverter.to_wire_markup("# Title\n\nSome *text*");
        assert!(markup.contains("<h1>Title</h1>"));
        assert!(markup.contains("<em>text</em>"));
    }

    #[test]
    fn test_div_lines_become_lines() {
        let md = MarkdownConverter
            .to_markdown("<div>milk</div><div>eggs</div>")
            .unwrap();
        assert_eq!(md, "milk\neggs");
    }

    #[test]
    fn test_inline_formatting_and_links() {
        let md = MarkdownConverter
            .to_markdown(
                "<h1>Title</h1><p>Some <b>bold</b> &amp; <a href=\"https://x.y\">link</a></p>",
            )
            .unwrap();
        assert_eq!(md, "# Title\n\nSome **bold** & [link](https://x.y)");
    }

    #[test]
    fn test_lists_and_todos() {
        let md = MarkdownConverter
            .to_markdown("<ul>\n<li>a</li>\n<li>b</li>\n</ul><div><en-todo checked=\"true\"/>done</div>")
            .unwrap();
        assert_eq!(md, "- a\n- b\n\n[x] done");
    }

    #[test]
    fn test_numeric_entities_decode() {
        let md = MarkdownConverter.to_markdown("<p>&#65;&#x42;&unknown;</p>").unwrap();
        assert_eq!(md, "AB&unknown;");
    }

    #[test]
    fn test_unterminated_tag_is_an_error() {
        let err = MarkdownConverter.to_markdown("<p>ok</p><div").unwrap_err();
        assert!(matches!(err, ClinoteError::Conversion(_)));
    }

    #[test]
    fn test_markdown_survives_a_round_trip() {
        let original = "# Plan\n\n- one\n- two";
        let markup = MarkdownConverter.to_wire_markup(original);
        assert_eq!(MarkdownConverter.to_markdown(&markup).unwrap(), original);
    }
}
