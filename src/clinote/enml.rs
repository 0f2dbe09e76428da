//! The document envelope used for note content on the wire.

pub const XML_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE en-note SYSTEM "http://xml.evernote.com/pub/enml2.dtd">"#;

const ROOT_OPEN: &str = "<en-note";
const ROOT_CLOSE: &str = "</en-note>";

/// Wraps inner markup in the declaration, doctype and root element.
pub fn wrap(inner: &str) -> String {
    format!("{}<en-note>{}</en-note>", XML_HEADER, inner)
}

/// A valid document with an empty root element.
pub fn empty_document() -> String {
    wrap("")
}

/// Extracts the inner markup of the root element from fetched content.
///
/// Content without a root element is returned as-is.
pub fn note_body(content: &str) -> String {
    let Some(start) = content.find(ROOT_OPEN) else {
        return content.trim().to_string();
    };
    let Some(tag_len) = content[start..].find('>') else {
        return String::new();
    };
    let tag_end = start + tag_len;
    if content[..tag_end].ends_with('/') {
        return String::new();
    }
    let inner_start = tag_end + 1;
    match content.rfind(ROOT_CLOSE) {
        Some(end) if end >= inner_start => content[inner_start..end].to_string(),
        _ => content[inner_start..].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_header_and_empty_root() {
        assert_eq!(
            empty_document(),
            format!("{}<en-note></en-note>", XML_HEADER)
        );
    }

    #[test]
    fn test_extracts_inner_markup() {
        let content = wrap("<div>milk</div><div>eggs</div>");
        assert_eq!(note_body(&content), "<div>milk</div><div>eggs</div>");
    }

    #[test]
    fn test_extracts_from_root_with_attributes() {
        let content = format!(
            "{}<en-note style=\"word-wrap: break-word;\"><p>hi</p></en-note>\n",
            XML_HEADER
        );
        assert_eq!(note_body(&content), "<p>hi</p>");
    }

    #[test]
    fn test_self_closing_root_is_empty() {
        assert_eq!(note_body(&format!("{}<en-note/>", XML_HEADER)), "");
    }

    #[test]
    fn test_content_without_root_is_kept() {
        assert_eq!(note_body("  <p>loose</p> "), "<p>loose</p>");
    }
}
