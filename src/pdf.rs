//! PDF text extraction and cleanup.
//!
//! Extraction itself is delegated to `pdf-extract`; this module only
//! strips the decorative noise that page text tends to carry before it
//! goes into a summary prompt: bullets and dashes, leading numeric list
//! markers, and runs of whitespace.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("PDF extraction failed: {0}")]
    Pdf(String),
    #[error("PDF contained no extractable text")]
    Empty,
}

fn bullet_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[•\-–—]").expect("static bullet regex"))
}

fn list_marker_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d{1,3}\s*-\s*").expect("static list marker regex"))
}

fn whitespace_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("static whitespace regex"))
}

/// Extract all pages' text from a PDF byte stream and clean it up.
pub fn extract_pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let raw =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    let cleaned = clean_text(&raw);
    if cleaned.is_empty() {
        return Err(ExtractError::Empty);
    }
    Ok(cleaned)
}

/// Remove bullets/dashes and leading numeric list markers, collapse
/// whitespace, trim.
pub fn clean_text(text: &str) -> String {
    let text = bullet_regex().replace_all(text, " ");
    let text = list_marker_regex().replace_all(&text, "");
    let text = whitespace_regex().replace_all(&text, " ");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_bullets_and_collapses_whitespace() {
        let cleaned = clean_text("• Cláusula primeira\n\n– prazo de   vigência —");
        assert_eq!(cleaned, "Cláusula primeira prazo de vigência");
    }

    #[test]
    fn clean_removes_numeric_list_markers() {
        let cleaned = clean_text("1 - Objeto do contrato\n12 - Foro");
        assert!(!cleaned.contains("1 -"));
        assert!(cleaned.contains("Objeto do contrato"));
    }

    #[test]
    fn invalid_pdf_returns_error() {
        let err = extract_pdf_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, ExtractError::Pdf(_)));
    }
}
