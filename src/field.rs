//! RTF field support (hyperlinks, cross-references, etc.).
//!
//! Fields are structured as `{\field{\*\fldinst FIELD_INSTRUCTION}{\fldrslt
//! FIELD_RESULT}}`. Only `HYPERLINK` is required to produce an Output event;
//! other recognized instruction keywords are classified but do not currently
//! emit anything of their own (§4.5, §4.6).

use std::borrow::Cow;

/// Field instruction keyword classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Hyperlink,
    Reference,
    Page,
    Date,
    Toc,
    Bookmark,
    Equation,
    Index,
    Unknown,
}

impl FieldType {
    fn classify(instruction: &str) -> Self {
        let trimmed = instruction.trim_start();
        if trimmed.starts_with("HYPERLINK") {
            FieldType::Hyperlink
        } else if trimmed.starts_with("REF") {
            FieldType::Reference
        } else if trimmed.starts_with("PAGE") {
            FieldType::Page
        } else if trimmed.starts_with("DATE") || trimmed.starts_with("TIME") {
            FieldType::Date
        } else if trimmed.starts_with("TOC") {
            FieldType::Toc
        } else if trimmed.starts_with("BOOKMARK") {
            FieldType::Bookmark
        } else if trimmed.starts_with("EQ") {
            FieldType::Equation
        } else if trimmed.starts_with("INDEX") || trimmed.starts_with("XE") {
            FieldType::Index
        } else {
            FieldType::Unknown
        }
    }
}

/// A parsed field: its instruction text and (if present) its result text.
#[derive(Debug, Clone)]
pub struct Field<'a> {
    pub field_type: FieldType,
    pub instruction: Cow<'a, str>,
    pub result: Cow<'a, str>,
}

impl<'a> Field<'a> {
    pub fn new(instruction: Cow<'a, str>, result: Cow<'a, str>) -> Self {
        Self {
            field_type: FieldType::classify(&instruction),
            instruction,
            result,
        }
    }

    /// Extract the URL from a `HYPERLINK "url" ...` instruction.
    pub fn extract_url(&self) -> Option<String> {
        if self.field_type != FieldType::Hyperlink {
            return None;
        }
        let inst = self.instruction.trim();
        let after = inst.strip_prefix("HYPERLINK")?.trim_start();

        if let Some(start_quote) = after.find('"')
            && let Some(end_quote) = after[start_quote + 1..].find('"')
        {
            return Some(after[start_quote + 1..start_quote + 1 + end_quote].to_string());
        }

        after.split_whitespace().next().map(str::to_string)
    }

    pub fn extract_bookmark(&self) -> Option<String> {
        if self.field_type != FieldType::Reference {
            return None;
        }
        let inst = self.instruction.trim();
        inst.strip_prefix("REF")?
            .split_whitespace()
            .next()
            .map(str::to_string)
    }

    #[inline]
    pub fn display_text(&self) -> &str {
        if !self.result.is_empty() {
            &self.result
        } else {
            &self.instruction
        }
    }
}

/// Accumulator for a `{\field ...}` group while its two sub-destinations
/// (`\fldinst`, `\fldrslt`) are being parsed.
#[derive(Debug, Clone, Default)]
pub struct FieldAccum {
    pub instruction: String,
    pub result: String,
}

impl FieldAccum {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(self) -> Field<'static> {
        Field::new(Cow::Owned(self.instruction), Cow::Owned(self.result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quoted_hyperlink() {
        let field = Field::new(Cow::Borrowed(r#"HYPERLINK "https://example.com""#), Cow::Borrowed("click"));
        assert_eq!(field.field_type, FieldType::Hyperlink);
        assert_eq!(field.extract_url(), Some("https://example.com".to_string()));
    }

    #[test]
    fn parses_hyperlink_with_tooltip() {
        let field = Field::new(
            Cow::Borrowed(r#"HYPERLINK "https://example.com" \o "Click here""#),
            Cow::Borrowed(""),
        );
        assert_eq!(field.extract_url(), Some("https://example.com".to_string()));
    }

    #[test]
    fn classifies_ref_field() {
        let field = Field::new(Cow::Borrowed("REF MyBookmark \\h"), Cow::Borrowed(""));
        assert_eq!(field.field_type, FieldType::Reference);
        assert_eq!(field.extract_bookmark(), Some("MyBookmark".to_string()));
    }

    #[test]
    fn display_text_prefers_result() {
        let field = Field::new(Cow::Borrowed("HYPERLINK \"url\""), Cow::Borrowed("Click here"));
        assert_eq!(field.display_text(), "Click here");
    }
}
