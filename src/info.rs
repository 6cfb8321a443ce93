//! Document metadata (`\info` group): string-valued fields routed through a
//! `TextSetter` destination, and date-valued fields routed through a
//! `TimeSetter` destination.

use chrono::NaiveDateTime;
use std::borrow::Cow;

/// Document metadata, accumulated while inside `\info`.
#[derive(Debug, Clone, Default)]
pub struct DocumentInfo {
    pub title: Option<Cow<'static, str>>,
    pub subject: Option<Cow<'static, str>>,
    pub author: Option<Cow<'static, str>>,
    pub manager: Option<Cow<'static, str>>,
    pub company: Option<Cow<'static, str>>,
    pub operator: Option<Cow<'static, str>>,
    pub category: Option<Cow<'static, str>>,
    pub keywords: Option<Cow<'static, str>>,
    pub comment: Option<Cow<'static, str>>,
    pub doccomm: Option<Cow<'static, str>>,
    pub hlinkbase: Option<Cow<'static, str>>,
    pub creatim: Option<NaiveDateTime>,
    pub revtim: Option<NaiveDateTime>,
    pub printim: Option<NaiveDateTime>,
    pub buptim: Option<NaiveDateTime>,
}

impl DocumentInfo {
    pub fn new() -> Self {
        Self::default()
    }
}

/// The string-valued info field a `TextSetter` destination is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInfoField {
    Title,
    Subject,
    Author,
    Manager,
    Company,
    Operator,
    Category,
    Keywords,
    Comment,
    Doccomm,
    Hlinkbase,
}

impl TextInfoField {
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "title" => TextInfoField::Title,
            "subject" => TextInfoField::Subject,
            "author" => TextInfoField::Author,
            "manager" => TextInfoField::Manager,
            "company" => TextInfoField::Company,
            "operator" => TextInfoField::Operator,
            "category" => TextInfoField::Category,
            "keywords" => TextInfoField::Keywords,
            "comment" => TextInfoField::Comment,
            "doccomm" => TextInfoField::Doccomm,
            "hlinkbase" => TextInfoField::Hlinkbase,
            _ => return None,
        })
    }

    /// Assign `text` to this field on `info`.
    pub fn assign(self, info: &mut DocumentInfo, text: Cow<'static, str>) {
        let slot = match self {
            TextInfoField::Title => &mut info.title,
            TextInfoField::Subject => &mut info.subject,
            TextInfoField::Author => &mut info.author,
            TextInfoField::Manager => &mut info.manager,
            TextInfoField::Company => &mut info.company,
            TextInfoField::Operator => &mut info.operator,
            TextInfoField::Category => &mut info.category,
            TextInfoField::Keywords => &mut info.keywords,
            TextInfoField::Comment => &mut info.comment,
            TextInfoField::Doccomm => &mut info.doccomm,
            TextInfoField::Hlinkbase => &mut info.hlinkbase,
        };
        *slot = Some(text);
    }
}

/// The date-valued info field a `TimeSetter` destination is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateInfoField {
    Creatim,
    Revtim,
    Printim,
    Buptim,
}

impl DateInfoField {
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "creatim" => DateInfoField::Creatim,
            "revtim" => DateInfoField::Revtim,
            "printim" => DateInfoField::Printim,
            "buptim" => DateInfoField::Buptim,
            _ => return None,
        })
    }

    pub fn assign(self, info: &mut DocumentInfo, when: NaiveDateTime) {
        let slot = match self {
            DateInfoField::Creatim => &mut info.creatim,
            DateInfoField::Revtim => &mut info.revtim,
            DateInfoField::Printim => &mut info.printim,
            DateInfoField::Buptim => &mut info.buptim,
        };
        *slot = Some(when);
    }
}

/// Build a `NaiveDateTime` from the accumulated `yr`/`mo`/`dy` (required) and
/// `hr`/`min`/`sec` (default 0) property values.
pub fn build_date_time(yr: i32, mo: i32, dy: i32, hr: i32, min: i32, sec: i32) -> Option<NaiveDateTime> {
    use chrono::{NaiveDate, NaiveTime};
    let date = NaiveDate::from_ymd_opt(yr, mo as u32, dy as u32)?;
    let time = NaiveTime::from_hms_opt(hr as u32, min as u32, sec as u32)?;
    Some(date.and_time(time))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_text_field() {
        let mut info = DocumentInfo::new();
        TextInfoField::Title.assign(&mut info, Cow::Borrowed("Report"));
        assert_eq!(info.title.as_deref(), Some("Report"));
    }

    #[test]
    fn builds_date_with_default_time() {
        let dt = build_date_time(2024, 3, 9, 0, 0, 0).unwrap();
        assert_eq!(dt.to_string(), "2024-03-09 00:00:00");
    }

    #[test]
    fn rejects_invalid_date() {
        assert!(build_date_time(2024, 13, 40, 0, 0, 0).is_none());
    }
}
