//! Charset resolution: RTF charset keywords and `\fcharsetN` values to
//! `encoding_rs` encodings, plus `\ansicpgN` codepage overrides.

use crate::error::{RtfError, RtfResult};
use encoding_rs::Encoding;

/// The document-level charset keyword (`\ansi`, `\pc`, `\pca`, `\mac`), with
/// `\ansicpgN` able to override the codepage backing `\ansi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCharset {
    Ansi,
    Pc,
    Pca,
    Mac,
}

impl Default for DocCharset {
    fn default() -> Self {
        DocCharset::Ansi
    }
}

impl DocCharset {
    pub fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "ansi" => DocCharset::Ansi,
            "pc" => DocCharset::Pc,
            "pca" => DocCharset::Pca,
            "mac" => DocCharset::Mac,
            _ => return None,
        })
    }
}

/// Map a document charset keyword to its default encoding, honoring an
/// `\ansicpgN` override for `\ansi`.
pub fn doc_charset_encoding(charset: DocCharset, ansicpg: Option<i32>) -> &'static Encoding {
    match charset {
        DocCharset::Ansi => ansicpg
            .and_then(|cp| codepage_to_encoding(cp))
            .unwrap_or(encoding_rs::WINDOWS_1252),
        DocCharset::Pc => encoding_rs::IBM866,
        DocCharset::Pca => encoding_rs::IBM866,
        DocCharset::Mac => encoding_rs::MACINTOSH,
    }
}

/// Map a raw Windows codepage number to an encoding.
pub fn codepage_to_encoding(codepage: i32) -> Option<&'static Encoding> {
    Some(match codepage {
        437 | 850 => encoding_rs::IBM866,
        708 | 1256 => encoding_rs::WINDOWS_1256,
        874 => encoding_rs::WINDOWS_874,
        932 => encoding_rs::SHIFT_JIS,
        936 => encoding_rs::GBK,
        949 => encoding_rs::EUC_KR,
        950 => encoding_rs::BIG5,
        1250 => encoding_rs::WINDOWS_1250,
        1251 => encoding_rs::WINDOWS_1251,
        1252 => encoding_rs::WINDOWS_1252,
        1253 => encoding_rs::WINDOWS_1253,
        1254 => encoding_rs::WINDOWS_1254,
        1255 => encoding_rs::WINDOWS_1255,
        1257 => encoding_rs::WINDOWS_1257,
        1258 => encoding_rs::WINDOWS_1258,
        10000 => encoding_rs::MACINTOSH,
        _ => return None,
    })
}

/// Map `\fcharsetN` to an encoding per the table in §4.3. `1` (default) and
/// `3` (MAC, approximated by falling back to the document charset) fall back
/// to the caller-supplied default; any other unlisted value is an error.
pub fn fcharset_encoding(
    fcharset: i32,
    offset: usize,
    default: &'static Encoding,
) -> RtfResult<&'static Encoding> {
    Ok(match fcharset {
        0 => encoding_rs::WINDOWS_1252,
        2 => encoding_rs::WINDOWS_1252, // symbol: treated as ansi for byte decoding
        77 => encoding_rs::MACINTOSH,
        128 => encoding_rs::SHIFT_JIS,
        129 => encoding_rs::EUC_KR,
        130 => encoding_rs::EUC_KR, // johab: no native encoding_rs table, approximate
        134 => encoding_rs::GB18030,
        136 => encoding_rs::BIG5,
        161 => encoding_rs::WINDOWS_1253,
        162 => encoding_rs::WINDOWS_1254,
        163 => encoding_rs::WINDOWS_1258,
        177 => encoding_rs::WINDOWS_1255,
        178 => encoding_rs::WINDOWS_1256,
        186 => encoding_rs::WINDOWS_1257,
        204 => encoding_rs::WINDOWS_1251,
        222 => encoding_rs::WINDOWS_874,
        238 => encoding_rs::WINDOWS_1250,
        254 => encoding_rs::IBM866,
        255 => encoding_rs::WINDOWS_1252,
        1 | 3 => default,
        _ => return Err(RtfError::UnknownCharset { offset, charset: fcharset }),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansicpg_overrides_ansi() {
        let enc = doc_charset_encoding(DocCharset::Ansi, Some(1251));
        assert_eq!(enc.name(), "windows-1251");
    }

    #[test]
    fn mac_keyword_is_macintosh() {
        let enc = doc_charset_encoding(DocCharset::Mac, None);
        assert_eq!(enc.name(), "macintosh");
    }

    #[test]
    fn unknown_fcharset_is_an_error() {
        let err = fcharset_encoding(999, 0, encoding_rs::WINDOWS_1252).unwrap_err();
        assert!(matches!(err, RtfError::UnknownCharset { charset: 999, .. }));
    }

    #[test]
    fn fcharset_1_falls_back_to_default() {
        let enc = fcharset_encoding(1, 0, encoding_rs::WINDOWS_1251).unwrap();
        assert_eq!(enc.name(), "windows-1251");
    }
}
