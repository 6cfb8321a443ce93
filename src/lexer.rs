//! Lexer primitives layered over the byte reader.
//!
//! These are the building blocks `read_control` (the parser driver) composes;
//! none of them interpret control-word *meaning* — that is the control-word
//! dispatch table's job.

use crate::error::{RtfError, RtfResult};
use crate::reader::{ByteReader, is_digit, is_letter};

/// A control word's parameter: present and its integer value, or absent.
pub type Param = Option<i32>;

/// Read the letters of a control word. May return an empty string (e.g. for
/// `\'hh`, `\~`, or `\<CR>`, which the driver handles separately after
/// observing an empty word).
pub fn read_word(r: &mut ByteReader<'_>) -> String {
    let bytes = r.read_while(is_letter);
    // Control words are pure ASCII; this is infallible by construction.
    String::from_utf8(bytes).expect("control word letters are ASCII")
}

/// Read an optional signed integer parameter: `-?[0-9]+`. Returns `default`
/// if no digit (or leading `-` followed by no digit) is present.
pub fn read_number(r: &mut ByteReader<'_>, default: i32) -> i32 {
    let negative = match r.peek() {
        Some(b'-') => {
            r.read_byte();
            true
        }
        _ => false,
    };

    let digits = r.read_while(is_digit);
    if digits.is_empty() {
        if negative {
            r.unread();
        }
        return default;
    }

    // Most control-word parameters are signed 16-bit; `\u` is the exception
    // and needs the full i32 range, so we parse into i32 here and let
    // narrower callers clamp as needed.
    let magnitude: i64 = digits.iter().fold(0i64, |acc, &b| {
        acc * 10 + i64::from(b - b'0')
    });
    let value = if negative { -magnitude } else { magnitude };
    value.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Consume exactly one trailing space if present; otherwise push back
/// whatever was read. This is the only whitespace the lexer eats after a
/// control token.
pub fn end_control(r: &mut ByteReader<'_>) {
    match r.read_byte() {
        Some(b' ') => {}
        Some(_) => r.unread(),
        None => {}
    }
}

/// Read exactly `expected` bytes and verify they match, failing otherwise.
pub fn consume(r: &mut ByteReader<'_>, expected: &[u8]) -> RtfResult<()> {
    let offset = r.offset();
    match r.read_n(expected.len()) {
        Some(actual) if actual == expected => Ok(()),
        _ => Err(RtfError::lex(
            offset,
            format!("expected literal bytes {:?}", String::from_utf8_lossy(expected)),
        )),
    }
}

/// Read exactly two hex digits and return the decoded byte.
pub fn read_hex_byte(r: &mut ByteReader<'_>) -> RtfResult<u8> {
    let offset = r.offset();
    let mut value: u8 = 0;
    for _ in 0..2 {
        let b = r
            .read_byte()
            .ok_or_else(|| RtfError::lex(offset, "unexpected EOF in hex escape"))?;
        let digit = (b as char)
            .to_digit(16)
            .ok_or_else(|| RtfError::lex(offset, "invalid hex digit in \\'hh escape"))?;
        value = value * 16 + digit as u8;
    }
    Ok(value)
}

/// Skip `n` "replacement units" after a `\u`, where one unit is a single
/// literal byte, one `\'hh` hex escape, or one full control word with its
/// optional parameter and terminating space. A `{` or `}` encountered while
/// skipping ends skipping immediately and is left unread.
pub fn skip_chars(r: &mut ByteReader<'_>, n: i32) -> RtfResult<()> {
    for _ in 0..n.max(0) {
        let offset = r.offset();
        match r.read_byte() {
            None => return Ok(()),
            Some(b'{') | Some(b'}') => {
                r.unread();
                return Ok(());
            }
            Some(b'\\') => {
                match r.read_byte() {
                    Some(b'\'') => {
                        read_hex_byte(r)?;
                    }
                    Some(b) if is_letter(b) => {
                        r.unread();
                        let word = read_word(r);
                        if word.is_empty() {
                            return Err(RtfError::lex(offset, "empty control word while skipping"));
                        }
                        read_number(r, i32::MIN);
                        end_control(r);
                    }
                    Some(_) => {
                        // Escaped literal such as \\, \{, \}, \~, \-, \_: one unit.
                    }
                    None => return Ok(()),
                }
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_word_and_number() {
        let mut r = ByteReader::new(b"rtf1 ");
        assert_eq!(read_word(&mut r), "rtf");
        assert_eq!(read_number(&mut r, 0), 1);
        end_control(&mut r);
        assert!(r.is_eof());
    }

    #[test]
    fn negative_number_with_no_digits_unreads_sign() {
        let mut r = ByteReader::new(b"-x");
        assert_eq!(read_number(&mut r, 7), 7);
        assert_eq!(r.read_byte(), Some(b'-'));
    }

    #[test]
    fn end_control_only_eats_one_space() {
        let mut r = ByteReader::new(b"  x");
        end_control(&mut r);
        assert_eq!(r.read_byte(), Some(b' '));
    }

    #[test]
    fn skip_chars_stops_at_brace() {
        let mut r = ByteReader::new(b"ab}c");
        skip_chars(&mut r, 5).unwrap();
        assert_eq!(r.read_byte(), Some(b'}'));
    }

    #[test]
    fn skip_chars_counts_control_word_as_one_unit() {
        let mut r = ByteReader::new(b"\\foo123 X");
        skip_chars(&mut r, 1).unwrap();
        assert_eq!(r.read_byte(), Some(b'X'));
    }

    #[test]
    fn skip_chars_counts_hex_escape_as_one_unit() {
        let mut r = ByteReader::new(b"\\'e9X");
        skip_chars(&mut r, 1).unwrap();
        assert_eq!(r.read_byte(), Some(b'X'));
    }
}
