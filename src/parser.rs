//! The parser driver (§4.8–§4.9): the main loop over the byte stream, and
//! `read_control`, which reads one control token and routes it to the
//! Unicode/hex-escape handling or the control-word dispatch table.

use crate::charset::{doc_charset_encoding, fcharset_encoding};
use crate::control;
use crate::destination::{Destination, SharedState};
use crate::error::{RtfError, RtfResult};
use crate::info::DocumentInfo;
use crate::lexer::{consume, end_control, read_hex_byte, read_number, read_word, skip_chars};
use crate::output::Output;
use crate::reader::{ByteReader, is_endline};
use crate::types::{ColorTable, FontTable};
use smallvec::SmallVec;

/// Configuration accepted by [`parse`].
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// When true, `\pntext` content is delivered to `Output` as normal
    /// `write` text; when false (the default), it is discarded.
    pub plain_text: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self { plain_text: false }
    }
}

impl ParserOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plain_text(mut self, plain_text: bool) -> Self {
        self.plain_text = plain_text;
        self
    }
}

/// Document-level tables left populated after a successful parse.
#[derive(Debug, Clone, Default)]
pub struct ParsedMeta {
    pub fonts: FontTable,
    pub colors: ColorTable,
    pub info: DocumentInfo,
}

pub(crate) struct Parser<'a, 'o> {
    pub(crate) reader: ByteReader<'a>,
    pub(crate) stack: crate::group::GroupStack,
    pub(crate) shared: SharedState<'o>,
}

/// Parse `input` as RTF, delivering events to `output` as they occur.
pub fn parse(input: &[u8], output: &mut dyn Output, options: ParserOptions) -> RtfResult<ParsedMeta> {
    let mut parser = Parser {
        reader: ByteReader::new(input),
        stack: crate::group::GroupStack::new(Destination::Root),
        shared: SharedState {
            fonts: FontTable::new(),
            colors: ColorTable::new(),
            info: DocumentInfo::new(),
            numbering: None,
            field_stack: Vec::new(),
            options,
            output,
            doc_charset: Default::default(),
            ansicpg: None,
            deff: None,
        },
    };

    run(&mut parser)?;

    Ok(ParsedMeta {
        fonts: parser.shared.fonts,
        colors: parser.shared.colors,
        info: parser.shared.info,
    })
}

fn run(parser: &mut Parser<'_, '_>) -> RtfResult<()> {
    loop {
        let run_offset = parser.reader.offset();
        let mut text: SmallVec<[u8; 32]> = SmallVec::new();
        loop {
            match parser.reader.peek() {
                Some(b'{') | Some(b'}') | Some(b'\\') | None => break,
                Some(b) => {
                    parser.reader.read_byte();
                    if !is_endline(b) {
                        text.push(b);
                    }
                }
            }
        }
        if !text.is_empty() {
            let s = String::from_utf8_lossy(&text).into_owned();
            dispatch_write(parser, &s, run_offset)?;
        }

        let offset = parser.reader.offset();
        match parser.reader.read_byte() {
            Some(b'\\') => read_control(parser, offset)?,
            Some(b'{') => parser.stack.push(),
            Some(b'}') => {
                let frame = parser
                    .stack
                    .pop()
                    .ok_or_else(|| RtfError::structural(offset, "unmatched closing brace"))?;
                if let Some(dest) = frame.destination {
                    dest.close(&frame.props, &mut parser.shared, offset)?;
                }
            }
            None => {
                if parser.stack.depth() > 1 {
                    return Err(RtfError::structural(offset, "unexpected EOF inside group"));
                }
                parser.shared.output.end_doc();
                return Ok(());
            }
            Some(_) => unreachable!("only {{, }}, \\ or EOF stop a text run"),
        }
    }
}

fn dispatch_write(parser: &mut Parser<'_, '_>, text: &str, offset: usize) -> RtfResult<()> {
    let (dest, props) = parser.stack.effective_mut();
    dest.write(text, props, &mut parser.shared, offset)
}

fn dispatch_char(parser: &mut Parser<'_, '_>, ch: char, offset: usize) -> RtfResult<()> {
    let mut buf = [0u8; 4];
    let s = ch.encode_utf8(&mut buf);
    dispatch_write(parser, s, offset)
}

fn dispatch_par(parser: &mut Parser<'_, '_>, offset: usize) -> RtfResult<()> {
    let (dest, props) = parser.stack.effective_mut();
    dest.par(props, &mut parser.shared, offset)
}

/// §4.9: read one control token (the `\` has already been consumed).
fn read_control(parser: &mut Parser<'_, '_>, offset: usize) -> RtfResult<()> {
    let word = read_word(&mut parser.reader);

    if !word.is_empty() {
        if let Some(&literal) = control::ESCAPE_WORDS.get(word.as_str()) {
            end_control(&mut parser.reader);
            return dispatch_write(parser, literal, offset);
        }

        let param = read_number_opt(&mut parser.reader);
        end_control(&mut parser.reader);

        if word == "u" {
            return handle_unicode(parser, offset, param.unwrap_or(0));
        }

        return control::dispatch(parser, offset, &word, param);
    }

    match parser.reader.read_byte() {
        Some(b'\'') => {
            let byte = read_hex_byte(&mut parser.reader)?;
            let encoding = resolve_hex_encoding(parser, offset)?;
            let (decoded, _, had_errors) = encoding.decode(&[byte]);
            if had_errors {
                return Err(RtfError::encoding(
                    offset,
                    format!("byte 0x{byte:02x} is not decodable under {}", encoding.name()),
                ));
            }
            dispatch_write(parser, &decoded, offset)
        }
        Some(b @ (b'\\' | b'{' | b'}')) => dispatch_char(parser, b as char, offset),
        Some(b'~') => dispatch_char(parser, '\u{00A0}', offset),
        Some(b'-') => dispatch_char(parser, '\u{00AD}', offset),
        Some(b'_') => dispatch_char(parser, '\u{2011}', offset),
        Some(b'\r') | Some(b'\n') => dispatch_par(parser, offset),
        Some(b'*') => handle_optional_destination(parser, offset),
        Some(_) => Err(RtfError::lex(offset, "unrecognized byte after backslash")),
        None => Err(RtfError::lex(offset, "unexpected EOF after backslash")),
    }
}

fn handle_optional_destination(parser: &mut Parser<'_, '_>, offset: usize) -> RtfResult<()> {
    loop {
        match parser.reader.peek() {
            Some(b) if is_endline(b) => {
                parser.reader.read_byte();
            }
            _ => break,
        }
    }
    consume(&mut parser.reader, b"\\")?;
    let word = read_word(&mut parser.reader);
    let param = read_number_opt(&mut parser.reader);
    end_control(&mut parser.reader);

    if word.is_empty() || !control::named_instruction(parser, offset, &word, param)? {
        parser.stack.set_destination(Destination::Null);
    }
    Ok(())
}

/// §4.7: `\uN` and the surrogate-pair / replacement-skip rules.
fn handle_unicode(parser: &mut Parser<'_, '_>, offset: usize, n: i32) -> RtfResult<()> {
    let uc = parser.stack.current_props().get_int("uc", 1);
    let u = to_utf16_unit(n);

    if (0xD800..=0xDBFF).contains(&u) {
        skip_chars(&mut parser.reader, uc)?;
        consume(&mut parser.reader, b"\\u")?;
        let m = read_number(&mut parser.reader, 0);
        end_control(&mut parser.reader);
        let low = to_utf16_unit(m);
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(RtfError::surrogate(offset, "high surrogate not followed by a low surrogate"));
        }
        let code = 0x10000 + ((u - 0xD800) << 10) + (low - 0xDC00);
        let ch = char::from_u32(code)
            .ok_or_else(|| RtfError::surrogate(offset, "surrogate pair does not form a valid code point"))?;
        dispatch_char(parser, ch, offset)?;
        skip_chars(&mut parser.reader, uc)?;
    } else {
        let ch = char::from_u32(u).ok_or_else(|| RtfError::surrogate(offset, "invalid unicode code point"))?;
        dispatch_char(parser, ch, offset)?;
        skip_chars(&mut parser.reader, uc)?;
    }
    Ok(())
}

fn to_utf16_unit(n: i32) -> u32 {
    if n >= 0 { n as u32 } else { (n + 0x10000) as u32 }
}

fn resolve_hex_encoding(parser: &Parser<'_, '_>, offset: usize) -> RtfResult<&'static encoding_rs::Encoding> {
    let doc_default = doc_charset_encoding(parser.shared.doc_charset, parser.shared.ansicpg);
    let font_index = parser
        .stack
        .current_props()
        .get_int("f", parser.shared.deff.unwrap_or(-1));
    if font_index >= 0
        && let Some(font) = parser.shared.fonts.get(font_index)
        && let Some(fcharset) = font.charset
    {
        return fcharset_encoding(fcharset, offset, doc_default);
    }
    Ok(doc_default)
}

/// Like `lexer::read_number`, but distinguishes "no parameter present" from
/// a parsed value, as the toggle rule (§4.6 rule 2) and several named
/// instructions need to.
fn read_number_opt(r: &mut ByteReader<'_>) -> Option<i32> {
    let before = r.offset();
    let value = read_number(r, 0);
    if r.offset() == before { None } else { Some(value) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Context;

    struct Recorder {
        writes: Vec<String>,
        pars: usize,
        page_breaks: usize,
        hyperlinks: Vec<(String, String)>,
        ended: bool,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                writes: Vec::new(),
                pars: 0,
                page_breaks: 0,
                hyperlinks: Vec::new(),
                ended: false,
            }
        }
    }

    impl Output for Recorder {
        fn write(&mut self, text: &str, _ctx: &Context<'_>) {
            self.writes.push(text.to_string());
        }
        fn par(&mut self, _ctx: &Context<'_>) {
            self.pars += 1;
        }
        fn page_break(&mut self, _ctx: &Context<'_>) {
            self.page_breaks += 1;
        }
        fn plain_text(&mut self, text: &str, _ctx: &Context<'_>) {
            self.writes.push(text.to_string());
        }
        fn hyperlink(&mut self, text: &str, url: &str, _ctx: &Context<'_>) {
            self.hyperlinks.push((text.to_string(), url.to_string()));
        }
        fn numbering_on(&mut self, _numbering: &crate::numbering::Numbering, _ctx: &Context<'_>) {}
        fn numbering_off(&mut self, _numbering: &crate::numbering::Numbering, _ctx: &Context<'_>) {}
        fn end_doc(&mut self) {
            self.ended = true;
        }
    }

    #[test]
    fn minimal_document() {
        let mut rec = Recorder::new();
        parse(b"{\\rtf1\\ansi\\deff0 Hello.}", &mut rec, ParserOptions::new()).unwrap();
        assert_eq!(rec.writes, vec!["Hello."]);
        assert!(rec.ended);
    }

    #[test]
    fn paragraph_and_page_break() {
        let mut rec = Recorder::new();
        parse(b"{\\rtf1\\ansi Hello\\par World\\page !}", &mut rec, ParserOptions::new()).unwrap();
        assert_eq!(rec.writes, vec!["Hello", "World", "!"]);
        assert_eq!(rec.pars, 1);
        assert_eq!(rec.page_breaks, 1);
    }

    #[test]
    fn unicode_with_skip() {
        let mut rec = Recorder::new();
        parse(b"{\\rtf1\\ansi\\uc1 \\u8212?X}", &mut rec, ParserOptions::new()).unwrap();
        assert_eq!(rec.writes.join(""), "\u{2014}X");
    }

    #[test]
    fn surrogate_pair_emoji() {
        let mut rec = Recorder::new();
        parse(b"{\\rtf1\\ansi\\uc1 \\u-10179?\\u-8704?Z}", &mut rec, ParserOptions::new()).unwrap();
        assert_eq!(rec.writes.join(""), "\u{1F600}Z");
    }

    #[test]
    fn font_table_and_hex_escape() {
        let mut rec = Recorder::new();
        let meta = parse(
            b"{\\rtf1\\ansi{\\fonttbl{\\f0\\froman\\fcharset0 Times;}}\\f0 \\'e9}",
            &mut rec,
            ParserOptions::new(),
        )
        .unwrap();
        let font = meta.fonts.get(0).unwrap();
        assert_eq!(font.name, "Times");
        assert_eq!(font.charset, Some(0));
        assert_eq!(rec.writes.join(""), "\u{e9}");
    }

    #[test]
    fn hyperlink_field() {
        let mut rec = Recorder::new();
        parse(
            b"{\\rtf1\\ansi{\\field{\\*\\fldinst HYPERLINK \"https://x\"}{\\fldrslt click}}}",
            &mut rec,
            ParserOptions::new(),
        )
        .unwrap();
        assert_eq!(rec.hyperlinks, vec![("click".to_string(), "https://x".to_string())]);
    }

    #[test]
    fn unmatched_closing_brace_is_fatal() {
        let mut rec = Recorder::new();
        let err = parse(b"{\\rtf1 hi}}", &mut rec, ParserOptions::new()).unwrap_err();
        assert!(matches!(err, RtfError::Structural { .. }));
    }

    #[test]
    fn pard_is_idempotent() {
        let mut rec = Recorder::new();
        parse(b"{\\rtf1\\ansi\\pard\\pard Hi}", &mut rec, ParserOptions::new()).unwrap();
        assert_eq!(rec.writes, vec!["Hi"]);
    }
}
