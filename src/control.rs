//! Control-word dispatch (§4.6): named instructions first, then the
//! rule-based fallback chain for toggles and the `q*`/`ul*`/`pn*` prefix
//! families.

use crate::charset::DocCharset;
use crate::destination::{Destination, TextTarget};
use crate::error::RtfResult;
use crate::field::FieldAccum;
use crate::info::{DateInfoField, TextInfoField};
use crate::numbering::{NumberingStyle, PN_LVL_BODY, PN_LVL_BULLET};
use crate::parser::Parser;
use crate::properties::{CHARACTER_RESET_KEYS, PARAGRAPH_RESET_KEYS, PropValue, TOGGLE_KEYS};
use crate::types::{Alignment, FontFamily};

/// Pre-dispatch escape words (§4.6): produce a direct literal write, ahead of
/// (and instead of) reading any integer parameter.
pub static ESCAPE_WORDS: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "line" => "\n",
    "tab" => "\t",
    "emdash" => "\u{2014}",
    "endash" => "\u{2013}",
    "lquote" => "\u{2018}",
    "rquote" => "\u{2019}",
    "ldblquote" => "\u{201C}",
    "rdblquote" => "\u{201D}",
    "bullet" => "\u{2022}",
};

static UNSUPPORTED_DESTINATIONS: phf::Set<&'static str> = phf::phf_set! {
    "filetbl", "stylesheet", "listtables", "revtbl",
};

static IGNORED_WORDS: phf::Set<&'static str> = phf::phf_set! {
    "nouicompat", "viewkind",
};

/// Dispatch one control word with its optional parameter against the
/// precedence chain in §4.6. `offset` is the byte offset of the control
/// word, for error reporting.
pub fn dispatch(parser: &mut Parser<'_, '_>, offset: usize, word: &str, param: Option<i32>) -> RtfResult<()> {
    if named_instruction(parser, offset, word, param)? {
        return Ok(());
    }

    if TOGGLE_KEYS.contains(&word) {
        parser.stack.current_props_mut().set_toggle(word, param);
        return Ok(());
    }

    if let Some(suffix) = word.strip_prefix('q')
        && !suffix.is_empty()
        && Alignment::from_suffix(suffix).is_some()
    {
        parser.stack.current_props_mut().set_str("q", suffix.to_string());
        return Ok(());
    }

    if let Some(suffix) = word.strip_prefix("ul")
        && word != "ulnone"
    {
        if suffix.is_empty() {
            parser.stack.current_props_mut().set("ul", PropValue::Bool(true));
        } else {
            parser.stack.current_props_mut().set_str("ul", suffix.to_string());
        }
        return Ok(());
    }

    if let Some(style) = NumberingStyle::from_keyword(word) {
        parser.shared.numbering.get_or_insert_with(Default::default).style = Some(style);
        return Ok(());
    }

    if word.starts_with("pn") {
        if let Some(numbering) = parser.shared.numbering.as_mut() {
            let value = param.map(PropValue::Int).unwrap_or(PropValue::Bool(true));
            numbering.aux.set(word, value);
        }
        return Ok(());
    }

    if UNSUPPORTED_DESTINATIONS.contains(word) {
        parser.stack.set_destination(Destination::Null);
        return Ok(());
    }

    if let Some(charset) = DocCharset::from_keyword(word) {
        parser.shared.doc_charset = charset;
        return Ok(());
    }

    if let Some(suffix) = word.strip_prefix('f')
        && FontFamily::from_keyword(suffix).is_some()
    {
        parser.stack.current_props_mut().set_str("family", suffix.to_string());
        return Ok(());
    }

    if let Some(field) = TextInfoField::from_keyword(word) {
        parser.stack.set_destination(Destination::TextSetter {
            target: TextTarget::Info(field),
            buffer: String::new(),
        });
        return Ok(());
    }

    if let Some(field) = DateInfoField::from_keyword(word) {
        parser.stack.set_destination(Destination::TimeSetter(field));
        return Ok(());
    }

    if IGNORED_WORDS.contains(word) {
        return Ok(());
    }

    let value = param.map(PropValue::Int).unwrap_or(PropValue::Bool(true));
    parser.stack.current_props_mut().set(word, value);
    Ok(())
}

/// Rule 1: the fixed table of named instructions. Returns `true` if `word`
/// was recognized and handled. Also the sole lookup consulted for a `\*`
/// optional destination's introducing word (§4.9).
pub(crate) fn named_instruction(
    parser: &mut Parser<'_, '_>,
    offset: usize,
    word: &str,
    param: Option<i32>,
) -> RtfResult<bool> {
    match word {
        "rtf" => {
            parser.stack.set_destination(Destination::Output);
            parser.stack.current_props_mut().set_int("rtf", param.unwrap_or(1));
        }
        "ansicpg" => parser.shared.ansicpg = param,
        "deff" => parser.shared.deff = param,
        "fonttbl" => parser.stack.set_destination(Destination::FontTable { buffer: String::new() }),
        "colortbl" => parser.stack.set_destination(Destination::ColorTable),
        "par" => {
            let (dest, props) = parser.stack.effective_mut();
            dest.par(props, &mut parser.shared, offset)?;
        }
        "page" => {
            let (dest, props) = parser.stack.effective_mut();
            dest.page_break(props, &mut parser.shared, offset)?;
        }
        "ql" => parser.stack.current_props_mut().remove("q"),
        "ulnone" => parser.stack.current_props_mut().remove("ul"),
        "nosupersub" => {
            let props = parser.stack.current_props_mut();
            props.remove("super");
            props.remove("sub");
        }
        "nowidctlpar" => parser.stack.current_props_mut().remove("widctlpar"),
        "pard" => {
            if let Some(numbering) = parser.shared.numbering.take() {
                let ctx = crate::output::Context::new(
                    parser.stack.current_props(),
                    &parser.shared.fonts,
                    &parser.shared.colors,
                    Some(&numbering),
                );
                parser.shared.output.numbering_off(&numbering, &ctx);
            }
            parser.stack.current_props_mut().clear_keys(PARAGRAPH_RESET_KEYS);
        }
        "plain" => {
            let deff = parser.shared.deff.unwrap_or(0);
            let props = parser.stack.current_props_mut();
            props.clear_keys(CHARACTER_RESET_KEYS);
            props.set_int("f", deff);
        }
        "pntext" => {
            if parser.shared.options.plain_text {
                parser.stack.set_destination(Destination::PlainText);
            } else {
                parser.stack.set_destination(Destination::Null);
            }
        }
        "info" => {}
        "pn" => {
            parser.shared.numbering = Some(Default::default());
            parser.stack.set_destination(Destination::Numbering);
        }
        "pnlvl" => set_level(parser, param.unwrap_or(0)),
        "pnlvlbody" => set_level(parser, PN_LVL_BODY),
        "pnlvlblt" => set_level(parser, PN_LVL_BULLET),
        "pnf" => {
            if let Some(n) = parser.shared.numbering.as_mut() {
                n.font_index = param;
            }
        }
        "pnstart" => {
            if let Some(n) = parser.shared.numbering.as_mut() {
                n.start = param.unwrap_or(1);
            }
        }
        "pnindent" => {
            if let Some(n) = parser.shared.numbering.as_mut() {
                n.indent = param.unwrap_or(0);
            }
        }
        "pntxtb" => parser.stack.set_destination(Destination::TextSetter {
            target: TextTarget::NumberingBefore,
            buffer: String::new(),
        }),
        "pntxta" => parser.stack.set_destination(Destination::TextSetter {
            target: TextTarget::NumberingAfter,
            buffer: String::new(),
        }),
        "bin" => {
            let n = param.unwrap_or(0).max(0) as usize;
            parser.reader.read_n(n);
        }
        "field" => {
            parser.shared.field_stack.push(FieldAccum::new());
            parser.stack.set_destination(Destination::Field);
        }
        "fldinst" => parser.stack.set_destination(Destination::FieldInstr),
        "fldrslt" => parser.stack.set_destination(Destination::FieldResult),
        "result" => parser.stack.set_destination(Destination::Null),
        _ => return Ok(false),
    }
    Ok(true)
}

fn set_level(parser: &mut Parser<'_, '_>, level: i32) {
    if let Some(n) = parser.shared.numbering.as_mut() {
        n.level = level;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_words_cover_the_fixed_set() {
        assert_eq!(ESCAPE_WORDS.get("bullet"), Some(&"\u{2022}"));
        assert_eq!(ESCAPE_WORDS.get("line"), Some(&"\n"));
        assert_eq!(ESCAPE_WORDS.get("nope"), None);
    }
}
