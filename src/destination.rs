//! Destination dispatch: the tagged variant every group frame may own, and
//! the shared, parser-owned state destinations mutate (font/color tables,
//! document info, the live numbering and field accumulators, and the
//! caller's `Output` sink).
//!
//! A tagged enum rather than a tree of trait objects, per the "polymorphic
//! destinations" redesign note: the closed variant set is {Null, Root,
//! Output, PlainText, FontTable, ColorTable, TextSetter, TimeSetter,
//! Numbering, Field, FieldInstr, FieldResult}.

use crate::charset::DocCharset;
use crate::error::{RtfError, RtfResult};
use crate::field::FieldAccum;
use crate::info::{DateInfoField, DocumentInfo, TextInfoField, build_date_time};
use crate::numbering::Numbering;
use crate::output::{Context, Output};
use crate::properties::PropertyMap;
use crate::types::{Color, ColorTable, Font, FontFamily, FontTable};

/// Where a `TextSetter` destination's accumulated text is ultimately assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTarget {
    Info(TextInfoField),
    NumberingBefore,
    NumberingAfter,
}

/// Everything destinations read from or write into besides the property map
/// of the frame they are attached to.
pub struct SharedState<'o> {
    pub fonts: FontTable,
    pub colors: ColorTable,
    pub info: DocumentInfo,
    pub numbering: Option<Numbering>,
    pub field_stack: Vec<FieldAccum>,
    pub options: crate::parser::ParserOptions,
    pub output: &'o mut dyn Output,
    pub doc_charset: DocCharset,
    pub ansicpg: Option<i32>,
    pub deff: FontRefOrNone,
}

/// `\deff` may never be set; font resolution then falls back to the document
/// charset directly.
pub type FontRefOrNone = Option<crate::types::FontRef>;

impl<'o> SharedState<'o> {
    fn context<'s>(&'s self, props: &'s PropertyMap) -> Context<'s> {
        Context::new(props, &self.fonts, &self.colors, self.numbering.as_ref())
    }
}

/// The destination a group frame owns.
#[derive(Debug)]
pub enum Destination {
    Null,
    Root,
    Output,
    PlainText,
    FontTable { buffer: String },
    ColorTable,
    TextSetter { target: TextTarget, buffer: String },
    TimeSetter(DateInfoField),
    Numbering,
    Field,
    FieldInstr,
    FieldResult,
}

impl Destination {
    pub fn write(
        &mut self,
        text: &str,
        props: &PropertyMap,
        shared: &mut SharedState<'_>,
        offset: usize,
    ) -> RtfResult<()> {
        match self {
            Destination::Null => Ok(()),
            Destination::Root => {
                if text.chars().all(|c| c == '\0') {
                    Ok(())
                } else {
                    Err(RtfError::structural(offset, "root destination received non-NUL text"))
                }
            }
            Destination::Output => {
                let ctx = shared.context(props);
                shared.output.write(text, &ctx);
                Ok(())
            }
            Destination::PlainText => {
                let ctx = shared.context(props);
                shared.output.plain_text(text, &ctx);
                Ok(())
            }
            Destination::FontTable { buffer } => {
                for ch in text.chars() {
                    if ch == ';' {
                        register_font(buffer, props, &mut shared.fonts);
                        buffer.clear();
                    } else {
                        buffer.push(ch);
                    }
                }
                Ok(())
            }
            Destination::ColorTable => {
                for ch in text.chars() {
                    if ch == ';' {
                        let color = Color::new(
                            props.get_int("red", 0) as u8,
                            props.get_int("green", 0) as u8,
                            props.get_int("blue", 0) as u8,
                        );
                        shared.colors.add(color);
                    }
                }
                Ok(())
            }
            Destination::TextSetter { buffer, .. } => {
                buffer.push_str(text);
                Ok(())
            }
            Destination::FieldInstr => {
                if let Some(top) = shared.field_stack.last_mut() {
                    top.instruction.push_str(text);
                }
                Ok(())
            }
            Destination::FieldResult => {
                if let Some(top) = shared.field_stack.last_mut() {
                    top.result.push_str(text);
                }
                Ok(())
            }
            Destination::TimeSetter(_) | Destination::Numbering | Destination::Field => Err(
                RtfError::destination(offset, "destination does not accept text"),
            ),
        }
    }

    pub fn par(&mut self, props: &PropertyMap, shared: &mut SharedState<'_>, offset: usize) -> RtfResult<()> {
        match self {
            Destination::Null => Ok(()),
            Destination::Output | Destination::PlainText => {
                let ctx = shared.context(props);
                shared.output.par(&ctx);
                Ok(())
            }
            _ => Err(RtfError::destination(offset, "destination does not accept a paragraph break")),
        }
    }

    pub fn page_break(&mut self, props: &PropertyMap, shared: &mut SharedState<'_>, offset: usize) -> RtfResult<()> {
        match self {
            Destination::Null => Ok(()),
            Destination::Output | Destination::PlainText => {
                let ctx = shared.context(props);
                shared.output.page_break(&ctx);
                Ok(())
            }
            _ => Err(RtfError::destination(offset, "destination does not accept a page break")),
        }
    }

    /// Invoked exactly once, when the owning group pops. `props` is that
    /// group's own (about to be discarded) property map.
    pub fn close(self, props: &PropertyMap, shared: &mut SharedState<'_>, offset: usize) -> RtfResult<()> {
        match self {
            Destination::FontTable { mut buffer } => {
                if !buffer.trim().is_empty() {
                    register_font(&buffer, props, &mut shared.fonts);
                }
                buffer.clear();
                Ok(())
            }
            Destination::TextSetter { target, buffer } => {
                assign_text(target, buffer, props, shared);
                Ok(())
            }
            Destination::TimeSetter(field) => {
                let yr = props.get_int("yr", i32::MIN);
                let mo = props.get_int("mo", i32::MIN);
                let dy = props.get_int("dy", i32::MIN);
                if yr == i32::MIN || mo == i32::MIN || dy == i32::MIN {
                    return Err(RtfError::structural(offset, "date destination missing yr/mo/dy"));
                }
                let hr = props.get_int("hr", 0);
                let min = props.get_int("min", 0);
                let sec = props.get_int("sec", 0);
                match build_date_time(yr, mo, dy, hr, min, sec) {
                    Some(when) => {
                        field.assign(&mut shared.info, when);
                        Ok(())
                    }
                    None => Err(RtfError::structural(offset, "invalid date/time values")),
                }
            }
            Destination::Numbering => {
                if let Some(numbering) = shared.numbering.take() {
                    let ctx = Context::new(props, &shared.fonts, &shared.colors, Some(&numbering));
                    shared.output.numbering_on(&numbering, &ctx);
                    shared.numbering = Some(numbering);
                }
                Ok(())
            }
            Destination::Field => {
                let accum = shared
                    .field_stack
                    .pop()
                    .ok_or_else(|| RtfError::structural(offset, "field destination closed with no accumulator"))?;
                let field = accum.finish();
                if field.field_type == crate::field::FieldType::Hyperlink {
                    if let Some(url) = field.extract_url() {
                        let ctx = shared.context(props);
                        shared.output.hyperlink(field.display_text(), &url, &ctx);
                        return Ok(());
                    }
                }
                Err(RtfError::structural(offset, "unsupported or malformed field instruction"))
            }
            Destination::Null
            | Destination::Root
            | Destination::Output
            | Destination::PlainText
            | Destination::ColorTable
            | Destination::FieldInstr
            | Destination::FieldResult => Ok(()),
        }
    }
}

fn register_font(buffer: &str, props: &PropertyMap, fonts: &mut FontTable) {
    let index = props.get_int("f", 0);
    let family = props
        .get_str("family")
        .and_then(FontFamily::from_keyword)
        .unwrap_or_default();
    let charset = props.get("fcharset").and_then(|v| v.as_int());
    let name = buffer.trim().trim_end_matches(';').to_string();
    fonts.insert(index, Font::new(name.into(), family, charset));
}

fn assign_text(target: TextTarget, buffer: String, _props: &PropertyMap, shared: &mut SharedState<'_>) {
    match target {
        TextTarget::Info(field) => field.assign(&mut shared.info, buffer.into()),
        TextTarget::NumberingBefore => {
            if let Some(numbering) = shared.numbering.as_mut() {
                numbering.before = buffer;
            }
        }
        TextTarget::NumberingAfter => {
            if let Some(numbering) = shared.numbering.as_mut() {
                numbering.after = buffer;
            }
        }
    }
}
