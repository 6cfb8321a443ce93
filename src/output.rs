//! The user-facing `Output` sink and the read-only `Context` snapshot handed
//! to each of its events.
//!
//! `Output` is a plain, object-safe trait (`&mut dyn Output`) rather than a
//! generic parameter: this keeps `Parser` non-generic, matching how this
//! crate's destination dispatch is a closed tagged enum rather than a tree of
//! trait objects (§9's "polymorphic destinations" note).

use crate::numbering::Numbering;
use crate::properties::PropertyMap;
use crate::types::{Alignment, Color, ColorTable, Font, FontTable};

/// A read-only snapshot of the current property state, valid for the
/// duration of a single `Output` call.
pub struct Context<'p> {
    props: &'p PropertyMap,
    fonts: &'p FontTable,
    colors: &'p ColorTable,
    numbering: Option<&'p Numbering>,
}

impl<'p> Context<'p> {
    pub(crate) fn new(
        props: &'p PropertyMap,
        fonts: &'p FontTable,
        colors: &'p ColorTable,
        numbering: Option<&'p Numbering>,
    ) -> Self {
        Self {
            props,
            fonts,
            colors,
            numbering,
        }
    }

    /// The current font, if `f` names a registered font.
    pub fn font(&self) -> Option<&'p Font> {
        let index = self.props.get_int("f", -1);
        if index < 0 {
            None
        } else {
            self.fonts.get(index)
        }
    }

    pub fn foreground(&self) -> Color {
        self.colors.get(self.props.get_int("cf", 0))
    }

    pub fn background(&self) -> Color {
        self.colors.get(self.props.get_int("cb", 0))
    }

    pub fn bold(&self) -> bool {
        self.props.get_bool("b")
    }

    pub fn italic(&self) -> bool {
        self.props.get_bool("i")
    }

    pub fn underline(&self) -> bool {
        self.props.contains("ul")
    }

    pub fn alignment(&self) -> Alignment {
        self.props
            .get_str("q")
            .and_then(Alignment::from_suffix)
            .unwrap_or_default()
    }

    /// Font size in half-points, defaulting to 24 (12pt).
    pub fn font_size(&self) -> i32 {
        self.props.get_int("fs", 24)
    }

    pub fn numbering(&self) -> Option<&'p Numbering> {
        self.numbering
    }
}

/// The caller-supplied event sink. All events are delivered in source order.
pub trait Output {
    fn write(&mut self, text: &str, ctx: &Context<'_>);
    fn par(&mut self, ctx: &Context<'_>);
    fn page_break(&mut self, ctx: &Context<'_>);
    fn plain_text(&mut self, text: &str, ctx: &Context<'_>);
    fn hyperlink(&mut self, text: &str, url: &str, ctx: &Context<'_>);
    fn numbering_on(&mut self, numbering: &Numbering, ctx: &Context<'_>);
    fn numbering_off(&mut self, numbering: &Numbering, ctx: &Context<'_>);
    fn end_doc(&mut self);
}
