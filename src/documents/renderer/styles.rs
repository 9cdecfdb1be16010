//! Fonts, sizes and spacing for every heading level and paragraph style.

use crate::documents::geometry::CM;
use crate::documents::model::{HeadingLevel, ParagraphStyle, Rgb};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub leading: f32,
    /// Applied on top of the span's own weight.
    pub bold: bool,
    pub color: Rgb,
    pub alignment: Alignment,
    pub space_after: f32,
}

impl TextStyle {
    const fn body(font_size: f32, leading: f32) -> Self {
        Self {
            font_size,
            leading,
            bold: false,
            color: Rgb::BLACK,
            alignment: Alignment::Left,
            space_after: 0.0,
        }
    }

    const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    const fn centered(mut self) -> Self {
        self.alignment = Alignment::Center;
        self
    }

    const fn space_after(mut self, space: f32) -> Self {
        self.space_after = space;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StyleSheet {
    pub body: TextStyle,
    pub emphasis: TextStyle,
    pub closing: TextStyle,
    pub note: TextStyle,
    pub title: TextStyle,
    pub letterhead: TextStyle,
    pub section: TextStyle,
    pub subheading: TextStyle,
    /// List items: text style, left indent and gap after each item.
    pub list_item: TextStyle,
    pub list_indent: f32,
    pub marker_gap: f32,
    pub signature_font_size: f32,
}

impl Default for StyleSheet {
    fn default() -> Self {
        Self {
            body: TextStyle::body(11.0, 15.0),
            emphasis: TextStyle::body(13.0, 16.0).bold().space_after(10.0),
            closing: TextStyle::body(12.0, 15.0),
            note: TextStyle::body(11.0, 14.0),
            title: TextStyle::body(15.0, 18.0).bold().centered().space_after(6.0),
            letterhead: TextStyle::body(18.0, 22.0).bold().space_after(8.0),
            section: TextStyle::body(15.0, 18.0).bold().space_after(12.0),
            subheading: TextStyle::body(13.0, 16.0).bold().space_after(6.0),
            list_item: TextStyle::body(11.0, 15.0).space_after(2.0),
            list_indent: 1.5 * CM,
            marker_gap: 14.0,
            signature_font_size: 11.0,
        }
    }
}

impl StyleSheet {
    pub fn heading(&self, level: HeadingLevel) -> &TextStyle {
        match level {
            HeadingLevel::Title => &self.title,
            HeadingLevel::Letterhead => &self.letterhead,
            HeadingLevel::Section => &self.section,
            HeadingLevel::Subheading => &self.subheading,
        }
    }

    pub fn paragraph(&self, style: ParagraphStyle) -> &TextStyle {
        match style {
            ParagraphStyle::Body => &self.body,
            ParagraphStyle::Emphasis => &self.emphasis,
            ParagraphStyle::Closing => &self.closing,
            ParagraphStyle::Note => &self.note,
        }
    }
}
