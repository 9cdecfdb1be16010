//! Typed content tree produced by the composer and consumed by the renderer.
//!
//! A document is an ordered `Vec<ContentNode>`; order is vertical flow.

/// RGB colour with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb(pub f32, pub f32, pub f32);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0.0, 0.0, 0.0);
    pub const GREY: Rgb = Rgb(0.5, 0.5, 0.5);
    pub const ORANGE: Rgb = Rgb(1.0, 0.647, 0.0);
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Rgb>,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
            color: None,
        }
    }
}

/// Inline-styled text. A `'\n'` inside a span forces a line break.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichText {
    pub spans: Vec<Span>,
}

impl RichText {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span::plain(text));
        self
    }

    pub fn bold(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            bold: true,
            ..Span::plain(text)
        });
        self
    }

    pub fn bold_italic(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            bold: true,
            italic: true,
            ..Span::plain(text)
        });
        self
    }

    pub fn colored(mut self, text: impl Into<String>, color: Rgb) -> Self {
        self.spans.push(Span {
            color: Some(color),
            ..Span::plain(text)
        });
        self
    }

    pub fn line_break(self) -> Self {
        self.text("\n")
    }

    /// Concatenated text without styling.
    pub fn to_plain_string(&self) -> String {
        self.spans.iter().map(|span| span.text.as_str()).collect()
    }
}

impl From<&str> for RichText {
    fn from(text: &str) -> Self {
        RichText::plain(text)
    }
}

impl From<String> for RichText {
    fn from(text: String) -> Self {
        RichText::plain(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Centred document title.
    Title,
    /// Left-aligned letterhead line.
    Letterhead,
    /// Section header inside the body.
    Section,
    /// Secondary letterhead line.
    Subheading,
}

/// Named paragraph styles; the renderer's style sheet maps them to fonts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphStyle {
    Body,
    /// Larger bold line used for the client name.
    Emphasis,
    /// 12pt body used for closings and the place/date line.
    Closing,
    /// Small grey postscript.
    Note,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerStyle {
    Dash,
    Bullet,
    Check,
}

/// Logical image slots; the host maps them to files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetSlot {
    InstitutionLogo,
    AuthorizedSignature,
}

/// Labelled signature line with an optional overlay image centred on it.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureBlock {
    pub label: String,
    /// Width from the start of the label to the end of the line, in points.
    pub line_width: f32,
    pub image: Option<AssetSlot>,
    pub image_width: f32,
    pub image_height: f32,
}

impl SignatureBlock {
    pub fn blank(label: impl Into<String>, line_width: f32) -> Self {
        Self {
            label: label.into(),
            line_width,
            image: None,
            image_width: 0.0,
            image_height: 0.0,
        }
    }

    pub fn signed(
        label: impl Into<String>,
        line_width: f32,
        slot: AssetSlot,
        image_width: f32,
        image_height: f32,
    ) -> Self {
        Self {
            label: label.into(),
            line_width,
            image: Some(slot),
            image_width,
            image_height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Anchor {
    /// Top-right corner, measured inward from the page edges; overlays the frame.
    TopRight { inset_x: f32, inset_y: f32 },
    /// Top-left corner of the printable frame; reserves its height on every page.
    FrameTopLeft,
    /// Inset from all four page edges.
    PageInset(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DecorationKind {
    Logo { width: f32, height: f32 },
    Border { line_width: f32, color: Rgb },
}

/// Element redrawn identically on every page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageDecoration {
    pub kind: DecorationKind,
    pub position: Anchor,
}

impl PageDecoration {
    /// Vertical space the decoration takes away from the top of the frame.
    pub fn reserved_height(&self) -> f32 {
        match (self.kind, self.position) {
            (DecorationKind::Logo { height, .. }, Anchor::FrameTopLeft) => height + 8.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentNode {
    Heading {
        text: RichText,
        level: HeadingLevel,
    },
    Paragraph {
        text: RichText,
        style: ParagraphStyle,
    },
    BulletList {
        items: Vec<RichText>,
        marker: MarkerStyle,
    },
    NumberedList {
        items: Vec<RichText>,
    },
    Spacer {
        height: f32,
    },
    SignatureBlock(SignatureBlock),
    PageDecoration(PageDecoration),
}

impl ContentNode {
    pub fn heading(text: impl Into<RichText>, level: HeadingLevel) -> Self {
        ContentNode::Heading {
            text: text.into(),
            level,
        }
    }

    pub fn paragraph(text: impl Into<RichText>) -> Self {
        ContentNode::Paragraph {
            text: text.into(),
            style: ParagraphStyle::Body,
        }
    }

    pub fn styled(text: impl Into<RichText>, style: ParagraphStyle) -> Self {
        ContentNode::Paragraph {
            text: text.into(),
            style,
        }
    }

    pub fn spacer(height: f32) -> Self {
        ContentNode::Spacer { height }
    }

    pub fn bullets<I, T>(items: I, marker: MarkerStyle) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RichText>,
    {
        ContentNode::BulletList {
            items: items.into_iter().map(Into::into).collect(),
            marker,
        }
    }

    pub fn numbered<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<RichText>,
    {
        ContentNode::NumberedList {
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}
