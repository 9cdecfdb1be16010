//! Layout pass: wraps text, paginates the flow and positions decorations.
//!
//! The result is a plan of absolute drawing operations per page, in PDF
//! user space (origin bottom-left, points). Decorations come first on every
//! page so body content paints over them.

use std::collections::BTreeSet;
use std::mem;

use crate::documents::geometry::{CM, FRAME_WIDTH, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};
use crate::documents::model::{
    Anchor, AssetSlot, ContentNode, DecorationKind, MarkerStyle, PageDecoration, RichText, Rgb,
    SignatureBlock,
};

use super::fonts::{Font, CHECK_MARK};
use super::styles::{Alignment, StyleSheet, TextStyle};
use super::RenderError;

const EPSILON: f32 = 0.01;
/// Gap between a signature label and the start of its line.
const LABEL_GAP: f32 = 6.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Rgb,
        text: String,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgb,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        line_width: f32,
        color: Rgb,
    },
    Image {
        slot: AssetSlot,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagePlan {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    pub pages: Vec<PagePlan>,
}

impl LayoutPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Fonts referenced anywhere in the plan.
    pub fn fonts(&self) -> BTreeSet<Font> {
        self.ops()
            .filter_map(|op| match op {
                DrawOp::Text { font, .. } => Some(*font),
                _ => None,
            })
            .collect()
    }

    pub fn ops(&self) -> impl Iterator<Item = &DrawOp> {
        self.pages.iter().flat_map(|page| page.ops.iter())
    }
}

/// Decorations declared inline in the node list plus the extra ones, in order.
pub fn collect_decorations(
    nodes: &[ContentNode],
    extra: &[PageDecoration],
) -> Vec<PageDecoration> {
    nodes
        .iter()
        .filter_map(|node| match node {
            ContentNode::PageDecoration(decoration) => Some(*decoration),
            _ => None,
        })
        .chain(extra.iter().copied())
        .collect()
}

/// Lay out `nodes` on A4 pages. `available` lists the asset slots whose
/// image could be loaded; the rest are skipped without moving anything.
pub fn layout(
    nodes: &[ContentNode],
    extra_decorations: &[PageDecoration],
    styles: &StyleSheet,
    available: &BTreeSet<AssetSlot>,
) -> Result<LayoutPlan, RenderError> {
    let decorations = collect_decorations(nodes, extra_decorations);
    let reserved = decorations
        .iter()
        .map(PageDecoration::reserved_height)
        .fold(0.0_f32, f32::max);

    let mut flow = Flow::new(PAGE_HEIGHT - MARGIN - reserved, MARGIN);
    let engine = Engine { styles, available };

    for node in nodes {
        match node {
            ContentNode::Heading { text, level } => {
                engine.heading(&mut flow, text, styles.heading(*level))?
            }
            ContentNode::Paragraph { text, style } => {
                engine.paragraph(&mut flow, text, styles.paragraph(*style))
            }
            ContentNode::BulletList { items, marker } => {
                for item in items {
                    engine.list_item(&mut flow, Marker::from(*marker), item);
                }
            }
            ContentNode::NumberedList { items } => {
                for (index, item) in items.iter().enumerate() {
                    engine.list_item(&mut flow, Marker::Number(index + 1), item);
                }
            }
            ContentNode::Spacer { height } => flow.spacer(*height),
            ContentNode::SignatureBlock(block) => engine.signature(&mut flow, block)?,
            ContentNode::PageDecoration(_) => {}
        }
    }

    let decoration_ops: Vec<DrawOp> = decorations
        .iter()
        .filter_map(|decoration| decoration_op(decoration, available))
        .collect();

    let pages = flow
        .finish()
        .into_iter()
        .map(|ops| PagePlan {
            ops: decoration_ops.iter().cloned().chain(ops).collect(),
        })
        .collect();

    Ok(LayoutPlan { pages })
}

fn decoration_op(decoration: &PageDecoration, available: &BTreeSet<AssetSlot>) -> Option<DrawOp> {
    match decoration.kind {
        DecorationKind::Logo { width, height } => {
            if !available.contains(&AssetSlot::InstitutionLogo) {
                return None;
            }
            let (x, y) = match decoration.position {
                Anchor::TopRight { inset_x, inset_y } => {
                    (PAGE_WIDTH - inset_x - width, PAGE_HEIGHT - inset_y - height)
                }
                Anchor::FrameTopLeft => (MARGIN, PAGE_HEIGHT - MARGIN - height),
                Anchor::PageInset(inset) => (inset, PAGE_HEIGHT - inset - height),
            };
            Some(DrawOp::Image {
                slot: AssetSlot::InstitutionLogo,
                x,
                y,
                width,
                height,
            })
        }
        DecorationKind::Border { line_width, color } => {
            let inset = match decoration.position {
                Anchor::PageInset(inset) => inset,
                _ => MARGIN,
            };
            Some(DrawOp::Rect {
                x: inset,
                y: inset,
                width: PAGE_WIDTH - 2.0 * inset,
                height: PAGE_HEIGHT - 2.0 * inset,
                line_width,
                color,
            })
        }
    }
}

/// Vertical cursor over the frame of the current page.
struct Flow {
    pages: Vec<Vec<DrawOp>>,
    ops: Vec<DrawOp>,
    top: f32,
    bottom: f32,
    cursor: f32,
    /// Nothing has been drawn on the current page yet.
    fresh: bool,
}

impl Flow {
    fn new(top: f32, bottom: f32) -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            top,
            bottom,
            cursor: top,
            fresh: true,
        }
    }

    fn capacity(&self) -> f32 {
        self.top - self.bottom
    }

    fn remaining(&self) -> f32 {
        self.cursor - self.bottom
    }

    fn fits(&self, height: f32) -> bool {
        height <= self.remaining() + EPSILON
    }

    fn break_page(&mut self) {
        self.pages.push(mem::take(&mut self.ops));
        self.cursor = self.top;
        self.fresh = true;
    }

    /// Move to a new page unless `height` fits here or the page is untouched.
    fn reserve(&mut self, height: f32) {
        if !self.fits(height) && !self.fresh {
            self.break_page();
        }
    }

    fn place(&mut self, op: DrawOp) {
        self.ops.push(op);
        self.fresh = false;
    }

    fn advance(&mut self, dy: f32) {
        self.cursor -= dy;
    }

    /// A spacer that does not fit ends the page and is discarded, as is one
    /// that would open a continuation page.
    fn spacer(&mut self, height: f32) {
        if self.fresh && !self.pages.is_empty() {
            return;
        }
        if self.fits(height) {
            self.advance(height);
        } else if !self.fresh {
            self.break_page();
        }
    }

    fn finish(mut self) -> Vec<Vec<DrawOp>> {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.pages.push(self.ops);
        }
        self.pages
    }
}

#[derive(Debug, Clone, Copy)]
enum Marker {
    Dash,
    Bullet,
    Check,
    Number(usize),
}

impl From<MarkerStyle> for Marker {
    fn from(style: MarkerStyle) -> Self {
        match style {
            MarkerStyle::Dash => Marker::Dash,
            MarkerStyle::Bullet => Marker::Bullet,
            MarkerStyle::Check => Marker::Check,
        }
    }
}

impl Marker {
    fn glyph(self) -> (Font, String) {
        match self {
            Marker::Dash => (Font::Regular, "-".to_string()),
            Marker::Bullet => (Font::Regular, "•".to_string()),
            Marker::Check => (Font::Dingbats, CHECK_MARK.to_string()),
            Marker::Number(n) => (Font::Regular, format!("{n}.")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Fragment {
    text: String,
    font: Font,
    color: Rgb,
    width: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct TextLine {
    fragments: Vec<Fragment>,
    width: f32,
}

impl TextLine {
    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn push(&mut self, text: &str, font: Font, color: Rgb, width: f32) {
        self.width += width;
        if let Some(last) = self.fragments.last_mut() {
            if last.font == font && last.color == color {
                last.text.push_str(text);
                last.width += width;
                return;
            }
        }
        self.fragments.push(Fragment {
            text: text.to_string(),
            font,
            color,
            width,
        });
    }
}

/// Greedy word wrap. Words are separated by single spaces; `'\n'` forces a
/// break. A word wider than `max_width` gets a line of its own.
fn wrap(text: &RichText, style: &TextStyle, max_width: f32) -> Vec<TextLine> {
    let size = style.font_size;
    let mut lines = Vec::new();
    let mut line = TextLine::default();
    let mut pending_space = false;

    for span in &text.spans {
        let font = Font::for_style(span.bold || style.bold, span.italic);
        let color = span.color.unwrap_or(style.color);

        for (i, segment) in span.text.split('\n').enumerate() {
            if i > 0 {
                lines.push(mem::take(&mut line));
                pending_space = false;
            }
            for (j, word) in segment.split(' ').enumerate() {
                if j > 0 {
                    pending_space = true;
                }
                if word.is_empty() {
                    continue;
                }
                let word_width = font.text_width(word, size);
                let space_width = if pending_space && !line.is_empty() {
                    font.text_width(" ", size)
                } else {
                    0.0
                };

                if !line.is_empty() && line.width + space_width + word_width > max_width + EPSILON
                {
                    lines.push(mem::take(&mut line));
                    line.push(word, font, color, word_width);
                } else if space_width > 0.0 {
                    line.push(&format!(" {word}"), font, color, space_width + word_width);
                } else {
                    line.push(word, font, color, word_width);
                }
                pending_space = false;
            }
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

struct Engine<'a> {
    styles: &'a StyleSheet,
    available: &'a BTreeSet<AssetSlot>,
}

impl Engine<'_> {
    fn draw_line(&self, flow: &mut Flow, line: &TextLine, style: &TextStyle, left: f32, width: f32) {
        let baseline = flow.cursor - style.font_size;
        let mut x = match style.alignment {
            Alignment::Left => left,
            Alignment::Center => left + (width - line.width).max(0.0) / 2.0,
        };
        for fragment in &line.fragments {
            flow.place(DrawOp::Text {
                x,
                y: baseline,
                font: fragment.font,
                size: style.font_size,
                color: fragment.color,
                text: fragment.text.clone(),
            });
            x += fragment.width;
        }
        flow.advance(style.leading);
    }

    /// Headings never split.
    fn heading(&self, flow: &mut Flow, text: &RichText, style: &TextStyle) -> Result<(), RenderError> {
        let lines = wrap(text, style, FRAME_WIDTH);
        let height = lines.len() as f32 * style.leading;
        check_fits(height, flow.capacity())?;

        flow.reserve(height);
        for line in &lines {
            self.draw_line(flow, line, style, MARGIN, FRAME_WIDTH);
        }
        flow.advance(style.space_after);
        Ok(())
    }

    /// Paragraphs break between lines.
    fn paragraph(&self, flow: &mut Flow, text: &RichText, style: &TextStyle) {
        for line in &wrap(text, style, FRAME_WIDTH) {
            flow.reserve(style.leading);
            self.draw_line(flow, line, style, MARGIN, FRAME_WIDTH);
        }
        flow.advance(style.space_after);
    }

    fn list_item(&self, flow: &mut Flow, marker: Marker, item: &RichText) {
        let style = &self.styles.list_item;
        let marker_x = MARGIN + self.styles.list_indent;
        let text_left = marker_x + self.styles.marker_gap;
        let text_width = FRAME_WIDTH - self.styles.list_indent - self.styles.marker_gap;

        for (index, line) in wrap(item, style, text_width).iter().enumerate() {
            flow.reserve(style.leading);
            if index == 0 {
                let (font, text) = marker.glyph();
                flow.place(DrawOp::Text {
                    x: marker_x,
                    y: flow.cursor - style.font_size,
                    font,
                    size: style.font_size,
                    color: style.color,
                    text,
                });
            }
            self.draw_line(flow, line, style, text_left, text_width);
        }
        flow.advance(style.space_after);
    }

    /// Label, rule and optional image centred on the rule. Kept whole.
    fn signature(&self, flow: &mut Flow, block: &SignatureBlock) -> Result<(), RenderError> {
        let size = self.styles.signature_font_size;
        let minimum = if block.image.is_some() {
            block.image_height
        } else {
            0.5 * CM
        };
        let height = (1.2 * size).max(minimum);
        check_fits(height, flow.capacity())?;

        flow.reserve(height);
        let baseline = flow.cursor - height;
        let label_width = Font::Regular.text_width(&block.label, size);
        let start = MARGIN + label_width + LABEL_GAP;
        let end = (MARGIN + block.line_width).max(start);

        flow.place(DrawOp::Text {
            x: MARGIN,
            y: baseline,
            font: Font::Regular,
            size,
            color: Rgb::BLACK,
            text: block.label.clone(),
        });
        flow.place(DrawOp::Line {
            from: (start, baseline),
            to: (end, baseline),
            width: 1.0,
            color: Rgb::BLACK,
        });
        if let Some(slot) = block.image.filter(|slot| self.available.contains(slot)) {
            flow.place(DrawOp::Image {
                slot,
                x: start + (end - start - block.image_width) / 2.0,
                y: baseline - block.image_height / 2.0,
                width: block.image_width,
                height: block.image_height,
            });
        }
        flow.advance(height);
        Ok(())
    }
}

fn check_fits(height: f32, available: f32) -> Result<(), RenderError> {
    if height > available + EPSILON {
        return Err(RenderError::NodeTooTall { height, available });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documents::model::{HeadingLevel, ParagraphStyle};

    fn all_assets() -> BTreeSet<AssetSlot> {
        [AssetSlot::InstitutionLogo, AssetSlot::AuthorizedSignature]
            .into_iter()
            .collect()
    }

    fn border() -> PageDecoration {
        PageDecoration {
            kind: DecorationKind::Border {
                line_width: 4.0,
                color: Rgb::ORANGE,
            },
            position: Anchor::PageInset(1.0 * CM),
        }
    }

    fn long_document() -> Vec<ContentNode> {
        let mut nodes = vec![ContentNode::PageDecoration(border())];
        for i in 0..60 {
            nodes.push(ContentNode::paragraph(format!(
                "Paragrafo numero {i} con un testo abbastanza lungo da occupare almeno due righe \
                 della cornice di stampa, così da riempire rapidamente la pagina."
            )));
        }
        nodes
    }

    fn text_ops(page: &PagePlan) -> Vec<&DrawOp> {
        page.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Text { .. }))
            .collect()
    }

    #[test]
    fn test_wrap_respects_width_and_hard_breaks() {
        let styles = StyleSheet::default();
        let text = RichText::plain("uno due tre quattro cinque sei sette otto nove dieci")
            .line_break()
            .bold("fine");
        let lines = wrap(&text, &styles.body, 120.0);
        assert!(lines.len() > 2);
        assert!(lines.iter().all(|line| line.width <= 120.0 + EPSILON));
        let last = lines.last().unwrap();
        assert_eq!(last.fragments.len(), 1);
        assert_eq!(last.fragments[0].font, Font::Bold);
    }

    #[test]
    fn test_wrap_keeps_space_between_spans() {
        let styles = StyleSheet::default();
        let text = RichText::plain("Gentile Cliente, ").bold("Mario Rossi");
        let lines = wrap(&text, &styles.body, FRAME_WIDTH);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].fragments[0].text, "Gentile Cliente,");
        assert_eq!(lines[0].fragments[1].text, " Mario Rossi");
    }

    #[test]
    fn test_long_content_paginates_with_decorations_on_every_page() {
        let plan = layout(&long_document(), &[], &StyleSheet::default(), &all_assets()).unwrap();
        assert!(plan.page_count() >= 2);
        for page in &plan.pages {
            assert!(matches!(page.ops.first(), Some(DrawOp::Rect { .. })));
        }
    }

    #[test]
    fn test_text_stays_inside_frame() {
        let plan = layout(&long_document(), &[], &StyleSheet::default(), &all_assets()).unwrap();
        for op in plan.ops() {
            if let DrawOp::Text { y, .. } = op {
                assert!(*y >= MARGIN, "text below bottom margin at {y}");
                assert!(*y <= PAGE_HEIGHT - MARGIN);
            }
        }
    }

    #[test]
    fn test_missing_asset_only_removes_the_image() {
        let mut nodes = vec![ContentNode::PageDecoration(PageDecoration {
            kind: DecorationKind::Logo {
                width: 100.0,
                height: 100.0,
            },
            position: Anchor::FrameTopLeft,
        })];
        nodes.push(ContentNode::paragraph("Testo"));
        nodes.push(ContentNode::SignatureBlock(SignatureBlock::signed(
            "Firma",
            FRAME_WIDTH,
            AssetSlot::AuthorizedSignature,
            4.0 * CM,
            2.0 * CM,
        )));

        let styles = StyleSheet::default();
        let with_assets = layout(&nodes, &[], &styles, &all_assets()).unwrap();
        let without = layout(&nodes, &[], &styles, &BTreeSet::new()).unwrap();

        let stripped: Vec<DrawOp> = with_assets
            .ops()
            .filter(|op| !matches!(op, DrawOp::Image { .. }))
            .cloned()
            .collect();
        let plain: Vec<DrawOp> = without.ops().cloned().collect();
        assert_eq!(stripped, plain);
        assert_eq!(
            with_assets
                .ops()
                .filter(|op| matches!(op, DrawOp::Image { .. }))
                .count(),
            2
        );
    }

    #[test]
    fn test_frame_logo_pushes_content_down() {
        let logo = PageDecoration {
            kind: DecorationKind::Logo {
                width: 100.0,
                height: 100.0,
            },
            position: Anchor::FrameTopLeft,
        };
        let nodes = vec![ContentNode::paragraph("Testo")];
        let styles = StyleSheet::default();
        let plan = layout(&nodes, &[logo], &styles, &BTreeSet::new()).unwrap();
        let page = &plan.pages[0];
        match text_ops(page)[0] {
            DrawOp::Text { y, .. } => {
                assert!(*y <= PAGE_HEIGHT - MARGIN - 108.0 - styles.body.font_size + EPSILON)
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_oversized_heading_is_rejected() {
        let words = vec!["Intestazione"; 1500].join(" ");
        let nodes = vec![ContentNode::heading(words, HeadingLevel::Title)];
        let result = layout(&nodes, &[], &StyleSheet::default(), &BTreeSet::new());
        assert!(matches!(result, Err(RenderError::NodeTooTall { .. })));
    }

    #[test]
    fn test_signature_line_starts_after_label() {
        let nodes = vec![ContentNode::SignatureBlock(SignatureBlock::blank(
            "Firma del Cliente: ",
            FRAME_WIDTH,
        ))];
        let styles = StyleSheet::default();
        let plan = layout(&nodes, &[], &styles, &BTreeSet::new()).unwrap();
        let label_width = Font::Regular.text_width("Firma del Cliente: ", styles.signature_font_size);
        let line = plan
            .ops()
            .find_map(|op| match op {
                DrawOp::Line { from, to, .. } => Some((*from, *to)),
                _ => None,
            })
            .unwrap();
        assert!((line.0 .0 - (MARGIN + label_width + LABEL_GAP)).abs() < EPSILON);
        assert!((line.1 .0 - (MARGIN + FRAME_WIDTH)).abs() < EPSILON);
    }

    #[test]
    fn test_empty_document_has_one_page() {
        let plan = layout(&[], &[], &StyleSheet::default(), &BTreeSet::new()).unwrap();
        assert_eq!(plan.page_count(), 1);
    }

    #[test]
    fn test_list_items_get_markers() {
        let nodes = vec![
            ContentNode::bullets(["primo", "secondo"], MarkerStyle::Check),
            ContentNode::numbered(["a", "b", "c"]),
            ContentNode::styled("nota", ParagraphStyle::Note),
        ];
        let plan = layout(&nodes, &[], &StyleSheet::default(), &BTreeSet::new()).unwrap();
        let texts: Vec<&str> = plan
            .ops()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts.iter().filter(|t| **t == CHECK_MARK).count(), 2);
        assert!(texts.contains(&"3."));
        assert!(plan.fonts().contains(&Font::Dingbats));
    }
}
