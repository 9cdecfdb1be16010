//! PDF renderer: content tree in, A4 PDF bytes out.
//!
//! Rendering runs in three steps. Referenced assets are loaded first, then
//! the node list is laid out into a page plan, and finally the plan is
//! serialised. A failure at any step returns an error and no bytes.

mod fonts;
mod images;
mod layout;
mod pdf;
mod styles;

use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use thiserror::Error;

use crate::config::AssetPaths;

use super::model::{AssetSlot, ContentNode, DecorationKind, PageDecoration};

pub use fonts::Font;
pub use images::EmbeddedImage;
pub use layout::{DrawOp, LayoutPlan, PagePlan};
pub use styles::{Alignment, StyleSheet, TextStyle};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("character {0:?} cannot be encoded with the standard PDF fonts")]
    UnsupportedCharacter(char),
    #[error("failed to decode asset {}: {source}", .path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("block of {height:.1}pt does not fit a frame of {available:.1}pt")]
    NodeTooTall { height: f32, available: f32 },
    #[error("PDF encoding failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),
}

/// A finished PDF.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

#[derive(Debug, Clone)]
pub struct Renderer {
    assets: AssetPaths,
    styles: StyleSheet,
}

impl Renderer {
    pub fn new(assets: AssetPaths) -> Self {
        Self::with_styles(assets, StyleSheet::default())
    }

    pub fn with_styles(assets: AssetPaths, styles: StyleSheet) -> Self {
        Self { assets, styles }
    }

    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    pub fn render(
        &self,
        nodes: &[ContentNode],
        decorations: &[PageDecoration],
    ) -> Result<RenderedPdf, RenderError> {
        self.render_titled(None, nodes, decorations)
    }

    /// Render and record `title` in the document information dictionary.
    pub fn render_titled(
        &self,
        title: Option<&str>,
        nodes: &[ContentNode],
        decorations: &[PageDecoration],
    ) -> Result<RenderedPdf, RenderError> {
        let images = self.load_assets(nodes, decorations)?;
        let available: BTreeSet<AssetSlot> = images.keys().copied().collect();
        let plan = layout::layout(nodes, decorations, &self.styles, &available)?;
        let bytes = pdf::write(&plan, &images, title)?;

        log::debug!(
            "Rendered {} page(s), {} bytes",
            plan.page_count(),
            bytes.len()
        );
        Ok(RenderedPdf {
            page_count: plan.page_count(),
            bytes,
        })
    }

    /// Page plan without serialising it. Assets are probed the same way
    /// `render` does.
    pub fn plan(
        &self,
        nodes: &[ContentNode],
        decorations: &[PageDecoration],
    ) -> Result<LayoutPlan, RenderError> {
        let images = self.load_assets(nodes, decorations)?;
        let available: BTreeSet<AssetSlot> = images.keys().copied().collect();
        layout::layout(nodes, decorations, &self.styles, &available)
    }

    fn load_assets(
        &self,
        nodes: &[ContentNode],
        decorations: &[PageDecoration],
    ) -> Result<BTreeMap<AssetSlot, EmbeddedImage>, RenderError> {
        let mut images = BTreeMap::new();
        for slot in referenced_slots(nodes, decorations) {
            if let Some(image) = EmbeddedImage::load(self.assets.path(slot))? {
                images.insert(slot, image);
            }
        }
        Ok(images)
    }
}

fn referenced_slots(nodes: &[ContentNode], decorations: &[PageDecoration]) -> BTreeSet<AssetSlot> {
    let from_decorations = layout::collect_decorations(nodes, decorations)
        .into_iter()
        .filter_map(|decoration| match decoration.kind {
            DecorationKind::Logo { .. } => Some(AssetSlot::InstitutionLogo),
            DecorationKind::Border { .. } => None,
        });
    let from_signatures = nodes.iter().filter_map(|node| match node {
        ContentNode::SignatureBlock(block) => block.image,
        _ => None,
    });
    from_decorations.chain(from_signatures).collect()
}
