//! Page geometry in PDF points (1/72 inch).

pub const CM: f32 = 28.346_457;

/// A4 portrait.
pub const PAGE_WIDTH: f32 = 595.275_6;
pub const PAGE_HEIGHT: f32 = 841.889_8;

/// Same margin on all four sides.
pub const MARGIN: f32 = 2.0 * CM;

pub const FRAME_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
