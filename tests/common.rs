//! Shared helpers for the integration tests.
#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use chrono::NaiveDate;
use image::{Rgba, RgbaImage};
use lopdf::content::Content;
use lopdf::{Document, Object};

use loan_docs_server::config::{AssetPaths, DocumentConfig};
use loan_docs_server::documents::common::FixedClock;
use loan_docs_server::documents::DocumentService;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn assets_in(dir: &Path) -> AssetPaths {
    AssetPaths {
        institution_logo: dir.join("logo.png"),
        authorized_signature: dir.join("signature.png"),
    }
}

/// Write a small semi-transparent logo and signature into `dir`.
pub fn write_assets(dir: &Path) {
    RgbaImage::from_pixel(40, 20, Rgba([0, 60, 140, 255]))
        .save(dir.join("logo.png"))
        .unwrap();
    RgbaImage::from_fn(60, 20, |x, _| Rgba([0, 0, 0, if x % 2 == 0 { 255 } else { 0 }]))
        .save(dir.join("signature.png"))
        .unwrap();
}

pub fn service_with_assets(dir: &Path) -> DocumentService {
    let config = DocumentConfig {
        assets: assets_in(dir),
        ..DocumentConfig::default()
    };
    DocumentService::with_clock(config, Arc::new(FixedClock(today())))
}

/// WinAnsi bytes for the Latin-1 range plus the euro sign.
pub fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| if ch == '€' { 0x80 } else { ch as u32 as u8 })
        .collect()
}

pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Decoded content operations of every page, in page order.
pub fn page_operations(pdf: &[u8]) -> Vec<Vec<lopdf::content::Operation>> {
    let doc = Document::load_mem(pdf).unwrap();
    doc.get_pages()
        .values()
        .map(|page_id| {
            let bytes = doc.get_page_content(*page_id).unwrap();
            Content::decode(&bytes).unwrap().operations
        })
        .collect()
}

/// Every string shown with `Tj`, concatenated.
pub fn shown_text(pdf: &[u8]) -> Vec<u8> {
    page_operations(pdf)
        .into_iter()
        .flatten()
        .filter(|op| op.operator == "Tj")
        .flat_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => bytes.clone(),
            _ => Vec::new(),
        })
        .collect()
}

/// Names of the XObjects painted on one page.
pub fn painted_images(operations: &[lopdf::content::Operation]) -> Vec<String> {
    operations
        .iter()
        .filter(|op| op.operator == "Do")
        .filter_map(|op| op.operands.first())
        .filter_map(|operand| operand.as_name_str().ok())
        .map(str::to_string)
        .collect()
}
