//! Serialises a layout plan into PDF bytes with lopdf.

use std::collections::BTreeMap;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use crate::documents::geometry::{PAGE_HEIGHT, PAGE_WIDTH};
use crate::documents::model::{AssetSlot, Rgb};

use super::fonts::{encode_win_ansi, Font};
use super::images::EmbeddedImage;
use super::layout::{DrawOp, LayoutPlan};
use super::RenderError;

const PRODUCER: &str = concat!("loan-docs-server ", env!("CARGO_PKG_VERSION"));

fn xobject_name(slot: AssetSlot) -> &'static str {
    match slot {
        AssetSlot::InstitutionLogo => "Logo",
        AssetSlot::AuthorizedSignature => "Signature",
    }
}

fn real(value: f32) -> Object {
    Object::Real(value.into())
}

fn name(value: &str) -> Object {
    Object::Name(value.as_bytes().to_vec())
}

fn color_operands(color: Rgb) -> Vec<Object> {
    vec![real(color.0), real(color.1), real(color.2)]
}

fn encode_text(font: Font, text: &str) -> Result<Vec<u8>, RenderError> {
    if font.uses_win_ansi() {
        encode_win_ansi(text).map_err(RenderError::UnsupportedCharacter)
    } else {
        Ok(text.as_bytes().to_vec())
    }
}

fn operations(ops: &[DrawOp]) -> Result<Vec<Operation>, RenderError> {
    let mut out = Vec::new();
    for op in ops {
        match op {
            DrawOp::Text {
                x,
                y,
                font,
                size,
                color,
                text,
            } => {
                let encoded = encode_text(*font, text)?;
                out.push(Operation::new("BT", vec![]));
                out.push(Operation::new(
                    "Tf",
                    vec![name(font.resource_name()), real(*size)],
                ));
                out.push(Operation::new("rg", color_operands(*color)));
                out.push(Operation::new("Td", vec![real(*x), real(*y)]));
                out.push(Operation::new(
                    "Tj",
                    vec![Object::String(encoded, StringFormat::Hexadecimal)],
                ));
                out.push(Operation::new("ET", vec![]));
            }
            DrawOp::Line {
                from,
                to,
                width,
                color,
            } => {
                out.push(Operation::new("q", vec![]));
                out.push(Operation::new("RG", color_operands(*color)));
                out.push(Operation::new("w", vec![real(*width)]));
                out.push(Operation::new("m", vec![real(from.0), real(from.1)]));
                out.push(Operation::new("l", vec![real(to.0), real(to.1)]));
                out.push(Operation::new("S", vec![]));
                out.push(Operation::new("Q", vec![]));
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                line_width,
                color,
            } => {
                out.push(Operation::new("q", vec![]));
                out.push(Operation::new("RG", color_operands(*color)));
                out.push(Operation::new("w", vec![real(*line_width)]));
                out.push(Operation::new(
                    "re",
                    vec![real(*x), real(*y), real(*width), real(*height)],
                ));
                out.push(Operation::new("S", vec![]));
                out.push(Operation::new("Q", vec![]));
            }
            DrawOp::Image {
                slot,
                x,
                y,
                width,
                height,
            } => {
                out.push(Operation::new("q", vec![]));
                out.push(Operation::new(
                    "cm",
                    vec![
                        real(*width),
                        real(0.0),
                        real(0.0),
                        real(*height),
                        real(*x),
                        real(*y),
                    ],
                ));
                out.push(Operation::new("Do", vec![name(xobject_name(*slot))]));
                out.push(Operation::new("Q", vec![]));
            }
        }
    }
    Ok(out)
}

/// Build the complete document in memory. Nothing is returned unless every
/// page encodes.
pub fn write(
    plan: &LayoutPlan,
    images: &BTreeMap<AssetSlot, EmbeddedImage>,
    title: Option<&str>,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let mut dict = dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => name(font.base_font()),
        };
        if font.uses_win_ansi() {
            dict.set("Encoding", "WinAnsiEncoding");
        }
        fonts.set(font.resource_name(), Object::Reference(doc.add_object(dict)));
    }

    // Each image is stored once and shared by every page that draws it.
    let mut xobjects = Dictionary::new();
    for (slot, image) in images {
        xobjects.set(xobject_name(*slot), Object::Reference(image.embed(&mut doc)));
    }

    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
        "XObject" => xobjects,
    });

    let media_box = vec![real(0.0), real(0.0), real(PAGE_WIDTH), real(PAGE_HEIGHT)];
    let mut kids: Vec<Object> = Vec::with_capacity(plan.page_count());
    for page in &plan.pages {
        let content = Content {
            operations: operations(&page.ops)?,
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });

    let mut info = dictionary! {
        "Producer" => Object::string_literal(PRODUCER),
    };
    if let Some(title) = title {
        let encoded = encode_win_ansi(title).map_err(RenderError::UnsupportedCharacter)?;
        info.set("Title", Object::String(encoded, StringFormat::Literal));
    }
    let info_id = doc.add_object(info);

    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
