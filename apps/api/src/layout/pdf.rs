//! Serializes buffered canvas pages into a PDF document with `lopdf`.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use super::canvas::{DrawOp, LinkArea, Page};
use super::error::RenderError;
use super::font_metrics::{encode_win_ansi, Font};
use super::geometry::PageGeometry;

const PRODUCER: &str = concat!("resumake ", env!("CARGO_PKG_VERSION"));

/// Writes `pages` as a complete PDF 1.7 file.
///
/// The output carries no timestamps or random IDs, so identical pages always
/// produce identical bytes.
pub fn write_pdf(
    geometry: &PageGeometry,
    pages: &[Page],
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for font in Font::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => font.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = page_content(page, geometry.height);
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let annotations: Vec<Object> = page
            .links
            .iter()
            .map(|link| Object::Reference(doc.add_object(link_annotation(link, geometry.height))))
            .collect();

        let mut page_dict = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.0_f32.into(), 0.0_f32.into(), geometry.width.into(), geometry.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        };
        if !annotations.is_empty() {
            page_dict.set("Annots", Object::Array(annotations));
        }
        kids.push(Object::Reference(doc.add_object(page_dict)));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal(PRODUCER),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)?;
    Ok(buffer)
}

/// Converts one page's draw list into content-stream operators, flipping y.
fn page_content(page: &Page, page_height: f32) -> Content {
    let mut operations = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                baseline,
                text,
                style,
            } => {
                operations.extend([
                    Operation::new("BT", vec![]),
                    Operation::new(
                        "Tf",
                        vec![style.font.resource_name().into(), style.size.into()],
                    ),
                    Operation::new(
                        "rg",
                        vec![style.color.0.into(), style.color.1.into(), style.color.2.into()],
                    ),
                    Operation::new("Td", vec![(*x).into(), (page_height - baseline).into()]),
                    Operation::new(
                        "Tj",
                        vec![Object::String(encode_win_ansi(text), StringFormat::Literal)],
                    ),
                    Operation::new("ET", vec![]),
                ]);
            }
            DrawOp::Stroke {
                from,
                to,
                width,
                color,
            } => {
                operations.extend([
                    Operation::new("RG", vec![color.0.into(), color.1.into(), color.2.into()]),
                    Operation::new("w", vec![(*width).into()]),
                    Operation::new("m", vec![from.0.into(), (page_height - from.1).into()]),
                    Operation::new("l", vec![to.0.into(), (page_height - to.1).into()]),
                    Operation::new("S", vec![]),
                ]);
            }
        }
    }
    Content { operations }
}

fn link_annotation(link: &LinkArea, page_height: f32) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Link",
        "Rect" => vec![
            link.left.into(),
            (page_height - link.bottom).into(),
            link.right.into(),
            (page_height - link.top).into(),
        ],
        "Border" => vec![Object::Integer(0), Object::Integer(0), Object::Integer(0)],
        "A" => dictionary! {
            "S" => "URI",
            "URI" => Object::string_literal(link.uri.as_bytes().to_vec()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::canvas::{Canvas, TextOptions};
    use crate::layout::geometry::default_page_geometry;
    use crate::layout::style::{BODY, RULE};
    use crate::layout::wrap::Run;

    fn sample_canvas() -> Canvas {
        let mut canvas = Canvas::new(default_page_geometry());
        canvas
            .text(&[Run::new("• Shipped it", BODY)], &TextOptions::default())
            .unwrap();
        canvas.stroke((50.0, 120.0), (545.28, 120.0), 1.0, RULE);
        canvas
            .text(
                &[Run::new("View Project", BODY)],
                &TextOptions {
                    link: Some("https://example.org"),
                    underline: true,
                    ..Default::default()
                },
            )
            .unwrap();
        canvas.next_page();
        canvas
            .text(&[Run::new("second page", BODY)], &TextOptions::default())
            .unwrap();
        canvas
    }

    fn write(canvas: &Canvas) -> Vec<u8> {
        write_pdf(canvas.geometry(), canvas.pages(), "Ada Lovelace").unwrap()
    }

    #[test]
    fn test_output_is_a_loadable_pdf() {
        let bytes = write(&sample_canvas());
        assert!(bytes.starts_with(b"%PDF-1.7"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_page_text_lands_in_content_stream() {
        let bytes = write(&sample_canvas());
        let doc = Document::load_mem(&bytes).unwrap();
        let pages = doc.get_pages();
        let first = doc.get_page_content(pages[&1]).unwrap();
        let second = doc.get_page_content(pages[&2]).unwrap();
        assert!(String::from_utf8_lossy(&first).contains("View Project"));
        assert!(String::from_utf8_lossy(&second).contains("second page"));
    }

    #[test]
    fn test_links_become_uri_annotations() {
        let bytes = write(&sample_canvas());
        let doc = Document::load_mem(&bytes).unwrap();
        let page_id = doc.get_pages()[&1];
        let page = doc.get_object(page_id).unwrap().as_dict().unwrap();
        let annots = page.get(b"Annots").unwrap().as_array().unwrap();
        assert_eq!(annots.len(), 1);

        let annot = doc
            .get_object(annots[0].as_reference().unwrap())
            .unwrap()
            .as_dict()
            .unwrap();
        let action = annot.get(b"A").unwrap().as_dict().unwrap();
        assert_eq!(
            action.get(b"URI").unwrap().as_str().unwrap(),
            b"https://example.org"
        );
    }

    #[test]
    fn test_fonts_are_declared_once_per_face() {
        let bytes = write(&sample_canvas());
        let text = String::from_utf8_lossy(&bytes);
        for face in ["/Helvetica", "/Helvetica-Bold", "/Helvetica-Oblique"] {
            assert!(text.contains(face), "missing {face}");
        }
        assert!(text.contains("/WinAnsiEncoding"));
    }

    #[test]
    fn test_same_pages_same_bytes() {
        let canvas = sample_canvas();
        assert_eq!(write(&canvas), write(&canvas));
    }
}
