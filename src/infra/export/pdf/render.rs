use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb as PdfRgb,
};

use crate::infra::export::pdf::layout::{ComposedPage, DrawOp, PageGeometry, Rgb, MM};
use crate::infra::export::pdf::metrics::Face;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    bold_oblique: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, printpdf::Error> {
        Ok(Self {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
            bold_oblique: doc.add_builtin_font(BuiltinFont::HelveticaBoldOblique)?,
        })
    }

    fn get(&self, face: Face) -> &IndirectFontRef {
        match face {
            Face::Regular => &self.regular,
            Face::Bold => &self.bold,
            Face::BoldOblique => &self.bold_oblique,
        }
    }
}

fn mm(points: f32) -> Mm {
    Mm(points / MM)
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(rgb.r, rgb.g, rgb.b, None))
}

fn black() -> Color {
    Color::Rgb(PdfRgb::new(0.0, 0.0, 0.0, None))
}

fn draw(layer: &PdfLayerReference, fonts: &Fonts, op: &DrawOp) {
    match op {
        DrawOp::Text {
            x,
            y,
            text,
            face,
            size,
        } => {
            layer.set_fill_color(black());
            layer.use_text(text.as_str(), *size, mm(*x), mm(*y), fonts.get(*face));
        }
        DrawOp::FillRect {
            x,
            y,
            width,
            height,
            color: fill,
        } => {
            layer.set_fill_color(color(*fill));
            layer.add_rect(
                Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height))
                    .with_mode(PaintMode::Fill),
            );
        }
        DrawOp::StrokeRect {
            x,
            y,
            width,
            height,
            color: outline,
            thickness,
        } => {
            layer.set_outline_color(color(*outline));
            layer.set_outline_thickness(*thickness);
            layer.add_rect(
                Rect::new(mm(*x), mm(*y), mm(x + width), mm(y + height))
                    .with_mode(PaintMode::Stroke),
            );
        }
    }
}

/// Writes composed pages into a PDF using the base-14 Helvetica faces.
pub fn render_pdf(
    title: &str,
    geometry: &PageGeometry,
    pages: &[ComposedPage],
) -> Result<Vec<u8>, printpdf::Error> {
    let width = mm(geometry.width);
    let height = mm(geometry.height);
    let (doc, first_page, first_layer) = PdfDocument::new(title, width, height, "Layer 1");
    let fonts = Fonts::load(&doc)?;

    for (idx, page) in pages.iter().enumerate() {
        let (page_idx, layer_idx) = if idx == 0 {
            (first_page, first_layer)
        } else {
            doc.add_page(width, height, "Layer 1")
        };
        let layer = doc.get_page(page_idx).get_layer(layer_idx);
        for op in &page.ops {
            draw(&layer, &fonts, op);
        }
    }

    doc.save_to_bytes()
}
