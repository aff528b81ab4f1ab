//! Page composition for exported PDFs.
//!
//! Documents are built in two passes. [`Composer`] lays out flowing content
//! (headings, paragraphs, tables) into an ordered list of [`ComposedPage`]s.
//! Only once every page exists does [`stamp_pages`] add the `n / N` footers
//! and the signature block on the last page. Coordinates are PDF points with
//! the origin at the bottom-left corner.

use crate::config::PdfLayoutConfig;
use crate::infra::export::pdf::metrics::{text_width, wrap_text, Face};

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

const A4_LONG_SIDE: f32 = 841.889_8;
const A4_SHORT_SIDE: f32 = 595.275_6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        y: f32,
        text: String,
        face: Face,
        size: f32,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        thickness: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposedPage {
    pub ops: Vec<DrawOp>,
}

#[cfg(test)]
impl ComposedPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn text_op(&self, needle: &str) -> Option<&DrawOp> {
        self.ops
            .iter()
            .find(|op| matches!(op, DrawOp::Text { text, .. } if text == needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    pub fn a4_landscape(margins: &PdfLayoutConfig) -> Self {
        Self {
            width: A4_LONG_SIDE,
            height: A4_SHORT_SIDE,
            margin_left: margins.margin_left_mm * MM,
            margin_right: margins.margin_right_mm * MM,
            margin_top: margins.margin_top_mm * MM,
            margin_bottom: margins.margin_bottom_mm * MM,
        }
    }

    pub fn printable_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn content_top(&self) -> f32 {
        self.height - self.margin_top
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableColumn {
    pub title: String,
    pub width: f32,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub face: Face,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub background: Option<Rgb>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub font_size: f32,
    pub leading: f32,
    pub padding_x: f32,
    pub padding_y: f32,
    pub header_background: Rgb,
    pub grid: Rgb,
    pub grid_width: f32,
}

/// Scales widths down proportionally when they overflow `available`.
/// Widths that already fit are returned unchanged, never stretched.
pub fn fit_widths(widths: &[f32], available: f32) -> Vec<f32> {
    let total: f32 = widths.iter().sum();
    if total > available && total > 0.0 {
        let scale = available / total;
        widths.iter().map(|w| w * scale).collect()
    } else {
        widths.to_vec()
    }
}

struct LaidOutRow {
    lines: Vec<Vec<String>>,
    faces: Vec<Face>,
    background: Option<Rgb>,
    height: f32,
}

impl LaidOutRow {
    fn height_for(lines: &[Vec<String>], style: &TableStyle) -> f32 {
        let max_lines = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
        max_lines as f32 * style.leading + 2.0 * style.padding_y
    }

    /// Detaches the first `count` wrapped lines of every cell into a row of
    /// its own, leaving the remainder in `self`. Rows taller than a page are
    /// continued on the next page this way.
    fn split_front(&mut self, count: usize, style: &TableStyle) -> LaidOutRow {
        let head: Vec<Vec<String>> = self
            .lines
            .iter_mut()
            .map(|cell| {
                let take = count.min(cell.len());
                cell.drain(..take).collect()
            })
            .collect();
        self.height = Self::height_for(&self.lines, style);
        LaidOutRow {
            height: Self::height_for(&head, style),
            lines: head,
            faces: self.faces.clone(),
            background: self.background,
        }
    }
}

pub struct Composer {
    geometry: PageGeometry,
    pages: Vec<ComposedPage>,
    cursor_y: f32,
}

impl Composer {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![ComposedPage::default()],
            cursor_y: geometry.content_top(),
        }
    }

    fn page(&mut self) -> &mut ComposedPage {
        if self.pages.is_empty() {
            self.pages.push(ComposedPage::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(ComposedPage::default());
        self.cursor_y = self.geometry.content_top();
    }

    fn remaining(&self) -> f32 {
        self.cursor_y - self.geometry.margin_bottom
    }

    fn page_is_fresh(&self) -> bool {
        self.cursor_y >= self.geometry.content_top()
    }

    fn ensure_room(&mut self, height: f32) {
        if height > self.remaining() && !self.page_is_fresh() {
            self.new_page();
        }
    }

    pub fn spacer(&mut self, height: f32) {
        self.cursor_y -= height;
    }

    /// Wrapped text block. `centered` centres each line in the printable width.
    pub fn paragraph(&mut self, text: &str, face: Face, size: f32, leading: f32, centered: bool) {
        let geometry = self.geometry;
        let lines = wrap_text(text, face, size, geometry.printable_width());
        for line in lines {
            self.ensure_room(leading);
            let baseline = self.cursor_y - size;
            let x = if centered {
                geometry.margin_left
                    + (geometry.printable_width() - text_width(&line, face, size)) / 2.0
            } else {
                geometry.margin_left
            };
            self.page().ops.push(DrawOp::Text {
                x,
                y: baseline,
                text: line,
                face,
                size,
            });
            self.cursor_y -= leading;
        }
    }

    fn lay_out_row(
        columns: &[TableColumn],
        cells: &[TableCell],
        background: Option<Rgb>,
        style: &TableStyle,
    ) -> LaidOutRow {
        let mut lines = Vec::with_capacity(columns.len());
        let mut faces = Vec::with_capacity(columns.len());
        for (idx, column) in columns.iter().enumerate() {
            let cell = cells.get(idx);
            let text = cell.map(|c| c.text.as_str()).unwrap_or("");
            let face = cell.map(|c| c.face).unwrap_or(Face::Regular);
            let inner = (column.width - 2.0 * style.padding_x).max(1.0);
            lines.push(wrap_text(text, face, style.font_size, inner));
            faces.push(face);
        }
        LaidOutRow {
            height: LaidOutRow::height_for(&lines, style),
            lines,
            faces,
            background,
        }
    }

    fn draw_row(
        &mut self,
        columns: &[TableColumn],
        row: &LaidOutRow,
        style: &TableStyle,
        x0: f32,
        header: bool,
    ) {
        let top = self.cursor_y;
        let bottom = top - row.height;
        let mut x = x0;
        let mut ops = Vec::new();

        for (idx, column) in columns.iter().enumerate() {
            if let Some(color) = row.background {
                ops.push(DrawOp::FillRect {
                    x,
                    y: bottom,
                    width: column.width,
                    height: row.height,
                    color,
                });
            }
            ops.push(DrawOp::StrokeRect {
                x,
                y: bottom,
                width: column.width,
                height: row.height,
                color: style.grid,
                thickness: style.grid_width,
            });

            let lines = &row.lines[idx];
            let face = row.faces[idx];
            let align = if header { Align::Center } else { column.align };
            let block = lines.len() as f32 * style.leading;
            let first_line_top = top - (row.height - block) / 2.0;
            for (line_idx, line) in lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                let width = text_width(line, face, style.font_size);
                let text_x = match align {
                    Align::Left => x + style.padding_x,
                    Align::Center => x + (column.width - width) / 2.0,
                    Align::Right => x + column.width - style.padding_x - width,
                };
                let baseline =
                    first_line_top - line_idx as f32 * style.leading - style.font_size;
                ops.push(DrawOp::Text {
                    x: text_x,
                    y: baseline,
                    text: line.clone(),
                    face,
                    size: style.font_size,
                });
            }
            x += column.width;
        }

        self.page().ops.extend(ops);
        self.cursor_y = bottom;
    }

    /// Lays out a grid table, centred in the printable width. Row heights grow
    /// with wrapped text; the header is repeated at the top of every page the
    /// table continues on.
    pub fn table(&mut self, columns: &[TableColumn], rows: &[TableRow], style: &TableStyle) {
        let table_width: f32 = columns.iter().map(|c| c.width).sum();
        let x0 = self.geometry.margin_left + (self.geometry.printable_width() - table_width) / 2.0;

        let header_cells: Vec<TableCell> = columns
            .iter()
            .map(|c| TableCell {
                text: c.title.clone(),
                face: Face::Bold,
            })
            .collect();
        let header =
            Self::lay_out_row(columns, &header_cells, Some(style.header_background), style);

        let mut header_on_page = false;
        for row in rows {
            let mut pending = Self::lay_out_row(columns, &row.cells, row.background, style);
            let mut drawn_since_header = true;
            loop {
                if !header_on_page {
                    let first_slice = pending.height.min(Self::single_line_height(style));
                    let needed = if pending.height <= self.table_capacity(header.height) {
                        pending.height
                    } else {
                        first_slice
                    };
                    self.ensure_room(header.height + needed);
                    self.draw_row(columns, &header, style, x0, true);
                    header_on_page = true;
                    drawn_since_header = false;
                }
                if pending.height <= self.remaining() {
                    self.draw_row(columns, &pending, style, x0, false);
                    break;
                }

                let room = Self::lines_that_fit(self.remaining(), style);
                let fits_fresh_page = pending.height <= self.table_capacity(header.height);
                if room == 0 && !drawn_since_header {
                    tracing::warn!(
                        height = pending.height,
                        "table row does not fit on an empty page"
                    );
                    self.draw_row(columns, &pending, style, x0, false);
                    break;
                }
                if room > 0 && !fits_fresh_page {
                    let head = pending.split_front(room, style);
                    self.draw_row(columns, &head, style, x0, false);
                }
                self.new_page();
                header_on_page = false;
                drawn_since_header = true;
            }
        }

        if !header_on_page {
            self.ensure_room(header.height);
            self.draw_row(columns, &header, style, x0, true);
        }
    }

    /// Height available to table rows on a fresh page below a repeated header.
    fn table_capacity(&self, header_height: f32) -> f32 {
        self.geometry.content_top() - self.geometry.margin_bottom - header_height
    }

    fn single_line_height(style: &TableStyle) -> f32 {
        style.leading + 2.0 * style.padding_y
    }

    fn lines_that_fit(space: f32, style: &TableStyle) -> usize {
        let usable = space - 2.0 * style.padding_y;
        if usable < style.leading {
            0
        } else {
            (usable / style.leading).floor() as usize
        }
    }

    pub fn finish(self) -> Vec<ComposedPage> {
        self.pages
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SignatureBlock {
    pub lines: Vec<String>,
    pub caret_indent: f32,
}

const FOOTER_SIZE: f32 = 8.0;
const SIGNATURE_SIZE: f32 = 9.0;
const SIGNATURE_LEADING: f32 = 12.0;
/// The last signature line sits this many leadings above the bottom margin.
const SIGNATURE_LIFT_LINES: f32 = 3.0;

/// Second pass: stamps `page / total` on every page and, when given, the
/// signature block on the final page. Must run after composition because
/// the page total is only known then.
pub fn stamp_pages(
    pages: &mut [ComposedPage],
    geometry: &PageGeometry,
    signature: Option<&SignatureBlock>,
) {
    let total = pages.len();
    for (idx, page) in pages.iter_mut().enumerate() {
        let label = format!("{} / {}", idx + 1, total);
        let width = text_width(&label, Face::Regular, FOOTER_SIZE);
        page.ops.push(DrawOp::Text {
            x: geometry.width / 2.0 - width / 2.0,
            y: geometry.margin_bottom * 0.3,
            text: label,
            face: Face::Regular,
            size: FOOTER_SIZE,
        });

        if idx + 1 == total {
            if let Some(block) = signature {
                draw_signature(page, geometry, block);
            }
        }
    }
}

fn draw_signature(page: &mut ComposedPage, geometry: &PageGeometry, block: &SignatureBlock) {
    let last_line_y = geometry.margin_bottom + SIGNATURE_LEADING * SIGNATURE_LIFT_LINES;
    let span = SIGNATURE_LEADING * block.lines.len().saturating_sub(1) as f32;
    let max_top = geometry.height - geometry.margin_top - 6.0;
    let first_line_y = (last_line_y + span).min(max_top);

    for (idx, line) in block.lines.iter().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let x = if line.trim() == "^" {
            geometry.margin_left + block.caret_indent
        } else {
            geometry.margin_left
        };
        page.ops.push(DrawOp::Text {
            x,
            y: first_line_y - idx as f32 * SIGNATURE_LEADING,
            text: line.clone(),
            face: Face::Regular,
            size: SIGNATURE_SIZE,
        });
    }
}
