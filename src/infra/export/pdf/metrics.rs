/// Base-14 faces used by the exported documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    BoldOblique,
}

// Advance widths in 1/1000 em for ASCII 32..=126, from the Adobe AFM files.
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

const FALLBACK_WIDTH: u16 = 556;

fn char_width(face: Face, ch: char) -> u16 {
    let table = match face {
        Face::Regular => &HELVETICA,
        // Oblique shares the upright advance widths.
        Face::Bold | Face::BoldOblique => &HELVETICA_BOLD,
    };
    let code = ch as u32;
    if (32..=126).contains(&code) {
        table[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

pub fn text_width(text: &str, face: Face, size: f32) -> f32 {
    let units: u32 = text.chars().map(|ch| char_width(face, ch) as u32).sum();
    units as f32 * size / 1000.0
}

fn break_long_word(word: &str, face: Face, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for ch in word.chars() {
        current.push(ch);
        if text_width(&current, face, size) > max_width && current.chars().count() > 1 {
            current.pop();
            pieces.push(std::mem::take(&mut current));
            current.push(ch);
        }
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Greedy word wrap. Explicit newlines start a new line; a word wider than
/// the box is split by characters. Always returns at least one line.
pub fn wrap_text(text: &str, face: Face, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if text_width(&candidate, face, size) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width(word, face, size) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_long_word(word, face, size, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_font_metrics() {
        assert_eq!(text_width("", Face::Regular, 8.0), 0.0);
        assert!((text_width("0", Face::Regular, 10.0) - 5.56).abs() < 1e-4);
        assert!(text_width("Bold", Face::Bold, 8.0) > text_width("Bold", Face::Regular, 8.0));
        assert_eq!(
            text_width("abc", Face::Bold, 8.0),
            text_width("abc", Face::BoldOblique, 8.0)
        );
    }

    #[test]
    fn wrap_splits_on_words() {
        let lines = wrap_text("Belanja barang operasional lainnya", Face::Regular, 8.0, 60.0);
        assert!(lines.len() > 1);
        assert!(lines
            .iter()
            .all(|line| text_width(line, Face::Regular, 8.0) <= 60.0));
        assert_eq!(lines.join(" "), "Belanja barang operasional lainnya");
    }

    #[test]
    fn wrap_breaks_overlong_words() {
        let lines = wrap_text("ABCDEFGHIJKLMNOPQRSTUVWXYZ", Face::Regular, 8.0, 30.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");
    }

    #[test]
    fn wrap_of_empty_text_is_one_blank_line() {
        assert_eq!(wrap_text("", Face::Regular, 8.0, 50.0), vec![String::new()]);
    }
}
