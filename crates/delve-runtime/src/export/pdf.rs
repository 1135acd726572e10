//! Small PDF 1.4 writer for text-only reports.
//!
//! Uses the two standard Helvetica faces with WinAnsi encoding, so no fonts
//! are embedded. Characters outside that encoding are written as `?`.

use std::fmt::Write as _;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;

/// One logical piece of a report, laid out top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Title(String),
    Heading(String),
    Body(String),
    Bullet(String),
    Meta(String),
    Gap(f32),
}

#[derive(Clone, Copy)]
struct Style {
    font: &'static str,
    size: f32,
    leading: f32,
    wrap: usize,
    centered: bool,
    gray: bool,
}

impl Block {
    fn style(&self) -> Style {
        let body = Style {
            font: "F1",
            size: 11.0,
            leading: 14.0,
            wrap: 88,
            centered: false,
            gray: false,
        };
        match self {
            Block::Title(_) => Style {
                font: "F2",
                size: 16.0,
                leading: 22.0,
                wrap: 55,
                centered: true,
                ..body
            },
            Block::Heading(_) => Style {
                font: "F2",
                size: 13.0,
                leading: 18.0,
                wrap: 70,
                ..body
            },
            Block::Meta(_) => Style {
                size: 10.0,
                gray: true,
                ..body
            },
            Block::Body(_) | Block::Bullet(_) | Block::Gap(_) => body,
        }
    }
}

struct Row {
    text: String,
    style: Style,
}

/// Lay out `blocks` on letter-sized pages and serialize the document.
pub fn render(blocks: &[Block]) -> Vec<u8> {
    let pages = paginate(blocks);
    write_document(&pages)
}

fn paginate(blocks: &[Block]) -> Vec<String> {
    let mut pages = Vec::new();
    let mut stream = String::new();
    let mut y = PAGE_HEIGHT - MARGIN;

    for block in blocks {
        let style = block.style();
        let rows: Vec<Row> = match block {
            Block::Gap(points) => {
                y -= *points;
                continue;
            }
            Block::Bullet(text) => wrap(&format!("\u{2022} {}", text), style.wrap)
                .into_iter()
                .map(|text| Row { text, style })
                .collect(),
            Block::Title(text) | Block::Heading(text) | Block::Body(text) | Block::Meta(text) => {
                wrap(text, style.wrap)
                    .into_iter()
                    .map(|text| Row { text, style })
                    .collect()
            }
        };

        for row in rows {
            if y - row.style.leading < MARGIN {
                pages.push(std::mem::take(&mut stream));
                y = PAGE_HEIGHT - MARGIN;
            }
            y -= row.style.leading;
            draw_row(&mut stream, &row, y);
        }
    }

    if !stream.is_empty() || pages.is_empty() {
        pages.push(stream);
    }
    pages
}

fn draw_row(stream: &mut String, row: &Row, y: f32) {
    let style = row.style;
    let x = if style.centered {
        // Helvetica averages roughly half an em per glyph
        let width = row.text.chars().count() as f32 * style.size * 0.5;
        ((PAGE_WIDTH - width) / 2.0).max(MARGIN)
    } else {
        MARGIN
    };

    if style.gray {
        stream.push_str("0.5 g\n");
    }
    let _ = writeln!(
        stream,
        "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET",
        style.font,
        style.size,
        x,
        y,
        escape(&row.text)
    );
    if style.gray {
        stream.push_str("0 g\n");
    }
}

/// Greedy word wrap at `width` characters; words longer than a line are
/// split. Blank lines in the input are kept.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..width).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }

            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Escape a string for a PDF literal, mapping to WinAnsi bytes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{2022}' => out.push_str("\\225"),
            '\u{00a0}'..='\u{00ff}' => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            _ => out.push('?'),
        }
    }
    out
}

fn write_document(pages: &[String]) -> Vec<u8> {
    let mut objects: Vec<String> = Vec::new();
    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", 5 + 2 * i))
        .collect();

    objects.push("<< /Type /Catalog /Pages 2 0 R >>".to_string());
    objects.push(format!(
        "<< /Type /Pages /Kids [{}] /Count {} >>",
        kids.join(" "),
        pages.len()
    ));
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    objects.push(
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
            .to_string(),
    );
    for (i, content) in pages.iter().enumerate() {
        objects.push(format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] \
             /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
            PAGE_WIDTH,
            PAGE_HEIGHT,
            6 + 2 * i
        ));
        objects.push(format!(
            "<< /Length {} >>\nstream\n{}endstream",
            content.len(),
            content
        ));
    }

    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, object) in objects.iter().enumerate() {
        offsets.push(out.len());
        let _ = write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, object);
    }

    let xref_at = out.len();
    let _ = write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        let _ = write!(out, "{:010} 00000 n \n", offset);
    }
    let _ = write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_at
    );

    out.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(pdf: &[u8]) -> String {
        String::from_utf8(pdf.to_vec()).unwrap()
    }

    #[test]
    fn test_document_structure() {
        let pdf = render(&[
            Block::Title("Research Report: Fusion".to_string()),
            Block::Body("Decades, still.".to_string()),
        ]);
        let doc = text(&pdf);

        assert!(doc.starts_with("%PDF-1.4\n"));
        assert!(doc.ends_with("%%EOF\n"));
        assert!(doc.contains("(Research Report: Fusion) Tj"));
        assert!(doc.contains("/Count 1"));
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let doc = text(&render(&[Block::Body("x".to_string())]));

        let start: usize = doc
            .lines()
            .skip_while(|l| *l != "startxref")
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();
        assert!(doc[start..].starts_with("xref\n"));

        let entries: Vec<&str> = doc[start..].lines().skip(3).take(6).collect();
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.len(), 19);
            let offset: usize = entry[..10].parse().unwrap();
            assert!(doc[offset..].starts_with(&format!("{} 0 obj", i + 1)));
        }
    }

    #[test]
    fn test_long_text_spills_onto_new_pages() {
        let blocks: Vec<Block> = (0..120)
            .map(|i| Block::Body(format!("line {}", i)))
            .collect();
        let doc = text(&render(&blocks));

        assert!(doc.contains("/Count 3"));
        assert!(doc.contains("(line 119) Tj"));
    }

    #[test]
    fn test_escape_specials() {
        assert_eq!(escape("f(x) \\ y"), "f\\(x\\) \\\\ y");
        assert_eq!(escape("caf\u{e9} \u{2022} \u{4e2d}"), "caf\\351 \\225 ?");
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("aaa bbb ccc", 7), vec!["aaa bbb", "ccc"]);
        assert_eq!(wrap("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap("one\n\ntwo", 10), vec!["one", "", "two"]);
        assert_eq!(wrap("", 10), vec![""]);
    }
}
