//! PDF report exporter.
//!
//! Writes a minimal PDF 1.4 file: one A4 page, the two standard Helvetica
//! faces, one uncompressed content stream. Layout comes entirely from the
//! [`ReportDocument`]; this adapter only converts millimetres measured from
//! the top edge into points measured from the bottom edge.

use std::fmt::Write as _;

use crate::domain::report::layout::{
    BODY_FONT_SIZE, DISCLAIMER_FONT_SIZE, HEADING_FONT_SIZE, SECTION_TITLE_FONT_SIZE,
    SUBTITLE_FONT_SIZE, TITLE_FONT_SIZE,
};
use crate::domain::report::{PageGeometry, ReportDocument};
use crate::ports::{ExportError, ExportFormat, ReportExporter};

const PT_PER_MM: f32 = 72.0 / 25.4;

const TEXT_DARK: (u8, u8, u8) = (17, 24, 39);
const TEXT_MUTED: (u8, u8, u8) = (107, 114, 128);
const TEXT_BODY: (u8, u8, u8) = (55, 65, 81);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(&self) -> &'static str {
        match self {
            Font::Regular => "F1",
            Font::Bold => "F2",
        }
    }
}

/// Encodes a report as a single-page PDF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReportExporter;

impl PdfReportExporter {
    pub fn new() -> Self {
        Self
    }

    fn content_stream(&self, document: &ReportDocument) -> Result<String, ExportError> {
        let page = document.page;
        let mut ops = ContentBuilder::new(page);

        ops.text(Font::Bold, TITLE_FONT_SIZE, TEXT_DARK, document.title.y, &document.title.text)?;
        ops.text(
            Font::Regular,
            SUBTITLE_FONT_SIZE,
            TEXT_MUTED,
            document.subtitle.y,
            &document.subtitle.text,
        )?;

        for section in &document.sections {
            ops.text(
                Font::Bold,
                HEADING_FONT_SIZE,
                section.color.rgb(),
                section.offset,
                section.heading,
            )?;
            ops.text(
                Font::Bold,
                SECTION_TITLE_FONT_SIZE,
                TEXT_DARK,
                section.title_y(),
                &section.title,
            )?;
            for (i, line) in section.lines.iter().enumerate() {
                ops.text(Font::Regular, BODY_FONT_SIZE, TEXT_BODY, section.line_y(i), line)?;
            }
        }

        ops.text(
            Font::Regular,
            DISCLAIMER_FONT_SIZE,
            TEXT_MUTED,
            document.disclaimer.y,
            &document.disclaimer.text,
        )?;

        Ok(ops.finish())
    }
}

impl ReportExporter for PdfReportExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn encode(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
        let content = self.content_stream(document)?;
        let (width, height) = (
            document.page.width * PT_PER_MM,
            document.page.height * PT_PER_MM,
        );

        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 4 0 R /F2 5 0 R >> >> /Contents 6 0 R >>",
                width, height
            ),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
                .to_string(),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>"
                .to_string(),
            format!(
                "<< /Length {} >>\nstream\n{}\nendstream",
                content.len(),
                content
            ),
        ];

        assemble(&objects)
    }
}

/// Lays out numbered objects, the cross-reference table and the trailer.
fn assemble(objects: &[String]) -> Result<Vec<u8>, ExportError> {
    let mut out = String::from("%PDF-1.4\n");
    let mut offsets = Vec::with_capacity(objects.len());

    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        write!(out, "{} 0 obj\n{}\nendobj\n", i + 1, body)?;
    }

    let xref_offset = out.len();
    write!(out, "xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1)?;
    for offset in offsets {
        write!(out, "{:010} 00000 n \n", offset)?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref_offset
    )?;

    Ok(out.into_bytes())
}

struct ContentBuilder {
    page: PageGeometry,
    ops: String,
}

impl ContentBuilder {
    fn new(page: PageGeometry) -> Self {
        Self {
            page,
            ops: String::new(),
        }
    }

    fn text(
        &mut self,
        font: Font,
        size: f32,
        color: (u8, u8, u8),
        y_mm: f32,
        text: &str,
    ) -> std::fmt::Result {
        let x = self.page.margin_x * PT_PER_MM;
        let y = (self.page.height - y_mm) * PT_PER_MM;
        let (r, g, b) = color;
        writeln!(
            self.ops,
            "BT /{} {} Tf {:.3} {:.3} {:.3} rg {:.2} {:.2} Td ({}) Tj ET",
            font.resource(),
            size,
            f32::from(r) / 255.0,
            f32::from(g) / 255.0,
            f32::from(b) / 255.0,
            x,
            y,
            escape_pdf_string(text)?
        )
    }

    fn finish(self) -> String {
        self.ops.trim_end().to_string()
    }
}

/// Escapes a string for a PDF literal in WinAnsi encoding. Characters with
/// no WinAnsi code point become `?`.
fn escape_pdf_string(text: &str) -> Result<String, std::fmt::Error> {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '(' | ')' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            ' '..='~' => out.push(c),
            '\u{a0}'..='\u{ff}' => write!(out, "\\{:03o}", c as u32)?,
            _ => match winansi_extra(c) {
                Some(code) => write!(out, "\\{:03o}", code)?,
                None => out.push('?'),
            },
        }
    }
    Ok(out)
}

fn winansi_extra(c: char) -> Option<u8> {
    let code = match c {
        '\u{2026}' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{20ac}' => 0x80,
        _ => return None,
    };
    Some(code)
}
