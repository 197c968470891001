use std::io::Cursor;

use docx_rs::{AlignmentType, BreakType, Docx, Paragraph, Run, RunFonts, Style, StyleType};

use crate::error::ExportError;
use crate::styles::DocumentStyles;

/// Generate a DOCX document from rendered Markdown-ish template output.
///
/// Supported subset: `#`/`##`/`###` headings, `- ` bullets, `**bold**`
/// inline runs, `---` page breaks. Everything else becomes a normal
/// paragraph.
pub fn generate_docx(rendered: &str, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size));

    for line in rendered.lines() {
        docx = docx.add_paragraph(paragraph_for_line(line.trim(), styles));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn paragraph_for_line(line: &str, styles: &DocumentStyles) -> Paragraph {
    if line.is_empty() {
        return Paragraph::new();
    }
    if line == "---" {
        return Paragraph::new().add_run(Run::new().add_break(BreakType::Page));
    }
    if let Some(text) = line.strip_prefix("### ") {
        return heading_paragraph(text, "Heading3");
    }
    if let Some(text) = line.strip_prefix("## ") {
        return heading_paragraph(text, "Heading2");
    }
    if let Some(text) = line.strip_prefix("# ") {
        return heading_paragraph(text, "Heading1");
    }
    if let Some(text) = line.strip_prefix("- ") {
        let mut para = Paragraph::new().align(AlignmentType::Left).add_run(
            Run::new()
                .add_text("\u{2022} ")
                .fonts(RunFonts::new().ascii(&styles.body_font)),
        );
        for run in inline_runs(text, styles) {
            para = para.add_run(run);
        }
        return para;
    }

    let mut para = Paragraph::new().align(AlignmentType::Left);
    for run in inline_runs(line, styles) {
        para = para.add_run(run);
    }
    para
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    // OOXML sizes are half-points.
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2)
}

fn heading_paragraph(text: &str, style_id: &str) -> Paragraph {
    Paragraph::new()
        .style(style_id)
        .add_run(Run::new().add_text(text))
}

/// Split a line on `**` markers into alternating normal/bold runs.
fn inline_runs(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    for (i, segment) in text.split("**").enumerate() {
        if segment.is_empty() {
            continue;
        }
        let mut run = Run::new()
            .add_text(segment)
            .fonts(RunFonts::new().ascii(&styles.body_font));
        if i % 2 == 1 {
            run = run.bold();
        }
        runs.push(run);
    }
    runs
}
