//! # PDF Generation Module
//!
//! Renders an [`EstimateReport`] to PDF using Typst.
//!
//! ## Architecture
//!
//! - One Typst template embedded as a string constant
//! - Data is injected via placeholder replacement before compilation
//! - The cost breakdown chart and cathedral cross-sections are drawn with
//!   Typst shapes, so no image pipeline is needed
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use insul_core::calculations::EstimateInput;
//! use insul_core::job::EstimateJob;
//! use insul_core::materials::MaterialCatalog;
//! use insul_core::pdf::render_estimate_pdf;
//!
//! let job = EstimateJob::new("Sam", "26-001", "Client", EstimateInput::sample());
//! let report = job.run(&MaterialCatalog::standard()).unwrap();
//! let pdf_bytes = render_estimate_pdf(&report, &job.meta).unwrap();
//! std::fs::write("estimate_output.pdf", pdf_bytes).unwrap();
//! ```

use std::path::Path;

use chrono::{Datelike, Utc};
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::errors::{EstimateError, EstimateResult};
use crate::file_io::write_artifact;
use crate::job::JobMetadata;
use crate::report::{CostBreakdown, CrossSection, EstimateReport};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Fonts bundled with typst-assets (Libertinus Serif, DejaVu Sans Mono, ...)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(now.year(), u8::try_from(now.month()).ok()?, u8::try_from(now.day()).ok()?)
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Widest a cross-section diagram may be drawn (pt)
const DIAGRAM_MAX_WIDTH_PT: f64 = 300.0;

/// Tallest a cross-section diagram may be drawn (pt)
const DIAGRAM_MAX_HEIGHT_PT: f64 = 150.0;

const BAR_COLOR: &str = "#4a7bb7";

/// Typst template for the estimate report
const ESTIMATE_TEMPLATE: &str = r##"
#set page(
  paper: "us-letter",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[Insulation Estimate]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Job: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)
#show raw: set text(font: "DejaVu Sans Mono", size: 9.5pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Insulation Estimator Report]
  ]
]

#v(12pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [*Estimator:*], [{{ESTIMATOR}}],
  [*Client:*], [{{CLIENT}}],
  [*Job ID:*], [{{JOB_ID}}],
  [*Date:*], [{{DATE}}],
)

#v(8pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Summary

#raw(block: true, "{{SUMMARY}}")

#v(12pt)

== Cost Breakdown

#table(
  columns: (auto, 1fr, auto),
  inset: 6pt,
  stroke: none,
  align: (left, left + horizon, right),
{{CHART_ROWS}}
)

{{DIAGRAMS}}

#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Prices include 5% tax and a 10% contingency where noted. \
  Bag counts are rounded up per surface; cathedral coverage includes a 10% cut-waste allowance.
]
"##;

// ============================================================================
// PDF Rendering Functions
// ============================================================================

/// Render an estimate report to PDF.
///
/// # Arguments
///
/// * `report` - The finished estimate
/// * `meta` - Job metadata for the title block
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(EstimateError::RenderFailed)` - If compilation or export fails
pub fn render_estimate_pdf(report: &EstimateReport, meta: &JobMetadata) -> EstimateResult<Vec<u8>> {
    let source = ESTIMATE_TEMPLATE
        .replace("{{ESTIMATOR}}", &escape_typst(&meta.estimator))
        .replace("{{CLIENT}}", &escape_typst(&meta.client))
        .replace("{{JOB_ID}}", &escape_typst(&meta.job_id))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace("{{SUMMARY}}", &typst_string_body(&report.summary_text()))
        .replace("{{CHART_ROWS}}", &build_chart_rows(&report.cost_breakdown))
        .replace("{{DIAGRAMS}}", &build_diagrams(&report.cross_sections()));

    compile_pdf(source)
}

/// Render and write the PDF for `report` to `path` (atomic write)
pub fn export_pdf(report: &EstimateReport, meta: &JobMetadata, path: &Path) -> EstimateResult<()> {
    let bytes = render_estimate_pdf(report, meta)?;
    write_artifact(path, &bytes)
}

fn compile_pdf(source: String) -> EstimateResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::RenderFailed {
            reason: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::RenderFailed {
            reason: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    tracing::debug!(bytes = pdf_bytes.len(), "rendered estimate pdf");
    Ok(pdf_bytes)
}

/// Escape special Typst characters in user-provided markup text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            '/' => "\\/".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Escape text for the inside of a Typst string literal
fn typst_string_body(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out
}

/// Horizontal bar chart rows: label, bar scaled to the largest amount, amount
fn build_chart_rows(breakdown: &CostBreakdown) -> String {
    let max = breakdown.max_amount().0;
    breakdown
        .iter()
        .map(|line| {
            let percent = if max > 0.0 { line.amount.0 / max * 100.0 } else { 0.0 };
            format!(
                "  [{}], [#box(width: {:.1}%, height: 10pt, fill: rgb(\"{}\"))], [{}],",
                escape_typst(&line.label),
                percent,
                BAR_COLOR,
                escape_typst(&line.amount.to_string()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One gable outline per cathedral section, scaled to fit the diagram box
fn build_diagrams(sections: &[CrossSection]) -> String {
    if sections.is_empty() {
        return String::new();
    }

    let mut out = String::from("#v(12pt)\n\n== Cathedral Cross-Sections\n\n");
    for (i, section) in sections.iter().enumerate() {
        let caption = format!(
            "Section {}: {:.1} ft base width, {:.1} ft height above wall",
            i + 1,
            section.base_width_ft,
            section.rise_ft
        );

        let width_scale = if section.base_width_ft > 0.0 {
            DIAGRAM_MAX_WIDTH_PT / section.base_width_ft
        } else {
            f64::INFINITY
        };
        let height_scale = if section.rise_ft > 0.0 {
            DIAGRAM_MAX_HEIGHT_PT / section.rise_ft
        } else {
            f64::INFINITY
        };
        let scale = width_scale.min(height_scale);

        if !scale.is_finite() {
            out.push_str(&format!("#figure(caption: [{}])[_No geometry_]\n\n", caption));
            continue;
        }

        let points: Vec<String> = section
            .profile_points()
            .iter()
            .map(|(x, y)| {
                // Typst's y axis points down
                format!("({:.1}pt, {:.1}pt)", x * scale, (section.rise_ft - y) * scale)
            })
            .collect();

        out.push_str(&format!(
            "#figure(caption: [{}])[\n  #box(width: {:.1}pt, height: {:.1}pt)[\n    #place(polygon(stroke: 1.5pt + rgb(\"{}\"), {}))\n  ]\n]\n\n",
            caption,
            section.base_width_ft * scale,
            section.rise_ft * scale,
            BAR_COLOR,
            points.join(", "),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::area::CathedralSection;
    use crate::calculations::EstimateInput;
    use crate::job::EstimateJob;
    use crate::materials::MaterialCatalog;

    fn sample_job() -> EstimateJob {
        let mut input = EstimateInput::sample();
        input.cathedral.sections.push(CathedralSection::new(12.0, 16.0, 0.0));
        EstimateJob::new("Test Estimator", "TEST-001", "R&D <Homes> #1", input)
    }

    #[test]
    fn test_pdf_generation() {
        let job = sample_job();
        let report = job.run(&MaterialCatalog::standard()).unwrap();
        let pdf = render_estimate_pdf(&report, &job.meta);

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join(crate::report::DEFAULT_ARTIFACT_NAME);
        let job = sample_job();
        let report = job.run(&MaterialCatalog::standard()).unwrap();

        export_pdf(&report, &job.meta, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_string_body_escaping() {
        assert_eq!(typst_string_body("a \"b\"\nc\\d"), "a \\\"b\\\"\\nc\\\\d");
    }

    #[test]
    fn test_escape_markup() {
        assert_eq!(escape_typst("$200.00"), "\\$200.00");
        assert_eq!(escape_typst("#1 [x]"), "\\#1 \\[x\\]");
        assert_eq!(escape_typst("26/014//B"), "26\\/014\\/\\/B");
    }

    #[test]
    fn test_comment_markers_in_metadata_render() {
        let input = EstimateInput::sample();
        let job = EstimateJob::new("a/*b", "26/014//B", "smith.example.com//reno", input);
        let report = job.run(&MaterialCatalog::standard()).unwrap();

        let pdf = render_estimate_pdf(&report, &job.meta);
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());
    }

    #[test]
    fn test_chart_rows_scale_to_largest() {
        let job = sample_job();
        let report = job.run(&MaterialCatalog::standard()).unwrap();
        let rows = build_chart_rows(&report.cost_breakdown);
        assert_eq!(rows.lines().count(), 7);
        assert!(rows.contains("100.0%"));
        assert!(rows.starts_with("  [Wall Mat]"));
    }

    #[test]
    fn test_diagrams_per_section() {
        let sections = [
            CrossSection {
                base_width_ft: 24.0,
                rise_ft: 8.0,
            },
            CrossSection {
                base_width_ft: 0.0,
                rise_ft: 0.0,
            },
        ];
        let typst = build_diagrams(&sections);
        assert_eq!(typst.matches("#figure").count(), 2);
        // 24 ft fits the width: scale 12.5 pt/ft, ridge at (150, 0)
        assert!(typst.contains("(150.0pt, 0.0pt)"));
        assert!(typst.contains("_No geometry_"));
        assert!(build_diagrams(&[]).is_empty());
    }
}
