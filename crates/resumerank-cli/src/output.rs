use std::io::Write;

use owo_colors::OwoColorize;
use resumerank_core::{PipelineReport, ScoredDocument, SkipReason};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

/// Print the ranking in the same plain-text layout the HTTP handler returns.
pub fn print_ranked(
    w: &mut dyn Write,
    ranked: &[ScoredDocument],
    color: ColorMode,
) -> std::io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Result:")?;
    for doc in ranked {
        if color.enabled() {
            writeln!(
                w,
                "File: {}, Keyword accuracy: {}",
                doc.filename.bold(),
                doc.score.green()
            )?;
        } else {
            writeln!(w, "File: {}, Keyword accuracy: {}", doc.filename, doc.score)?;
        }
    }
    Ok(())
}

/// Print the ranking as a JSON array of `{filename, score}` objects.
pub fn print_json(w: &mut dyn Write, ranked: &[ScoredDocument]) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *w, ranked)?;
    writeln!(w)
}

/// Print which documents were left out and why.
pub fn print_skip_summary(
    w: &mut dyn Write,
    report: &PipelineReport,
    color: ColorMode,
) -> std::io::Result<()> {
    if report.skipped.is_empty() {
        return Ok(());
    }

    let failed = report.failure_count();
    let unsupported = report.skipped.len() - failed;
    let summary = format!("(Skipped {} unsupported, {} failed)", unsupported, failed);
    if color.enabled() {
        writeln!(w, "{}", summary.dimmed())?;
    } else {
        writeln!(w, "{}", summary)?;
    }

    for skipped in &report.skipped {
        let reason = match &skipped.reason {
            SkipReason::UnsupportedFormat => continue,
            SkipReason::Fetch(e) => format!("download failed: {}", e),
            SkipReason::Extraction(e) => e.to_string(),
        };
        if color.enabled() {
            writeln!(w, "  {} {}", skipped.filename.yellow(), reason.dimmed())?;
        } else {
            writeln!(w, "  {} {}", skipped.filename, reason)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use resumerank_core::{ExtractionFailure, FetchError, SkippedDocument};

    fn doc(filename: &str, score: f64) -> ScoredDocument {
        ScoredDocument {
            filename: filename.into(),
            score,
        }
    }

    #[test]
    fn plain_result_layout() {
        let mut out = Vec::new();
        print_ranked(
            &mut out,
            &[doc("a.pdf", 0.4), doc("b.docx", 0.0)],
            ColorMode(false),
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nResult:\nFile: a.pdf, Keyword accuracy: 0.4\nFile: b.docx, Keyword accuracy: 0\n"
        );
    }

    #[test]
    fn json_layout() {
        let mut out = Vec::new();
        print_json(&mut out, &[doc("a.pdf", 0.5)]).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["filename"], "a.pdf");
        assert_eq!(value[0]["score"], 0.5);
    }

    #[test]
    fn skip_summary_lists_failures_only() {
        let report = PipelineReport {
            ranked: vec![],
            skipped: vec![
                SkippedDocument {
                    filename: "notes.txt".into(),
                    url: Some("https://h/c/notes.txt".into()),
                    reason: SkipReason::UnsupportedFormat,
                },
                SkippedDocument {
                    filename: "gone.pdf".into(),
                    url: Some("https://h/c/gone.pdf".into()),
                    reason: SkipReason::Fetch(FetchError::Status(404)),
                },
                SkippedDocument {
                    filename: "scan.pdf".into(),
                    url: Some("https://h/c/scan.pdf".into()),
                    reason: SkipReason::Extraction(ExtractionFailure::EmptyContent),
                },
            ],
        };

        let mut out = Vec::new();
        print_skip_summary(&mut out, &report, ColorMode(false)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("(Skipped 1 unsupported, 2 failed)\n"));
        assert!(text.contains("  gone.pdf download failed: HTTP 404\n"));
        assert!(text.contains("  scan.pdf document has no text content\n"));
        assert!(!text.contains("notes.txt"));
    }

    #[test]
    fn nothing_skipped_prints_nothing() {
        let mut out = Vec::new();
        print_skip_summary(&mut out, &PipelineReport::default(), ColorMode(false)).unwrap();
        assert!(out.is_empty());
    }
}
