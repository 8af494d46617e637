//! Document format inference from blob URLs.

/// Formats the extractor understands. Everything else is `Unknown` and is
/// skipped without being downloaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Unknown,
}

impl DocumentFormat {
    /// Infer the format from a filename's trailing extension (ASCII case-insensitive).
    pub fn from_filename(filename: &str) -> Self {
        let lower = filename.to_ascii_lowercase();
        if lower.ends_with(".pdf") {
            DocumentFormat::Pdf
        } else if lower.ends_with(".docx") {
            DocumentFormat::Docx
        } else {
            DocumentFormat::Unknown
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, DocumentFormat::Unknown)
    }
}

/// Where a listed document lives and what we expect to find there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLocation {
    pub url: String,
    pub filename: String,
    pub format: DocumentFormat,
}

impl DocumentLocation {
    pub fn from_url(url: &str) -> Self {
        let filename = filename_from_url(url).to_string();
        let format = DocumentFormat::from_filename(&filename);
        Self {
            url: url.to_string(),
            filename,
            format,
        }
    }
}

/// Last `/`-separated path segment, with any query string or fragment dropped.
///
/// `https://acct/c/cv.pdf?sv=2024&sig=..` → `cv.pdf`. A URL ending in `/`
/// yields an empty name.
pub fn filename_from_url(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..end];
    path.rsplit('/').next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_filename("cv.pdf"), DocumentFormat::Pdf);
        assert_eq!(DocumentFormat::from_filename("CV.PDF"), DocumentFormat::Pdf);
        assert_eq!(
            DocumentFormat::from_filename("resume.docx"),
            DocumentFormat::Docx
        );
        assert_eq!(
            DocumentFormat::from_filename("resume.doc"),
            DocumentFormat::Unknown
        );
        assert_eq!(
            DocumentFormat::from_filename("notes.txt"),
            DocumentFormat::Unknown
        );
        assert_eq!(
            DocumentFormat::from_filename("pdf"),
            DocumentFormat::Unknown
        );
        assert_eq!(DocumentFormat::from_filename(""), DocumentFormat::Unknown);
    }

    #[test]
    fn test_only_trailing_extension_counts() {
        assert_eq!(
            DocumentFormat::from_filename("cv.pdf.txt"),
            DocumentFormat::Unknown
        );
        assert_eq!(
            DocumentFormat::from_filename("cv.txt.pdf"),
            DocumentFormat::Pdf
        );
    }

    #[test]
    fn test_filename_from_url() {
        assert_eq!(
            filename_from_url("https://acct.blob.core.windows.net/resumes/alice.pdf"),
            "alice.pdf"
        );
        assert_eq!(
            filename_from_url("https://acct/resumes/bob.docx?sv=2024&sig=abc%2F"),
            "bob.docx"
        );
        assert_eq!(
            filename_from_url("https://acct/resumes/c.pdf#page=2"),
            "c.pdf"
        );
        assert_eq!(filename_from_url("https://acct/resumes/"), "");
        assert_eq!(filename_from_url("plain.pdf"), "plain.pdf");
    }

    #[test]
    fn test_location_from_url() {
        let loc = DocumentLocation::from_url("https://h/c/dir/jane.docx?sig=x");
        assert_eq!(loc.filename, "jane.docx");
        assert_eq!(loc.format, DocumentFormat::Docx);
        assert_eq!(loc.url, "https://h/c/dir/jane.docx?sig=x");
        assert!(loc.format.is_supported());

        let loc = DocumentLocation::from_url("https://h/c/readme.txt");
        assert!(!loc.format.is_supported());
    }
}
