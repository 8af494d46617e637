//! Listing → download → extraction → scoring → ranking.
//!
//! Only a failed listing or invalid arguments abort a run. A document that
//! cannot be downloaded or read is recorded in
//! [`PipelineReport::skipped`] and the rest carry on.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};

use crate::extract::extract_text;
use crate::ranking::rank;
use crate::scoring::score;
use crate::source::{DocumentSource, HttpSource};
use crate::{
    Config, CoreError, DocumentLocation, ExtractedText, ExtractionFailure, PdfBackend,
    PipelineReport, RankRequest, RankedResult, RawDocument, ScoredDocument, SkipReason,
    SkippedDocument, validate_arguments,
};

/// Ranks the documents of a blob container by keyword density.
pub struct ResumeRanker {
    source: Arc<dyn DocumentSource>,
    backend: Arc<dyn PdfBackend>,
    config: Config,
}

impl ResumeRanker {
    /// Build a ranker that lists and downloads over HTTP.
    pub fn new(config: Config, backend: Arc<dyn PdfBackend>) -> Result<Self, CoreError> {
        let source = Arc::new(HttpSource::new(&config)?);
        Ok(Self::with_source(config, source, backend))
    }

    pub fn with_source(
        config: Config,
        source: Arc<dyn DocumentSource>,
        backend: Arc<dyn PdfBackend>,
    ) -> Self {
        Self {
            source,
            backend,
            config,
        }
    }

    /// Rank the documents listed at `listing_url` against `keywords` and
    /// return the best `required_count`.
    ///
    /// `threshold` is accepted but has no effect on the result.
    pub async fn process_resume_data(
        &self,
        keywords: &[String],
        required_count: i64,
        threshold: f64,
        listing_url: &str,
    ) -> Result<RankedResult, CoreError> {
        let request = RankRequest {
            keywords: keywords.to_vec(),
            required_count,
            threshold,
            listing_url: listing_url.to_string(),
        };
        Ok(self.run(&request).await?.ranked)
    }

    /// Run the whole pipeline and report skipped documents alongside the ranking.
    pub async fn run(&self, request: &RankRequest) -> Result<PipelineReport, CoreError> {
        request.validate()?;
        tracing::debug!(threshold = request.threshold, "threshold is not applied");

        let urls = self.source.list(&request.listing_url).await?;
        tracing::info!(
            url = %request.listing_url,
            documents = urls.len(),
            "listed documents"
        );

        let mut skipped = Vec::new();
        let mut supported = Vec::with_capacity(urls.len());
        for location in urls.iter().map(|url| DocumentLocation::from_url(url)) {
            if location.format.is_supported() {
                supported.push(location);
            } else {
                tracing::debug!(filename = %location.filename, "skipping unsupported format");
                skipped.push(SkippedDocument {
                    filename: location.filename,
                    url: Some(location.url),
                    reason: SkipReason::UnsupportedFormat,
                });
            }
        }

        // `buffered` yields in input order, so ties still rank in listing order.
        let outcomes: Vec<(DocumentLocation, Result<String, SkipReason>)> = stream::iter(supported)
            .map(|location| async move {
                let outcome = self.retrieve(&location).await;
                (location, outcome)
            })
            .buffered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let mut extracted = Vec::with_capacity(outcomes.len());
        for (location, outcome) in outcomes {
            match outcome {
                Ok(text) => extracted.push(ExtractedText {
                    filename: location.filename,
                    text: Some(text),
                }),
                Err(reason) => {
                    if matches!(reason, SkipReason::Extraction(_)) {
                        extracted.push(ExtractedText {
                            filename: location.filename.clone(),
                            text: None,
                        });
                    }
                    skipped.push(SkippedDocument {
                        filename: location.filename,
                        url: Some(location.url),
                        reason,
                    });
                }
            }
        }

        let scored = score_extracted(&extracted, &request.keywords);
        let ranked = rank(scored, request.required_count)?;
        tracing::info!(
            extracted = extracted.len(),
            skipped = skipped.len(),
            returned = ranked.len(),
            "ranking complete"
        );

        Ok(PipelineReport { ranked, skipped })
    }

    async fn retrieve(&self, location: &DocumentLocation) -> Result<String, SkipReason> {
        let bytes = self.source.fetch(&location.url).await.map_err(|e| {
            tracing::warn!(
                filename = %location.filename,
                error = %e,
                "failed to download document"
            );
            SkipReason::Fetch(e)
        })?;

        let raw = RawDocument {
            filename: location.filename.clone(),
            format: location.format,
            bytes,
        };

        // PDF parsing is CPU-bound and synchronous
        let backend = Arc::clone(&self.backend);
        let result = tokio::task::spawn_blocking(move || extract_text(&raw, backend.as_ref()))
            .await
            .unwrap_or_else(|e| Err(ExtractionFailure::Task(e.to_string())));

        result.map_err(|e| {
            log_extraction_failure(&location.filename, &e);
            SkipReason::Extraction(e)
        })
    }
}

/// Score every document that has text. Entries whose extraction failed are
/// left out here, and only here.
pub fn score_extracted<S: AsRef<str>>(
    extracted: &[ExtractedText],
    keywords: &[S],
) -> Vec<ScoredDocument> {
    extracted
        .iter()
        .filter_map(|doc| {
            doc.text.as_deref().map(|text| ScoredDocument {
                filename: doc.filename.clone(),
                score: score(text, keywords),
            })
        })
        .collect()
}

/// Rank documents that are already in memory, skipping the listing and
/// download steps.
pub fn rank_documents(
    documents: Vec<RawDocument>,
    keywords: &[String],
    required_count: i64,
    backend: &dyn PdfBackend,
) -> Result<PipelineReport, CoreError> {
    validate_arguments(keywords, required_count)?;

    let mut skipped = Vec::new();
    let mut extracted = Vec::with_capacity(documents.len());
    for raw in documents {
        if !raw.format.is_supported() {
            skipped.push(SkippedDocument {
                url: None,
                filename: raw.filename,
                reason: SkipReason::UnsupportedFormat,
            });
            continue;
        }

        match extract_text(&raw, backend) {
            Ok(text) => extracted.push(ExtractedText {
                filename: raw.filename,
                text: Some(text),
            }),
            Err(e) => {
                log_extraction_failure(&raw.filename, &e);
                extracted.push(ExtractedText {
                    filename: raw.filename.clone(),
                    text: None,
                });
                skipped.push(SkippedDocument {
                    url: None,
                    filename: raw.filename,
                    reason: SkipReason::Extraction(e),
                });
            }
        }
    }

    let ranked = rank(score_extracted(&extracted, keywords), required_count)?;
    Ok(PipelineReport { ranked, skipped })
}

fn log_extraction_failure(filename: &str, failure: &ExtractionFailure) {
    match failure {
        ExtractionFailure::EmptyContent => {
            tracing::warn!(filename, "content is empty, skipping document");
        }
        other => {
            tracing::warn!(filename, error = %other, "failed to extract text");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendError, DocumentFormat};

    struct Utf8Pdf;

    impl PdfBackend for Utf8Pdf {
        fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, BackendError> {
            String::from_utf8(bytes.to_vec())
                .map(|page| vec![page])
                .map_err(|e| BackendError::OpenError(e.to_string()))
        }
    }

    fn raw(filename: &str, bytes: &[u8]) -> RawDocument {
        RawDocument {
            filename: filename.to_string(),
            format: DocumentFormat::from_filename(filename),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn absent_text_is_not_scored() {
        let extracted = vec![
            ExtractedText {
                filename: "empty.docx".into(),
                text: Some(String::new()),
            },
            ExtractedText {
                filename: "broken.pdf".into(),
                text: None,
            },
            ExtractedText {
                filename: "good.pdf".into(),
                text: Some("rust".into()),
            },
        ];

        let scored = score_extracted(&extracted, &["rust"]);
        assert_eq!(
            scored,
            vec![
                ScoredDocument {
                    filename: "empty.docx".into(),
                    score: 0.0,
                },
                ScoredDocument {
                    filename: "good.pdf".into(),
                    score: 0.5,
                },
            ]
        );
    }

    #[test]
    fn rank_documents_skips_and_scores() {
        let docs = vec![
            raw("a.pdf", b"rust engineer"),
            raw("notes.txt", b"rust rust rust"),
            raw("blank.pdf", b"   "),
            raw("b.pdf", b"rust rust engineer engineer"),
        ];
        let keywords = vec!["rust".to_string(), "engineer".to_string()];

        let report = rank_documents(docs, &keywords, 5, &Utf8Pdf).unwrap();

        let names: Vec<_> = report.ranked.iter().map(|d| d.filename.as_str()).collect();
        assert_eq!(names, vec!["b.pdf", "a.pdf"]);
        assert_eq!(report.skipped.len(), 2);
        assert_eq!(report.failure_count(), 1);
        assert!(matches!(
            report.skipped[1].reason,
            SkipReason::Extraction(ExtractionFailure::EmptyContent)
        ));
        assert!(report.skipped.iter().all(|s| s.url.is_none()));
    }

    #[test]
    fn rank_documents_validates_arguments() {
        let keywords = vec!["rust".to_string()];
        assert!(matches!(
            rank_documents(vec![], &keywords, -3, &Utf8Pdf),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(rank_documents(vec![], &[], 3, &Utf8Pdf).is_err());
    }
}
