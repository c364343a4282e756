//! Turns a saved agency review page into the website's review feed.
//!
//! The page is parsed into a tree once; cards are selected by their
//! structural marker and each one is either accepted as a [`ReviewCard`]
//! or skipped with a [`RejectionReason`]. Skips are silent unless the
//! extractor was built with diagnostics enabled.

mod card;
mod document;
mod fields;
mod markup;
pub mod render;

pub use card::{CardRejection, RejectionReason, ReviewCard, ReviewerRole, FIVE_STAR_RATING};
pub use markup::ReviewMarkup;

use crate::config::{ReviewSourceConfig, DEFAULT_FALLBACK_LOCATION};
use markup::CompiledMarkup;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("failed to read review page from {origin}: {source}")]
    Read {
        origin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("review page from {origin} is not valid UTF-8: {source}")]
    Decode {
        origin: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
    #[error("invalid review markup selector {0}")]
    Selector(String),
}

/// Knobs for a single extractor instance.
#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    pub markup: ReviewMarkup,
    pub fallback_location: String,
    /// Record why each skipped card was skipped.
    pub diagnostics: bool,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            markup: ReviewMarkup::default(),
            fallback_location: DEFAULT_FALLBACK_LOCATION.to_string(),
            diagnostics: false,
        }
    }
}

impl ExtractorOptions {
    pub fn from_config(config: &ReviewSourceConfig) -> Self {
        Self {
            fallback_location: config.fallback_location.clone(),
            ..Self::default()
        }
    }

    pub fn with_diagnostics(mut self, enabled: bool) -> Self {
        self.diagnostics = enabled;
        self
    }
}

/// Result of one extraction run.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    pub reviews: Vec<ReviewCard>,
    pub cards_seen: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub rejections: Vec<CardRejection>,
}

impl ExtractionReport {
    pub fn total(&self) -> usize {
        self.reviews.len()
    }
}

#[derive(Debug, Clone)]
pub struct ReviewExtractor {
    markup: CompiledMarkup,
    options: ExtractorOptions,
}

impl ReviewExtractor {
    pub fn new(options: ExtractorOptions) -> Result<Self, ExtractError> {
        let markup = options.markup.compile()?;
        Ok(Self { markup, options })
    }

    /// Reads the whole file before parsing; a missing or undecodable file is an error,
    /// never an empty feed.
    pub fn extract_path<P: AsRef<Path>>(&self, path: P) -> Result<ExtractionReport, ExtractError> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|source| ExtractError::Read {
            origin: origin.clone(),
            source,
        })?;
        self.extract_bytes(bytes, origin)
    }

    pub fn extract_reader<R: Read>(
        &self,
        mut reader: R,
        origin: &str,
    ) -> Result<ExtractionReport, ExtractError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|source| ExtractError::Read {
                origin: origin.to_string(),
                source,
            })?;
        self.extract_bytes(bytes, origin.to_string())
    }

    pub fn extract_html(&self, html: &str) -> ExtractionReport {
        let outcomes =
            document::card_outcomes(html, &self.markup, &self.options.fallback_location);
        let cards_seen = outcomes.len();

        let mut drafts = Vec::with_capacity(cards_seen);
        let mut rejections = Vec::new();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(draft) => drafts.push(draft),
                Err(reason) if self.options.diagnostics => rejections.push(CardRejection {
                    position: index + 1,
                    reason,
                }),
                Err(_) => {}
            }
        }

        let reviews: Vec<ReviewCard> = drafts
            .into_iter()
            .zip(1u32..)
            .map(|(draft, id)| draft.into_review(id))
            .collect();

        info!(
            cards_seen,
            accepted = reviews.len(),
            skipped = cards_seen - reviews.len(),
            "review extraction finished"
        );

        ExtractionReport {
            reviews,
            cards_seen,
            rejections,
        }
    }

    fn extract_bytes(&self, bytes: Vec<u8>, origin: String) -> Result<ExtractionReport, ExtractError> {
        let html = String::from_utf8(bytes).map_err(|source| ExtractError::Decode { origin, source })?;
        Ok(self.extract_html(&html))
    }
}
