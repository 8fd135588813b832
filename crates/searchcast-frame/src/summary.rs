//! Wikipedia summary lookups.
//!
//! Queries the MediaWiki `action=query` API for the plain-text intro of a
//! page and reduces it to a short display string: at most two sentences and
//! at most [`MAX_SUMMARY_CHARS`] characters.
//!
//! Lookups never fail past this module. Every failure mode becomes a
//! [`SummaryOutcome`] variant so the frame controller can branch on a
//! structured result instead of inspecting the display text.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::error::FrameError;

/// Longest display string, in characters, including the ellipsis.
pub const MAX_SUMMARY_CHARS: usize = 250;

/// Number of sentences kept from an extract.
const MAX_SENTENCES: usize = 2;

/// Delimiter used to split an extract into sentences.
const SENTENCE_DELIMITER: &str = ". ";

/// Appended when a summary is cut at [`MAX_SUMMARY_CHARS`].
const ELLIPSIS: &str = "...";

/// Sent with every upstream request, as Wikimedia's API etiquette asks.
const USER_AGENT: &str = concat!("searchcast-frame/", env!("CARGO_PKG_VERSION"));

/// Result of a summary lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// A summary was found and shortened for display.
    Found(String),
    /// The search term was empty or whitespace; no request was made.
    EmptyInput,
    /// The API has no page, or no extract, for the term.
    NotFound {
        /// The (trimmed) term that was searched for.
        term: String,
    },
    /// The API could not be reached or returned something unusable.
    UpstreamError,
}

impl SummaryOutcome {
    /// Text to render into the frame image.
    pub fn display_text(&self) -> String {
        match self {
            Self::Found(summary) => summary.clone(),
            Self::EmptyInput => "Please enter a search term.".to_string(),
            Self::NotFound { term } => format!("Sorry, no results found for \"{term}\"."),
            Self::UpstreamError => "Error connecting to Wikipedia.".to_string(),
        }
    }

    /// Whether the frame image should use the error palette.
    pub fn is_error(&self) -> bool {
        !matches!(self, Self::Found(_))
    }

    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Found(_) => "found",
            Self::EmptyInput => "empty_input",
            Self::NotFound { .. } => "not_found",
            Self::UpstreamError => "upstream_error",
        }
    }
}

/// Failures talking to the MediaWiki API.
#[derive(Debug, thiserror::Error)]
enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(reqwest::StatusCode),

    #[error("response has no query object")]
    MissingQuery,
}

/// Top-level `action=query` response.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    query: Option<QueryBody>,
}

#[derive(Debug, Deserialize)]
struct QueryBody {
    /// Pages keyed by page ID; missing titles get negative IDs (`"-1"`, ...).
    #[serde(default)]
    pages: BTreeMap<String, WikiPage>,
}

#[derive(Debug, Deserialize)]
struct WikiPage {
    #[serde(default)]
    extract: Option<String>,
    /// Present (as an empty string) when the title does not exist.
    #[serde(default)]
    missing: Option<serde_json::Value>,
}

/// Client for Wikipedia intro extracts.
///
/// Cheap to clone; the underlying `reqwest::Client` pools connections.
#[derive(Debug, Clone)]
pub struct SummaryClient {
    http: reqwest::Client,
    api_url: String,
}

impl SummaryClient {
    /// Create a client for the given `api.php` endpoint.
    ///
    /// Every request is bounded by `timeout`.
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Result<Self, FrameError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FrameError::Internal(anyhow::anyhow!("HTTP client build error: {e}")))?;

        Ok(Self {
            http,
            api_url: api_url.into(),
        })
    }

    /// Look up a term and return its shortened summary.
    pub async fn summarize(&self, term: &str) -> SummaryOutcome {
        let term = term.trim();
        if term.is_empty() {
            return SummaryOutcome::EmptyInput;
        }

        match self.fetch_extract(term).await {
            Ok(Some(extract)) => {
                let summary = summarize_extract(&extract);
                if summary.trim().is_empty() {
                    SummaryOutcome::NotFound {
                        term: term.to_string(),
                    }
                } else {
                    SummaryOutcome::Found(summary)
                }
            }
            Ok(None) => SummaryOutcome::NotFound {
                term: term.to_string(),
            },
            Err(err) => {
                tracing::warn!(term = %term, error = %err, "wikipedia lookup failed");
                SummaryOutcome::UpstreamError
            }
        }
    }

    /// Fetch the intro extract of the page titled `term`, following redirects.
    ///
    /// Returns `Ok(None)` when the page does not exist or has no extract.
    async fn fetch_extract(&self, term: &str) -> Result<Option<String>, FetchError> {
        tracing::debug!(term = %term, "querying wikipedia");

        let resp = self
            .http
            .get(&self.api_url)
            .query(&[
                ("action", "query"),
                ("format", "json"),
                ("prop", "extracts"),
                ("exintro", "true"),
                ("explaintext", "true"),
                ("redirects", "1"),
                ("titles", term),
            ])
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(FetchError::Status(resp.status()));
        }

        let body: QueryResponse = resp.json().await?;
        let query = body.query.ok_or(FetchError::MissingQuery)?;

        // A `|` in the term asks for several titles. Missing ones get
        // negative IDs, which sort first.
        let page = query
            .pages
            .into_iter()
            .find(|(page_id, page)| !page_id.starts_with('-') && page.missing.is_none());

        Ok(page
            .and_then(|(_, page)| page.extract)
            .filter(|e| !e.trim().is_empty()))
    }
}

/// Reduce an extract to its first two sentences, capped at
/// [`MAX_SUMMARY_CHARS`] characters.
///
/// Sentences are split on `". "`; empty fragments are dropped. When more than
/// one sentence exists the result is terminated with a period.
pub fn summarize_extract(extract: &str) -> String {
    let sentences: Vec<&str> = extract
        .split(SENTENCE_DELIMITER)
        .filter(|s| !s.trim().is_empty())
        .collect();

    let mut summary = sentences
        .iter()
        .take(MAX_SENTENCES)
        .copied()
        .collect::<Vec<_>>()
        .join(SENTENCE_DELIMITER);

    if sentences.len() > 1 && !summary.ends_with('.') {
        summary.push('.');
    }

    truncate_chars(&summary, MAX_SUMMARY_CHARS)
}

/// Truncate to at most `max_chars` characters, replacing the tail with
/// `"..."` when anything is cut. The result is exactly `max_chars` long in
/// that case.
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }

    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(ELLIPSIS);
    out
}
