//! Best-effort recovery of a JSON object from free-form model output.
//!
//! Models tend to wrap JSON in markdown fences or surround it with prose.
//! The extractors below are tried in order and the first match wins; when
//! none match, the whole reply is used. This is a heuristic, not a parser:
//! nested fences, several JSON objects, or stray braces in surrounding prose
//! can all lead to the wrong span being picked.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

static LABELED_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\r?\n.*?\r?\n```").expect("valid regex"));

static UNLABELED_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```\r?\n.*?\r?\n```").expect("valid regex"));

// Greedy: spans from the first `{` to the last `}` in the text.
static BRACE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("valid regex"));

static FENCE_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\r?\n|```\r?\n|```").expect("valid regex"));

/// Which rule produced a candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    LabeledFence,
    UnlabeledFence,
    BraceSpan,
    Raw,
}

/// Text most likely to hold the JSON payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub text: String,
    pub source: CandidateSource,
}

/// One rule for locating JSON inside a model reply
pub trait CandidateExtractor: Send + Sync {
    fn source(&self) -> CandidateSource;

    /// The matched span, fence markers included
    fn find<'a>(&self, raw: &'a str) -> Option<&'a str>;
}

/// A fenced block explicitly labeled as JSON
pub struct LabeledFenceExtractor;

/// Any fenced block without a language label
pub struct UnlabeledFenceExtractor;

/// Everything from the first `{` to the last `}`
pub struct BraceSpanExtractor;

impl CandidateExtractor for LabeledFenceExtractor {
    fn source(&self) -> CandidateSource {
        CandidateSource::LabeledFence
    }

    fn find<'a>(&self, raw: &'a str) -> Option<&'a str> {
        LABELED_FENCE.find(raw).map(|m| m.as_str())
    }
}

impl CandidateExtractor for UnlabeledFenceExtractor {
    fn source(&self) -> CandidateSource {
        CandidateSource::UnlabeledFence
    }

    fn find<'a>(&self, raw: &'a str) -> Option<&'a str> {
        UNLABELED_FENCE.find(raw).map(|m| m.as_str())
    }
}

impl CandidateExtractor for BraceSpanExtractor {
    fn source(&self) -> CandidateSource {
        CandidateSource::BraceSpan
    }

    fn find<'a>(&self, raw: &'a str) -> Option<&'a str> {
        BRACE_SPAN.find(raw).map(|m| m.as_str())
    }
}

/// Extractors in precedence order
pub fn default_extractors() -> [&'static dyn CandidateExtractor; 3] {
    [
        &LabeledFenceExtractor,
        &UnlabeledFenceExtractor,
        &BraceSpanExtractor,
    ]
}

/// Pick the substring of `raw` most likely to be the JSON object.
///
/// Never fails: with no match the trimmed raw text is returned so the caller
/// can still attempt to parse it.
pub fn extract_candidate(raw: &str) -> Candidate {
    let (span, source) = default_extractors()
        .iter()
        .find_map(|extractor| extractor.find(raw).map(|span| (span, extractor.source())))
        .unwrap_or((raw, CandidateSource::Raw));

    debug!("Selected JSON candidate via {:?}", source);

    Candidate {
        text: strip_fence_markers(span),
        source,
    }
}

/// Remove every fence marker and surrounding whitespace
pub fn strip_fence_markers(text: &str) -> String {
    FENCE_MARKERS.replace_all(text, "").trim().to_string()
}
