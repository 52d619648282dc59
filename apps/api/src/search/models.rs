use serde::{Deserialize, Serialize};

use crate::models::candidate::CandidateRecord;

/// Short explanation attached to every match score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchReason {
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

impl MatchReason {
    pub fn new<P, C>(pros: P, cons: C) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            pros: pros.into_iter().map(Into::into).collect(),
            cons: cons.into_iter().map(Into::into).collect(),
        }
    }
}

/// Which scoring path produced a match result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisSource {
    /// Scored by the text-completion backend.
    Ai,
    /// Scored by the local keyword heuristic.
    Fallback,
    /// The backend answered but left this candidate out.
    Default,
}

/// Score and reasoning for one candidate. Transient, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub candidate_id: String,
    pub match_score: u8, // 0 – 100
    pub match_reason: MatchReason,
    pub source: AnalysisSource,
}

/// Candidate record augmented with its match analysis. The only thing ranking returns.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    #[serde(flatten)]
    pub candidate: CandidateRecord,
    pub match_score: u8,
    pub match_reason: MatchReason,
    pub analysis_source: AnalysisSource,
}

impl RankedCandidate {
    pub fn new(candidate: CandidateRecord, result: MatchResult) -> Self {
        Self {
            candidate,
            match_score: result.match_score,
            match_reason: result.match_reason,
            analysis_source: result.source,
        }
    }
}

/// Clamps an arbitrary backend score into 0 – 100.
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}
