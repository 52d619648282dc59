//! Keyword-overlap heuristic used whenever backend scoring is unavailable.
//!
//! Pure function of (query, candidate): no I/O, no randomness, never fails.
//!
//! score = 60
//!       + 10 per skill found in the query (max +30)
//!       + 15 if the position is found in the query
//!       + 5  if a resume is on file
//! capped at 95.

use crate::models::candidate::CandidateRecord;
use crate::search::models::{AnalysisSource, MatchReason, MatchResult};

const BASE_SCORE: u32 = 60;
const SKILL_MATCH_POINTS: u32 = 10;
const MAX_SKILL_POINTS: u32 = 30;
const POSITION_MATCH_POINTS: u32 = 15;
const RESUME_POINTS: u32 = 5;
const MAX_FALLBACK_SCORE: u32 = 95;

/// Score given to candidates the backend silently left out.
pub const NEUTRAL_SCORE: u8 = 60;

pub const UNAVAILABLE_NOTE: &str = "AI analysis temporarily unavailable - manual review recommended";

/// Scores one candidate against the query without any backend.
pub fn fallback_analysis(query: &str, candidate: &CandidateRecord) -> MatchResult {
    let query_lower = query.to_lowercase();

    let matching_skills = candidate
        .skills
        .iter()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty() && query_lower.contains(s.as_str()))
        .count() as u32;
    let skill_points = (matching_skills * SKILL_MATCH_POINTS).min(MAX_SKILL_POINTS);

    let position_points = candidate
        .position
        .as_deref()
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty() && query_lower.contains(p.as_str()))
        .map(|_| POSITION_MATCH_POINTS)
        .unwrap_or(0);

    let has_resume = candidate.has_resume();
    let resume_points = if has_resume { RESUME_POINTS } else { 0 };

    let score = (BASE_SCORE + skill_points + position_points + resume_points).min(MAX_FALLBACK_SCORE);

    let resume_note = if has_resume {
        "Resume uploaded and available"
    } else {
        "Basic profile information provided"
    };

    MatchResult {
        candidate_id: candidate.id.clone(),
        match_score: score as u8,
        match_reason: MatchReason::new(
            ["Profile available for review", resume_note],
            [UNAVAILABLE_NOTE],
        ),
        source: AnalysisSource::Fallback,
    }
}

/// Fixed, non-random analysis for a candidate the backend omitted from its answer.
pub fn omitted_analysis(candidate: &CandidateRecord) -> MatchResult {
    MatchResult {
        candidate_id: candidate.id.clone(),
        match_score: NEUTRAL_SCORE,
        match_reason: MatchReason::new(["Basic profile match"], ["Needs detailed review"]),
        source: AnalysisSource::Default,
    }
}
