//! Candidate Ranker — query + candidates in, candidates ordered by match score out.
//!
//! Flow: build prompt → one backend call (bounded by the configured timeout) →
//! extract results → on ANY failure, keyword fallback → merge onto every input
//! candidate → stable sort by score, descending.
//!
//! Backend failures never escape `rank`; only invalid input does.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::config::SearchConfig;
use crate::errors::AppError;
use crate::llm_client::{LlmClient, LlmError, ScoringBackend};
use crate::models::candidate::CandidateRecord;
use crate::search::extract::parse_ranking_response;
use crate::search::fallback::{fallback_analysis, omitted_analysis};
use crate::search::models::{MatchResult, RankedCandidate};
use crate::search::prompts::build_ranking_prompt;

pub struct Ranker {
    backend: Arc<dyn ScoringBackend>,
    config: SearchConfig,
}

impl Ranker {
    pub fn new(backend: Arc<dyn ScoringBackend>, config: SearchConfig) -> Self {
        Self { backend, config }
    }

    /// Ranker backed by the real chat-completions client.
    pub fn from_config(config: SearchConfig) -> Result<Self, LlmError> {
        let client = LlmClient::new(&config)?;
        Ok(Self::new(Arc::new(client), config))
    }

    /// Ranks `candidates` against `query`. Every input candidate appears exactly once
    /// in the output. Empty input returns immediately without a backend call.
    pub async fn rank(
        &self,
        query: &str,
        candidates: &[CandidateRecord],
    ) -> Result<Vec<RankedCandidate>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("query cannot be empty".to_string()));
        }
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        info!(
            query_len = query.len(),
            candidates = candidates.len(),
            "Ranking candidates"
        );

        let limit = self.config.max_candidates_per_call.clamp(1, candidates.len());
        let (batch, overflow) = candidates.split_at(limit);

        let mut analyses: HashMap<String, MatchResult> = HashMap::with_capacity(candidates.len());

        match self.score_with_backend(query, batch).await {
            Ok(results) => {
                let batch_ids: HashSet<&str> = batch.iter().map(|c| c.id.as_str()).collect();
                for result in results {
                    if !batch_ids.contains(result.candidate_id.as_str()) {
                        debug!("Ignoring result for unknown candidate {}", result.candidate_id);
                        continue;
                    }
                    // First entry wins when the backend repeats an id.
                    analyses.entry(result.candidate_id.clone()).or_insert(result);
                }
            }
            Err(e) => {
                warn!(error = %e, "AI scoring failed, using fallback scoring");
                for candidate in batch {
                    analyses
                        .entry(candidate.id.clone())
                        .or_insert_with(|| fallback_analysis(query, candidate));
                }
            }
        }

        if !overflow.is_empty() {
            info!(
                "{} candidates exceed the per-call limit of {}; scoring them with fallback",
                overflow.len(),
                limit
            );
            for candidate in overflow {
                analyses
                    .entry(candidate.id.clone())
                    .or_insert_with(|| fallback_analysis(query, candidate));
            }
        }

        let ranked = merge_ranked(candidates, &analyses);
        info!("Returning {} ranked candidates", ranked.len());
        Ok(ranked)
    }

    /// The primary path. Any error here means the caller falls back.
    async fn score_with_backend(
        &self,
        query: &str,
        batch: &[CandidateRecord],
    ) -> Result<Vec<MatchResult>, LlmError> {
        let prompt = build_ranking_prompt(query, batch);

        let completion = tokio::time::timeout(
            self.config.timeout,
            self.backend.score_candidates(&prompt),
        )
        .await
        .map_err(|_| LlmError::Timeout(self.config.timeout))??;

        parse_ranking_response(&completion).inspect_err(|e| {
            debug!(error = %e, completion = %completion, "Unparsable ranking completion");
        })
    }
}

/// Attaches an analysis to every candidate, synthesizing one for candidates the
/// backend omitted, then sorts by score (stable, so ties keep input order).
fn merge_ranked(
    candidates: &[CandidateRecord],
    analyses: &HashMap<String, MatchResult>,
) -> Vec<RankedCandidate> {
    let mut omitted = 0usize;

    let mut ranked: Vec<RankedCandidate> = candidates
        .iter()
        .map(|candidate| {
            let result = match analyses.get(&candidate.id) {
                Some(result) => result.clone(),
                None => {
                    omitted += 1;
                    omitted_analysis(candidate)
                }
            };
            RankedCandidate::new(candidate.clone(), result)
        })
        .collect();

    if omitted > 0 {
        warn!("Scoring backend omitted {omitted} candidates; assigned neutral scores");
    }

    ranked.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    ranked
}
