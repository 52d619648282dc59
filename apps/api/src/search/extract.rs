//! Extraction of ranking results from completion text.
//!
//! Completions are asked for bare JSON but frequently arrive wrapped in prose or
//! code fences. Parsing is strict first; the brace-span attempts that follow are
//! a deliberate leniency, not part of any backend contract.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::llm_client::LlmError;
use crate::search::models::{clamp_score, AnalysisSource, MatchReason, MatchResult};

/// First `{` through the last `}` in the text.
static GREEDY_OBJECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{[\s\S]*\}").unwrap());

#[derive(Debug, Deserialize)]
struct RankingResponse {
    results: Vec<RawMatchResult>,
}

#[derive(Debug, Deserialize)]
struct RawMatchResult {
    id: String,
    #[serde(rename = "matchScore")]
    match_score: f64,
    #[serde(rename = "matchReason")]
    match_reason: MatchReason,
}

/// Parses completion text into match results.
///
/// Attempts, in order:
/// 1. the trimmed text with markdown code fences stripped
/// 2. the greedy span from the first `{` to the last `}`
/// 3. the first balanced `{ ... }` object
///
/// The first attempt that yields the expected shape wins. An empty result set is an error.
pub fn parse_ranking_response(text: &str) -> Result<Vec<MatchResult>, LlmError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    if !text.contains('{') {
        return Err(LlmError::NoJson);
    }

    let mut attempts = vec![strip_json_fences(text)];
    if let Some(span) = GREEDY_OBJECT_RE.find(text) {
        attempts.push(span.as_str());
    }
    if let Some(span) = first_balanced_object(text) {
        attempts.push(span);
    }

    let mut last_error = None;
    for attempt in attempts {
        match serde_json::from_str::<RankingResponse>(attempt) {
            Ok(response) => return into_match_results(response),
            Err(e) => last_error = Some(e),
        }
    }

    Err(last_error.map(LlmError::Parse).unwrap_or(LlmError::NoJson))
}

fn into_match_results(response: RankingResponse) -> Result<Vec<MatchResult>, LlmError> {
    if response.results.is_empty() {
        return Err(LlmError::NoResults);
    }

    Ok(response
        .results
        .into_iter()
        .map(|raw| MatchResult {
            candidate_id: raw.id.trim().to_string(),
            match_score: clamp_score(raw.match_score),
            match_reason: raw.match_reason,
            source: AnalysisSource::Ai,
        })
        .collect())
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));

    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}

/// Returns the first brace-balanced object, ignoring braces inside JSON strings.
fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&text[start..start + offset + 1]);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAN: &str = r#"{
        "results": [
            {"id": "c-1", "matchScore": 88, "matchReason": {"pros": ["Python"], "cons": []}},
            {"id": "c-2", "matchScore": 41, "matchReason": {"pros": [], "cons": ["No SQL"]}}
        ]
    }"#;

    #[test]
    fn test_parses_clean_json() {
        let results = parse_ranking_response(CLEAN).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].candidate_id, "c-1");
        assert_eq!(results[0].match_score, 88);
        assert_eq!(results[1].match_reason.cons, vec!["No SQL"]);
        assert!(results.iter().all(|r| r.source == AnalysisSource::Ai));
    }

    #[test]
    fn test_parses_json_wrapped_in_prose() {
        let text = format!("Here is my analysis of the candidates:\n{CLEAN}\nLet me know if you need more.");
        let results = parse_ranking_response(&text).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_parses_fenced_json() {
        let text = format!("```json\n{CLEAN}\n```");
        let results = parse_ranking_response(&text).unwrap();
        assert_eq!(results[1].match_score, 41);
    }

    #[test]
    fn test_balanced_object_used_when_greedy_span_fails() {
        // Trailing braces in prose break the greedy span but not the balanced scan.
        let text = format!("{CLEAN}\nNote: scores use the {{0-100}} scale.");
        let results = parse_ranking_response(&text).unwrap();
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_score_above_100_is_clamped() {
        let text = r#"{"results": [{"id": "c-1", "matchScore": 140, "matchReason": {"pros": [], "cons": []}}]}"#;
        let results = parse_ranking_response(text).unwrap();
        assert_eq!(results[0].match_score, 100);
    }

    #[test]
    fn test_fractional_and_negative_scores_are_normalized() {
        let text = r#"{"results": [
            {"id": "a", "matchScore": 72.6, "matchReason": {"pros": [], "cons": []}},
            {"id": "b", "matchScore": -5, "matchReason": {"pros": [], "cons": []}}
        ]}"#;
        let results = parse_ranking_response(text).unwrap();
        assert_eq!(results[0].match_score, 73);
        assert_eq!(results[1].match_score, 0);
    }

    #[test]
    fn test_no_json_is_error() {
        let err = parse_ranking_response("I could not evaluate these candidates.").unwrap_err();
        assert!(matches!(err, LlmError::NoJson));
    }

    #[test]
    fn test_blank_text_is_empty_content() {
        assert!(matches!(
            parse_ranking_response("  \n").unwrap_err(),
            LlmError::EmptyContent
        ));
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let text = r#"{"results": [{"id": "c-1", "matchReason": {"pros": [], "cons": []}}]}"#;
        assert!(matches!(
            parse_ranking_response(text).unwrap_err(),
            LlmError::Parse(_)
        ));
    }

    #[test]
    fn test_empty_results_is_error() {
        assert!(matches!(
            parse_ranking_response(r#"{"results": []}"#).unwrap_err(),
            LlmError::NoResults
        ));
    }

    #[test]
    fn test_truncated_json_is_error() {
        let text = r#"{"results": [{"id": "c-1", "matchScore": 80, "matchReason": {"pros": ["#;
        assert!(parse_ranking_response(text).is_err());
    }

    #[test]
    fn test_first_balanced_object_skips_braces_in_strings() {
        let text = r#"prefix {"a": "}{", "b": {"c": 1}} suffix {"d": 2}"#;
        assert_eq!(
            first_balanced_object(text),
            Some(r#"{"a": "}{", "b": {"c": 1}}"#)
        );
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
