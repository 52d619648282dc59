//! Prompt construction for candidate ranking.

use std::fmt::Write;

use crate::models::candidate::CandidateRecord;

const NOT_SPECIFIED: &str = "Not specified";

/// Opening instruction of the ranking prompt.
pub const RANKING_PREAMBLE: &str = "You are an AI recruitment assistant. \
    Analyze the following job search query and candidate profiles to provide match scores and reasoning.";

/// Exact response shape the ranker parses. Keep in sync with `extract::RankingResponse`.
pub const RANKING_RESPONSE_SHAPE: &str = r#"Respond with a JSON object in exactly this shape, with one entry per candidate:
{
  "results": [
    {
      "id": "the exact candidate ID listed above",
      "matchScore": 85,
      "matchReason": {
        "pros": ["Relevant experience in required field", "Strong technical skills"],
        "cons": ["Location mismatch", "Slightly lower experience than preferred"]
      }
    }
  ]
}"#;

pub const RANKING_GUIDELINES: &str = "\
Score each candidate from 0-100 based on how well they match the job requirements. Consider:
- Relevant experience and skills matching the job query
- Education/qualifications relevant to the position
- Location compatibility if specified in the query
- Overall fit for the role described in the query
- An uploaded resume is a minor positive signal of commitment

Provide specific, actionable feedback in the pros and cons based on the actual candidate data and job requirements.";

/// Builds the single ranking instruction for `query` over `candidates`.
/// The query is embedded verbatim.
pub fn build_ranking_prompt(query: &str, candidates: &[CandidateRecord]) -> String {
    let mut prompt = String::with_capacity(1024 + candidates.len() * 256);

    let _ = writeln!(prompt, "{RANKING_PREAMBLE}\n");
    let _ = writeln!(prompt, "Job Search Query: \"{query}\"\n");
    let _ = writeln!(prompt, "Candidates to evaluate:");

    for (index, candidate) in candidates.iter().enumerate() {
        prompt.push('\n');
        prompt.push_str(&describe_candidate(index + 1, candidate));
    }

    let _ = writeln!(prompt, "\n{RANKING_RESPONSE_SHAPE}\n");
    prompt.push_str(RANKING_GUIDELINES);
    prompt
}

/// One numbered candidate block of the prompt.
fn describe_candidate(number: usize, candidate: &CandidateRecord) -> String {
    let skills = if candidate.skills.is_empty() {
        NOT_SPECIFIED.to_string()
    } else {
        candidate.skills.join(", ")
    };
    let cgpa = candidate
        .cgpa
        .map(|c| c.to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let resume = if candidate.has_resume() {
        "Available"
    } else {
        "Not uploaded"
    };

    format!(
        "{number}. ID: {id}\n   Name: {name}\n   Position: {position}\n   Experience: {experience}\n   \
         Skills: {skills}\n   Qualification: {qualification}\n   CGPA: {cgpa}\n   \
         Location: {location}\n   Resume: {resume}\n",
        id = candidate.id,
        name = candidate.name,
        position = or_not_specified(&candidate.position),
        experience = or_not_specified(&candidate.experience),
        qualification = or_not_specified(&candidate.qualification),
        location = or_not_specified(&candidate.location),
    )
}

fn or_not_specified(value: &Option<String>) -> &str {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_SPECIFIED)
}
