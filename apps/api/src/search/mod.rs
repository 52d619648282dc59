// AI search: ranks a user's candidates against a free-text job query.
// Scoring goes through llm_client::ScoringBackend; the keyword heuristic in
// `fallback` covers every failure of that path.

pub mod extract;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod prompts;
pub mod ranker;

#[cfg(test)]
pub mod testing;
