//! Test doubles for ranking: a canned scoring backend and an in-memory candidate store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use uuid::Uuid;

use crate::candidates::CandidateStore;
use crate::errors::AppError;
use crate::llm_client::{LlmError, ScoringBackend};
use crate::models::candidate::{CandidateRecord, CandidateStatus};

pub fn make_candidate(id: &str) -> CandidateRecord {
    CandidateRecord {
        id: id.to_string(),
        name: format!("Candidate {id}"),
        email: format!("{id}@example.com"),
        phone: None,
        position: Some("Data Analyst".to_string()),
        experience: Some("3 years".to_string()),
        skills: vec!["Python".to_string(), "SQL".to_string()],
        status: CandidateStatus::Pending,
        score: None,
        resume_url: Some(format!("resumes/{id}.pdf")),
        applied_date: None,
        notes: None,
        location: Some("Bengaluru".to_string()),
        is_shortlisted: false,
        qualification: Some("B.Sc. Statistics".to_string()),
        cgpa: Some(8.1),
    }
}

/// Completion text in the shape the ranking prompt asks for.
pub fn results_json(scores: &[(&str, i64)]) -> String {
    let results: Vec<_> = scores
        .iter()
        .map(|(id, score)| {
            json!({
                "id": id,
                "matchScore": score,
                "matchReason": {
                    "pros": [format!("Strong fit ({id})")],
                    "cons": ["Verify notice period"]
                }
            })
        })
        .collect();
    json!({ "results": results }).to_string()
}

enum CannedReply {
    Text(String),
    Unavailable,
}

/// Scoring backend that returns a fixed reply and records how it was called.
pub struct CannedBackend {
    reply: CannedReply,
    delay: Option<Duration>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl CannedBackend {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::new(CannedReply::Text(text.into()))
    }

    /// Always fails as if the backend returned 503.
    pub fn failing() -> Self {
        Self::new(CannedReply::Unavailable)
    }

    fn new(reply: CannedReply) -> Self {
        Self {
            reply,
            delay: None,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringBackend for CannedBackend {
    async fn score_candidates(&self, prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match &self.reply {
            CannedReply::Text(text) => Ok(text.clone()),
            CannedReply::Unavailable => Err(LlmError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
        }
    }
}

/// Candidate store backed by a map; optionally fails every lookup.
#[derive(Default)]
pub struct InMemoryCandidateStore {
    by_user: HashMap<Uuid, Vec<CandidateRecord>>,
    fail: bool,
}

impl InMemoryCandidateStore {
    pub fn with_user(mut self, user_id: Uuid, candidates: Vec<CandidateRecord>) -> Self {
        self.by_user.insert(user_id, candidates);
        self
    }

    pub fn failing() -> Self {
        Self {
            by_user: HashMap::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl CandidateStore for InMemoryCandidateStore {
    async fn candidates_for_user(&self, user_id: Uuid) -> Result<Vec<CandidateRecord>, AppError> {
        if self.fail {
            return Err(AppError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(self.by_user.get(&user_id).cloned().unwrap_or_default())
    }
}
