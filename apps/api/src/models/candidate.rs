use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Review status a recruiter assigns to a candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl CandidateStatus {
    /// Unknown or missing values read as `Pending`.
    pub fn from_db(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("approved") => CandidateStatus::Approved,
            Some("rejected") => CandidateStatus::Rejected,
            _ => CandidateStatus::Pending,
        }
    }
}

/// A candidate as the dashboard sees it. Read-only input to ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub status: CandidateStatus,
    /// Recruiter-assigned score, unrelated to the AI match score.
    #[serde(default)]
    pub score: Option<i32>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub applied_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub is_shortlisted: bool,
    #[serde(default)]
    pub qualification: Option<String>,
    #[serde(default)]
    pub cgpa: Option<f64>,
}

impl CandidateRecord {
    pub fn has_resume(&self) -> bool {
        self.resume_url
            .as_deref()
            .map(|url| !url.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Row of the `candidates` table.
#[derive(Debug, Clone, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub experience: Option<String>,
    pub skills: Option<Vec<String>>,
    pub status: Option<String>,
    pub score: Option<i32>,
    pub resume_url: Option<String>,
    pub notes: Option<String>,
    pub location: Option<String>,
    pub is_shortlisted: Option<bool>,
    pub qualification: Option<String>,
    pub cgpa: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<CandidateRow> for CandidateRecord {
    fn from(row: CandidateRow) -> Self {
        CandidateRecord {
            id: row.id.to_string(),
            name: row.name,
            email: row.email,
            phone: row.phone,
            position: row.position,
            experience: row.experience,
            skills: row.skills.unwrap_or_default(),
            status: CandidateStatus::from_db(row.status.as_deref()),
            score: row.score,
            resume_url: row.resume_url,
            applied_date: Some(row.created_at),
            notes: row.notes,
            location: row.location,
            is_shortlisted: row.is_shortlisted.unwrap_or(false),
            qualification: row.qualification,
            cgpa: row.cgpa,
        }
    }
}
