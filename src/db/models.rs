use serde::Serialize;

/// A conference as listed on the overview page.
#[derive(Debug, Clone, Serialize)]
pub struct Conference {
    pub acronym: String,
    pub name: String,
    pub location: String,
    pub homepage_url: String,
}

/// Row produced by `prc_get_accepted_articles`.
#[derive(Debug, Clone, Serialize)]
pub struct AcceptedArticle {
    pub article_id: i64,
    pub title: String,
}

/// Row produced by `prc_get_reviewer_assignments`.
#[derive(Debug, Clone, Serialize)]
pub struct Assignment {
    pub article_id: i64,
    pub title: String,
    pub conference_acronym: String,
}

/// A past review of a reviewer, joined with the article it covers.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewSummary {
    pub review_code: String,
    pub article_title: String,
}

/// Form input forwarded to `prc_add_review`.
#[derive(Debug, Clone)]
pub struct ReviewSubmission {
    pub review_code: String,
    pub originality: i32,
    pub significance: i32,
    pub quality: i32,
    pub comments: String,
    pub content: String,
}

impl ReviewSubmission {
    /// Display-only rounded mean of the three ratings. Never persisted.
    pub fn average_score(&self) -> i32 {
        let sum = self.originality + self.significance + self.quality;
        (f64::from(sum) / 3.0).round() as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// No review row carries the given code; the procedure was not called.
    UnknownCode,
    /// The procedure ran and the change was committed.
    Submitted,
}
