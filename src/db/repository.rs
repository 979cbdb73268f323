use async_trait::async_trait;

use super::DatabaseError;
use super::models::{AcceptedArticle, Assignment, Conference, ReviewSubmission, ReviewSummary, SubmissionOutcome};

/// Database operations backing the HTTP surface. Each call corresponds to one
/// request and opens at most one connection for its duration.
#[async_trait]
pub trait Repository: Send + Sync {
    /// All conferences, ordered by name.
    async fn list_conferences(&self) -> Result<Vec<Conference>, DatabaseError>;

    /// Accepted articles for a conference, via `prc_get_accepted_articles`.
    async fn accepted_articles(&self, acronym: &str) -> Result<Vec<AcceptedArticle>, DatabaseError>;

    /// Articles assigned to a reviewer, via `prc_get_reviewer_assignments`.
    async fn reviewer_assignments(&self, reviewer_code: &str) -> Result<Vec<Assignment>, DatabaseError>;

    /// Reviews authored by a reviewer, ordered by article title.
    async fn reviews_by_reviewer(&self, reviewer_code: &str) -> Result<Vec<ReviewSummary>, DatabaseError>;

    /// Checks the review code exists, then forwards the scores and texts to
    /// `prc_add_review`, committing on success and rolling back on error.
    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<SubmissionOutcome, DatabaseError>;
}
