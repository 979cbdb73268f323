use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};

use crate::db::schema::{article, conference, review};

use super::models::{
    AcceptedArticle, Assignment, Conference, ReviewSubmission, ReviewSummary, SubmissionOutcome,
};
use super::{DatabaseError, Repository};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = conference)]
struct DbConference {
    acronym: String,
    name: String,
    location: String,
    homepage_url: String,
}

impl From<DbConference> for Conference {
    fn from(value: DbConference) -> Self {
        Self {
            acronym: value.acronym,
            name: value.name,
            location: value.location,
            homepage_url: value.homepage_url,
        }
    }
}

#[derive(Debug, QueryableByName)]
struct DbAcceptedArticle {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    article_id: i64,
    #[diesel(sql_type = Text)]
    title: String,
}

impl From<DbAcceptedArticle> for AcceptedArticle {
    fn from(value: DbAcceptedArticle) -> Self {
        Self {
            article_id: value.article_id,
            title: value.title,
        }
    }
}

#[derive(Debug, QueryableByName)]
struct DbAssignment {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    article_id: i64,
    #[diesel(sql_type = Text)]
    title: String,
    #[diesel(sql_type = Text)]
    conference_acronym: String,
}

impl From<DbAssignment> for Assignment {
    fn from(value: DbAssignment) -> Self {
        Self {
            article_id: value.article_id,
            title: value.title,
            conference_acronym: value.conference_acronym,
        }
    }
}

/// PostgreSQL repository. Holds only the connection URL; a fresh connection
/// is established for each operation and dropped when it returns, so every
/// request touching the database uses exactly one short-lived connection.
pub struct PgRepository {
    database_url: String,
}

impl PgRepository {
    pub fn new(database_url: String) -> Self {
        Self { database_url }
    }

    /// Runs `operation` with a request-scoped connection on the blocking
    /// pool. The connection is closed when the closure returns, on both the
    /// success and the error path.
    async fn with_connection<T, F>(&self, operation: F) -> Result<T, DatabaseError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, DatabaseError> + Send + 'static,
    {
        let database_url = self.database_url.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = PgConnection::establish(&database_url)
                .map_err(|e| DatabaseError::Connection(e.to_string()))?;
            operation(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::Query(format!("database task failed: {e}")))?
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn list_conferences(&self) -> Result<Vec<Conference>, DatabaseError> {
        self.with_connection(move |conn| {
            conference::table
                .order(conference::name.asc())
                .select(DbConference::as_select())
                .load::<DbConference>(conn)
                .map(|rows| rows.into_iter().map(Into::into).collect())
                .map_err(|e| DatabaseError::Query(e.to_string()))
        })
        .await
    }

    async fn accepted_articles(&self, acronym: &str) -> Result<Vec<AcceptedArticle>, DatabaseError> {
        let acronym = acronym.to_string();
        self.with_connection(move |conn| {
            diesel::sql_query("SELECT article_id, title FROM prc_get_accepted_articles($1)")
                .bind::<Text, _>(acronym)
                .load::<DbAcceptedArticle>(conn)
                .map(|rows| rows.into_iter().map(Into::into).collect())
                .map_err(|e| DatabaseError::Query(e.to_string()))
        })
        .await
    }

    async fn reviewer_assignments(&self, reviewer_code: &str) -> Result<Vec<Assignment>, DatabaseError> {
        let reviewer_code = reviewer_code.to_string();
        self.with_connection(move |conn| {
            diesel::sql_query(
                "SELECT article_id, title, conference_acronym FROM prc_get_reviewer_assignments($1)",
            )
            .bind::<Text, _>(reviewer_code)
            .load::<DbAssignment>(conn)
            .map(|rows| rows.into_iter().map(Into::into).collect())
            .map_err(|e| DatabaseError::Query(e.to_string()))
        })
        .await
    }

    async fn reviews_by_reviewer(&self, reviewer_code: &str) -> Result<Vec<ReviewSummary>, DatabaseError> {
        let reviewer_code = reviewer_code.to_string();
        self.with_connection(move |conn| {
            review::table
                .inner_join(article::table)
                .filter(review::reviewer_code.eq(reviewer_code))
                .order(article::title.asc())
                .select((review::code, article::title))
                .load::<(String, String)>(conn)
                .map(|rows| {
                    rows.into_iter()
                        .map(|(review_code, article_title)| ReviewSummary {
                            review_code,
                            article_title,
                        })
                        .collect()
                })
                .map_err(|e| DatabaseError::Query(e.to_string()))
        })
        .await
    }

    async fn submit_review(&self, submission: &ReviewSubmission) -> Result<SubmissionOutcome, DatabaseError> {
        let submission = submission.clone();
        self.with_connection(move |conn| {
            let known = diesel::select(diesel::dsl::exists(
                review::table.filter(review::code.eq(&submission.review_code)),
            ))
            .get_result::<bool>(conn)
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

            if !known {
                return Ok(SubmissionOutcome::UnknownCode);
            }

            // Commit on Ok, roll back on Err; a failed procedure call must
            // not leave an aborted transaction on the connection.
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                diesel::sql_query("CALL prc_add_review($1, $2, $3, $4, $5, $6)")
                    .bind::<Text, _>(submission.review_code.clone())
                    .bind::<Integer, _>(submission.originality)
                    .bind::<Integer, _>(submission.significance)
                    .bind::<Integer, _>(submission.quality)
                    .bind::<Text, _>(submission.comments.clone())
                    .bind::<Text, _>(submission.content.clone())
                    .execute(conn)?;
                Ok(())
            })
            .map_err(|e| DatabaseError::Query(e.to_string()))?;

            Ok(SubmissionOutcome::Submitted)
        })
        .await
    }
}
