pub use self::error::DatabaseError;
pub use self::models::{
    AcceptedArticle, Assignment, Conference, ReviewSubmission, ReviewSummary, SubmissionOutcome,
};
pub use self::postgres::PgRepository;
pub use self::repository::Repository;

pub mod error;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod schema;
