use salvo::affix_state;
use salvo::flash;
use salvo::prelude::*;
use salvo::session::{CookieStore, SessionHandler};

use super::WebState;
use super::handlers::{conferences, home, reviews};

pub fn create_router(state: WebState, session_handler: SessionHandler<CookieStore>) -> Router {
    Router::new()
        .hoop(affix_state::inject(state))
        .hoop(session_handler)
        .hoop(flash::SessionStore::new().into_handler())
        .get(home::index)
        .push(Router::with_path("conferences").get(conferences::list_conferences))
        .push(
            Router::with_path("conference/{acronym}/accepted-articles")
                .get(conferences::accepted_articles),
        )
        .push(
            Router::with_path("submit-review")
                .get(reviews::submit_review_form)
                .post(reviews::submit_review),
        )
        .push(Router::with_path("reviewer/{code}/assignments").get(reviews::reviewer_assignments))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use salvo::http::StatusCode;
    use salvo::prelude::*;
    use salvo::session::{CookieStore, SessionHandler};
    use salvo::test::{ResponseExt, TestClient};

    use super::create_router;
    use crate::db::{
        AcceptedArticle, Assignment, Conference, DatabaseError, Repository, ReviewSubmission,
        ReviewSummary, SubmissionOutcome,
    };
    use crate::web::WebState;

    const TEST_SECRET: &[u8] =
        b"0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[derive(Default)]
    struct MockRepository {
        fail: bool,
        conferences: Vec<Conference>,
        articles: Vec<AcceptedArticle>,
        assignments: Vec<Assignment>,
        reviews: Vec<ReviewSummary>,
        known_codes: Vec<String>,
        procedure_calls: AtomicUsize,
        history_lookups: AtomicUsize,
    }

    impl MockRepository {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn outage<T>(&self) -> Result<T, DatabaseError> {
            Err(DatabaseError::Connection("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl Repository for MockRepository {
        async fn list_conferences(&self) -> Result<Vec<Conference>, DatabaseError> {
            if self.fail {
                return self.outage();
            }
            Ok(self.conferences.clone())
        }

        async fn accepted_articles(
            &self,
            _acronym: &str,
        ) -> Result<Vec<AcceptedArticle>, DatabaseError> {
            if self.fail {
                return self.outage();
            }
            Ok(self.articles.clone())
        }

        async fn reviewer_assignments(
            &self,
            _reviewer_code: &str,
        ) -> Result<Vec<Assignment>, DatabaseError> {
            if self.fail {
                return self.outage();
            }
            Ok(self.assignments.clone())
        }

        async fn reviews_by_reviewer(
            &self,
            _reviewer_code: &str,
        ) -> Result<Vec<ReviewSummary>, DatabaseError> {
            self.history_lookups.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return self.outage();
            }
            Ok(self.reviews.clone())
        }

        async fn submit_review(
            &self,
            submission: &ReviewSubmission,
        ) -> Result<SubmissionOutcome, DatabaseError> {
            if self.fail {
                return self.outage();
            }
            if !self.known_codes.contains(&submission.review_code) {
                return Ok(SubmissionOutcome::UnknownCode);
            }
            self.procedure_calls.fetch_add(1, Ordering::SeqCst);
            Ok(SubmissionOutcome::Submitted)
        }
    }

    fn test_service(repository: Arc<MockRepository>) -> Service {
        let state = WebState { repository };
        let session_handler = SessionHandler::builder(CookieStore::new(), TEST_SECRET)
            .build()
            .expect("session handler");
        Service::new(create_router(state, session_handler))
    }

    async fn get_page(service: &Service, url: &str) -> (Option<StatusCode>, String) {
        let mut response = TestClient::get(url).send(service).await;
        let status = response.status_code;
        let body = response.take_string().await.expect("response body");
        (status, body)
    }

    #[tokio::test]
    async fn index_renders() {
        let service = test_service(Arc::new(MockRepository::default()));
        let (status, body) = get_page(&service, "http://127.0.0.1/").await;
        assert_eq!(status, Some(StatusCode::OK));
        assert!(body.contains("Conference reviews"));
    }

    #[tokio::test]
    async fn empty_conference_table_renders_without_flash() {
        let service = test_service(Arc::new(MockRepository::default()));
        let (status, body) = get_page(&service, "http://127.0.0.1/conferences").await;
        assert_eq!(status, Some(StatusCode::OK));
        assert!(body.contains("No conferences found."));
        assert!(!body.contains("flash-danger"));
    }

    #[tokio::test]
    async fn conference_rows_render() {
        let repository = Arc::new(MockRepository {
            conferences: vec![Conference {
                acronym: "ICSE".to_string(),
                name: "Intl. Conference on Software Engineering".to_string(),
                location: "Lisbon".to_string(),
                homepage_url: "https://example.org/icse".to_string(),
            }],
            ..MockRepository::default()
        });
        let service = test_service(repository);
        let (status, body) = get_page(&service, "http://127.0.0.1/conferences").await;
        assert_eq!(status, Some(StatusCode::OK));
        assert!(body.contains("ICSE"));
        assert!(body.contains("Lisbon"));
    }

    #[tokio::test]
    async fn database_outage_renders_page_with_danger_flash() {
        let service = test_service(Arc::new(MockRepository::failing()));
        for url in [
            "http://127.0.0.1/conferences",
            "http://127.0.0.1/conference/ICSE/accepted-articles",
            "http://127.0.0.1/reviewer/r1/assignments",
        ] {
            let (status, body) = get_page(&service, url).await;
            assert_eq!(status, Some(StatusCode::OK), "no 5xx for {url}");
            assert!(body.contains("flash-danger"), "danger flash for {url}");
            assert!(body.contains("Database error"), "message for {url}");
        }
    }

    #[tokio::test]
    async fn accepted_articles_render() {
        let repository = Arc::new(MockRepository {
            articles: vec![AcceptedArticle {
                article_id: 7,
                title: "A Study of Review Latency".to_string(),
            }],
            ..MockRepository::default()
        });
        let service = test_service(repository);
        let (status, body) =
            get_page(&service, "http://127.0.0.1/conference/ICSE/accepted-articles").await;
        assert_eq!(status, Some(StatusCode::OK));
        assert!(body.contains("A Study of Review Latency"));
    }

    #[tokio::test]
    async fn reviewer_assignments_render() {
        let repository = Arc::new(MockRepository {
            assignments: vec![Assignment {
                article_id: 3,
                title: "Fuzzing the Reviewer".to_string(),
                conference_acronym: "ICSE".to_string(),
            }],
            ..MockRepository::default()
        });
        let service = test_service(repository);
        let (status, body) =
            get_page(&service, "http://127.0.0.1/reviewer/r1/assignments").await;
        assert_eq!(status, Some(StatusCode::OK));
        assert!(body.contains("Fuzzing the Reviewer"));
    }

    #[tokio::test]
    async fn blank_reviewer_code_skips_lookup_and_flash() {
        let repository = Arc::new(MockRepository::default());
        let service = test_service(repository.clone());
        let (status, body) = get_page(&service, "http://127.0.0.1/submit-review").await;
        assert_eq!(status, Some(StatusCode::OK));
        assert!(!body.contains("No reviews found"));
        assert_eq!(repository.history_lookups.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_reviewer_gets_empty_list_and_flash() {
        let repository = Arc::new(MockRepository::default());
        let service = test_service(repository.clone());
        let (status, body) =
            get_page(&service, "http://127.0.0.1/submit-review?reviewer=ghost").await;
        assert_eq!(status, Some(StatusCode::OK));
        assert!(body.contains("No reviews found for reviewer &#39;ghost&#39;."));
        assert_eq!(repository.history_lookups.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn known_reviewer_sees_past_reviews() {
        let repository = Arc::new(MockRepository {
            reviews: vec![ReviewSummary {
                review_code: "RV1".to_string(),
                article_title: "On Testing".to_string(),
            }],
            ..MockRepository::default()
        });
        let service = test_service(repository);
        let (status, body) =
            get_page(&service, "http://127.0.0.1/submit-review?reviewer=r1").await;
        assert_eq!(status, Some(StatusCode::OK));
        assert!(body.contains("Past reviews of r1"));
        assert!(!body.contains("No reviews found"));
    }

    async fn post_form(service: &Service, body: &'static str) -> Option<StatusCode> {
        let response = TestClient::post("http://127.0.0.1/submit-review")
            .add_header("content-type", "application/x-www-form-urlencoded", true)
            .body(body)
            .send(service)
            .await;
        response.status_code
    }

    #[tokio::test]
    async fn unknown_review_code_never_calls_procedure() {
        let repository = Arc::new(MockRepository::default());
        let service = test_service(repository.clone());
        let status = post_form(
            &service,
            "review_code=NOPE&originality=4&significance=5&quality=6",
        )
        .await;
        assert_eq!(status, Some(StatusCode::SEE_OTHER));
        assert_eq!(repository.procedure_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_submission_calls_procedure_and_redirects() {
        let repository = Arc::new(MockRepository {
            known_codes: vec!["RV1".to_string()],
            ..MockRepository::default()
        });
        let service = test_service(repository.clone());
        let status = post_form(
            &service,
            "review_code=RV1&originality=4&significance=5&quality=6&comments=ok&content=fine",
        )
        .await;
        assert_eq!(status, Some(StatusCode::SEE_OTHER));
        assert_eq!(repository.procedure_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_numeric_scores_redirect_without_procedure_call() {
        let repository = Arc::new(MockRepository {
            known_codes: vec!["RV1".to_string()],
            ..MockRepository::default()
        });
        let service = test_service(repository.clone());
        let status = post_form(
            &service,
            "review_code=RV1&originality=high&significance=5&quality=6",
        )
        .await;
        assert_eq!(status, Some(StatusCode::SEE_OTHER));
        assert_eq!(repository.procedure_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submission_during_outage_still_redirects() {
        let repository = Arc::new(MockRepository::failing());
        let service = test_service(repository);
        let status = post_form(
            &service,
            "review_code=RV1&originality=4&significance=5&quality=6",
        )
        .await;
        assert_eq!(status, Some(StatusCode::SEE_OTHER));
    }
}
