use salvo::flash::FlashDepotExt;
use salvo::prelude::*;
use tracing::error;

use crate::db::{ReviewSubmission, SubmissionOutcome};
use crate::web::pages::{self, FlashNote};
use crate::web::web_state;

#[handler]
pub async fn submit_review_form(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let reviewer_code = req
        .query::<String>("reviewer")
        .unwrap_or_default()
        .trim()
        .to_string();

    let mut notices = pages::take_flashes(depot);
    let mut reviews = Vec::new();

    // A blank reviewer code skips the lookup quietly.
    if !reviewer_code.is_empty() {
        let repository = web_state(depot).repository.clone();
        match repository.reviews_by_reviewer(&reviewer_code).await {
            Ok(rows) => {
                if rows.is_empty() {
                    notices.push(FlashNote::danger(format!(
                        "No reviews found for reviewer '{reviewer_code}'."
                    )));
                }
                reviews = rows;
            }
            Err(err) => {
                error!("review history lookup for '{reviewer_code}' failed: {err}");
                notices.push(FlashNote::danger(format!("Database error: {err}")));
            }
        }
    }

    res.render(Text::Html(pages::submit_review_page(
        &reviewer_code,
        &reviews,
        &notices,
    )));
}

#[handler]
pub async fn submit_review(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let review_code = req
        .form::<String>("review_code")
        .await
        .unwrap_or_default()
        .trim()
        .to_string();
    let originality = req.form::<i32>("originality").await;
    let significance = req.form::<i32>("significance").await;
    let quality = req.form::<i32>("quality").await;
    let comments = req.form::<String>("comments").await.unwrap_or_default();
    let content = req.form::<String>("content").await.unwrap_or_default();

    let (Some(originality), Some(significance), Some(quality)) =
        (originality, significance, quality)
    else {
        depot
            .outgoing_flash_mut()
            .error("Scores must be whole numbers.");
        res.render(Redirect::other("/submit-review"));
        return;
    };

    let submission = ReviewSubmission {
        review_code,
        originality,
        significance,
        quality,
        comments,
        content,
    };

    let repository = web_state(depot).repository.clone();
    match repository.submit_review(&submission).await {
        Ok(SubmissionOutcome::UnknownCode) => {
            depot.outgoing_flash_mut().error(format!(
                "Review code '{}' not found.",
                submission.review_code
            ));
        }
        Ok(SubmissionOutcome::Submitted) => {
            depot.outgoing_flash_mut().success(format!(
                "Review submitted! Global score: {}.",
                submission.average_score()
            ));
        }
        Err(err) => {
            error!(
                "review submission for '{}' failed: {err}",
                submission.review_code
            );
            depot
                .outgoing_flash_mut()
                .error(format!("Database error: {err}"));
        }
    }

    res.render(Redirect::other("/submit-review"));
}

#[handler]
pub async fn reviewer_assignments(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let code = req.param::<String>("code").unwrap_or_default();
    let repository = web_state(depot).repository.clone();
    let mut notices = pages::take_flashes(depot);

    let assignments = match repository.reviewer_assignments(&code).await {
        Ok(rows) => rows,
        Err(err) => {
            error!("assignment lookup for '{code}' failed: {err}");
            notices.push(FlashNote::danger(format!("Database error: {err}")));
            Vec::new()
        }
    };

    res.render(Text::Html(pages::assignments_page(
        &code,
        &assignments,
        &notices,
    )));
}
