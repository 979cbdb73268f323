use salvo::prelude::*;
use tracing::error;

use crate::web::pages::{self, FlashNote};
use crate::web::web_state;

#[handler]
pub async fn list_conferences(depot: &mut Depot, res: &mut Response) {
    let repository = web_state(depot).repository.clone();
    let mut notices = pages::take_flashes(depot);

    let conferences = match repository.list_conferences().await {
        Ok(rows) => rows,
        Err(err) => {
            error!("conference listing failed: {err}");
            notices.push(FlashNote::danger(format!("Database error: {err}")));
            Vec::new()
        }
    };

    res.render(Text::Html(pages::conferences_page(&conferences, &notices)));
}

#[handler]
pub async fn accepted_articles(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let acronym = req.param::<String>("acronym").unwrap_or_default();
    let repository = web_state(depot).repository.clone();
    let mut notices = pages::take_flashes(depot);

    let articles = match repository.accepted_articles(&acronym).await {
        Ok(rows) => rows,
        Err(err) => {
            error!("accepted articles lookup for '{acronym}' failed: {err}");
            notices.push(FlashNote::danger(format!("Database error: {err}")));
            Vec::new()
        }
    };

    res.render(Text::Html(pages::accepted_articles_page(
        &acronym, &articles, &notices,
    )));
}
