//! Server-side HTML rendering. Pages are small enough that they are built
//! directly from strings; every dynamic value goes through `escape_html`.

use salvo::Depot;
use salvo::flash::{FlashDepotExt, FlashLevel};

use crate::db::{AcceptedArticle, Assignment, Conference, ReviewSummary};

/// A notification banner, either carried over from the previous request via
/// the flash cookie or raised while handling the current one.
#[derive(Debug, Clone)]
pub struct FlashNote {
    pub severity: &'static str,
    pub text: String,
}

impl FlashNote {
    pub fn danger(text: impl Into<String>) -> Self {
        Self {
            severity: "danger",
            text: text.into(),
        }
    }
}

/// Drains the flash messages of the previous request into renderable notes.
pub fn take_flashes(depot: &mut Depot) -> Vec<FlashNote> {
    match depot.incoming_flash() {
        Some(flash) => flash
            .iter()
            .map(|message| FlashNote {
                severity: level_class(&message.level),
                text: message.value.clone(),
            })
            .collect(),
        None => Vec::new(),
    }
}

fn level_class(level: &FlashLevel) -> &'static str {
    match level {
        FlashLevel::Success => "success",
        FlashLevel::Warning => "warning",
        FlashLevel::Error => "danger",
        _ => "info",
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn layout(title: &str, notices: &[FlashNote], body: &str) -> String {
    let mut banners = String::new();
    for note in notices {
        banners.push_str(&format!(
            "<div class=\"flash flash-{}\">{}</div>\n",
            note.severity,
            escape_html(&note.text)
        ));
    }

    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title} - confdesk</title>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/conferences\">Conferences</a> | \
         <a href=\"/submit-review\">Submit review</a></nav>\n\
         {banners}\
         <h1>{title}</h1>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape_html(title),
        banners = banners,
        body = body,
    )
}

pub fn index_page(notices: &[FlashNote]) -> String {
    layout(
        "Conference reviews",
        notices,
        "<p>Browse conferences, look up reviewer assignments and submit peer reviews.</p>",
    )
}

pub fn conferences_page(conferences: &[Conference], notices: &[FlashNote]) -> String {
    let body = if conferences.is_empty() {
        "<p>No conferences found.</p>".to_string()
    } else {
        let mut rows = String::new();
        for conference in conferences {
            rows.push_str(&format!(
                "<tr><td><a href=\"/conference/{acronym}/accepted-articles\">{acronym}</a></td>\
                 <td>{name}</td><td>{location}</td>\
                 <td><a href=\"{homepage}\">{homepage}</a></td></tr>\n",
                acronym = escape_html(&conference.acronym),
                name = escape_html(&conference.name),
                location = escape_html(&conference.location),
                homepage = escape_html(&conference.homepage_url),
            ));
        }
        format!(
            "<table>\n<tr><th>Acronym</th><th>Name</th><th>Location</th><th>Homepage</th></tr>\n{rows}</table>"
        )
    };
    layout("Conferences", notices, &body)
}

pub fn accepted_articles_page(
    acronym: &str,
    articles: &[AcceptedArticle],
    notices: &[FlashNote],
) -> String {
    let body = if articles.is_empty() {
        "<p>No accepted articles found.</p>".to_string()
    } else {
        let mut rows = String::new();
        for article in articles {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                article.article_id,
                escape_html(&article.title),
            ));
        }
        format!("<table>\n<tr><th>Article</th><th>Title</th></tr>\n{rows}</table>")
    };
    layout(
        &format!("Accepted articles for {acronym}"),
        notices,
        &body,
    )
}

pub fn submit_review_page(
    reviewer_code: &str,
    reviews: &[ReviewSummary],
    notices: &[FlashNote],
) -> String {
    let mut body = String::from(
        "<form method=\"post\" action=\"/submit-review\">\n\
         <label>Review code <input name=\"review_code\" required></label><br>\n\
         <label>Originality <input name=\"originality\" type=\"number\" required></label><br>\n\
         <label>Significance <input name=\"significance\" type=\"number\" required></label><br>\n\
         <label>Quality <input name=\"quality\" type=\"number\" required></label><br>\n\
         <label>Comments <textarea name=\"comments\"></textarea></label><br>\n\
         <label>Content <textarea name=\"content\"></textarea></label><br>\n\
         <button type=\"submit\">Submit</button>\n\
         </form>\n\
         <form method=\"get\" action=\"/submit-review\">\n\
         <label>Reviewer code <input name=\"reviewer\"></label>\n\
         <button type=\"submit\">Show past reviews</button>\n\
         </form>\n",
    );

    if !reviews.is_empty() {
        let mut rows = String::new();
        for review in reviews {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape_html(&review.review_code),
                escape_html(&review.article_title),
            ));
        }
        body.push_str(&format!(
            "<h2>Past reviews of {}</h2>\n<table>\n<tr><th>Code</th><th>Article</th></tr>\n{rows}</table>",
            escape_html(reviewer_code),
        ));
    }

    layout("Submit a review", notices, &body)
}

pub fn assignments_page(
    reviewer_code: &str,
    assignments: &[Assignment],
    notices: &[FlashNote],
) -> String {
    let body = if assignments.is_empty() {
        "<p>No assigned articles found.</p>".to_string()
    } else {
        let mut rows = String::new();
        for assignment in assignments {
            rows.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                assignment.article_id,
                escape_html(&assignment.title),
                escape_html(&assignment.conference_acronym),
            ));
        }
        format!(
            "<table>\n<tr><th>Article</th><th>Title</th><th>Conference</th></tr>\n{rows}</table>"
        )
    };
    layout(
        &format!("Assignments for reviewer {reviewer_code}"),
        notices,
        &body,
    )
}
