use salvo::prelude::*;

use crate::web::pages;

#[handler]
pub async fn index(depot: &mut Depot, res: &mut Response) {
    let notices = pages::take_flashes(depot);
    res.render(Text::Html(pages::index_page(&notices)));
}
