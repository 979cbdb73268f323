use std::sync::Arc;

use anyhow::Result;
use salvo::prelude::*;
use salvo::session::{CookieStore, SessionHandler};
use secrecy::ExposeSecret;
use tracing::info;

use crate::config::Config;
use crate::db::Repository;

pub mod handlers;
pub mod pages;
pub mod router;

use self::router::create_router;

#[derive(Clone)]
pub struct WebState {
    pub repository: Arc<dyn Repository>,
}

/// Request-scoped lookup of the injected state. Injection happens once at
/// router construction, so a miss here is a wiring bug.
pub fn web_state(depot: &Depot) -> &WebState {
    depot
        .obtain::<WebState>()
        .ok()
        .expect("web state is not injected before handler execution")
}

pub struct WebServer {
    config: Arc<Config>,
    state: WebState,
}

impl WebServer {
    pub fn new(config: Arc<Config>, repository: Arc<dyn Repository>) -> Self {
        let state = WebState { repository };
        Self { config, state }
    }

    pub async fn start(&self) -> Result<()> {
        let bind_addr = self.config.bind_addr();
        info!("starting web server on {}", bind_addr);

        let session_handler = SessionHandler::builder(
            CookieStore::new(),
            self.config.secret_key().expose_secret().as_bytes(),
        )
        .build()?;

        let router = create_router(self.state.clone(), session_handler);
        let acceptor = TcpListener::new(bind_addr).bind().await;
        Server::new(acceptor).serve(router).await;

        Ok(())
    }
}
