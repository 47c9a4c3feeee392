use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use locus_core::LocaleRouter;
use tokio::signal;

use crate::locale::middleware::route_locale;

pub struct WebServer {
    router: Router,
    addr: String,
    middlewares: Vec<Box<dyn FnOnce(Router) -> Router + Send>>,
}

impl WebServer {
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            router: Router::new(),
            addr: addr.into(),
            middlewares: Vec::new(),
        }
    }

    /// Puts every mounted route behind the locale routing middleware.
    pub fn layer_locale(mut self, locales: impl Into<Arc<LocaleRouter>>) -> Self {
        let locales = locales.into();
        self.middlewares
            .push(Box::new(move |r| r.layer(from_fn_with_state(locales, route_locale))));
        self
    }

    pub fn mount(mut self, router: Router) -> Self {
        self.router = self.router.merge(router);
        self
    }

    /// The mounted routes with all middlewares applied.
    ///
    /// Middlewares are applied last so they also cover routes mounted after
    /// the `layer_*` call.
    pub fn into_router(self) -> Router {
        self.middlewares
            .into_iter()
            .fold(self.router, |router, m| m(router))
    }

    pub async fn start(self) -> anyhow::Result<()> {
        let addr = self.addr.clone();
        log::info!("Starting web server at {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        let server = axum::serve(listener, self.into_router()).with_graceful_shutdown(wait_for_shutdown());
        if let Err(e) = server.await {
            log::error!("Server error: {}", e);
            return Err(anyhow::anyhow!("Server error: {}", e));
        }

        log::info!("Server stopped");
        Ok(())
    }
}

async fn wait_for_shutdown() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            log::info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            log::info!("Received terminate signal, starting graceful shutdown");
        },
    }
}
