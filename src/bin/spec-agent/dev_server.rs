//! Static file server over the export directory
//!
//! Serves `index.html` and the spec pages written by `spec-agent export`. Directory requests
//! such as `/` resolve to the directory's `index.html`.

use axum::Router;
use std::path::PathBuf;
use tower_http::{services::ServeDir, trace::TraceLayer};

pub struct DevServer {
    /// Address to bind, e.g. `localhost` or `0.0.0.0`
    host: String,
    port: u16,
    /// Export directory
    html_root: PathBuf,
}

impl DevServer {
    pub fn new(html_root: PathBuf, host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            html_root,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// Serve until `shutdown_signal` resolves, then finish in-flight requests and return.
    pub async fn serve(
        self,
        shutdown_signal: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let app = Router::new()
            .fallback_service(ServeDir::new(&self.html_root))
            .layer(TraceLayer::new_for_http());

        let listener = tokio::net::TcpListener::bind((self.host.as_str(), self.port)).await?;
        tracing::info!("Serving {:?} on {}", self.html_root, listener.local_addr()?);
        println!("\nServer running at {}", self.url());
        println!("Serving: {}", self.html_root.display());
        println!("Press Ctrl-C to stop.\n");

        axum::serve(listener, app.into_make_service())
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        tracing::info!("Server shut down");
        Ok(())
    }
}
