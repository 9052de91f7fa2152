//! HTTP server

use std::net::SocketAddr;

use crate::{middleware::logging_middleware, routes::all_routes, state::AppState};

/// HTTP server for the newsbrief API
pub struct ApiServer {
    addr: SocketAddr,
}

impl ApiServer {
    /// Create a server bound to the given address
    pub fn new(addr: SocketAddr) -> Self {
        Self { addr }
    }

    /// Address the server will bind to
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bind and serve until the process is stopped
    pub async fn serve(&self, state: AppState) -> Result<(), std::io::Error> {
        let app = all_routes()
            .layer(axum::middleware::from_fn(logging_middleware))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("API server listening on {}", self.addr);
        tracing::info!("Swagger UI available at http://{}/swagger-ui", self.addr);

        axum::serve(listener, app).await
    }
}
