// Server related imports
use axum::{
    Router,
    http::{self, Method},
    middleware,
    routing::{get, get_service, post},
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

// General imports
use anyhow::Result;
use std::path::Path;
use tokio::net::TcpListener;

// From lib
use super::{server_config::ServerConfig, server_state::ServerState};
use crate::handlers::{
    chat::{chat, delete_chat, list_chats},
    documents::{generate_document, list_documents, list_templates, save_document},
    knowledge::{knowledge_category, knowledge_search},
    pricing::{dashboard, pricing, subscribe},
    sign_in::{authorize, me, register, sign_in, sign_out},
};

pub struct AppBuilder {
    pub app: Router,
}

impl AppBuilder {
    pub fn new(state: ServerState) -> Self {
        // Routes that need a bearer token
        let protected: Router<ServerState> = Router::new()
            .route("/app/v1/sign_out", post(sign_out))
            .route("/app/v1/me", get(me))
            .route("/app/v1/chat", post(chat))
            .route("/app/v1/chats", get(list_chats))
            .route("/app/v1/chats/delete", post(delete_chat))
            .route("/app/v1/knowledge/search", post(knowledge_search))
            .route("/app/v1/knowledge/{category}", get(knowledge_category))
            .route("/app/v1/templates", get(list_templates))
            .route("/app/v1/documents/generate", post(generate_document))
            .route("/app/v1/documents/save", post(save_document))
            .route("/app/v1/documents", get(list_documents))
            .route("/app/v1/subscribe", post(subscribe))
            .route("/app/v1/dashboard", get(dashboard))
            .route_layer(middleware::from_fn_with_state(state.clone(), authorize));

        // Router
        let app: Router = Router::new()
            .route("/app/v1/sign_in", post(sign_in))
            .route("/app/v1/register", post(register))
            .route("/app/v1/pricing", get(pricing))
            .merge(protected)
            .with_state(state);
        Self { app }
    }

    /// Serve the front-end assets for every other path
    ///
    /// Unknown paths such as `/auth/login` get `index.html` so the front-end can route them
    pub fn with_fallback(self, dir: &str) -> Self {
        let index = ServeFile::new(Path::new(dir).join("index.html"));
        Self {
            app: self
                .app
                .fallback(get_service(ServeDir::new(dir).not_found_service(index))),
        }
    }

    pub fn with_trace_layer(self) -> Self {
        Self {
            app: self.app.layer(TraceLayer::new_for_http()),
        }
    }

    pub fn with_cors_layer(self) -> Self {
        // CORS
        let cors_layer = if cfg!(debug_assertions) {
            CorsLayer::permissive()
        } else {
            let allow_origin = AllowOrigin::any();
            CorsLayer::new()
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
                .allow_origin(allow_origin)
        };
        Self {
            app: self.app.layer(cors_layer),
        }
    }

    pub fn build(self) -> Router {
        self.app
    }
}

pub struct Server {
    /// Server configuration
    config: ServerConfig,
}

impl Server {
    /// Create a new server from a configuration
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Run the server
    pub async fn run(&self) -> Result<()> {
        let state = ServerState::from_config(&self.config)?;
        let app: Router = AppBuilder::new(state)
            .with_fallback(self.config.assets_dir.as_str())
            .with_trace_layer()
            .with_cors_layer()
            .build();

        Self::serve(app, &self.config.address).await
    }

    async fn serve(app: Router, addr: &str) -> Result<()> {
        tracing::debug!("listening on {}", addr);
        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;
        Ok(())
    }
}
