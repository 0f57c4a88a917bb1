use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post, put},
};
use axum_extra::{
    TypedHeader,
    headers::{Error as AxumError, Header},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use std::{path::PathBuf, sync::Arc};

use crate::{ServerError, children, expenses, pin};
use engine::Engine;

static ADMIN_PIN_HEADER: axum::http::HeaderName =
    axum::http::HeaderName::from_static(api_types::auth::ADMIN_PIN_HEADER);

/// Runtime options of the HTTP server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// PIN every admin request must carry in `X-Admin-PIN`.
    pub admin_pin: String,
    /// Directory with the built web client. Unknown paths fall back to its
    /// `index.html`.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            admin_pin: "1122".to_string(),
            static_dir: None,
        }
    }
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub admin_pin: Arc<str>,
}

/// `TypedHeader` for the admin PIN.
///
/// Parent requests must contain the "x-admin-pin" entry in the header.
#[derive(Debug)]
struct AdminPin(String);

impl Header for AdminPin {
    fn name() -> &'static axum::http::HeaderName {
        &ADMIN_PIN_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, AxumError>
    where
        Self: Sized,
        I: Iterator<Item = &'i axum::http::HeaderValue>,
    {
        let value = values.next().ok_or_else(AxumError::invalid)?;
        let Ok(value) = value.to_str() else {
            return Err(AxumError::invalid());
        };

        Ok(AdminPin(value.to_string()))
    }

    fn encode<E: Extend<axum::http::HeaderValue>>(&self, values: &mut E) {
        match axum::http::HeaderValue::from_str(&self.0) {
            Ok(value) => values.extend(std::iter::once(value)),
            Err(_) => tracing::error!("failed to encode x-admin-pin header"),
        }
    }
}

async fn admin_pin(
    pin_header: Option<TypedHeader<AdminPin>>,
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Some(TypedHeader(AdminPin(pin))) = pin_header else {
        tracing::debug!("admin request without pin");
        return Err(ServerError::Unauthorized);
    };

    if pin != *state.admin_pin {
        tracing::warn!("admin request with invalid pin");
        return Err(ServerError::Unauthorized);
    }

    Ok(next.run(request).await)
}

/// API routes only, without CORS, tracing or static files.
pub fn router(state: ServerState) -> Router {
    let admin = Router::new()
        .route("/expenses", post(expenses::create))
        .route(
            "/expenses/{id}",
            put(expenses::update).delete(expenses::delete),
        )
        .route("/verify-pin", post(pin::verify))
        .route_layer(middleware::from_fn_with_state(state.clone(), admin_pin));

    Router::new()
        .route("/children", get(children::list))
        .route("/children/{id}/expenses", get(children::expenses))
        .route("/children/{id}/total", get(children::total))
        .merge(admin)
        .with_state(state)
}

/// Full application: API routes plus CORS, request tracing and, when
/// configured, the static web client.
pub fn app(engine: Engine, config: &ServerConfig) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
        admin_pin: Arc::from(config.admin_pin.as_str()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = router(state);
    if let Some(static_dir) = &config.static_dir {
        tracing::info!("Serving static files from {}", static_dir.display());
        let index_file = static_dir.join("index.html");
        let static_service = ServeDir::new(static_dir).fallback(ServeFile::new(index_file));
        router = router.fallback_service(static_service);
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}

pub async fn run_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(engine, &config)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    config: ServerConfig,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, config, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
