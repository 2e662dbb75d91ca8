use crate::access::{AccessGate, AnonymousGate, RemoteSessionGate};
use crate::catalog::{
    CatalogSource, CatalogStore, JsonFileCatalog, RemoteCatalog, RotationCursor, SampleCatalog,
};
use crate::config::{CatalogLocation, Config};
use crate::submissions::{DiscardSink, JsonLinesSink, SubmissionSink};
use anyhow::{Context, Result};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::{catch_panic::CatchPanicLayer, compression::CompressionLayer, trace::TraceLayer};
use tracing::{error, info};

pub mod auth;
pub mod params;
pub mod routes;

/// Shared handles every request works against
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CatalogStore>,
    pub cursor: Arc<RotationCursor>,
    pub gate: Arc<dyn AccessGate>,
    pub sink: Arc<dyn SubmissionSink>,
    pub publishable_key: Arc<str>,
}

impl AppState {
    /// State with an empty catalog, anonymous gate and discarding sink
    pub fn new(store: Arc<CatalogStore>) -> Self {
        Self {
            store,
            cursor: Arc::new(RotationCursor::new()),
            gate: Arc::new(AnonymousGate),
            sink: Arc::new(DiscardSink::new()),
            publishable_key: Arc::from(""),
        }
    }

    pub fn with_gate(mut self, gate: Arc<dyn AccessGate>) -> Self {
        self.gate = gate;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn SubmissionSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_publishable_key(mut self, key: &str) -> Self {
        self.publishable_key = Arc::from(key);
        self
    }
}

pub fn router(state: AppState) -> Router {
    let dashboard = Router::new()
        .route("/dashboard", get(routes::dashboard))
        .route_layer(middleware::from_fn(auth::require_identity));

    Router::new()
        .route("/health", get(routes::health))
        .route("/", get(routes::home))
        .route("/properties", get(routes::list_properties))
        .route("/properties/filter", get(routes::filter_properties))
        .route("/properties/:slug", get(routes::property_detail))
        .route("/properties/:slug/gallery", get(routes::property_gallery))
        .route("/carousel/next", get(routes::carousel_next))
        .route("/carousel/prev", get(routes::carousel_prev))
        .route("/about", get(routes::about))
        .route("/contact", get(routes::contact_page).post(routes::submit_contact))
        .route("/api/newsletter", post(routes::newsletter))
        .route("/sign-in", get(routes::sign_in))
        .route("/sign-up", get(routes::sign_up))
        .merge(dashboard)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::annotate_identity,
        ))
        .layer(CompressionLayer::new())
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn catalog_source(location: &CatalogLocation) -> Result<Arc<dyn CatalogSource>> {
    let source: Arc<dyn CatalogSource> = match location {
        CatalogLocation::Sample => Arc::new(SampleCatalog::new()),
        CatalogLocation::File(path) => Arc::new(JsonFileCatalog::new(path.clone())),
        CatalogLocation::Remote(url) => Arc::new(RemoteCatalog::new(url.clone())?),
    };
    Ok(source)
}

/// Assemble state from configuration. A catalog that cannot be loaded here
/// is fatal; later refresh failures are not.
pub async fn build_state(config: &Config) -> Result<(AppState, Arc<dyn CatalogSource>)> {
    let source = catalog_source(&config.catalog)?;
    let store = Arc::new(CatalogStore::empty());
    store
        .reload(source.as_ref())
        .await
        .context("Initial catalog load failed")?;

    let gate: Arc<dyn AccessGate> = match &config.identity {
        Some(provider) => Arc::new(RemoteSessionGate::new(
            provider.verify_url.clone(),
            provider.secret_key.clone(),
        )?),
        None => Arc::new(AnonymousGate),
    };

    let sink: Arc<dyn SubmissionSink> = match &config.submissions_path {
        Some(path) => Arc::new(
            JsonLinesSink::open(path.clone())
                .await
                .context("Failed to open submissions log")?,
        ),
        None => Arc::new(DiscardSink::new()),
    };

    info!(
        "Catalog source: {}, access gate: {}, submissions: {}",
        source.source_name(),
        gate.gate_name(),
        sink.sink_name()
    );

    let state = AppState::new(store)
        .with_gate(gate)
        .with_sink(sink)
        .with_publishable_key(&config.publishable_key);

    Ok((state, source))
}

pub async fn start_server(config: Config) -> Result<()> {
    info!("Initializing state...");
    let (state, source) = build_state(&config).await?;

    if let Some(every) = config.catalog_refresh {
        info!("Refreshing catalog every {}s", every.as_secs());
        let _refresher = Arc::clone(&state.store).spawn_refresher(source, every);
    }

    let app = router(state);

    let address = format!("0.0.0.0:{}", config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server running on {address} ({})", config.environment);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
