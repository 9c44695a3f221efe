use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{Router, extract::FromRef, routing::get};
use curio_auth::middleware::AuthState;
use curio_auth::{
    DynCredentialStore, InMemoryCredentialStore, PasswordHasher, SessionService, TokenService,
};
use curio_cache::{CacheAsideReader, DynItemCache, MemoryItemCache, RedisItemCache};
use curio_db_memory::InMemoryItemStore;
use curio_graphql::{GraphQLState, build_schema, graphql_handler, graphql_playground};
use curio_storage::DynItemStore;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::{AppConfig, RedisConfig};
use crate::{bootstrap, handlers};

/// Shared application state behind the router.
#[derive(Clone)]
pub struct AppState {
    pub graphql: GraphQLState,
    pub store: DynItemStore,
    pub cache: DynItemCache,
}

impl FromRef<AppState> for GraphQLState {
    fn from_ref(state: &AppState) -> Self {
        state.graphql.clone()
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.graphql.auth.clone()
    }
}

/// Create a cache backend based on configuration.
///
/// - Redis disabled: in-process cache only.
/// - Redis enabled: a Redis-backed cache over a lazily-connecting pool. The
///   in-process fallback applies only when the pool itself cannot be built
///   (a malformed URL); an unreachable Redis keeps the Redis backend, since
///   connections are established per command and reads fall through to the
///   store until it returns. Readiness reports the outage as degraded.
pub async fn create_cache_backend(config: &RedisConfig) -> DynItemCache {
    if !config.enabled {
        tracing::info!("Redis disabled, using in-process cache");
        return Arc::new(MemoryItemCache::new());
    }

    tracing::info!(url = %config.url, "Connecting to Redis");

    let mut redis_config = deadpool_redis::Config::from_url(&config.url);
    let mut pool_config = deadpool_redis::PoolConfig::new(config.pool_size);
    let timeout = Some(Duration::from_millis(config.timeout_ms));
    pool_config.timeouts.wait = timeout;
    pool_config.timeouts.create = timeout;
    pool_config.timeouts.recycle = timeout;
    redis_config.pool = Some(pool_config);

    let pool = match redis_config.create_pool(Some(deadpool_redis::Runtime::Tokio1)) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create Redis pool, falling back to in-process cache");
            return Arc::new(MemoryItemCache::new());
        }
    };

    // Probe once so the startup log tells the operator whether Redis is up,
    // but keep the Redis backend either way.
    match pool.get().await {
        Ok(_) => tracing::info!("Connected to Redis"),
        Err(e) => {
            tracing::warn!(error = %e, "Redis unreachable at startup; cache reads degrade until it returns");
        }
    }

    Arc::new(RedisItemCache::new(pool))
}

/// Constructs every component and wires them into the shared state.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    let item_store = Arc::new(InMemoryItemStore::new());
    bootstrap::seed_items(&item_store, &cfg.bootstrap);
    let store: DynItemStore = item_store;

    let cache = create_cache_backend(&cfg.redis).await;
    let items = CacheAsideReader::new(store.clone(), cache.clone(), cfg.cache.item_ttl);

    let tokens = Arc::new(TokenService::new(&cfg.auth.secret));
    let hasher = Arc::new(PasswordHasher::new(&cfg.auth.password)?);
    let credentials: DynCredentialStore = Arc::new(InMemoryCredentialStore::new());
    let sessions = Arc::new(SessionService::new(
        credentials.clone(),
        hasher,
        tokens.clone(),
        &cfg.auth,
    ));

    let graphql = GraphQLState {
        schema: build_schema(),
        auth: AuthState::new(tokens),
        items,
        sessions,
        credentials,
    };

    Ok(AppState {
        graphql,
        store,
        cache,
    })
}

pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let state = build_state(cfg).await?;
    Ok(build_router(cfg, state))
}

pub fn build_router(cfg: &AppConfig, state: AppState) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        // GraphQL: playground on GET, execution on POST
        .route("/graphql", get(graphql_playground).post(graphql_handler))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     _span: &tracing::Span| {
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub struct CurioServer {
    addr: SocketAddr,
    app: Router,
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub async fn build(self) -> anyhow::Result<CurioServer> {
        let app = build_app(&self.config).await?;

        Ok(CurioServer {
            addr: self.addr,
            app,
        })
    }
}

impl CurioServer {
    pub async fn run(self) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    // Wait for Ctrl+C
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
