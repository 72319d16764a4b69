//! Network module with deferred startup lifecycle.
//!
//! Implements the deferred startup pattern: `new()` creates resources,
//! `start()` binds the TCP listener, and `serve()` starts accepting
//! connections. This separation allows the rest of the application to
//! inspect shared state (e.g., the shutdown controller) between `start()`
//! and `serve()`.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use axum::routing::{delete, get, post, put};
use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use super::config::NetworkConfig;
use super::handlers::{
    create_batch_handler, create_handler, delete_handler, get_all_handler,
    get_average_capacity_handler, get_average_speed_handler, get_by_brand_years_handler,
    get_by_color_year_handler, get_by_dimensions_handler, get_by_fuel_type_handler,
    get_by_transmission_handler, get_by_weight_handler, health_handler, liveness_handler,
    readiness_handler, update_fuel_type_handler, update_speed_handler, AppState,
};
use super::middleware::build_http_layers;
use super::shutdown::ShutdownController;
use crate::service::VehicleService;

/// Manages the full HTTP server lifecycle.
///
/// Follows the deferred startup pattern:
/// 1. `new()` -- allocates shared state (service handle, shutdown controller)
/// 2. `start()` -- binds TCP listener to the configured address
/// 3. `serve()` -- begins accepting connections until shutdown is signalled
pub struct NetworkModule {
    config: NetworkConfig,
    service: Arc<dyn VehicleService>,
    listener: Option<TcpListener>,
    shutdown: Arc<ShutdownController>,
}

impl NetworkModule {
    /// Creates a new network module without binding any port.
    ///
    /// The shutdown controller is allocated immediately so it can be shared
    /// with other parts of the application before the server starts.
    #[must_use]
    pub fn new(config: NetworkConfig, service: Arc<dyn VehicleService>) -> Self {
        Self {
            config,
            service,
            listener: None,
            shutdown: Arc::new(ShutdownController::new()),
        }
    }

    /// Returns a shared reference to the shutdown controller.
    ///
    /// Callers use this to check health state or trigger shutdown.
    #[must_use]
    pub fn shutdown_controller(&self) -> Arc<ShutdownController> {
        Arc::clone(&self.shutdown)
    }

    /// Assembles the axum router with all routes and middleware.
    ///
    /// Routes:
    /// - `GET /health`, `/health/live`, `/health/ready` -- health surface
    /// - `GET/POST /vehicles` plus the filter, aggregate, and update routes
    ///   under `/vehicles/...`
    #[must_use]
    pub fn build_router(&self) -> Router {
        let state = AppState {
            service: Arc::clone(&self.service),
            shutdown: Arc::clone(&self.shutdown),
            config: Arc::new(self.config.clone()),
            start_time: Instant::now(),
        };

        let layers = build_http_layers(&self.config);

        Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler))
            .route("/vehicles", get(get_all_handler).post(create_handler))
            .route("/vehicles/batch", post(create_batch_handler))
            .route(
                "/vehicles/color/{color}/year/{year}",
                get(get_by_color_year_handler),
            )
            .route(
                "/vehicles/brand/{brand}/between/{start_year}/{end_year}",
                get(get_by_brand_years_handler),
            )
            .route("/vehicles/fuel_type/{type}", get(get_by_fuel_type_handler))
            .route(
                "/vehicles/transmission/{type}",
                get(get_by_transmission_handler),
            )
            .route("/vehicles/weight", get(get_by_weight_handler))
            .route("/vehicles/dimensions", get(get_by_dimensions_handler))
            .route(
                "/vehicles/average_speed/brand/{brand}",
                get(get_average_speed_handler),
            )
            .route(
                "/vehicles/average_capacity/brand/{brand}",
                get(get_average_capacity_handler),
            )
            .route("/vehicles/{id}/update_speed", put(update_speed_handler))
            .route("/vehicles/{id}/update_fuel", put(update_fuel_type_handler))
            .route("/vehicles/{id}", delete(delete_handler))
            .layer(layers)
            .with_state(state)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the configured
    /// port when port 0 is used (OS-assigned ephemeral port).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound (e.g., port in use).
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Starts serving connections until the shutdown signal fires.
    ///
    /// Consumes `self` because the listener is moved into the server.
    /// After the shutdown signal, the health state transitions to Draining,
    /// axum finishes in-flight requests, and the state ends at Stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the server encounters a fatal I/O error.
    ///
    /// # Panics
    ///
    /// Panics if `start()` was not called before `serve()`.
    pub async fn serve(
        mut self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let listener = self
            .listener
            .take()
            .expect("start() must be called before serve()");
        let router = self.build_router();
        let shutdown_ctrl = Arc::clone(&self.shutdown);

        // Transition to Ready so readiness probes pass.
        shutdown_ctrl.set_ready();
        info!("Serving HTTP connections");

        let drain_ctrl = Arc::clone(&shutdown_ctrl);
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                shutdown.await;
                drain_ctrl.trigger_shutdown();
            })
            .await?;

        shutdown_ctrl.set_stopped();
        info!("Server stopped");
        Ok(())
    }
}
