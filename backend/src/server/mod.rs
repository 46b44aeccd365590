//! Server construction and adapter selection.

mod config;

pub use config::{AppSettings, SmtpSettings, StorageBackend};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::{NoopNotifier, Notifier, Storage};
use crate::inbound::http::api_routes;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::outbound::notify::SmtpNotifier;
use crate::outbound::persistence::{MemoryStorage, MongoStorage, MysqlStorage};

/// Construct and initialise the storage adapter named by the settings.
///
/// Durable backends connect and run their idempotent schema setup here, so
/// a failure surfaces before the listener binds.
///
/// # Errors
///
/// Returns [`std::io::Error`] when a durable backend is selected without
/// its connection settings, or when connecting/initialising fails.
pub async fn build_storage(settings: &AppSettings) -> std::io::Result<Arc<dyn Storage>> {
    match settings.storage() {
        StorageBackend::Memory => {
            info!(backend = "memory", "storage selected");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::Mysql => {
            let url = settings
                .mysql_url
                .as_deref()
                .ok_or_else(|| std::io::Error::other("mysql storage selected but no mysql_url"))?;
            info!(backend = "mysql", "storage selected");
            let storage = MysqlStorage::connect(url, settings.mysql_pool_size())
                .await
                .map_err(std::io::Error::other)?;
            storage.initialize().await.map_err(std::io::Error::other)?;
            Ok(Arc::new(storage))
        }
        StorageBackend::Mongodb => {
            let uri = settings
                .mongo_uri
                .as_deref()
                .ok_or_else(|| std::io::Error::other("mongodb storage selected but no mongo_uri"))?;
            info!(backend = "mongodb", database = settings.mongo_database(), "storage selected");
            let storage = MongoStorage::connect(uri, settings.mongo_database())
                .await
                .map_err(std::io::Error::other)?;
            storage.initialize().await.map_err(std::io::Error::other)?;
            Ok(Arc::new(storage))
        }
    }
}

/// Construct the notifier: SMTP when configured, otherwise a no-op sink.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the configured relay or sender is
/// malformed.
pub fn build_notifier(settings: &AppSettings) -> std::io::Result<Arc<dyn Notifier>> {
    match settings.smtp() {
        Some(smtp) => {
            info!(relay = %smtp.relay, "smtp notifier enabled");
            let notifier =
                SmtpNotifier::new(&smtp.relay, smtp.port, smtp.username, smtp.password, &smtp.from)
                    .map_err(std::io::Error::other)?;
            Ok(Arc::new(notifier))
        }
        None => Ok(Arc::new(NoopNotifier)),
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_routes())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server over the given port implementations.
///
/// The caller owns readiness: call [`HealthState::mark_ready`] after
/// seeding completes.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    bind_addr: &str,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server = HttpServer::new(move || {
        build_app(health_state.clone(), http_state.clone())
    })
    .bind(bind_addr)?
    .run();
    Ok(server)
}
