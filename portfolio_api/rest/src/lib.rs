use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::Router;
use portfolio_core_contact_contracts::ContactFeatureService;
use portfolio_core_health_contracts::HealthFeatureService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

mod extractors;
mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone)]
pub struct RestServer<Health, Contact> {
    health: Health,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    pub real_ip_config: Option<Arc<RealIpConfig>>,
}

#[derive(Debug, Clone)]
pub struct RealIpConfig {
    /// Header to read the client ip from.
    pub header: String,
    /// The header is only trusted if the connection comes from this address.
    pub set_from: IpAddr,
}

impl<Health, Contact> RestServer<Health, Contact>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
{
    pub fn new(health: Health, contact: Contact, config: RestServerConfig) -> Self {
        Self {
            health,
            contact,
            config,
        }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let real_ip_config = self.config.real_ip_config.clone();

        let router = self.router();
        let router = middlewares::trace::add(router);
        let router = middlewares::client_ip::add(router, real_ip_config);
        let router = middlewares::request_id::add(router);
        let router = middlewares::panic_handler::add(router);

        let listener = TcpListener::bind(addr).await?;
        info!("Listening on {}", listener.local_addr()?);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(self.contact.into()))
            .fallback(routes::not_found)
            .layer(CorsLayer::permissive())
    }
}
