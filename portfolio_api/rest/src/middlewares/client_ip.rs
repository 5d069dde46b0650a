//! Attach the client ip to each request, optionally resolving it from a
//! reverse proxy header.

use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    extract::{ConnectInfo, Request},
    middleware::{from_fn, Next},
    Router,
};
use tracing::{debug, warn};

use crate::RealIpConfig;

pub fn add<S: Clone + Send + Sync + 'static>(
    router: Router<S>,
    config: Option<Arc<RealIpConfig>>,
) -> Router<S> {
    router.layer(from_fn(move |mut request: Request, next: Next| {
        let client_ip = resolve(&request, config.as_deref());
        request.extensions_mut().insert(client_ip);
        next.run(request)
    }))
}

/// The ip a request originated from, as far as the server can tell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientIp(pub IpAddr);

fn resolve(request: &Request, config: Option<&RealIpConfig>) -> ClientIp {
    let peer_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .unwrap()
        .ip();

    let Some(RealIpConfig { header, set_from }) = config else {
        return ClientIp(peer_ip);
    };

    // The header is only honored on connections from the configured proxy.
    if peer_ip != *set_from {
        if request.headers().contains_key(header) {
            debug!(%peer_ip, "ignoring {header} header from untrusted peer");
        }
        return ClientIp(peer_ip);
    }

    let real_ip = request
        .headers()
        .get(header)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<IpAddr>().ok());

    match real_ip {
        Some(real_ip) => ClientIp(real_ip),
        None => {
            warn!(%peer_ip, "missing or invalid {header} header on proxied connection");
            ClientIp(peer_ip)
        }
    }
}
