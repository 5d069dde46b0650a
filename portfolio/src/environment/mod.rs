use std::{net::SocketAddr, sync::Arc};

use portfolio_api_rest::{RealIpConfig, RestServer, RestServerConfig};
use portfolio_config::Config;
use portfolio_core_contact_impl::{
    spam::SpamFilter, ContactFeatureConfig, ContactFeatureServiceImpl,
};
use portfolio_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use portfolio_email_impl::{contact::ContactEmailServiceImpl, EmailServiceImpl};
use portfolio_persistence_postgres::{submission::PostgresSubmissionRepository, PostgresDatabase};
use portfolio_shared_impl::{id::IdServiceImpl, time::TimeServiceImpl};
use portfolio_templates_impl::TemplateServiceImpl;

type ContactEmail = ContactEmailServiceImpl<EmailServiceImpl, TemplateServiceImpl>;

type Contact = ContactFeatureServiceImpl<
    PostgresDatabase,
    TimeServiceImpl,
    IdServiceImpl,
    PostgresSubmissionRepository,
    ContactEmail,
>;

type Health = HealthFeatureServiceImpl<TimeServiceImpl, PostgresDatabase, EmailServiceImpl>;

/// Wire up the service graph from the loaded configuration and the database
/// and SMTP connections.
pub fn build_rest_server(
    config: &Config,
    database: PostgresDatabase,
    email: Option<EmailServiceImpl>,
) -> anyhow::Result<RestServer<Health, Contact>> {
    let owner_email = config
        .contact
        .notification_email
        .clone()
        .or_else(|| config.email.as_ref().map(|email| email.from.clone()))
        .map(|email| Arc::new(email.with_name(config.contact.owner_name.clone())));

    let contact_email = email
        .clone()
        .map(|email| ContactEmailServiceImpl::new(email, TemplateServiceImpl::default()));

    let contact = ContactFeatureServiceImpl::new(
        database.clone(),
        TimeServiceImpl,
        IdServiceImpl,
        PostgresSubmissionRepository,
        contact_email,
        ContactFeatureConfig {
            owner_email,
            owner_name: config.contact.owner_name.clone(),
            duplicate_window: config.contact.duplicate_window.into(),
        },
        SpamFilter::new(&config.contact.spam_keywords)?,
    );

    let health = HealthFeatureServiceImpl::new(
        TimeServiceImpl,
        database,
        email,
        HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );

    let rest_config = RestServerConfig {
        addr: SocketAddr::new(config.http.host, config.http.port),
        real_ip_config: config.http.real_ip.as_ref().map(|real_ip| {
            Arc::new(RealIpConfig {
                header: real_ip.header.clone(),
                set_from: real_ip.set_from,
            })
        }),
    };

    Ok(RestServer::new(health, contact, rest_config))
}
