use portfolio_config::Config;
use portfolio_email_contracts::EmailService;
use portfolio_persistence_contracts::Database;
use tracing::{info, warn};

use crate::{database, email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Connecting to database");
    let database = database::connect(&config.database).await?;
    database.ping().await?;

    info!("Applying pending migrations");
    let mut applied = false;
    for name in database.run_migrations(None).await? {
        info!("Applied {name}");
        applied = true;
    }
    if !applied {
        info!("No migrations pending");
    }

    let email = match &config.email {
        Some(email_config) => {
            info!("Connecting to smtp server");
            let email = email::connect(email_config)?;
            email.ping().await?;
            Some(email)
        }
        None => {
            warn!("No smtp server configured, email notifications are disabled");
            None
        }
    };

    let server = environment::build_rest_server(&config, database, email)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
