use std::env;

use authme::{
    auth::offline::offline_session,
    session::{config::Config, manager::SessionManager},
};

/// Logs into an account and checks the new session.
///
/// Reads the credentials from `AUTHME_USERNAME` and `AUTHME_PASSWORD`.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let username = env::var("AUTHME_USERNAME")?;
    let password = env::var("AUTHME_PASSWORD")?;

    let manager = SessionManager::yggdrasil(&Config::default(), offline_session("Player"))?;

    // Errors from the identity service are returned as is.
    let session = manager.login_online(&username, &password).await?;
    println!("Logged in as {} ({:?})", session.display_name, session.account_type);

    // Checked against the session server at most once per minute.
    println!("Session status: {}", manager.status().await);
    println!("Session status: {}", manager.status().await);

    Ok(())
}
