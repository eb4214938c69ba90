use authme::{
    auth::{offline::offline_session, yggdrasil::YggdrasilClient},
    session::{
        config::Config,
        emitter::{Emitter, Event},
        manager::SessionManager,
        store::MemorySessionStore,
    },
};

/// Switches to an offline session and checks its status.
///
/// Offline sessions carry a token the identity service never accepts, so the
/// check reports them as invalid.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::default();

    // Listeners run on their own threads.
    let emitter = Emitter::default();
    emitter.on(
        Event::SessionChanged,
        |(name, id): (String, String)| {
            println!("Session changed to {} ({})", name, id);
        },
    );

    let manager = SessionManager::with_emitter(
        &config,
        YggdrasilClient::new(&config)?,
        MemorySessionStore::new(offline_session("Player")),
        emitter,
    );

    let session = manager.login_offline("Lyra");
    println!("Logged in offline as {} with id {}", session.display_name, session.account_id);

    let status = manager.status().await;
    println!("Session status: {}", status);

    Ok(())
}
