use design_server::{Config, Server, ServerState, init_logger_with_file, print_banner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment (dotenv before config reads env vars)
    let _ = dotenv::dotenv();

    // 2. Load configuration
    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    // 3. Logging (file output in the work dir)
    let logs_dir = config.logs_dir();
    init_logger_with_file(
        std::env::var("LOG_LEVEL").ok().as_deref(),
        logs_dir.to_str(),
    );

    print_banner();
    tracing::info!("Design server starting...");

    // 4. Initialize server state
    let state = ServerState::initialize(&config).await;

    // 5. Run the HTTP server
    let server = Server::with_state(config, state);
    if let Err(e) = server.run().await {
        tracing::error!("Server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
