mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use icy_api::{AppState, AppStateInner};
use icy_clients::{GeminiClient, SendGridClient, YouTubeClient};
use icy_db::Database;
use icy_outreach::{Discovery, MailDelivery, MessageGenerator, OutreachSender};

use crate::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "icy=debug,tower_http=debug".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("FATAL: {:#}", e);
            eprintln!("       Set it in your .env file and restart.");
            std::process::exit(1);
        }
    };

    let db = Arc::new(Database::open(&config.db_path)?);
    info!("Database ready at {}", config.db_path.display());

    let search = Arc::new(YouTubeClient::new(config.youtube_api_key.clone()));
    let llm = Arc::new(GeminiClient::new(config.gemini_api_key.clone()).with_model(&config.gemini_model));
    let mail: Option<Arc<dyn MailDelivery>> = match &config.sendgrid_api_key {
        Some(key) => Some(Arc::new(SendGridClient::new(key.clone()))),
        None => {
            warn!("SENDGRID_API_KEY is not set; sending outreach email is disabled");
            None
        }
    };

    let state: AppState = Arc::new(AppStateInner {
        discovery: Discovery::new(search, db.clone()),
        generator: MessageGenerator::new(llm, db.clone()).with_default_owner(config.default_owner.clone()),
        sender: OutreachSender::new(mail, db.clone(), config.sender_email.clone()),
        db,
    });

    let app = icy_api::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("ICY outreach server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();
    #[cfg(unix)]
    {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => info!("Received Ctrl+C, shutting down..."),
                    _ = sigterm.recv() => info!("Received SIGTERM, shutting down..."),
                }
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                ctrl_c.await.ok();
                info!("Received Ctrl+C, shutting down...");
            }
        }
    }
    #[cfg(not(unix))]
    {
        ctrl_c.await.ok();
        info!("Received Ctrl+C, shutting down...");
    }
}
