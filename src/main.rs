//! Adventure Session - console front end for the play-session engine
//! 
//! This is the main entry point for the adventure-session application.

use tracing::info;

use adventure_session::{
    config::Config,
    console::{run_console, storage, Console},
    state::{GameSession, Leaderboard},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("adventure_session={}", config.log_level()))
        .with_writer(std::io::stderr)
        .init();

    info!("Starting adventure-session v1.0.0");
    info!("Configuration: limit={}s, tick={}ms, save_file={}, leaderboard_file={}",
          config.limit, config.tick_millis, config.save_file.display(), config.leaderboard_file.display());

    let board = Leaderboard::global();
    storage::read_leaderboard(&config.leaderboard_file, board).await?;

    // A new session starts with its clock running
    let session = GameSession::new(config.limit, config.scheduler())?;

    info!("Commands:");
    info!("  toggle        - Pause or resume the clock");
    info!("  status        - Show clock and timer mode");
    info!("  save / load   - Write or restore {}", config.save_file.display());
    info!("  finish <name> - End the game and record the time");
    info!("  board         - Show the best times");
    info!("  quit          - Exit");

    run_console(Console::new(session, board, &config)).await;

    info!("Session closed");
    Ok(())
}
