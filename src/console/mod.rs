//! Console driver
//! 
//! Reads commands from stdin and prints JSON responses, standing in for the
//! game's command layer.

pub mod commands;
pub mod handlers;
pub mod responses;
pub mod storage;

use tokio::io::{self, AsyncBufReadExt, BufReader};
use tracing::{error, info};

use crate::utils::shutdown_signal;

pub use commands::Command;
pub use handlers::Console;
pub use responses::ConsoleResponse;

fn print_response(response: &ConsoleResponse) {
    match serde_json::to_string_pretty(response) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to render response: {}", e),
    }
}

/// Serve console commands until `quit`, end of input or a shutdown signal.
pub async fn run_console(mut console: Console) {
    let mut lines = BufReader::new(io::stdin()).lines();
    let mut updates = console.subscribe();
    let mut expired = updates.borrow().is_expired();

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("Console input closed");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read console input: {}", e);
                        break;
                    }
                };

                let command = match line.parse::<Command>() {
                    Ok(Command::Quit) => break,
                    Ok(command) => command,
                    Err(e) => {
                        println!("{} ({})", e, commands::HELP);
                        continue;
                    }
                };

                let response = console.handle(command).await;
                print_response(&response);

                // A load swaps the session, so follow the current clock.
                updates = console.subscribe();
                expired = updates.borrow().is_expired();
            }

            changed = updates.changed() => {
                if changed.is_err() {
                    updates = console.subscribe();
                    continue;
                }
                let reading = *updates.borrow_and_update();
                if reading.is_expired() && !expired {
                    info!("Time is up after {}s", reading.elapsed);
                    print_response(&ConsoleResponse::ok("Time is up".to_string(), console.session()));
                }
                expired = reading.is_expired();
            }

            _ = &mut shutdown => {
                info!("Shutdown signal received");
                break;
            }
        }
    }
}
