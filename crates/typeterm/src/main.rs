//! `typeterm`: a typewriter-style console in the terminal.
//!
//! Type `help` to list the commands, `clear` to wipe the screen, Esc or
//! Ctrl-C to quit. Logs go to `typeterm.log` in the system temp directory.

mod app;
mod view;

use app::ConsoleApp;
use typeterm_core::ConsoleConfig;
use typeterm_runtime::ProgramOptions;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = ProgramOptions {
        title: Some("typeterm".into()),
        log_file: Some(std::env::temp_dir().join("typeterm.log")),
        ..ProgramOptions::default()
    };
    typeterm_runtime::run_with::<ConsoleApp>(ConsoleConfig::default(), options).await?;
    Ok(())
}
