//! Command handlers.

pub mod devices;
pub mod registers;
pub mod set;
pub mod state;
pub mod util;
pub mod watch;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        // The catalog is static; no portal connection needed.
        Command::Registers => registers::handle(global),

        Command::Devices => devices::handle(global).await,
        Command::Status(args) => state::handle_status(args, global).await,
        Command::Get(args) => state::handle_get(args, global).await,
        Command::Set(args) => set::handle(args, global).await,
        Command::Watch(args) => watch::handle(args, global).await,
    }
}
