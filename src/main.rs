//! Binary entry point: CLI dispatch and the top-level error handler.
//!
//! All fatal errors converge here. Fallible operations return `Result`
//! through the library layers; this function logs the error chain and
//! exits non-zero, preserving fail-fast semantics with no partial state.

use duskr::args::{self, CliAction, ParsedArgs};
use duskr::{Duskr, commands, log_end, log_error, log_pipe, log_version};

fn main() {
    let ParsedArgs { action } = ParsedArgs::from_env();

    let result = match action {
        CliAction::ShowHelp => {
            args::display_help();
            return;
        }
        CliAction::ShowVersion => {
            args::display_version_info();
            return;
        }
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(1);
        }
        CliAction::Run {
            debug_enabled,
            overrides,
        } => Duskr::new(debug_enabled, overrides).run(),
        CliAction::Enable {
            debug_enabled,
            overrides,
        } => {
            log_version!();
            commands::enable(&overrides, debug_enabled)
        }
        CliAction::Disable {
            debug_enabled,
            overrides,
        } => {
            log_version!();
            commands::disable(&overrides, debug_enabled)
        }
    };

    if let Err(e) = result {
        log_pipe!();
        log_error!("{e:#}");
        log_end!();
        std::process::exit(1);
    }
}
