//! Command-line argument parsing and processing.
//!
//! This module handles parsing of command-line arguments and provides a
//! clean interface for the main application logic. Flag values are kept as
//! raw strings here; numeric and time parsing happens during configuration
//! merging so every operator mistake surfaces as the same fatal
//! configuration error.

/// Raw operator-supplied overrides, applied on top of the configuration
/// file during merging.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CliOverrides {
    pub day_temp: Option<String>,
    pub night_temp: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub duration: Option<String>,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the continuous daemon with these settings
    Run {
        debug_enabled: bool,
        overrides: CliOverrides,
    },
    /// One-shot: force the night temperature and exit
    Enable {
        debug_enabled: bool,
        overrides: CliOverrides,
    },
    /// One-shot: force the day temperature and exit
    Disable {
        debug_enabled: bool,
        overrides: CliOverrides,
    },
    /// Display help information and exit
    ShowHelp,
    /// Display version information and exit
    ShowVersion,
    /// Show help due to unknown arguments and exit
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse command-line arguments into a structured result.
    ///
    /// Version and help flags take precedence over everything else; unknown
    /// flags or a missing flag value produce `ShowHelpDueToError`. `--enable`
    /// wins over `--disable` when both are given, matching the dispatch
    /// order of the one-shot commands.
    ///
    /// # Arguments
    /// * `args` - Iterator over command-line arguments (typically from std::env::args())
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut enable = false;
        let mut disable = false;
        let mut unknown_arg_found = false;
        let mut overrides = CliOverrides::default();

        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut idx = 0;
        while idx < args_vec.len() {
            let arg = args_vec[idx].as_str();

            // Value-consuming flags first
            let value_slot = match arg {
                "--def" => Some(&mut overrides.day_temp),
                "--temp" => Some(&mut overrides.night_temp),
                "--sunrise" => Some(&mut overrides.sunrise),
                "--sunset" => Some(&mut overrides.sunset),
                "--duration" => Some(&mut overrides.duration),
                _ => None,
            };

            if let Some(slot) = value_slot {
                match args_vec.get(idx + 1) {
                    // A leading '-' is only a value when it reads as a
                    // negative number; otherwise the flag's value is missing
                    Some(value)
                        if !value.starts_with('-')
                            || value[1..].chars().all(|c| c.is_ascii_digit()) =>
                    {
                        *slot = Some(value.clone());
                        idx += 2;
                    }
                    _ => {
                        unknown_arg_found = true;
                        idx += 1;
                    }
                }
                continue;
            }

            match arg {
                "--debug" | "-d" => debug_enabled = true,
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--enable" => enable = true,
                "--disable" => disable = true,
                _ => unknown_arg_found = true,
            }
            idx += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if enable {
            CliAction::Enable {
                debug_enabled,
                overrides,
            }
        } else if disable {
            CliAction::Disable {
                debug_enabled,
                overrides,
            }
        } else {
            CliAction::Run {
                debug_enabled,
                overrides,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("duskr [OPTIONS]");
    log_block_start!("Options:");
    log_indented!("--def <int>            Day temperature in Kelvin (default 6500)");
    log_indented!("--temp <int>           Night temperature in Kelvin (default 3000)");
    log_indented!("--sunrise <HH:MM>      Manual sunrise time (with --sunset, skips lookup)");
    log_indented!("--sunset <HH:MM>       Manual sunset time (with --sunrise, skips lookup)");
    log_indented!("--duration <int>       Transition duration in minutes, 0 = instant");
    log_indented!("--enable               Apply the night temperature once and exit");
    log_indented!("--disable              Apply the day temperature once and exit");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_end!();
}
