//! # Stockroom Command Shell
//!
//! Interactive front end for `stockroom-core`.
//!
//! ## Module Organization
//! ```text
//! stockroom_cli/
//! ├── lib.rs          ◄─── You are here (argument parsing & startup)
//! ├── config.rs       ◄─── stockroom.toml + STOCKROOM_* overrides
//! ├── state.rs        ◄─── Shared catalog (Arc<Mutex<Catalog>>)
//! ├── commands.rs     ◄─── Line parser, command execution, session loop
//! ├── seed.rs         ◄─── Demo products
//! └── error.rs        ◄─── CliError with short error codes
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod seed;
pub mod state;

use std::io;
use std::path::PathBuf;

use stockroom_core::{local_today, Catalog};
use tracing::{info, warn, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

use config::AppConfig;
use error::{CliError, CliResult};
use state::CatalogState;

/// Log filter used until the config says otherwise.
pub const DEFAULT_LOG_FILTER: &str = "info,stockroom=debug";

/// Swaps the active log filter once the config is loaded.
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Parsed command-line flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub no_seed: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses `args` as passed to the process (`args[0]` is the binary).
    pub fn parse(args: &[String]) -> CliResult<Self> {
        let mut parsed = CliArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let path = args
                        .get(i + 1)
                        .ok_or_else(|| CliError::Usage("--config <PATH>".into()))?;
                    parsed.config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--no-seed" => parsed.no_seed = true,
                "--help" | "-h" => parsed.help = true,
                other => {
                    return Err(CliError::Usage(format!(
                        "unexpected argument '{}' (try --help)",
                        other
                    )))
                }
            }
            i += 1;
        }

        Ok(parsed)
    }
}

/// Prints the `--help` text.
pub fn print_usage() {
    println!("Stockroom inventory shell");
    println!();
    println!("Usage: stockroom [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: platform config dir/stockroom.toml)");
    println!("      --no-seed        Start with an empty catalog");
    println!("  -h, --help           Show this help message");
    println!();
    println!("Type 'help' at the prompt for the command list.");
}

/// Runs the shell until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Shell Startup                                     │
/// │                                                                         │
/// │  1. Parse Flags ──────────────────────────────────────────────────────► │
/// │     • --config, --no-seed, --help                                       │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else the default filter; written to stderr              │
/// │                                                                         │
/// │  3. Load Config ──────────────────────────────────────────────────────► │
/// │     • Explicit --config path must load                                  │
/// │     • Default path falls back to defaults with a warning                │
/// │     • Without RUST_LOG, [logging] filter replaces the default           │
/// │                                                                         │
/// │  4. Build Catalog ────────────────────────────────────────────────────► │
/// │     • Demo products unless --no-seed or seed_demo_data = false          │
/// │                                                                         │
/// │  5. Session Loop ─────────────────────────────────────────────────────► │
/// │     • stdin commands, stdout reports                                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(args: Vec<String>) -> CliResult<()> {
    let args = CliArgs::parse(&args)?;
    if args.help {
        print_usage();
        return Ok(());
    }

    let (filter_handle, filter_from_env) = init_tracing();
    info!("Starting Stockroom shell");

    let config = match args.config_path {
        Some(path) => AppConfig::load(Some(path))?,
        None => AppConfig::load_or_default(None),
    };
    if !filter_from_env {
        apply_log_filter(&filter_handle, &config.logging.filter);
    }

    let mut catalog = Catalog::new();
    if config.inventory.seed_demo_data && !args.no_seed {
        seed::seed_catalog(&mut catalog, local_today())?;
    }
    let state = CatalogState::new(catalog);

    let stdin = io::stdin();
    let stdout = io::stdout();
    commands::run_session(&state, &config, stdin.lock(), stdout.lock())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Runs before the config is read so config warnings are not lost. Returns
/// the reload handle and whether `RUST_LOG` chose the filter.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=stockroom_core=trace` - Trace the catalog only
/// - Default: `info,stockroom=debug`, then the `[logging] filter` setting
fn init_tracing() -> (FilterHandle, bool) {
    let (filter, from_env) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, true),
        Err(_) => (EnvFilter::new(DEFAULT_LOG_FILTER), false),
    };

    let (subscriber, handle) = log_subscriber(filter, io::stderr);
    subscriber.init();
    (handle, from_env)
}

/// Formatting subscriber whose filter can be swapped through the handle.
fn log_subscriber<W>(
    filter: EnvFilter,
    writer: W,
) -> (impl Subscriber + Send + Sync + 'static, FilterHandle)
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let (filter, handle) = reload::Layer::new(filter);
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer));
    (subscriber, handle)
}

/// Replaces the active filter with `directives`. A bad filter keeps the
/// current one.
fn apply_log_filter(handle: &FilterHandle, directives: &str) {
    match EnvFilter::try_new(directives) {
        Ok(filter) => {
            if let Err(e) = handle.reload(filter) {
                warn!(error = %e, "Failed to apply log filter");
            }
        }
        Err(e) => warn!(
            filter = directives,
            error = %e,
            "Invalid [logging] filter, keeping default"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured_subscriber() -> (impl Subscriber + Send + Sync + 'static, FilterHandle, Captured) {
        let captured = Captured::default();
        let writer = captured.clone();
        let (subscriber, handle) =
            log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER), move || writer.clone());
        (subscriber, handle, captured)
    }

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("stockroom")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_no_flags() {
        assert_eq!(CliArgs::parse(&args(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn test_all_flags() {
        let parsed = CliArgs::parse(&args(&["--no-seed", "-c", "/tmp/s.toml", "--help"])).unwrap();
        assert!(parsed.no_seed);
        assert!(parsed.help);
        assert_eq!(parsed.config_path, Some(PathBuf::from("/tmp/s.toml")));
    }

    #[test]
    fn test_config_fallback_warning_is_logged() {
        let (subscriber, _handle, captured) = captured_subscriber();
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("stockroom.toml");
        std::fs::write(&broken, "display = 5\n").unwrap();

        let config = tracing::subscriber::with_default(subscriber, || {
            AppConfig::load_or_default(Some(broken))
        });

        assert_eq!(config, AppConfig::default());
        assert!(captured.text().contains("Failed to load config"));
    }

    #[test]
    fn test_config_filter_replaces_default() {
        let (subscriber, handle, captured) = captured_subscriber();

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!("logged under the default filter");
            apply_log_filter(&handle, "error");
            tracing::info!("dropped under the configured filter");
        });

        let text = captured.text();
        assert!(text.contains("logged under the default filter"));
        assert!(!text.contains("dropped under the configured filter"));
    }

    #[test]
    fn test_invalid_config_filter_keeps_default() {
        let (subscriber, handle, captured) = captured_subscriber();

        tracing::subscriber::with_default(subscriber, || {
            apply_log_filter(&handle, "stockroom=loudest");
            tracing::info!("still logged");
        });

        let text = captured.text();
        assert!(text.contains("Invalid [logging] filter"));
        assert!(text.contains("still logged"));
    }

    #[test]
    fn test_bad_flags() {
        assert!(matches!(
            CliArgs::parse(&args(&["--config"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            CliArgs::parse(&args(&["--verbose"])),
            Err(CliError::Usage(_))
        ));
    }
}
