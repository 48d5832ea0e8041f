//! SantaTerm - a crashed terminal hiding a holiday gift
//!
//! Parses arguments, sets up logging, starts a tokio runtime for the session
//! timers and opens the terminal window.

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, Context};
use eframe::egui;
use tracing::{debug, error, info, warn};

use santaterm::config::Config;
use santaterm::ui::TerminalApp;
use santaterm::{Session, SessionConfig};

/// Speed multiplier applied by `--fast`
const FAST_SPEED: f64 = 10.0;

/// Application arguments
#[derive(Debug, Default, PartialEq)]
struct AppArgs {
    /// Configuration file path
    config_path: Option<PathBuf>,
    /// Enable debug mode
    debug: bool,
    /// Fixed random seed
    seed: Option<u64>,
    /// Play every sequence ten times faster
    fast: bool,
}

/// What the command line asked for
#[derive(Debug, PartialEq)]
enum Invocation {
    Run(AppArgs),
    Help,
    Version,
}

impl AppArgs {
    /// Parse command line arguments
    fn parse<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Invocation> {
        let args: Vec<String> = args.into_iter().collect();
        let mut app_args = AppArgs::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" => {
                    let path = args
                        .get(i + 1)
                        .ok_or_else(|| anyhow!("Missing config file path"))?;
                    app_args.config_path = Some(PathBuf::from(path));
                    i += 1;
                }
                "--debug" | "-d" => {
                    app_args.debug = true;
                }
                "--seed" | "-s" => {
                    let seed = args.get(i + 1).ok_or_else(|| anyhow!("Missing seed value"))?;
                    app_args.seed = Some(
                        seed.parse()
                            .with_context(|| format!("Invalid seed: {}", seed))?,
                    );
                    i += 1;
                }
                "--fast" => {
                    app_args.fast = true;
                }
                "--help" | "-?" => return Ok(Invocation::Help),
                "--version" | "-v" => return Ok(Invocation::Version),
                arg if arg.starts_with('-') => {
                    return Err(anyhow!("Unknown option: {}", arg));
                }
                _ => {
                    warn!("Ignoring positional argument: {}", args[i]);
                }
            }
            i += 1;
        }

        Ok(Invocation::Run(app_args))
    }

    /// Apply command-line overrides on top of the loaded configuration
    fn apply(&self, config: &mut Config) {
        if let Some(seed) = self.seed {
            config.session.seed = Some(seed);
        }
        if self.fast {
            config.timing.speed *= FAST_SPEED;
        }
    }
}

/// Print help information
fn print_help() {
    println!("SantaTerm - {}", santaterm::DESCRIPTION);
    println!();
    println!("USAGE:");
    println!("    santaterm [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --config <PATH>    Path to configuration file");
    println!("    -d, --debug            Enable debug logging");
    println!("    -s, --seed <N>         Fixed random seed for reproducible runs");
    println!("        --fast             Play every sequence ten times faster");
    println!("    -?, --help             Print this help message");
    println!("    -v, --version          Print version information");
    println!();
    println!("CONFIGURATION:");
    println!("    SantaTerm looks for configuration files in the following order:");
    println!("    1. Path specified with --config");
    println!("    2. $SANTATERM_CONFIG");
    println!("    3. <config dir>/santaterm/config.toml (or .json)");
    println!("    4. ~/.santaterm.toml");
    println!("    5. ./santaterm.toml");
    println!("    6. Built-in defaults");
    println!();
    println!("ENVIRONMENT:");
    println!("    SANTATERM_CONFIG       Path to configuration file");
    println!("    SANTATERM_DEBUG        Enable debug logging (1 or true)");
    println!("    RUST_LOG               Set logging level (error, warn, info, debug, trace)");
}

fn debug_from_env() -> bool {
    env::var("SANTATERM_DEBUG").is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

fn init_logging(debug: bool) {
    let log_level = if debug || debug_from_env() {
        "debug"
    } else {
        "info"
    };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(env_filter))
        .with_target(false)
        .compact()
        .init();
}

/// Create native options for the application window
fn create_native_options(config: &Config) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("SantaTerm")
            .with_app_id("santaterm")
            .with_inner_size([config.ui.window_width, config.ui.window_height])
            .with_min_inner_size([400.0, 300.0]),
        ..Default::default()
    }
}

fn main() -> anyhow::Result<()> {
    let args = match AppArgs::parse(env::args()) {
        Ok(Invocation::Run(args)) => args,
        Ok(Invocation::Help) => {
            print_help();
            return Ok(());
        }
        Ok(Invocation::Version) => {
            println!("SantaTerm v{}", santaterm::VERSION);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Failed to parse arguments: {:#}", e);
            print_help();
            process::exit(1);
        }
    };

    init_logging(args.debug);
    info!("Starting SantaTerm v{}", santaterm::VERSION);
    debug!("Arguments: {:?}", args);

    let mut config = santaterm::load_config(args.config_path.as_deref());
    args.apply(&mut config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("santaterm-timer")
        .build()
        .context("Failed to start tokio runtime")?;
    let _guard = runtime.enter();

    let session = Session::new(SessionConfig::from(&config))?;
    session.start()?;

    let app = TerminalApp::new(session, &config.ui);
    let native_options = create_native_options(&config);

    info!("Opening terminal window");
    if let Err(e) = eframe::run_native(
        "SantaTerm",
        native_options,
        Box::new(|_cc| Ok(Box::new(app))),
    ) {
        error!("Application failed: {}", e);
        return Err(anyhow!("Application failed: {}", e));
    }

    info!("SantaTerm shutdown complete");
    Ok(())
}
