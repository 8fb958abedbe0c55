use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::debug;

use logcat_lens::app::{self, AppConfig, ChildProcessBackend};
use logcat_lens::interactive::{NoKeys, TerminalKeys};
use logcat_lens::render::Renderer;

/// Show your app's log output and crashes, nothing else
#[derive(Parser)]
#[command(name = "logcat-lens", version)]
#[command(
    about = "Filter the device log down to your app's output and runtime crashes",
    long_about = "Filter the device log down to your app's output and runtime crashes.\n\n\
                  Keys: 'q' quits, 'c' clears the device log and restarts."
)]
struct Cli {
    /// Enable verbose diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Clear the device log before starting
    #[arg(short, long)]
    clear: bool,

    /// Path to configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Serial of the device to read from
    #[arg(short = 's', long)]
    device: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let app_config = AppConfig::new(cli.verbose)
        .with_clear(cli.clear)
        .with_config_path(cli.config)
        .with_device(cli.device);

    if let Err(e) = run(&app_config) {
        app::handle_fatal_error(e, app_config.verbose);
    }
}

fn run(app_config: &AppConfig) -> anyhow::Result<()> {
    let config = app_config.load_config()?;
    app::init_logging(app_config, config.log_level.as_deref());
    debug!("Effective configuration: {:?}", config);

    let mut backend = ChildProcessBackend;
    let mut renderer = Renderer::stdout();

    let exit = if std::io::stdin().is_terminal() {
        let mut keys = TerminalKeys::new();
        app::run_sessions(&config, app_config.clear_first, &mut backend, &mut keys, &mut renderer)?
    } else {
        let mut keys = NoKeys;
        app::run_sessions(&config, app_config.clear_first, &mut backend, &mut keys, &mut renderer)?
    };

    debug!(?exit, "Done");
    Ok(())
}
