use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chordpad::app::App;
use chordpad::config::Config;
use chordpad::{logging, paths};
use clap::Parser;
use tracing::info;

/// A text editor driven by Control-key chords.
#[derive(Debug, Parser)]
#[command(name = "chordpad", version, about)]
struct Cli {
	/// Files to open, one window each.
	files: Vec<PathBuf>,
}

fn main() -> ExitCode {
	let cli = Cli::parse();
	match run(cli) {
		Ok(0) => ExitCode::SUCCESS,
		Ok(_) => ExitCode::FAILURE,
		Err(err) => {
			eprintln!("{:#}", err);
			ExitCode::FAILURE
		}
	}
}

/// Returns the number of files that failed to load.
fn run(cli: Cli) -> Result<usize> {
	logging::init_logging().context("initialize logging failed")?;
	info!("chordpad {} starting", env!("CARGO_PKG_VERSION"));

	let config_path = paths::user_config_file();
	let config = Config::load(&config_path).with_context(|| format!("load config {} failed", config_path.display()))?;
	let mut app = App::new(&config).context("initialize app failed")?;
	let failures = app.open_files(&cli.files);
	app.run().context("run app failed")?;
	Ok(failures)
}
