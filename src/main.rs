use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use recall::{
    console::TermConsole,
    results_log::{ResultLog, DEFAULT_LOG_PATH},
    sequence::RandomChallenge,
    session::{Session, SessionConfig, DEFAULT_DISPLAY_SECS},
};

/// terminal working-memory self-test with adaptive difficulty
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Shows a short random character sequence, hides it after a few seconds, scores your recall, adapts the sequence length to your performance, and appends every result to a plain-text log."
)]
pub struct Cli {
    /// file the results are appended to
    #[clap(long, default_value = DEFAULT_LOG_PATH)]
    results_file: PathBuf,

    /// seconds the sequence stays visible before it is hidden
    #[clap(long, default_value_t = DEFAULT_DISPLAY_SECS)]
    display_secs: u64,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = SessionConfig {
        display_duration: Duration::from_secs(cli.display_secs),
    };
    let mut session = Session::new(
        TermConsole::new(),
        RandomChallenge::new(),
        ResultLog::with_path(&cli.results_file),
        config,
    );
    session.run()?;
    Ok(())
}
