use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Default results file, relative to the working directory.
pub const DEFAULT_LOG_PATH: &str = "memory_test_results.txt";

/// Append-only plain-text results log. The file is opened and closed per
/// append and is never read back.
#[derive(Debug, Clone)]
pub struct ResultLog {
    path: PathBuf,
}

impl ResultLog {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_PATH),
        }
    }

    pub fn with_path<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one trial record, stamped with the current local time.
    pub fn append(
        &self,
        score: u32,
        level: usize,
        annotation: &str,
        mean: Option<u32>,
    ) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .write(true)
            .append(true)
            .create(true)
            .open(&self.path)?;

        writeln!(
            file,
            "{}",
            format_line(&Local::now(), score, level, annotation, mean)
        )
    }
}

/// Render one log line. Pure so tests can pin the timestamp.
pub fn format_line(
    at: &DateTime<Local>,
    score: u32,
    level: usize,
    annotation: &str,
    mean: Option<u32>,
) -> String {
    let mut line = format!(
        "{} - {}% score on {} characters, {}",
        at.format("%m/%d/%Y %I:%M%p"),
        score,
        level,
        annotation
    );
    if let Some(mean) = mean {
        line.push_str(&format!(
            " | Mean score for last 5 tests at {} characters: {}%",
            level, mean
        ));
    }
    line
}
