use std::io;
use std::time::Duration;

use itertools::Itertools;

use crate::console::Console;
use crate::difficulty::{Adjustment, Difficulty};
use crate::history::ScoreHistory;
use crate::results_log::ResultLog;
use crate::scoring;
use crate::sequence::ChallengeSource;

/// Most recall characters kept from one input line.
pub const INPUT_LIMIT: usize = 29;

/// Token that cancels a running trial. Case-sensitive.
pub const ABORT_TOKEN: &str = "abort";

/// How long the sequence stays on screen by default.
pub const DEFAULT_DISPLAY_SECS: u64 = 3;

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub display_duration: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            display_duration: Duration::from_secs(DEFAULT_DISPLAY_SECS),
        }
    }
}

/// How a single trial ended.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TrialOutcome {
    /// Scored, folded into difficulty and history, and logged.
    Completed { score: u32 },
    /// Cancelled via the abort token or a closed stdin; nothing recorded.
    Aborted,
}

/// One interactive run: repeated trials until the user declines to
/// continue. Holds the adaptive state for the lifetime of the process.
pub struct Session<C: Console, S: ChallengeSource> {
    pub console: C,
    pub challenges: S,
    pub config: SessionConfig,
    pub difficulty: Difficulty,
    pub history: ScoreHistory,
    pub log: ResultLog,
}

impl<C: Console, S: ChallengeSource> Session<C, S> {
    pub fn new(console: C, challenges: S, log: ResultLog, config: SessionConfig) -> Self {
        Self {
            console,
            challenges,
            config,
            difficulty: Difficulty::new(),
            history: ScoreHistory::new(),
            log,
        }
    }

    /// Run trials until the user declines the retry prompt.
    pub fn run(&mut self) -> io::Result<()> {
        self.console
            .prompt("Enter medication information or comments: ")?;
        let annotation = match self.console.read_line()? {
            Some(line) => line,
            None => return Ok(()),
        };

        loop {
            self.run_trial(&annotation)?;
            if !self.confirm_retry()? {
                break;
            }
            self.console.clear()?;
        }
        Ok(())
    }

    /// One generate → display → recall → score cycle.
    pub fn run_trial(&mut self, annotation: &str) -> io::Result<TrialOutcome> {
        let level = self.difficulty.level();
        let challenge = self.challenges.challenge(level);
        let spaced = challenge.chars().join(" ");

        self.console
            .line(&format!("Memorize this sequence: {}", spaced))?;
        self.console.hold(self.config.display_duration)?;
        self.console.clear()?;

        self.console.prompt(&format!(
            "Enter the characters you remember (up to {} characters) or type 'abort' to cancel: ",
            level
        ))?;
        let raw = match self.console.read_line()? {
            Some(line) => line,
            None => {
                self.console.line("Test aborted.")?;
                return Ok(TrialOutcome::Aborted);
            }
        };
        if raw.trim() == ABORT_TOKEN {
            self.console.line("Test aborted.")?;
            return Ok(TrialOutcome::Aborted);
        }

        let attempt: String = raw.chars().take(INPUT_LIMIT).collect();
        self.console.line(&format!(
            "You entered:      {}",
            attempt.chars().join(" ")
        ))?;

        let score = scoring::score(&challenge, &attempt);
        self.console.line("")?;
        self.console
            .line(&format!("Correct sequence: {}", spaced))?;
        self.console.line(&format!("You scored: {}%", score))?;

        match self.difficulty.record(score) {
            Adjustment::Advanced(next) => self.console.line(&format!(
                "Great job! Increasing difficulty to {} characters.",
                next
            ))?,
            Adjustment::Reduced(next) => self
                .console
                .line(&format!("Difficulty reduced to {} characters.", next))?,
            Adjustment::Held(current) => self
                .console
                .line(&format!("Try again at {} characters.", current))?,
        }

        // History and the log both record the length the trial ran at,
        // independent of the adjustment above.
        let mean = self.history.record(level, score);
        if let Err(err) = self.log.append(score, level, annotation, mean) {
            self.console.line(&format!(
                "Could not write {}: {}",
                self.log.path().display(),
                err
            ))?;
        }

        Ok(TrialOutcome::Completed { score })
    }

    /// y/n prompt; re-prompts on anything else. The first non-whitespace
    /// character of the line decides, the rest is discarded. A closed
    /// stdin counts as "no".
    pub fn confirm_retry(&mut self) -> io::Result<bool> {
        loop {
            self.console.prompt("Do you want to try again? (y/n): ")?;
            let line = match self.console.read_line()? {
                Some(line) => line,
                None => return Ok(false),
            };
            match line.trim().chars().next() {
                Some('y') | Some('Y') => return Ok(true),
                Some('n') | Some('N') => return Ok(false),
                _ => self
                    .console
                    .line("Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::ScriptedConsole;
    use crate::sequence::ScriptedChallenge;
    use tempfile::tempdir;

    fn instant_config() -> SessionConfig {
        SessionConfig {
            display_duration: Duration::from_millis(0),
        }
    }

    fn session_with(
        inputs: &[&str],
        challenges: &[&str],
        log: ResultLog,
    ) -> Session<ScriptedConsole, ScriptedChallenge> {
        Session::new(
            ScriptedConsole::new(inputs.iter().copied()),
            ScriptedChallenge::new(challenges.iter().copied()),
            log,
            instant_config(),
        )
    }

    #[test]
    fn trial_scores_and_reveals_the_challenge() {
        let dir = tempdir().unwrap();
        let log = ResultLog::with_path(dir.path().join("results.txt"));
        let mut session = session_with(&["abcdx"], &["ABCDE"], log);

        let outcome = session.run_trial("meds").unwrap();
        assert_eq!(outcome, TrialOutcome::Completed { score: 80 });

        let out = &session.console.output;
        assert!(out.contains("Memorize this sequence: A B C D E"));
        assert!(out.contains("You entered:      a b c d x"));
        assert!(out.contains("Correct sequence: A B C D E"));
        assert!(out.contains("You scored: 80%"));
        assert!(out.contains("Try again at 5 characters."));
        assert_eq!(session.difficulty.level(), 5);
        assert_eq!(session.difficulty.failed_attempts(), 1);
    }

    #[test]
    fn trial_holds_for_the_configured_duration_then_clears() {
        let dir = tempdir().unwrap();
        let log = ResultLog::with_path(dir.path().join("results.txt"));
        let mut session = session_with(&["abcde"], &["ABCDE"], log);
        session.config.display_duration = Duration::from_secs(3);

        session.run_trial("").unwrap();

        assert_eq!(session.console.holds, vec![Duration::from_secs(3)]);
        assert_eq!(session.console.clears, 1);
    }

    #[test]
    fn abort_skips_score_history_and_log() {
        let dir = tempdir().unwrap();
        let log_path = dir.path().join("results.txt");
        let log = ResultLog::with_path(&log_path);
        let mut session = session_with(&["  abort  "], &["ABCDE"], log);

        let outcome = session.run_trial("meds").unwrap();
        assert_eq!(outcome, TrialOutcome::Aborted);
        assert!(session.console.output.contains("Test aborted."));
        assert_eq!(session.difficulty.level(), 5);
        assert_eq!(session.difficulty.failed_attempts(), 0);
        assert_eq!(session.history.pending(5), 0);
        assert!(!log_path.exists());
    }

    #[test]
    fn abort_token_is_case_sensitive() {
        let dir = tempdir().unwrap();
        let log = ResultLog::with_path(dir.path().join("results.txt"));
        let mut session = session_with(&["ABORT"], &["ABCDE"], log);

        let outcome = session.run_trial("").unwrap();
        assert_eq!(outcome, TrialOutcome::Completed { score: 0 });
    }

    #[test]
    fn recall_input_is_truncated_to_the_limit() {
        let dir = tempdir().unwrap();
        let log = ResultLog::with_path(dir.path().join("results.txt"));
        let long_input = "x".repeat(80);
        let mut session = session_with(&[long_input.as_str()], &["XXXXX"], log);

        session.run_trial("").unwrap();

        // 29 kept characters, space-separated on the echo line.
        let echoed = "x ".repeat(INPUT_LIMIT - 1) + "x";
        assert!(session.console.output.contains(&echoed));
        assert!(!session
            .console
            .output
            .contains(&("x ".repeat(INPUT_LIMIT) + "x")));
    }

    #[test]
    fn perfect_recall_advances_difficulty() {
        let dir = tempdir().unwrap();
        let log = ResultLog::with_path(dir.path().join("results.txt"));
        let mut session = session_with(&["abcde"], &["ABCDE"], log);

        let outcome = session.run_trial("").unwrap();
        assert_eq!(outcome, TrialOutcome::Completed { score: 100 });
        assert!(session
            .console
            .output
            .contains("Great job! Increasing difficulty to 7 characters."));
        assert_eq!(session.difficulty.level(), 7);
    }

    #[test]
    fn log_open_failure_is_reported_not_fatal() {
        let dir = tempdir().unwrap();
        // Point the log at a directory so the append fails.
        let log = ResultLog::with_path(dir.path());
        let mut session = session_with(&["abcde"], &["ABCDE"], log);

        let outcome = session.run_trial("meds").unwrap();
        assert_eq!(outcome, TrialOutcome::Completed { score: 100 });
        assert!(session.console.output.contains("Could not write"));
    }

    #[test]
    fn retry_prompt_loops_until_a_decision() {
        let dir = tempdir().unwrap();
        let log = ResultLog::with_path(dir.path().join("results.txt"));
        let mut session = session_with(&["maybe", "", "x", "  yes please"], &[], log);

        assert!(session.confirm_retry().unwrap());
        let invalid = session
            .console
            .output
            .matches("Invalid input. Please enter 'y' or 'n'.")
            .count();
        assert_eq!(invalid, 3);
    }

    #[test]
    fn retry_prompt_accepts_either_case() {
        let dir = tempdir().unwrap();
        let log = ResultLog::with_path(dir.path().join("results.txt"));
        let mut session = session_with(&["Y", "N"], &[], log);

        assert!(session.confirm_retry().unwrap());
        assert!(!session.confirm_retry().unwrap());
    }

    #[test]
    fn retry_prompt_treats_eof_as_no() {
        let dir = tempdir().unwrap();
        let log = ResultLog::with_path(dir.path().join("results.txt"));
        let mut session = session_with(&[], &[], log);

        assert!(!session.confirm_retry().unwrap());
    }
}
