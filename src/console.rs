use std::collections::VecDeque;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};

/// Terminal seam for the session loop.
///
/// Everything the session prints or reads goes through this trait so the
/// whole flow can run headless in tests.
pub trait Console {
    /// Print text without a trailing newline and flush (used for prompts).
    fn prompt(&mut self, text: &str) -> io::Result<()>;
    /// Print a full line.
    fn line(&mut self, text: &str) -> io::Result<()>;
    /// Read one line of input, without its terminator. Ok(None) means the
    /// input stream is closed.
    fn read_line(&mut self) -> io::Result<Option<String>>;
    /// Clear the visible terminal history. Safe to treat as a no-op.
    fn clear(&mut self) -> io::Result<()>;
    /// Block for `duration` without spinning a core.
    fn hold(&mut self, duration: Duration) -> io::Result<()>;
}

/// Production console over stdin/stdout using crossterm for clearing
pub struct TermConsole;

impl TermConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn prompt(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        let mut out = io::stdout();
        out.write_all(text.as_bytes())?;
        out.write_all(b"\n")?;
        out.flush()
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if io::stdin().read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))
    }

    fn hold(&mut self, duration: Duration) -> io::Result<()> {
        thread::sleep(duration);
        Ok(())
    }
}

/// Scripted console for unit and headless integration tests: queued input
/// lines and captured output instead of a TTY
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    pub output: String,
    pub clears: usize,
    pub holds: Vec<Duration>,
}

impl ScriptedConsole {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
            clears: 0,
            holds: Vec::new(),
        }
    }
}

impl Console for ScriptedConsole {
    fn prompt(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        Ok(())
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        self.output.push_str(text);
        self.output.push('\n');
        Ok(())
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.inputs.pop_front())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }

    fn hold(&mut self, duration: Duration) -> io::Result<()> {
        self.holds.push(duration);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_console_drains_inputs_then_reports_eof() {
        let mut console = ScriptedConsole::new(["first", "second"]);

        assert_eq!(console.read_line().unwrap(), Some("first".to_string()));
        assert_eq!(console.read_line().unwrap(), Some("second".to_string()));
        assert_eq!(console.read_line().unwrap(), None);
    }

    #[test]
    fn scripted_console_captures_output_and_clears() {
        let mut console = ScriptedConsole::new::<_, String>([]);

        console.prompt("ready? ").unwrap();
        console.line("go").unwrap();
        console.clear().unwrap();
        console.hold(Duration::from_secs(3)).unwrap();

        assert_eq!(console.output, "ready? go\n");
        assert_eq!(console.clears, 1);
        assert_eq!(console.holds, vec![Duration::from_secs(3)]);
    }
}
