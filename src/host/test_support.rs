use rand::SeedableRng;

use super::screen::Screen;
use super::terminal::Terminal;
use super::StdHost;

/// A [`Terminal`] that records every written byte and serves scripted input lines instead of
/// blocking on real stdin, so host-service tests stay hermetic and deterministic.
pub struct ScriptedTerminal {
    pub output: Vec<u8>,
    pub sleeps_ms: Vec<u8>,
    lines: std::collections::VecDeque<String>,
}

impl ScriptedTerminal {
    pub fn new() -> ScriptedTerminal {
        ScriptedTerminal { output: Vec::new(), sleeps_ms: Vec::new(), lines: Default::default() }
    }

    pub fn with_lines(lines: Vec<String>) -> ScriptedTerminal {
        ScriptedTerminal { output: Vec::new(), sleeps_ms: Vec::new(), lines: lines.into() }
    }
}

impl Default for ScriptedTerminal {
    fn default() -> ScriptedTerminal {
        ScriptedTerminal::new()
    }
}

impl Terminal for ScriptedTerminal {
    fn putc(&mut self, codepoint: u8) {
        self.output.push(codepoint);
    }

    fn flush(&mut self) {}

    fn render(&mut self, screen: &Screen) {
        self.output.extend_from_slice(b"\x1b[H");
        for row in screen.rows() {
            self.output.extend_from_slice(row);
            self.output.push(b'\n');
        }
    }

    fn sleep_millis(&mut self, ms: u8) {
        self.sleeps_ms.push(ms);
    }

    fn read_line(&mut self) -> Vec<u8> {
        self.lines.pop_front().unwrap_or_default().into_bytes()
    }
}

pub type RecordingHost = StdHost<ScriptedTerminal, rand::rngs::SmallRng>;

impl RecordingHost {
    pub fn new() -> RecordingHost {
        StdHost::with_backends(ScriptedTerminal::new(), rand::rngs::SmallRng::seed_from_u64(0))
    }

    pub fn with_lines(lines: Vec<String>) -> RecordingHost {
        StdHost::with_backends(ScriptedTerminal::with_lines(lines), rand::rngs::SmallRng::seed_from_u64(0))
    }

    pub fn output(&self) -> &[u8] {
        &self.terminal.output
    }
}
