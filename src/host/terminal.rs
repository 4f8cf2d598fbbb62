use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use super::screen::Screen;

/// Byte-oriented terminal I/O, abstracted so tests can script input/output without touching the
/// real stdio streams.
pub trait Terminal {
    fn putc(&mut self, codepoint: u8);
    fn flush(&mut self);
    fn render(&mut self, screen: &Screen);
    fn sleep_millis(&mut self, ms: u8);
    /// Blocks for one line of input, returning its bytes without the trailing newline.
    fn read_line(&mut self) -> Vec<u8>;
}

/// The real terminal: line-buffered stdin, explicitly flushed stdout.
pub struct StdTerminal;

impl Terminal for StdTerminal {
    fn putc(&mut self, codepoint: u8) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        let _ = lock.write_all(&[codepoint]);
    }

    fn flush(&mut self) {
        let _ = io::stdout().flush();
    }

    fn render(&mut self, screen: &Screen) {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        let _ = lock.write_all(b"\x1b[H");
        for row in screen.rows() {
            let _ = lock.write_all(row);
            let _ = lock.write_all(b"\n");
        }
        let _ = lock.flush();
    }

    fn sleep_millis(&mut self, ms: u8) {
        thread::sleep(Duration::from_millis(ms as u64));
    }

    fn read_line(&mut self) -> Vec<u8> {
        let mut line = String::new();
        let _ = io::stdin().read_line(&mut line);
        line.trim_end_matches(['\n', '\r']).bytes().collect()
    }
}
