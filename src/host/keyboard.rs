use std::collections::VecDeque;

use super::terminal::Terminal;

/// A FIFO of pending input bytes, refilled one line at a time from the terminal.
pub struct Keyboard {
    buffer: VecDeque<u8>,
}

impl Keyboard {
    pub fn new() -> Keyboard {
        Keyboard { buffer: VecDeque::new() }
    }

    /// Returns the next buffered byte, reading and queuing a full line (plus its newline) from
    /// the terminal first if the buffer is empty.
    pub fn next_byte(&mut self, terminal: &mut impl Terminal) -> u8 {
        if self.buffer.is_empty() {
            self.buffer.extend(terminal.read_line());
            self.buffer.push_back(b'\n');
        }
        self.buffer.pop_front().unwrap_or(0)
    }
}

impl Default for Keyboard {
    fn default() -> Keyboard {
        Keyboard::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::test_support::ScriptedTerminal;

    #[test]
    fn refills_on_empty_and_appends_newline() {
        let mut keyboard = Keyboard::new();
        let mut terminal = ScriptedTerminal::with_lines(vec!["hi".to_string()]);

        assert_eq!(keyboard.next_byte(&mut terminal), b'h');
        assert_eq!(keyboard.next_byte(&mut terminal), b'i');
        assert_eq!(keyboard.next_byte(&mut terminal), b'\n');
    }
}
