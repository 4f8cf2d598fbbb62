//! Host services dispatched by the guest's `SYS` instruction.
//!
//! Generalises the teacher workspace's single-hook `IOHandler` trait
//! (`vcpu::memory::io::IOHandler`, a `can_write`/`on_write` pair wrapping one memory range) into a
//! full syscall surface: one [`Host`] implementation backs terminal I/O, the screen buffer, the
//! cellular grid, the auxiliary array, and the RNG, and the CPU drives it purely through `dispatch`.

mod aux;
mod grid;
mod keyboard;
mod rng;
mod screen;
mod terminal;

/// Deterministic, non-blocking stand-ins for [`StdHost`]'s backends, for use in tests both in this
/// crate and in downstream workspace members (enabled via the `testing` feature so a dev-dependency
/// on this crate can reach them from its own `tests/` integration suites).
#[cfg(any(test, feature = "testing"))]
pub mod test_support;

use crate::isa::{syscall, REGISTER_COUNT};
use crate::memory::Memory;

pub use aux::AuxArray;
pub use grid::Grid;
pub use keyboard::Keyboard;
pub use rng::{Rng, ThreadRandom};
pub use screen::{Screen, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use terminal::{StdTerminal, Terminal};

/// Side-effectful backend for a `SYS` call. Implementations must not retain the register array
/// across calls; the CPU hands it in by `&mut` for the lifetime of a single dispatch.
pub trait Host {
    fn dispatch(&mut self, sysno: u8, registers: &mut [u8; REGISTER_COUNT], memory: &mut Memory);
}

/// Production host: real stdio, real wall-clock sleeps, real randomness.
pub struct StdHost<T: Terminal = StdTerminal, R: Rng = ThreadRandom> {
    terminal: T,
    keyboard: Keyboard,
    screen: Screen,
    grid: Grid,
    aux: AuxArray,
    rng: R,
}

impl StdHost<StdTerminal, ThreadRandom> {
    pub fn new() -> Self {
        StdHost {
            terminal: StdTerminal,
            keyboard: Keyboard::new(),
            screen: Screen::new(),
            grid: Grid::empty(),
            aux: AuxArray::new(),
            rng: ThreadRandom,
        }
    }
}

impl Default for StdHost<StdTerminal, ThreadRandom> {
    fn default() -> Self {
        StdHost::new()
    }
}

impl<T: Terminal, R: Rng> StdHost<T, R> {
    pub fn with_backends(terminal: T, rng: R) -> Self {
        StdHost {
            terminal,
            keyboard: Keyboard::new(),
            screen: Screen::new(),
            grid: Grid::empty(),
            aux: AuxArray::new(),
            rng,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}

impl<T: Terminal, R: Rng> Host for StdHost<T, R> {
    fn dispatch(&mut self, sysno: u8, registers: &mut [u8; REGISTER_COUNT], memory: &mut Memory) {
        match sysno {
            syscall::PUTC => {
                self.terminal.putc(registers[0]);
                self.terminal.flush();
            }
            syscall::PRINTS => {
                let addr = registers[0] as u16 | ((registers[1] as u16) << 8);
                let mut cursor = addr;
                while memory.read_u8(cursor) != 0 {
                    self.terminal.putc(memory.read_u8(cursor));
                    cursor = cursor.wrapping_add(1);
                }
                self.terminal.flush();
            }
            syscall::CLS => self.screen.clear(),
            syscall::PUTXY => self.screen.put(registers[0], registers[1], registers[2]),
            syscall::RENDER => self.terminal.render(&self.screen),
            syscall::SLEEP => self.terminal.sleep_millis(registers[0]),
            syscall::KEY => registers[0] = self.keyboard.next_byte(&mut self.terminal),
            syscall::GRIDSET => self.grid = Grid::new(registers[0], registers[1]),
            syscall::GGET => registers[0] = self.grid.get(registers[0], registers[1]),
            syscall::GSET => self.grid.set(registers[0], registers[1], registers[2] != 0),
            syscall::GNSET => self.grid.set_next(registers[0], registers[1], registers[2] != 0),
            syscall::GSWAP => self.grid.swap(),
            syscall::AGET => registers[0] = self.aux.get(registers[0]),
            syscall::ASET => self.aux.set(registers[0], registers[1]),
            syscall::RAND => registers[0] = self.rng.uniform(registers[0]),
            other => log::warn!("unknown system call: {other}"),
        }
    }
}
