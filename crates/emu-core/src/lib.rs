//! Core traits and types for step-accurate CPU emulation.
//!
//! A CPU never owns its memory. The harness owns a [`Bus`] and lends it to
//! every [`Cpu`] operation, so a whole instruction runs against one borrow
//! and nothing is cached between steps.

mod bus;
mod cpu;
mod observable;
mod ticks;

pub use bus::{Bus, MEMORY_SIZE, Memory, MemoryError};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
pub use ticks::Ticks;
