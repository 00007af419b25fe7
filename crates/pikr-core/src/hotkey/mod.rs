//! System-wide key combinations.
//!
//! [`Combo`] parses the combination identifiers accepted on the command line.
//! [`HotkeyListener`] owns a [`HotkeyBackend`] that performs the OS key grab
//! and runs the registered callbacks on its own thread.

mod combo;
mod listener;

pub use combo::{Combo, Key, Modifiers};
pub use listener::{HotkeyBackend, HotkeyCallback, HotkeyId, HotkeyListener, HotkeySink};
