//! Test module for pikr-core
//!
//! - Filter soundness, completeness and ordering
//! - Keyboard navigation across the result list
//! - Launcher session: query changes, launch outcomes, hide/show resets
//! - Hotkey listener lifecycle and cross-thread dispatch

mod navigation_tests;
