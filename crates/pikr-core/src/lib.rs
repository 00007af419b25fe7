//! Core logic for the pikr application launcher.
//!
//! Nothing in this crate touches a toolkit: the GTK frontend feeds input into
//! a [`Launcher`] and renders what it reports.

pub mod config;
pub mod dispatch;
pub mod filter;
pub mod hotkey;
pub mod navigation;

mod descriptor;
mod directory;
mod error;
mod launcher;
mod results;
mod visibility;

#[cfg(test)]
mod tests;

pub use config::{AfterLaunch, LauncherConfig, Mode};
pub use descriptor::AppDescriptor;
pub use directory::AppDirectory;
pub use dispatch::{UiCommand, UiDispatcher, UiQueue, ui_channel};
pub use error::{Error, LaunchError, Result};
pub use launcher::{Launcher, Response};
pub use navigation::{Focus, NavKey};
pub use results::{PopupGeometry, ResultList};
pub use visibility::Visibility;
