//! pikr - a keyboard-driven application launcher popup for GTK4.
//!
//! In popup mode the process stays resident, summoned by a global hotkey.
//! In windowed mode it opens a regular window and exits after a launch.

mod app;
mod directory;
mod hotkeys;
mod keybindings;
mod row;
mod styles;
mod window;

use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use gtk4::glib;
use gtk4::prelude::*;
use pikr_core::{AfterLaunch, AppDirectory, LauncherConfig, Mode};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app::LauncherApp;
use crate::directory::GioDirectory;

const APP_ID: &str = "org.pikr.Launcher";

/// pikr - search and launch installed applications
#[derive(Parser, Debug)]
#[command(name = "pikr")]
#[command(version, about, long_about = None)]
struct Args {
    /// Presentation mode: a resident hotkey popup or a one-shot window
    #[arg(long, env = "PIKR_MODE", default_value_t = Mode::Popup)]
    mode: Mode,

    /// Global combination that shows the popup
    #[arg(
        long,
        env = "PIKR_SHOW_HOTKEY",
        value_name = "COMBO",
        default_value = pikr_core::config::DEFAULT_SHOW_HOTKEY
    )]
    show_hotkey: String,

    /// Optional global combination that hides the popup
    #[arg(long, env = "PIKR_HIDE_HOTKEY", value_name = "COMBO")]
    hide_hotkey: Option<String>,

    /// What to do after a successful launch (defaults to hide in popup mode, quit in windowed mode)
    #[arg(long, env = "PIKR_AFTER_LAUNCH", value_name = "POLICY")]
    after_launch: Option<AfterLaunch>,

    /// Popup width in pixels
    #[arg(long, env = "PIKR_WIDTH", value_name = "PX")]
    width: Option<i32>,

    /// Height of one result row in pixels
    #[arg(long, env = "PIKR_ROW_HEIGHT", value_name = "PX")]
    row_height: Option<i32>,

    /// Leave window placement to the compositor
    #[arg(long, env = "PIKR_NO_CENTER")]
    no_center: bool,

    /// Print the application snapshot as JSON lines and exit
    #[arg(long)]
    list_apps: bool,

    /// Write logs to this file instead of the default location
    #[arg(long, env = "PIKR_LOG_FILE", value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> pikr_core::Result<LauncherConfig> {
        let mut config = LauncherConfig::for_mode(self.mode);
        config.show_hotkey.clone_from(&self.show_hotkey);
        config.hide_hotkey.clone_from(&self.hide_hotkey);
        if let Some(after) = self.after_launch {
            config.after_launch = after;
        }
        if let Some(width) = self.width {
            config.geometry.width = width;
        }
        if let Some(row_height) = self.row_height {
            config.geometry.row_height = row_height;
        }
        if self.no_center {
            config.center = false;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Set up logging.
/// Debug builds log to a timestamped file in the temp dir (plus stderr),
/// release builds log to stderr. `--log-file` overrides both.
fn setup_logging(log_file: Option<&Path>) {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("pikr={default_level},pikr_core={default_level}"))
    });

    let log_path = match log_file {
        Some(path) => Some(path.to_path_buf()),
        None if cfg!(debug_assertions) => {
            let temp_dir = std::env::temp_dir();
            let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
            let log_path = temp_dir.join(format!("pikr-{timestamp}.log"));

            let symlink_path = temp_dir.join("pikr.log");
            let _ = std::fs::remove_file(&symlink_path);
            let _ = std::os::unix::fs::symlink(&log_path, &symlink_path);
            Some(log_path)
        }
        None => None,
    };

    let file_target = log_path.as_deref().and_then(|path| {
        let name = path.file_name()?.to_os_string();
        let dir = path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        Some((dir, name))
    });

    if let Some((dir, name)) = file_target {
        let file_appender = tracing_appender::rolling::never(&dir, &name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        std::mem::forget(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);

        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(file_layer)
            .with(stderr_layer)
            .with(filter)
            .init();

        eprintln!("Logging to: {} (and stderr)", dir.join(&name).display());
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}

fn list_apps() -> anyhow::Result<()> {
    use std::io::Write;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for app in GioDirectory.list_all() {
        let line = serde_json::to_string(&app).context("Failed to serialize app")?;
        writeln!(out, "{line}").context("Failed to write to stdout")?;
    }
    Ok(())
}

fn main() -> glib::ExitCode {
    let args = Args::parse();

    setup_logging(args.log_file.as_deref());

    if args.list_apps {
        return match list_apps() {
            Ok(()) => glib::ExitCode::SUCCESS,
            Err(e) => {
                error!("{e:#}");
                glib::ExitCode::FAILURE
            }
        };
    }

    let config = match args.config() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return glib::ExitCode::FAILURE;
        }
    };

    info!("Starting pikr in {} mode", config.mode);

    let resident = config.mode == Mode::Popup;
    let app = gtk4::Application::builder().application_id(APP_ID).build();
    let launcher = LauncherApp::new(&app, config);

    {
        let launcher = Rc::clone(&launcher);
        app.connect_startup(move |app| {
            if resident {
                // Keep running while the popup is hidden
                std::mem::forget(app.hold());
            }

            if let Err(e) = launcher.start_hotkeys() {
                error!("{e}");
                launcher.mark_startup_failed();
                app.quit();
                return;
            }

            for signal in [libc::SIGINT, libc::SIGTERM] {
                let app = app.clone();
                glib::unix_signal_add_local_once(signal, move || app.quit());
            }
        });
    }

    {
        let launcher = Rc::clone(&launcher);
        app.connect_activate(move |_| launcher.activate());
    }

    {
        let launcher = Rc::clone(&launcher);
        app.connect_shutdown(move |_| launcher.stop_hotkeys());
    }

    // Our own flags are already parsed; keep GTK from seeing them
    let status = app.run_with_args::<&str>(&[]);

    if launcher.startup_failed() {
        return glib::ExitCode::FAILURE;
    }
    status
}
