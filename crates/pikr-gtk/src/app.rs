//! Application lifetime: window ownership, global hotkeys and the UI queue.

use crate::hotkeys::GlobalHotkeyBackend;
use crate::window::LauncherWindow;
use gtk4::glib;
use gtk4::prelude::*;
use pikr_core::hotkey::HotkeyListener;
use pikr_core::{LauncherConfig, UiCommand, UiDispatcher, UiQueue, ui_channel};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tracing::{debug, info, warn};

pub struct LauncherApp {
    app: gtk4::Application,
    config: Rc<LauncherConfig>,
    window: RefCell<Option<LauncherWindow>>,
    hotkeys: RefCell<Option<HotkeyListener<GlobalHotkeyBackend>>>,
    dispatcher: UiDispatcher,
    startup_failed: Cell<bool>,
}

impl LauncherApp {
    pub fn new(app: &gtk4::Application, config: LauncherConfig) -> Rc<Self> {
        let (dispatcher, queue) = ui_channel();
        let launcher = Rc::new(Self {
            app: app.clone(),
            config: Rc::new(config),
            window: RefCell::new(None),
            hotkeys: RefCell::new(None),
            dispatcher,
            startup_failed: Cell::new(false),
        });
        launcher.spawn_command_pump(queue);
        launcher
    }

    /// Handle for posting commands from any thread.
    pub fn dispatcher(&self) -> UiDispatcher {
        self.dispatcher.clone()
    }

    pub fn startup_failed(&self) -> bool {
        self.startup_failed.get()
    }

    pub fn mark_startup_failed(&self) {
        self.startup_failed.set(true);
    }

    /// Grab the configured combos and start the listener thread.
    ///
    /// Callbacks only post to the UI queue; the popup is touched exclusively
    /// by the command pump on the main loop.
    pub fn start_hotkeys(&self) -> pikr_core::Result<()> {
        let bindings = self.config.hotkey_bindings()?;
        if bindings.is_empty() {
            debug!("No global hotkeys configured");
            return Ok(());
        }

        let mut listener = HotkeyListener::new(GlobalHotkeyBackend::new()?);
        for (combo, command) in bindings {
            let dispatcher = self.dispatcher();
            listener.register_combo(combo, move || dispatcher.post(command))?;
        }
        listener.start()?;

        *self.hotkeys.borrow_mut() = Some(listener);
        Ok(())
    }

    pub fn stop_hotkeys(&self) {
        if let Some(mut listener) = self.hotkeys.borrow_mut().take() {
            listener.stop();
            info!("Global hotkeys released");
        }
    }

    pub fn activate(&self) {
        if self.startup_failed() {
            warn!("Ignoring activation after failed startup");
            return;
        }
        self.handle(UiCommand::Show);
    }

    fn spawn_command_pump(self: &Rc<Self>, queue: UiQueue) {
        let launcher = Rc::downgrade(self);
        glib::spawn_future_local(async move {
            while let Some(command) = queue.next().await {
                let Some(launcher) = launcher.upgrade() else {
                    break;
                };
                launcher.handle(command);
            }
            debug!("UI command queue closed");
        });
    }

    fn handle(&self, command: UiCommand) {
        debug!("UI command: {:?}", command);
        match command {
            UiCommand::Show => {
                let window = self
                    .window
                    .borrow_mut()
                    .get_or_insert_with(|| LauncherWindow::new(&self.app, Rc::clone(&self.config)))
                    .clone();
                window.show();
            }
            UiCommand::Hide => {
                let window = self.window.borrow().clone();
                if let Some(window) = window {
                    window.hide();
                }
            }
            UiCommand::Quit => self.app.quit(),
        }
    }
}
