//! Background thread that turns OS hotkey presses into callbacks.

use super::Combo;
use crate::error::{Error, Result};
use async_channel::{Receiver, Sender};
use std::collections::HashMap;
use std::thread::JoinHandle;
use tracing::{debug, info, warn};

/// Identifier the backend assigns to a grabbed combination.
pub type HotkeyId = u32;

/// Runs on the listener thread, never on the UI thread.
pub type HotkeyCallback = Box<dyn Fn() + Send + 'static>;

/// The OS-level key grab.
pub trait HotkeyBackend {
    /// Grab `combo` system-wide and return the id its presses will carry.
    fn grab(&mut self, combo: &Combo) -> Result<HotkeyId>;

    /// Start forwarding presses of grabbed combinations into `sink`.
    fn attach(&mut self, sink: HotkeySink);

    /// Stop forwarding and release every grab.
    fn release_all(&mut self) -> Result<()>;
}

enum ListenerMsg {
    Pressed(HotkeyId),
    Stop,
}

/// Cloneable, `Send` handle backends use to report presses.
#[derive(Clone)]
pub struct HotkeySink {
    tx: Sender<ListenerMsg>,
}

impl HotkeySink {
    pub fn press(&self, id: HotkeyId) {
        if self.tx.try_send(ListenerMsg::Pressed(id)).is_err() {
            debug!("Hotkey {} pressed after listener stopped", id);
        }
    }
}

enum State {
    Idle,
    Running(JoinHandle<()>),
    Stopped,
}

/// Owns the key grabs and the thread that dispatches their callbacks.
///
/// Lifecycle: `register` any number of times, `start` once, `stop` once.
/// `stop` is idempotent and also runs on drop.
pub struct HotkeyListener<B: HotkeyBackend> {
    backend: B,
    bindings: HashMap<HotkeyId, (Combo, HotkeyCallback)>,
    tx: Sender<ListenerMsg>,
    rx: Receiver<ListenerMsg>,
    state: State,
}

impl<B: HotkeyBackend> HotkeyListener<B> {
    pub fn new(backend: B) -> Self {
        let (tx, rx) = async_channel::unbounded();
        Self {
            backend,
            bindings: HashMap::new(),
            tx,
            rx,
            state: State::Idle,
        }
    }

    /// Grab the combination named by `combo` and bind `callback` to it.
    pub fn register<F>(&mut self, combo: &str, callback: F) -> Result<HotkeyId>
    where
        F: Fn() + Send + 'static,
    {
        self.register_combo(combo.parse()?, callback)
    }

    /// Like [`register`](Self::register) for an already-parsed combination.
    pub fn register_combo<F>(&mut self, combo: Combo, callback: F) -> Result<HotkeyId>
    where
        F: Fn() + Send + 'static,
    {
        if !matches!(self.state, State::Idle) {
            return Err(Error::HotkeyRegistration {
                combo: combo.to_string(),
                reason: "listener already started".to_string(),
            });
        }

        let id = self.backend.grab(&combo)?;
        info!("Registered global hotkey {} (id: {})", combo, id);
        self.bindings.insert(id, (combo, Box::new(callback)));
        Ok(id)
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        matches!(self.state, State::Running(_))
    }

    /// Spawn the listener thread. Callbacks fire on that thread from now on.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            State::Idle => {}
            State::Running(_) => return Ok(()),
            State::Stopped => return Err(Error::ListenerStopped),
        }

        self.backend.attach(HotkeySink {
            tx: self.tx.clone(),
        });

        let bindings = std::mem::take(&mut self.bindings);
        let rx = self.rx.clone();
        let handle = std::thread::Builder::new()
            .name("pikr-hotkeys".to_string())
            .spawn(move || run_listener(&rx, &bindings))
            .map_err(|e| Error::HotkeyUnavailable(format!("failed to spawn listener: {e}")))?;

        self.state = State::Running(handle);
        Ok(())
    }

    /// Release the OS grabs, then stop and join the listener thread.
    ///
    /// Safe to call more than once; later calls do nothing.
    pub fn stop(&mut self) {
        let previous = std::mem::replace(&mut self.state, State::Stopped);
        if matches!(previous, State::Stopped) {
            return;
        }

        info!("Stopping global hotkey listener");
        if let Err(e) = self.backend.release_all() {
            warn!("Failed to release hotkey grabs: {}", e);
        }

        if let State::Running(handle) = previous {
            let _ = self.tx.try_send(ListenerMsg::Stop);
            if handle.join().is_err() {
                warn!("Hotkey listener thread panicked");
            }
        }
        self.bindings.clear();
    }
}

impl<B: HotkeyBackend> Drop for HotkeyListener<B> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn run_listener(rx: &Receiver<ListenerMsg>, bindings: &HashMap<HotkeyId, (Combo, HotkeyCallback)>) {
    debug!("Hotkey listener thread started");
    while let Ok(msg) = rx.recv_blocking() {
        match msg {
            ListenerMsg::Pressed(id) => match bindings.get(&id) {
                Some((combo, callback)) => {
                    debug!("Global hotkey {} pressed", combo);
                    callback();
                }
                None => debug!("Ignoring press of unknown hotkey id {}", id),
            },
            ListenerMsg::Stop => break,
        }
    }
    debug!("Hotkey listener thread exiting");
}
