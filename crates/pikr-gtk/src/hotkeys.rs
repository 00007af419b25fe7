//! `global-hotkey` backed key grabs.

use global_hotkey::hotkey::{Code, HotKey, Modifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use pikr_core::Error;
use pikr_core::hotkey::{Combo, HotkeyBackend, HotkeyId, HotkeySink, Key};
use tracing::debug;

pub struct GlobalHotkeyBackend {
    manager: GlobalHotKeyManager,
    grabbed: Vec<HotKey>,
}

impl GlobalHotkeyBackend {
    /// Connect to the platform hotkey service.
    ///
    /// Fails when there is no usable display server; the launcher treats this
    /// as a fatal startup precondition.
    pub fn new() -> pikr_core::Result<Self> {
        let manager =
            GlobalHotKeyManager::new().map_err(|e| Error::HotkeyUnavailable(e.to_string()))?;
        Ok(Self {
            manager,
            grabbed: Vec::new(),
        })
    }
}

impl HotkeyBackend for GlobalHotkeyBackend {
    fn grab(&mut self, combo: &Combo) -> pikr_core::Result<HotkeyId> {
        let hotkey = to_hotkey(combo);
        self.manager
            .register(hotkey)
            .map_err(|e| Error::HotkeyRegistration {
                combo: combo.to_string(),
                reason: e.to_string(),
            })?;
        self.grabbed.push(hotkey);
        Ok(hotkey.id())
    }

    fn attach(&mut self, sink: HotkeySink) {
        // Runs on global-hotkey's event thread; the sink only enqueues
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.state == HotKeyState::Pressed {
                sink.press(event.id);
            }
        }));
    }

    fn release_all(&mut self) -> pikr_core::Result<()> {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);

        let hotkeys = std::mem::take(&mut self.grabbed);
        debug!("Releasing {} hotkey grabs", hotkeys.len());
        self.manager
            .unregister_all(&hotkeys)
            .map_err(|e| Error::HotkeyRegistration {
                combo: "*".to_string(),
                reason: e.to_string(),
            })
    }
}

fn to_hotkey(combo: &Combo) -> HotKey {
    let mut mods = Modifiers::empty();
    if combo.modifiers.ctrl {
        mods |= Modifiers::CONTROL;
    }
    if combo.modifiers.alt {
        mods |= Modifiers::ALT;
    }
    if combo.modifiers.shift {
        mods |= Modifiers::SHIFT;
    }
    if combo.modifiers.super_key {
        mods |= Modifiers::SUPER;
    }

    let mods = (!mods.is_empty()).then_some(mods);
    HotKey::new(mods, key_code(combo.key))
}

fn key_code(key: Key) -> Code {
    match key {
        Key::Space => Code::Space,
        Key::Escape => Code::Escape,
        Key::Return => Code::Enter,
        Key::Tab => Code::Tab,
        Key::F(n) => match n {
            1 => Code::F1,
            2 => Code::F2,
            3 => Code::F3,
            4 => Code::F4,
            5 => Code::F5,
            6 => Code::F6,
            7 => Code::F7,
            8 => Code::F8,
            9 => Code::F9,
            10 => Code::F10,
            11 => Code::F11,
            _ => Code::F12,
        },
        Key::Char(c) => char_code(c),
    }
}

fn char_code(c: char) -> Code {
    match c {
        '0' => Code::Digit0,
        '1' => Code::Digit1,
        '2' => Code::Digit2,
        '3' => Code::Digit3,
        '4' => Code::Digit4,
        '5' => Code::Digit5,
        '6' => Code::Digit6,
        '7' => Code::Digit7,
        '8' => Code::Digit8,
        '9' => Code::Digit9,
        'a' => Code::KeyA,
        'b' => Code::KeyB,
        'c' => Code::KeyC,
        'd' => Code::KeyD,
        'e' => Code::KeyE,
        'f' => Code::KeyF,
        'g' => Code::KeyG,
        'h' => Code::KeyH,
        'i' => Code::KeyI,
        'j' => Code::KeyJ,
        'k' => Code::KeyK,
        'l' => Code::KeyL,
        'm' => Code::KeyM,
        'n' => Code::KeyN,
        'o' => Code::KeyO,
        'p' => Code::KeyP,
        'q' => Code::KeyQ,
        'r' => Code::KeyR,
        's' => Code::KeyS,
        't' => Code::KeyT,
        'u' => Code::KeyU,
        'v' => Code::KeyV,
        'w' => Code::KeyW,
        'x' => Code::KeyX,
        'y' => Code::KeyY,
        _ => Code::KeyZ,
    }
}
