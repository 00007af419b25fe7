//! Mapping GDK key events onto launcher navigation keys.

use gtk4::gdk;
use pikr_core::NavKey;

/// Navigation key for `keyval`, or `None` when the event is not ours.
///
/// Keys held with Ctrl or Alt are left alone so text-editing shortcuts in the
/// search field keep working.
pub fn nav_key(keyval: gdk::Key, modifiers: gdk::ModifierType) -> Option<NavKey> {
    if modifiers.intersects(gdk::ModifierType::CONTROL_MASK | gdk::ModifierType::ALT_MASK) {
        return None;
    }

    Some(match keyval {
        gdk::Key::Down | gdk::Key::KP_Down => NavKey::Down,
        gdk::Key::Up | gdk::Key::KP_Up => NavKey::Up,
        gdk::Key::Escape => NavKey::Cancel,
        gdk::Key::Return | gdk::Key::KP_Enter | gdk::Key::ISO_Enter => NavKey::Activate,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: gdk::ModifierType = gdk::ModifierType::empty();

    #[test]
    fn test_arrows() {
        assert_eq!(nav_key(gdk::Key::Down, NONE), Some(NavKey::Down));
        assert_eq!(nav_key(gdk::Key::KP_Up, NONE), Some(NavKey::Up));
    }

    #[test]
    fn test_escape_and_enter() {
        assert_eq!(nav_key(gdk::Key::Escape, NONE), Some(NavKey::Cancel));
        assert_eq!(nav_key(gdk::Key::Return, NONE), Some(NavKey::Activate));
        assert_eq!(nav_key(gdk::Key::KP_Enter, NONE), Some(NavKey::Activate));
    }

    #[test]
    fn test_shift_still_navigates() {
        assert_eq!(
            nav_key(gdk::Key::Down, gdk::ModifierType::SHIFT_MASK),
            Some(NavKey::Down)
        );
    }

    #[test]
    fn test_ctrl_and_alt_pass_through() {
        assert_eq!(nav_key(gdk::Key::Down, gdk::ModifierType::CONTROL_MASK), None);
        assert_eq!(nav_key(gdk::Key::Return, gdk::ModifierType::ALT_MASK), None);
    }

    #[test]
    fn test_text_keys_pass_through() {
        assert_eq!(nav_key(gdk::Key::a, NONE), None);
        assert_eq!(nav_key(gdk::Key::BackSpace, NONE), None);
        assert_eq!(nav_key(gdk::Key::Tab, NONE), None);
    }
}
