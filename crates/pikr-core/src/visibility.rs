//! Popup visibility flag.

/// Launcher window visibility. One instance per popup for the whole process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    Visible,
    #[default]
    Hidden,
}

impl Visibility {
    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }

    /// Switch to `target`, returning whether anything changed.
    pub fn set(&mut self, target: Self) -> bool {
        let changed = *self != target;
        *self = target;
        changed
    }
}
