//! Keyboard navigation between the search field and the result list.

use tracing::debug;

/// Which widget owns keyboard input inside the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    SearchField,
    ResultList,
}

/// Keys the navigator interprets. Everything else is left to the widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    /// Escape
    Cancel,
    /// Enter
    Activate,
}

/// What the view should do after a key went through the navigator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    /// Not ours; let the focused widget handle the key
    Propagate,
    /// Consumed; focus and/or selection may have changed
    Handled,
    /// Consumed; the popup should hide
    Hide,
    /// Consumed; launch the row at this position
    Launch(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Navigator {
    focus: Focus,
    selected: Option<usize>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Forget the selected row. Called whenever the result list is rebuilt.
    pub fn invalidate_selection(&mut self) {
        self.selected = None;
    }

    /// Back to the initial state: search field focused, nothing selected.
    pub fn reset(&mut self) {
        self.focus = Focus::SearchField;
        self.selected = None;
    }

    /// Move input focus to the search field, keeping the list selection.
    pub fn focus_search(&mut self) {
        self.focus = Focus::SearchField;
    }

    /// Focus the result list with `row` selected, as a pointer click does.
    pub fn select(&mut self, row: usize, len: usize) {
        if row < len {
            self.focus = Focus::ResultList;
            self.selected = Some(row);
        }
    }

    /// Keyboard focus entered the list without an arrow key, landing on `row`.
    ///
    /// Falls back to the current selection, then to the first row. An empty
    /// list cannot take focus.
    pub fn focus_list(&mut self, row: Option<usize>, len: usize) {
        if len == 0 {
            return;
        }
        self.focus = Focus::ResultList;
        self.selected = match (row, self.selected) {
            (Some(row), _) if row < len => Some(row),
            (_, Some(idx)) if idx < len => Some(idx),
            _ => Some(0),
        };
    }

    /// Apply `key` against a result list of `len` rows.
    pub fn handle(&mut self, key: NavKey, len: usize) -> NavAction {
        let action = match (key, self.focus) {
            (NavKey::Down, Focus::SearchField) => {
                if len == 0 {
                    NavAction::Propagate
                } else {
                    self.focus = Focus::ResultList;
                    self.selected = Some(0);
                    NavAction::Handled
                }
            }
            (NavKey::Down, Focus::ResultList) => {
                self.selected = match self.selected {
                    _ if len == 0 => None,
                    Some(idx) => Some((idx + 1).min(len - 1)),
                    None => Some(0),
                };
                NavAction::Handled
            }
            (NavKey::Up, Focus::ResultList) => {
                self.selected = match self.selected {
                    _ if len == 0 => None,
                    Some(idx) => Some(idx.saturating_sub(1).min(len - 1)),
                    None => Some(0),
                };
                NavAction::Handled
            }
            (NavKey::Up, Focus::SearchField) => NavAction::Propagate,
            (NavKey::Cancel, Focus::ResultList) => {
                self.focus = Focus::SearchField;
                NavAction::Handled
            }
            (NavKey::Cancel, Focus::SearchField) => NavAction::Hide,
            (NavKey::Activate, _) => match self.selected {
                Some(idx) if idx < len => NavAction::Launch(idx),
                _ => NavAction::Propagate,
            },
        };

        debug!(
            "Navigation {:?} -> {:?} (focus={:?}, selected={:?}, len={})",
            key, action, self.focus, self.selected, len
        );
        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_down_from_search_without_results_propagates() {
        let mut nav = Navigator::new();
        assert_eq!(nav.handle(NavKey::Down, 0), NavAction::Propagate);
        assert_eq!(nav.focus(), Focus::SearchField);
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn test_up_in_search_field_propagates() {
        let mut nav = Navigator::new();
        assert_eq!(nav.handle(NavKey::Up, 3), NavAction::Propagate);
    }

    #[test]
    fn test_cancel_in_list_keeps_selection() {
        let mut nav = Navigator::new();
        nav.handle(NavKey::Down, 3);
        nav.handle(NavKey::Down, 3);
        assert_eq!(nav.handle(NavKey::Cancel, 3), NavAction::Handled);
        assert_eq!(nav.focus(), Focus::SearchField);
        assert_eq!(nav.selected(), Some(1));
    }

    #[test]
    fn test_cancel_in_search_hides() {
        let mut nav = Navigator::new();
        assert_eq!(nav.handle(NavKey::Cancel, 0), NavAction::Hide);
    }

    #[test]
    fn test_activate_without_selection_propagates() {
        let mut nav = Navigator::new();
        assert_eq!(nav.handle(NavKey::Activate, 4), NavAction::Propagate);
    }

    #[test]
    fn test_activate_stale_selection_propagates() {
        let mut nav = Navigator::new();
        nav.handle(NavKey::Down, 4);
        nav.handle(NavKey::Down, 4);
        assert_eq!(nav.handle(NavKey::Activate, 1), NavAction::Propagate);
    }

    #[test]
    fn test_invalidate_selection_keeps_focus() {
        let mut nav = Navigator::new();
        nav.handle(NavKey::Down, 2);
        nav.invalidate_selection();
        assert_eq!(nav.focus(), Focus::ResultList);
        assert_eq!(nav.selected(), None);
    }

    #[test]
    fn test_select_out_of_range_ignored() {
        let mut nav = Navigator::new();
        nav.select(5, 2);
        assert_eq!(nav, Navigator::new());

        nav.select(1, 2);
        assert_eq!(nav.focus(), Focus::ResultList);
        assert_eq!(nav.selected(), Some(1));
    }

    #[test]
    fn test_focus_list_takes_landing_row() {
        let mut nav = Navigator::new();
        nav.focus_list(Some(2), 4);
        assert_eq!(nav.focus(), Focus::ResultList);
        assert_eq!(nav.selected(), Some(2));
    }

    #[test]
    fn test_focus_list_falls_back_to_first_row() {
        let mut nav = Navigator::new();
        nav.focus_list(None, 3);
        assert_eq!(nav.selected(), Some(0));

        nav.handle(NavKey::Down, 3);
        nav.focus_search();
        nav.focus_list(Some(7), 3);
        assert_eq!(nav.selected(), Some(1));
    }

    #[test]
    fn test_focus_list_ignored_when_empty() {
        let mut nav = Navigator::new();
        nav.focus_list(Some(0), 0);
        assert_eq!(nav.focus(), Focus::SearchField);
        assert_eq!(nav.selected(), None);
    }
}
