//! Tests for keyboard navigation through a populated result list

use super::fixtures::*;
use crate::navigation::{Focus, NavAction, NavKey, Navigator};
use crate::Response;

#[test]
fn test_walk_to_last_row_without_wraparound() {
    let n = 4;
    let mut nav = Navigator::new();

    assert_eq!(nav.handle(NavKey::Down, n), NavAction::Handled);
    assert_eq!(nav.focus(), Focus::ResultList);
    assert_eq!(nav.selected(), Some(0));

    for _ in 0..n - 1 {
        assert_eq!(nav.handle(NavKey::Down, n), NavAction::Handled);
    }
    assert_eq!(nav.selected(), Some(n - 1));

    assert_eq!(nav.handle(NavKey::Down, n), NavAction::Handled);
    assert_eq!(nav.selected(), Some(n - 1));
}

#[test]
fn test_up_stops_at_first_row() {
    let mut nav = Navigator::new();
    nav.handle(NavKey::Down, 3);
    nav.handle(NavKey::Down, 3);
    assert_eq!(nav.selected(), Some(1));

    assert_eq!(nav.handle(NavKey::Up, 3), NavAction::Handled);
    assert_eq!(nav.selected(), Some(0));
    assert_eq!(nav.handle(NavKey::Up, 3), NavAction::Handled);
    assert_eq!(nav.selected(), Some(0));
    assert_eq!(nav.focus(), Focus::ResultList);
}

#[test]
fn test_single_row_list() {
    let mut nav = Navigator::new();
    nav.handle(NavKey::Down, 1);
    nav.handle(NavKey::Down, 1);
    nav.handle(NavKey::Up, 1);
    assert_eq!(nav.selected(), Some(0));
    assert_eq!(nav.handle(NavKey::Activate, 1), NavAction::Launch(0));
}

#[test]
fn test_escape_twice_returns_then_hides() {
    let mut nav = Navigator::new();
    nav.handle(NavKey::Down, 2);
    assert_eq!(nav.handle(NavKey::Cancel, 2), NavAction::Handled);
    assert_eq!(nav.focus(), Focus::SearchField);
    assert_eq!(nav.handle(NavKey::Cancel, 2), NavAction::Hide);
}

#[test]
fn test_launcher_navigation_through_query_results() {
    let mut launcher = visible_launcher(desktop_apps());
    launcher.set_query("e");
    assert_eq!(launcher.result_count(), 4);

    assert_eq!(launcher.handle_key(NavKey::Down), Response::Handled);
    assert_eq!(launcher.focus(), Focus::ResultList);
    assert_eq!(launcher.selected_row(), Some(0));

    for _ in 0..10 {
        launcher.handle_key(NavKey::Down);
    }
    assert_eq!(launcher.selected_row(), Some(3));
    assert_eq!(launcher.result(3).unwrap().name, "Text Editor");
}

#[test]
fn test_down_with_no_results_is_not_consumed() {
    let mut launcher = visible_launcher(desktop_apps());
    launcher.set_query("nothing matches this");
    assert_eq!(launcher.handle_key(NavKey::Down), Response::Propagate);
    assert_eq!(launcher.focus(), Focus::SearchField);
}

#[test]
fn test_query_change_invalidates_selection() {
    let mut launcher = visible_launcher(desktop_apps());
    launcher.set_query("fi");
    launcher.handle_key(NavKey::Down);
    launcher.handle_key(NavKey::Down);
    assert_eq!(launcher.selected_row(), Some(1));

    launcher.set_query("fil");
    assert_eq!(launcher.selected_row(), None);
    assert_eq!(launcher.handle_key(NavKey::Activate), Response::Propagate);
}

#[test]
fn test_keys_ignored_while_hidden() {
    let mut launcher = visible_launcher(desktop_apps());
    launcher.set_query("e");
    launcher.hide();
    assert!(!launcher.is_visible());
    assert_eq!(launcher.handle_key(NavKey::Down), Response::Propagate);
    assert_eq!(launcher.handle_key(NavKey::Cancel), Response::Propagate);
}

#[test]
fn test_focus_entering_list_without_arrows_then_escape() {
    let mut launcher = visible_launcher(desktop_apps());
    launcher.set_query("e");
    assert!(launcher.result_count() >= 3);

    // Tab lands keyboard focus on the second row
    launcher.focus_list(Some(1));
    assert_eq!(launcher.focus(), Focus::ResultList);
    assert_eq!(launcher.selected_row(), Some(1));

    assert_eq!(launcher.handle_key(NavKey::Down), Response::Handled);
    assert_eq!(launcher.selected_row(), Some(2));

    assert_eq!(launcher.handle_key(NavKey::Cancel), Response::Handled);
    assert!(launcher.is_visible());
    assert_eq!(launcher.focus(), Focus::SearchField);
    assert_eq!(launcher.query(), "e");
    assert_eq!(launcher.selected_row(), Some(2));
}

#[test]
fn test_focus_entering_empty_list_keeps_search_focus() {
    let mut launcher = visible_launcher(desktop_apps());
    launcher.set_query("zzz");

    launcher.focus_list(None);
    assert_eq!(launcher.focus(), Focus::SearchField);
    assert_eq!(launcher.handle_key(NavKey::Cancel), Response::Hidden);
}
