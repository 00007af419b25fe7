//! The launcher popup: a search entry above a list of matching applications.

use crate::directory::GioDirectory;
use crate::keybindings;
use crate::row;
use gtk4::prelude::*;
use gtk4::{gdk, glib};
use gtk4_layer_shell::{KeyboardMode, Layer, LayerShell};
use pikr_core::{AfterLaunch, Focus, Launcher, LauncherConfig, Mode, Response};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};

const PLACEHOLDER: &str = "Search for applications...";

type Session = Launcher<GioDirectory>;

/// Popup window bound to a launcher session.
///
/// Cheap to clone: every field is a reference-counted handle. Only ever used
/// on the GTK main thread.
#[derive(Clone)]
pub struct LauncherWindow {
    window: gtk4::Window,
    search_entry: gtk4::Entry,
    results_area: gtk4::ScrolledWindow,
    list_box: gtk4::ListBox,
    session: Rc<RefCell<Session>>,
    config: Rc<LauncherConfig>,
}

impl LauncherWindow {
    pub fn new(app: &gtk4::Application, config: Rc<LauncherConfig>) -> Self {
        let popup = config.mode == Mode::Popup;

        if let Some(display) = gdk::Display::default() {
            let css_provider = gtk4::CssProvider::new();
            crate::styles::apply_css(&css_provider, &config.geometry);
            gtk4::style_context_add_provider_for_display(
                &display,
                &css_provider,
                gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
            );
        }

        let window = gtk4::Window::builder()
            .application(app)
            .title("pikr")
            .decorated(!popup)
            .modal(popup)
            .resizable(!popup)
            .default_width(config.geometry.width)
            .default_height(config.window_height(0, None))
            .build();
        if popup {
            window.add_css_class("pikr-popup");
        }

        // A layer surface without anchors is centred on its output; `show`
        // pins that output to the primary monitor
        if popup && config.center && gtk4_layer_shell::is_supported() {
            window.init_layer_shell();
            window.set_layer(Layer::Overlay);
            window.set_keyboard_mode(KeyboardMode::Exclusive);
            window.set_namespace(Some("pikr"));
        }

        let search_entry = gtk4::Entry::builder()
            .placeholder_text(PLACEHOLDER)
            .primary_icon_name("system-search-symbolic")
            .hexpand(true)
            .css_classes(["search-entry"])
            .build();

        let list_box = gtk4::ListBox::builder()
            .selection_mode(gtk4::SelectionMode::Single)
            .activate_on_single_click(true)
            .css_classes(["results"])
            .build();

        let results_area = gtk4::ScrolledWindow::builder()
            .hscrollbar_policy(gtk4::PolicyType::Never)
            .vscrollbar_policy(gtk4::PolicyType::Automatic)
            .propagate_natural_height(true)
            .vexpand(!popup)
            .visible(!popup)
            .child(&list_box)
            .build();

        let content = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
        content.append(&search_entry);
        content.append(&results_area);
        window.set_child(Some(&content));

        let session = Launcher::new(GioDirectory, config.after_launch);

        let launcher_window = Self {
            window,
            search_entry,
            results_area,
            list_box,
            session: Rc::new(RefCell::new(session)),
            config,
        };
        launcher_window.setup_search_handlers();
        launcher_window.setup_list_handlers();
        launcher_window.setup_key_handlers();
        launcher_window.setup_close_handler();
        launcher_window
    }

    /// Make the popup visible with the search field focused.
    pub fn show(&self) {
        if self.session.borrow_mut().show() {
            info!("Showing launcher");
        }
        self.render();
        if self.window.is_layer_window()
            && let Some(monitor) = self.primary_monitor()
        {
            self.window.set_monitor(Some(&monitor));
        }
        self.window.present();
        self.sync_focus();
    }

    /// Hide the popup and reset it to an empty query.
    pub fn hide(&self) {
        self.session.borrow_mut().hide();
        self.finish_hide();
    }

    fn setup_search_handlers(&self) {
        let this = self.clone();
        self.search_entry.connect_changed(move |entry| {
            let query = entry.text();
            let Ok(mut session) = this.session.try_borrow_mut() else {
                return;
            };
            if session.query() == query.as_str() {
                return;
            }
            session.set_query(&query);
            drop(session);
            this.render();
        });

        let this = self.clone();
        let focus_controller = gtk4::EventControllerFocus::new();
        focus_controller.connect_enter(move |_| {
            if let Ok(mut session) = this.session.try_borrow_mut() {
                session.focus_search();
            }
        });
        self.search_entry.add_controller(focus_controller);
    }

    fn setup_list_handlers(&self) {
        let this = self.clone();
        self.list_box.connect_row_selected(move |_, row| {
            let Some(index) = row.and_then(|r| usize::try_from(r.index()).ok()) else {
                return;
            };
            if let Ok(mut session) = this.session.try_borrow_mut() {
                session.select_row(index);
            }
        });

        // Tab or a mnemonic can move focus into the list without an arrow key
        let this = self.clone();
        let focus_controller = gtk4::EventControllerFocus::new();
        focus_controller.connect_enter(move |_| this.sync_list_focus());
        self.list_box.add_controller(focus_controller);

        let this = self.clone();
        self.list_box.connect_row_activated(move |_, row| {
            let Ok(index) = usize::try_from(row.index()) else {
                return;
            };
            let response = this.session.borrow_mut().activate_row(index);
            let _ = this.apply(response);
        });
    }

    fn sync_list_focus(&self) {
        let landing = gtk4::prelude::GtkWindowExt::focus(&self.window)
            .and_then(|widget| widget.ancestor(gtk4::ListBoxRow::static_type()))
            .and_downcast::<gtk4::ListBoxRow>()
            .and_then(|row| usize::try_from(row.index()).ok());

        let selected = {
            let Ok(mut session) = self.session.try_borrow_mut() else {
                return;
            };
            session.focus_list(landing);
            session.selected_row()
        };

        let row = selected
            .and_then(|idx| i32::try_from(idx).ok())
            .and_then(|idx| self.list_box.row_at_index(idx));
        if let Some(row) = row {
            self.list_box.select_row(Some(&row));
        }
    }

    fn setup_key_handlers(&self) {
        let this = self.clone();
        let key_controller = gtk4::EventControllerKey::new();
        // Capture phase: intercept before the entry or list rows see the key
        key_controller.set_propagation_phase(gtk4::PropagationPhase::Capture);
        key_controller.connect_key_pressed(move |_, keyval, _keycode, modifier| {
            let Some(key) = keybindings::nav_key(keyval, modifier) else {
                return glib::Propagation::Proceed;
            };
            let response = this.session.borrow_mut().handle_key(key);
            this.apply(response)
        });
        self.window.add_controller(key_controller);
    }

    fn setup_close_handler(&self) {
        if self.config.mode != Mode::Popup {
            return;
        }

        // The popup is reused for the whole process, so closing only hides it
        let this = self.clone();
        self.window.connect_close_request(move |_| {
            this.hide();
            glib::Propagation::Stop
        });
    }

    fn apply(&self, response: Response) -> glib::Propagation {
        match response {
            Response::Propagate => return glib::Propagation::Proceed,
            Response::Handled => self.sync_focus(),
            Response::Hidden => self.finish_hide(),
            Response::Launched { app, after } => {
                self.finish_hide();
                if after == AfterLaunch::Quit {
                    info!("Launched {}, quitting", app);
                    if let Some(application) = self.window.application() {
                        application.quit();
                    }
                }
            }
            Response::LaunchFailed(_) => self.window.error_bell(),
        }
        glib::Propagation::Stop
    }

    fn finish_hide(&self) {
        self.search_entry.set_text("");
        self.render();

        if self.config.mode == Mode::Windowed {
            self.window.close();
        } else {
            self.window.set_visible(false);
        }
        info!("Launcher hidden");
    }

    /// Rebuild the rows from the session and fit the window around them.
    fn render(&self) {
        while let Some(child) = self.list_box.first_child() {
            self.list_box.remove(&child);
        }

        let rows: Vec<gtk4::ListBoxRow> = self
            .session
            .borrow()
            .results()
            .map(row::result_row)
            .collect();
        let count = rows.len();
        for row in &rows {
            self.list_box.append(row);
        }

        if self.config.fixed_height.is_none() {
            self.results_area.set_visible(count > 0);
            let height = self.config.window_height(count, self.monitor_height());
            self.set_results_height((height - self.config.geometry.header_height).max(0));
            self.window.set_default_size(self.config.geometry.width, height);
        }
        debug!("Rendered {} rows", count);
    }

    fn set_results_height(&self, height: i32) {
        // GTK rejects min > max, so order the two updates by direction
        if height >= self.results_area.max_content_height() {
            self.results_area.set_max_content_height(height);
            self.results_area.set_min_content_height(height);
        } else {
            self.results_area.set_min_content_height(height);
            self.results_area.set_max_content_height(height);
        }
    }

    /// Move GTK focus and row selection to where the session says they are.
    fn sync_focus(&self) {
        let (focus, selected) = {
            let session = self.session.borrow();
            (session.focus(), session.selected_row())
        };

        match focus {
            Focus::SearchField => {
                self.search_entry.grab_focus_without_selecting();
            }
            Focus::ResultList => {
                let row = selected
                    .and_then(|idx| i32::try_from(idx).ok())
                    .and_then(|idx| self.list_box.row_at_index(idx));
                if let Some(row) = row {
                    self.list_box.select_row(Some(&row));
                    row.grab_focus();
                }
            }
        }
    }

    fn monitor_height(&self) -> Option<i32> {
        let display = WidgetExt::display(&self.window);
        let monitor = self
            .window
            .surface()
            .and_then(|surface| display.monitor_at_surface(&surface))
            .or_else(|| self.primary_monitor())?;
        Some(monitor.geometry().height())
    }

    fn primary_monitor(&self) -> Option<gdk::Monitor> {
        WidgetExt::display(&self.window)
            .monitors()
            .item(0)
            .and_downcast::<gdk::Monitor>()
    }
}
