//! The launcher session: one query, one result list, one selection.
//!
//! All state the popup shows lives here and is only ever touched from the UI
//! thread. The view forwards input and re-renders from the accessors.

use crate::config::AfterLaunch;
use crate::descriptor::AppDescriptor;
use crate::directory::AppDirectory;
use crate::error::LaunchError;
use crate::navigation::{Focus, NavAction, NavKey, Navigator};
use crate::results::ResultList;
use crate::visibility::Visibility;
use tracing::{debug, info, warn};

/// Result of feeding input into the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Not handled; the widget's default behaviour applies
    Propagate,
    /// Handled; focus or selection changed
    Handled,
    /// Handled; the popup is now hidden and reset
    Hidden,
    /// The application started and the popup is hidden
    Launched { app: String, after: AfterLaunch },
    /// The application did not start; nothing else changed
    LaunchFailed(LaunchError),
}

pub struct Launcher<D: AppDirectory> {
    directory: D,
    apps: Vec<AppDescriptor>,
    query: String,
    results: ResultList,
    nav: Navigator,
    visibility: Visibility,
    after_launch: AfterLaunch,
}

impl<D: AppDirectory> Launcher<D> {
    /// Snapshot `directory` once; the snapshot lives as long as the session.
    pub fn new(directory: D, after_launch: AfterLaunch) -> Self {
        let apps = directory.list_all();
        info!("Loaded {} applications", apps.len());

        Self {
            directory,
            apps,
            query: String::new(),
            results: ResultList::new(),
            nav: Navigator::new(),
            visibility: Visibility::Hidden,
            after_launch,
        }
    }

    #[cfg(test)]
    pub fn directory(&self) -> &D {
        &self.directory
    }

    #[cfg(test)]
    pub fn apps(&self) -> &[AppDescriptor] {
        &self.apps
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.results.iter(&self.apps)
    }

    pub fn result_count(&self) -> usize {
        self.results.len()
    }

    /// Descriptor displayed at `row`.
    pub fn result(&self, row: usize) -> Option<&AppDescriptor> {
        self.results.get(row).and_then(|idx| self.apps.get(idx))
    }

    pub fn focus(&self) -> Focus {
        self.nav.focus()
    }

    pub fn selected_row(&self) -> Option<usize> {
        self.nav.selected()
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    /// Replace the query text and rebuild the result list from it.
    pub fn set_query(&mut self, text: &str) {
        text.clone_into(&mut self.query);
        self.results.rebuild(&self.query, &self.apps);
        self.nav.invalidate_selection();
    }

    pub fn handle_key(&mut self, key: NavKey) -> Response {
        if !self.is_visible() {
            return Response::Propagate;
        }

        match self.nav.handle(key, self.results.len()) {
            NavAction::Propagate => Response::Propagate,
            NavAction::Handled => Response::Handled,
            NavAction::Hide => {
                self.hide();
                Response::Hidden
            }
            NavAction::Launch(row) => self.launch_row(row),
        }
    }

    /// A row was clicked or otherwise activated directly.
    pub fn activate_row(&mut self, row: usize) -> Response {
        if !self.is_visible() || row >= self.results.len() {
            return Response::Propagate;
        }
        self.launch_row(row)
    }

    /// Pointer selection of a row.
    pub fn select_row(&mut self, row: usize) {
        self.nav.select(row, self.results.len());
    }

    /// Keyboard focus moved into the result list by other means (e.g. Tab).
    pub fn focus_list(&mut self, row: Option<usize>) {
        self.nav.focus_list(row, self.results.len());
    }

    /// Keyboard focus moved to the search field by other means (e.g. a click).
    pub fn focus_search(&mut self) {
        self.nav.focus_search();
    }

    /// Make the popup visible with the search field focused.
    ///
    /// Returns whether it was hidden before.
    pub fn show(&mut self) -> bool {
        let changed = self.visibility.set(Visibility::Visible);
        self.nav.focus_search();
        debug!("show (changed={})", changed);
        changed
    }

    /// Hide the popup and reset it to a blank query with no results.
    ///
    /// Returns whether it was visible before; the reset happens regardless.
    pub fn hide(&mut self) -> bool {
        let changed = self.visibility.set(Visibility::Hidden);
        self.query.clear();
        self.results.clear();
        self.nav.reset();
        debug!("hide (changed={})", changed);
        changed
    }

    fn launch_row(&mut self, row: usize) -> Response {
        let Some(app) = self.result(row) else {
            return Response::Propagate;
        };

        match self.directory.launch(app, &[]) {
            Ok(()) => {
                let name = app.name.clone();
                info!("Launched {} ({})", name, app.id);
                self.hide();
                Response::Launched {
                    app: name,
                    after: self.after_launch,
                }
            }
            Err(e) => {
                warn!("{}", e);
                Response::LaunchFailed(e)
            }
        }
    }
}
