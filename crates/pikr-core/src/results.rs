//! Result list model and popup sizing.

use crate::descriptor::AppDescriptor;
use crate::filter;
use tracing::debug;

/// Rows currently displayed, stored as positions into the directory snapshot.
///
/// Rebuilt from scratch on every query change, never patched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ResultList {
    rows: Vec<usize>,
}

impl ResultList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard all rows and refill them from `query` against `all`.
    pub fn rebuild(&mut self, query: &str, all: &[AppDescriptor]) {
        self.rows = filter::matching_indices(query, all);
        debug!("Result list rebuilt: {} rows for {:?}", self.rows.len(), query);
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Snapshot position of the descriptor shown at `row`.
    pub fn get(&self, row: usize) -> Option<usize> {
        self.rows.get(row).copied()
    }

    pub fn iter<'a>(&'a self, all: &'a [AppDescriptor]) -> impl Iterator<Item = &'a AppDescriptor> {
        self.rows.iter().filter_map(move |&idx| all.get(idx))
    }
}

/// Fixed-width popup that grows by one row height per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupGeometry {
    pub width: i32,
    /// Height of the search field area, also the collapsed popup height
    pub header_height: i32,
    pub row_height: i32,
}

impl Default for PopupGeometry {
    fn default() -> Self {
        Self {
            width: 400,
            header_height: 50,
            row_height: 56,
        }
    }
}

impl PopupGeometry {
    /// Window height for `rows` results, capped by `max_height` when known.
    // Result counts are bounded by the installed application set
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn height_for(&self, rows: usize, max_height: Option<i32>) -> i32 {
        let rows = rows.min(i32::MAX as usize) as i32;
        let height = self
            .header_height
            .saturating_add(rows.saturating_mul(self.row_height));

        match max_height {
            Some(max) if max > 0 => height.min(max.max(self.header_height)),
            _ => height,
        }
    }
}
