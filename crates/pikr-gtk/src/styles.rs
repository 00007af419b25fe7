//! CSS for the launcher window

use pikr_core::PopupGeometry;
use tracing::debug;

/// Build the stylesheet for a popup of the given geometry.
pub(crate) fn launcher_css(geometry: &PopupGeometry) -> String {
    format!(
        r"
            window.pikr-popup {{
                border-radius: 10px;
            }}

            entry.search-entry {{
                min-height: {entry_height}px;
                margin: 6px 10px;
                font-size: 1.1em;
            }}

            list.results row {{
                min-height: {row_height}px;
                padding: 0 10px;
            }}

            list.results row:selected {{
                border-radius: 6px;
            }}

            label.app-description {{
                font-size: 0.9em;
            }}
        ",
        entry_height = (geometry.header_height - 12).max(0),
        row_height = geometry.row_height,
    )
}

pub(crate) fn apply_css(provider: &gtk4::CssProvider, geometry: &PopupGeometry) {
    let css = launcher_css(geometry);
    debug!("Applying {} bytes of CSS", css.len());
    provider.load_from_data(&css);
}
