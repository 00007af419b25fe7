//! One result row: icon, name and a dimmed description.

use gtk4::prelude::*;
use gtk4::{Align, Orientation};
use pikr_core::AppDescriptor;
use tracing::debug;

pub fn result_row(app: &AppDescriptor) -> gtk4::ListBoxRow {
    let icon = gtk4::Image::builder()
        .icon_size(gtk4::IconSize::Large)
        .margin_end(10)
        .build();
    if let Some(reference) = &app.icon {
        match gio::Icon::for_string(reference) {
            Ok(gicon) => icon.set_from_gicon(&gicon),
            Err(e) => debug!("No icon for {}: {}", app.id, e),
        }
    }

    let name = gtk4::Label::builder()
        .label(app.name.as_str())
        .halign(Align::Start)
        .css_classes(["app-name"])
        .build();

    let description = gtk4::Label::builder()
        .label(app.description.as_deref().unwrap_or_default())
        .halign(Align::Start)
        .ellipsize(gtk4::pango::EllipsizeMode::End)
        .visible(app.description.is_some())
        .css_classes(["dim-label", "app-description"])
        .build();

    let labels = gtk4::Box::new(Orientation::Vertical, 2);
    labels.set_valign(Align::Center);
    labels.append(&name);
    labels.append(&description);

    let content = gtk4::Box::builder()
        .orientation(Orientation::Horizontal)
        .spacing(6)
        .margin_top(6)
        .margin_bottom(6)
        .margin_start(6)
        .margin_end(6)
        .build();
    content.append(&icon);
    content.append(&labels);

    gtk4::ListBoxRow::builder()
        .child(&content)
        .tooltip_text(app.name.as_str())
        .build()
}
