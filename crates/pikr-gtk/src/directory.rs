//! Installed applications via GIO's desktop-entry registry.

use gio::prelude::*;
use gtk4::gdk::prelude::*;
use gtk4::{gdk, glib};
use pikr_core::{AppDescriptor, AppDirectory, LaunchError};
use tracing::debug;

/// Reads `.desktop` entries through `gio::AppInfo`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GioDirectory;

impl AppDirectory for GioDirectory {
    fn list_all(&self) -> Vec<AppDescriptor> {
        gio::AppInfo::all()
            .into_iter()
            .filter(|info| info.should_show())
            .filter_map(|info| describe(&info))
            .collect()
    }

    fn launch(&self, app: &AppDescriptor, uris: &[&str]) -> Result<(), LaunchError> {
        let info = gio::DesktopAppInfo::new(&app.id)
            .ok_or_else(|| LaunchError::new(&app.name, "desktop entry not found"))?;

        // Launch context from the display gives proper startup notification
        let context = gdk::Display::default().map(|d| d.app_launch_context());

        // Detach the child so it outlives the launcher under the quit policy
        let user_setup: Option<Box<dyn FnOnce() + 'static>> = Some(Box::new(|| unsafe {
            libc::setsid();

            let devnull = libc::open(c"/dev/null".as_ptr().cast::<libc::c_char>(), libc::O_RDWR);
            if devnull != -1 {
                libc::dup2(devnull, 0);
                libc::dup2(devnull, 1);
                libc::dup2(devnull, 2);
                if devnull > 2 {
                    libc::close(devnull);
                }
            }
        }));

        let mut pid_callback = |_info: &gio::DesktopAppInfo, pid: glib::Pid| {
            debug!("Spawned pid {}", pid.0);
        };

        info.launch_uris_as_manager_with_fds(
            uris,
            context.as_ref(),
            glib::SpawnFlags::SEARCH_PATH,
            user_setup,
            Some(&mut pid_callback),
            None::<std::os::fd::OwnedFd>,
            None::<std::os::fd::OwnedFd>,
            None::<std::os::fd::OwnedFd>,
        )
        .map_err(|e| LaunchError::new(&app.name, e.message()))
    }
}

fn describe(info: &gio::AppInfo) -> Option<AppDescriptor> {
    let id = info.id()?.to_string();

    let keywords: Vec<String> = info
        .downcast_ref::<gio::DesktopAppInfo>()
        .map(|desktop| desktop.keywords().iter().map(ToString::to_string).collect())
        .unwrap_or_default();

    let mut app = AppDescriptor::new(id, info.display_name().as_str()).with_keywords(keywords);
    if let Some(description) = info.description().filter(|d| !d.is_empty()) {
        app = app.with_description(description.as_str());
    }
    if let Some(icon) = info.icon().and_then(|icon| IconExt::to_string(&icon)) {
        app = app.with_icon(icon.as_str());
    }
    Some(app)
}
