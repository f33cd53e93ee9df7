use ::users::{
    StateEmitter, UserListController,
    frontend_updates::{FetchFailedEvent, UsersUpdateEvent},
};
use client::settings::Settings;
use log::{debug, info};
use remote::GithubUserSource;
use tauri::{AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    app_emit,
    logging::{self, DATA_ROOT_DIR},
    users::{
        fetch_page, fetch_state, load_more, mount_view, set_search_text, switch_tab,
        toggle_bookmark, unmount_view,
    },
};

pub type ViewController = UserListController<GithubUserSource, TauriEmitter>;

/// Forwards controller updates to the webview.
pub struct TauriEmitter {
    app_handle: AppHandle,
}

impl TauriEmitter {
    pub fn new(app_handle: AppHandle) -> Self {
        Self { app_handle }
    }
}

impl StateEmitter for TauriEmitter {
    fn emit_update(&self, event: UsersUpdateEvent) {
        app_emit!(&self.app_handle, "users/update", event);
    }
    fn emit_fetch_failed(&self, event: FetchFailedEvent) {
        app_emit!(&self.app_handle, "users/fetch-failed", event);
    }
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    std::panic::set_hook(Box::new(|e| {
        let _ = logging::write_crash_file(&DATA_ROOT_DIR, e);
        println!("{e}");
    }));

    if let Err(e) = logging::init(&DATA_ROOT_DIR) {
        eprintln!("{e}");
    }

    let settings = Settings::from_env();
    info!("using users API at {}", settings.api_base);

    let source = GithubUserSource::from_settings(&settings)
        .unwrap_or_else(|e| panic!("Failed to set up users API client: {e}"));

    let app = tauri::Builder::default()
        .invoke_handler(tauri::generate_handler![
            mount_view,
            unmount_view,
            fetch_state,
            load_more,
            fetch_page,
            toggle_bookmark,
            set_search_text,
            switch_tab,
        ])
        .setup(move |app| {
            let emitter = TauriEmitter::new(app.handle().clone());
            let controller = ViewController::new(source, emitter, &settings);
            app.manage(controller);
            info!("initialized users client");

            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event
                && let Some(controller) = window.try_state::<ViewController>()
            {
                controller.unmount();
            }
        })
        .build(tauri::generate_context!())
        .expect("error while running tauri application");

    app.run(|app_handle, event| {
        if let RunEvent::Exit = event {
            if let Some(controller) = app_handle.try_state::<ViewController>() {
                controller.unmount();
            }
            debug!("exiting users client");
        }
    });
}
