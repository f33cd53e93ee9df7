use ::users::{FetchOutcome, frontend_updates::UserListView};
use client::{tab::ActiveTab, user::UserRecord};
use log::debug;

use crate::app::ViewController;

#[tauri::command]
pub async fn mount_view(
    state: tauri::State<'_, ViewController>,
) -> Result<UserListView, ()> {
    let outcome = state.mount().await;
    debug!("initial users fetch finished with {outcome:?}");
    Ok(state.view())
}

#[tauri::command]
pub fn unmount_view(state: tauri::State<'_, ViewController>) {
    state.unmount();
}

#[tauri::command]
pub fn fetch_state(state: tauri::State<'_, ViewController>) -> UserListView {
    state.view()
}

#[tauri::command]
pub async fn load_more(state: tauri::State<'_, ViewController>) -> Result<UserListView, ()> {
    if state.load_more().await == FetchOutcome::Skipped {
        debug!("load more requested while loading");
    }
    Ok(state.view())
}

/// Re-requests a single page, used by the frontend to retry a failed fetch.
#[tauri::command]
pub async fn fetch_page(
    page: u32,
    state: tauri::State<'_, ViewController>,
) -> Result<UserListView, ()> {
    state.fetch_page(page).await;
    Ok(state.view())
}

#[tauri::command]
pub fn toggle_bookmark(user: UserRecord, state: tauri::State<'_, ViewController>) -> bool {
    state.toggle_bookmark(&user)
}

// Async so it runs on the tokio runtime the debounce timer needs.
#[tauri::command]
pub async fn set_search_text(
    text: String,
    state: tauri::State<'_, ViewController>,
) -> Result<(), ()> {
    state.set_search_text(text);
    Ok(())
}

#[tauri::command]
pub fn switch_tab(tab: ActiveTab, state: tauri::State<'_, ViewController>) -> UserListView {
    state.switch_tab(tab);
    state.view()
}
