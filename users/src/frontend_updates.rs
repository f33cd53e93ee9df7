use client::{tab::ActiveTab, user::UserRecord};
use serde::Serialize;

use crate::state::UserListState;

#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum UpdateReason {
    Mount,
    FetchStarted,
    FetchCompleted,
    FetchFailed,
    Bookmark,
    Search,
    Tab,
}

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserRow {
    #[serde(flatten)]
    pub user: UserRecord,
    pub bookmarked: bool,
}

/// Everything the frontend needs to render the view.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserListView {
    pub users: Vec<UserRow>,
    pub total_users: usize,
    pub bookmarks: Vec<UserRecord>,
    pub search_text: String,
    pub page: u32,
    pub loading: bool,
    pub can_load_more: bool,
    pub active_tab: ActiveTab,
}

impl From<&UserListState> for UserListView {
    fn from(state: &UserListState) -> Self {
        let users = state
            .filtered_users()
            .map(|user| UserRow {
                user: user.clone(),
                bookmarked: state.is_bookmarked(user.id()),
            })
            .collect();

        UserListView {
            users,
            total_users: state.users().len(),
            bookmarks: state.bookmarks().to_vec(),
            search_text: state.search_text().to_owned(),
            page: state.page(),
            loading: state.loading(),
            can_load_more: !state.loading(),
            active_tab: state.active_tab(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UsersUpdateEvent {
    pub reason: UpdateReason,
    pub view: UserListView,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FetchFailedEvent {
    pub page: u32,
    pub message: String,
}
