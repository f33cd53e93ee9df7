use std::sync::{Arc, Weak};

use client::{settings::Settings, tab::ActiveTab, user::UserRecord};
use log::{debug, info, warn};
use parking_lot::Mutex;
use remote::UserSource;

use crate::{
    debounce::Debouncer,
    emitter::StateEmitter,
    frontend_updates::{FetchFailedEvent, UpdateReason, UserListView, UsersUpdateEvent},
    state::{FetchTicket, UserListState},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The page arrived and this many records were appended.
    Applied(usize),
    /// The source failed; the error was logged and emitted.
    Failed,
    /// The result arrived after the view was unmounted or remounted.
    Discarded,
    /// Another fetch was already in flight.
    Skipped,
}

struct Inner<S, E> {
    state: Mutex<UserListState>,
    source: S,
    emitter: E,
    search: Debouncer,
    per_page: u32,
}

/// Owns the users view state and runs every operation the view exposes.
///
/// Cheap to clone; clones share state. The state lock is never held across an
/// `.await`, so slow fetches never block bookmarking, searching or tab
/// switches.
pub struct UserListController<S, E> {
    inner: Arc<Inner<S, E>>,
}

impl<S, E> Clone for UserListController<S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: UserSource, E: StateEmitter> UserListController<S, E> {
    pub fn new(source: S, emitter: E, settings: &Settings) -> Self {
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(UserListState::new()),
                source,
                emitter,
                search: Debouncer::new(settings.search_debounce),
                per_page: settings.per_page,
            }),
        }
    }

    /// Starts a fresh view session on page 1 and fetches it.
    pub async fn mount(&self) -> FetchOutcome {
        self.inner.search.cancel();
        let ticket = {
            let mut state = self.inner.state.lock();
            state.reset();
            let page = state.page();
            let ticket = state.begin_fetch(page);
            self.publish(&state, UpdateReason::Mount);
            ticket
        };
        info!("mounted users view (session {})", ticket.epoch());

        self.run_fetch(ticket).await
    }

    /// Ends the view session. Fetches still in flight are discarded when
    /// they complete, and a pending search is dropped.
    pub fn unmount(&self) {
        self.inner.search.cancel();
        let mut state = self.inner.state.lock();
        state.invalidate();
        debug!("unmounted users view");
    }

    pub async fn fetch_page(&self, page: u32) -> FetchOutcome {
        let ticket = {
            let mut state = self.inner.state.lock();
            let ticket = state.begin_fetch(page);
            self.publish(&state, UpdateReason::FetchStarted);
            ticket
        };

        self.run_fetch(ticket).await
    }

    pub async fn load_more(&self) -> FetchOutcome {
        let ticket = {
            let mut state = self.inner.state.lock();
            match state.advance_page() {
                Some(ticket) => {
                    self.publish(&state, UpdateReason::FetchStarted);
                    ticket
                }
                None => {
                    debug!("ignoring load more while a fetch is in flight");
                    return FetchOutcome::Skipped;
                }
            }
        };

        self.run_fetch(ticket).await
    }

    async fn run_fetch(&self, ticket: FetchTicket) -> FetchOutcome {
        let page = ticket.page();
        debug!("fetching users page {page}");
        let result = self
            .inner
            .source
            .fetch_page(page, self.inner.per_page)
            .await;

        let mut state = self.inner.state.lock();
        match result {
            Ok(users) => {
                let count = users.len();
                if !state.apply_page(ticket, users) {
                    debug!("discarding users page {page} from an ended session");
                    return FetchOutcome::Discarded;
                }

                debug!("appended {count} user(s) from page {page}");
                self.publish(&state, UpdateReason::FetchCompleted);
                FetchOutcome::Applied(count)
            }
            Err(e) => {
                if !state.fail_fetch(ticket) {
                    debug!("discarding failed users page {page} from an ended session: {e}");
                    return FetchOutcome::Discarded;
                }

                warn!("error fetching users page {page}: {e}");
                self.inner.emitter.emit_fetch_failed(FetchFailedEvent {
                    page,
                    message: e.to_string(),
                });
                self.publish(&state, UpdateReason::FetchFailed);
                FetchOutcome::Failed
            }
        }
    }

    /// Returns whether `user` is bookmarked afterwards.
    pub fn toggle_bookmark(&self, user: &UserRecord) -> bool {
        let mut state = self.inner.state.lock();
        let bookmarked = state.toggle_bookmark(user);
        debug!(
            "{} user {}",
            if bookmarked { "bookmarked" } else { "unbookmarked" },
            user.id()
        );
        self.publish(&state, UpdateReason::Bookmark);
        bookmarked
    }

    /// Debounced: only the last text of a burst is applied, once the quiet
    /// period has passed, and only if the session it was typed in is still
    /// mounted.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let epoch = {
            let state = self.inner.state.lock();
            if !state.is_mounted() {
                debug!("ignoring search input while unmounted");
                return;
            }
            state.epoch()
        };

        let text = text.into();
        let inner = Arc::downgrade(&self.inner);
        self.inner.search.call(move || {
            if let Some(controller) = Self::upgrade(&inner) {
                controller.apply_search_text(epoch, text);
            }
        });
    }

    fn apply_search_text(&self, epoch: u64, text: String) {
        let mut state = self.inner.state.lock();
        if state.epoch() != epoch {
            debug!("discarding search input from an ended session");
            return;
        }
        if state.set_search_text(text) {
            self.publish(&state, UpdateReason::Search);
        }
    }

    pub fn switch_tab(&self, tab: ActiveTab) {
        let mut state = self.inner.state.lock();
        if state.switch_tab(tab) {
            self.publish(&state, UpdateReason::Tab);
        }
    }

    pub fn filtered_users(&self) -> Vec<UserRecord> {
        self.inner.state.lock().filtered_users().cloned().collect()
    }

    pub fn is_bookmarked(&self, id: u64) -> bool {
        self.inner.state.lock().is_bookmarked(id)
    }

    pub fn view(&self) -> UserListView {
        UserListView::from(&*self.inner.state.lock())
    }

    pub fn state(&self) -> UserListState {
        self.inner.state.lock().clone()
    }

    fn upgrade(inner: &Weak<Inner<S, E>>) -> Option<Self> {
        inner.upgrade().map(|inner| Self { inner })
    }

    /// Emits while the caller still holds the state lock, so events leave in
    /// the same order as the mutations they describe.
    fn publish(&self, state: &UserListState, reason: UpdateReason) {
        let view = UserListView::from(state);
        self.inner
            .emitter
            .emit_update(UsersUpdateEvent { reason, view });
    }
}
