use client::{tab::ActiveTab, user::UserRecord};

/// Identifies one fetch: the page it asked for and the view session it was
/// issued under. Results are only applied while the session is still current.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    page: u32,
    epoch: u64,
}

impl FetchTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// All state owned by the users view.
///
/// `users` only ever grows within a session and is never deduplicated.
/// `bookmarks` is unique by id and keeps the order entries were bookmarked in.
#[derive(Clone, Debug)]
pub struct UserListState {
    users: Vec<UserRecord>,
    bookmarks: Vec<UserRecord>,
    search_text: String,
    page: u32,
    in_flight: u32,
    active_tab: ActiveTab,
    epoch: u64,
    mounted: bool,
}

impl Default for UserListState {
    fn default() -> Self {
        Self::new()
    }
}

impl UserListState {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            bookmarks: Vec::new(),
            search_text: String::new(),
            page: 1,
            in_flight: 0,
            active_tab: ActiveTab::Users,
            epoch: 0,
            mounted: false,
        }
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }
    pub fn bookmarks(&self) -> &[UserRecord] {
        &self.bookmarks
    }
    pub fn search_text(&self) -> &str {
        &self.search_text
    }
    pub fn page(&self) -> u32 {
        self.page
    }
    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }
    pub fn active_tab(&self) -> ActiveTab {
        self.active_tab
    }
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Starts a new session: everything but the epoch goes back to the
    /// freshly-mounted state, and fetches from earlier sessions become stale.
    pub fn reset(&mut self) {
        let epoch = self.epoch.wrapping_add(1);
        *self = Self {
            epoch,
            mounted: true,
            ..Self::new()
        };
    }

    /// Ends the current session without touching the collections. Nothing
    /// but a new [`reset`](Self::reset) revives it.
    pub fn invalidate(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        self.in_flight = 0;
        self.mounted = false;
    }

    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.in_flight += 1;
        FetchTicket {
            page,
            epoch: self.epoch,
        }
    }

    /// Moves to the next page and begins fetching it. Refused while another
    /// fetch is in flight.
    pub fn advance_page(&mut self) -> Option<FetchTicket> {
        if self.loading() {
            return None;
        }
        self.page += 1;
        Some(self.begin_fetch(self.page))
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.epoch == self.epoch
    }

    /// Appends a fetched page. Returns `false` and leaves the state untouched
    /// when the ticket belongs to an earlier session.
    pub fn apply_page(&mut self, ticket: FetchTicket, users: Vec<UserRecord>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.users.extend(users);
        self.finish_fetch();
        true
    }

    pub fn fail_fetch(&mut self, ticket: FetchTicket) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.finish_fetch();
        true
    }

    fn finish_fetch(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Flips bookmark membership of `user` and returns the new membership.
    pub fn toggle_bookmark(&mut self, user: &UserRecord) -> bool {
        if let Some(index) = self.bookmarks.iter().position(|u| u.id() == user.id()) {
            self.bookmarks.remove(index);
            false
        } else {
            self.bookmarks.push(user.clone());
            true
        }
    }

    pub fn is_bookmarked(&self, id: u64) -> bool {
        self.bookmarks.iter().any(|u| u.id() == id)
    }

    pub fn set_search_text(&mut self, text: String) -> bool {
        if self.search_text == text {
            return false;
        }
        self.search_text = text;
        true
    }

    /// Users whose login contains the search text, ignoring case.
    pub fn filtered_users(&self) -> impl Iterator<Item = &UserRecord> {
        let needle = self.search_text.to_lowercase();
        self.users
            .iter()
            .filter(move |user| user.login().to_lowercase().contains(&needle))
    }

    pub fn switch_tab(&mut self, tab: ActiveTab) -> bool {
        if self.active_tab == tab {
            return false;
        }
        self.active_tab = tab;
        true
    }
}
