//! State and behaviour of the users view: paged accumulation of remote users,
//! debounced search, bookmarks and tab selection.

pub mod controller;
pub mod debounce;
pub mod emitter;
pub mod frontend_updates;
pub mod state;

pub use controller::{FetchOutcome, UserListController};
pub use emitter::StateEmitter;
