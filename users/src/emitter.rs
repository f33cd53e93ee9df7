use std::sync::Arc;

use crate::frontend_updates::{FetchFailedEvent, UsersUpdateEvent};

/// Where the controller pushes state changes. The desktop shell forwards these
/// to the webview as events.
///
/// Called with the controller's state lock held; implementations must not call
/// back into the controller.
pub trait StateEmitter: Send + Sync + 'static {
    fn emit_update(&self, event: UsersUpdateEvent);
    fn emit_fetch_failed(&self, event: FetchFailedEvent);
}

impl<T: StateEmitter> StateEmitter for Arc<T> {
    fn emit_update(&self, event: UsersUpdateEvent) {
        (**self).emit_update(event);
    }
    fn emit_fetch_failed(&self, event: FetchFailedEvent) {
        (**self).emit_fetch_failed(event);
    }
}
