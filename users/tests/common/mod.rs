#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc, time::Duration};

use client::{settings::Settings, user::UserRecord};
use parking_lot::Mutex;
use remote::{UserSource, error::RemoteAccessError};
use tokio::sync::Notify;
use users::{
    StateEmitter, UserListController,
    frontend_updates::{FetchFailedEvent, UpdateReason, UsersUpdateEvent},
};

pub type PageResult = Result<Vec<UserRecord>, RemoteAccessError>;

/// Serves scripted pages. Pages that were never scripted come back empty.
/// When gated, every fetch waits for one `Notify` permit before answering.
#[derive(Default)]
pub struct ScriptedSource {
    pages: Mutex<HashMap<u32, PageResult>>,
    calls: Mutex<Vec<(u32, u32)>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    pub fn with_page(self, page: u32, result: PageResult) -> Self {
        self.pages.lock().insert(page, result);
        self
    }

    pub fn calls(&self) -> Vec<(u32, u32)> {
        self.calls.lock().clone()
    }
}

impl UserSource for ScriptedSource {
    async fn fetch_page(&self, page: u32, per_page: u32) -> PageResult {
        self.calls.lock().push((page, per_page));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.pages.lock().remove(&page).unwrap_or(Ok(Vec::new()))
    }
}

type UpdateHook = Box<dyn Fn(&UsersUpdateEvent) + Send + Sync>;

/// Records every event. An optional hook runs on each update before it is
/// recorded, while the controller is still emitting it.
#[derive(Default)]
pub struct RecordingEmitter {
    updates: Mutex<Vec<UsersUpdateEvent>>,
    failures: Mutex<Vec<FetchFailedEvent>>,
    on_update: Option<UpdateHook>,
}

impl RecordingEmitter {
    pub fn with_hook<F>(hook: F) -> Self
    where
        F: Fn(&UsersUpdateEvent) + Send + Sync + 'static,
    {
        Self {
            on_update: Some(Box::new(hook)),
            ..Self::default()
        }
    }

    pub fn updates(&self) -> Vec<UsersUpdateEvent> {
        self.updates.lock().clone()
    }

    pub fn count(&self, reason: UpdateReason) -> usize {
        self.updates
            .lock()
            .iter()
            .filter(|event| event.reason == reason)
            .count()
    }

    pub fn failures(&self) -> Vec<FetchFailedEvent> {
        self.failures.lock().clone()
    }
}

impl StateEmitter for RecordingEmitter {
    fn emit_update(&self, event: UsersUpdateEvent) {
        if let Some(hook) = &self.on_update {
            hook(&event);
        }
        self.updates.lock().push(event);
    }
    fn emit_fetch_failed(&self, event: FetchFailedEvent) {
        self.failures.lock().push(event);
    }
}

pub type TestController = UserListController<Arc<ScriptedSource>, Arc<RecordingEmitter>>;

pub fn settings() -> Settings {
    Settings {
        api_base: "http://127.0.0.1".to_owned(),
        per_page: 10,
        search_debounce: Duration::from_millis(300),
    }
}

pub fn controller(source: ScriptedSource) -> (TestController, Arc<ScriptedSource>, Arc<RecordingEmitter>) {
    controller_with(source, RecordingEmitter::default())
}

pub fn controller_with(
    source: ScriptedSource,
    emitter: RecordingEmitter,
) -> (TestController, Arc<ScriptedSource>, Arc<RecordingEmitter>) {
    let source = Arc::new(source);
    let emitter = Arc::new(emitter);
    let controller = UserListController::new(source.clone(), emitter.clone(), &settings());
    (controller, source, emitter)
}

pub fn user(id: u64, login: &str) -> UserRecord {
    UserRecord::new(id, login, format!("https://avatars.example/{id}"))
}

pub fn page_of(start: u64, count: u64) -> Vec<UserRecord> {
    (start..start + count)
        .map(|id| user(id, &format!("user{id}")))
        .collect()
}

pub fn failure() -> PageResult {
    Err(RemoteAccessError::UnparseableResponse(
        "expected value at line 1 column 1".to_owned(),
    ))
}

/// Lets spawned tasks run until `done` holds, without moving the clock.
pub async fn settle<F: Fn() -> bool>(done: F) {
    for _ in 0..100 {
        if done() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition not reached");
}

/// Like [`settle`], for multi-threaded runtimes where other workers need
/// real time to make progress.
pub async fn wait_until<F: Fn() -> bool>(done: F) {
    for _ in 0..1000 {
        if done() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition not reached");
}
