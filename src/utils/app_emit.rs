#[macro_export]
macro_rules! app_emit {
    ($app:expr, $event:expr, $p:expr) => {
        if let Err(e) = ::tauri::Emitter::emit($app, $event, $p) {
            ::log::warn!("failed to emit event {}: {}", $event, e);
        }
    };
}
