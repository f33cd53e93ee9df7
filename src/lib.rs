#![deny(unused_must_use)]
#![deny(clippy::all)]

pub mod logging;

#[cfg(feature = "desktop")]
mod app;
#[cfg(feature = "desktop")]
mod users;
#[cfg(feature = "desktop")]
mod utils;

#[cfg(feature = "desktop")]
pub use app::run;
