pub mod settings;
pub mod tab;
pub mod user;
