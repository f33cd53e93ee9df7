pub mod error;
pub mod requests;
pub mod source;
pub mod utils;

pub use source::{GithubUserSource, UserSource};
