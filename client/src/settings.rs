use std::{env, str::FromStr, time::Duration};

use log::warn;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_PER_PAGE: u32 = 10;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

const API_BASE_VAR: &str = "GITHUB_USERS_API";
const PER_PAGE_VAR: &str = "GITHUB_USERS_PER_PAGE";
const SEARCH_DEBOUNCE_VAR: &str = "GITHUB_USERS_SEARCH_DEBOUNCE_MS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub api_base: String,
    pub per_page: u32,
    pub search_debounce: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            per_page: DEFAULT_PER_PAGE,
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();

        let api_base = lookup(API_BASE_VAR)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.api_base);

        let per_page = parse_or(&lookup, PER_PAGE_VAR, defaults.per_page);
        let per_page = if per_page == 0 {
            warn!("{PER_PAGE_VAR} must be positive, using {DEFAULT_PER_PAGE}");
            DEFAULT_PER_PAGE
        } else {
            per_page
        };

        let search_debounce = Duration::from_millis(parse_or(
            &lookup,
            SEARCH_DEBOUNCE_VAR,
            DEFAULT_SEARCH_DEBOUNCE_MS,
        ));

        Settings {
            api_base,
            per_page,
            search_debounce,
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + Copy,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse() {
            Ok(v) => v,
            Err(_) => {
                warn!("ignoring invalid value {raw:?} for {key}");
                default
            }
        },
        None => default,
    }
}
