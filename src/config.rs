use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::models::cache::CACHE_DURATION;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: Url,
    /// Cache window and periodic refresh period.
    pub cache_duration: Duration,
}

impl AppConfig {
    pub fn from_env() -> ClientResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> ClientResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup("ACTIVITIES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = Url::parse(&raw_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "ACTIVITIES_API_URL must be a base URL, got {}",
                raw_url
            )));
        }

        let cache_duration = match lookup("ACTIVITIES_CACHE_MS") {
            Some(raw) => {
                let millis: u64 = raw.trim().parse().map_err(|_| {
                    ClientError::Config(format!("ACTIVITIES_CACHE_MS must be a number, got {}", raw))
                })?;
                if millis == 0 {
                    return Err(ClientError::Config(
                        "ACTIVITIES_CACHE_MS must be greater than zero".into(),
                    ));
                }
                Duration::from_millis(millis)
            }
            None => CACHE_DURATION,
        };

        Ok(Self {
            base_url,
            cache_duration,
        })
    }
}
