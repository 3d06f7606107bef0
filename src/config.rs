// src/config.rs
// =============================================================================
// Runtime settings shared by the HTTP client and the archive writer.
//
// The CLI fills this in from its flags; library callers and tests build one
// with Config::default() and the builder-style setters below.
// =============================================================================

use std::time::Duration;

/// Base address of the public GitHub REST API
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Sent as the User-Agent header on every request
pub const DEFAULT_USER_AGENT: &str = "zora-cli";

/// How many file downloads may be in flight at once
pub const DEFAULT_WORKER_CAP: usize = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base: String,
    pub user_agent: String,
    pub worker_cap: usize,
    /// Limit on establishing a connection; a slow body is never cut off
    pub connect_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            worker_cap: DEFAULT_WORKER_CAP,
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl Config {
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Zero is bumped to one so the writer always makes progress
    pub fn worker_cap(mut self, worker_cap: usize) -> Self {
        self.worker_cap = worker_cap.max(1);
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}
