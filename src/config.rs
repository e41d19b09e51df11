// =============================================================================
// Application Configuration — environment-driven settings
// =============================================================================
//
// Every tunable lives in the process environment (a `.env` file is loaded
// at startup in development). Missing or malformed variables fall back to
// defaults with a warning, so a bare environment still boots a working
// service.
// =============================================================================

use tracing::warn;

/// Query ranges accepted by the Yahoo Finance chart API.
pub const VALID_RANGES: &[&str] = &["1d", "5d", "1mo", "3mo", "6mo", "1y", "5y", "ytd", "max"];

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_stock_range() -> String {
    "1y".to_string()
}

/// Settings for the optional keep-alive pinger (free-tier hosts idle out
/// after ~15 minutes without traffic).
#[derive(Debug, Clone)]
pub struct KeepAliveConfig {
    /// Master switch (`TOGGLE_KEEP_ALIVE=true`).
    pub enabled: bool,
    /// URL to ping; defaults to the local server.
    pub target_url: String,
    /// Minutes between pings.
    pub interval_mins: f64,
    /// Taipei-local hour at which pinging pauses.
    pub break_hour: u32,
    /// Taipei-local hour at which pinging resumes.
    pub continue_hour: u32,
}

impl Default for KeepAliveConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            target_url: "http://localhost:3000".to_string(),
            interval_mins: 10.0,
            break_hour: 0,
            continue_hour: 6,
        }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Default Yahoo chart range when a request does not pass `?range=`.
    pub stock_range: String,
    pub keep_alive: KeepAliveConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            stock_range: default_stock_range(),
            keep_alive: KeepAliveConfig::default(),
        }
    }
}

impl AppConfig {
    /// Assemble the configuration from environment variables.
    ///
    /// `BIND_ADDR` wins over `PORT`; `STOCK_RANGE` must be one of
    /// [`VALID_RANGES`] or it is ignored with a warning. Keep-alive knobs:
    /// `TOGGLE_KEEP_ALIVE`, `KEEP_ALIVE_URL`, `ALIVE_REQ_INTERVAL`
    /// (minutes), `KEEP_ALIVE_BREAK_HOUR`, `KEEP_ALIVE_CONTINUE_HOUR`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(addr) = std::env::var("BIND_ADDR") {
            config.bind_addr = addr;
        } else if let Ok(port) = std::env::var("PORT") {
            config.bind_addr = format!("0.0.0.0:{port}");
        }

        if let Ok(range) = std::env::var("STOCK_RANGE") {
            if VALID_RANGES.contains(&range.as_str()) {
                config.stock_range = range;
            } else {
                warn!(range = %range, "STOCK_RANGE is not a valid Yahoo range, keeping default");
            }
        }

        config.keep_alive.enabled = std::env::var("TOGGLE_KEEP_ALIVE")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        if let Ok(url) = std::env::var("KEEP_ALIVE_URL") {
            config.keep_alive.target_url = url;
        }

        if let Ok(mins) = std::env::var("ALIVE_REQ_INTERVAL") {
            match mins.parse::<f64>() {
                Ok(m) if m > 0.0 => config.keep_alive.interval_mins = m,
                _ => warn!(value = %mins, "ALIVE_REQ_INTERVAL is not a positive number, keeping default"),
            }
        }

        if let Ok(hour) = std::env::var("KEEP_ALIVE_BREAK_HOUR") {
            if let Ok(h) = hour.parse::<u32>() {
                config.keep_alive.break_hour = h % 24;
            }
        }
        if let Ok(hour) = std::env::var("KEEP_ALIVE_CONTINUE_HOUR") {
            if let Ok(h) = hour.parse::<u32>() {
                config.keep_alive.continue_hour = h % 24;
            }
        }

        config
    }
}
