// =============================================================================
// Keep-Alive Scheduler — periodic self-ping for free-tier hosting
// =============================================================================
//
// Free hosting tiers idle a service out after ~15 minutes without traffic.
// When enabled, this task pings the configured URL on a fixed interval,
// except during a quiet window of Taipei-local hours (default 00:00–06:00)
// when nobody is watching the report anyway. The quiet window may wrap
// around midnight.
// =============================================================================

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{FixedOffset, Timelike, Utc};
use tracing::{info, warn};

use crate::config::KeepAliveConfig;

/// Taipei is UTC+8 year-round.
const TAIPEI_OFFSET_SECS: i32 = 8 * 3600;

/// Count of pings attempted since startup, for log correlation.
static PING_COUNT: AtomicU64 = AtomicU64::new(0);

/// Current hour (0–23) on the Taipei clock.
fn current_taipei_hour() -> u32 {
    let tz = FixedOffset::east_opt(TAIPEI_OFFSET_SECS).expect("valid fixed offset");
    Utc::now().with_timezone(&tz).hour()
}

/// Whether `hour` falls inside the quiet window `[break_hour, continue_hour)`.
///
/// When `break_hour >= continue_hour` the window wraps midnight, e.g.
/// break 22 / continue 6 silences 22:00–06:00.
fn is_quiet_hour(hour: u32, break_hour: u32, continue_hour: u32) -> bool {
    if break_hour < continue_hour {
        hour >= break_hour && hour < continue_hour
    } else {
        hour >= break_hour || hour < continue_hour
    }
}

/// Fire one keep-alive request and log the outcome.
async fn ping(client: &reqwest::Client, url: &str) {
    let attempt = PING_COUNT.fetch_add(1, Ordering::SeqCst) + 1;
    match client.get(url).send().await {
        Ok(resp) => {
            info!(url = %url, attempt, status = %resp.status(), "keep-alive ping");
        }
        Err(e) => {
            warn!(url = %url, attempt, error = %e, "keep-alive ping failed");
        }
    }
}

/// Run the keep-alive loop forever. Spawned once from `main` when
/// `config.enabled` is set; does nothing otherwise.
pub async fn run(config: KeepAliveConfig) {
    if !config.enabled {
        info!("keep-alive scheduler disabled");
        return;
    }

    let client = reqwest::Client::new();
    let period = std::time::Duration::from_secs_f64(config.interval_mins * 60.0);
    info!(
        url = %config.target_url,
        interval_mins = config.interval_mins,
        quiet = format!("{:02}:00-{:02}:00 Taipei", config.break_hour, config.continue_hour),
        "keep-alive scheduler started"
    );

    let mut interval = tokio::time::interval(period);
    loop {
        // First tick fires immediately, matching "check and ping once at
        // startup, then on every interval".
        interval.tick().await;

        if is_quiet_hour(current_taipei_hour(), config.break_hour, config.continue_hour) {
            info!("quiet hours — keep-alive ping skipped");
            continue;
        }
        ping(&client, &config.target_url).await;
    }
}
