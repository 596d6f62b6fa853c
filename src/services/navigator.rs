use std::time::{Duration, Instant};

use thirtyfour::WebDriver;

use crate::error::{ScrapeError, ScrapeResult};

/// Timeout applied to the existence and detail flows.
pub const DEFAULT_NAV_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on the post-filter settle watch. Expiry is not an error.
pub const RESULTS_SETTLE_TIMEOUT: Duration = Duration::from_secs(10);

const POLL_INTERVAL: Duration = Duration::from_millis(400);

const READINESS_PROBE: &str =
    "return [document.readyState, performance.getEntriesByType('resource').length];";

const LISTING_PROBE: &str = "return document.body.innerHTML.length;";

/// Navigates and waits until network activity settles: the document must
/// report `complete` and the resource count must hold still across one
/// polling interval before the deadline.
pub async fn goto_settled(driver: &WebDriver, url: &str, timeout: Duration) -> ScrapeResult<()> {
    driver.goto(url).await?;

    let deadline = Instant::now() + timeout;
    let mut last_resource_count = u64::MAX;

    loop {
        let ret = driver.execute(READINESS_PROBE, Vec::new()).await?;
        let (ready_state, resource_count): (String, u64) = ret.convert()?;

        if ready_state == "complete" && resource_count == last_resource_count {
            return Ok(());
        }
        last_resource_count = resource_count;

        if Instant::now() >= deadline {
            return Err(ScrapeError::NavigationTimeout {
                url: url.to_string(),
                timeout_ms: timeout.as_millis() as u64,
            });
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Waits for the listing markup to stop mutating after a filter action:
/// two consecutive equal samples count as settled. The filter runs async in
/// the page with no completion signal to hook, so this watch is best-effort
/// and a timeout only logs.
pub async fn wait_for_results_settle(driver: &WebDriver, timeout: Duration) {
    let deadline = Instant::now() + timeout;
    let mut last_length: Option<u64> = None;

    loop {
        let length = match driver.execute(LISTING_PROBE, Vec::new()).await {
            Ok(ret) => ret.convert::<u64>().ok(),
            Err(e) => {
                log::warn!("Settle probe failed, extracting as-is: {:?}", e);
                return;
            }
        };

        if length.is_some() && length == last_length {
            return;
        }
        last_length = length;

        if Instant::now() >= deadline {
            log::warn!("Listing did not settle within {:?}, extracting as-is", timeout);
            return;
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}
