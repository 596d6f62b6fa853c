use std::time::{Duration, Instant};

use thirtyfour::{By, WebDriver};
use url::Url;

use crate::configuration::PortalSettings;
use crate::error::{ScrapeError, ScrapeResult};
use crate::services::navigator::{self, DEFAULT_NAV_TIMEOUT};

const LOGIN_TIMEOUT: Duration = Duration::from_secs(30);
const POLL_INTERVAL: Duration = Duration::from_millis(500);

const EMAIL_INPUT: &str = "proEmail";
const PASSWORD_INPUT: &str = "proPasswd";
const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;

/// Logs the portal session in. The driver stays open regardless of the
/// outcome; the caller owns its lifetime.
pub async fn login(driver: &WebDriver, portal: &PortalSettings) -> ScrapeResult<()> {
    navigator::goto_settled(driver, &portal.login_url, DEFAULT_NAV_TIMEOUT).await?;

    driver
        .find(By::Id(EMAIL_INPUT))
        .await?
        .send_keys(portal.email.as_str())
        .await?;
    driver
        .find(By::Id(PASSWORD_INPUT))
        .await?
        .send_keys(portal.password.as_str())
        .await?;
    driver.find(By::Css(SUBMIT_BUTTON)).await?.click().await?;

    wait_for_authenticated_zone(driver, &portal.authenticated_marker, LOGIN_TIMEOUT).await
}

/// The portal gives no structured login response; the only success signal is
/// landing inside the professional zone.
async fn wait_for_authenticated_zone(
    driver: &WebDriver,
    marker: &str,
    timeout: Duration,
) -> ScrapeResult<()> {
    let deadline = Instant::now() + timeout;

    loop {
        let current = driver.current_url().await?;
        if in_authenticated_zone(&current, marker) {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(ScrapeError::Authentication);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

fn in_authenticated_zone(url: &Url, marker: &str) -> bool {
    url.path().contains(marker)
}
