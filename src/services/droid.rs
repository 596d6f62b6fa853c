use std::time::Duration;

use fake_user_agent::get_rua;
use thirtyfour::{error::WebDriverError, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};

use crate::configuration::WebDriverSettings;

const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// One remote browser session. Heavyweight: a full Chrome process lives
/// behind this handle until [`Droid::quit`] consumes it.
pub struct Droid {
    pub driver: WebDriver,
}

impl Droid {
    pub async fn new(settings: &WebDriverSettings) -> Result<Droid, WebDriverError> {
        let mut caps = DesiredCapabilities::chrome();
        if settings.headless {
            caps.add_arg("--headless=new")?;
        }
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg("--disable-gpu")?;
        caps.add_arg("--window-size=1920,1080")?;
        caps.add_arg(&format!("--user-agent={}", get_rua()))?;

        let driver = WebDriver::new(&settings.url, caps).await?;

        // Session exists from here on; setup failures must not leak it.
        if let Err(e) = driver.set_page_load_timeout(PAGE_LOAD_TIMEOUT).await {
            if let Err(quit_err) = driver.quit().await {
                log::error!("Failed to close half-built session: {:?}", quit_err);
            }
            return Err(e);
        }

        Ok(Droid { driver })
    }

    /// Releases the remote session. Consuming self keeps the release to
    /// exactly once per request; failures are logged, never propagated over
    /// the flow result.
    pub async fn quit(self) {
        if let Err(e) = self.driver.quit().await {
            log::error!("Failed to close the webdriver session: {:?}", e);
        }
    }
}
