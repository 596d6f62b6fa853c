use thirtyfour::error::WebDriverError;
use thiserror::Error;

pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("login failed: authenticated zone was not reached")]
    Authentication,

    #[error("navigation to {url} did not settle within {timeout_ms}ms")]
    NavigationTimeout { url: String, timeout_ms: u64 },

    #[error(transparent)]
    WebDriver(#[from] WebDriverError),
}

#[cfg(test)]
mod tests {
    use super::ScrapeError;

    #[test]
    fn navigation_timeout_names_the_url() {
        let err = ScrapeError::NavigationTimeout {
            url: "https://www.vipreformas.es/detalle-trabajo/42".to_string(),
            timeout_ms: 30_000,
        };

        assert!(err.to_string().contains("detalle-trabajo/42"));
        assert!(err.to_string().contains("30000ms"));
    }
}
