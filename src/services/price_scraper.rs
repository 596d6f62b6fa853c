use regex::Regex;
use scraper::{Html, Selector};
use thirtyfour::{By, WebDriver};

use crate::configuration::{PortalSettings, Settings};
use crate::domain::work::PriceSummary;
use crate::error::ScrapeResult;
use crate::services::droid::Droid;
use crate::services::navigator::{self, DEFAULT_NAV_TIMEOUT, RESULTS_SETTLE_TIMEOUT};
use crate::services::portal_session;

const FILTER_INPUT: &str = "texto_libre";
const FILTER_BUTTON: &str = "a.button-link.dark-blue";

/// Listing rows that may carry a contact price.
const ROW_LABEL_SELECTOR: &str = ".fecha-tabl.v-desktop";

const PRICE_MARKER: &str = "Precio de Contacto:";

/// Aggregates contact prices from the received-works listing, optionally
/// filtered by `search_text` first. One browser session, released on every
/// path.
pub async fn search_works(
    settings: &Settings,
    search_text: Option<&str>,
) -> ScrapeResult<PriceSummary> {
    let droid = Droid::new(&settings.webdriver).await?;
    let outcome = prices_flow(&droid.driver, &settings.portal, search_text).await;
    droid.quit().await;

    outcome
}

async fn prices_flow(
    driver: &WebDriver,
    portal: &PortalSettings,
    search_text: Option<&str>,
) -> ScrapeResult<PriceSummary> {
    portal_session::login(driver, portal).await?;
    navigator::goto_settled(driver, &portal.listing_url, DEFAULT_NAV_TIMEOUT).await?;

    if let Some(text) = search_text {
        driver
            .find(By::Id(FILTER_INPUT))
            .await?
            .send_keys(text)
            .await?;
        driver.find(By::Css(FILTER_BUTTON)).await?.click().await?;
        navigator::wait_for_results_settle(driver, RESULTS_SETTLE_TIMEOUT).await;
    }

    let page_source = driver.source().await?;

    Ok(summary_from_listing(&page_source))
}

fn summary_from_listing(page_source: &str) -> PriceSummary {
    let document = Html::parse_document(page_source);
    let row_selector = Selector::parse(ROW_LABEL_SELECTOR).unwrap();

    let precios = document
        .select(&row_selector)
        .filter_map(|row| {
            let text: String = row.text().collect();
            parse_price_after_marker(&text)
        })
        .collect();

    PriceSummary::from_prices(precios)
}

/// Pulls the price token out of a row's text: digits with an optional single
/// `.`/`,` separator and an optional euro suffix, anchored after the contact
/// price marker so dates earlier in the row cannot match. Comma separators
/// normalize to `.`. Rows without marker or parseable token are skipped.
fn parse_price_after_marker(text: &str) -> Option<f64> {
    let (_, after_marker) = text.split_once(PRICE_MARKER)?;
    let token_pattern = Regex::new(r"(\d+[.,]?\d*)\s*€?").unwrap();
    let token = token_pattern.captures(after_marker)?[1].replace(',', ".");

    token.parse::<f64>().ok()
}
