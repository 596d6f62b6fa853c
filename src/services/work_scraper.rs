use regex::Regex;
use thirtyfour::{By, WebDriver};

use crate::configuration::{PortalSettings, Settings};
use crate::domain::work::{now_iso, LeadStatus, WorkRecord};
use crate::error::ScrapeResult;
use crate::services::droid::Droid;
use crate::services::field_extractor::{extract_field, FieldSpec, Strategy};
use crate::services::navigator::{self, DEFAULT_NAV_TIMEOUT};
use crate::services::portal_session;

/// Elements the portal renders on a dead detail page.
const MISSING_MARKER_SELECTOR: &str = r#".error, .not-found, [class*="error"]"#;

/// Phrases the portal uses for a dead detail page. Wording changes upstream
/// break this silently; there is no structured signal to check instead.
const MISSING_PHRASES: [&str; 2] = ["página no existe", "no encontrado"];

const STATUS_SELECTOR: &str = r#"[class*="estado"], [class*="status"], .precioObra"#;

const TITLE_MARKER: &str = "DETALLE DEL TRABAJO con ID";

/// Whether the detail page for `work_id` represents a live record.
/// One browser session, released on every path.
pub async fn check_work(settings: &Settings, work_id: &str) -> ScrapeResult<bool> {
    let droid = Droid::new(&settings.webdriver).await?;
    let outcome = exists_flow(&droid.driver, &settings.portal, work_id).await;
    droid.quit().await;

    outcome
}

/// Full field extraction for `work_id`. One browser session, released on
/// every path.
pub async fn fetch_work_data(settings: &Settings, work_id: &str) -> ScrapeResult<WorkRecord> {
    let droid = Droid::new(&settings.webdriver).await?;
    let outcome = record_flow(&droid.driver, &settings.portal, work_id).await;
    droid.quit().await;

    outcome
}

async fn exists_flow(
    driver: &WebDriver,
    portal: &PortalSettings,
    work_id: &str,
) -> ScrapeResult<bool> {
    portal_session::login(driver, portal).await?;
    navigator::goto_settled(driver, &portal.detail_url_for(work_id), DEFAULT_NAV_TIMEOUT).await?;

    record_exists(driver).await
}

async fn record_flow(
    driver: &WebDriver,
    portal: &PortalSettings,
    work_id: &str,
) -> ScrapeResult<WorkRecord> {
    portal_session::login(driver, portal).await?;
    navigator::goto_settled(driver, &portal.detail_url_for(work_id), DEFAULT_NAV_TIMEOUT).await?;

    extract_record(driver, work_id).await
}

/// The portal has no structured found/not-found signal, so existence is
/// inferred from incidental page content: any error-indicator element OR any
/// not-found phrase in the body text means the record is gone.
async fn record_exists(driver: &WebDriver) -> ScrapeResult<bool> {
    let error_markers = driver.find_all(By::Css(MISSING_MARKER_SELECTOR)).await?;
    if !error_markers.is_empty() {
        return Ok(false);
    }

    let body_text = driver.find(By::Tag("body")).await?.text().await?;

    Ok(!text_reports_missing(&body_text))
}

async fn extract_record(driver: &WebDriver, work_id: &str) -> ScrapeResult<WorkRecord> {
    let nombre = extract_field(driver, &nombre_spec()).await;
    let telefono = extract_field(driver, &telefono_spec()).await;
    let email = extract_field(driver, &email_spec()).await;
    let fecha_reserva = extract_field(driver, &fecha_reserva_spec()).await;

    // The title-derived id is a cross-check only; the record keeps the id the
    // caller asked for even when a stale page disagrees.
    match scraped_work_id(driver).await? {
        Some(page_id) if page_id != work_id => {
            log::warn!(
                "Detail page reports id {} but id {} was requested",
                page_id,
                work_id
            );
        }
        Some(_) => {}
        None => log::warn!("Detail page title carries no work id"),
    }

    let lead_status = LeadStatus::from_status_texts(status_texts(driver).await?);

    Ok(WorkRecord {
        work_id: work_id.to_string(),
        nombre,
        telefono,
        email,
        fecha_reserva,
        lead_status,
        scraped_at: now_iso(),
    })
}

async fn scraped_work_id(driver: &WebDriver) -> ScrapeResult<Option<String>> {
    let locator = By::XPath(format!(r#"//span[contains(., "{}")]"#, TITLE_MARKER));
    let Some(span) = driver.find_all(locator).await?.into_iter().next() else {
        return Ok(None);
    };
    let title = span.text().await?;

    Ok(work_id_from_title(&title))
}

async fn status_texts(driver: &WebDriver) -> ScrapeResult<Vec<String>> {
    let mut texts = Vec::new();
    for element in driver.find_all(By::Css(STATUS_SELECTOR)).await? {
        texts.push(element.text().await?);
    }

    Ok(texts)
}

fn work_id_from_title(title: &str) -> Option<String> {
    let id_pattern = Regex::new(r"ID\s+(\d+)").unwrap();

    id_pattern
        .captures(title)
        .map(|captures| captures[1].to_string())
}

fn text_reports_missing(text: &str) -> bool {
    MISSING_PHRASES.iter().any(|phrase| text.contains(phrase))
}

fn nombre_spec() -> FieldSpec {
    FieldSpec {
        name: "nombre",
        strategies: vec![
            Strategy::prop(By::Css("input.tituloObra[value]"), "value"),
            Strategy::prop(By::Css(".readonly.small.tituloObra"), "value"),
        ],
    }
}

fn telefono_spec() -> FieldSpec {
    FieldSpec {
        name: "telefono",
        strategies: vec![
            Strategy::prop(By::Css(r#".grupoCampo:has(label[for="tel1"]) input"#), "value"),
            Strategy::prop(By::Css("a.lab-field input"), "value"),
        ],
    }
}

fn email_spec() -> FieldSpec {
    FieldSpec {
        name: "email",
        strategies: vec![Strategy::prop(
            By::Css(".zonaDerecha .grupoCampo:nth-child(3) input"),
            "value",
        )],
    }
}

fn fecha_reserva_spec() -> FieldSpec {
    FieldSpec {
        name: "fecha_reserva",
        strategies: vec![Strategy::prop(
            By::Css(r#".grupoCampo:has(label[for="fReserva"]) input"#),
            "value",
        )],
    }
}
