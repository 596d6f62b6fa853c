use chrono::{SecondsFormat, Utc};
use serde::Serialize;

/// Sentinel the listing endpoint reports when no prices were found.
pub const NO_RESULTS_PRICE: f64 = 9.0;

const CLOSED_KEYWORDS: [&str; 2] = ["cerrada", "completado"];

#[derive(Debug, Clone, Serialize)]
pub struct WorkRecord {
    pub work_id: String,
    pub nombre: String,
    pub telefono: String,
    pub email: String,
    pub fecha_reserva: String,
    pub lead_status: LeadStatus,
    pub scraped_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Pendiente,
    Completado,
}

impl LeadStatus {
    /// Classifies status-like texts scraped off a detail page. First text
    /// carrying a closed keyword wins; anything else stays open.
    pub fn from_status_texts<I>(texts: I) -> LeadStatus
    where
        I: IntoIterator<Item = String>,
    {
        for text in texts {
            let text = text.to_lowercase();
            if CLOSED_KEYWORDS.iter().any(|kw| text.contains(kw)) {
                return LeadStatus::Completado;
            }
        }

        LeadStatus::Pendiente
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PriceSummary {
    pub precios: Vec<f64>,
    pub primer_precio: f64,
    pub promedio: f64,
    pub total_trabajos: usize,
}

impl PriceSummary {
    pub fn from_prices(precios: Vec<f64>) -> Self {
        let total_trabajos = precios.len();
        let primer_precio = precios.first().copied().unwrap_or(NO_RESULTS_PRICE);
        let promedio = match total_trabajos {
            0 => NO_RESULTS_PRICE,
            n => {
                let mean = precios.iter().sum::<f64>() / n as f64;
                (mean * 100.0).round() / 100.0
            }
        };

        PriceSummary {
            precios,
            primer_precio,
            promedio,
            total_trabajos,
        }
    }
}

/// RFC 3339 UTC timestamp with millisecond precision, the shape the portal
/// consumers already expect.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::{LeadStatus, PriceSummary};

    #[test]
    fn empty_listing_reports_sentinel_values() {
        let summary = PriceSummary::from_prices(vec![]);

        assert_eq!(summary.primer_precio, 9.0);
        assert_eq!(summary.promedio, 9.0);
        assert_eq!(summary.total_trabajos, 0);
        assert!(summary.precios.is_empty());
    }

    #[test]
    fn mean_is_rounded_to_two_decimals() {
        let summary = PriceSummary::from_prices(vec![150.0, 200.5, 9.99]);

        assert_eq!(summary.primer_precio, 150.0);
        assert_eq!(summary.promedio, 120.16);
        assert_eq!(summary.total_trabajos, 3);
    }

    #[test]
    fn single_price_is_its_own_mean() {
        let summary = PriceSummary::from_prices(vec![75.5]);

        assert_eq!(summary.primer_precio, 75.5);
        assert_eq!(summary.promedio, 75.5);
        assert_eq!(summary.total_trabajos, 1);
    }

    #[test]
    fn closed_keyword_marks_lead_completed() {
        let texts = vec![
            "Precio: 120€".to_string(),
            "Obra CERRADA el 12/04".to_string(),
        ];

        assert_eq!(LeadStatus::from_status_texts(texts), LeadStatus::Completado);
    }

    #[test]
    fn no_closed_keyword_keeps_lead_pending() {
        let texts = vec!["Precio: 120€".to_string(), "En curso".to_string()];

        assert_eq!(LeadStatus::from_status_texts(texts), LeadStatus::Pendiente);
    }

    #[test]
    fn no_status_elements_keeps_lead_pending() {
        assert_eq!(
            LeadStatus::from_status_texts(std::iter::empty()),
            LeadStatus::Pendiente
        );
    }

    #[test]
    fn lead_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(LeadStatus::Pendiente).unwrap(),
            serde_json::json!("pendiente")
        );
        assert_eq!(
            serde_json::to_value(LeadStatus::Completado).unwrap(),
            serde_json::json!("completado")
        );
    }
}
