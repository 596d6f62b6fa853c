use actix_web::{post, web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::configuration::Settings;
use crate::domain::work::now_iso;
use crate::services::{price_scraper, work_scraper};

#[derive(Deserialize)]
pub struct WorkIdBody {
    work_id: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchBody {
    search_text: Option<String>,
}

#[post("/check-work")]
async fn check_work(settings: web::Data<Settings>, body: web::Json<WorkIdBody>) -> HttpResponse {
    let Some(work_id) = required_work_id(&body) else {
        return missing_work_id();
    };

    let request_id = Uuid::new_v4();
    log::info!("request {} - checking work_id {}", request_id, work_id);

    match work_scraper::check_work(settings.get_ref(), &work_id).await {
        Ok(exists) => {
            log::info!(
                "request {} - work {} {}",
                request_id,
                work_id,
                if exists { "exists" } else { "does not exist" }
            );
            HttpResponse::Ok().json(json!({
                "work_id": work_id,
                "exists": exists,
                "timestamp": now_iso(),
                "success": true,
            }))
        }
        Err(e) => {
            log::error!("request {} - work {} failed: {}", request_id, work_id, e);
            HttpResponse::InternalServerError().json(json!({
                "error": e.to_string(),
                "work_id": work_id,
                "exists": false,
                "timestamp": now_iso(),
            }))
        }
    }
}

#[post("/get-work-data")]
async fn get_work_data(settings: web::Data<Settings>, body: web::Json<WorkIdBody>) -> HttpResponse {
    let Some(work_id) = required_work_id(&body) else {
        return missing_work_id();
    };

    let request_id = Uuid::new_v4();
    log::info!("request {} - extracting work_id {}", request_id, work_id);

    match work_scraper::fetch_work_data(settings.get_ref(), &work_id).await {
        Ok(record) => {
            log::info!("request {} - extracted data for work {}", request_id, work_id);
            HttpResponse::Ok().json(json!({
                "work_id": work_id,
                "success": true,
                "data": record,
                "timestamp": now_iso(),
            }))
        }
        Err(e) => {
            log::error!("request {} - work {} failed: {}", request_id, work_id, e);
            HttpResponse::InternalServerError().json(json!({
                "error": e.to_string(),
                "work_id": work_id,
                "success": false,
                "timestamp": now_iso(),
            }))
        }
    }
}

/// Body is optional here: no body at all behaves like an empty filter.
#[post("/search-works")]
async fn search_works(
    settings: web::Data<Settings>,
    body: Option<web::Json<SearchBody>>,
) -> HttpResponse {
    let search_text = body
        .and_then(|b| b.into_inner().search_text)
        .filter(|text| !text.is_empty());

    let request_id = Uuid::new_v4();
    log::info!(
        "request {} - aggregating prices, filter: {:?}",
        request_id,
        search_text
    );

    match price_scraper::search_works(settings.get_ref(), search_text.as_deref()).await {
        Ok(summary) => HttpResponse::Ok().json(json!({
            "success": true,
            "search_text": search_text,
            "precios": summary.precios,
            "primer_precio": summary.primer_precio,
            "promedio": summary.promedio,
            "total_trabajos": summary.total_trabajos,
            "timestamp": now_iso(),
        })),
        Err(e) => {
            log::error!("request {} - price aggregation failed: {}", request_id, e);
            HttpResponse::InternalServerError().json(json!({ "error": e.to_string() }))
        }
    }
}

/// Rejected before any browser session is opened.
fn required_work_id(body: &WorkIdBody) -> Option<String> {
    body.work_id.clone().filter(|id| !id.is_empty())
}

fn missing_work_id() -> HttpResponse {
    HttpResponse::BadRequest().json(json!({ "error": "work_id es requerido" }))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};

    use crate::configuration::{
        ApplicationSettings, PortalSettings, Settings, WebDriverSettings,
    };

    use super::{check_work, get_work_data};

    fn test_settings() -> Settings {
        Settings {
            application: ApplicationSettings {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            webdriver: WebDriverSettings {
                url: "http://localhost:4444".to_string(),
                headless: true,
            },
            portal: PortalSettings {
                email: "pro@example.com".to_string(),
                password: "secret".to_string(),
                login_url: "https://www.vipreformas.es/registro-profesionales".to_string(),
                authenticated_marker: "zona-profesionales".to_string(),
                detail_url: "https://www.vipreformas.es/detalle-trabajo".to_string(),
                listing_url: "https://www.vipreformas.es/trabajos-recibidos/".to_string(),
            },
        }
    }

    #[actix_web::test]
    async fn check_work_without_work_id_is_a_client_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_settings()))
                .service(check_work),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/check-work")
            .set_json(serde_json::json!({}))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["error"], "work_id es requerido");
    }

    #[actix_web::test]
    async fn get_work_data_with_empty_work_id_is_a_client_error() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(test_settings()))
                .service(get_work_data),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/get-work-data")
            .set_json(serde_json::json!({ "work_id": "" }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
