use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

use crate::domain::work::now_iso;

#[get("/")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "OK",
        "service": "VIP Reformas Scraper",
        "timestamp": now_iso(),
    }))
}
