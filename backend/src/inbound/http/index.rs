//! Root route answering with an empty body.

use actix_web::{HttpResponse, get};

/// `GET /`: bare 200 with no body.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    security([]),
    responses((status = 200, description = "Service is reachable"))
)]
#[get("/")]
pub async fn index() -> HttpResponse {
    HttpResponse::Ok().finish()
}
