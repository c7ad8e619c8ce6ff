//! Talker record handlers.
//!
//! ```text
//! GET /talker
//! GET /talker/{id}
//! POST /talker          (authorization: <16 chars>)
//! PUT /talker/{id}      (authorization: <16 chars>)
//! ```

use actix_web::{HttpRequest, HttpResponse, get, post, put, web};

use crate::domain::validation::TALKER_NOT_FOUND;
use crate::domain::{Error, Talker, TalkerId, validate_talker_submission};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TalkerRequestSchema, TalkerSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::submission::talker_submission;

/// Path ids that do not parse as a positive integer cannot match any record.
fn parse_talker_id(raw: &str) -> Result<TalkerId, Error> {
    raw.parse().map_err(|_| Error::not_found(TALKER_NOT_FOUND))
}

/// List every talker in store order.
#[utoipa::path(
    get,
    path = "/talker",
    responses(
        (status = 200, description = "All talkers", body = [TalkerSchema]),
        (status = 503, description = "Talker store unavailable", body = ErrorSchema)
    ),
    tags = ["talkers"],
    operation_id = "listTalkers",
    security([])
)]
#[get("/talker")]
pub async fn list_talkers(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Talker>>> {
    let talkers = state.talkers.list_all().await?;
    Ok(web::Json(talkers))
}

/// Fetch one talker by id.
#[utoipa::path(
    get,
    path = "/talker/{id}",
    params(("id" = String, Path, description = "Talker identifier")),
    responses(
        (status = 200, description = "Talker found", body = TalkerSchema),
        (status = 404, description = "Talker not found", body = ErrorSchema),
        (status = 503, description = "Talker store unavailable", body = ErrorSchema)
    ),
    tags = ["talkers"],
    operation_id = "getTalker",
    security([])
)]
#[get("/talker/{id}")]
pub async fn get_talker(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Talker>> {
    let id = parse_talker_id(&path)?;
    let talker = state.talkers.get_by_id(id).await?;
    Ok(web::Json(talker))
}

/// Create a talker under the next free id.
#[utoipa::path(
    post,
    path = "/talker",
    request_body = TalkerRequestSchema,
    responses(
        (status = 201, description = "Talker created", body = TalkerSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Token missing or invalid", body = ErrorSchema),
        (status = 503, description = "Talker store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["talkers"],
    operation_id = "createTalker"
)]
#[post("/talker")]
pub async fn create_talker(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let submission = talker_submission(&req, &body)?;
    let draft = validate_talker_submission(&submission)?;
    let talker = state.talkers_command.create(draft).await?;
    Ok(HttpResponse::Created().json(talker))
}

/// Replace the fields of an existing talker.
///
/// The body is validated before the id is looked up.
#[utoipa::path(
    put,
    path = "/talker/{id}",
    params(("id" = String, Path, description = "Talker identifier")),
    request_body = TalkerRequestSchema,
    responses(
        (status = 200, description = "Talker updated", body = TalkerSchema),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 401, description = "Token missing or invalid", body = ErrorSchema),
        (status = 404, description = "Talker not found", body = ErrorSchema),
        (status = 503, description = "Talker store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["talkers"],
    operation_id = "updateTalker"
)]
#[put("/talker/{id}")]
pub async fn update_talker(
    state: web::Data<HttpState>,
    req: HttpRequest,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<web::Json<Talker>> {
    let submission = talker_submission(&req, &body)?;
    let draft = validate_talker_submission(&submission)?;
    let id = parse_talker_id(&path)?;
    let talker = state.talkers_command.update(id, draft).await?;
    Ok(web::Json(talker))
}

#[cfg(test)]
#[path = "talkers_tests.rs"]
mod tests;
