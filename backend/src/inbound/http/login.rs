//! Login handler.
//!
//! ```text
//! POST /login {"email":"deferiascomigo@gmail.com","password":"12345678"}
//! ```

use actix_web::{post, web};
use serde::Serialize;

use crate::domain::validate_login_submission;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, LoginRequestSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::submission::login_submission;

/// Body returned by a successful login.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// Sixteen-character session token.
    #[schema(example = "Q2hhdmVTZWNyZXRh")]
    pub token: String,
}

/// Issue a session token for well-formed credentials.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequestSchema,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["login"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<LoginResponse>> {
    let submission = login_submission(&body)?;
    let credentials = validate_login_submission(&submission)?;
    let token = state.login.login(&credentials).await?;
    Ok(web::Json(LoginResponse {
        token: token.as_str().to_owned(),
    }))
}
