//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the talker, login and health paths, the schema
//! wrappers from [`crate::inbound::http::schemas`] and the `authorization`
//! header security scheme. The document is served by Swagger UI in debug
//! builds and exported with `cargo run --bin openapi-dump`.

use crate::inbound::http::login::LoginResponse;
use crate::inbound::http::schemas::{
    ErrorCodeSchema, ErrorSchema, LoginRequestSchema, TalkSchema, TalkerRequestSchema,
    TalkerSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the token header security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TokenHeader",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "authorization",
                "Sixteen-character token issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Talker manager API",
        description = "Read and maintain talker records; mutations require a login token."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenHeader" = [])),
    paths(
        crate::inbound::http::talkers::list_talkers,
        crate::inbound::http::talkers::get_talker,
        crate::inbound::http::talkers::create_talker,
        crate::inbound::http::talkers::update_talker,
        crate::inbound::http::login::login,
        crate::inbound::http::index::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        TalkSchema,
        TalkerSchema,
        TalkerRequestSchema,
        LoginRequestSchema,
        LoginResponse
    )),
    tags(
        (name = "talkers", description = "Talker records"),
        (name = "login", description = "Token issuance"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/talker")]
    #[case("/talker/{id}")]
    #[case("/login")]
    #[case("/health/ready")]
    fn document_registers_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn document_registers_token_security_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("TokenHeader"));
        // utoipa replaces :: with . in schema names
        assert!(components.schemas.contains_key("crate.domain.Talker"));
    }
}
