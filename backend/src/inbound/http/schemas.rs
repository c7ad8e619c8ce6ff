//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and live in the inbound adapter
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The authorization token is missing or malformed.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The requested talker does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The talker store could not be read.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "unauthorized")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "Token não encontrado")]
    message: String,
    /// Correlation identifier, echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Rejected field and rejection code for validation failures.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Talk`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Talk, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TalkSchema {
    /// Date the talk was watched, `dd/mm/aaaa`.
    #[schema(example = "23/10/2020")]
    watched_at: String,
    /// Integer rating from 1 to 5.
    #[schema(example = 5, minimum = 1, maximum = 5)]
    rate: u8,
}

/// OpenAPI schema for [`crate::domain::Talker`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Talker)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TalkerSchema {
    /// Positive identifier assigned at creation.
    #[schema(example = 1, minimum = 1)]
    id: u64,
    #[schema(example = "Henrique Albuquerque")]
    name: String,
    #[schema(example = 62, minimum = 18)]
    age: u64,
    talk: TalkSchema,
}

/// Body accepted by `POST /talker` and `PUT /talker/{id}`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TalkerRequestSchema {
    /// At least three characters.
    #[schema(example = "Danielle Santos")]
    name: String,
    /// Integer, at least 18.
    #[schema(example = 56)]
    age: u64,
    talk: TalkSchema,
}

/// Body accepted by `POST /login`.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LoginRequestSchema {
    #[schema(example = "deferiascomigo@gmail.com")]
    email: String,
    /// At least six characters.
    #[schema(example = "12345678")]
    password: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[rstest]
    #[case("invalid_request")]
    #[case("unauthorized")]
    #[case("not_found")]
    #[case("service_unavailable")]
    #[case("internal_error")]
    fn error_code_schema_lists_every_code(#[case] code: &str) {
        assert!(schema_to_json::<ErrorCodeSchema>().contains(code), "missing {code}");
    }

    #[rstest]
    fn error_schema_uses_wire_field_names() {
        assert_eq!(ErrorSchema::name(), "crate.domain.Error");
        let json = schema_to_json::<ErrorSchema>();
        assert!(json.contains("traceId"), "schema should contain traceId");
    }

    #[rstest]
    fn talk_schema_uses_camel_case() {
        assert_eq!(TalkSchema::name(), "crate.domain.Talk");
        assert!(schema_to_json::<TalkSchema>().contains("watchedAt"));
    }

    #[rstest]
    fn talker_schema_lists_record_fields() {
        assert_eq!(TalkerSchema::name(), "crate.domain.Talker");
        let json = schema_to_json::<TalkerSchema>();
        for field in ["id", "name", "age", "talk"] {
            assert!(json.contains(field), "missing {field}");
        }
    }
}
