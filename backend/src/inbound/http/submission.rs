//! Request-to-[`Submission`] extraction shared by the mutation handlers.
//!
//! Bodies are read as raw bytes rather than through `web::Json` so that a
//! missing `Content-Type` or an empty body still reaches the validation
//! chain, and the authorization check keeps its place at the front.

use actix_web::{HttpRequest, http::header};
use serde_json::{Map, Value, json};

use crate::domain::{AuthorizationTokenCheck, Error, Submission, Validator};

const INVALID_JSON: &str = "O corpo da requisição deve ser um JSON válido";

/// Raw `authorization` header, decoded lossily.
pub fn authorization_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned())
}

/// Parse a request body; blank bodies become an empty object.
pub fn parse_body(bytes: &[u8]) -> Result<Value, Error> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(bytes).map_err(|err| {
        Error::invalid_request(INVALID_JSON)
            .with_details(json!({ "code": "invalid_json", "reason": err.to_string() }))
    })
}

/// Body-only submission for `POST /login`.
pub fn login_submission(bytes: &[u8]) -> Result<Submission, Error> {
    parse_body(bytes).map(Submission::from_body)
}

/// Authorized submission for `POST /talker` and `PUT /talker/{id}`.
///
/// A malformed body is only reported once the token has been accepted.
pub fn talker_submission(req: &HttpRequest, bytes: &[u8]) -> Result<Submission, Error> {
    let authorization = authorization_header(req);
    match parse_body(bytes) {
        Ok(body) => Ok(Submission::new(authorization, body)),
        Err(err) => {
            AuthorizationTokenCheck.check(&Submission::new(authorization, Value::Null))?;
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    #[case(b"".as_slice())]
    #[case(b"  \n".as_slice())]
    fn blank_bodies_parse_as_empty_objects(#[case] bytes: &[u8]) {
        assert_eq!(parse_body(bytes).expect("blank body"), json!({}));
    }

    #[rstest]
    fn malformed_bodies_are_invalid_requests() {
        let err = parse_body(b"{\"name\":").expect_err("truncated JSON");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), INVALID_JSON);
    }

    #[rstest]
    fn token_is_checked_before_the_body_is_rejected() {
        let req = TestRequest::post().to_http_request();
        let err = talker_submission(&req, b"not json").expect_err("no token");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    fn malformed_body_is_reported_after_a_valid_token() {
        let req = TestRequest::post()
            .insert_header((header::AUTHORIZATION, "abcdefghijklmnop"))
            .to_http_request();
        let err = talker_submission(&req, b"not json").expect_err("bad body");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    fn header_is_carried_into_the_submission() {
        let req = TestRequest::post()
            .insert_header((header::AUTHORIZATION, "abcdefghijklmnop"))
            .to_http_request();
        let submission = talker_submission(&req, b"{}").expect("submission");
        assert_eq!(submission.authorization(), Some("abcdefghijklmnop"));
    }
}
