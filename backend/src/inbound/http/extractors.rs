//! Extractor configuration so malformed requests produce domain error
//! envelopes instead of Actix's plain-text defaults.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};

use crate::domain::Error;

/// Largest accepted JSON body.
pub const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

fn map_json_error(error: &JsonPayloadError) -> Error {
    match error {
        JsonPayloadError::ContentType => {
            Error::unsupported_media_type("Content-Type must be application/json")
        }
        JsonPayloadError::Overflow { limit }
        | JsonPayloadError::OverflowKnownLength { limit, .. } => {
            Error::invalid_request(format!("request body exceeds {limit} bytes"))
        }
        other => {
            Error::invalid_request(format!("body of request contained bad or no data - {other}"))
        }
    }
}

fn json_error_handler(error: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    map_json_error(&error).into()
}

fn query_error_handler(error: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    Error::invalid_request(format!("invalid query string: {error}")).into()
}

fn path_error_handler(error: PathError, req: &HttpRequest) -> actix_web::Error {
    Error::not_found(format!("No resource at '{}': {error}", req.path())).into()
}

/// JSON body configuration: `application/json` only, bounded size.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(MAX_JSON_BODY_BYTES)
        .content_type_required(true)
        .error_handler(json_error_handler)
}

/// Query string configuration.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

/// Path segment configuration; unparseable ids are reported as absent.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}
