// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
};
use axum::{Json, response::IntoResponse, response::Response};
use serde_json::json;
use uuid::Uuid;

// The custom HTTP header carrying the team the caller is acting for.
const TEAM_ID_HEADER: &str = "x-team-id";

/// Extractor holding the UUID of the team (tenant) the request targets.
///
/// Every tenant-scoped handler takes this as an argument; a missing or
/// malformed header rejects the request before any service code runs.
#[derive(Debug, Clone, Copy)]
pub struct TeamContext(pub Uuid);

pub struct TeamRejection {
    status: StatusCode,
    message: &'static str,
}

impl IntoResponse for TeamRejection {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl<S> FromRequestParts<S> for TeamContext
where
    S: Send + Sync,
{
    type Rejection = TeamRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts.headers.get(TEAM_ID_HEADER);

        match header_value {
            Some(value) => {
                let value_str = value.to_str().map_err(|_| TeamRejection {
                    status: StatusCode::BAD_REQUEST,
                    message: "The X-Team-ID header contains invalid characters.",
                })?;

                let team_id = Uuid::parse_str(value_str).map_err(|_| TeamRejection {
                    status: StatusCode::BAD_REQUEST,
                    message: "The X-Team-ID header is not a valid UUID.",
                })?;

                Ok(TeamContext(team_id))
            }
            None => Err(TeamRejection {
                status: StatusCode::BAD_REQUEST,
                message: "The X-Team-ID header is required.",
            }),
        }
    }
}
