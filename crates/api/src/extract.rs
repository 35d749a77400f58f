//! Request extraction and response envelopes shared by the handlers.

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use common::Id;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JSON body whose parse failures are reported in the API error envelope.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Success envelope: `{"data": ...}`.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

pub fn ok<T>(data: T) -> Json<Data<T>> {
    Json(Data { data })
}

pub fn created<T>(data: T) -> (StatusCode, Json<Data<T>>) {
    (StatusCode::CREATED, Json(Data { data }))
}

/// Parses a path or query id; only positive integers address a row.
pub fn parse_id(raw: &str) -> Result<Id, ApiError> {
    match raw.trim().parse::<Id>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::bad_request("invalid id")),
    }
}

/// `?id=` on report endpoints. Absent or blank means every anchor row.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub id: Option<String>,
}

impl ReportQuery {
    pub fn anchor(&self) -> Result<Option<Id>, ApiError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => parse_id(raw).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("42").unwrap(), 42);
        for raw in ["0", "-3", "abc", "1.5", ""] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.message, "invalid id", "{raw}");
        }
    }

    #[test]
    fn blank_report_anchor_means_all() {
        assert_eq!(ReportQuery::default().anchor().unwrap(), None);
        let query = ReportQuery {
            id: Some(" ".to_string()),
        };
        assert_eq!(query.anchor().unwrap(), None);
        let query = ReportQuery {
            id: Some("3".to_string()),
        };
        assert_eq!(query.anchor().unwrap(), Some(3));
    }
}
