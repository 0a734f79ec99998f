use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use reportstream_api::Error;

/// JSON body extractor whose rejections are reported as
/// [`Error::InvalidRequest`].
///
/// Malformed JSON, a missing or wrong `Content-Type`, missing fields and
/// mistyped fields all surface as `422` with a `{"detail": ...}` body, the
/// same shape every other service error uses.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(Error::invalid_request(rejection.body_text())),
        }
    }
}
