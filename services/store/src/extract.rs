//! Request extractors

use axum::extract::FromRequest;
use axum::http::{HeaderName, HeaderValue};
use axum_extra::headers::{self, Header};

use crate::error::ApiError;

/// JSON body whose rejections render as [`ApiError::BadRequest`]
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct AppJson<T>(pub T);

static JWT_TOKEN: HeaderName = HeaderName::from_static("jwt-token");

/// The `jwt-token` header sent by clients to `POST /verify`
#[derive(Debug, Clone, PartialEq)]
pub struct JwtToken(pub String);

impl Header for JwtToken {
    fn name() -> &'static HeaderName {
        &JWT_TOKEN
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let token = value.to_str().map_err(|_| headers::Error::invalid())?.trim();

        if token.is_empty() {
            return Err(headers::Error::invalid());
        }

        Ok(JwtToken(token.to_string()))
    }

    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        if let Ok(value) = HeaderValue::from_str(&self.0) {
            values.extend(std::iter::once(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_jwt_token_header() {
        let value = HeaderValue::from_static(" abc.def.ghi ");
        let token = JwtToken::decode(&mut std::iter::once(&value)).unwrap();
        assert_eq!(token, JwtToken("abc.def.ghi".to_string()));
    }

    #[test]
    fn test_blank_header_is_invalid() {
        let value = HeaderValue::from_static("   ");
        assert!(JwtToken::decode(&mut std::iter::once(&value)).is_err());
        assert!(JwtToken::decode(&mut std::iter::empty()).is_err());
    }
}
