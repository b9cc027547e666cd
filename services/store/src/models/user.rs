//! User model and credential payloads

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// User record as stored in the `userInfo` collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub email: String,
    /// PHC-formatted Argon2 hash, never the plaintext
    #[serde(rename = "password")]
    pub password_hash: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
}

/// Request for `POST /auth`
#[derive(Deserialize)]
pub struct AuthRequest {
    pub email: String,
    pub password: String,
}

/// Request for `POST /register`
#[derive(Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
    #[serde(rename = "dateOfBirth", deserialize_with = "deserialize_date_of_birth")]
    pub date_of_birth: DateTime<Utc>,
    pub gender: String,
}

/// Request for `POST /check-account`
#[derive(Debug, Deserialize)]
pub struct EmailRequest {
    pub email: String,
}

/// Parse a date of birth given either as an RFC 3339 timestamp or as a
/// plain `YYYY-MM-DD` date (taken as midnight UTC)
pub fn parse_date_of_birth(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| format!("invalid dateOfBirth `{raw}`, expected YYYY-MM-DD or an RFC 3339 timestamp"))
}

fn deserialize_date_of_birth<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date_of_birth(&raw).map_err(serde::de::Error::custom)
}

/// Response carrying a freshly issued token
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub message: String,
    pub token: String,
}

/// Response for `POST /check-account`
#[derive(Debug, Serialize)]
pub struct AccountExistsResponse {
    #[serde(rename = "userExists")]
    pub user_exists: bool,
}

/// Response for a successful `POST /verify`
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: String,
    pub message: String,
}

/// Plain acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
