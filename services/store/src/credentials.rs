//! Credential service: registration, sign-in and token checks
//!
//! Every operation is a single lookup or insert against the `userInfo`
//! collection. Registration checks for an existing email before inserting,
//! so two concurrent registrations of the same address can both succeed.

use chrono::Utc;
use common::DatabaseError;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    jwt::{Claims, JwtService},
    models::{AuthRequest, RegistrationRequest, User},
    password::PasswordHasher,
    repositories::UserRepository,
    validation,
};

/// Errors returned by the credential service
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// A field failed validation; the message is safe to show to clients
    #[error("{0}")]
    Invalid(String),

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// Unknown email or wrong password, deliberately indistinguishable
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Normalized form under which emails are stored and looked up
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Credential service
#[derive(Clone)]
pub struct CredentialService {
    users: UserRepository,
    jwt: JwtService,
    passwords: PasswordHasher,
    /// Verified against when the email is unknown so both failure paths cost the same
    dummy_hash: String,
}

impl CredentialService {
    /// Create a new credential service
    pub fn new(
        users: UserRepository,
        jwt: JwtService,
        passwords: PasswordHasher,
    ) -> anyhow::Result<Self> {
        let dummy_hash = passwords.hash("dummy-password-for-unknown-users")?;

        Ok(Self {
            users,
            jwt,
            passwords,
            dummy_hash,
        })
    }

    /// Register a new user and return a token for it
    pub async fn register(&self, request: RegistrationRequest) -> Result<String, CredentialError> {
        if request.password != request.confirm_password {
            return Err(CredentialError::PasswordMismatch);
        }

        let email = normalize_email(&request.email);
        validation::validate_email(&email).map_err(CredentialError::Invalid)?;
        validation::validate_password(&request.password).map_err(CredentialError::Invalid)?;
        validation::validate_date_of_birth(request.date_of_birth, Utc::now())
            .map_err(CredentialError::Invalid)?;
        validation::validate_gender(&request.gender).map_err(CredentialError::Invalid)?;

        if self.users.exists_by_email(&email).await? {
            info!("Registration refused, email already registered: {}", email);
            return Err(CredentialError::EmailAlreadyRegistered);
        }

        let password_hash = self
            .passwords
            .hash_async(&request.password)
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))?;

        let user = User {
            email,
            password_hash,
            date_of_birth: request.date_of_birth,
            gender: request.gender.trim().to_string(),
        };
        self.users.create(&user).await?;

        info!("User registered: {}", user.email);
        self.issue_token(&user.email)
    }

    /// Check an email/password pair and return a token on success
    pub async fn authenticate(&self, request: &AuthRequest) -> Result<String, CredentialError> {
        let email = normalize_email(&request.email);
        validation::validate_email(&email).map_err(CredentialError::Invalid)?;

        let user = self.users.find_by_email(&email).await?;

        let stored_hash = user
            .as_ref()
            .map_or(self.dummy_hash.as_str(), |user| user.password_hash.as_str());
        let verified = self
            .passwords
            .verify_async(&request.password, stored_hash)
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))?
            && user.is_some();

        if !verified {
            warn!("Authentication failed for {}", email);
            return Err(CredentialError::InvalidCredentials);
        }

        info!("User authenticated: {}", email);
        self.issue_token(&email)
    }

    /// Verify a token's signature and expiry
    pub fn verify_token(&self, token: &str) -> Result<Claims, CredentialError> {
        self.jwt.validate_token(token).map_err(|e| {
            warn!("Token verification failed: {}", e);
            CredentialError::InvalidToken
        })
    }

    /// Check whether an account exists for an email
    pub async fn check_account_exists(&self, email: &str) -> Result<bool, CredentialError> {
        let email = normalize_email(email);
        validation::validate_email(&email).map_err(CredentialError::Invalid)?;

        Ok(self.users.exists_by_email(&email).await?)
    }

    fn issue_token(&self, email: &str) -> Result<String, CredentialError> {
        self.jwt
            .generate_token(email)
            .map_err(|e| CredentialError::Internal(format!("Failed to generate token: {e}")))
    }
}
