//! Store service models

pub mod item;
pub mod purchase;
pub mod user;

// Re-export for convenience
pub use item::{Item, ItemResponse};
pub use purchase::{Purchase, PurchaseItem};
pub use user::{
    AccountExistsResponse, AuthRequest, EmailRequest, MessageResponse, RegistrationRequest,
    TokenResponse, User, VerifyResponse,
};
