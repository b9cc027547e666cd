//! Repositories for document store operations

pub mod item;
pub mod purchase;
pub mod user;

pub use item::ItemRepository;
pub use purchase::PurchaseRepository;
pub use user::UserRepository;
