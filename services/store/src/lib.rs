//! Store backend: account registration and sign-in with signed tokens, plus
//! a small item catalog and purchase log, served over HTTP on top of a
//! document store.

pub mod catalog;
pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod jwt;
pub mod models;
pub mod password;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

pub use state::AppState;
