//! # Accounts Module
//!
//! The account service orchestrates credential rules, password hashing,
//! token handling and the user store into the four account use cases.

pub mod error;
pub mod service;

#[cfg(test)]
mod tests;

pub use error::AccountError;
pub use service::AccountService;
