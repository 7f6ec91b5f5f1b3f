//! # Users Module
//!
//! The persistent `User` entity and the `UserStore` collaborator the account
//! service talks to. `SqliteUserStore` is the production implementation.

pub mod models;
pub mod store;


pub use models::{NewUser, ProfileUpdate};
pub use store::{SqliteUserStore, StoreError, UserStore};
