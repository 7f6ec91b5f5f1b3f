// src/profile/mod.rs
//! Profile read and partial update for the authenticated caller

pub mod handlers;
pub mod models;
pub mod routes;


pub use routes::profile_routes;
