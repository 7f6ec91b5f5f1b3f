//! Authentication data models

use serde::{Deserialize, Serialize};

/// JWT claims structure
///
/// `sub` is the decimal user id; `iat` and `exp` are Unix seconds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Registration request payload
#[derive(Deserialize, Debug, Clone)]
pub struct RegisterRequest {
    pub phone_number: String,
    pub full_name: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct RegisterResponse {
    pub id: i64,
}

/// Login request payload
#[derive(Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub phone_number: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    pub id: i64,
    pub token: String,
}
