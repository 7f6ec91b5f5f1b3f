// src/accounts/service.rs
//! Register, Login, GetProfile and UpdateProfile

use std::sync::Arc;
use tracing::{debug, error, info, warn};

use super::error::AccountError;
use crate::auth::models::{LoginResponse, RegisterRequest};
use crate::auth::password::{PasswordError, PasswordService};
use crate::auth::token::TokenService;
use crate::auth::validators::{validate_credentials, ProfileUpdateValidator};
use crate::common::{safe_phone_log, Validator};
use crate::profile::models::ProfileResponse;
use crate::users::{NewUser, ProfileUpdate, StoreError, UserStore};

pub const NO_FIELDS_MESSAGE: &str = "No fields provided for update";
pub const PHONE_NUMBER_TAKEN_MESSAGE: &str = "Phone number already exists";

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn UserStore>,
    passwords: PasswordService,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(store: Arc<dyn UserStore>, passwords: PasswordService, tokens: TokenService) -> Self {
        Self {
            store,
            passwords,
            tokens,
        }
    }

    /// Validates, hashes and stores a new user. Returns the new id.
    pub async fn register(&self, request: RegisterRequest) -> Result<i64, AccountError> {
        let violations =
            validate_credentials(&request.phone_number, &request.full_name, &request.password);
        if !violations.is_empty() {
            debug!(
                violations = violations.len(),
                "Registration rejected by credential rules"
            );
            return Err(AccountError::Validation(violations));
        }

        let password_hash = self.hash_password(request.password).await?;

        let new_user = NewUser {
            phone_number: request.phone_number,
            full_name: request.full_name,
            password_hash,
        };
        let id = self
            .store
            .create_user(&new_user)
            .await
            .map_err(AccountError::Persistence)?;

        info!(
            user_id = id,
            phone_number = %safe_phone_log(&new_user.phone_number),
            "User registered"
        );
        Ok(id)
    }

    /// Checks credentials, counts the login and issues a token.
    ///
    /// A failure to count the login aborts the login with
    /// `LoginNotRecorded`, which is distinct from `InvalidCredentials`.
    pub async fn login(&self, phone_number: &str, password: &str) -> Result<LoginResponse, AccountError> {
        let user = match self.store.get_user_by_phone_number(phone_number).await {
            Ok(user) => user,
            Err(StoreError::NotFound) => {
                // Same Argon2 work as a real mismatch so timing does not reveal the account
                let decoy = self.passwords.decoy_hash().to_string();
                self.verify_password(decoy, password.to_string()).await?;
                warn!(
                    phone_number = %safe_phone_log(phone_number),
                    "Login rejected: unknown phone number"
                );
                return Err(AccountError::InvalidCredentials);
            }
            Err(e) => return Err(AccountError::Persistence(e)),
        };

        if !self
            .verify_password(user.password_hash.clone(), password.to_string())
            .await?
        {
            warn!(user_id = user.id, "Login rejected: password mismatch");
            return Err(AccountError::InvalidCredentials);
        }

        self.store
            .increment_successful_logins(user.id)
            .await
            .map_err(|e| {
                error!(error = %e, user_id = user.id, "Failed to record successful login");
                AccountError::LoginNotRecorded(e)
            })?;

        let token = self.tokens.issue(user.id)?;

        info!(
            user_id = user.id,
            successful_logins = user.successful_logins + 1,
            "User logged in"
        );
        Ok(LoginResponse { id: user.id, token })
    }

    /// Verifies a bearer token and returns its subject
    pub fn authenticate(&self, token: &str) -> Result<i64, AccountError> {
        Ok(self.tokens.verify(token)?.user_id()?)
    }

    pub async fn get_profile(&self, token: &str) -> Result<ProfileResponse, AccountError> {
        let user_id = self.authenticate(token)?;

        let user = self.store.get_user_by_id(user_id).await.map_err(|e| {
            warn!(error = %e, user_id, "Profile lookup failed");
            AccountError::from(e)
        })?;

        Ok(ProfileResponse {
            name: user.full_name,
            phone_number: user.phone_number,
        })
    }

    /// Applies the supplied, non-empty fields to the token subject's profile
    pub async fn update_profile(
        &self,
        token: &str,
        phone_number: Option<&str>,
        full_name: Option<&str>,
    ) -> Result<(), AccountError> {
        let user_id = self.authenticate(token)?;

        let update = ProfileUpdate::from_optional(phone_number, full_name)
            .ok_or_else(|| AccountError::Validation(vec![NO_FIELDS_MESSAGE.to_string()]))?;

        let validation = ProfileUpdateValidator.validate(&update);
        if !validation.is_valid() {
            debug!(
                user_id,
                fields = ?validation.fields(),
                "Profile update rejected by format rules"
            );
            return Err(AccountError::Validation(validation.messages()));
        }

        // Read-then-write: the UNIQUE constraint on phone_number backs this up
        // when two updates race for the same number.
        if let Some(phone) = update.phone_number() {
            let exists = self
                .store
                .check_phone_number_exists(phone)
                .await
                .map_err(AccountError::Persistence)?;
            if exists {
                warn!(
                    user_id,
                    phone_number = %safe_phone_log(phone),
                    "Profile update rejected: phone number in use"
                );
                return Err(AccountError::Conflict(PHONE_NUMBER_TAKEN_MESSAGE.to_string()));
            }
        }

        self.store
            .update_user_profile(user_id, &update)
            .await
            .map_err(|e| {
                error!(error = %e, user_id, "Database error updating profile");
                AccountError::from(e)
            })?;

        info!(user_id, fields = update.fields().len(), "Profile updated");
        Ok(())
    }

    async fn hash_password(&self, plaintext: String) -> Result<String, AccountError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.hash(&plaintext))
            .await
            .map_err(|e| AccountError::Internal(format!("hashing task failed: {}", e)))?
            .map_err(|e: PasswordError| {
                error!(error = %e, "Password hashing failed");
                AccountError::Internal(e.to_string())
            })
    }

    async fn verify_password(&self, hash: String, plaintext: String) -> Result<bool, AccountError> {
        let passwords = self.passwords.clone();
        tokio::task::spawn_blocking(move || passwords.verify(&hash, &plaintext))
            .await
            .map_err(|e| AccountError::Internal(format!("verification task failed: {}", e)))?
            .map_err(|e| {
                error!(error = %e, "Stored password hash could not be verified");
                AccountError::Internal(e.to_string())
            })
    }
}
