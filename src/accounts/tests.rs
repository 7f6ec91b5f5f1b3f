//! Tests for accounts module
//!
//! These tests drive the account use cases against an in-memory SQLite store:
//! - Register / Login / GetProfile end to end
//! - Credential failures that must look identical to the caller
//! - Partial profile updates, conflicts and empty updates
//! - Login counter failures surfacing as operational errors

#[cfg(test)]
mod tests {
    use super::super::service::{NO_FIELDS_MESSAGE, PHONE_NUMBER_TAKEN_MESSAGE};
    use super::super::*;
    use crate::auth::models::RegisterRequest;
    use crate::auth::password::PasswordService;
    use crate::auth::token::{TokenError, TokenService};
    use crate::auth::validators::{PASSWORD_LENGTH_MESSAGE, PHONE_NUMBER_PREFIX_MESSAGE};
    use crate::common::test_support::{memory_pool, service_with_store, sqlite_service, TEST_SECRET};
    use crate::users::models::User;
    use crate::users::{NewUser, ProfileUpdate, SqliteUserStore, StoreError, UserStore};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    fn register_request(phone: &str, name: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            phone_number: phone.to_string(),
            full_name: name.to_string(),
            password: password.to_string(),
        }
    }

    async fn register_and_login(service: &AccountService, phone: &str) -> (i64, String) {
        let id = service
            .register(register_request(phone, "Jane Doe", "Secr3t!"))
            .await
            .unwrap();
        let login = service.login(phone, "Secr3t!").await.unwrap();
        (id, login.token)
    }

    /// Delegates to SQLite but refuses to count logins
    struct CounterFailingStore {
        inner: SqliteUserStore,
    }

    #[async_trait]
    impl UserStore for CounterFailingStore {
        async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError> {
            self.inner.create_user(user).await
        }

        async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<User, StoreError> {
            self.inner.get_user_by_phone_number(phone_number).await
        }

        async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError> {
            self.inner.get_user_by_id(id).await
        }

        async fn check_phone_number_exists(&self, phone_number: &str) -> Result<bool, StoreError> {
            self.inner.check_phone_number_exists(phone_number).await
        }

        async fn increment_successful_logins(&self, _id: i64) -> Result<(), StoreError> {
            Err(StoreError::Database(sqlx::Error::PoolTimedOut))
        }

        async fn update_user_profile(&self, id: i64, update: &ProfileUpdate) -> Result<(), StoreError> {
            self.inner.update_user_profile(id, update).await
        }
    }

    /// Reports every phone number as free, like a check that lost a race
    struct StaleExistenceStore {
        inner: SqliteUserStore,
    }

    #[async_trait]
    impl UserStore for StaleExistenceStore {
        async fn create_user(&self, user: &NewUser) -> Result<i64, StoreError> {
            self.inner.create_user(user).await
        }

        async fn get_user_by_phone_number(&self, phone_number: &str) -> Result<User, StoreError> {
            self.inner.get_user_by_phone_number(phone_number).await
        }

        async fn get_user_by_id(&self, id: i64) -> Result<User, StoreError> {
            self.inner.get_user_by_id(id).await
        }

        async fn check_phone_number_exists(&self, _phone_number: &str) -> Result<bool, StoreError> {
            Ok(false)
        }

        async fn increment_successful_logins(&self, id: i64) -> Result<(), StoreError> {
            self.inner.increment_successful_logins(id).await
        }

        async fn update_user_profile(&self, id: i64, update: &ProfileUpdate) -> Result<(), StoreError> {
            self.inner.update_user_profile(id, update).await
        }
    }

    // ============================================================================
    // Register / Login / GetProfile
    // ============================================================================

    #[tokio::test]
    async fn test_register_login_and_get_profile() {
        let service = sqlite_service().await;

        let id = service
            .register(register_request("+6281234567890", "Jane Doe", "Secr3t!"))
            .await
            .unwrap();

        let login = service.login("+6281234567890", "Secr3t!").await.unwrap();
        assert_eq!(login.id, id);

        let claims = TokenService::new(TEST_SECRET).verify(&login.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), id);

        let profile = service.get_profile(&login.token).await.unwrap();
        assert_eq!(profile.name, "Jane Doe");
        assert_eq!(profile.phone_number, "+6281234567890");
    }

    #[tokio::test]
    async fn test_register_returns_every_violation() {
        let service = sqlite_service().await;

        let result = service
            .register(register_request("0812345", "Jo", "abc"))
            .await;

        match result {
            Err(AccountError::Validation(messages)) => {
                assert_eq!(messages.len(), 4);
                assert!(messages.contains(&PHONE_NUMBER_PREFIX_MESSAGE.to_string()));
                assert!(messages.contains(&PASSWORD_LENGTH_MESSAGE.to_string()));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_duplicate_phone_is_persistence_error() {
        let service = sqlite_service().await;
        service
            .register(register_request("+6281234567890", "Jane Doe", "Secr3t!"))
            .await
            .unwrap();

        let result = service
            .register(register_request("+6281234567890", "John Doe", "Secr3t!"))
            .await;

        assert!(matches!(
            result,
            Err(AccountError::Persistence(StoreError::PhoneNumberTaken))
        ));
    }

    #[tokio::test]
    async fn test_stored_hash_is_not_plaintext() {
        let pool = memory_pool().await;
        let store = SqliteUserStore::new(pool);
        let service = service_with_store(Arc::new(store.clone()));

        let id = service
            .register(register_request("+6281234567890", "Jane Doe", "Secr3t!"))
            .await
            .unwrap();

        let user = store.get_user_by_id(id).await.unwrap();
        assert_ne!(user.password_hash, "Secr3t!");
        assert!(user.password_hash.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_phone_are_indistinguishable() {
        let service = sqlite_service().await;
        service
            .register(register_request("+6281234567890", "Jane Doe", "Secr3t!"))
            .await
            .unwrap();

        let wrong_password = service.login("+6281234567890", "Wr0ng!!").await;
        let unknown_phone = service.login("+6289999999999", "Secr3t!").await;

        assert!(matches!(wrong_password, Err(AccountError::InvalidCredentials)));
        assert!(matches!(unknown_phone, Err(AccountError::InvalidCredentials)));
        assert_eq!(
            wrong_password.unwrap_err().to_string(),
            unknown_phone.unwrap_err().to_string()
        );
    }

    #[tokio::test]
    async fn test_unknown_phone_costs_a_password_verification() {
        let passwords = PasswordService::new().unwrap();
        let store = Arc::new(SqliteUserStore::new(memory_pool().await));
        let service = AccountService::new(store, passwords, TokenService::new(TEST_SECRET));
        service
            .register(register_request("+6281234567890", "Jane Doe", "Secr3t!"))
            .await
            .unwrap();

        let mut wrong_password = Duration::ZERO;
        let mut unknown_phone = Duration::ZERO;
        for _ in 0..3 {
            let started = Instant::now();
            let _ = service.login("+6281234567890", "Wr0ng!!").await;
            wrong_password += started.elapsed();

            let started = Instant::now();
            let result = service.login("+6289999999999", "Wr0ng!!").await;
            unknown_phone += started.elapsed();
            assert!(matches!(result, Err(AccountError::InvalidCredentials)));
        }

        assert!(
            unknown_phone * 4 >= wrong_password,
            "unknown phone {:?} vs wrong password {:?}",
            unknown_phone,
            wrong_password
        );
    }

    #[tokio::test]
    async fn test_login_increments_counter() {
        let store = SqliteUserStore::new(memory_pool().await);
        let service = service_with_store(Arc::new(store.clone()));

        let (id, _) = register_and_login(&service, "+6281234567890").await;
        service.login("+6281234567890", "Secr3t!").await.unwrap();

        assert_eq!(store.get_user_by_id(id).await.unwrap().successful_logins, 2);
    }

    #[tokio::test]
    async fn test_failed_login_does_not_increment_counter() {
        let store = SqliteUserStore::new(memory_pool().await);
        let service = service_with_store(Arc::new(store.clone()));

        let id = service
            .register(register_request("+6281234567890", "Jane Doe", "Secr3t!"))
            .await
            .unwrap();
        let _ = service.login("+6281234567890", "Wr0ng!!").await;

        assert_eq!(store.get_user_by_id(id).await.unwrap().successful_logins, 0);
    }

    #[tokio::test]
    async fn test_counter_failure_aborts_login_distinctly() {
        let store = CounterFailingStore {
            inner: SqliteUserStore::new(memory_pool().await),
        };
        let service = service_with_store(Arc::new(store));
        service
            .register(register_request("+6281234567890", "Jane Doe", "Secr3t!"))
            .await
            .unwrap();

        let result = service.login("+6281234567890", "Secr3t!").await;

        assert!(matches!(result, Err(AccountError::LoginNotRecorded(_))));
    }

    #[tokio::test]
    async fn test_get_profile_rejects_bad_tokens() {
        let service = sqlite_service().await;

        assert!(matches!(
            service.get_profile("").await,
            Err(AccountError::Unauthorized(TokenError::Missing))
        ));
        assert!(matches!(
            service.get_profile("not-a-jwt").await,
            Err(AccountError::Unauthorized(TokenError::Malformed))
        ));

        let foreign = TokenService::new(b"another_secret").issue(1).unwrap();
        assert!(matches!(
            service.get_profile(&foreign).await,
            Err(AccountError::Unauthorized(TokenError::InvalidSignature))
        ));

        let stale = TokenService::new(TEST_SECRET)
            .issue_at(1, Utc::now().timestamp() - 2 * 60 * 60)
            .unwrap();
        assert!(matches!(
            service.get_profile(&stale).await,
            Err(AccountError::Unauthorized(TokenError::Expired))
        ));
    }

    #[tokio::test]
    async fn test_get_profile_for_missing_user_is_not_found() {
        let service = sqlite_service().await;
        let token = TokenService::new(TEST_SECRET).issue(999).unwrap();

        assert!(matches!(
            service.get_profile(&token).await,
            Err(AccountError::NotFound)
        ));
    }

    // ============================================================================
    // UpdateProfile
    // ============================================================================

    #[tokio::test]
    async fn test_update_without_fields_is_validation_error() {
        let service = sqlite_service().await;
        let (_, token) = register_and_login(&service, "+6281234567890").await;

        for (phone, name) in [(None, None), (Some(""), Some(""))] {
            match service.update_profile(&token, phone, name).await {
                Err(AccountError::Validation(messages)) => {
                    assert_eq!(messages, vec![NO_FIELDS_MESSAGE.to_string()])
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_update_with_taken_phone_is_conflict() {
        let service = sqlite_service().await;
        register_and_login(&service, "+6281111111111").await;
        let (_, token) = register_and_login(&service, "+6282222222222").await;

        match service
            .update_profile(&token, Some("+6281111111111"), None)
            .await
        {
            Err(AccountError::Conflict(msg)) => assert_eq!(msg, PHONE_NUMBER_TAKEN_MESSAGE),
            other => panic!("expected conflict, got {:?}", other),
        }

        let profile = service.get_profile(&token).await.unwrap();
        assert_eq!(profile.phone_number, "+6282222222222");
    }

    #[tokio::test]
    async fn test_update_full_name_only_leaves_phone() {
        let service = sqlite_service().await;
        let (_, token) = register_and_login(&service, "+6281234567890").await;

        service
            .update_profile(&token, None, Some("Jane Roe"))
            .await
            .unwrap();

        let profile = service.get_profile(&token).await.unwrap();
        assert_eq!(profile.name, "Jane Roe");
        assert_eq!(profile.phone_number, "+6281234567890");
    }

    #[tokio::test]
    async fn test_update_phone_number_keeps_token_valid() {
        let service = sqlite_service().await;
        let (_, token) = register_and_login(&service, "+6281234567890").await;

        service
            .update_profile(&token, Some("+6289876543210"), None)
            .await
            .unwrap();

        let profile = service.get_profile(&token).await.unwrap();
        assert_eq!(profile.phone_number, "+6289876543210");
        assert_eq!(profile.name, "Jane Doe");

        assert!(service.login("+6289876543210", "Secr3t!").await.is_ok());
    }

    #[tokio::test]
    async fn test_update_rejects_malformed_phone() {
        let service = sqlite_service().await;
        let (_, token) = register_and_login(&service, "+6281234567890").await;

        let result = service.update_profile(&token, Some("081234567890"), None).await;

        match result {
            Err(AccountError::Validation(messages)) => {
                assert_eq!(messages, vec![PHONE_NUMBER_PREFIX_MESSAGE.to_string()])
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_losing_phone_race_is_persistence_error() {
        let service = service_with_store(Arc::new(StaleExistenceStore {
            inner: SqliteUserStore::new(memory_pool().await),
        }));
        register_and_login(&service, "+6281111111111").await;
        let (_, token) = register_and_login(&service, "+6282222222222").await;

        let result = service
            .update_profile(&token, Some("+6281111111111"), None)
            .await;

        assert!(matches!(
            result,
            Err(AccountError::Persistence(StoreError::PhoneNumberTaken))
        ));
        let profile = service.get_profile(&token).await.unwrap();
        assert_eq!(profile.phone_number, "+6282222222222");
    }

    #[tokio::test]
    async fn test_update_requires_valid_token() {
        let service = sqlite_service().await;

        let result = service.update_profile("garbage", None, Some("Jane Roe")).await;
        assert!(matches!(result, Err(AccountError::Unauthorized(_))));
    }
}
