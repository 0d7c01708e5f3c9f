//! Registration tests for the account crate

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use crate::domain::entity::user::User;
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::phone_number::PhoneNumber;
    use crate::error::{AccountError, AccountResult};

    #[derive(Clone, Default)]
    pub struct InMemoryUserRepository {
        pub users: Arc<Mutex<Vec<User>>>,
    }

    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, user: &User) -> AccountResult<()> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.phone_number == user.phone_number) {
                return Err(AccountError::PhoneNumberTaken);
            }
            if let Some(uid) = user.credential.firebase_uid() {
                if users
                    .iter()
                    .any(|u| u.credential.firebase_uid() == Some(uid))
                {
                    return Err(AccountError::FirebaseUidTaken);
                }
            }
            users.push(user.clone());
            Ok(())
        }

        async fn find_by_phone(&self, phone: &PhoneNumber) -> AccountResult<Option<User>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .find(|u| &u.phone_number == phone && u.deleted_at.is_none())
                .cloned())
        }
    }
}

#[cfg(test)]
mod register_tests {
    use platform::password::{ClearTextPassword, PasswordPolicy, PasswordPolicyError};
    use std::sync::Arc;

    use super::support::InMemoryUserRepository;
    use crate::application::{AccountConfig, RegisterUserInput, RegisterUserUseCase};
    use crate::error::AccountError;

    fn use_case(
        repo: &InMemoryUserRepository,
        config: AccountConfig,
    ) -> RegisterUserUseCase<InMemoryUserRepository> {
        RegisterUserUseCase::new(Arc::new(repo.clone()), Arc::new(config))
    }

    fn input(phone: &str, password: Option<&str>, uid: Option<&str>) -> RegisterUserInput {
        RegisterUserInput {
            phone_number: phone.to_string(),
            password: password.map(str::to_string),
            firebase_uid: uid.map(str::to_string),
            is_verified: false,
        }
    }

    #[tokio::test]
    async fn test_register_with_password() {
        let repo = InMemoryUserRepository::default();
        let config = AccountConfig::default().with_pepper("pepper");

        let user = use_case(&repo, config)
            .execute(input("+57 300 123 4567", Some("batea-2025"), None))
            .await
            .unwrap();

        assert_eq!(user.phone_number.as_str(), "+573001234567");
        assert!(!user.is_verified);
        let hash = user.credential.password_hash().unwrap();
        assert!(hash.as_phc_string().starts_with("$argon2id$"));

        let password =
            ClearTextPassword::new("batea-2025".to_string(), PasswordPolicy::REGISTRATION).unwrap();
        assert!(hash.verify(&password, Some(b"pepper")));
        assert!(!hash.verify(&password, None));
        assert_eq!(repo.users.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_register_with_external_identity_only() {
        let repo = InMemoryUserRepository::default();
        let mut req = input("+14155552671", None, Some("fb-uid-1"));
        req.is_verified = true;

        let user = use_case(&repo, AccountConfig::default())
            .execute(req)
            .await
            .unwrap();

        assert!(user.credential.password_hash().is_none());
        assert_eq!(user.credential.firebase_uid().unwrap().as_str(), "fb-uid-1");
        assert!(user.is_verified);
    }

    #[tokio::test]
    async fn test_password_required_without_identity() {
        let repo = InMemoryUserRepository::default();
        let uc = use_case(&repo, AccountConfig::default());

        assert!(matches!(
            uc.execute(input("+14155552671", None, None)).await,
            Err(AccountError::PasswordRequired)
        ));
        assert!(matches!(
            uc.execute(input("+14155552671", Some(""), Some("  "))).await,
            Err(AccountError::PasswordRequired)
        ));
        assert!(repo.users.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_password_policy_enforced() {
        let repo = InMemoryUserRepository::default();
        let uc = use_case(&repo, AccountConfig::default());

        assert!(matches!(
            uc.execute(input("+14155552671", Some("12345"), None)).await,
            Err(AccountError::PasswordPolicy(PasswordPolicyError::TooShort { min: 6, actual: 5 }))
        ));
        let long = "x".repeat(33);
        assert!(matches!(
            uc.execute(input("+14155552671", Some(&long), None)).await,
            Err(AccountError::PasswordPolicy(PasswordPolicyError::TooLong { max: 32, actual: 33 }))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_phone() {
        let repo = InMemoryUserRepository::default();
        let uc = use_case(&repo, AccountConfig::default());

        uc.execute(input("+14155552671", None, Some("a"))).await.unwrap();
        let err = uc
            .execute(input("+1 (415) 555-2671", None, Some("b")))
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::PhoneNumberTaken));
        assert_eq!(err.status_code(), axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_duplicate_firebase_uid() {
        let repo = InMemoryUserRepository::default();
        let uc = use_case(&repo, AccountConfig::default());

        uc.execute(input("+14155552671", None, Some("same"))).await.unwrap();
        assert!(matches!(
            uc.execute(input("+14155552672", None, Some("same"))).await,
            Err(AccountError::FirebaseUidTaken)
        ));
    }

    #[tokio::test]
    async fn test_invalid_phone() {
        let repo = InMemoryUserRepository::default();
        assert!(matches!(
            use_case(&repo, AccountConfig::default())
                .execute(input("3001234567", Some("secret-1"), None))
                .await,
            Err(AccountError::InvalidPhoneNumber(_))
        ));
    }
}

#[cfg(test)]
mod http_tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::support::InMemoryUserRepository;
    use crate::application::AccountConfig;
    use crate::presentation::router::account_router_generic;

    fn register(body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/register")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_endpoint() {
        let app = account_router_generic(InMemoryUserRepository::default(), AccountConfig::default());

        let response = app
            .clone()
            .oneshot(register(json!({
                "phone_number": "+573001234567",
                "password": "batea-2025"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = json_body(response).await;
        assert_eq!(body["phone_number"], "+573001234567");
        assert_eq!(body["is_verified"], false);
        assert!(body["id"].is_string());
        assert!(body["created_at"].is_string());
        assert!(body.get("password_hash").is_none());

        let response = app
            .oneshot(register(json!({
                "phone_number": "+573001234567",
                "password": "another-1"
            })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(json_body(response).await["status"], 409);
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_body() {
        let app = account_router_generic(InMemoryUserRepository::default(), AccountConfig::default());

        let response = app
            .clone()
            .oneshot(register(json!({ "password": "batea-2025" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(register(json!({ "phone_number": "+573001234567" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
