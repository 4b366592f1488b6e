use std::net::SocketAddr;
use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use auth::SecretProvider;
use auth::StaticSecretProvider;
use auth::TokenIssuer;
use auth::TokenVerifier;
use credential_service::domain::credential::service::CredentialService;
use credential_service::inbound::http::router::create_router;
use credential_service::outbound::repositories::MemoryCredentialRepository;
use serde_json::json;

pub const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let secrets: Arc<dyn SecretProvider> = Arc::new(StaticSecretProvider::new(TEST_SECRET));

        // Cheapest argon2 parameters keep the suite fast
        let authenticator = Arc::new(Authenticator::from_parts(
            PasswordHasher::with_params(8, 1, 1).expect("Invalid argon2 parameters"),
            TokenIssuer::new(Arc::clone(&secrets), "test"),
            TokenVerifier::new(secrets),
        ));

        let credential_service = Arc::new(CredentialService::new(
            Arc::new(MemoryCredentialRepository::new()),
            Arc::clone(&authenticator),
        ));

        let router = create_router(credential_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(
                listener,
                router.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Register an account and assert it was created
    pub async fn register(&self, username: &str, password: &str) {
        let response = self
            .post("/register")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
    }

    /// Log in and return the issued access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/login")
            .json(&json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["access_token"]
            .as_str()
            .expect("Missing access_token")
            .to_string()
    }
}
