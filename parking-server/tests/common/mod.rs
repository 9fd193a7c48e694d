//! Shared fixtures: a fresh RocksDB store per test inside a temp dir

#![allow(dead_code)]

use parking_server::auth::JwtConfig;
use parking_server::core::{Config, OwnerSeed, ServerState};
use parking_server::db::DbService;
use parking_server::services::{AdminService, AuthService};
use shared::client::RegisterRequest;
use shared::models::{Role, UserCreate, UserInfo};
use tempfile::TempDir;

pub const PASSWORD: &str = "correct horse battery";

pub struct TestServer {
    pub state: ServerState,
    // Dropped last; removes the database directory
    _dir: TempDir,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-that-is-at-least-32-characters".to_string(),
        expiration_minutes: 30,
        issuer: "parking-server".to_string(),
        audience: "parking-clients".to_string(),
    }
}

pub async fn test_server() -> TestServer {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::new(dir.path().to_string_lossy().to_string(), test_jwt_config());
    config.auth_delay_ms = 0;
    let db = DbService::new(&dir.path().join("db").to_string_lossy())
        .await
        .unwrap();
    TestServer {
        state: ServerState::new(config, db.db),
        _dir: dir,
    }
}

impl TestServer {
    /// Seed the owner the way startup does and log in as them
    pub async fn owner(&self) -> UserInfo {
        let auth = AuthService::new(&self.state);
        let seed = OwnerSeed {
            name: "Owner".to_string(),
            email: "owner@campus.edu".to_string(),
            password: PASSWORD.to_string(),
        };
        auth.ensure_owner(&seed).await.unwrap();
        auth.authenticate(&seed.email, PASSWORD).await.unwrap().user
    }

    pub async fn admin(&self, name: &str) -> UserInfo {
        AdminService::new(&self.state)
            .create_user(UserCreate {
                name: name.to_string(),
                email: format!("{}@campus.edu", name.to_lowercase()),
                password: PASSWORD.to_string(),
                role: Some(Role::Admin),
            })
            .await
            .unwrap()
    }

    pub async fn register(&self, name: &str, role: Role) -> UserInfo {
        AuthService::new(&self.state)
            .register(RegisterRequest {
                name: name.to_string(),
                email: format!("{}@campus.edu", name.to_lowercase()),
                password: PASSWORD.to_string(),
                role: Some(role),
            })
            .await
            .unwrap()
            .user
    }
}
