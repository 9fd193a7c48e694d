//! Auth Service - login, self-registration and password recovery
//!
//! Every credential failure surfaces as [`AppError::InvalidCredentials`]
//! after the same fixed delay, so callers cannot tell an unknown email from
//! a wrong password or a disabled account.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::Rng;
use shared::client::{LoginResponse, RegisterRequest};
use shared::models::{Role, UserInfo};

use tokio::sync::Mutex;

use crate::auth::JwtService;
use crate::core::{OwnerSeed, ServerState};
use crate::db::models::user::hash_password;
use crate::db::models::{NewUser, User, UserCredentials};
use crate::db::repository::{UserRepository, parse_record_id};
use crate::security_log;
use crate::services::admin::next_university_id;
use crate::utils::time::now_millis;
use crate::utils::validation::{
    MAX_NAME_LEN, normalize_email, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// One-time codes stay valid for five minutes
pub const OTP_TTL_MS: i64 = 5 * 60 * 1000;

#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    jwt: Arc<JwtService>,
    delay: Duration,
    signup_lock: Arc<Mutex<()>>,
}

impl AuthService {
    pub fn new(state: &ServerState) -> Self {
        Self {
            users: UserRepository::new(state.get_db()),
            jwt: state.get_jwt_service(),
            delay: state.auth_delay(),
            signup_lock: state.signup_lock.clone(),
        }
    }

    /// Verify email + password and issue a token
    pub async fn authenticate(&self, email: &str, password: &str) -> AppResult<LoginResponse> {
        let started = Instant::now();
        let email = normalize_email(email);
        let outcome = self.check_credentials(&email, password).await;

        // Fixed delay regardless of outcome
        if let Some(rest) = self.delay.checked_sub(started.elapsed()) {
            tokio::time::sleep(rest).await;
        }

        let user = match outcome {
            Ok(user) => user,
            Err(AppError::InvalidCredentials) => {
                security_log!("WARN", "login_failed", email = email.clone());
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        tracing::info!(user_id = %user.id, role = %user.role, "User logged in successfully");
        self.issue(user)
    }

    async fn check_credentials(&self, email: &str, password: &str) -> AppResult<User> {
        let creds = self
            .users
            .find_credentials_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !creds.is_active || !verify(&creds, password)? {
            return Err(AppError::InvalidCredentials);
        }

        self.users
            .find_by_id(&creds.id)
            .await?
            .ok_or(AppError::InvalidCredentials)
    }

    /// Self-service registration, logs the new user in
    pub async fn register(&self, req: RegisterRequest) -> AppResult<LoginResponse> {
        let role = req.role.unwrap_or(Role::Teacher);
        if !role.is_self_registrable() {
            security_log!("WARN", "register_role_denied", role = role.as_str());
            return Err(AppError::validation(format!(
                "Cannot self-register with role {role}"
            )));
        }

        let user = self
            .create_user(&req.name, &req.email, &req.password, role)
            .await?;
        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        self.issue(user)
    }

    /// Validate input and insert a user with a fresh university id
    pub(crate) async fn create_user(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: Role,
    ) -> AppResult<User> {
        let name = name.trim();
        validate_required_text(name, "name", MAX_NAME_LEN)?;
        let email = normalize_email(email);
        validate_email(&email)?;
        validate_password(password)?;

        let hash_pass = hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

        // University id allocation reads then writes
        let _guard = self.signup_lock.lock().await;
        let university_id = next_university_id(&self.users, role).await?;
        let user = self
            .users
            .create(NewUser {
                name: name.to_string(),
                email,
                role,
                university_id: Some(university_id),
                hash_pass,
                is_active: true,
                created_at: now_millis(),
            })
            .await?;
        Ok(user)
    }

    /// Current user's profile
    pub async fn me(&self, user_id: &str) -> AppResult<UserInfo> {
        let id = parse_record_id("user", user_id)?;
        let user = self
            .users
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        Ok(user.into())
    }

    pub async fn change_password(
        &self,
        user_id: &str,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        validate_password(new_password)?;
        let id = parse_record_id("user", user_id)?;
        let creds = self
            .users
            .find_credentials_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        if !verify(&creds, old_password)? {
            security_log!("WARN", "change_password_failed", user_id = user_id.to_string());
            return Err(AppError::validation("Wrong old password"));
        }

        let hash_pass = hash_password(new_password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
        self.users.set_password(&creds.id, hash_pass).await?;
        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Generate and store a 6-digit code valid for [`OTP_TTL_MS`].
    ///
    /// The code is handed to the delivery channel (currently the `otp` log
    /// target) and returned to the caller.
    pub async fn issue_otp(&self, email: &str) -> AppResult<String> {
        let email = normalize_email(email);
        let creds = self
            .users
            .find_credentials_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let code = rand::thread_rng().gen_range(100_000..1_000_000).to_string();
        self.users
            .set_otp(&creds.id, code.clone(), now_millis() + OTP_TTL_MS)
            .await?;

        tracing::info!(target: "otp", email = %email, otp = %code, "Password reset code issued");
        Ok(code)
    }

    pub async fn verify_otp(&self, email: &str, code: &str) -> AppResult<()> {
        self.verify_otp_at(email, code, now_millis()).await
    }

    /// [`Self::verify_otp`] against an explicit clock
    pub async fn verify_otp_at(&self, email: &str, code: &str, now_ms: i64) -> AppResult<()> {
        self.valid_otp_holder(email, code, now_ms).await?;
        Ok(())
    }

    /// Replace the password and clear any code.
    ///
    /// Does not look at the code: clients call [`Self::verify_otp`] first.
    pub async fn reset_password(&self, email: &str, new_password: &str) -> AppResult<()> {
        validate_password(new_password)?;
        let email = normalize_email(email);
        let creds = self
            .users
            .find_credentials_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        let hash_pass = hash_password(new_password)
            .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
        self.users.reset_password(&creds.id, hash_pass).await?;
        security_log!("INFO", "password_reset", user_id = creds.id.to_string());
        Ok(())
    }

    async fn valid_otp_holder(
        &self,
        email: &str,
        code: &str,
        now_ms: i64,
    ) -> AppResult<UserCredentials> {
        let email = normalize_email(email);
        let creds = self
            .users
            .find_credentials_by_email(&email)
            .await?
            .ok_or(AppError::OtpInvalid)?;
        if !creds.otp_valid(code, now_ms) {
            security_log!("WARN", "otp_rejected", email = email.clone());
            return Err(AppError::OtpInvalid);
        }
        Ok(creds)
    }

    /// Create the configured owner unless an owner already exists.
    ///
    /// Returns whether an account was created.
    pub async fn ensure_owner(&self, seed: &OwnerSeed) -> AppResult<bool> {
        if self.users.count_by_role(Role::Owner).await? > 0 {
            return Ok(false);
        }
        self.create_user(&seed.name, &seed.email, &seed.password, Role::Owner)
            .await?;
        Ok(true)
    }

    fn issue(&self, user: User) -> AppResult<LoginResponse> {
        let token = self
            .jwt
            .generate_token(&user.id.to_string(), user.role)
            .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;
        Ok(LoginResponse {
            token,
            user: user.into(),
        })
    }
}

fn verify(creds: &UserCredentials, password: &str) -> AppResult<bool> {
    creds
        .verify_password(password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))
}
