//! HTTP client for network-based API calls

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::ErrorBody;
use shared::MessageResponse;
use shared::client::{
    ChangePasswordRequest, ForgotPasswordRequest, LoginRequest, LoginResponse, RegisterRequest,
    ResetPasswordRequest, VerifyOtpRequest,
};
use shared::models::{
    AdminSummary, AdminToggled, Slot, SlotCreate, SlotStatus, SlotUpdate, UserCreate, UserInfo,
    Zone, ZoneCreate, ZoneDeleted, ZoneUpdate,
};

use crate::api::ParkingApi;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making network requests to the parking server
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn send<T: DeserializeOwned, B: Serialize + Sync + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> ClientResult<T> {
        let mut request = self.client.request(method, self.url(path));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<T, ()>(Method::GET, path, None).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(Method::POST, path, Some(body)).await
    }

    /// Make a POST request without body
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<T, ()>(Method::POST, path, None).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn patch_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<T, ()>(Method::PATCH, path, None).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.send::<T, ()>(Method::DELETE, path, None).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .map(|body| body.message);
            tracing::debug!(status = status.as_u16(), message = ?message, "API request failed");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("{e}: {text}")))
    }

    // ========== Auth API ==========

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/auth/login", &request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<LoginResponse> {
        self.post("/api/auth/register", request).await
    }

    /// Get current user information
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.get("/api/auth/me").await
    }

    pub async fn change_password(
        &self,
        old_password: &str,
        new_password: &str,
    ) -> ClientResult<MessageResponse> {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.put("/api/auth/change-password", &request).await
    }

    pub async fn forgot_password(&self, email: &str) -> ClientResult<MessageResponse> {
        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.post("/api/auth/forgot-password", &request).await
    }

    pub async fn verify_otp(&self, email: &str, otp: &str) -> ClientResult<MessageResponse> {
        let request = VerifyOtpRequest {
            email: email.to_string(),
            otp: otp.to_string(),
        };
        self.post("/api/auth/verify-otp", &request).await
    }

    /// Only meaningful after a successful [`Self::verify_otp`]
    pub async fn reset_password(
        &self,
        email: &str,
        new_password: &str,
    ) -> ClientResult<MessageResponse> {
        let request = ResetPasswordRequest {
            email: email.to_string(),
            new_password: new_password.to_string(),
        };
        self.post("/api/auth/reset-password", &request).await
    }
}

#[async_trait]
impl ParkingApi for HttpClient {
    async fn list_zones(&self, include_deleted: bool) -> ClientResult<Vec<Zone>> {
        if include_deleted {
            self.get("/api/zones?includeDeleted=true").await
        } else {
            self.get("/api/zones").await
        }
    }

    async fn list_deleted_zones(&self) -> ClientResult<Vec<Zone>> {
        self.get("/api/zones/deleted").await
    }

    async fn create_zone(&self, name: &str, description: Option<&str>) -> ClientResult<Zone> {
        let request = ZoneCreate {
            name: name.to_string(),
            description: description.map(str::to_string),
        };
        self.post("/api/zones", &request).await
    }

    async fn update_zone(&self, id: &str, name: &str) -> ClientResult<Zone> {
        let request = ZoneUpdate {
            name: Some(name.to_string()),
            description: None,
        };
        self.put(&format!("/api/zones/{id}"), &request).await
    }

    async fn delete_zone(&self, id: &str) -> ClientResult<ZoneDeleted> {
        self.delete(&format!("/api/zones/{id}")).await
    }

    async fn restore_zone(&self, id: &str) -> ClientResult<Zone> {
        self.post_empty(&format!("/api/zones/{id}/restore")).await
    }

    async fn list_slots(&self, zone: Option<&str>) -> ClientResult<Vec<Slot>> {
        match zone {
            Some(zone) => self.get(&format!("/api/slots?zone={zone}")).await,
            None => self.get("/api/slots").await,
        }
    }

    async fn create_slot(&self, zone: &str, number: &str) -> ClientResult<Slot> {
        let request = SlotCreate {
            number: number.to_string(),
            zone: zone.to_string(),
        };
        self.post("/api/slots", &request).await
    }

    async fn update_slot_status(&self, id: &str, status: SlotStatus) -> ClientResult<Slot> {
        let request = SlotUpdate {
            number: None,
            status: Some(status),
        };
        self.put(&format!("/api/slots/{id}"), &request).await
    }

    async fn reserve_slot(&self, id: &str) -> ClientResult<Slot> {
        self.post_empty(&format!("/api/slots/{id}/reserve")).await
    }

    async fn delete_slot(&self, id: &str) -> ClientResult<()> {
        self.delete::<MessageResponse>(&format!("/api/slots/{id}"))
            .await?;
        Ok(())
    }

    async fn list_admins(&self) -> ClientResult<Vec<AdminSummary>> {
        self.get("/api/owner/admins").await
    }

    async fn toggle_admin(&self, id: &str) -> ClientResult<AdminToggled> {
        self.patch_empty(&format!("/api/owner/admins/{id}")).await
    }

    async fn delete_admin(&self, id: &str) -> ClientResult<()> {
        self.delete::<MessageResponse>(&format!("/api/owner/admins/{id}"))
            .await?;
        Ok(())
    }

    async fn create_admin(&self, req: &UserCreate) -> ClientResult<UserInfo> {
        self.post("/api/owner/users", req).await
    }
}
