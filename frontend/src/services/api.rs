use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::error::ClientError;
use shared::{
    CalendarMonth, CreateHabitRequest, CurrentUserResponse, DeleteHabitResponse,
    HabitListResponse, HabitResponse, LogListResponse, SessionResponse, SignInRequest,
    SignOutResponse, SignUpRequest, ToggleLogRequest, ToggleLogResponse,
};

/// API client for communicating with the backend server
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against a base URL like `http://localhost:3000`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            token: None,
        }
    }

    /// Attach a session token to every subsequent request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Create an account; the returned session is not stored automatically
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<SessionResponse, ClientError> {
        let response = self
            .request(Method::POST, "/api/auth/signup")
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn sign_in(&self, request: SignInRequest) -> Result<SessionResponse, ClientError> {
        let response = self
            .request(Method::POST, "/api/auth/signin")
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn sign_out(&self) -> Result<SignOutResponse, ClientError> {
        let response = self
            .request(Method::POST, "/api/auth/signout")
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn current_user(&self) -> Result<CurrentUserResponse, ClientError> {
        let response = self.request(Method::GET, "/api/auth/me").send().await?;
        Self::decode(response).await
    }

    pub async fn list_habits(&self) -> Result<HabitListResponse, ClientError> {
        let response = self.request(Method::GET, "/api/habits").send().await?;
        Self::decode(response).await
    }

    pub async fn create_habit(
        &self,
        request: CreateHabitRequest,
    ) -> Result<HabitResponse, ClientError> {
        let response = self
            .request(Method::POST, "/api/habits")
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn delete_habit(&self, habit_id: &str) -> Result<DeleteHabitResponse, ClientError> {
        let response = self
            .request(Method::DELETE, &format!("/api/habits/{}", habit_id))
            .send()
            .await?;
        Self::decode(response).await
    }

    pub async fn list_logs(&self) -> Result<LogListResponse, ClientError> {
        let response = self.request(Method::GET, "/api/logs").send().await?;
        Self::decode(response).await
    }

    pub async fn toggle_log(
        &self,
        request: ToggleLogRequest,
    ) -> Result<ToggleLogResponse, ClientError> {
        let response = self
            .request(Method::POST, "/api/logs/toggle")
            .json(&request)
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Get calendar data for a specific month/year
    pub async fn get_calendar_month(
        &self,
        month: u32,
        year: u32,
    ) -> Result<CalendarMonth, ClientError> {
        let response = self
            .request(
                Method::GET,
                &format!("/api/calendar/month?month={}&year={}", month, year),
            )
            .send()
            .await?;
        Self::decode(response).await
    }

    /// Start a request against the API, attaching the session token if present
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let mut builder = self.http.request(method, format!("{}{}", self.base_url, path));
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Decode a success body, or turn an error body into a `ClientError`
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::decode_error(response).await)
        }
    }

    async fn decode_error(response: Response) -> ClientError {
        let status = response.status();
        match response.json::<shared::ApiError>().await {
            Ok(api_error) => api_error.into(),
            // A body that is not our error shape still carries the status
            Err(_) => ClientError::Server(format!("Unexpected response: {}", status)),
        }
    }
}
