//! The HTTP client wrapper every screen goes through.

use reqwest::{header::AUTHORIZATION, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use youth_council_shared::FormPayload;

use crate::{config::ClientConfig, error::ApiError, multipart::to_multipart, session::Session};

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

/// One configured client per process. Cloning is cheap and clones share the
/// connection pool and the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
    session: Session,
}

impl ApiClient {
    /// No request timeout is configured; calls wait for the server.
    pub fn new(config: ClientConfig, session: Session) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            config,
            session,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn get(&self, path: &str) -> RequestBuilder {
        self.request(Method::GET, path)
    }

    pub fn post(&self, path: &str) -> RequestBuilder {
        self.request(Method::POST, path)
    }

    pub fn put(&self, path: &str) -> RequestBuilder {
        self.request(Method::PUT, path)
    }

    pub fn delete(&self, path: &str) -> RequestBuilder {
        self.request(Method::DELETE, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.config.endpoint(path))
    }

    /// Attach the bearer token, if one is stored right now, and dispatch.
    /// The token is looked up per call so login/logout take effect on the
    /// next request.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let token = self.session.token();
        let builder = match token.as_deref() {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {token}")),
            None => builder,
        };
        let request = builder.build()?;
        tracing::debug!(
            method = %request.method(),
            url = %request.url(),
            authenticated = token.is_some(),
            "dispatching request"
        );

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.bytes().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }

    pub async fn send_json<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(builder).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(err.to_string()))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send_json(self.get(path)).await
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> Result<T, ApiError> {
        let form = to_multipart(payload)?;
        self.send_json(self.post(path).multipart(form)).await
    }

    pub async fn put_form<T: DeserializeOwned>(
        &self,
        path: &str,
        payload: FormPayload,
    ) -> Result<T, ApiError> {
        let form = to_multipart(payload)?;
        self.send_json(self.put(path).multipart(form)).await
    }

    /// Issue a DELETE; whatever body comes back is ignored.
    pub async fn delete_path(&self, path: &str) -> Result<(), ApiError> {
        self.send(self.delete(path)).await.map(drop)
    }

    /// Exchange credentials for a token and store it in the session.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = LoginRequest {
            username,
            password,
        };
        let response: LoginResponse = self
            .send_json(self.post("/login").json(&request))
            .await
            .map_err(|err| match err {
                ApiError::Status {
                    status, ..
                } if status == reqwest::StatusCode::UNAUTHORIZED => ApiError::Status {
                    status,
                    message: "Invalid credentials".to_string(),
                },
                other => other,
            })?;
        self.session.login(&response.access_token)?;
        tracing::info!("signed in as {username}");
        Ok(response)
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.session.logout()?;
        tracing::info!("signed out");
        Ok(())
    }
}
