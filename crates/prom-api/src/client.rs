//! Thin JSON client for the matching backend.
//!
//! One method per endpoint, one request per call. Nothing here retries:
//! failures come back as [`ApiError`] and the caller decides what to tell
//! the user.

use prom_core::{
    AuthContext, Candidate, Match, MatchStats, ProfileCreated, ProfileCreator, ProfileSubmission,
    SubmissionError, SwipeIntent, SwipeResponse, SwipeSubmitter,
};
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};

#[derive(Deserialize)]
struct ProfileCheck {
    exists: bool,
}

#[derive(Deserialize)]
struct MatchesResponse {
    #[serde(default)]
    matches: Vec<Match>,
}

#[derive(Deserialize)]
struct RecommendationsResponse {
    #[serde(default)]
    recommendations: Vec<Candidate>,
}

#[derive(Serialize)]
struct SwipeRequest<'a> {
    user_id: &'a str,
    target_user_id: &'a str,
    action: &'static str,
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base =
            Url::parse(&config.api_base_url).map_err(|e| ApiError::Config(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::Config(format!(
                "'{}' cannot be used as a base URL",
                config.api_base_url
            )));
        }
        let http = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { http, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Base URL with `segments` appended, each percent-encoded.
    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        tracing::debug!("{what}");
        let response = request.send().await.inspect_err(|e| {
            tracing::warn!("{what}: request failed: {e}");
        })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .as_ref()
                .and_then(detail_of);
            tracing::warn!("{what}: HTTP {status}");
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response.json::<T>().await.map_err(|e| {
            tracing::warn!("{what}: undecodable body: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    /// `GET /users/profile/check/{user_id}`
    pub async fn check_profile(&self, user_id: &str) -> Result<bool> {
        let url = self.url(&["users", "profile", "check", user_id]);
        let check: ProfileCheck = self.send(self.http.get(url), "check profile").await?;
        Ok(check.exists)
    }

    /// `GET /matches/{user_id}`
    pub async fn matches(&self, user_id: &str) -> Result<Vec<Match>> {
        let url = self.url(&["matches", user_id]);
        let body: MatchesResponse = self.send(self.http.get(url), "fetch matches").await?;
        Ok(body.matches)
    }

    /// `GET /stats/{user_id}`
    pub async fn stats(&self, user_id: &str) -> Result<MatchStats> {
        let url = self.url(&["stats", user_id]);
        self.send(self.http.get(url), "fetch stats").await
    }

    /// `GET /recommendations/{user_id}`
    pub async fn recommendations(&self, user_id: &str) -> Result<Vec<Candidate>> {
        let url = self.url(&["recommendations", user_id]);
        let body: RecommendationsResponse = self
            .send(self.http.get(url), "fetch recommendations")
            .await?;
        tracing::info!("fetched {} recommendations", body.recommendations.len());
        Ok(body.recommendations)
    }

    /// `POST /swipe`
    pub async fn swipe(
        &self,
        user_id: &str,
        target_user_id: &str,
        intent: SwipeIntent,
    ) -> Result<SwipeResponse> {
        let body = SwipeRequest {
            user_id,
            target_user_id,
            action: intent.action(),
        };
        let request = self.http.post(self.url(&["swipe"])).json(&body);
        self.send(request, "submit swipe").await
    }

    /// `POST /users/profile`
    pub async fn create_profile(&self, profile: &ProfileSubmission) -> Result<ProfileCreated> {
        let request = self.http.post(self.url(&["users", "profile"])).json(profile);
        self.send(request, "create profile").await
    }

    /// `DELETE /users/account/{user_id}`, authorized as that user.
    pub async fn delete_account(&self, auth: &AuthContext) -> Result<()> {
        let request = self
            .http
            .delete(self.url(&["users", "account", auth.user_id()]))
            .header(AUTHORIZATION, auth.bearer());
        let _: serde_json::Value = self.send(request, "delete account").await?;
        tracing::info!("deleted account {}", auth.user_id());
        Ok(())
    }
}

/// FastAPI-style `{"detail": ...}` error body, flattened to text.
fn detail_of(body: &serde_json::Value) -> Option<String> {
    match body.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

impl SwipeSubmitter for ApiClient {
    async fn submit(
        &self,
        user_id: &str,
        target_user_id: &str,
        intent: SwipeIntent,
    ) -> std::result::Result<SwipeResponse, SubmissionError> {
        Ok(self.swipe(user_id, target_user_id, intent).await?)
    }
}

impl ProfileCreator for ApiClient {
    async fn create_profile(
        &self,
        profile: &ProfileSubmission,
    ) -> std::result::Result<ProfileCreated, SubmissionError> {
        Ok(ApiClient::create_profile(self, profile).await?)
    }
}
