use shared::protocol::{
    AuthResponse, Listing, LoginRequest, MessageResponse, OnboardingProfile, ProfileUpdate,
    ReferenceItem, RegisterRequest, Stats, UserProfile,
};
use tracing::{info, warn};

use crate::{api::ApiClient, error::ClientError};

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let response: AuthResponse = self.client.post("/auth/register/", request).await?;
        self.remember(&response).await?;
        info!(user_id = response.user.id.0, "registered");
        Ok(response)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: AuthResponse = self.client.post("/auth/login/", &request).await?;
        self.remember(&response).await?;
        info!(user_id = response.user.id.0, "logged in");
        Ok(response)
    }

    /// Tells the backend, then drops the local token whatever the backend said.
    pub async fn logout(&self) -> Result<(), ClientError> {
        let outcome = self
            .client
            .post_empty::<MessageResponse>("/auth/logout/")
            .await;
        if let Err(err) = &outcome {
            warn!(error = %err, "logout request failed; clearing local token anyway");
        }
        self.client
            .tokens()
            .remove()
            .await
            .map_err(ClientError::TokenStorage)?;
        outcome.map(|_| ())
    }

    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        self.client.get("/auth/profile/").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile, ClientError> {
        self.client.patch("/auth/profile/update/", update).await
    }

    pub async fn complete_onboarding(
        &self,
        profile: &OnboardingProfile,
    ) -> Result<MessageResponse, ClientError> {
        self.client
            .post("/auth/onboarding/complete/", profile)
            .await
    }

    pub async fn user_stats(&self) -> Result<Stats, ClientError> {
        self.client.get("/auth/profile/stats/").await
    }

    pub async fn health_conditions(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.reference("/auth/health-conditions/").await
    }

    pub async fn allergies(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.reference("/auth/allergies/").await
    }

    pub async fn dietary_preferences(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.reference("/auth/dietary-preferences/").await
    }

    pub async fn fitness_goals(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.reference("/auth/fitness-goals/").await
    }

    async fn reference(&self, endpoint: &str) -> Result<Vec<ReferenceItem>, ClientError> {
        let listing: Listing<ReferenceItem> = self.client.get(endpoint).await?;
        Ok(listing.into_items())
    }

    async fn remember(&self, response: &AuthResponse) -> Result<(), ClientError> {
        if let Some(token) = response.token.as_deref().filter(|t| !t.is_empty()) {
            self.client
                .tokens()
                .set(token)
                .await
                .map_err(ClientError::TokenStorage)?;
        }
        Ok(())
    }
}
