use serde::Serialize;
use shared::{
    domain::RecipeId,
    error::ValidationError,
    protocol::{
        Listing, MessageResponse, RateRecipeRequest, RecipeDetail, RecipeQuery, RecipeSummary,
        RecommendationParams, ReferenceItem, Stats,
    },
};

use crate::{api::ApiClient, error::ClientError};

pub struct RecipesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> RecipesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &RecipeQuery) -> Result<Listing<RecipeSummary>, ClientError> {
        self.client
            .get_with_query("/recipes/", &query.pairs())
            .await
    }

    pub async fn get(&self, slug: &str) -> Result<RecipeDetail, ClientError> {
        if slug.trim().is_empty() {
            return Err(ValidationError::Empty { field: "slug" }.into());
        }
        self.client.get(&format!("/recipes/{slug}/")).await
    }

    pub async fn featured(&self) -> Result<Vec<RecipeSummary>, ClientError> {
        let listing: Listing<RecipeSummary> = self.client.get("/recipes/featured/").await?;
        Ok(listing.into_items())
    }

    pub async fn popular(&self) -> Result<Vec<RecipeSummary>, ClientError> {
        let listing: Listing<RecipeSummary> = self.client.get("/recipes/popular/").await?;
        Ok(listing.into_items())
    }

    pub async fn search<B>(&self, criteria: &B) -> Result<Vec<RecipeSummary>, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let listing: Listing<RecipeSummary> =
            self.client.post("/recipes/search/", criteria).await?;
        Ok(listing.into_items())
    }

    pub async fn recommendations(
        &self,
        params: &RecommendationParams,
    ) -> Result<Vec<RecipeSummary>, ClientError> {
        let listing: Listing<RecipeSummary> = self
            .client
            .post("/recipes/recommendations/", params)
            .await?;
        Ok(listing.into_items())
    }

    pub async fn save(&self, recipe_id: RecipeId) -> Result<MessageResponse, ClientError> {
        self.client
            .post_empty(&format!("/recipes/{recipe_id}/save/"))
            .await
    }

    pub async fn toggle_favorite(&self, recipe_id: RecipeId) -> Result<MessageResponse, ClientError> {
        self.client
            .post_empty(&format!("/recipes/{recipe_id}/favorite/"))
            .await
    }

    /// Ratings are whole stars from 1 to 5.
    pub async fn rate(
        &self,
        recipe_id: RecipeId,
        rating: u8,
        review: Option<String>,
    ) -> Result<MessageResponse, ClientError> {
        if !(1..=5).contains(&rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                min: 1,
                max: 5,
                actual: i64::from(rating),
            }
            .into());
        }
        let request = RateRecipeRequest { rating, review };
        self.client
            .post(&format!("/recipes/{recipe_id}/ratings/"), &request)
            .await
    }

    pub async fn user_recipes(
        &self,
        filters: &[(&str, String)],
    ) -> Result<Vec<RecipeSummary>, ClientError> {
        let listing: Listing<RecipeSummary> = self
            .client
            .get_with_query("/recipes/user/", filters)
            .await?;
        Ok(listing.into_items())
    }

    pub async fn update_user_recipe<B>(
        &self,
        recipe_id: RecipeId,
        interaction: &B,
    ) -> Result<MessageResponse, ClientError>
    where
        B: Serialize + ?Sized,
    {
        self.client
            .patch(
                &format!("/recipes/{recipe_id}/update-interaction/"),
                interaction,
            )
            .await
    }

    pub async fn regions(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.reference("/recipes/regions/").await
    }

    pub async fn cuisines(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.reference("/recipes/cuisines/").await
    }

    pub async fn ingredients(&self) -> Result<Vec<ReferenceItem>, ClientError> {
        self.reference("/recipes/ingredients/").await
    }

    pub async fn stats(&self) -> Result<Stats, ClientError> {
        self.client.get("/recipes/stats/").await
    }

    async fn reference(&self, endpoint: &str) -> Result<Vec<ReferenceItem>, ClientError> {
        let listing: Listing<ReferenceItem> = self.client.get(endpoint).await?;
        Ok(listing.into_items())
    }
}
