use shared::{
    domain::RecipeId,
    error::ValidationError,
    protocol::{
        CulturalInsight, CulturalInsightRequest, GeneratedMealPlan, MealPlanParams,
        MessageResponse, RecommendationFeedback, RecommendationHistory, RecommendationParams,
        RecommendationsResponse, Stats, SubstituteParams, SubstitutesResponse,
    },
};

use crate::{api::ApiClient, error::ClientError};

/// The backend caps recommendation batches at this size.
pub const MAX_RECOMMENDATIONS: u32 = 20;
/// The backend caps generated plans at two weeks.
pub const MAX_MEAL_PLAN_DAYS: u32 = 14;

pub struct AiApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AiApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn recommendations(
        &self,
        params: &RecommendationParams,
    ) -> Result<RecommendationsResponse, ClientError> {
        let mut params = params.clone();
        params.count = params.count.map(|c| c.clamp(1, MAX_RECOMMENDATIONS));
        self.client.post("/ai/recommendations/", &params).await
    }

    pub async fn generate_meal_plan(
        &self,
        params: &MealPlanParams,
    ) -> Result<GeneratedMealPlan, ClientError> {
        let mut params = params.clone();
        params.days = params.days.map(|d| d.clamp(1, MAX_MEAL_PLAN_DAYS));
        self.client.post("/ai/meal-plan/generate/", &params).await
    }

    pub async fn ingredient_substitutes(
        &self,
        params: &SubstituteParams,
    ) -> Result<SubstitutesResponse, ClientError> {
        if params.ingredient.trim().is_empty() {
            return Err(ValidationError::Empty {
                field: "ingredient",
            }
            .into());
        }
        self.client.post("/ai/ingredient-substitutes/", params).await
    }

    pub async fn cultural_insight(&self, recipe_id: RecipeId) -> Result<CulturalInsight, ClientError> {
        self.client
            .post("/ai/cultural-insight/", &CulturalInsightRequest { recipe_id })
            .await
    }

    pub async fn feedback(
        &self,
        feedback: &RecommendationFeedback,
    ) -> Result<MessageResponse, ClientError> {
        if let Some(rating) = feedback.rating {
            if !(1..=5).contains(&rating) {
                return Err(ValidationError::OutOfRange {
                    field: "rating",
                    min: 1,
                    max: 5,
                    actual: i64::from(rating),
                }
                .into());
            }
        }
        self.client.post("/ai/feedback/", feedback).await
    }

    pub async fn profile(&self) -> Result<Stats, ClientError> {
        self.client.get("/ai/profile/").await
    }

    /// Most recent first, as the backend orders it.
    pub async fn history(&self) -> Result<RecommendationHistory, ClientError> {
        self.client.get("/ai/history/").await
    }
}
