use shared::{
    domain::MealPlanId,
    error::ValidationError,
    protocol::{Listing, MealPlan, MealPlanEntry, MessageResponse, NewMealPlan, NewMealPlanEntry},
};

use crate::{api::ApiClient, error::ClientError};

pub struct MealPlansApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MealPlansApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<MealPlan>, ClientError> {
        let listing: Listing<MealPlan> = self.client.get("/meal-planning/").await?;
        Ok(listing.into_items())
    }

    pub async fn create(&self, plan: &NewMealPlan) -> Result<MealPlan, ClientError> {
        if plan.name.trim().is_empty() {
            return Err(ValidationError::Empty { field: "name" }.into());
        }
        self.client.post("/meal-planning/", plan).await
    }

    pub async fn get(&self, plan_id: MealPlanId) -> Result<MealPlan, ClientError> {
        self.client.get(&format!("/meal-planning/{plan_id}/")).await
    }

    pub async fn delete(&self, plan_id: MealPlanId) -> Result<(), ClientError> {
        self.client
            .delete::<MessageResponse>(&format!("/meal-planning/{plan_id}/"))
            .await
            .map(|_| ())
    }

    pub async fn entries(&self, plan_id: MealPlanId) -> Result<Vec<MealPlanEntry>, ClientError> {
        let listing: Listing<MealPlanEntry> = self
            .client
            .get(&format!("/meal-planning/{plan_id}/entries/"))
            .await?;
        Ok(listing.into_items())
    }

    pub async fn add_entry(
        &self,
        plan_id: MealPlanId,
        entry: &NewMealPlanEntry,
    ) -> Result<MealPlanEntry, ClientError> {
        if entry.servings == 0 {
            return Err(ValidationError::OutOfRange {
                field: "servings",
                min: 1,
                max: i64::from(u32::MAX),
                actual: 0,
            }
            .into());
        }
        self.client
            .post(&format!("/meal-planning/{plan_id}/entries/"), entry)
            .await
    }
}
