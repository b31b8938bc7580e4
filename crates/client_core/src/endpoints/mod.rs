//! Typed groups over the backend routes the app consumes.

mod ai;
mod auth;
mod meal_plans;
mod recipes;
mod shopping;

pub use ai::{AiApi, MAX_MEAL_PLAN_DAYS, MAX_RECOMMENDATIONS};
pub use auth::AuthApi;
pub use meal_plans::MealPlansApi;
pub use recipes::RecipesApi;
pub use shopping::ShoppingApi;

use crate::api::ApiClient;

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn recipes(&self) -> RecipesApi<'_> {
        RecipesApi::new(self)
    }

    pub fn ai(&self) -> AiApi<'_> {
        AiApi::new(self)
    }

    pub fn meal_plans(&self) -> MealPlansApi<'_> {
        MealPlansApi::new(self)
    }

    pub fn shopping(&self) -> ShoppingApi<'_> {
        ShoppingApi::new(self)
    }
}
