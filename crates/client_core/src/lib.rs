//! Client side of the recipe backend: an authenticated JSON client, token
//! persistence and typed endpoint groups.

pub mod api;
pub mod endpoints;
pub mod error;
pub mod token;

pub use api::{ApiClient, DEFAULT_AUTH_SCHEME, DEFAULT_BASE_URL};
pub use endpoints::{
    AiApi, AuthApi, MealPlansApi, RecipesApi, ShoppingApi, MAX_MEAL_PLAN_DAYS,
    MAX_RECOMMENDATIONS,
};
pub use error::ClientError;
pub use reqwest::StatusCode;
pub use token::{FileTokenStore, MemoryTokenStore, TokenStore};

#[cfg(test)]
#[path = "tests/mock_backend.rs"]
mod mock_backend;

#[cfg(test)]
#[path = "tests/endpoints_tests.rs"]
mod endpoints_tests;
