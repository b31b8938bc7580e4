use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        Difficulty, MealPlanEntryId, MealPlanId, MealType, Recipe, RecipeId, RecommendationId,
        ShoppingItemId, ShoppingListId, Step, StepId, UserId,
    },
    error::ValidationError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: UserProfile,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Bodies of endpoints that only acknowledge, such as logout or delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OnboardingProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_skill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u32>,
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub health_conditions: Vec<String>,
    #[serde(default)]
    pub fitness_goals: Vec<String>,
    #[serde(default)]
    pub preferred_regions: Vec<String>,
}

/// Counters served by the stats endpoints. The backend adds fields freely, so
/// everything is kept by name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    #[serde(flatten)]
    pub values: BTreeMap<String, serde_json::Value>,
}

impl Stats {
    pub fn count(&self, key: &str) -> Option<u64> {
        self.values.get(key).and_then(serde_json::Value::as_u64)
    }
}

/// Named reference entry (region, cuisine, ingredient, allergy, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceItem {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// List endpoints answer either with a paginated envelope or a bare array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Page {
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
        results: Vec<T>,
    },
    Items(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Page { results, .. } => results,
            Self::Items(items) => items,
        }
    }

    pub fn has_more(&self) -> bool {
        matches!(self, Self::Page { next: Some(_), .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionRef {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuisineRef {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<RegionRef>,
}

/// Recipe as listed by the backend catalogue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub id: RecipeId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine: Option<CuisineRef>,
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default)]
    pub total_time: u32,
    #[serde(default)]
    pub servings: u32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_per_serving: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub total_ratings: u32,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dietary_labels: Vec<String>,
}

impl RecipeSummary {
    pub fn region(&self) -> Option<&str> {
        self.cuisine
            .as_ref()
            .and_then(|c| c.region.as_ref())
            .map(|r| r.name.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Instruction {
    pub step: u32,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Minutes; instructions without timing get a zero-length countdown.
    #[serde(default)]
    pub duration: u32,
    #[serde(default, alias = "tips", skip_serializing_if = "Option::is_none")]
    pub tip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Full recipe document served by `/recipes/{slug}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    #[serde(default)]
    pub instructions: Vec<Instruction>,
    #[serde(default)]
    pub cultural_significance: String,
}

impl RecipeDetail {
    /// Converts the catalogue document into the form a cooking session walks.
    pub fn into_recipe(self) -> Result<Recipe, ValidationError> {
        let summary = self.summary;
        let difficulty = match summary.difficulty.to_ascii_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "hard" => Difficulty::Hard,
            _ => Difficulty::Medium,
        };
        let region = summary.region().map(str::to_string);
        let mut instructions = self.instructions;
        instructions.sort_by_key(|i| i.step);
        let steps = instructions
            .into_iter()
            .map(|i| Step {
                id: StepId(i64::from(i.step)),
                title: i.title.unwrap_or_else(|| format!("Step {}", i.step)),
                description: i.description,
                duration: i.duration,
                tip: i.tip.unwrap_or_default(),
                image: i.image,
            })
            .collect::<Vec<_>>();
        if steps.is_empty() {
            return Err(ValidationError::Empty {
                field: "instructions",
            });
        }
        Ok(Recipe {
            id: summary.id,
            name: summary.name,
            image: summary.image,
            steps,
            cultural_note: self.cultural_significance,
            difficulty,
            total_time: summary.total_time,
            servings: summary.servings,
            region,
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecipeQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl RecipeQuery {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(v) = &self.search {
            pairs.push(("search", v.clone()));
        }
        if let Some(v) = &self.difficulty {
            pairs.push(("difficulty", v.clone()));
        }
        if let Some(v) = self.meal_type {
            pairs.push(("meal_type", meal_type_str(v).to_string()));
        }
        if let Some(v) = &self.region {
            pairs.push(("region", v.clone()));
        }
        if let Some(v) = self.page {
            pairs.push(("page", v.to_string()));
        }
        pairs
    }
}

fn meal_type_str(meal_type: MealType) -> &'static str {
    match meal_type {
        MealType::Breakfast => "breakfast",
        MealType::Lunch => "lunch",
        MealType::Dinner => "dinner",
        MealType::Snack => "snack",
        MealType::Dessert => "dessert",
        MealType::Beverage => "beverage",
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRecipeRequest {
    pub rating: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<MealType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_prep_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_preferences: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_allergens: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiRecommendation {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub prep_time: u32,
    #[serde(default)]
    pub cook_time: u32,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub health_benefits: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cultural_significance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub why_recommended: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommendations: Vec<AiRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_id: Option<RecommendationId>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealPlanParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_prep_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_preferences: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_allergens: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferred_regions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_size: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DayMeals {
    #[serde(default)]
    pub breakfast: String,
    #[serde(default)]
    pub lunch: String,
    #[serde(default)]
    pub dinner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingCategory {
    pub category: String,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMealPlan {
    /// Keyed by day label as sent by the backend (`day_1`, `Monday`, ...).
    #[serde(default)]
    pub meal_plan: BTreeMap<String, DayMeals>,
    #[serde(default)]
    pub shopping_list: Vec<ShoppingCategory>,
    #[serde(default)]
    pub prep_tips: Vec<String>,
    #[serde(default)]
    pub nutritional_summary: serde_json::Value,
    #[serde(default)]
    pub cultural_notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstituteParams {
    pub ingredient: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_method: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientSubstitute {
    pub name: String,
    #[serde(default)]
    pub availability: String,
    #[serde(default)]
    pub flavor_profile: String,
    #[serde(default)]
    pub conversion_ratio: String,
    #[serde(default)]
    pub cultural_note: String,
    #[serde(default)]
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstitutesResponse {
    #[serde(default)]
    pub substitutes: Vec<IngredientSubstitute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CulturalInsightRequest {
    pub recipe_id: RecipeId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CulturalInsight {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub historical_origin: String,
    #[serde(default)]
    pub cultural_significance: String,
    #[serde(default)]
    pub traditional_occasions: Vec<String>,
    /// Free-form object keyed by country or region.
    #[serde(default)]
    pub regional_variations: serde_json::Value,
    #[serde(default)]
    pub cooking_traditions: String,
    #[serde(default)]
    pub nutritional_wisdom: String,
    #[serde(default)]
    pub modern_adaptations: String,
    #[serde(default)]
    pub interesting_facts: Vec<String>,
}

/// One stored recommendation as served by `/ai/history/`. `content` is the
/// raw payload the recommendation was generated with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationHistoryEntry {
    pub id: RecommendationId,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub content: serde_json::Value,
    #[serde(default)]
    pub confidence_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub was_helpful: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acted_upon_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendationHistory {
    #[serde(default)]
    pub recommendations: Vec<RecommendationHistoryEntry>,
    #[serde(default)]
    pub total_count: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationFeedback {
    pub recommendation_id: RecommendationId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub was_helpful: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlan {
    pub id: MealPlanId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub entries: Vec<MealPlanEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMealPlan {
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealPlanEntry {
    pub id: MealPlanEntryId,
    pub recipe: RecipeId,
    pub date: NaiveDate,
    pub meal_type: MealType,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMealPlanEntry {
    pub recipe: RecipeId,
    pub date: NaiveDate,
    pub meal_type: MealType,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
}

fn default_servings() -> u32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingList {
    pub id: ShoppingListId,
    pub name: String,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub items: Vec<ShoppingListItem>,
}

impl ShoppingList {
    pub fn remaining(&self) -> usize {
        self.items.iter().filter(|i| !i.is_purchased).count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: ShoppingItemId,
    pub name: String,
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub is_purchased: bool,
    /// Decimal string as rendered by the backend, e.g. `"12.50"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewShoppingListItem {
    pub name: String,
    pub quantity: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasedUpdate {
    pub is_purchased: bool,
}
