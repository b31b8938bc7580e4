//! Backend-facing subcommands. Each one prints a short human summary.

use anyhow::{Context, Result};
use client_core::ApiClient;
use shared::{
    domain::{format_minutes, MealType, RecipeId},
    protocol::{
        MealPlanParams, RecipeQuery, RecipeSummary, RecommendationParams, SubstituteParams,
    },
};
use tracing::info;

pub fn parse_meal_type(raw: &str) -> Result<MealType, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unknown meal type '{raw}'"))
}

pub async fn login(client: &ApiClient, email: &str, password: &str) -> Result<()> {
    let response = client
        .auth()
        .login(email, password)
        .await
        .context("login failed")?;
    info!(user_id = response.user.id.0, "session token stored");
    println!("Logged in as {}", response.user.username);
    Ok(())
}

pub async fn logout(client: &ApiClient) -> Result<()> {
    client.auth().logout().await.context("logout failed")?;
    println!("Logged out");
    Ok(())
}

pub async fn profile(client: &ApiClient) -> Result<()> {
    let profile = client.auth().profile().await.context("failed to load profile")?;
    let full_name = format!("{} {}", profile.first_name, profile.last_name);
    println!("{} <{}>", profile.username, profile.email);
    if !full_name.trim().is_empty() {
        println!("  name: {}", full_name.trim());
    }
    if let Some(size) = profile.family_size {
        println!("  family size: {size}");
    }
    if !profile.onboarding_completed {
        println!("  onboarding not completed");
    }
    Ok(())
}

pub enum RecipeListing {
    All { search: Option<String> },
    Featured,
    Popular,
    Search(String),
}

pub async fn recipes(client: &ApiClient, listing: RecipeListing) -> Result<()> {
    let api = client.recipes();
    let mut more_available = false;
    let recipes = match listing {
        RecipeListing::All { search } => {
            let query = RecipeQuery {
                search,
                ..Default::default()
            };
            api.list(&query).await.map(|listing| {
                more_available = listing.has_more();
                listing.into_items()
            })
        }
        RecipeListing::Featured => api.featured().await,
        RecipeListing::Popular => api.popular().await,
        RecipeListing::Search(text) => {
            api.search(&serde_json::json!({ "query": text })).await
        }
    }
    .context("failed to load recipes")?;

    if recipes.is_empty() {
        println!("No recipes found");
    }
    for recipe in &recipes {
        println!("{}", summary_line(recipe));
    }
    if more_available {
        println!("More recipes are available; narrow the list with --search");
    }
    Ok(())
}

pub async fn recipe(client: &ApiClient, slug: &str) -> Result<()> {
    let detail = client
        .recipes()
        .get(slug)
        .await
        .with_context(|| format!("failed to load recipe '{slug}'"))?;
    println!("{}", summary_line(&detail.summary));
    if !detail.summary.description.is_empty() {
        println!("  {}", detail.summary.description);
    }
    let mut instructions = detail.instructions.clone();
    instructions.sort_by_key(|i| i.step);
    for instruction in &instructions {
        println!(
            "  {}. {} ({})",
            instruction.step,
            instruction.description,
            format_minutes(instruction.duration)
        );
    }
    if !detail.cultural_significance.is_empty() {
        println!("  Cultural context: {}", detail.cultural_significance);
    }
    Ok(())
}

pub async fn recommend(
    client: &ApiClient,
    meal_type: Option<MealType>,
    max_prep_time: Option<u32>,
    count: Option<u32>,
) -> Result<()> {
    let params = RecommendationParams {
        meal_type,
        max_prep_time,
        count,
        ..Default::default()
    };
    let response = client
        .ai()
        .recommendations(&params)
        .await
        .context("failed to get recommendations")?;
    for rec in &response.recommendations {
        println!(
            "{} [{}] {} prep, {} cook",
            rec.name,
            rec.region,
            format_minutes(rec.prep_time),
            format_minutes(rec.cook_time)
        );
        if let Some(why) = &rec.why_recommended {
            println!("  {why}");
        }
    }
    Ok(())
}

pub async fn meal_plan(
    client: &ApiClient,
    days: Option<u32>,
    budget: Option<String>,
    family_size: Option<u32>,
) -> Result<()> {
    let params = MealPlanParams {
        days,
        budget,
        family_size,
        ..Default::default()
    };
    let plan = client
        .ai()
        .generate_meal_plan(&params)
        .await
        .context("failed to generate meal plan")?;
    for (day, meals) in &plan.meal_plan {
        println!("{day}");
        println!("  breakfast: {}", meals.breakfast);
        println!("  lunch:     {}", meals.lunch);
        println!("  dinner:    {}", meals.dinner);
    }
    if !plan.shopping_list.is_empty() {
        println!("Shopping list");
        for category in &plan.shopping_list {
            println!("  {}: {}", category.category, category.items.join(", "));
        }
    }
    for tip in &plan.prep_tips {
        println!("Tip: {tip}");
    }
    Ok(())
}

pub async fn substitutes(client: &ApiClient, ingredient: String, recipe: Option<String>) -> Result<()> {
    let params = SubstituteParams {
        ingredient,
        recipe_name: recipe,
        cooking_method: None,
        cuisine_type: None,
    };
    let response = client
        .ai()
        .ingredient_substitutes(&params)
        .await
        .context("failed to find substitutes")?;
    if response.substitutes.is_empty() {
        println!("No substitutes found for {}", params.ingredient);
    }
    for sub in &response.substitutes {
        println!("{} ({})", sub.name, sub.conversion_ratio);
        if !sub.flavor_profile.is_empty() {
            println!("  {}", sub.flavor_profile);
        }
    }
    Ok(())
}

pub async fn insight(client: &ApiClient, recipe_id: i64) -> Result<()> {
    let insight = client
        .ai()
        .cultural_insight(RecipeId(recipe_id))
        .await
        .context("failed to load cultural insight")?;
    println!("{}", insight.title);
    for section in [
        &insight.historical_origin,
        &insight.cultural_significance,
        &insight.cooking_traditions,
    ] {
        if !section.is_empty() {
            println!("  {section}");
        }
    }
    for fact in &insight.interesting_facts {
        println!("  - {fact}");
    }
    Ok(())
}

fn summary_line(recipe: &RecipeSummary) -> String {
    let mut line = format!("{} ({})", recipe.name, recipe.slug);
    if let Some(region) = recipe.region() {
        line.push_str(&format!(" · {region}"));
    }
    if recipe.total_time > 0 {
        line.push_str(&format!(" · {}", format_minutes(recipe.total_time)));
    }
    if recipe.total_ratings > 0 {
        line.push_str(&format!(
            " · {:.1}★ ({})",
            recipe.average_rating, recipe.total_ratings
        ));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_type_accepts_any_case() {
        assert_eq!(parse_meal_type("Dinner"), Ok(MealType::Dinner));
        assert_eq!(parse_meal_type(" snack "), Ok(MealType::Snack));
        assert!(parse_meal_type("brunch").is_err());
    }

    #[test]
    fn summary_line_includes_region_time_and_rating() {
        let recipe: RecipeSummary = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Jollof Rice",
            "slug": "jollof-rice",
            "total_time": 80,
            "average_rating": 4.56,
            "total_ratings": 12,
            "cuisine": {"name": "Nigerian", "region": {"name": "West Africa"}}
        }))
        .expect("summary");
        assert_eq!(
            summary_line(&recipe),
            "Jollof Rice (jollof-rice) · West Africa · 1h 20m · 4.6★ (12)"
        );
    }
}
