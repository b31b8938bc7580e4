//! Recipes bundled with the binary, plus loading recipes from disk.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use shared::{domain::Recipe, protocol::RecipeDetail};

const BUNDLED: &str = include_str!("../data/recipes.json");

pub fn bundled() -> Result<Vec<Recipe>> {
    serde_json::from_str(BUNDLED).context("bundled recipes are malformed")
}

/// Case-insensitive match on any part of the recipe name.
pub fn find(name: &str) -> Result<Recipe> {
    let needle = name.trim().to_lowercase();
    let recipes = bundled()?;
    let names: Vec<String> = recipes.iter().map(|r| r.name.clone()).collect();
    recipes
        .into_iter()
        .find(|r| r.name.to_lowercase().contains(&needle))
        .ok_or_else(|| anyhow!("no bundled recipe matches '{name}' (have: {})", names.join(", ")))
}

/// Reads either the app's own recipe layout or a backend recipe document.
pub async fn load_file(path: &Path) -> Result<Recipe> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_recipe(&raw).with_context(|| format!("failed to load recipe from {}", path.display()))
}

fn parse_recipe(raw: &str) -> Result<Recipe> {
    if let Ok(recipe) = serde_json::from_str::<Recipe>(raw) {
        return Ok(recipe);
    }
    let detail: RecipeDetail = serde_json::from_str(raw).context("not a recipe document")?;
    Ok(detail.into_recipe()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_samples_match_app_catalogue() {
        let recipes = bundled().expect("bundled");
        assert_eq!(recipes.len(), 2);

        let jollof = &recipes[0];
        assert_eq!(jollof.name, "Jollof Rice with Chicken");
        let durations: Vec<u32> = jollof.steps.iter().map(|s| s.duration).collect();
        assert_eq!(durations, [15, 10, 5, 10, 25, 15]);

        let tagine = &recipes[1];
        let durations: Vec<u32> = tagine.steps.iter().map(|s| s.duration).collect();
        assert_eq!(durations, [10, 15, 5, 90, 15, 5]);
        assert_eq!(tagine.total_time_display(), "2h");
    }

    #[test]
    fn find_is_case_insensitive_and_partial() {
        assert_eq!(find("tagine").expect("tagine").name, "Moroccan Tagine");
        assert_eq!(find("JOLLOF").expect("jollof").region.as_deref(), Some("West Africa"));
        let err = find("fufu").expect_err("missing");
        assert!(err.to_string().contains("Moroccan Tagine"));
    }

    #[test]
    fn parses_backend_recipe_document() {
        let recipe = parse_recipe(
            r#"{"id": 5, "name": "Egusi Soup", "difficulty": "hard",
                "instructions": [{"step": 1, "description": "Toast the seeds", "duration": 8}]}"#,
        )
        .expect("backend doc");
        assert_eq!(recipe.steps[0].title, "Step 1");
        assert_eq!(recipe.steps[0].duration_seconds(), 480);
    }

    #[test]
    fn backend_document_without_instructions_is_rejected() {
        assert!(parse_recipe(r#"{"id": 5, "name": "Egusi Soup"}"#).is_err());
    }

    #[tokio::test]
    async fn load_file_reads_app_layout() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recipe.json");
        let recipe = find("jollof").expect("jollof");
        std::fs::write(&path, serde_json::to_string(&recipe).expect("json")).expect("write");

        assert_eq!(load_file(&path).await.expect("load"), recipe);
        assert!(load_file(&dir.path().join("missing.json")).await.is_err());
    }
}
