use std::sync::Arc;

use super::*;
use crate::mock_backend::MockBackend;
use shared::{
    domain::{MealPlanId, RecipeId, RecommendationId, ShoppingItemId},
    error::ValidationError,
    protocol::{MealPlanParams, RecommendationParams, SubstituteParams},
};

fn client(base_url: &str, tokens: Arc<MemoryTokenStore>) -> ApiClient {
    ApiClient::new(base_url, tokens).expect("client")
}

fn auth_json(token: &str) -> serde_json::Value {
    serde_json::json!({
        "user": {"id": 9, "username": "kofi", "email": "kofi@example.com"},
        "token": token,
        "message": "Login successful"
    })
}

#[tokio::test]
async fn login_stores_token_for_later_requests() {
    let backend = MockBackend::builder()
        .json("POST", "/auth/login/", 200, auth_json("tok-9"))
        .json("GET", "/auth/profile/", 200, serde_json::json!({"id": 9, "username": "kofi"}))
        .spawn()
        .await;
    let tokens = Arc::new(MemoryTokenStore::default());
    let client = client(&backend.base_url, Arc::clone(&tokens));

    let response = client
        .auth()
        .login("kofi@example.com", "secret")
        .await
        .expect("login");
    assert_eq!(response.user.username, "kofi");
    assert_eq!(tokens.get().await.expect("get").as_deref(), Some("tok-9"));

    client.auth().profile().await.expect("profile");
    let requests = backend.requests().await;
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].authorization, None);
    assert_eq!(
        requests[0].json(),
        serde_json::json!({"email": "kofi@example.com", "password": "secret"})
    );
    assert_eq!(requests[1].authorization.as_deref(), Some("Token tok-9"));
}

#[tokio::test]
async fn failed_login_leaves_token_untouched() {
    let backend = MockBackend::builder()
        .json(
            "POST",
            "/auth/login/",
            401,
            serde_json::json!({"message": "Invalid credentials"}),
        )
        .spawn()
        .await;
    let tokens = Arc::new(MemoryTokenStore::with_token("previous"));
    let client = client(&backend.base_url, Arc::clone(&tokens));

    let err = client
        .auth()
        .login("kofi@example.com", "wrong")
        .await
        .expect_err("401");
    assert!(err.requires_reauth());
    assert_eq!(tokens.get().await.expect("get").as_deref(), Some("previous"));
}

#[tokio::test]
async fn logout_clears_token_even_when_backend_fails() {
    let backend = MockBackend::builder()
        .json("POST", "/auth/logout/", 500, serde_json::json!({"error": "boom"}))
        .spawn()
        .await;
    let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
    let client = client(&backend.base_url, Arc::clone(&tokens));

    let err = client.auth().logout().await.expect_err("500");
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert_eq!(tokens.get().await.expect("get"), None);
    assert_eq!(
        backend.last_request().await.authorization.as_deref(),
        Some("Token tok")
    );
}

#[tokio::test]
async fn logout_succeeds_and_clears_token() {
    let backend = MockBackend::builder()
        .json("POST", "/auth/logout/", 200, serde_json::json!({"message": "Logged out"}))
        .spawn()
        .await;
    let tokens = Arc::new(MemoryTokenStore::with_token("tok"));
    let client = client(&backend.base_url, Arc::clone(&tokens));

    client.auth().logout().await.expect("logout");
    assert!(!client.is_authenticated().await);
}

#[tokio::test]
async fn recipe_detail_converts_into_cookable_recipe() {
    let backend = MockBackend::builder()
        .json(
            "GET",
            "/recipes/jollof-rice/",
            200,
            serde_json::json!({
                "id": 1,
                "name": "Jollof Rice",
                "slug": "jollof-rice",
                "difficulty": "medium",
                "total_time": 80,
                "servings": 6,
                "cuisine": {"name": "Nigerian", "region": {"name": "West Africa"}},
                "instructions": [
                    {"step": 2, "description": "Blend the peppers", "duration": 10},
                    {"step": 1, "description": "Wash the rice", "title": "Prepare", "duration": 15}
                ]
            }),
        )
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::default()));

    let detail = client.recipes().get("jollof-rice").await.expect("detail");
    let recipe = detail.into_recipe().expect("recipe");
    assert_eq!(recipe.steps.len(), 2);
    assert_eq!(recipe.steps[0].title, "Prepare");
    assert_eq!(recipe.steps[1].title, "Step 2");
    assert_eq!(recipe.region.as_deref(), Some("West Africa"));
}

#[tokio::test]
async fn featured_accepts_paginated_payload() {
    let backend = MockBackend::builder()
        .json(
            "GET",
            "/recipes/featured/",
            200,
            serde_json::json!({
                "count": 2,
                "next": null,
                "previous": null,
                "results": [{"id": 1, "name": "Jollof Rice"}, {"id": 2, "name": "Tagine"}]
            }),
        )
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::default()));

    let featured = client.recipes().featured().await.expect("featured");
    let names: Vec<_> = featured.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["Jollof Rice", "Tagine"]);
}

#[tokio::test]
async fn rating_outside_one_to_five_never_reaches_backend() {
    let backend = MockBackend::builder().spawn().await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    for rating in [0, 6] {
        let err = client
            .recipes()
            .rate(RecipeId(1), rating, None)
            .await
            .expect_err("out of range");
        assert!(matches!(
            err,
            ClientError::InvalidRequest(ValidationError::OutOfRange { field: "rating", .. })
        ));
    }
    assert!(backend.requests().await.is_empty());
}

#[tokio::test]
async fn rating_posts_to_recipe_ratings() {
    let backend = MockBackend::builder()
        .json("POST", "/recipes/1/ratings/", 201, serde_json::json!({"message": "Rated"}))
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    client
        .recipes()
        .rate(RecipeId(1), 5, Some("Smoky and rich".into()))
        .await
        .expect("rate");
    assert_eq!(
        backend.last_request().await.json(),
        serde_json::json!({"rating": 5, "review": "Smoky and rich"})
    );
}

#[tokio::test]
async fn recommendation_count_is_clamped() {
    let backend = MockBackend::builder()
        .json(
            "POST",
            "/ai/recommendations/",
            200,
            serde_json::json!({"recommendations": [], "recommendation_id": 12}),
        )
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    let params = RecommendationParams {
        count: Some(50),
        ..Default::default()
    };
    client.ai().recommendations(&params).await.expect("recommendations");
    assert_eq!(
        backend.last_request().await.json()["count"],
        MAX_RECOMMENDATIONS
    );
}

#[tokio::test]
async fn meal_plan_days_are_clamped() {
    let backend = MockBackend::builder()
        .json(
            "POST",
            "/ai/meal-plan/generate/",
            200,
            serde_json::json!({"meal_plan": {"day_1": {"breakfast": "Akara"}}, "nutritional_summary": null}),
        )
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    let plan = client
        .ai()
        .generate_meal_plan(&MealPlanParams {
            days: Some(30),
            ..Default::default()
        })
        .await
        .expect("plan");
    assert_eq!(plan.meal_plan["day_1"].breakfast, "Akara");
    assert_eq!(backend.last_request().await.json()["days"], MAX_MEAL_PLAN_DAYS);

    client
        .ai()
        .generate_meal_plan(&MealPlanParams {
            days: Some(0),
            ..Default::default()
        })
        .await
        .expect("plan");
    assert_eq!(backend.last_request().await.json()["days"], 1);
}

#[tokio::test]
async fn blank_substitute_ingredient_is_rejected_locally() {
    let backend = MockBackend::builder().spawn().await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    let err = client
        .ai()
        .ingredient_substitutes(&SubstituteParams {
            ingredient: "  ".into(),
            recipe_name: None,
            cooking_method: None,
            cuisine_type: None,
        })
        .await
        .expect_err("blank");
    assert!(matches!(
        err,
        ClientError::InvalidRequest(ValidationError::Empty { field: "ingredient" })
    ));
    assert!(backend.requests().await.is_empty());
}

#[tokio::test]
async fn deleting_meal_plan_accepts_no_content() {
    let backend = MockBackend::builder()
        .raw("DELETE", "/meal-planning/4/", 204, "")
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    client.meal_plans().delete(MealPlanId(4)).await.expect("delete");
    assert_eq!(backend.last_request().await.method, "DELETE");
}

#[tokio::test]
async fn marking_item_purchased_patches_item() {
    let backend = MockBackend::builder()
        .json(
            "PATCH",
            "/shopping/items/21/",
            200,
            serde_json::json!({"id": 21, "name": "Scotch bonnet", "is_purchased": true}),
        )
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    let item = client
        .shopping()
        .set_purchased(ShoppingItemId(21), true)
        .await
        .expect("patch");
    assert!(item.is_purchased);
    assert_eq!(
        backend.last_request().await.json(),
        serde_json::json!({"is_purchased": true})
    );
}

#[tokio::test]
async fn meal_plans_are_listed_from_meal_planning_routes() {
    let backend = MockBackend::builder()
        .json(
            "GET",
            "/meal-planning/",
            200,
            serde_json::json!([{
                "id": 4,
                "name": "Harvest week",
                "start_date": "2024-03-04",
                "end_date": "2024-03-10",
                "is_active": true
            }]),
        )
        .json("GET", "/meal-planning/4/entries/", 200, serde_json::json!([]))
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    let plans = client.meal_plans().list().await.expect("list");
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0].name, "Harvest week");
    assert!(client
        .meal_plans()
        .entries(plans[0].id)
        .await
        .expect("entries")
        .is_empty());

    let paths: Vec<_> = backend
        .requests()
        .await
        .into_iter()
        .map(|r| r.path)
        .collect();
    assert_eq!(paths, ["/meal-planning/", "/meal-planning/4/entries/"]);
}

#[tokio::test]
async fn recommendation_history_decodes_stored_entries() {
    let backend = MockBackend::builder()
        .json(
            "GET",
            "/ai/history/",
            200,
            serde_json::json!({
                "recommendations": [{
                    "id": 31,
                    "type": "recipe",
                    "content": {"recommendations": [{"name": "Thieboudienne"}]},
                    "confidence_score": 0.82,
                    "user_rating": null,
                    "was_helpful": true,
                    "created_at": "2024-03-04T18:22:05.120431Z",
                    "viewed_at": null,
                    "acted_upon_at": null
                }],
                "total_count": 1
            }),
        )
        .spawn()
        .await;
    let client = client(&backend.base_url, Arc::new(MemoryTokenStore::with_token("t")));

    let history = client.ai().history().await.expect("history");
    assert_eq!(history.total_count, 1);
    let entry = &history.recommendations[0];
    assert_eq!(entry.id, RecommendationId(31));
    assert_eq!(entry.kind, "recipe");
    assert_eq!(entry.content["recommendations"][0]["name"], "Thieboudienne");
    assert_eq!(entry.was_helpful, Some(true));
    assert!(entry.created_at.is_some());
    assert!(entry.viewed_at.is_none());
}
