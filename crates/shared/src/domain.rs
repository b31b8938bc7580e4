use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(UserId);
id_newtype!(RecipeId);
id_newtype!(StepId);
id_newtype!(MealPlanId);
id_newtype!(MealPlanEntryId);
id_newtype!(ShoppingListId);
id_newtype!(ShoppingItemId);
id_newtype!(RecommendationId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// The backend sends lowercase choices while bundled recipes use display labels.
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(serde::de::Error::unknown_variant(
                other,
                &["easy", "medium", "hard"],
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
    Dessert,
    Beverage,
}

/// One instruction unit of a recipe. Position in [`Recipe::steps`] is its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: StepId,
    pub title: String,
    pub description: String,
    /// Minutes.
    pub duration: u32,
    #[serde(default, alias = "tips")]
    pub tip: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Step {
    pub fn duration_seconds(&self) -> u32 {
        self.duration.saturating_mul(60)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub steps: Vec<Step>,
    #[serde(default)]
    pub cultural_note: String,
    pub difficulty: Difficulty,
    /// Minutes.
    pub total_time: u32,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl Recipe {
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    pub fn total_time_display(&self) -> String {
        format_minutes(self.total_time)
    }

    /// Sum of the step durations, which may differ from the advertised total.
    pub fn guided_minutes(&self) -> u32 {
        self.steps.iter().map(|s| s.duration).sum()
    }
}

/// Human readable duration: `45m`, `2h`, `1h 30m`.
pub fn format_minutes(total: u32) -> String {
    let hours = total / 60;
    let minutes = total % 60;
    if hours > 0 {
        if minutes > 0 {
            format!("{hours}h {minutes}m")
        } else {
            format!("{hours}h")
        }
    } else {
        format!("{minutes}m")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_time_display_matches_backend_rendering() {
        assert_eq!(format_minutes(45), "45m");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(90), "1h 30m");
        assert_eq!(format_minutes(0), "0m");
    }

    #[test]
    fn difficulty_accepts_backend_and_display_spellings() {
        let lower: Difficulty = serde_json::from_str("\"medium\"").expect("lower");
        let title: Difficulty = serde_json::from_str("\"Medium\"").expect("title");
        assert_eq!(lower, Difficulty::Medium);
        assert_eq!(title, Difficulty::Medium);
        assert!(serde_json::from_str::<Difficulty>("\"extreme\"").is_err());
    }

    #[test]
    fn step_accepts_tips_alias() {
        let step: Step = serde_json::from_str(
            r#"{"id":1,"title":"Brown","description":"Brown the meat","duration":15,"tips":"Use a hot pan"}"#,
        )
        .expect("step");
        assert_eq!(step.tip, "Use a hot pan");
        assert_eq!(step.duration_seconds(), 900);
        assert!(step.image.is_none());
    }
}
