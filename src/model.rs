use std::fmt;

use serde::{Deserialize, Serialize};

/// Successful analysis result, serialized as `{"recipe": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionReport {
    pub recipe: NutritionRecord,
}

/// Estimated nutritional breakdown of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionRecord {
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    pub total_nutrition: TotalNutrition,
    pub servings: f64,
    /// Percent daily value
    pub vitamins: Vitamins,
    /// Percent daily value
    pub minerals: Minerals,
    pub cooking_method: String,
    pub health_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalNutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub fiber: f64,
    pub sugar: f64,
    pub sodium: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vitamins {
    pub a: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub k: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Minerals {
    pub calcium: f64,
    pub iron: f64,
    pub potassium: f64,
    pub magnesium: f64,
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.name)
    }
}

impl NutritionRecord {
    /// Drop repeated health tags, keeping the first occurrence of each
    pub fn dedup_health_tags(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.health_tags.retain(|tag| seen.insert(tag.clone()));
    }

    /// Every numeric field paired with its wire path, used for range checks
    pub fn numeric_fields(&self) -> Vec<(String, f64)> {
        let mut fields = vec![("servings".to_string(), self.servings)];

        for (i, ingredient) in self.ingredients.iter().enumerate() {
            fields.push((format!("ingredients[{i}].calories"), ingredient.calories));
            fields.push((format!("ingredients[{i}].protein"), ingredient.protein));
            fields.push((format!("ingredients[{i}].carbs"), ingredient.carbs));
            fields.push((format!("ingredients[{i}].fat"), ingredient.fat));
        }

        let t = &self.total_nutrition;
        for (name, value) in [
            ("calories", t.calories),
            ("protein", t.protein),
            ("carbs", t.carbs),
            ("fat", t.fat),
            ("fiber", t.fiber),
            ("sugar", t.sugar),
            ("sodium", t.sodium),
        ] {
            fields.push((format!("totalNutrition.{name}"), value));
        }

        let v = &self.vitamins;
        for (name, value) in [("a", v.a), ("c", v.c), ("d", v.d), ("e", v.e), ("k", v.k)] {
            fields.push((format!("vitamins.{name}"), value));
        }

        let m = &self.minerals;
        for (name, value) in [
            ("calcium", m.calcium),
            ("iron", m.iron),
            ("potassium", m.potassium),
            ("magnesium", m.magnesium),
        ] {
            fields.push((format!("minerals.{name}"), value));
        }

        fields
    }
}
