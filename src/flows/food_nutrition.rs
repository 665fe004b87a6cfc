//! `food-nutrition`: calories and macronutrients for one food, per serving.

use super::first_match;
use crate::engine::{Flow, PromptBuilder, PromptSpec};
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct FoodNutritionRequest {
    pub food_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodNutritionResponse {
    pub food_name: String,
    pub calories: String,
    pub protein: String,
    pub carbs: String,
    pub fats: String,
}

struct FoodEntry {
    keywords: &'static [&'static str],
    calories: &'static str,
    protein: &'static str,
    carbs: &'static str,
    fats: &'static str,
}

// Compound names must precede their parts ("almond milk" before "almond").
const FOODS: &[FoodEntry] = &[
    FoodEntry {
        keywords: &["almond milk", "oat milk", "soy milk"],
        calories: "40 kcal per cup (240ml)",
        protein: "1g",
        carbs: "3g",
        fats: "2.5g",
    },
    FoodEntry {
        keywords: &["apple"],
        calories: "95 kcal per medium apple (182g)",
        protein: "0.5g",
        carbs: "25g",
        fats: "0.3g",
    },
    FoodEntry {
        keywords: &["banana"],
        calories: "105 kcal per medium banana (118g)",
        protein: "1.3g",
        carbs: "27g",
        fats: "0.4g",
    },
    FoodEntry {
        keywords: &["egg"],
        calories: "72 kcal per large egg (50g)",
        protein: "6.3g",
        carbs: "0.4g",
        fats: "4.8g",
    },
    FoodEntry {
        keywords: &["chicken"],
        calories: "165 kcal per 100g cooked breast",
        protein: "31g",
        carbs: "0g",
        fats: "3.6g",
    },
    FoodEntry {
        keywords: &["salmon"],
        calories: "208 kcal per 100g fillet",
        protein: "20g",
        carbs: "0g",
        fats: "13g",
    },
    FoodEntry {
        keywords: &["rice"],
        calories: "205 kcal per cup cooked (158g)",
        protein: "4.3g",
        carbs: "45g",
        fats: "0.4g",
    },
    FoodEntry {
        keywords: &["oatmeal", "oats", "porridge"],
        calories: "150 kcal per 40g dry serving",
        protein: "5g",
        carbs: "27g",
        fats: "2.5g",
    },
    FoodEntry {
        keywords: &["bread", "toast"],
        calories: "80 kcal per slice (32g)",
        protein: "4g",
        carbs: "14g",
        fats: "1g",
    },
    FoodEntry {
        keywords: &["avocado"],
        calories: "240 kcal per medium avocado (150g)",
        protein: "3g",
        carbs: "13g",
        fats: "22g",
    },
    FoodEntry {
        keywords: &["almond"],
        calories: "164 kcal per 28g handful",
        protein: "6g",
        carbs: "6g",
        fats: "14g",
    },
    FoodEntry {
        keywords: &["milk"],
        calories: "103 kcal per cup (244ml) semi-skimmed",
        protein: "8g",
        carbs: "12g",
        fats: "2.4g",
    },
    FoodEntry {
        keywords: &["broccoli"],
        calories: "55 kcal per cup cooked (156g)",
        protein: "3.7g",
        carbs: "11g",
        fats: "0.6g",
    },
];

const GENERIC: FoodEntry = FoodEntry {
    keywords: &[],
    calories: "150 kcal",
    protein: "25g",
    carbs: "5g",
    fats: "10g",
};

pub struct FoodNutrition;

impl Flow for FoodNutrition {
    type Request = FoodNutritionRequest;
    type Response = FoodNutritionResponse;

    const NAME: &'static str = "food-nutrition";

    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required(
        "food_name",
        FieldKind::Text,
        "the food to look up",
    )];

    const OUTPUTS: &'static [OutputField] = &[
        OutputField::primary("calories", "Calories", "energy in kcal for a typical serving")
            .keywords(&["calorie", "kcal", "energy"]),
        OutputField::secondary("protein", "Protein", "grams of protein")
            .keywords(&["protein"]),
        OutputField::secondary("carbs", "Carbohydrates", "grams of carbohydrates")
            .keywords(&["carb", "sugar", "starch"]),
        OutputField::secondary("fats", "Fat", "grams of fat").keywords(&["fat", "lipid"]),
    ];

    const LAYOUT: Layout = Layout::Keywords;

    fn prompt(request: &FoodNutritionRequest) -> PromptSpec {
        PromptBuilder::new("Estimate the nutritional content of a food.")
            .fact("Food", &request.food_name)
            .guidance("Use one typical serving and state it in the calories line.")
            .guidance("Always include units (kcal or g).")
            .build(Self::OUTPUTS, Self::LAYOUT)
    }

    fn fallback(request: &FoodNutritionRequest) -> FoodNutritionResponse {
        let food = first_match(&request.food_name, FOODS, |f| f.keywords).unwrap_or(&GENERIC);

        FoodNutritionResponse {
            food_name: request.food_name.clone(),
            calories: food.calories.to_string(),
            protein: food.protein.to_string(),
            carbs: food.carbs.to_string(),
            fats: food.fats.to_string(),
        }
    }

    fn assemble(request: &FoodNutritionRequest, fields: &FieldMap) -> FoodNutritionResponse {
        FoodNutritionResponse {
            food_name: request.food_name.clone(),
            calories: fields.text("calories").to_string(),
            protein: fields.text("protein").to_string(),
            carbs: fields.text("carbs").to_string(),
            fats: fields.text("fats").to_string(),
        }
    }
}
