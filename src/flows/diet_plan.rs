//! `diet-plan`: a one-day meal plan with a grocery list and a calorie target.

use super::first_match;
use crate::engine::{Flow, PromptBuilder, PromptSpec};
use crate::postprocessing::{FieldMap, Layout, OutputField};
use crate::preprocessing::{FieldKind, FieldSpec};
use serde::{Deserialize, Serialize};

const BASELINE_KCAL: i32 = 2000;
const MIN_KCAL: i32 = 1200;
const MAX_KCAL: i32 = 4000;

#[derive(Debug, Clone, Deserialize)]
pub struct DietPlanRequest {
    pub bmi: f64,
    pub weight_goal: String,
    pub dietary_preferences: String,
    #[serde(default)]
    pub user_history: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DietPlanResponse {
    pub diet_plan: String,
    pub grocery_list: String,
    pub nutritional_information: String,
    pub daily_calorie_target: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Goal {
    Lose,
    Maintain,
    Gain,
}

struct GoalEntry {
    goal: Goal,
    keywords: &'static [&'static str],
    phrase: &'static str,
    adjustment: i32,
    /// Protein, carbohydrate, fat percentages.
    macros: (u8, u8, u8),
}

const GOALS: &[GoalEntry] = &[
    GoalEntry {
        goal: Goal::Lose,
        keywords: &["lose", "cut", "fat loss", "slim"],
        phrase: "lose weight steadily",
        adjustment: -500,
        macros: (35, 35, 30),
    },
    GoalEntry {
        goal: Goal::Gain,
        keywords: &["gain", "bulk", "muscle", "build"],
        phrase: "gain weight and build muscle",
        adjustment: 400,
        macros: (25, 50, 25),
    },
];

const MAINTAIN: GoalEntry = GoalEntry {
    goal: Goal::Maintain,
    keywords: &[],
    phrase: "maintain your current weight",
    adjustment: 0,
    macros: (25, 45, 30),
};

struct DietEntry {
    title: &'static str,
    keywords: &'static [&'static str],
    meals: &'static str,
    groceries: &'static str,
    note: &'static str,
}

const DIETS: &[DietEntry] = &[
    DietEntry {
        title: "Vegan",
        keywords: &["vegan", "plant-based", "plant based"],
        meals: "Breakfast: overnight oats with chia seeds and berries. Lunch: chickpea and quinoa salad with tahini. Dinner: tofu stir-fry with brown rice and vegetables. Snack: hummus with carrot sticks.",
        groceries: "rolled oats, chia seeds, berries, chickpeas, quinoa, tahini, firm tofu, brown rice, mixed vegetables, hummus, carrots, fortified soy milk",
        note: "Pair legumes with whole grains for complete protein and consider a B12 supplement.",
    },
    DietEntry {
        title: "Vegetarian",
        keywords: &["vegetarian", "veggie", "meatless"],
        meals: "Breakfast: Greek yogurt with granola and fruit. Lunch: lentil soup with wholegrain bread. Dinner: vegetable omelette with a side salad. Snack: a handful of almonds.",
        groceries: "Greek yogurt, granola, fresh fruit, red lentils, wholegrain bread, eggs, spinach, peppers, salad greens, almonds, cottage cheese",
        note: "Eggs and dairy cover most protein needs; add lentils or beans daily for iron.",
    },
    DietEntry {
        title: "Pescatarian",
        keywords: &["pescatarian", "pescetarian", "fish"],
        meals: "Breakfast: scrambled eggs on rye toast. Lunch: tuna and bean salad. Dinner: baked salmon with sweet potato and greens. Snack: cottage cheese with cucumber.",
        groceries: "eggs, rye bread, canned tuna, cannellini beans, salmon fillets, sweet potatoes, green beans, spinach, cottage cheese, cucumber, lemons",
        note: "Two portions of oily fish per week supply most of your omega-3 needs.",
    },
    DietEntry {
        title: "Keto",
        keywords: &["keto", "low carb", "low-carb", "ketogenic"],
        meals: "Breakfast: eggs with avocado and spinach. Lunch: chicken Caesar salad without croutons. Dinner: pan-fried salmon with buttered broccoli. Snack: cheese and walnuts.",
        groceries: "eggs, avocados, spinach, chicken breast, romaine lettuce, parmesan, salmon, broccoli, butter, cheddar, walnuts, olive oil",
        note: "Keep net carbohydrates under about 30g per day and salt food to taste to replace electrolytes.",
    },
    DietEntry {
        title: "Gluten-free",
        keywords: &["gluten", "celiac", "coeliac"],
        meals: "Breakfast: buckwheat porridge with banana. Lunch: rice bowl with black beans, corn and salsa. Dinner: grilled chicken with roasted potatoes and vegetables. Snack: rice cakes with peanut butter.",
        groceries: "buckwheat groats, bananas, rice, black beans, sweetcorn, salsa, chicken thighs, potatoes, courgettes, rice cakes, peanut butter",
        note: "Check labels for hidden gluten in sauces and choose certified gluten-free oats.",
    },
    DietEntry {
        title: "Paleo",
        keywords: &["paleo"],
        meals: "Breakfast: sweet potato hash with eggs. Lunch: turkey lettuce wraps with avocado. Dinner: grass-fed beef with roasted root vegetables. Snack: apple slices with almond butter.",
        groceries: "sweet potatoes, eggs, turkey breast, lettuce, avocados, beef steak, carrots, parsnips, apples, almond butter, olive oil",
        note: "Lean on starchy vegetables and fruit for carbohydrates around training.",
    },
];

const BALANCED: DietEntry = DietEntry {
    title: "Balanced",
    keywords: &[],
    meals: "Breakfast: porridge with milk and sliced banana. Lunch: chicken and avocado wholegrain wrap. Dinner: baked cod with brown rice and steamed vegetables. Snack: Greek yogurt with honey.",
    groceries: "oats, milk, bananas, chicken breast, avocados, wholegrain wraps, cod fillets, brown rice, broccoli, carrots, Greek yogurt, honey",
    note: "Fill half your plate with vegetables and include a protein source at every meal.",
};

fn goal_for(weight_goal: &str) -> &'static GoalEntry {
    first_match(weight_goal, GOALS, |g| g.keywords).unwrap_or(&MAINTAIN)
}

fn diet_for(preferences: &str) -> &'static DietEntry {
    first_match(preferences, DIETS, |d| d.keywords).unwrap_or(&BALANCED)
}

fn bmi_band(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "underweight"
    } else if bmi < 25.0 {
        "healthy"
    } else if bmi < 30.0 {
        "overweight"
    } else {
        "obese"
    }
}

fn calorie_target(bmi: f64, goal: &GoalEntry) -> u32 {
    let mut target = BASELINE_KCAL + goal.adjustment;
    match goal.goal {
        Goal::Lose if bmi >= 30.0 => target -= 100,
        Goal::Gain if bmi < 18.5 => target += 100,
        _ => {}
    }
    target.clamp(MIN_KCAL, MAX_KCAL) as u32
}

pub struct DietPlan;

impl Flow for DietPlan {
    type Request = DietPlanRequest;
    type Response = DietPlanResponse;

    const NAME: &'static str = "diet-plan";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required(
            "bmi",
            FieldKind::Number { min: 10.0, max: 80.0 },
            "the user's body mass index",
        ),
        FieldSpec::required("weight_goal", FieldKind::Text, "lose, maintain or gain weight"),
        FieldSpec::required(
            "dietary_preferences",
            FieldKind::Text,
            "diet style, allergies or restrictions",
        ),
        FieldSpec::optional("user_history", FieldKind::Text, "past diets and feedback"),
    ];

    const OUTPUTS: &'static [OutputField] = &[
        OutputField::primary(
            "diet_plan",
            "DIET PLAN",
            "meals for breakfast, lunch, dinner and one snack",
        ),
        OutputField::secondary(
            "grocery_list",
            "GROCERY LIST",
            "comma-separated ingredients needed for the plan",
        ),
        OutputField::secondary(
            "nutritional_information",
            "NUTRITIONAL INFORMATION",
            "daily calories and the protein, carbohydrate and fat split",
        ),
        OutputField::secondary(
            "daily_calorie_target",
            "DAILY CALORIES",
            "one whole number of kilocalories per day",
        ),
    ];

    const LAYOUT: Layout = Layout::Sections;

    fn prompt(request: &DietPlanRequest) -> PromptSpec {
        let goal = goal_for(&request.weight_goal);
        let target = calorie_target(request.bmi, goal);

        PromptBuilder::new("Create a personalized one-day diet plan.")
            .fact("BMI", format!("{:.1} ({})", request.bmi, bmi_band(request.bmi)))
            .fact("Weight goal", &request.weight_goal)
            .fact("Dietary preferences", &request.dietary_preferences)
            .optional_fact("Diet history", request.user_history.as_deref())
            .guidance(format!(
                "A reasonable daily target is around {} kcal; stay between {} and {}.",
                target, MIN_KCAL, MAX_KCAL
            ))
            .guidance("Respect every dietary preference and restriction strictly.")
            .build(Self::OUTPUTS, Self::LAYOUT)
    }

    fn fallback(request: &DietPlanRequest) -> DietPlanResponse {
        let goal = goal_for(&request.weight_goal);
        let diet = diet_for(&request.dietary_preferences);
        let target = calorie_target(request.bmi, goal);
        let (protein, carbs, fat) = goal.macros;

        let mut diet_plan = format!(
            "{} plan to {} at about {} kcal per day. {}",
            diet.title, goal.phrase, target, diet.meals
        );
        if let Some(history) = request.user_history.as_deref() {
            diet_plan.push_str(&format!(
                " It builds on your history: {}.",
                history.trim_end_matches('.')
            ));
        }

        let nutritional_information = format!(
            "Around {} kcal per day, split roughly {}% protein, {}% carbohydrates and {}% fat. {} Your BMI of {:.1} is in the {} range.",
            target,
            protein,
            carbs,
            fat,
            diet.note,
            request.bmi,
            bmi_band(request.bmi)
        );

        DietPlanResponse {
            diet_plan,
            grocery_list: diet.groceries.to_string(),
            nutritional_information,
            daily_calorie_target: target,
        }
    }

    fn assemble(request: &DietPlanRequest, fields: &FieldMap) -> DietPlanResponse {
        let daily_calorie_target = fields
            .integer("daily_calorie_target", MIN_KCAL as i64..=MAX_KCAL as i64)
            .map(|kcal| kcal as u32)
            .unwrap_or_else(|| calorie_target(request.bmi, goal_for(&request.weight_goal)));

        DietPlanResponse {
            diet_plan: fields.text("diet_plan").to_string(),
            grocery_list: fields.text("grocery_list").to_string(),
            nutritional_information: fields.text("nutritional_information").to_string(),
            daily_calorie_target,
        }
    }
}
