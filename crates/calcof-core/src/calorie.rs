//! Daily calorie needs (Mifflin-St Jeor).

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CoreCalculator};
use crate::constants::{GOAL_CALORIE_OFFSET, KCAL_PER_KG_FAT, KCAL_PER_LB_FAT};
use crate::input::{ensure_finite, ensure_positive, FormFields, FromFields, ParseError};
use crate::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Physical activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    #[serde(alias = "veryactive", alias = "very_active")]
    VeryActive,
}

impl ActivityLevel {
    /// Multiplier applied to BMR.
    #[must_use]
    pub fn multiplier(self) -> f64 {
        match self {
            Self::Sedentary => 1.2,
            Self::Light => 1.375,
            Self::Moderate => 1.55,
            Self::Active => 1.725,
            Self::VeryActive => 1.9,
        }
    }
}

/// Weight goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    Lose,
    #[default]
    Maintain,
    Gain,
}

impl Goal {
    /// Daily calorie offset from maintenance.
    #[must_use]
    pub fn calorie_offset(self) -> f64 {
        match self {
            Self::Lose => -GOAL_CALORIE_OFFSET,
            Self::Maintain => 0.0,
            Self::Gain => GOAL_CALORIE_OFFSET,
        }
    }
}

/// Inputs of the calorie calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieInputs {
    pub age: u32,
    pub gender: Gender,
    pub weight: f64,
    pub height: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub goal: Goal,
}

impl FromFields for CalorieInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            age: fields.integer("age")?,
            gender: fields.choice("gender")?,
            weight: fields.number("weight")?,
            height: fields.number("height")?,
            activity_level: fields.choice_or("activityLevel", ActivityLevel::Moderate)?,
            unit: fields.choice_or("unit", Unit::Metric)?,
            goal: fields.choice_or("goal", Goal::Maintain)?,
        })
    }
}

/// Daily macronutrient targets in grams.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Macronutrients {
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl Macronutrients {
    /// Split calories 30% protein, 40% carbs, 30% fat.
    #[must_use]
    pub fn from_calories(calories: f64) -> Self {
        Self {
            protein: (calories * 0.30 / 4.0).round(),
            carbs: (calories * 0.40 / 4.0).round(),
            fats: (calories * 0.30 / 9.0).round(),
        }
    }
}

/// Results of the calorie calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalorieResults {
    pub bmr: f64,
    pub daily_calories: f64,
    pub macronutrients: Macronutrients,
    /// Expected weight change per week (kg or lb), negative when losing.
    pub weekly_goal: f64,
}

/// Basal metabolic rate from kilograms, centimetres and years.
#[must_use]
pub fn mifflin_st_jeor(gender: Gender, weight_kg: f64, height_cm: f64, age: u32) -> f64 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    match gender {
        Gender::Male => base + 5.0,
        Gender::Female => base - 161.0,
    }
}

/// Compute BMR, daily calorie target, macros and weekly change.
pub fn calculate_calories(inputs: &CalorieInputs) -> Result<CalorieResults, CalcError> {
    ensure_positive("weight", inputs.weight)?;
    ensure_positive("height", inputs.height)?;

    let weight_kg = inputs.unit.weight_to_kg(inputs.weight);
    let height_cm = inputs.unit.height_to_cm(inputs.height);
    let bmr = ensure_finite(
        "bmr",
        mifflin_st_jeor(inputs.gender, weight_kg, height_cm, inputs.age).round(),
    )?;
    let maintenance = bmr * inputs.activity_level.multiplier();
    let offset = inputs.goal.calorie_offset();
    let daily_calories = ensure_finite("daily calories", (maintenance + offset).round())?;

    let kcal_per_unit = match inputs.unit {
        Unit::Metric => KCAL_PER_KG_FAT,
        Unit::Imperial => KCAL_PER_LB_FAT,
    };
    let weekly_goal = offset * 7.0 / kcal_per_unit;

    Ok(CalorieResults {
        bmr,
        daily_calories,
        macronutrients: Macronutrients::from_calories(daily_calories),
        weekly_goal,
    })
}

/// Registry adapter for [`calculate_calories`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CalorieCalculator;

impl CoreCalculator for CalorieCalculator {
    type Inputs = CalorieInputs;
    type Results = CalorieResults;

    fn name(&self) -> &'static str {
        "calorie"
    }

    fn description(&self) -> &'static str {
        "Daily calorie needs and macronutrient split"
    }

    fn calculate_core(&self, inputs: &CalorieInputs) -> Result<CalorieResults, CalcError> {
        calculate_calories(inputs)
    }
}
