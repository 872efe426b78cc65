//! Daily food portions for dogs and cats.
//!
//! Energy needs start from the resting energy requirement
//! `RER = 70 · kg^0.75` and are scaled by a life-stage/activity factor.
//! Portions follow from the energy density of the food.

use serde::{Deserialize, Serialize};

use crate::calculator::{CalcError, CoreCalculator};
use crate::input::{ensure_non_negative, ensure_positive, FormFields, FromFields, ParseError};
use crate::units::Unit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetType {
    Dog,
    Cat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PetActivity {
    Low,
    #[default]
    Moderate,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FoodType {
    #[default]
    Dry,
    Wet,
    Raw,
}

impl FoodType {
    /// Energy density in kcal per gram.
    #[must_use]
    pub fn kcal_per_gram(self) -> f64 {
        match self {
            Self::Dry => 3.5,
            Self::Wet => 1.0,
            Self::Raw => 1.5,
        }
    }
}

/// Life stage derived from species and age.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LifeStage {
    Young,
    Adult,
    Senior,
}

impl PetType {
    fn life_stage(self, age_years: f64) -> LifeStage {
        let senior_from = match self {
            Self::Dog => 7.0,
            Self::Cat => 10.0,
        };
        if age_years < 1.0 {
            LifeStage::Young
        } else if age_years >= senior_from {
            LifeStage::Senior
        } else {
            LifeStage::Adult
        }
    }

    /// Factor applied to RER.
    fn energy_factor(self, stage: LifeStage, activity: PetActivity) -> f64 {
        match (self, stage, activity) {
            (Self::Dog, LifeStage::Young, _) => 2.0,
            (Self::Dog, LifeStage::Senior, _) => 1.4,
            (Self::Dog, LifeStage::Adult, PetActivity::Low) => 1.4,
            (Self::Dog, LifeStage::Adult, PetActivity::Moderate) => 1.6,
            (Self::Dog, LifeStage::Adult, PetActivity::High) => 2.0,
            (Self::Cat, LifeStage::Young, _) => 2.5,
            (Self::Cat, LifeStage::Senior, _) => 1.1,
            (Self::Cat, LifeStage::Adult, PetActivity::Low) => 1.2,
            (Self::Cat, LifeStage::Adult, PetActivity::Moderate) => 1.4,
            (Self::Cat, LifeStage::Adult, PetActivity::High) => 1.6,
        }
    }

    fn meals_per_day(self, stage: LifeStage) -> u32 {
        match (self, stage) {
            (Self::Dog, LifeStage::Young) => 3,
            (Self::Cat, LifeStage::Young) => 4,
            _ => 2,
        }
    }
}

/// Inputs of the pet food calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetFoodInputs {
    pub pet_type: PetType,
    /// Body weight in kilograms (metric) or pounds (imperial).
    pub weight: f64,
    /// Age in years.
    pub age: f64,
    #[serde(default)]
    pub activity_level: PetActivity,
    #[serde(default)]
    pub unit: Unit,
    #[serde(default)]
    pub food_type: FoodType,
}

impl FromFields for PetFoodInputs {
    fn from_fields(fields: &FormFields) -> Result<Self, ParseError> {
        Ok(Self {
            pet_type: fields.choice("petType")?,
            weight: fields.number("weight")?,
            age: fields.number("age")?,
            activity_level: fields.choice_or("activityLevel", PetActivity::Moderate)?,
            unit: fields.choice_or("unit", Unit::Metric)?,
            food_type: fields.choice_or("foodType", FoodType::Dry)?,
        })
    }
}

/// Results of the pet food calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetFoodResults {
    pub daily_calories: f64,
    /// Daily food in grams (metric) or ounces (imperial).
    pub food_amount: f64,
    pub meals_per_day: u32,
    pub amount_per_meal: f64,
}

/// Resting energy requirement in kcal/day.
#[must_use]
pub fn resting_energy_requirement(weight_kg: f64) -> f64 {
    70.0 * weight_kg.powf(0.75)
}

/// Compute daily calories and portion sizes.
pub fn calculate_pet_food(inputs: &PetFoodInputs) -> Result<PetFoodResults, CalcError> {
    ensure_positive("weight", inputs.weight)?;
    ensure_non_negative("age", inputs.age)?;

    let weight_kg = inputs.unit.weight_to_kg(inputs.weight);
    let stage = inputs.pet_type.life_stage(inputs.age);
    let factor = inputs.pet_type.energy_factor(stage, inputs.activity_level);
    let daily_calories = (resting_energy_requirement(weight_kg) * factor).round();
    tracing::trace!(?stage, factor, "pet energy factor");

    let grams = daily_calories / inputs.food_type.kcal_per_gram();
    let food_amount = inputs.unit.grams_to_local(grams);
    let meals_per_day = inputs.pet_type.meals_per_day(stage);

    Ok(PetFoodResults {
        daily_calories,
        food_amount,
        meals_per_day,
        amount_per_meal: food_amount / f64::from(meals_per_day),
    })
}

/// Registry adapter for [`calculate_pet_food`].
#[derive(Debug, Default, Clone, Copy)]
pub struct PetFoodCalculator;

impl CoreCalculator for PetFoodCalculator {
    type Inputs = PetFoodInputs;
    type Results = PetFoodResults;

    fn name(&self) -> &'static str {
        "pet-food"
    }

    fn description(&self) -> &'static str {
        "Daily calories and food portions for dogs and cats"
    }

    fn calculate_core(&self, inputs: &PetFoodInputs) -> Result<PetFoodResults, CalcError> {
        calculate_pet_food(inputs)
    }
}
