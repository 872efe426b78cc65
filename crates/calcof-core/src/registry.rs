//! Calculator factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::bmi::BmiCalculator;
use crate::calculator::{CalcError, Calculator, FormCalculator};
use crate::calorie::CalorieCalculator;
use crate::fraction::{DecimalToFractionCalculator, FractionCalculator};
use crate::loan::LoanCalculator;
use crate::percentage::PercentageCalculator;
use crate::pet_food::PetFoodCalculator;
use crate::retirement::RetirementCalculator;
use crate::roi::RoiCalculator;

/// Names of all registered calculators, in listing order.
pub const CALCULATOR_NAMES: [&str; 9] = [
    "fraction",
    "decimal-to-fraction",
    "percentage",
    "roi",
    "loan",
    "retirement",
    "bmi",
    "calorie",
    "pet-food",
];

/// Factory trait for creating calculators.
pub trait CalculatorFactory: Send + Sync {
    /// Get or create a calculator by name.
    fn get(&self, name: &str) -> Result<Arc<dyn Calculator>, CalcError>;

    /// List all available calculator names.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    cache: RwLock<HashMap<String, Arc<dyn Calculator>>>,
}

impl DefaultFactory {
    /// Create a new default factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn create_calculator(name: &str) -> Result<Arc<dyn Calculator>, CalcError> {
        let calc: Arc<dyn Calculator> = match name {
            "fraction" | "fractions" => Arc::new(FormCalculator::new(FractionCalculator)),
            "decimal-to-fraction" | "decimal" => {
                Arc::new(FormCalculator::new(DecimalToFractionCalculator))
            }
            "percentage" | "percent" => Arc::new(FormCalculator::new(PercentageCalculator)),
            "roi" => Arc::new(FormCalculator::new(RoiCalculator)),
            "loan" => Arc::new(FormCalculator::new(LoanCalculator)),
            "retirement" => Arc::new(FormCalculator::new(RetirementCalculator)),
            "bmi" => Arc::new(FormCalculator::new(BmiCalculator)),
            "calorie" | "calories" => Arc::new(FormCalculator::new(CalorieCalculator)),
            "pet-food" | "petfood" => Arc::new(FormCalculator::new(PetFoodCalculator)),
            _ => return Err(CalcError::UnknownCalculator(name.to_string())),
        };
        Ok(calc)
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn Calculator>, CalcError> {
        let key = name.trim().to_ascii_lowercase().replace('_', "-");

        // Check cache first
        if let Some(calc) = self.cache.read().get(&key) {
            return Ok(Arc::clone(calc));
        }

        // Create and cache
        let calc = Self::create_calculator(&key)?;
        tracing::debug!(calculator = calc.name(), "created calculator");
        self.cache.write().insert(key, Arc::clone(&calc));
        Ok(calc)
    }

    fn available(&self) -> Vec<&str> {
        CALCULATOR_NAMES.to_vec()
    }
}
