use serde::{Deserialize, Serialize};

/// Threshold configuration for the scholarship tiers.
///
/// Grades are percentages, incomes are annual rupees. The defaults carry the
/// published program thresholds; program labels render from these values so
/// the text always matches the configured rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityConfig {
    pub merit_grade: f64,
    pub top_performer_grade: f64,
    pub need_based_income: f64,
    pub below_poverty_income: f64,
    pub middle_class_grade: f64,
    pub middle_class_income: f64,
    pub social_welfare_grade: f64,
    pub social_welfare_income: f64,
    pub general_grade: f64,
    pub general_income: f64,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            merit_grade: 85.0,
            top_performer_grade: 90.0,
            need_based_income: 250_000.0,
            below_poverty_income: 150_000.0,
            middle_class_grade: 75.0,
            middle_class_income: 500_000.0,
            social_welfare_grade: 60.0,
            social_welfare_income: 200_000.0,
            general_grade: 50.0,
            general_income: 800_000.0,
        }
    }
}

impl EligibilityConfig {
    /// Annual rupee amount rendered in lakhs for program labels: `2.5L`, `8L`.
    pub(crate) fn lakh(amount: f64) -> String {
        format!("{}L", amount / 100_000.0)
    }
}
