use super::config::EligibilityConfig;
use crate::portal::scholarship::domain::EligibilityVerdict;

/// Ordered, non-exclusive tier table.
///
/// Tiers never short-circuit: several can fire for the same inputs and each
/// appends its own program label, so overlapping suggestions are expected.
/// The general tier is the one ordering-sensitive rule: it only adds its
/// label when no earlier tier already has.
pub(crate) fn run_tiers(grade: f64, income: f64, config: &EligibilityConfig) -> EligibilityVerdict {
    let mut verdict = EligibilityVerdict {
        eligible: false,
        suggestions: Vec::new(),
        reason: String::new(),
    };

    // Merit-based tiers
    if grade >= config.merit_grade {
        verdict.eligible = true;
        verdict
            .suggestions
            .push(format!("Merit Scholarship ({}%+ grades)", config.merit_grade));
    }

    if grade >= config.top_performer_grade {
        verdict.suggestions.push(format!(
            "Top Performer Scholarship ({}%+ grades)",
            config.top_performer_grade
        ));
    }

    // Need-based tiers
    if income <= config.need_based_income {
        verdict.eligible = true;
        verdict.suggestions.push(format!(
            "Need-Based Scholarship (Family income ≤ ₹{})",
            EligibilityConfig::lakh(config.need_based_income)
        ));
    }

    if income <= config.below_poverty_income {
        verdict.suggestions.push(format!(
            "Below Poverty Line Scholarship (Family income ≤ ₹{})",
            EligibilityConfig::lakh(config.below_poverty_income)
        ));
    }

    // Combined criteria
    if grade >= config.middle_class_grade && income <= config.middle_class_income {
        verdict.eligible = true;
        verdict.suggestions.push(format!(
            "Middle Class Merit Scholarship ({}%+ grades, income ≤ ₹{})",
            config.middle_class_grade,
            EligibilityConfig::lakh(config.middle_class_income)
        ));
    }

    if grade >= config.social_welfare_grade && income <= config.social_welfare_income {
        verdict.eligible = true;
        verdict.suggestions.push(format!(
            "Social Welfare Scholarship ({}%+ grades, income ≤ ₹{})",
            config.social_welfare_grade,
            EligibilityConfig::lakh(config.social_welfare_income)
        ));
    }

    // General tier, suggested only when nothing more specific fired
    if grade >= config.general_grade && income <= config.general_income {
        verdict.eligible = true;
        if verdict.suggestions.is_empty() {
            verdict.suggestions.push(format!(
                "General Scholarship ({}%+ grades, income ≤ ₹{})",
                config.general_grade,
                EligibilityConfig::lakh(config.general_income)
            ));
        }
    }

    if !verdict.eligible {
        verdict.reason = if grade < config.general_grade {
            format!(
                "Grade percentage below minimum requirement ({}%)",
                config.general_grade
            )
        } else if income > config.general_income {
            format!(
                "Family income exceeds eligibility threshold (₹{}/year)",
                EligibilityConfig::lakh(config.general_income)
            )
        } else {
            "Does not meet combined eligibility criteria".to_string()
        };
    }

    verdict
}
