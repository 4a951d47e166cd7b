use crate::domain::model::{AgeStatistics, MAX_AGE, MIN_AGE};
use crate::utils::error::{AgeStatsError, Result};

/// Reduces validated ages to min / max / mean / count in one pass.
///
/// The mean is left unrounded; see [`round_to`].
pub fn calculate(ages: &[u64]) -> Result<AgeStatistics> {
    if ages.is_empty() {
        return Err(AgeStatsError::validation(
            "Cannot calculate statistics for empty ages list",
        ));
    }

    if let Some(age) = ages.iter().find(|age| !(MIN_AGE..=MAX_AGE).contains(*age)) {
        return Err(AgeStatsError::validation(format!(
            "Age {} is outside valid range ({}-{})",
            age, MIN_AGE, MAX_AGE
        )));
    }

    let mut min_age = u64::MAX;
    let mut max_age = u64::MIN;
    let mut sum: u64 = 0;

    for &age in ages {
        min_age = min_age.min(age);
        max_age = max_age.max(age);
        sum = sum.checked_add(age).ok_or_else(|| {
            AgeStatsError::calculation(format!("Sum of {} ages overflowed", ages.len()))
        })?;
    }

    let count = ages.len();
    let avg_age = sum as f64 / count as f64;

    tracing::info!(
        "Calculated statistics for {} ages: Min={}, Max={}, Avg={:.2}",
        count,
        min_age,
        max_age,
        avg_age
    );

    Ok(AgeStatistics {
        min_age,
        max_age,
        avg_age,
        count,
    })
}

/// Rounds half away from zero to `decimal_places` digits.
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor
}
