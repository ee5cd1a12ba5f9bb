use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors describing a malformed [`MarginalBracketSchedule`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The schedule contains no brackets.
    #[error("bracket schedule '{0}' has no brackets")]
    Empty(String),

    /// A bound is not strictly greater than the one before it.
    #[error("bracket schedule '{schedule}' bound {bound} does not exceed the previous bound")]
    NonIncreasingBound { schedule: String, bound: Decimal },

    /// The last bracket has an upper bound.
    #[error("bracket schedule '{0}' must end with an unbounded bracket")]
    BoundedTopBracket(String),

    /// An unbounded bracket appears before the last position.
    #[error("bracket schedule '{0}' has an unbounded bracket before the last position")]
    UnboundedBracketNotLast(String),

    /// A bracket rate lies outside [0, 1].
    #[error("bracket schedule '{schedule}' rate {rate} must be between 0 and 1")]
    InvalidRate { schedule: String, rate: Decimal },
}

/// One band of a marginal schedule.
///
/// The band covers income from the previous bracket's upper bound (or zero)
/// up to and including `upper_bound`. `None` marks the unbounded top bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// An ordered marginal-rate schedule (federal or state).
///
/// Construct through [`MarginalBracketSchedule::new`], which enforces
/// strictly increasing bounds and an unbounded final bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarginalBracketSchedule {
    name: String,
    brackets: Vec<TaxBracket>,
}

impl MarginalBracketSchedule {
    /// Builds a validated schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScheduleError`] if the brackets are empty, a bound is not
    /// strictly greater than the one before it, a rate lies outside [0, 1],
    /// or the unbounded bracket is missing or not last.
    pub fn new(
        name: impl Into<String>,
        brackets: Vec<TaxBracket>,
    ) -> Result<Self, ScheduleError> {
        let schedule = Self {
            name: name.into(),
            brackets,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Re-checks the structural invariants. Deserialized schedules bypass
    /// [`MarginalBracketSchedule::new`], so configuration validation calls
    /// this directly.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let Some((last, rest)) = self.brackets.split_last() else {
            return Err(ScheduleError::Empty(self.name.clone()));
        };

        let mut previous = Decimal::ZERO;
        for bracket in rest {
            let bound = bracket
                .upper_bound
                .ok_or_else(|| ScheduleError::UnboundedBracketNotLast(self.name.clone()))?;
            if bound <= previous {
                return Err(ScheduleError::NonIncreasingBound {
                    schedule: self.name.clone(),
                    bound,
                });
            }
            previous = bound;
        }

        if last.upper_bound.is_some() {
            return Err(ScheduleError::BoundedTopBracket(self.name.clone()));
        }

        if let Some(bad) = self
            .brackets
            .iter()
            .find(|b| b.rate < Decimal::ZERO || b.rate > Decimal::ONE)
        {
            return Err(ScheduleError::InvalidRate {
                schedule: self.name.clone(),
                rate: bad.rate,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn new_accepts_well_formed_schedule() {
        let result = MarginalBracketSchedule::new(
            "test",
            vec![
                TaxBracket::bounded(dec!(10000), dec!(0.10)),
                TaxBracket::bounded(dec!(20000), dec!(0.20)),
                TaxBracket::unbounded(dec!(0.30)),
            ],
        );

        assert!(result.is_ok());
    }

    #[test]
    fn new_rejects_empty_schedule() {
        let result = MarginalBracketSchedule::new("empty", vec![]);

        assert_eq!(result, Err(ScheduleError::Empty("empty".to_string())));
    }

    #[test]
    fn new_rejects_non_increasing_bounds() {
        let result = MarginalBracketSchedule::new(
            "test",
            vec![
                TaxBracket::bounded(dec!(20000), dec!(0.10)),
                TaxBracket::bounded(dec!(20000), dec!(0.20)),
                TaxBracket::unbounded(dec!(0.30)),
            ],
        );

        assert_eq!(
            result,
            Err(ScheduleError::NonIncreasingBound {
                schedule: "test".to_string(),
                bound: dec!(20000),
            })
        );
    }

    #[test]
    fn new_rejects_bounded_top_bracket() {
        let result =
            MarginalBracketSchedule::new("test", vec![TaxBracket::bounded(dec!(10000), dec!(0.10))]);

        assert_eq!(
            result,
            Err(ScheduleError::BoundedTopBracket("test".to_string()))
        );
    }

    #[test]
    fn new_rejects_unbounded_bracket_in_the_middle() {
        let result = MarginalBracketSchedule::new(
            "test",
            vec![
                TaxBracket::unbounded(dec!(0.10)),
                TaxBracket::unbounded(dec!(0.20)),
            ],
        );

        assert_eq!(
            result,
            Err(ScheduleError::UnboundedBracketNotLast("test".to_string()))
        );
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let result = MarginalBracketSchedule::new(
            "test",
            vec![
                TaxBracket::bounded(dec!(10000), dec!(0.10)),
                TaxBracket::unbounded(dec!(1.5)),
            ],
        );

        assert_eq!(
            result,
            Err(ScheduleError::InvalidRate {
                schedule: "test".to_string(),
                rate: dec!(1.5),
            })
        );
    }
}
