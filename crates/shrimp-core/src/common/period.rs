//! Cycle normalization.
//!
//! Every sub-model works in "days of the accounting period". A `cycle` period
//! takes its length from `cycle_days`; an `annual` period is fixed at 365 days
//! and the supplied quantities are read as already annual.

use super::constants::DAYS_PER_YEAR;
use crate::domain::{FootprintError, FootprintResult, Period};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountingCycle {
    period: Period,
    days: u32,
}

impl AccountingCycle {
    pub fn normalize(period: Period, cycle_days: Option<u32>) -> FootprintResult<Self> {
        let days = normalize_cycle_days(period, cycle_days, "INPUT.CYCLE_DAYS")?;
        Ok(Self { period, days })
    }

    pub const fn period(&self) -> Period {
        self.period
    }

    pub const fn days(&self) -> u32 {
        self.days
    }

    pub fn fraction_of_year(&self) -> f64 {
        f64::from(self.days) / f64::from(DAYS_PER_YEAR)
    }

    /// Day count a sub-model should integrate over.
    ///
    /// Without an override the top-level cycle applies. An override may cover
    /// part of the cycle (aerators running only during grow-out, say) but never
    /// more days than the cycle itself.
    pub fn days_for(
        &self,
        sub_period: Option<&SubPeriod>,
        placeholder: &'static str,
    ) -> FootprintResult<u32> {
        let Some(sub_period) = sub_period else {
            return Ok(self.days);
        };

        let days = normalize_cycle_days(sub_period.period, sub_period.cycle_days, placeholder)?;
        if days > self.days {
            return Err(FootprintError::invalid_period(
                placeholder,
                format!(
                    "sub-period of {} days ({}) cannot be reconciled with the {} day {} accounting period",
                    days, sub_period.period, self.days, self.period
                ),
            ));
        }
        Ok(days)
    }
}

/// Per-sub-model accounting period, reconciled against the top-level cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubPeriod {
    pub period: Period,
    #[serde(default)]
    pub cycle_days: Option<u32>,
}

impl SubPeriod {
    pub const fn cycle(cycle_days: u32) -> Self {
        Self {
            period: Period::Cycle,
            cycle_days: Some(cycle_days),
        }
    }
}

pub fn normalize_cycle_days(
    period: Period,
    cycle_days: Option<u32>,
    placeholder: &'static str,
) -> FootprintResult<u32> {
    match period {
        Period::Annual => Ok(DAYS_PER_YEAR),
        Period::Cycle => match cycle_days {
            Some(days) if days > 0 => Ok(days),
            Some(_) => Err(FootprintError::invalid_period(
                placeholder,
                "cycle_days must be a positive integer when period is 'cycle', got 0",
            )),
            None => Err(FootprintError::invalid_period(
                placeholder,
                "cycle_days is required when period is 'cycle'",
            )),
        },
    }
}
