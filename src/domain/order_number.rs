use std::ops::RangeInclusive;

use chrono::NaiveDate;
use rand::Rng;

use super::errors::DomainError;
use super::order::OrderNumber;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 16;

const SUFFIX_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// Outcome of trying to use one candidate number.
#[derive(Debug)]
pub enum Claim<T> {
    Taken,
    Claimed(T),
}

/// Draws `SP-YYYYMMDD-NNNNNN` candidates until one is claimed or the
/// attempt budget runs out.
///
/// The randomness source is supplied per call so nothing is shared between
/// requests.
#[derive(Debug, Clone, Copy)]
pub struct OrderNumberGenerator {
    max_attempts: u32,
}

impl Default for OrderNumberGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

impl OrderNumberGenerator {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn candidate<R: Rng>(rng: &mut R, date: NaiveDate) -> OrderNumber {
        OrderNumber::new(date, rng.gen_range(SUFFIX_RANGE))
    }

    /// Hands successive candidates to `try_claim` until it reports
    /// `Claimed`. A `Taken` result counts against the budget; an error
    /// aborts immediately.
    pub fn allocate<R, T, F>(
        &self,
        rng: &mut R,
        date: NaiveDate,
        mut try_claim: F,
    ) -> Result<T, DomainError>
    where
        R: Rng,
        F: FnMut(OrderNumber) -> Result<Claim<T>, DomainError>,
    {
        for attempt in 1..=self.max_attempts {
            let number = Self::candidate(rng, date);
            let shown = number.to_string();
            match try_claim(number)? {
                Claim::Claimed(value) => return Ok(value),
                Claim::Taken => {
                    log::warn!(
                        "Order number {} already taken (attempt {}/{})",
                        shown,
                        attempt,
                        self.max_attempts
                    );
                }
            }
        }
        Err(DomainError::OrderNumberExhausted(self.max_attempts))
    }

    /// Returns the first candidate for which `is_taken` reports false.
    pub fn generate<R, F>(
        &self,
        rng: &mut R,
        date: NaiveDate,
        mut is_taken: F,
    ) -> Result<OrderNumber, DomainError>
    where
        R: Rng,
        F: FnMut(&OrderNumber) -> Result<bool, DomainError>,
    {
        self.allocate(rng, date, |number| {
            Ok(if is_taken(&number)? {
                Claim::Taken
            } else {
                Claim::Claimed(number)
            })
        })
    }
}
