use crate::{money, types::Coin};
use log::debug;
use thiserror::Error;

pub const DEFAULT_DENOMINATIONS: [Coin; 6] = [0.05, 0.1, 0.2, 0.5, 1.0, 2.0];

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("invalid denomination: {value}")]
    InvalidDenomination { value: f64 },
    #[error("no denominations configured")]
    NoDenominations,
    #[error("cannot make change, {remainder} left over")]
    Unrepresentable { remainder: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Denomination {
    value: Coin,
    cents: i64,
}

/// The coin values a machine accepts, ascending by value.
#[derive(Debug, Clone, PartialEq)]
pub struct Denominations {
    inner: Vec<Denomination>,
}

impl Denominations {
    /// Each value must be positive and a whole number of cents. Duplicates are collapsed.
    pub fn new(values: &[Coin]) -> Result<Self, Error> {
        let mut inner = Vec::with_capacity(values.len());
        for &value in values {
            let cents = money::exact_cents(value)
                .filter(|cents| *cents > 0)
                .ok_or(Error::InvalidDenomination { value })?;
            inner.push(Denomination {
                value: money::from_cents(cents),
                cents,
            });
        }
        if inner.is_empty() {
            return Err(Error::NoDenominations);
        }
        inner.sort_by_key(|denomination| denomination.cents);
        inner.dedup_by_key(|denomination| denomination.cents);
        Ok(Self { inner })
    }

    pub fn accepts(&self, coin: Coin) -> bool {
        self.inner.iter().any(|denomination| denomination.value == coin)
    }

    pub fn values(&self) -> impl Iterator<Item = Coin> + '_ {
        self.inner.iter().map(|denomination| denomination.value)
    }

    /// Greedy change for `amount`, largest coins first.
    ///
    /// Works in whole cents, taking as many of each denomination as fit in a
    /// single descending pass. Anything left once the smallest denomination
    /// has been used cannot be paid out, and is an error rather than a
    /// short-changed customer.
    pub fn make_change(&self, amount: f64) -> Result<Vec<Coin>, Error> {
        let mut remainder = money::to_cents(amount)
            .filter(|cents| *cents >= 0)
            .ok_or(Error::Unrepresentable { remainder: amount })?;

        let mut change = Vec::new();
        for denomination in self.inner.iter().rev() {
            let count = remainder / denomination.cents;
            remainder -= count * denomination.cents;
            change.extend(std::iter::repeat(denomination.value).take(count as usize));
        }

        if remainder != 0 {
            return Err(Error::Unrepresentable {
                remainder: money::from_cents(remainder),
            });
        }
        debug!("Change for {:.2}: {:?}", amount, change);
        Ok(change)
    }
}

impl Default for Denominations {
    fn default() -> Self {
        Self {
            inner: DEFAULT_DENOMINATIONS
                .iter()
                .map(|&value| Denomination {
                    value,
                    cents: (value * money::CENTS_PER_UNIT as f64).round() as i64,
                })
                .collect(),
        }
    }
}
