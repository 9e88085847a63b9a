use std::fmt;

/// Face value of a single coin, in currency units (e.g. `0.05`, `2.0`).
pub type Coin = f64;

/// A product name, normalized so lookups are case-insensitive.
///
/// Surrounding whitespace is dropped too, so `" Twix "` names `twix`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductName {
    fn from(other: &str) -> Self {
        Self::new(other)
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub mod action {
    use crate::types::Coin;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Action {
        InsertCoin(Coin),
        Buy { product: String },
        Refund,
        Restock(Restock),
        SetPrice { product: String, price: f64 },
        Remove { product: String },
    }

    #[derive(Debug, Clone, PartialEq)]
    pub struct Restock {
        pub product: String,
        pub quantity: u32,
        // required when the product is not yet in the catalog
        pub price: Option<f64>,
    }
}
