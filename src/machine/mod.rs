use crate::{
    config::{Config, DEFAULT_PRODUCTS},
    money,
    types::{action, Coin, ProductName},
};
use log::{debug, info, warn};
use std::fmt;

pub mod catalog;
pub mod change;
pub mod error;

use catalog::Catalog;
use change::Denominations;
use error::{Error, RejectedCoin};

/// The result of trying to buy a product.
#[derive(Debug, Clone, PartialEq)]
pub enum Purchase {
    /// The deposit was spent; `change` is what it exceeded the price by.
    Sold {
        change: Vec<Coin>,
        product: ProductName,
    },
    /// Unknown or sold out. The deposit is left in the machine, `deposit` is a copy of it.
    Unavailable {
        deposit: Vec<Coin>,
        product: ProductName,
    },
    /// The deposit does not cover the price. It is left in the machine, `deposit` is a copy of it.
    InsufficientFunds {
        deposit: Vec<Coin>,
        product: ProductName,
        price: f64,
        missing: f64,
    },
}

impl Purchase {
    /// The coins handed back, and the product handed out if any.
    pub fn into_parts(self) -> (Vec<Coin>, Option<ProductName>) {
        match self {
            Self::Sold { change, product } => (change, Some(product)),
            Self::Unavailable { deposit, .. } | Self::InsufficientFunds { deposit, .. } => {
                (deposit, None)
            }
        }
    }

    pub fn is_sold(&self) -> bool {
        matches!(self, Self::Sold { .. })
    }
}

impl fmt::Display for Purchase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sold { change, product } => write!(f, "sold '{product}', change {change:?}"),
            Self::Unavailable { product, .. } => write!(f, "'{product}' is not available"),
            Self::InsufficientFunds {
                product, missing, ..
            } => write!(f, "insufficient funds for '{product}', {missing:.2} missing"),
        }
    }
}

/// The result of applying an [`action::Action`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(Coin),
    Rejected(RejectedCoin),
    Purchase(Purchase),
    Refunded(Vec<Coin>),
    Stocked {
        product: ProductName,
        entry: catalog::Entry,
    },
    Removed {
        product: ProductName,
    },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted(coin) => write!(f, "accepted {coin}"),
            Self::Rejected(rejected) => write!(f, "{rejected}"),
            Self::Purchase(purchase) => write!(f, "{purchase}"),
            Self::Refunded(coins) => write!(f, "refunded {coins:?}"),
            Self::Stocked { product, entry } => write!(
                f,
                "'{product}' stocked, {} at {:.2}",
                entry.stock, entry.price
            ),
            Self::Removed { product } => write!(f, "removed '{product}'"),
        }
    }
}

/// A coin operated vending machine.
///
/// Coins are collected into a deposit until it is spent on a product or
/// handed back. The machine is a plain single-owner value; share it across
/// threads only behind your own lock.
#[derive(Debug, Clone, PartialEq)]
pub struct VendingMachine {
    denominations: Denominations,
    deposit: Vec<Coin>,
    catalog: Catalog,
}

impl Default for VendingMachine {
    fn default() -> Self {
        Self {
            denominations: Denominations::default(),
            deposit: Vec::new(),
            catalog: Catalog::from_trusted(&DEFAULT_PRODUCTS),
        }
    }
}

impl VendingMachine {
    pub fn new(config: Config) -> Result<Self, Error> {
        let Config {
            denominations,
            catalog: products,
        } = config;
        let denominations = Denominations::new(&denominations)?;
        let mut catalog = Catalog::default();
        for product in products {
            catalog.restock(
                ProductName::new(&product.name),
                product.stock,
                Some(product.price),
            )?;
        }
        Ok(Self {
            denominations,
            deposit: Vec::new(),
            catalog,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Coins inserted since the last purchase or refund, in insertion order.
    pub fn deposit(&self) -> &[Coin] {
        &self.deposit
    }

    pub fn deposit_sum(&self) -> f64 {
        money::sum(&self.deposit)
    }

    /// Add a coin to the deposit, or hand it straight back if it is not accepted.
    pub fn insert_coin(&mut self, coin: Coin) -> Result<(), RejectedCoin> {
        if !self.denominations.accepts(coin) {
            warn!("Coin type not accepted: {}", coin);
            return Err(RejectedCoin(coin));
        }
        self.deposit.push(coin);
        debug!("Accepted {}, deposit now {:.2}", coin, self.deposit_sum());
        Ok(())
    }

    /// Spend the deposit on `name`.
    ///
    /// Only a sale consumes the deposit. Unknown or sold out products, and
    /// deposits short of the price, leave it in the machine to be topped up
    /// or refunded. If the change cannot be paid out in accepted coins the
    /// sale does not happen and the error is returned.
    pub fn buy_product(&mut self, name: &str) -> Result<Purchase, Error> {
        let product = ProductName::new(name);
        let price = match self.catalog.available(&product) {
            Some(entry) => entry.price,
            None => {
                let purchase = Purchase::Unavailable {
                    deposit: self.deposit.clone(),
                    product,
                };
                warn!("{}", purchase);
                return Ok(purchase);
            }
        };

        let excess = money::truncate(self.deposit_sum() - price, 2);
        if excess < 0.0 {
            let purchase = Purchase::InsufficientFunds {
                deposit: self.deposit.clone(),
                product,
                price,
                missing: -excess,
            };
            warn!("{}", purchase);
            return Ok(purchase);
        }

        // Nothing is mutated until the change is known to be payable.
        let change = self.denominations.make_change(excess)?;
        self.catalog.take_one(&product)?;
        self.deposit.clear();

        let purchase = Purchase::Sold { change, product };
        info!("{}", purchase);
        Ok(purchase)
    }

    /// Hand back every coin in the deposit, leaving it empty.
    pub fn get_deposit_back(&mut self) -> Vec<Coin> {
        let deposit = std::mem::take(&mut self.deposit);
        if !deposit.is_empty() {
            info!("Refunding {:?}", deposit);
        }
        deposit
    }

    /// Restock `name` by `quantity`, repricing it if `price` is given.
    ///
    /// New products need a price. Returns the updated catalog.
    pub fn add_product_to_list(
        &mut self,
        name: &str,
        quantity: u32,
        price: Option<f64>,
    ) -> Result<&Catalog, Error> {
        self.stock(name, quantity, price)?;
        Ok(&self.catalog)
    }

    /// Set the price of `name`, keeping its stock.
    ///
    /// A new product is listed with no stock, so it reports as not available
    /// until restocked with [`add_product_to_list`](Self::add_product_to_list).
    /// Returns the updated catalog.
    pub fn set_product_price(&mut self, name: &str, price: f64) -> Result<&Catalog, Error> {
        self.price(name, price)?;
        Ok(&self.catalog)
    }

    fn stock(
        &mut self,
        name: &str,
        quantity: u32,
        price: Option<f64>,
    ) -> Result<(ProductName, catalog::Entry), Error> {
        let product = ProductName::new(name);
        let entry = self
            .catalog
            .restock(product.clone(), quantity, price)?
            .clone();
        info!(
            "Stocked '{}', {} at {:.2}",
            product, entry.stock, entry.price
        );
        Ok((product, entry))
    }

    fn price(&mut self, name: &str, price: f64) -> Result<(ProductName, catalog::Entry), Error> {
        let product = ProductName::new(name);
        let entry = self.catalog.set_price(product.clone(), price)?.clone();
        info!("Priced '{}' at {:.2}", product, entry.price);
        Ok((product, entry))
    }

    pub fn remove_product_from_list(&mut self, name: &str) -> Result<(), Error> {
        self.catalog.remove(name)?;
        info!("Removed '{}'", ProductName::new(name));
        Ok(())
    }

    /// Apply a single action. Rejected coins and failed purchases are
    /// outcomes, not errors; errors leave the machine unchanged.
    pub fn apply(&mut self, action: action::Action) -> Result<Outcome, Error> {
        use action::Action;

        let outcome = match action {
            Action::InsertCoin(coin) => match self.insert_coin(coin) {
                Ok(()) => Outcome::Accepted(coin),
                Err(rejected) => Outcome::Rejected(rejected),
            },
            Action::Buy { product } => Outcome::Purchase(self.buy_product(&product)?),
            Action::Refund => Outcome::Refunded(self.get_deposit_back()),
            Action::Restock(action::Restock {
                product,
                quantity,
                price,
            }) => {
                let (product, entry) = self.stock(&product, quantity, price)?;
                Outcome::Stocked { product, entry }
            }
            Action::SetPrice { product, price } => {
                let (product, entry) = self.price(&product, price)?;
                Outcome::Stocked { product, entry }
            }
            Action::Remove { product } => {
                self.remove_product_from_list(&product)?;
                Outcome::Removed {
                    product: ProductName::new(&product),
                }
            }
        };
        Ok(outcome)
    }
}
