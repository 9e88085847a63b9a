use crate::{
    machine::{catalog, change},
    types::Coin,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("catalog error: {0}")]
    Catalog(#[from] catalog::Error),
    #[error("change error: {0}")]
    Change(#[from] change::Error),
}

/// A coin the machine does not take, handed back to the customer.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
#[error("Coin type not accepted: {0}")]
pub struct RejectedCoin(pub Coin);
