use crate::machine::catalog;
use crate::types::{action, ProductName};
use serde::{Deserialize, Serialize};

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("bad action kind: {kind}")]
    BadActionKind { kind: String },
    #[error("missing {field} for action {kind}")]
    MissingField { kind: String, field: &'static str },
}

/// One step of a scripted session, e.g. `insert,0.5,,,` or `restock,,coke,3,1.5`.
#[derive(Debug, Deserialize)]
pub struct InputRow {
    // type is a rust keyword, so rename here (better than r#... everywhere)
    #[serde(rename = "type")]
    pub kind: String,
    pub coin: Option<f64>,
    pub product: Option<String>,
    pub quantity: Option<u32>,
    pub price: Option<f64>,
}

impl TryFrom<InputRow> for action::Action {
    type Error = Error;
    fn try_from(other: InputRow) -> Result<Self, Error> {
        let InputRow {
            kind,
            coin,
            product,
            quantity,
            price,
        } = other;
        let require = |value: Option<String>, field| {
            value.ok_or_else(|| Error::MissingField {
                kind: kind.clone(),
                field,
            })
        };
        let action = match kind.as_str() {
            "insert" => {
                let coin = coin.ok_or_else(|| Error::MissingField {
                    kind: kind.clone(),
                    field: "coin",
                })?;
                action::Action::InsertCoin(coin)
            }
            "buy" => action::Action::Buy {
                product: require(product, "product")?,
            },
            "refund" => action::Action::Refund,
            "restock" => action::Action::Restock(action::Restock {
                product: require(product, "product")?,
                quantity: quantity.unwrap_or(0),
                price,
            }),
            "price" => {
                let product = require(product, "product")?;
                let price = price.ok_or_else(|| Error::MissingField {
                    kind: kind.clone(),
                    field: "price",
                })?;
                action::Action::SetPrice { product, price }
            }
            "remove" => action::Action::Remove {
                product: require(product, "product")?,
            },
            _ => return Err(Error::BadActionKind { kind }),
        };
        Ok(action)
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogRow {
    pub name: String,
    pub price: String,
    pub stock: u32,
}

impl From<(&ProductName, &catalog::Entry)> for CatalogRow {
    fn from((name, entry): (&ProductName, &catalog::Entry)) -> Self {
        Self {
            name: name.to_string(),
            price: format!("{:.2}", entry.price),
            stock: entry.stock,
        }
    }
}
