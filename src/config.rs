use crate::{machine::change::DEFAULT_DENOMINATIONS, types::Coin};
use serde::{Deserialize, Serialize};
use std::io;
use thiserror::Error;

/// Products a machine is stocked with unless configured otherwise: name, price, stock.
pub const DEFAULT_PRODUCTS: [(&str, f64, u32); 3] =
    [("snickers", 1.2, 10), ("mars", 1.3, 10), ("twix", 1.0, 10)];

#[derive(Error, Debug)]
pub enum Error {
    #[error("bad catalog: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub stock: u32,
}

/// Everything a machine starts with. Validated by `VendingMachine::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub denominations: Vec<Coin>,
    pub catalog: Vec<ProductConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            denominations: DEFAULT_DENOMINATIONS.to_vec(),
            catalog: DEFAULT_PRODUCTS
                .iter()
                .map(|&(name, price, stock)| ProductConfig {
                    name: name.to_owned(),
                    price,
                    stock,
                })
                .collect(),
        }
    }
}

impl Config {
    /// The default denominations, with a catalog read from `name,price,stock` CSV.
    pub fn from_catalog_reader(reader: impl io::Read) -> Result<Self, Error> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let catalog = csv_reader
            .deserialize()
            .collect::<Result<Vec<ProductConfig>, _>>()?;
        Ok(Self {
            catalog,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_products() {
        let config = Config::default();
        assert_eq!(config.denominations, vec![0.05, 0.1, 0.2, 0.5, 1.0, 2.0]);
        assert_eq!(
            config.catalog[0],
            ProductConfig {
                name: "snickers".to_owned(),
                price: 1.2,
                stock: 10
            }
        );
        assert_eq!(config.catalog.len(), 3);
    }

    #[test]
    fn catalog_from_csv() {
        let data = "name, price, stock\nCoke, 1.5, 4\nwater, 0.8, 0\n";
        let config = Config::from_catalog_reader(data.as_bytes()).unwrap();
        assert_eq!(
            config.catalog,
            vec![
                ProductConfig {
                    name: "Coke".to_owned(),
                    price: 1.5,
                    stock: 4
                },
                ProductConfig {
                    name: "water".to_owned(),
                    price: 0.8,
                    stock: 0
                },
            ]
        );
        assert_eq!(config.denominations, Config::default().denominations);
    }

    #[test]
    fn catalog_stock_column_is_optional() {
        let data = "name,price\ngum,0.25\n";
        let config = Config::from_catalog_reader(data.as_bytes()).unwrap();
        assert_eq!(
            config.catalog,
            vec![ProductConfig {
                name: "gum".to_owned(),
                price: 0.25,
                stock: 0
            }]
        );
    }

    #[test]
    fn catalog_from_bad_csv() {
        let data = "name,price,stock\ncoke,cheap,1\n";
        let error = Config::from_catalog_reader(data.as_bytes()).unwrap_err();
        assert!(error.to_string().starts_with("bad catalog"));
    }
}
