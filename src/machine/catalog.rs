use crate::{money, types::ProductName};
use indexmap::{map::Entry as MapEntry, IndexMap};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("No product found with name '{name}'")]
    ProductNotFound { name: String },
    #[error("missing required price for new product '{product}'")]
    MissingPrice { product: ProductName },
    #[error("zero price not allowed for '{product}'")]
    ZeroPrice { product: ProductName },
    #[error("invalid price for '{product}': {price}")]
    InvalidPrice { product: ProductName, price: f64 },
    #[error("'{product}' is out of stock")]
    OutOfStock { product: ProductName },
    #[error("cannot stock {quantity} more '{product}', {stock} already held")]
    StockOverflow {
        product: ProductName,
        stock: u32,
        quantity: u32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub price: f64,
    pub stock: u32,
}

impl Entry {
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

/// Sellable products by name, in the order they were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    inner: IndexMap<ProductName, Entry>,
}

impl Catalog {
    /// Build a catalog from entries already known to hold positive prices.
    pub(crate) fn from_trusted(products: &[(&str, f64, u32)]) -> Self {
        Self {
            inner: products
                .iter()
                .map(|&(name, price, stock)| {
                    (ProductName::new(name), Entry { price, stock })
                })
                .collect(),
        }
    }

    pub fn get(&self, product: &ProductName) -> Option<&Entry> {
        self.inner.get(product)
    }

    /// The entry for `product`, only if there is stock left to sell.
    pub fn available(&self, product: &ProductName) -> Option<&Entry> {
        self.get(product).filter(|entry| entry.is_available())
    }

    pub fn contains(&self, product: &ProductName) -> bool {
        self.inner.contains_key(product)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductName, &Entry)> {
        self.inner.iter()
    }

    /// Add `quantity` units of `product`, optionally repricing it.
    ///
    /// A product not yet in the catalog must come with a price. Stock is
    /// held as a `u32`; a restock that would overflow it is rejected.
    pub fn restock(
        &mut self,
        product: ProductName,
        quantity: u32,
        price: Option<f64>,
    ) -> Result<&Entry, Error> {
        let price = price
            .map(|price| validate_price(&product, price))
            .transpose()?;
        let entry = match self.inner.entry(product) {
            MapEntry::Occupied(occupied) => {
                let stock = occupied.get().stock;
                let stock = stock.checked_add(quantity).ok_or_else(|| Error::StockOverflow {
                    product: occupied.key().clone(),
                    stock,
                    quantity,
                })?;
                let entry = occupied.into_mut();
                entry.stock = stock;
                if let Some(price) = price {
                    entry.price = price;
                }
                entry
            }
            MapEntry::Vacant(vacant) => {
                let price = price.ok_or_else(|| Error::MissingPrice {
                    product: vacant.key().clone(),
                })?;
                vacant.insert(Entry {
                    price,
                    stock: quantity,
                })
            }
        };
        Ok(&*entry)
    }

    /// Set the price of `product`, keeping its stock, or adding it with no stock if it is new.
    pub fn set_price(&mut self, product: ProductName, price: f64) -> Result<&Entry, Error> {
        self.restock(product, 0, Some(price))
    }

    /// Remove `name` from the catalog. The error names the product as requested.
    pub fn remove(&mut self, name: &str) -> Result<Entry, Error> {
        self.inner
            .shift_remove(&ProductName::new(name))
            .ok_or_else(|| Error::ProductNotFound {
                name: name.to_owned(),
            })
    }

    /// Take one unit of `product` out of stock.
    pub fn take_one(&mut self, product: &ProductName) -> Result<(), Error> {
        let entry = self
            .inner
            .get_mut(product)
            .ok_or_else(|| Error::ProductNotFound {
                name: product.to_string(),
            })?;
        entry.stock = entry
            .stock
            .checked_sub(1)
            .ok_or_else(|| Error::OutOfStock {
                product: product.clone(),
            })?;
        Ok(())
    }
}

fn validate_price(product: &ProductName, price: f64) -> Result<f64, Error> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidPrice {
            product: product.clone(),
            price,
        });
    }
    let price = money::truncate(price, 2);
    if price == 0.0 {
        return Err(Error::ZeroPrice {
            product: product.clone(),
        });
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn catalog() -> Catalog {
        Catalog::from_trusted(&[("snickers", 1.2, 10), ("mars", 1.3, 0)])
    }

    #[test]
    fn restock_existing_keeps_price() {
        let mut catalog = catalog();
        let entry = catalog.restock("Snickers".into(), 5, None).unwrap();
        assert_eq!(entry, &Entry { price: 1.2, stock: 15 });
    }

    #[test]
    fn restock_existing_with_new_price() {
        let mut catalog = catalog();
        catalog.restock("snickers".into(), 1, Some(1.5)).unwrap();
        assert_eq!(
            catalog.get(&"snickers".into()),
            Some(&Entry { price: 1.5, stock: 11 })
        );
    }

    #[test]
    fn restock_new_product() {
        let mut catalog = catalog();
        catalog.restock("Coke".into(), 1, Some(1.5)).unwrap();
        assert_eq!(
            catalog.get(&"coke".into()),
            Some(&Entry { price: 1.5, stock: 1 })
        );
        assert_eq!(
            catalog.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
            vec!["snickers", "mars", "coke"]
        );
    }

    #[test]
    fn restock_new_product_needs_price() {
        let mut catalog = catalog();
        let error = catalog.restock("coke".into(), 1, None).unwrap_err();
        assert_eq!(
            error,
            Error::MissingPrice {
                product: "coke".into()
            }
        );
        assert!(!catalog.contains(&"coke".into()));
    }

    #[test]
    fn zero_price_rejected() {
        let mut catalog = catalog();
        let error = catalog.restock("coke".into(), 1, Some(0.0)).unwrap_err();
        assert_eq!(
            error,
            Error::ZeroPrice {
                product: "coke".into()
            }
        );
        assert!(error.to_string().contains("zero price not allowed"));
        // rounds to zero
        assert!(catalog.restock("coke".into(), 1, Some(0.001)).is_err());
        // existing products can't be zeroed either, and keep their stock
        assert!(catalog.restock("snickers".into(), 1, Some(0.0)).is_err());
        assert_eq!(catalog.get(&"snickers".into()).unwrap().stock, 10);
    }

    #[test]
    fn negative_price_rejected() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.set_price("coke".into(), -1.0).unwrap_err(),
            Error::InvalidPrice {
                product: "coke".into(),
                price: -1.0
            }
        );
        assert!(catalog.set_price("coke".into(), f64::NAN).is_err());
    }

    #[test]
    fn set_price_overwrites_or_adds_empty() {
        let mut catalog = catalog();
        catalog.set_price("snickers".into(), 1.5).unwrap();
        catalog.set_price("coke".into(), 100.0).unwrap();
        assert_eq!(
            catalog.get(&"snickers".into()),
            Some(&Entry { price: 1.5, stock: 10 })
        );
        assert_eq!(
            catalog.get(&"coke".into()),
            Some(&Entry { price: 100.0, stock: 0 })
        );
    }

    #[test]
    fn available_needs_stock() {
        let catalog = catalog();
        assert!(catalog.available(&"snickers".into()).is_some());
        assert!(catalog.available(&"mars".into()).is_none());
        assert!(catalog.available(&"twix".into()).is_none());
    }

    #[test]
    fn remove_names_requested_product() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.remove("MARS").unwrap(),
            Entry { price: 1.3, stock: 0 }
        );
        assert_eq!(catalog.len(), 1);

        let error = catalog.remove("you").unwrap_err();
        assert_eq!(error.to_string(), "No product found with name 'you'");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn restock_overflow_rejected() {
        let mut catalog = catalog();
        assert_eq!(
            catalog.restock("snickers".into(), u32::MAX, None),
            Err(Error::StockOverflow {
                product: "snickers".into(),
                stock: 10,
                quantity: u32::MAX
            })
        );
        assert_eq!(catalog.get(&"snickers".into()).unwrap().stock, 10);
        catalog
            .restock("snickers".into(), u32::MAX - 10, None)
            .unwrap();
        assert_eq!(catalog.get(&"snickers".into()).unwrap().stock, u32::MAX);
    }

    #[test]
    fn take_one_decrements() {
        let mut catalog = catalog();
        catalog.take_one(&"snickers".into()).unwrap();
        assert_eq!(catalog.get(&"snickers".into()).unwrap().stock, 9);
        assert_eq!(
            catalog.take_one(&"mars".into()),
            Err(Error::OutOfStock {
                product: "mars".into()
            })
        );
    }
}
