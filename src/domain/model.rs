use serde::{Deserialize, Serialize};

/// Currency every price collection must carry a price for.
pub const DEFAULT_CURRENCY: &str = "b7d2554b0ce847cd82f3ac9bd1c0dfca";

/// Discount of a price against its list price, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Percentage {
    pub net: f64,
    pub gross: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub net: f64,
    pub gross: f64,
    pub currency_id: String,
    pub linked: bool,
    #[serde(default)]
    pub list_price: Option<Box<Price>>,
    #[serde(default)]
    pub regulation_price: Option<Box<Price>>,
    #[serde(default)]
    pub percentage: Option<Percentage>,
}

impl Price {
    pub fn new(currency_id: impl Into<String>, net: f64, gross: f64, linked: bool) -> Self {
        Self {
            net,
            gross,
            currency_id: currency_id.into(),
            linked,
            list_price: None,
            regulation_price: None,
            percentage: None,
        }
    }

    pub fn with_list_price(mut self, list_price: Price) -> Self {
        self.list_price = Some(Box::new(list_price));
        self
    }

    pub fn with_regulation_price(mut self, regulation_price: Price) -> Self {
        self.regulation_price = Some(Box::new(regulation_price));
        self
    }

    pub fn list_price(&self) -> Option<&Price> {
        self.list_price.as_deref()
    }

    pub fn regulation_price(&self) -> Option<&Price> {
        self.regulation_price.as_deref()
    }
}

/// Prices of one field, at most one per currency, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Price>", into = "Vec<Price>")]
pub struct PriceCollection {
    prices: Vec<Price>,
}

impl PriceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a price, replacing an existing one of the same currency in place.
    pub fn add(&mut self, price: Price) {
        match self
            .prices
            .iter_mut()
            .find(|p| p.currency_id == price.currency_id)
        {
            Some(existing) => *existing = price,
            None => self.prices.push(price),
        }
    }

    pub fn get(&self, currency_id: &str) -> Option<&Price> {
        self.prices.iter().find(|p| p.currency_id == currency_id)
    }

    pub fn contains(&self, currency_id: &str) -> bool {
        self.get(currency_id).is_some()
    }

    pub fn remove(&mut self, currency_id: &str) -> Option<Price> {
        let index = self
            .prices
            .iter()
            .position(|p| p.currency_id == currency_id)?;
        Some(self.prices.remove(index))
    }

    pub fn currency_ids(&self) -> Vec<&str> {
        self.prices.iter().map(|p| p.currency_id.as_str()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Price> {
        self.prices.iter()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl From<Vec<Price>> for PriceCollection {
    fn from(prices: Vec<Price>) -> Self {
        prices.into_iter().collect()
    }
}

impl From<PriceCollection> for Vec<Price> {
    fn from(collection: PriceCollection) -> Self {
        collection.prices
    }
}

impl FromIterator<Price> for PriceCollection {
    fn from_iter<I: IntoIterator<Item = Price>>(iter: I) -> Self {
        let mut collection = PriceCollection::new();
        for price in iter {
            collection.add(price);
        }
        collection
    }
}

impl IntoIterator for PriceCollection {
    type Item = Price;
    type IntoIter = std::vec::IntoIter<Price>;

    fn into_iter(self) -> Self::IntoIter {
        self.prices.into_iter()
    }
}

impl<'a> IntoIterator for &'a PriceCollection {
    type Item = &'a Price;
    type IntoIter = std::slice::Iter<'a, Price>;

    fn into_iter(self) -> Self::IntoIter {
        self.prices.iter()
    }
}
