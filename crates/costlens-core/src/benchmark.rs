//! Benchmark rate tables.
//!
//! The evaluator only needs `(category, band) -> rate` plus a currency code, expressed by
//! [`RateLookup`]. [`BenchmarkSet`] is the in-memory table a host loads for one region/tier and
//! [`BenchmarkLibrary`] is the read-only collection of those tables.

use crate::model::Band;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Read-only rate accessor consumed by the evaluator.
pub trait RateLookup {
    /// Unit rate for `category_id` at `band`, or `None` when the table has no entry.
    fn rate(&self, category_id: &str, band: Band) -> Option<f64>;

    fn currency(&self) -> &str;
}

/// Per-band rates for one category. A `None` band is reported as a missing rate at evaluation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BandRates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub low: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<f64>,
}

impl BandRates {
    pub fn new(low: f64, medium: f64, high: f64) -> Self {
        Self {
            low: Some(low),
            medium: Some(medium),
            high: Some(high),
        }
    }

    pub fn get(&self, band: Band) -> Option<f64> {
        match band {
            Band::Low => self.low,
            Band::Medium => self.medium,
            Band::High => self.high,
        }
    }

    pub fn set(&mut self, band: Band, rate: f64) {
        match band {
            Band::Low => self.low = Some(rate),
            Band::Medium => self.medium = Some(rate),
            Band::High => self.high = Some(rate),
        }
    }
}

/// Rate table for a single region/tier combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkSet {
    pub region: String,
    pub tier: String,
    pub currency: String,
    #[serde(default)]
    pub rates: BTreeMap<String, BandRates>,
}

impl BenchmarkSet {
    pub fn new(
        region: impl Into<String>,
        tier: impl Into<String>,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            tier: tier.into(),
            currency: currency.into(),
            rates: BTreeMap::new(),
        }
    }

    pub fn with_rate(mut self, category_id: impl Into<String>, band: Band, rate: f64) -> Self {
        self.rates
            .entry(category_id.into())
            .or_default()
            .set(band, rate);
        self
    }

    pub fn with_band_rates(mut self, category_id: impl Into<String>, rates: BandRates) -> Self {
        self.rates.insert(category_id.into(), rates);
        self
    }

    pub fn key(&self) -> (&str, &str) {
        (&self.region, &self.tier)
    }
}

impl RateLookup for BenchmarkSet {
    fn rate(&self, category_id: &str, band: Band) -> Option<f64> {
        self.rates.get(category_id).and_then(|r| r.get(band))
    }

    fn currency(&self) -> &str {
        &self.currency
    }
}

/// Collection of benchmark sets keyed by `(region, tier)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BenchmarkLibrary {
    sets: BTreeMap<(String, String), BenchmarkSet>,
}

impl BenchmarkLibrary {
    /// Build a library, rejecting a repeated `(region, tier)` key. Returns the duplicate key on error.
    pub fn from_sets<I>(sets: I) -> Result<Self, (String, String)>
    where
        I: IntoIterator<Item = BenchmarkSet>,
    {
        let mut map = BTreeMap::new();
        for set in sets {
            let key = (set.region.clone(), set.tier.clone());
            if map.contains_key(&key) {
                return Err(key);
            }
            map.insert(key, set);
        }
        Ok(Self { sets: map })
    }

    pub fn get(&self, region: &str, tier: &str) -> Option<&BenchmarkSet> {
        self.sets.get(&(region.to_string(), tier.to_string()))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// All `(region, tier)` keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sets.keys().map(|(r, t)| (r.as_str(), t.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_distinguishes_bands() {
        let set = BenchmarkSet::new("eu-west", "standard", "EUR")
            .with_rate("energy", Band::Low, 0.4)
            .with_rate("energy", Band::High, 0.9);

        assert_eq!(set.rate("energy", Band::Low), Some(0.4));
        assert_eq!(set.rate("energy", Band::Medium), None);
        assert_eq!(set.rate("energy", Band::High), Some(0.9));
        assert_eq!(set.rate("water", Band::Low), None);
        assert_eq!(set.currency(), "EUR");
    }

    #[test]
    fn library_rejects_duplicate_keys() {
        let a = BenchmarkSet::new("us", "premium", "USD");
        let b = BenchmarkSet::new("us", "premium", "USD");
        let err = BenchmarkLibrary::from_sets([a, b]).unwrap_err();
        assert_eq!(err, ("us".to_string(), "premium".to_string()));
    }

    #[test]
    fn library_lookup_by_region_and_tier() {
        let lib = BenchmarkLibrary::from_sets([
            BenchmarkSet::new("us", "standard", "USD"),
            BenchmarkSet::new("us", "premium", "USD"),
        ])
        .unwrap();
        assert_eq!(lib.len(), 2);
        assert!(lib.get("us", "premium").is_some());
        assert!(lib.get("eu", "premium").is_none());
        let keys: Vec<_> = lib.keys().collect();
        assert_eq!(keys, vec![("us", "premium"), ("us", "standard")]);
    }
}
