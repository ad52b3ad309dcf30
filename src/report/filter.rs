//! Filter stages: agent scope, free-text search, and the faceted filters.
//!
//! Facets combine with AND; selected values inside one facet combine with OR.
//! An empty facet is skipped entirely.

use crate::models::{PropertyType, SoldProperty};
use chrono::{DateTime, Utc};
use std::str::FromStr;

/// One selected value of the bedrooms facet. The filter panel offers the
/// buckets 1, 2, 3, 4 and "5+", where "5+" matches any record with five or
/// more bedrooms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BedroomBucket {
    Exact(u32),
    FivePlus,
}

impl BedroomBucket {
    pub fn matches(&self, bedrooms: u32) -> bool {
        match self {
            BedroomBucket::Exact(n) => bedrooms == *n,
            BedroomBucket::FivePlus => bedrooms >= 5,
        }
    }
}

impl FromStr for BedroomBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == "5+" {
            return Ok(BedroomBucket::FivePlus);
        }
        s.parse::<u32>()
            .map(BedroomBucket::Exact)
            .map_err(|_| format!("Invalid bedrooms bucket: {}", s))
    }
}

/// The active facet selection. Price bounds are kept as raw strings exactly
/// as entered; an unparseable bound is an absent constraint, never an error.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub cities: Vec<String>,
    pub property_types: Vec<PropertyType>,
    pub min_price: String,
    pub max_price: String,
    pub bedrooms: Vec<BedroomBucket>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

impl FilterState {
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
            && self.property_types.is_empty()
            && parse_price(&self.min_price).is_none()
            && parse_price(&self.max_price).is_none()
            && self.bedrooms.is_empty()
            && self.date_from.is_none()
            && self.date_to.is_none()
    }

    fn accepts(&self, p: &SoldProperty) -> bool {
        if !self.cities.is_empty() && !self.cities.iter().any(|c| c == &p.city) {
            return false;
        }
        if !self.property_types.is_empty() && !self.property_types.contains(&p.property_type) {
            return false;
        }
        if let Some(min) = parse_price(&self.min_price) {
            if p.price < min {
                return false;
            }
        }
        if let Some(max) = parse_price(&self.max_price) {
            if p.price > max {
                return false;
            }
        }
        if !self.bedrooms.is_empty() && !self.bedrooms.iter().any(|b| b.matches(p.bedrooms)) {
            return false;
        }
        if let Some(from) = self.date_from {
            if p.updated_at < from {
                return false;
            }
        }
        if let Some(to) = self.date_to {
            if p.updated_at > to {
                return false;
            }
        }
        true
    }
}

fn parse_price(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Run the filter stages in order: agent scope, then search, then facets.
pub fn apply<'a>(
    records: &'a [SoldProperty],
    agent_id: Option<i64>,
    search: &str,
    filters: &FilterState,
) -> Vec<&'a SoldProperty> {
    let query = search.trim().to_lowercase();

    records
        .iter()
        .filter(|p| agent_id.map_or(true, |id| p.sold_by.agent_id == id))
        .filter(|p| query.is_empty() || matches_search(p, &query))
        .filter(|p| filters.accepts(p))
        .collect()
}

/// Case-insensitive substring over title, city, locality, or agent name.
fn matches_search(p: &SoldProperty, query: &str) -> bool {
    p.property_title.to_lowercase().contains(query)
        || p.city.to_lowercase().contains(query)
        || p.locality.to_lowercase().contains(query)
        || p.sold_by.agent_name.to_lowercase().contains(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::property;

    #[test]
    fn test_search_matches_any_text_field() {
        let records = vec![
            property(1, "Luxury Villa", 1.0, "Goa", 4, 1, "Priya", "2025-06-01T00:00:00Z"),
            property(2, "Compact Flat", 1.0, "Pune", 1, 2, "Arjun", "2025-06-01T00:00:00Z"),
        ];

        // Title
        let out = apply(&records, None, "VILLA", &FilterState::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].property_id, 1);
        // Agent name
        let out = apply(&records, None, "arjun", &FilterState::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].property_id, 2);
        // Locality ("Pune Central")
        let out = apply(&records, None, "central", &FilterState::default());
        assert_eq!(out.len(), 2);
        // No match
        assert!(apply(&records, None, "mumbai", &FilterState::default()).is_empty());
    }

    #[test]
    fn test_city_facet_is_or_within_and_across() {
        let records = vec![
            property(1, "A", 2_000_000.0, "Pune", 2, 1, "X", "2025-06-01T00:00:00Z"),
            property(2, "B", 2_000_000.0, "Delhi", 2, 1, "X", "2025-06-01T00:00:00Z"),
            property(3, "C", 9_000_000.0, "Pune", 2, 1, "X", "2025-06-01T00:00:00Z"),
        ];

        let filters = FilterState {
            cities: vec!["Pune".to_string(), "Delhi".to_string()],
            max_price: "5000000".to_string(),
            ..Default::default()
        };
        let out = apply(&records, None, "", &filters);
        // Record 3 passes the city facet but fails the price facet
        assert_eq!(out.iter().map(|p| p.property_id).collect::<Vec<_>>(), vec![1, 2]);
        assert!(out.iter().all(|p| filters.cities.contains(&p.city)));
    }

    #[test]
    fn test_price_window() {
        let records: Vec<_> = [3_000_000.0, 6_000_000.0, 9_000_000.0, 12_000_000.0]
            .iter()
            .enumerate()
            .map(|(i, price)| {
                property(i as i64, "P", *price, "Pune", 2, 1, "X", "2025-06-01T00:00:00Z")
            })
            .collect();

        let filters = FilterState {
            min_price: "5000000".to_string(),
            max_price: "10000000".to_string(),
            ..Default::default()
        };
        let out = apply(&records, None, "", &filters);
        let prices: Vec<f64> = out.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![6_000_000.0, 9_000_000.0]);
    }

    #[test]
    fn test_unparseable_price_is_no_constraint() {
        let records = vec![property(1, "P", 100.0, "Pune", 2, 1, "X", "2025-06-01T00:00:00Z")];
        let filters = FilterState {
            min_price: "a lot".to_string(),
            max_price: "  ".to_string(),
            ..Default::default()
        };
        assert!(filters.is_empty());
        assert_eq!(apply(&records, None, "", &filters).len(), 1);
    }

    #[test]
    fn test_bedrooms_exact_bucket() {
        let records: Vec<_> = [2u32, 3, 3, 4]
            .iter()
            .enumerate()
            .map(|(i, beds)| property(i as i64, "P", 1.0, "Pune", *beds, 1, "X", "2025-06-01T00:00:00Z"))
            .collect();

        let filters = FilterState {
            bedrooms: vec![BedroomBucket::Exact(3)],
            ..Default::default()
        };
        let out = apply(&records, None, "", &filters);
        assert_eq!(out.len(), 2);
        assert!(out.iter().all(|p| p.bedrooms == 3));
    }

    #[test]
    fn test_five_plus_bucket_matches_at_least_five() {
        let records: Vec<_> = [4u32, 5, 7]
            .iter()
            .enumerate()
            .map(|(i, beds)| property(i as i64, "P", 1.0, "Pune", *beds, 1, "X", "2025-06-01T00:00:00Z"))
            .collect();

        let filters = FilterState {
            bedrooms: vec!["5+".parse().unwrap()],
            ..Default::default()
        };
        let out = apply(&records, None, "", &filters);
        assert_eq!(out.iter().map(|p| p.bedrooms).collect::<Vec<_>>(), vec![5, 7]);
    }

    #[test]
    fn test_bedroom_bucket_parsing() {
        assert_eq!("3".parse::<BedroomBucket>().unwrap(), BedroomBucket::Exact(3));
        assert_eq!("5+".parse::<BedroomBucket>().unwrap(), BedroomBucket::FivePlus);
        assert!("many".parse::<BedroomBucket>().is_err());
    }

    #[test]
    fn test_date_range_inclusive_on_instants() {
        let records = vec![
            property(1, "P", 1.0, "Pune", 2, 1, "X", "2025-05-31T23:59:59Z"),
            property(2, "P", 1.0, "Pune", 2, 1, "X", "2025-06-01T00:00:00Z"),
            property(3, "P", 1.0, "Pune", 2, 1, "X", "2025-06-10T12:00:00Z"),
        ];

        let filters = FilterState {
            date_from: Some("2025-06-01T00:00:00Z".parse().unwrap()),
            date_to: Some("2025-06-10T12:00:00Z".parse().unwrap()),
            ..Default::default()
        };
        let out = apply(&records, None, "", &filters);
        assert_eq!(out.iter().map(|p| p.property_id).collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn test_agent_scope_applies_before_everything() {
        let records = vec![
            property(1, "Villa", 1.0, "Pune", 2, 7, "Priya", "2025-06-01T00:00:00Z"),
            property(2, "Villa", 1.0, "Pune", 2, 8, "Arjun", "2025-06-01T00:00:00Z"),
        ];
        let out = apply(&records, Some(7), "villa", &FilterState::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].sold_by.agent_id, 7);
    }
}
