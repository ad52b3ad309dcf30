//! Sold-properties report pipeline.
//!
//! Pure derived-state machinery: given the raw collection fetched from the
//! backend and a query, produce the visible, ordered slice and the CSV
//! serialization. The stages run in a fixed order (agent scope, free-text
//! search, faceted filters, sort, pagination) and never fail on valid input;
//! malformed numeric filter strings are treated as absent constraints.

pub mod export;
pub mod filter;
pub mod page;
pub mod sort;

pub use export::{default_export_name, to_csv};
pub use filter::{BedroomBucket, FilterState};
pub use page::{PageSize, Pager, PAGE_SIZE_MENU};
pub use sort::{SortDirection, SortField, SortState};

use crate::models::SoldProperty;

/// Everything that shapes the visible report, pagination excepted (the pager
/// is applied by the caller so CSV export can see the full filtered set).
#[derive(Debug, Default)]
pub struct ReportQuery {
    /// Navigation-scope constraint: restrict to one agent's sales.
    pub agent_id: Option<i64>,
    pub search: String,
    pub filters: FilterState,
    pub sort: SortState,
}

/// Run the filter and sort stages, yielding the display-ready (but not yet
/// paginated) view of the collection.
pub fn run<'a>(records: &'a [SoldProperty], query: &ReportQuery) -> Vec<&'a SoldProperty> {
    let mut result = filter::apply(records, query.agent_id, &query.search, &query.filters);
    query.sort.sort(&mut result);
    result
}

/// Distinct cities present in the collection, sorted. These are the choices
/// offered for the city facet.
pub fn available_cities(records: &[SoldProperty]) -> Vec<String> {
    let mut cities: Vec<String> = records.iter().map(|p| p.city.clone()).collect();
    cities.sort();
    cities.dedup();
    cities
}

/// Name of the scoped agent, looked up from the records themselves (used for
/// the "filtered by agent" banner).
pub fn agent_name_for(records: &[SoldProperty], agent_id: i64) -> Option<&str> {
    records
        .iter()
        .find(|p| p.sold_by.agent_id == agent_id)
        .map(|p| p.sold_by.agent_name.as_str())
}


#[cfg(test)]
mod tests {
    use super::fixtures::property;
    use super::*;

    #[test]
    fn test_empty_collection_yields_empty_result() {
        let query = ReportQuery {
            agent_id: Some(7),
            search: "villa".to_string(),
            ..Default::default()
        };
        assert!(run(&[], &query).is_empty());
    }

    #[test]
    fn test_agent_scope_overrides_nothing_else() {
        // 12 records, 3 of them sold by agent 7
        let mut records = Vec::new();
        for i in 0..12 {
            let agent = if i % 4 == 0 { 7 } else { 2 };
            records.push(property(
                i,
                "Flat",
                1_000_000.0,
                "Pune",
                2,
                agent,
                if agent == 7 { "Priya" } else { "Arjun" },
                "2025-06-01T00:00:00Z",
            ));
        }

        let query = ReportQuery {
            agent_id: Some(7),
            ..Default::default()
        };
        let result = run(&records, &query);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|p| p.sold_by.agent_id == 7));
    }

    #[test]
    fn test_available_cities_deduped_and_sorted() {
        let records = vec![
            property(1, "A", 1.0, "Pune", 2, 1, "X", "2025-06-01T00:00:00Z"),
            property(2, "B", 1.0, "Delhi", 2, 1, "X", "2025-06-01T00:00:00Z"),
            property(3, "C", 1.0, "Pune", 2, 1, "X", "2025-06-01T00:00:00Z"),
        ];
        assert_eq!(available_cities(&records), vec!["Delhi", "Pune"]);
    }

    #[test]
    fn test_agent_name_lookup() {
        let records = vec![property(1, "A", 1.0, "Pune", 2, 9, "Meera", "2025-06-01T00:00:00Z")];
        assert_eq!(agent_name_for(&records, 9), Some("Meera"));
        assert_eq!(agent_name_for(&records, 4), None);
    }
}
