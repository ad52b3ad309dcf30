//! Sort stage. Exactly one sort key is active at a time; toggling the active
//! key flips direction, selecting a new key resets to descending. Ties keep
//! the order they arrived in (no secondary key).

use crate::models::SoldProperty;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Price,
    UpdatedAt,
    PropertyTitle,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price" => Ok(SortField::Price),
            "date" | "updated" | "sold-date" => Ok(SortField::UpdatedAt),
            "title" => Ok(SortField::PropertyTitle),
            other => Err(format!(
                "Unknown sort key: {} (expected price, date, or title)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("Unknown sort direction: {}", other)),
        }
    }
}

impl SortDirection {
    fn flip(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort selection; `field == None` leaves the collection order
/// untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct SortState {
    pub field: Option<SortField>,
    pub direction: Option<SortDirection>,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self {
            field: Some(field),
            direction: Some(direction),
        }
    }

    /// Column-header click semantics: same field flips direction, a new
    /// field starts descending.
    pub fn toggle(&mut self, field: SortField) {
        if self.field == Some(field) {
            self.direction = Some(self.direction.unwrap_or(SortDirection::Desc).flip());
        } else {
            self.field = Some(field);
            self.direction = Some(SortDirection::Desc);
        }
    }

    pub fn sort(&self, items: &mut [&SoldProperty]) {
        let Some(field) = self.field else {
            return;
        };
        let direction = self.direction.unwrap_or(SortDirection::Desc);

        // Stable sort: equal keys keep the incoming order.
        items.sort_by(|a, b| {
            let ordering = compare(a, b, field);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }
}

fn compare(a: &SoldProperty, b: &SoldProperty, field: SortField) -> Ordering {
    match field {
        SortField::Price => a.price.total_cmp(&b.price),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::PropertyTitle => a
            .property_title
            .to_lowercase()
            .cmp(&b.property_title.to_lowercase()),
    }
}
