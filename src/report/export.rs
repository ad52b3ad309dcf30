//! CSV serialization of the filtered, sorted (but not paginated) report.
//!
//! Fields containing commas, quotes, or newlines are quoted per RFC 4180, so
//! a free-text title cannot break the column layout.

use crate::models::SoldProperty;
use chrono::NaiveDate;
use std::borrow::Cow;

const HEADERS: [&str; 13] = [
    "Property ID",
    "Title",
    "Price",
    "Type",
    "City",
    "Locality",
    "Bedrooms",
    "Bathrooms",
    "Area",
    "Sold Date",
    "Agent Name",
    "Agent Email",
    "Agent Phone",
];

/// Serialize the given records, header line first, one line per record.
pub fn to_csv(items: &[&SoldProperty]) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADERS.iter().map(|h| Cow::Borrowed(*h)));

    for p in items {
        let fields: [Cow<'_, str>; 13] = [
            Cow::Owned(p.property_id.to_string()),
            Cow::Borrowed(p.property_title.as_str()),
            Cow::Owned(format_price(p.price)),
            Cow::Borrowed(p.property_type.as_str()),
            Cow::Borrowed(p.city.as_str()),
            Cow::Borrowed(p.locality.as_str()),
            Cow::Owned(p.bedrooms.to_string()),
            Cow::Owned(p.bathrooms.to_string()),
            Cow::Borrowed(p.area.as_str()),
            Cow::Owned(p.updated_at.format("%Y-%m-%d").to_string()),
            Cow::Borrowed(p.sold_by.agent_name.as_str()),
            Cow::Borrowed(p.sold_by.agent_email.as_str()),
            Cow::Borrowed(p.sold_by.agent_phone.as_str()),
        ];
        push_row(&mut out, fields.into_iter());
    }

    out
}

/// Default export file name, stamped with the current date:
/// `sold-properties-2025-06-15.csv`.
pub fn default_export_name(today: NaiveDate) -> String {
    format!("sold-properties-{}.csv", today.format("%Y-%m-%d"))
}

fn push_row<'a>(out: &mut String, fields: impl Iterator<Item = Cow<'a, str>>) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&escape(&field));
    }
    out.push('\n');
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Whole-number prices render without a fractional part.
fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{}", price as i64)
    } else {
        format!("{}", price)
    }
}
