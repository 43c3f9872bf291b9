use indexmap::IndexMap;

use crate::Location;

/// Element name to raw value for one interval.
pub type IntervalRecord = IndexMap<String, String>;

/// Interval key to record, in first-seen order.
pub type IntervalRecords = IndexMap<String, IntervalRecord>;

/// Fold every element/interval pair of `loc` into one record per interval key.
///
/// Keys keep the order they are first encountered while walking elements
/// then intervals; that order becomes the row (and chart x-axis) order.
/// If an element reports the same interval twice, the later value wins.
pub fn reshape(loc: &Location) -> IntervalRecords {
    let mut records = IntervalRecords::new();

    for element in &loc.elements {
        for tv in &element.intervals {
            records
                .entry(tv.interval_key())
                .or_default()
                .insert(element.name.clone(), tv.value().to_string());
        }
    }

    log::debug!("Reshaped '{}' into {} intervals", loc.name, records.len());
    records
}
