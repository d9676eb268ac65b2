use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

use super::dates;
use super::domain::VehicleRecord;
use super::expiry;

/// Categorical filter on a single dataset column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFilter {
    #[default]
    All,
    Exact(String),
}

impl FieldFilter {
    /// Exact matches are case-sensitive; dataset values are already uppercase.
    pub fn matches(&self, value: Option<&str>) -> bool {
        match self {
            FieldFilter::All => true,
            FieldFilter::Exact(expected) => value == Some(expected.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Leave the filtered list in dataset order.
    InsertionOrder,
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    pub const fn label(self) -> &'static str {
        match self {
            Self::InsertionOrder => "Datasetvolgorde",
            Self::NewestFirst => "Nieuwste tenaamstelling eerst",
            Self::OldestFirst => "Oudste tenaamstelling eerst",
        }
    }
}

/// Immutable snapshot of the user's filter state, rebuilt on every change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub search_term: String,
    #[serde(default)]
    pub vehicle_type: FieldFilter,
    #[serde(default)]
    pub brand: FieldFilter,
    #[serde(default)]
    pub only_expiring_soon: bool,
    #[serde(default)]
    pub sort: SortOrder,
}

impl FilterCriteria {
    fn keeps(&self, record: &VehicleRecord, term: &str, now: DateTime<Utc>, window_days: i64) -> bool {
        let matches_search =
            term.is_empty() || record.searchable_values().any(|value| contains_fold(value, term));
        let matches_type = self.vehicle_type.matches(record.voertuigsoort.as_deref());
        let matches_brand = self.brand.matches(record.merk.as_deref());
        let matches_expiry = !self.only_expiring_soon
            || expiry::is_expiring_soon(record.vervaldatum_apk.as_deref(), window_days, now);

        matches_search && matches_type && matches_brand && matches_expiry
    }
}

fn contains_fold(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Applies the criteria snapshot to a borrowed collection and returns the
/// derived view. The input is never reordered or mutated; the result borrows
/// from it.
///
/// `window_days` feeds the expiry stage; pass
/// [`expiry::DEFAULT_WINDOW_DAYS`] unless configuration says otherwise, and
/// use the same value for the statistics so the toggle and the counter agree.
pub fn select<'a>(
    records: &'a [VehicleRecord],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
    window_days: i64,
) -> Vec<&'a VehicleRecord> {
    let term = criteria.search_term.trim().to_lowercase();

    let mut kept: Vec<&VehicleRecord> = records
        .iter()
        .filter(|record| criteria.keeps(record, &term, now, window_days))
        .collect();

    match criteria.sort {
        SortOrder::InsertionOrder => {}
        SortOrder::NewestFirst => sort_by_registration(&mut kept, true),
        SortOrder::OldestFirst => sort_by_registration(&mut kept, false),
    }

    kept
}

/// Stable sort on the numeric registration-date key. Records without a key
/// sink below every keyed record, whichever direction is asked for; equal
/// keys keep their relative input order.
fn sort_by_registration(records: &mut [&VehicleRecord], newest_first: bool) {
    records.sort_by(|a, b| {
        let key_a = dates::sort_key(a.datum_tenaamstelling.as_deref());
        let key_b = dates::sort_key(b.datum_tenaamstelling.as_deref());

        match (key_a, key_b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(a), Some(b)) if newest_first => b.cmp(&a),
            (Some(a), Some(b)) => a.cmp(&b),
        }
    });
}

/// Sorted, deduplicated vehicle types present in the collection; feeds the
/// categorical filter choices.
pub fn distinct_vehicle_types(records: &[VehicleRecord]) -> Vec<String> {
    distinct(records, |record| record.voertuigsoort.as_deref())
}

/// Sorted, deduplicated brands present in the collection.
pub fn distinct_brands(records: &[VehicleRecord]) -> Vec<String> {
    distinct(records, |record| record.merk.as_deref())
}

fn distinct<F>(records: &[VehicleRecord], field: F) -> Vec<String>
where
    F: Fn(&VehicleRecord) -> Option<&str>,
{
    records
        .iter()
        .filter_map(|record| field(record))
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vehicles::domain::sample_records;
    use chrono::{NaiveDate, NaiveTime};

    fn pivot() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2023, 11, 1)
            .expect("valid pivot date")
            .and_time(NaiveTime::MIN)
            .and_utc()
    }

    fn insertion_order_criteria() -> FilterCriteria {
        FilterCriteria {
            sort: SortOrder::InsertionOrder,
            ..FilterCriteria::default()
        }
    }

    fn plates(selected: &[&VehicleRecord]) -> Vec<String> {
        selected.iter().map(|r| r.kenteken.clone()).collect()
    }

    fn run<'a>(records: &'a [VehicleRecord], criteria: &FilterCriteria) -> Vec<&'a VehicleRecord> {
        select(records, criteria, pivot(), expiry::DEFAULT_WINDOW_DAYS)
    }

    #[test]
    fn default_criteria_with_insertion_order_is_identity() {
        let records = sample_records();
        let selected = run(&records, &insertion_order_criteria());

        assert_eq!(
            plates(&selected),
            records.iter().map(|r| r.kenteken.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn search_is_case_insensitive_and_spans_all_fields() {
        let records = sample_records();
        let criteria = FilterCriteria {
            search_term: "  sprinter ".to_string(),
            ..insertion_order_criteria()
        };

        let selected = run(&records, &criteria);
        assert_eq!(plates(&selected), vec!["CD789B"]);
    }

    #[test]
    fn search_reaches_extra_attributes() {
        let mut records = sample_records();
        records[0]
            .extra
            .insert("inrichting".to_string(), Some("hatchback".to_string()));

        let criteria = FilterCriteria {
            search_term: "HATCH".to_string(),
            ..insertion_order_criteria()
        };

        let selected = run(&records, &criteria);
        assert_eq!(plates(&selected), vec!["AB123Z"]);
    }

    #[test]
    fn categorical_filters_require_exact_match() {
        let records = sample_records();
        let criteria = FilterCriteria {
            vehicle_type: FieldFilter::Exact("Personenauto".to_string()),
            brand: FieldFilter::Exact("BMW".to_string()),
            ..insertion_order_criteria()
        };

        let selected = run(&records, &criteria);
        assert_eq!(plates(&selected), vec!["FG321H"]);

        // Case differences do not match.
        let criteria = FilterCriteria {
            brand: FieldFilter::Exact("bmw".to_string()),
            ..insertion_order_criteria()
        };
        assert!(run(&records, &criteria).is_empty());
    }

    #[test]
    fn expiry_toggle_keeps_only_upcoming_expirations() {
        let records = sample_records();
        let criteria = FilterCriteria {
            only_expiring_soon: true,
            ..insertion_order_criteria()
        };

        // Pivot 2023-11-01: GOLF expires 2023-12-15 (44 days out), the rest
        // are either past or beyond the 60-day window.
        let selected = run(&records, &criteria);
        assert_eq!(plates(&selected), vec!["AB123Z"]);
    }

    #[test]
    fn newest_first_orders_by_numeric_key() {
        let records = sample_records();
        let criteria = FilterCriteria {
            sort: SortOrder::NewestFirst,
            ..FilterCriteria::default()
        };

        let selected = run(&records, &criteria);
        assert_eq!(
            plates(&selected),
            vec!["FG321H", "XY456A", "JK654L", "AB123Z", "CD789B"]
        );
    }

    #[test]
    fn oldest_first_flips_polarity() {
        let records = sample_records();
        let criteria = FilterCriteria {
            sort: SortOrder::OldestFirst,
            ..FilterCriteria::default()
        };

        let selected = run(&records, &criteria);
        assert_eq!(
            plates(&selected),
            vec!["CD789B", "AB123Z", "JK654L", "XY456A", "FG321H"]
        );
    }

    #[test]
    fn records_without_dates_sink_in_both_directions() {
        let mut records = sample_records();
        records[1].datum_tenaamstelling = None;
        records[3].datum_tenaamstelling = Some("onbekend".to_string());

        for sort in [SortOrder::NewestFirst, SortOrder::OldestFirst] {
            let criteria = FilterCriteria {
                sort,
                ..FilterCriteria::default()
            };
            let selected = run(&records, &criteria);
            // The two dateless records trail, keeping their input order.
            assert_eq!(plates(&selected)[3..], ["XY456A", "FG321H"]);
        }
    }

    #[test]
    fn equal_keys_preserve_input_order() {
        let mut records = sample_records();
        for record in &mut records {
            record.datum_tenaamstelling = Some("20200101".to_string());
        }

        let criteria = FilterCriteria {
            sort: SortOrder::NewestFirst,
            ..FilterCriteria::default()
        };
        let selected = run(&records, &criteria);
        assert_eq!(
            plates(&selected),
            records.iter().map(|r| r.kenteken.clone()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn malformed_eight_digit_dates_still_sort_numerically() {
        let mut records = sample_records();
        // Invalid on the calendar, but 8 digits: keys above every real 2021
        // date, so it leads in newest-first mode.
        records[0].datum_tenaamstelling = Some("20231332".to_string());

        let criteria = FilterCriteria {
            sort: SortOrder::NewestFirst,
            ..FilterCriteria::default()
        };
        let selected = run(&records, &criteria);
        assert_eq!(selected[0].kenteken, "AB123Z");
    }

    #[test]
    fn distinct_values_are_sorted_and_unique() {
        let records = sample_records();
        assert_eq!(
            distinct_vehicle_types(&records),
            vec!["Bedrijfsauto", "Motorfiets", "Personenauto"]
        );
        assert_eq!(
            distinct_brands(&records),
            vec!["BMW", "HONDA", "MERCEDES-BENZ", "TOYOTA", "VOLKSWAGEN"]
        );
    }
}
