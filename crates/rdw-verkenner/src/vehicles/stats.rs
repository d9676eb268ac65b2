use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use super::dates;
use super::domain::VehicleRecord;
use super::expiry;

const MS_PER_DAY: f64 = 86_400_000.0;
const DAYS_PER_YEAR: f64 = 365.25;

/// The record holding the most recent calendar-valid registration date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewestRegistration {
    pub kenteken: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merk: Option<String>,
    pub date: NaiveDate,
}

/// Summary block over the current filtered view.
///
/// Recomputed from scratch on every call; nothing here is incrementally
/// maintained across list changes.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardStats {
    pub records_shown: usize,
    pub total_loaded: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newest: Option<NewestRegistration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_age_years: Option<f64>,
    pub expiring_soon: usize,
}

impl DashboardStats {
    pub fn compute(
        filtered: &[&VehicleRecord],
        total_loaded: usize,
        now: DateTime<Utc>,
        window_days: i64,
    ) -> Self {
        let mut newest: Option<(&VehicleRecord, NaiveDate)> = None;
        for record in filtered {
            let Some(date) = dates::parse_date(record.datum_tenaamstelling.as_deref()) else {
                continue;
            };
            // Strictly-greater replacement keeps the first record on a tie.
            if newest.map_or(true, |(_, best)| date > best) {
                newest = Some((record, date));
            }
        }

        let ages: Vec<f64> = filtered
            .iter()
            .filter_map(|record| dates::parse_date(record.datum_tenaamstelling.as_deref()))
            .map(|date| age_in_years(date, now))
            .collect();
        let average_age_years = if ages.is_empty() {
            None
        } else {
            Some(ages.iter().sum::<f64>() / ages.len() as f64)
        };

        let expiring_soon = filtered
            .iter()
            .filter(|record| {
                expiry::is_expiring_soon(record.vervaldatum_apk.as_deref(), window_days, now)
            })
            .count();

        DashboardStats {
            records_shown: filtered.len(),
            total_loaded,
            newest: newest.map(|(record, date)| NewestRegistration {
                kenteken: record.kenteken.clone(),
                merk: record.merk.clone(),
                date,
            }),
            average_age_years,
            expiring_soon,
        }
    }
}

fn age_in_years(registered: NaiveDate, now: DateTime<Utc>) -> f64 {
    let midnight = registered.and_time(NaiveTime::MIN).and_utc();
    (now - midnight).num_milliseconds() as f64 / (MS_PER_DAY * DAYS_PER_YEAR)
}
