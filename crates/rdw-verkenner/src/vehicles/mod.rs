pub mod dates;
pub mod domain;
pub mod expiry;
pub mod selection;
pub mod stats;

pub use domain::{sample_records, VehicleRecord};
pub use selection::{select, FieldFilter, FilterCriteria, SortOrder};
pub use stats::DashboardStats;
