pub mod client;
pub mod query;

pub use client::{RdwApiError, RdwHttpClient, VehicleGateway};
pub use query::{ListQuery, PlateError, SortDirection, DATASET_ENDPOINT};
