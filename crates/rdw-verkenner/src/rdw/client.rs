use reqwest::header::ACCEPT;
use tokio::runtime::Runtime;
use tracing::debug;
use url::Url;

use super::query::{self, ListQuery, PlateError};
use crate::vehicles::domain::VehicleRecord;

#[derive(Debug, thiserror::Error)]
pub enum RdwApiError {
    #[error("RDW API responded with status {status}")]
    Status { status: u16 },
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("runtime unavailable: {0}")]
    Runtime(String),
    #[error(transparent)]
    Plate(#[from] PlateError),
}

/// Synchronous seam to the vehicle dataset.
///
/// The dashboard core is single-threaded and non-suspending; this trait keeps
/// it that way by hiding the async HTTP machinery behind blocking calls.
pub trait VehicleGateway: std::fmt::Debug {
    /// Fetches the list view. At most one request is in flight per call; no
    /// retry, no backoff.
    fn fetch_vehicles(&self, query: &ListQuery) -> Result<Vec<VehicleRecord>, RdwApiError>;

    /// Looks up a single plate. `Ok(None)` means the registry has no such
    /// vehicle, which is not a failure.
    fn lookup_plate(&self, plate: &str) -> Result<Option<VehicleRecord>, RdwApiError>;
}

/// reqwest-backed gateway carrying its own runtime, so synchronous callers
/// never see a future.
pub struct RdwHttpClient {
    endpoint: Url,
    http: reqwest::Client,
    runtime: Runtime,
}

impl RdwHttpClient {
    pub fn new(endpoint: Url) -> Result<Self, RdwApiError> {
        let runtime = Runtime::new().map_err(|err| RdwApiError::Runtime(err.to_string()))?;
        Ok(Self {
            endpoint,
            http: reqwest::Client::new(),
            runtime,
        })
    }

    fn get_records(&self, url: Url) -> Result<Vec<VehicleRecord>, RdwApiError> {
        debug!(url = %url, "GET naar RDW dataset");

        self.runtime.block_on(async {
            let response = self
                .http
                .get(url)
                .header(ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(RdwApiError::Status {
                    status: status.as_u16(),
                });
            }

            Ok(response.json::<Vec<VehicleRecord>>().await?)
        })
    }
}

impl std::fmt::Debug for RdwHttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RdwHttpClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl VehicleGateway for RdwHttpClient {
    fn fetch_vehicles(&self, query: &ListQuery) -> Result<Vec<VehicleRecord>, RdwApiError> {
        let url = query::list_url(&self.endpoint, query);
        self.get_records(url)
    }

    fn lookup_plate(&self, plate: &str) -> Result<Option<VehicleRecord>, RdwApiError> {
        let url = query::lookup_url(&self.endpoint, plate)?;
        let records = self.get_records(url)?;
        Ok(records.into_iter().next())
    }
}
