use serde::Serialize;
use tracing::{debug, warn};

use crate::rdw::client::{RdwApiError, VehicleGateway};
use crate::rdw::query::ListQuery;
use crate::vehicles::domain::{sample_records, VehicleRecord};

/// User-facing notice shown when the live fetch fails and the demo fleet is
/// substituted.
pub const FALLBACK_NOTICE: &str =
    "Live RDW data kon niet worden opgehaald. Voorbeeldgegevens worden getoond.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback,
}

impl DataSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Live => "live RDW data",
            Self::Fallback => "voorbeeldgegevens",
        }
    }
}

/// Handle for one outstanding fetch. Tokens increase monotonically; only the
/// latest issued token may still apply its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

#[derive(Debug)]
pub enum FetchOutcome {
    /// The response replaced the raw collection.
    Applied { source: DataSource, records: usize },
    /// A newer fetch was issued in the meantime; this response was dropped.
    Superseded,
}

/// Owner of the raw vehicle collection.
///
/// Filtering and statistics borrow snapshots from here and never mutate them;
/// the store itself only changes when a fetch completes. Responses for
/// superseded requests are discarded instead of overwriting newer state.
/// Counters are plain integers: the whole dashboard runs single-threaded and
/// cooperative, so there is nothing to synchronize against.
#[derive(Debug, Default)]
pub struct VehicleStore {
    records: Vec<VehicleRecord>,
    source: Option<DataSource>,
    issued: u64,
}

impl VehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The raw collection as last applied. Empty until a fetch completes.
    pub fn records(&self) -> &[VehicleRecord] {
        &self.records
    }

    /// Where the current collection came from, once one has been applied.
    pub fn source(&self) -> Option<DataSource> {
        self.source
    }

    /// Registers a new outstanding request, superseding all earlier ones.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.issued += 1;
        FetchToken(self.issued)
    }

    /// Applies a completed fetch, or discards it when its token is stale.
    ///
    /// An upstream failure is absorbed here: the demo fleet replaces the
    /// collection and the caller surfaces [`FALLBACK_NOTICE`]. That is the
    /// whole recovery strategy; there is no retry.
    pub fn complete_fetch(
        &mut self,
        token: FetchToken,
        result: Result<Vec<VehicleRecord>, RdwApiError>,
    ) -> FetchOutcome {
        if token.0 != self.issued {
            debug!(
                token = token.0,
                latest = self.issued,
                "verouderd antwoord genegeerd"
            );
            return FetchOutcome::Superseded;
        }

        let source = match result {
            Ok(records) => {
                self.records = records;
                DataSource::Live
            }
            Err(error) => {
                warn!(%error, "RDW fetch mislukt, voorbeeldgegevens geladen");
                self.records = sample_records();
                DataSource::Fallback
            }
        };

        self.source = Some(source);
        FetchOutcome::Applied {
            source,
            records: self.records.len(),
        }
    }

    /// Issues a request against the gateway and applies its response in one
    /// step. Convenience for callers without interleaved fetches.
    pub fn refresh(&mut self, gateway: &dyn VehicleGateway, query: &ListQuery) -> FetchOutcome {
        let token = self.begin_fetch();
        let result = gateway.fetch_vehicles(query);
        self.complete_fetch(token, result)
    }

    /// Loads the demo fleet directly, bypassing the network entirely.
    /// Supersedes any fetch still outstanding.
    pub fn load_fallback(&mut self) -> usize {
        self.issued += 1;
        self.records = sample_records();
        self.source = Some(DataSource::Fallback);
        self.records.len()
    }
}
