use url::Url;

/// The open-data resource backing the dashboard.
pub const DATASET_ENDPOINT: &str = "https://opendata.rdw.nl/resource/m9d7-ebf2.json";

/// Dataset column the list view orders on.
pub const REGISTRATION_DATE_FIELD: &str = "datum_tenaamstelling";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn as_soql(self) -> &'static str {
        match self {
            Self::Ascending => "ASC",
            Self::Descending => "DESC",
        }
    }
}

/// Parameters for the list request against the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u32,
    pub order_field: &'static str,
    pub direction: SortDirection,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            order_field: REGISTRATION_DATE_FIELD,
            direction: SortDirection::Descending,
        }
    }
}

impl ListQuery {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    fn order_expression(&self) -> String {
        format!("{} {}", self.order_field, self.direction.as_soql())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlateError {
    #[error("kenteken '{raw}' bevat geen letters of cijfers")]
    Empty { raw: String },
}

/// Reduces user input to the dataset's plate spelling: ASCII letters and
/// digits only, uppercased. An input with nothing left is a validation error,
/// not an empty lookup.
pub fn normalize_plate(raw: &str) -> Result<String, PlateError> {
    let normalized: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if normalized.is_empty() {
        return Err(PlateError::Empty {
            raw: raw.to_string(),
        });
    }

    Ok(normalized)
}

/// Builds the list-request URL: `$limit` plus an `$order` expression.
pub fn list_url(endpoint: &Url, query: &ListQuery) -> Url {
    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("$limit", &query.limit.to_string())
        .append_pair("$order", &query.order_expression());
    url
}

/// Builds the single-plate lookup URL: exact match on the normalized plate,
/// capped at one row. Normalization failures never reach the network.
pub fn lookup_url(endpoint: &Url, plate: &str) -> Result<Url, PlateError> {
    let normalized = normalize_plate(plate)?;

    let mut url = endpoint.clone();
    url.query_pairs_mut()
        .append_pair("kenteken", &normalized)
        .append_pair("$order", &ListQuery::default().order_expression())
        .append_pair("$limit", "1");
    Ok(url)
}
