use std::io::Read;
use std::time::Duration;

use chrono::{DateTime, Utc};
use csv::StringRecord;
use thiserror::Error;

use super::model::Reading;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failures of the one startup query. All of them are fatal: the caller
/// aborts before the UI opens (no retry, no partial result).
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("could not reach InfluxDB at {url}: {source}")]
    Connection {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },
    #[error("InfluxDB rejected the query (HTTP {status}): {body}")]
    Query { status: u16, body: String },
    #[error("malformed query response: {0}")]
    Malformed(String),
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin client for the InfluxDB v2 `/api/v2/query` endpoint.
pub struct InfluxClient {
    url: String,
    org: String,
    token: String,
    agent: ureq::Agent,
}

impl InfluxClient {
    pub fn new(url: &str, org: &str, token: &str) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(QUERY_TIMEOUT).build();
        InfluxClient {
            url: url.trim_end_matches('/').to_string(),
            org: org.to_string(),
            token: token.to_string(),
            agent,
        }
    }

    /// The fixed query: a range over the last `window_days`, pivoted so each
    /// row carries one timestamp and one column per field.
    fn flux_query(bucket: &str, window_days: u32) -> String {
        format!(
            "from(bucket: \"{bucket}\") \
             |> range(start: -{window_days}d) \
             |> pivot(rowKey:[\"_time\"], columnKey: [\"_field\"], valueColumn: \"_value\")"
        )
    }

    /// Issue the query and decode the full reading set. One synchronous
    /// call; a failed transport maps to [`FetchError::Connection`], a
    /// non-2xx response to [`FetchError::Query`].
    pub fn query_readings(
        &self,
        bucket: &str,
        window_days: u32,
    ) -> Result<Vec<Reading>, FetchError> {
        let flux = Self::flux_query(bucket, window_days);
        log::info!(
            "querying {} (bucket {bucket}, last {window_days}d)",
            self.url
        );

        let endpoint = format!("{}/api/v2/query", self.url);
        let response = self
            .agent
            .post(&endpoint)
            .query("org", &self.org)
            .set("Authorization", &format!("Token {}", self.token))
            .set("Accept", "application/csv")
            .set("Content-Type", "application/vnd.flux")
            .send_string(&flux)
            .map_err(|e| match e {
                ureq::Error::Status(status, resp) => FetchError::Query {
                    status,
                    body: resp.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(t) => FetchError::Connection {
                    url: self.url.clone(),
                    source: Box::new(t),
                },
            })?;

        parse_annotated_csv(response.into_reader())
    }
}

// ---------------------------------------------------------------------------
// Annotated-CSV decoding
// ---------------------------------------------------------------------------

/// Column positions of the fields we keep. Everything else the server
/// sends (`result`, `table`, `_start`, `_stop`, `_measurement`, `device`)
/// is ignored.
struct Columns {
    time: usize,
    location: usize,
    temperature: usize,
    humidity: usize,
}

/// Decode the annotated-CSV body of a Flux query response.
///
/// Annotation rows start with `#`. A response may contain several tables,
/// each introduced by its own header row; headers are recognised by the
/// presence of a `_time` column and reset the column mapping.
pub fn parse_annotated_csv<R: Read>(reader: R) -> Result<Vec<Reading>, FetchError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let mut columns: Option<Columns> = None;
    let mut readings = Vec::new();

    for (row, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| FetchError::Malformed(format!("row {row}: {e}")))?;
        if record.iter().all(str::is_empty) {
            continue;
        }
        if record.iter().any(|f| f == "_time") {
            columns = Some(Columns {
                time: position(&record, "_time", row)?,
                location: position(&record, "location", row)?,
                temperature: position(&record, "tempf", row)?,
                humidity: position(&record, "humidityi", row)?,
            });
            continue;
        }

        let cols = columns
            .as_ref()
            .ok_or_else(|| FetchError::Malformed(format!("row {row}: data before header")))?;
        readings.push(Reading {
            time: parse_time(field(&record, cols.time, row)?, row)?,
            location: field(&record, cols.location, row)?.to_string(),
            temperature: parse_value(field(&record, cols.temperature, row)?, row)?,
            humidity: parse_value(field(&record, cols.humidity, row)?, row)?,
        });
    }

    Ok(readings)
}

fn position(header: &StringRecord, name: &str, row: usize) -> Result<usize, FetchError> {
    header
        .iter()
        .position(|f| f == name)
        .ok_or_else(|| FetchError::Malformed(format!("row {row}: header is missing '{name}'")))
}

fn field<'r>(record: &'r StringRecord, index: usize, row: usize) -> Result<&'r str, FetchError> {
    record
        .get(index)
        .ok_or_else(|| FetchError::Malformed(format!("row {row}: missing column {index}")))
}

fn parse_time(s: &str, row: usize) -> Result<DateTime<Utc>, FetchError> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| FetchError::Malformed(format!("row {row}: bad timestamp '{s}': {e}")))
}

fn parse_value(s: &str, row: usize) -> Result<f64, FetchError> {
    s.parse::<f64>()
        .map_err(|_| FetchError::Malformed(format!("row {row}: '{s}' is not a number")))
}
