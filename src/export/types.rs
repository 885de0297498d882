//! Export types and options.

use std::convert::Infallible;
use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error_handling::ExportError;

/// Maximum number of rows pulled per fetch in bounded batching.
///
/// Always positive; construction rejects zero and negative values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchSize(NonZeroUsize);

impl BatchSize {
    /// Validates a raw batch size.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidConfiguration` if `n` is zero or negative.
    pub fn new(n: i64) -> Result<Self, ExportError> {
        usize::try_from(n)
            .ok()
            .and_then(NonZeroUsize::new)
            .map(BatchSize)
            .ok_or_else(|| {
                ExportError::invalid(format!("batch size must be a positive integer, got {n}"))
            })
    }

    /// Returns the batch size as a `usize`.
    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<i64> for BatchSize {
    type Error = ExportError;

    fn try_from(n: i64) -> Result<Self, Self::Error> {
        BatchSize::new(n)
    }
}

impl From<NonZeroUsize> for BatchSize {
    fn from(n: NonZeroUsize) -> Self {
        BatchSize(n)
    }
}

impl fmt::Display for BatchSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A value bound to a `?` placeholder in the export condition.
#[derive(Clone, Debug, PartialEq)]
pub enum ConditionParam {
    /// 64-bit signed integer
    Integer(i64),
    /// Floating point value
    Real(f64),
    /// UTF-8 text
    Text(String),
}

/// Parses a CLI value: integer if it parses, else real, else text.
impl FromStr for ConditionParam {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(i) = s.parse::<i64>() {
            return Ok(ConditionParam::Integer(i));
        }
        if let Ok(f) = s.parse::<f64>() {
            if f.is_finite() {
                return Ok(ConditionParam::Real(f));
            }
        }
        Ok(ConditionParam::Text(s.to_string()))
    }
}

impl From<i64> for ConditionParam {
    fn from(v: i64) -> Self {
        ConditionParam::Integer(v)
    }
}

impl From<f64> for ConditionParam {
    fn from(v: f64) -> Self {
        ConditionParam::Real(v)
    }
}

impl From<&str> for ConditionParam {
    fn from(v: &str) -> Self {
        ConditionParam::Text(v.to_string())
    }
}

impl From<String> for ConditionParam {
    fn from(v: String) -> Self {
        ConditionParam::Text(v)
    }
}

/// Configuration for one export run.
///
/// Built by the caller, consumed by [`export`](super::export), then discarded.
///
/// # Examples
///
/// ```no_run
/// use column_export::export::ExportRequest;
///
/// # fn example() -> Result<(), column_export::ExportError> {
/// let request = ExportRequest::new("my_db.sqlite", "my_table", "variable4", "sqlite_out.txt")
///     .with_condition("variable1 = ? AND variable2 <= ? AND variable3 = ?")
///     .with_param(1)
///     .with_param(5)
///     .with_param("Zinc_Plus")
///     .with_batch_size(500)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ExportRequest {
    /// Path of the SQLite database to read from
    pub source_location: PathBuf,
    /// Table (or view) to query
    pub table_name: String,
    /// Filter predicate, inserted verbatim after `WHERE`
    pub condition: String,
    /// Values bound, in order, to `?` placeholders in `condition`
    pub condition_params: Vec<ConditionParam>,
    /// Column whose value is written for each matching row
    pub content_column: String,
    /// Output file (created or truncated)
    pub destination: PathBuf,
    /// Fetch in chunks of this size; `None` iterates row by row
    pub batch_size: Option<BatchSize>,
    /// Bytes written between consecutive values; `None` concatenates
    pub separator: Option<Vec<u8>>,
}

impl ExportRequest {
    /// Creates a request matching every row (`WHERE 1`), iterated row by row.
    pub fn new(
        source_location: impl Into<PathBuf>,
        table_name: impl Into<String>,
        content_column: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_location: source_location.into(),
            table_name: table_name.into(),
            condition: "1".to_string(),
            condition_params: Vec::new(),
            content_column: content_column.into(),
            destination: destination.into(),
            batch_size: None,
            separator: None,
        }
    }

    /// Sets the filter predicate.
    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = condition.into();
        self
    }

    /// Appends a value for the next `?` placeholder in the condition.
    pub fn with_param(mut self, param: impl Into<ConditionParam>) -> Self {
        self.condition_params.push(param.into());
        self
    }

    /// Switches to bounded batching.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidConfiguration` if `batch_size` is not positive.
    pub fn with_batch_size(mut self, batch_size: i64) -> Result<Self, ExportError> {
        self.batch_size = Some(BatchSize::new(batch_size)?);
        Ok(self)
    }

    /// Writes `separator` between consecutive values.
    pub fn with_separator(mut self, separator: impl Into<Vec<u8>>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Checks the request before any resource is opened.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::InvalidConfiguration` if a required field is empty.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.source_location.as_os_str().is_empty() {
            return Err(ExportError::invalid("source location must not be empty"));
        }
        if self.table_name.trim().is_empty() {
            return Err(ExportError::invalid("table name must not be empty"));
        }
        if self.content_column.trim().is_empty() {
            return Err(ExportError::invalid("content column must not be empty"));
        }
        if self.condition.trim().is_empty() {
            return Err(ExportError::invalid("condition must not be empty"));
        }
        if self.destination.as_os_str().is_empty() {
            return Err(ExportError::invalid("destination must not be empty"));
        }
        Ok(())
    }
}
