//! Exchange-rate series handling

use crate::error::{Result, TrendError};
use crate::utils::date_parser;
use chrono::{Days, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs::File;
use std::path::Path;

/// A base/target currency pair such as EUR/GBP
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CurrencyPair {
    /// Currency the rate is quoted from
    pub base: String,
    /// Currency the rate is quoted in
    pub target: String,
}

impl CurrencyPair {
    /// Create a pair, upper-casing both codes
    pub fn new(base: &str, target: &str) -> Self {
        Self {
            base: base.trim().to_uppercase(),
            target: target.trim().to_uppercase(),
        }
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.target)
    }
}

/// One observed exchange rate on a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatePoint {
    /// Day of the observation
    pub date: NaiveDate,
    /// Units of target currency per unit of base currency
    pub rate: f64,
}

impl RatePoint {
    pub fn new(date: NaiveDate, rate: f64) -> Self {
        Self { date, rate }
    }
}

/// Ordered daily rate observations for one currency pair.
///
/// Construction checks the collaborator contract: dates strictly ascending
/// (no duplicates) and every rate finite and positive. An empty series is
/// allowed; the engine reports it when metrics are requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesParts")]
pub struct RateSeries {
    pair: CurrencyPair,
    points: Vec<RatePoint>,
}

#[derive(Deserialize)]
struct SeriesParts {
    pair: CurrencyPair,
    points: Vec<RatePoint>,
}

impl TryFrom<SeriesParts> for RateSeries {
    type Error = TrendError;

    fn try_from(parts: SeriesParts) -> Result<Self> {
        RateSeries::new(parts.pair, parts.points)
    }
}

impl RateSeries {
    /// Create a validated series
    pub fn new(pair: CurrencyPair, points: Vec<RatePoint>) -> Result<Self> {
        for (i, point) in points.iter().enumerate() {
            if !point.rate.is_finite() || point.rate <= 0.0 {
                return Err(TrendError::InvalidSeries(format!(
                    "rate on {} must be a finite positive number, got {}",
                    point.date, point.rate
                )));
            }
            if i > 0 && points[i - 1].date >= point.date {
                return Err(TrendError::InvalidSeries(format!(
                    "dates must be strictly ascending: {} follows {}",
                    point.date,
                    points[i - 1].date
                )));
            }
        }

        Ok(Self { pair, points })
    }

    /// Create a series from `(date, rate)` pairs (for testing and small inputs)
    pub fn from_pairs(pair: CurrencyPair, pairs: &[(NaiveDate, f64)]) -> Result<Self> {
        let points = pairs
            .iter()
            .map(|&(date, rate)| RatePoint::new(date, rate))
            .collect();
        Self::new(pair, points)
    }

    pub fn pair(&self) -> &CurrencyPair {
        &self.pair
    }

    pub fn points(&self) -> &[RatePoint] {
        &self.points
    }

    /// Rate values in date order
    pub fn rates(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.rate).collect()
    }

    pub fn first(&self) -> Option<&RatePoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&RatePoint> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points whose date lies within `days` calendar days of the last date
    pub fn trailing(&self, days: u32) -> RateSeries {
        let points = match self.points.last() {
            Some(last) => match last.date.checked_sub_days(Days::new(u64::from(days))) {
                Some(cutoff) => self
                    .points
                    .iter()
                    .filter(|p| p.date > cutoff)
                    .copied()
                    .collect(),
                None => self.points.clone(),
            },
            None => Vec::new(),
        };

        // A subsequence of a valid series is still valid
        RateSeries {
            pair: self.pair.clone(),
            points,
        }
    }
}

/// Provider document shape: `{"rates": {"2024-01-01": {"GBP": 0.86}}}`
#[derive(Debug, Deserialize)]
struct ProviderDocument {
    rates: BTreeMap<NaiveDate, HashMap<String, f64>>,
}

/// Loader for rate series files
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a rate series from a CSV file.
    ///
    /// The file needs a header with a `date` column and either a `rate` column
    /// or a column named after the target currency. Rows are sorted by date.
    pub fn from_csv<P: AsRef<Path>>(path: P, pair: CurrencyPair) -> Result<RateSeries> {
        let path = path.as_ref();
        debug!("Loading {} rates from {}", pair, path.display());

        let file = File::open(path)?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader.headers()?.clone();
        let find = |wanted: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(wanted))
        };
        let date_idx = find("date").ok_or_else(|| {
            TrendError::InvalidSeries("CSV input has no `date` column".to_string())
        })?;
        let rate_idx = find("rate").or_else(|| find(pair.target.as_str())).ok_or_else(|| {
            TrendError::InvalidSeries(format!(
                "CSV input has neither a `rate` nor a `{}` column",
                pair.target
            ))
        })?;

        let mut points = Vec::new();
        for (line, record) in reader.records().enumerate() {
            let record = record?;
            let field = |idx: usize| record.get(idx).map(str::trim).unwrap_or_default();

            let date = date_parser::parse_date(field(date_idx))?;
            let rate = field(rate_idx).parse::<f64>().map_err(|e| {
                TrendError::InvalidSeries(format!(
                    "row {}: invalid rate {:?}: {}",
                    line + 1,
                    field(rate_idx),
                    e
                ))
            })?;
            points.push(RatePoint::new(date, rate));
        }

        points.sort_by_key(|p| p.date);
        debug!("Loaded {} points for {}", points.len(), pair);

        RateSeries::new(pair, points)
    }

    /// Load a rate series from a provider JSON document
    pub fn from_json_str(document: &str, pair: CurrencyPair) -> Result<RateSeries> {
        let doc: ProviderDocument = serde_json::from_str(document)?;

        let points = doc
            .rates
            .into_iter()
            .map(|(date, quotes)| {
                quotes
                    .get(&pair.target)
                    .map(|&rate| RatePoint::new(date, rate))
                    .ok_or_else(|| {
                        TrendError::InvalidSeries(format!(
                            "no {} quote on {}",
                            pair.target, date
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        RateSeries::new(pair, points)
    }

    /// Load a rate series from a provider JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P, pair: CurrencyPair) -> Result<RateSeries> {
        let path = path.as_ref();
        debug!("Loading {} rates from {}", pair, path.display());

        let document = std::fs::read_to_string(path)?;
        Self::from_json_str(&document, pair)
    }

    /// Load a file, choosing the format from its extension (`.json` or CSV)
    pub fn from_path<P: AsRef<Path>>(path: P, pair: CurrencyPair) -> Result<RateSeries> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json_file(path, pair)
        } else {
            Self::from_csv(path, pair)
        }
    }
}
