use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Extracted rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRecord {
    pub name: String,
    /// 0 when the cell is present but not a number.
    pub price: u64,
    /// Raw, may carry sign or percent formatting.
    pub change: String,
    /// Raw row timestamp as printed on the page.
    pub time: String,
}

/// What one page yields for one currency label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub unit: String,
    pub date: Option<String>,
    pub data: Vec<PriceRecord>,
}

// ---------------------------------------------------------------------------
// Per-currency outcome
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyResult {
    Success {
        unit: String,
        date: Option<String>,
        data: Vec<PriceRecord>,
        flag: String,
    },
    Failure {
        error: String,
        flag: String,
    },
}

impl CurrencyResult {
    pub fn success(extraction: Extraction, flag: &str) -> Self {
        CurrencyResult::Success {
            unit: extraction.unit,
            date: extraction.date,
            data: extraction.data,
            flag: flag.to_string(),
        }
    }

    pub fn failure(error: String, flag: &str) -> Self {
        CurrencyResult::Failure {
            error,
            flag: flag.to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CurrencyResult::Failure { .. })
    }

    pub fn flag(&self) -> &str {
        match self {
            CurrencyResult::Success { flag, .. } | CurrencyResult::Failure { flag, .. } => flag,
        }
    }
}

// ---------------------------------------------------------------------------
// Aggregate report
// ---------------------------------------------------------------------------

/// Currency name → outcome, kept in scrape order and written as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Currencies(Vec<(String, CurrencyResult)>);

impl Currencies {
    pub fn insert(&mut self, name: &str, result: CurrencyResult) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = result,
            None => self.0.push((name.to_string(), result)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CurrencyResult> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CurrencyResult)> {
        self.0.iter().map(|(n, r)| (n.as_str(), r))
    }
}

impl Serialize for Currencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, result) in &self.0 {
            map.serialize_entry(name, result)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateResult {
    pub ok: bool,
    /// Local wall clock at scrape completion.
    pub updated: String,
    pub currencies: Currencies,
}

/// Top-level shape when the run could not complete.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub ok: bool,
    pub error: String,
}

impl FailureReport {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
        }
    }
}
