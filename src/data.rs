use serde::{Serialize, Serializer};
use std::fmt;

/// Why a record could not be produced at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Fetch,
    Processing,
}

/// One extracted value, or the reason there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Found(String),
    NotFound,
    NotApplicable,
    Failed(Failure),
}

impl Field {
    /// `Found` for non-empty text, `NotFound` otherwise.
    pub fn from_text<S: Into<String>>(text: S) -> Field {
        let text = text.into();
        if text.is_empty() {
            Field::NotFound
        } else {
            Field::Found(text)
        }
    }

    pub fn value(&self) -> Option<&str> {
        match self {
            Field::Found(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Field::Found(_))
    }

    fn as_str(&self) -> &str {
        match self {
            Field::Found(v) => v.as_str(),
            Field::NotFound => "not found",
            Field::NotApplicable => "n/a",
            Field::Failed(Failure::Fetch) => "fetch error",
            Field::Failed(Failure::Processing) => "processing error",
        }
    }
}

impl From<Option<String>> for Field {
    fn from(value: Option<String>) -> Self {
        value.map(Field::from_text).unwrap_or(Field::NotFound)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductRecord {
    pub identifier: String,
    pub name: Field,
    pub price: Field,
    pub packaging_unit: Field,
}

impl ProductRecord {
    pub fn failed<S: Into<String>>(identifier: S, failure: Failure) -> ProductRecord {
        ProductRecord {
            identifier: identifier.into(),
            name: Field::Failed(failure),
            price: Field::NotApplicable,
            packaging_unit: Field::NotApplicable,
        }
    }

    pub fn failure(&self) -> Option<Failure> {
        match self.name {
            Field::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn is_scraped(&self) -> bool {
        self.failure().is_none()
    }
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | name: {} | price: {} | packaging unit: {}",
            self.identifier, self.name, self.price, self.packaging_unit
        )
    }
}

pub type ResultSet = Vec<ProductRecord>;
