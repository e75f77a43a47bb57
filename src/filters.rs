//! Translation of `/api/smashings` query parameters into range predicates.

use crate::error::AppError;
use crate::models::Smashing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Length,
    Sentiment,
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    GreaterThan,
    LessThan,
}

/// The closed set of query keys the list endpoint understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKey {
    LengthGt,
    LengthLt,
    SentimentGt,
    SentimentLt,
    DateGt,
    DateLt,
}

impl FilterKey {
    pub const ALL: [FilterKey; 6] = [
        FilterKey::LengthGt,
        FilterKey::LengthLt,
        FilterKey::SentimentGt,
        FilterKey::SentimentLt,
        FilterKey::DateGt,
        FilterKey::DateLt,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FilterKey::LengthGt => "lengthGt",
            FilterKey::LengthLt => "lengthLt",
            FilterKey::SentimentGt => "sentimentGt",
            FilterKey::SentimentLt => "sentimentLt",
            FilterKey::DateGt => "dateGt",
            FilterKey::DateLt => "dateLt",
        }
    }

    pub fn field(self) -> Field {
        match self {
            FilterKey::LengthGt | FilterKey::LengthLt => Field::Length,
            FilterKey::SentimentGt | FilterKey::SentimentLt => Field::Sentiment,
            FilterKey::DateGt | FilterKey::DateLt => Field::Date,
        }
    }

    pub fn comparison(self) -> Comparison {
        match self {
            FilterKey::LengthGt | FilterKey::SentimentGt | FilterKey::DateGt => {
                Comparison::GreaterThan
            }
            FilterKey::LengthLt | FilterKey::SentimentLt | FilterKey::DateLt => Comparison::LessThan,
        }
    }
}

/// A query value coerced to the type of the attribute it is compared with.
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub field: Field,
    pub comparison: Comparison,
    pub bound: Bound,
}

impl Filter {
    pub fn parse(key: &str, value: &str) -> Result<Self, AppError> {
        let filter_key =
            FilterKey::parse(key).ok_or_else(|| AppError::UnknownFilter(key.to_string()))?;

        let invalid = || AppError::InvalidFilterValue {
            key: filter_key.as_str(),
            value: value.to_string(),
        };

        let bound = match filter_key.field() {
            Field::Length | Field::Sentiment => {
                let parsed: f64 = value.trim().parse().map_err(|_| invalid())?;
                if parsed.is_nan() {
                    return Err(invalid());
                }
                Bound::Number(parsed)
            }
            Field::Date => Bound::Text(value.to_string()),
        };

        Ok(Self {
            field: filter_key.field(),
            comparison: filter_key.comparison(),
            bound,
        })
    }

    pub fn matches(&self, smashing: &Smashing) -> bool {
        let ordering = match (&self.field, &self.bound) {
            (Field::Length, Bound::Number(bound)) => (smashing.length as f64).partial_cmp(bound),
            (Field::Sentiment, Bound::Number(bound)) => smashing.sentiment.partial_cmp(bound),
            (Field::Date, Bound::Text(bound)) => smashing.date.as_str().partial_cmp(bound.as_str()),
            _ => None,
        };

        match (ordering, self.comparison) {
            (Some(std::cmp::Ordering::Greater), Comparison::GreaterThan) => true,
            (Some(std::cmp::Ordering::Less), Comparison::LessThan) => true,
            _ => false,
        }
    }
}

/// Conjunction of filters. An empty set matches every record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<Filter>,
}

impl FilterSet {
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Result<Self, AppError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let filters = pairs
            .into_iter()
            .map(|(k, v)| Filter::parse(k.as_ref(), v.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { filters })
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn matches(&self, smashing: &Smashing) -> bool {
        self.filters.iter().all(|f| f.matches(smashing))
    }
}
