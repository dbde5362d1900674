use crate::{Error, Result, ToJsonMap};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{fmt::Display, str::FromStr};

/// The canonical query operator names.
pub const OPERATORS: [&str; 10] = [
    "eq",
    "neq",
    "lt",
    "lte",
    "gt",
    "gte",
    "startsWith",
    "endsWith",
    "contains",
    "in",
];

/// Comparison symbols that are accepted in place of a canonical operator.
pub const SYNONYMS: [(&str, Operator); 6] = [
    ("==", Operator::Eq),
    ("!=", Operator::Neq),
    ("<", Operator::Lt),
    ("<=", Operator::Lte),
    (">", Operator::Gt),
    (">=", Operator::Gte),
];

/// A query operator.
///
/// See the [query fragment](https://github.com/stac-api-extensions/query) for
/// the semantics of each one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(missing_docs)]
pub enum Operator {
    Eq,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    StartsWith,
    EndsWith,
    Contains,
    In,
}

impl Operator {
    const ALL: [Operator; 10] = [
        Operator::Eq,
        Operator::Neq,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
        Operator::StartsWith,
        Operator::EndsWith,
        Operator::Contains,
        Operator::In,
    ];

    /// Returns the canonical name of this operator.
    pub fn as_str(&self) -> &'static str {
        OPERATORS[*self as usize]
    }

    /// Resolves a canonical name or a comparison symbol to the canonical name.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Operator;
    ///
    /// assert_eq!(Operator::canonicalize(">=").unwrap(), "gte");
    /// assert_eq!(Operator::canonicalize("startsWith").unwrap(), "startsWith");
    /// assert!(Operator::canonicalize("wrong").is_err());
    /// ```
    pub fn canonicalize(symbol: &str) -> Result<&'static str> {
        symbol.parse::<Operator>().map(|operator| operator.as_str())
    }
}

impl FromStr for Operator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Operator> {
        SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == s)
            .map(|(_, operator)| *operator)
            .or_else(|| Operator::ALL.into_iter().find(|operator| operator.as_str() == s))
            .ok_or_else(|| Error::InvalidOperator(s.to_string()))
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One property with one or more comparisons, from the
/// [query fragment](https://github.com/stac-api-extensions/query).
///
/// Its JSON map is `{property: {operator: value, ...}}`.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    property: String,
    operators: Vec<(Operator, Value)>,
}

impl Query {
    /// Creates a new query, resolving every operator symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::{Operator, Query};
    ///
    /// let query = Query::new("datetime", [(">", "2020-01-01"), ("lt", "2020-01-02")]).unwrap();
    /// assert_eq!(query.operators()[0].0, Operator::Gt);
    /// assert!(Query::new("bbox", [("wrong", 2)]).is_err());
    /// ```
    pub fn new<O, V>(
        property: impl ToString,
        operators: impl IntoIterator<Item = (O, V)>,
    ) -> Result<Query>
    where
        O: AsRef<str>,
        V: Into<Value>,
    {
        let operators = operators
            .into_iter()
            .map(|(symbol, value)| Ok((symbol.as_ref().parse::<Operator>()?, value.into())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Query {
            property: property.to_string(),
            operators,
        })
    }

    /// Returns the queried property.
    pub fn property(&self) -> &str {
        &self.property
    }

    /// Returns the resolved operators and their values, in input order.
    pub fn operators(&self) -> &[(Operator, Value)] {
        &self.operators
    }
}

impl ToJsonMap for Query {
    fn to_json_map(&self) -> Map<String, Value> {
        let comparisons: Map<String, Value> = self
            .operators
            .iter()
            .map(|(operator, value)| (operator.to_string(), value.clone()))
            .collect();
        let mut map = Map::new();
        let _ = map.insert(self.property.clone(), Value::Object(comparisons));
        map
    }
}
