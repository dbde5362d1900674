use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{fmt::Display, str::FromStr};

/// A CQL2 filter, from the [filter extension](https://github.com/stac-api-extensions/filter).
///
/// Text filters are passed through untouched. Structured filters are kept as
/// an `{op, args}` node and are not validated beyond that shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Filter {
    /// A cql2-text expression.
    Cql2Text(String),

    /// A cql2-json expression node.
    Cql2Json(FilterExpr),
}

/// A structured cql2-json node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterExpr {
    /// The operator, e.g. `and` or `<=`.
    pub op: String,

    /// The arguments: nested nodes, literals, or `{"property": ...}` references.
    pub args: Vec<Value>,
}

/// The language of a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterLang {
    /// `cql2-json`
    #[serde(rename = "cql2-json")]
    Cql2Json,

    /// `cql2-text`
    #[serde(rename = "cql2-text")]
    Cql2Text,
}

impl Filter {
    /// Creates a structured filter from an operator and its arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_search::{Filter, FilterLang};
    ///
    /// let filter = Filter::expr("<=", vec![json!({"property": "eo:cloud_cover"}), json!(10)]);
    /// assert_eq!(filter.lang(), FilterLang::Cql2Json);
    /// ```
    pub fn expr(op: impl ToString, args: Vec<Value>) -> Filter {
        Filter::Cql2Json(FilterExpr {
            op: op.to_string(),
            args,
        })
    }

    /// Returns the language this filter is written in.
    pub fn lang(&self) -> FilterLang {
        match self {
            Filter::Cql2Text(_) => FilterLang::Cql2Text,
            Filter::Cql2Json(_) => FilterLang::Cql2Json,
        }
    }

    /// Returns this filter as a string suitable for a GET query parameter.
    ///
    /// Structured filters are written as compact JSON.
    pub fn to_get_param(&self) -> Result<String> {
        match self {
            Filter::Cql2Text(text) => Ok(text.clone()),
            Filter::Cql2Json(expr) => serde_json::to_string(expr).map_err(Error::from),
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        Filter::Cql2Text(value.to_string())
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        Filter::Cql2Text(value)
    }
}

impl From<FilterExpr> for Filter {
    fn from(value: FilterExpr) -> Self {
        Filter::Cql2Json(value)
    }
}

impl FilterLang {
    const VALUES: &'static [&'static str] = &["cql2-json", "cql2-text"];

    /// Returns this language's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterLang::Cql2Json => "cql2-json",
            FilterLang::Cql2Text => "cql2-text",
        }
    }
}

impl FromStr for FilterLang {
    type Err = Error;

    fn from_str(s: &str) -> Result<FilterLang> {
        match s {
            "cql2-json" => Ok(FilterLang::Cql2Json),
            "cql2-text" => Ok(FilterLang::Cql2Text),
            _ => Err(Error::InvalidEnumValue {
                attribute: "filter-lang",
                value: s.to_string(),
                expected: FilterLang::VALUES,
            }),
        }
    }
}

impl Display for FilterLang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Filter, FilterExpr, FilterLang};
    use serde_json::json;

    fn cloud_cover() -> Filter {
        Filter::expr(
            "or",
            vec![
                json!({"op": "=", "args": [{"property": "collection"}, "landsat8_l1tp"]}),
                json!({"op": "<=", "args": [{"property": "eo:cloud_cover"}, 10]}),
            ],
        )
    }

    #[test]
    fn structured_to_value() {
        assert_eq!(
            serde_json::to_value(cloud_cover()).unwrap(),
            json!({
                "op": "or",
                "args": [
                    {"op": "=", "args": [{"property": "collection"}, "landsat8_l1tp"]},
                    {"op": "<=", "args": [{"property": "eo:cloud_cover"}, 10]},
                ]
            })
        );
    }

    #[test]
    fn text_passes_through() {
        let filter = Filter::from("collection='landsat8_l1tp'");
        assert_eq!(filter.lang(), FilterLang::Cql2Text);
        assert_eq!(serde_json::to_value(&filter).unwrap(), "collection='landsat8_l1tp'");
        assert_eq!(filter.to_get_param().unwrap(), "collection='landsat8_l1tp'");
    }

    #[test]
    fn structured_get_param() {
        let filter = Filter::from(FilterExpr {
            op: "=".to_string(),
            args: vec![json!({"property": "id"}), json!("an-id")],
        });
        assert_eq!(
            filter.to_get_param().unwrap(),
            r#"{"op":"=","args":[{"property":"id"},"an-id"]}"#
        );
    }

    #[test]
    fn deserialize() {
        let filter: Filter = serde_json::from_value(json!({"op": "and", "args": []})).unwrap();
        assert_eq!(filter, Filter::expr("and", Vec::new()));
        let filter: Filter = serde_json::from_value(json!("id='a'")).unwrap();
        assert_eq!(filter, Filter::from("id='a'"));
    }

    #[test]
    fn filter_lang() {
        assert_eq!("cql2-json".parse::<FilterLang>().unwrap(), FilterLang::Cql2Json);
        assert_eq!("cql2-text".parse::<FilterLang>().unwrap(), FilterLang::Cql2Text);
        assert!("cql2".parse::<FilterLang>().is_err());
        assert_eq!(FilterLang::Cql2Json.to_string(), "cql2-json");
    }
}
