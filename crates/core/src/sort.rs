//! Sort directives and their compact `+field,-field` form.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};

/// Fields by which to sort results, from the
/// [sort extension](https://github.com/stac-api-extensions/sort).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sortby {
    /// The field to sort by.
    pub field: String,

    /// The direction of the sort.
    pub direction: Direction,
}

/// The sort direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending
    Asc,

    /// Descending
    Desc,
}

/// One or more field names, given either as a list or as a comma-joined string.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldNames(Vec<String>);

impl Sortby {
    /// Creates a new ascending sortby for the field.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Sortby;
    ///
    /// let sortby = Sortby::asc("datetime");
    /// assert_eq!(sortby.to_string(), "+datetime");
    /// ```
    pub fn asc(field: impl ToString) -> Sortby {
        Sortby {
            field: field.to_string(),
            direction: Direction::Asc,
        }
    }

    /// Creates a new descending sortby for the field.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Sortby;
    ///
    /// let sortby = Sortby::desc("datetime");
    /// assert_eq!(sortby.to_string(), "-datetime");
    /// ```
    pub fn desc(field: impl ToString) -> Sortby {
        Sortby {
            field: field.to_string(),
            direction: Direction::Desc,
        }
    }

    /// Parses a compact sort string, e.g. `+datetime,-eo:cloud_cover`.
    ///
    /// A leading `-` is descending, a leading `+` or no prefix is ascending.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Sortby;
    ///
    /// let sortby = Sortby::parse_compact("datetime,-cloud_cover").unwrap();
    /// assert_eq!(sortby, vec![Sortby::asc("datetime"), Sortby::desc("cloud_cover")]);
    /// assert!(Sortby::parse_compact("").is_err());
    /// assert!(Sortby::parse_compact(None).is_err());
    /// ```
    pub fn parse_compact<'a>(s: impl Into<Option<&'a str>>) -> Result<Vec<Sortby>> {
        match s.into() {
            None | Some("") => Err(Error::EmptyAttribute("sortby")),
            Some(s) => s.split(',').map(str::parse).collect(),
        }
    }

    /// Parses direction-grouped entries, e.g.
    /// `[("asc", "datetime,id"), ("desc", "eo:cloud_cover")]`.
    ///
    /// Every field of an entry is emitted, in order, before the next entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Sortby;
    ///
    /// let sortby =
    ///     Sortby::parse_grouped([("asc", "datetime,id"), ("desc", "eo:cloud_cover")]).unwrap();
    /// assert_eq!(
    ///     sortby,
    ///     vec![Sortby::asc("datetime"), Sortby::asc("id"), Sortby::desc("eo:cloud_cover")]
    /// );
    /// ```
    pub fn parse_grouped<D, F>(entries: impl IntoIterator<Item = (D, F)>) -> Result<Vec<Sortby>>
    where
        D: AsRef<str>,
        F: Into<FieldNames>,
    {
        let mut sortby = Vec::new();
        for (direction, fields) in entries {
            let direction: Direction = direction.as_ref().parse()?;
            sortby.extend(fields.into().0.into_iter().map(|field| Sortby { field, direction }));
        }
        Ok(sortby)
    }
}

/// Writes a list of sortbys as a compact sort string.
///
/// # Examples
///
/// ```
/// use stac_search::{Sortby, sort::to_compact};
///
/// assert_eq!(to_compact(&[Sortby::asc("datetime"), Sortby::desc("id")]), "+datetime,-id");
/// ```
pub fn to_compact(sortby: &[Sortby]) -> String {
    sortby
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

impl FromStr for Sortby {
    type Err = Error;

    fn from_str(s: &str) -> Result<Sortby> {
        if let Some(field) = s.strip_prefix('-') {
            Ok(Sortby::desc(field))
        } else if let Some(field) = s.strip_prefix('+') {
            Ok(Sortby::asc(field))
        } else {
            Ok(Sortby::asc(s))
        }
    }
}

impl Display for Sortby {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "+{}", self.field),
            Direction::Desc => write!(f, "-{}", self.field),
        }
    }
}

impl Direction {
    const VALUES: &'static [&'static str] = &["asc", "desc"];
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Direction> {
        match s {
            "asc" => Ok(Direction::Asc),
            "desc" => Ok(Direction::Desc),
            _ => Err(Error::InvalidEnumValue {
                attribute: "direction",
                value: s.to_string(),
                expected: Direction::VALUES,
            }),
        }
    }
}

impl FieldNames {
    /// Returns the field names.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for FieldNames {
    fn from(value: &str) -> Self {
        FieldNames(value.split(',').map(String::from).collect())
    }
}

impl From<String> for FieldNames {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<Vec<String>> for FieldNames {
    fn from(value: Vec<String>) -> Self {
        FieldNames(value)
    }
}

impl From<Vec<&str>> for FieldNames {
    fn from(value: Vec<&str>) -> Self {
        FieldNames(value.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for FieldNames {
    fn from(value: [&str; N]) -> Self {
        FieldNames(value.into_iter().map(String::from).collect())
    }
}
