use crate::{Error, Result, ToJsonMap, json::merge};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::{fmt::Display, str::FromStr};

/// Whether a field set includes or excludes its fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Only return these fields.
    Include,

    /// Do not return these fields.
    Exclude,
}

/// A list of field names that are either all included or all excluded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldSet {
    field_type: FieldType,
    fields: Vec<String>,
}

/// Include/exclude fields from item search results, from the
/// [fields extension](https://github.com/stac-api-extensions/fields).
///
/// At most one include set and one exclude set.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Fields {
    include: Option<FieldSet>,
    exclude: Option<FieldSet>,
}

impl FieldType {
    const VALUES: &'static [&'static str] = &["include", "exclude"];

    /// Returns this type's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Include => "include",
            FieldType::Exclude => "exclude",
        }
    }
}

impl FromStr for FieldType {
    type Err = Error;

    fn from_str(s: &str) -> Result<FieldType> {
        match s {
            "include" => Ok(FieldType::Include),
            "exclude" => Ok(FieldType::Exclude),
            _ => Err(Error::InvalidEnumValue {
                attribute: "field_type",
                value: s.to_string(),
                expected: FieldType::VALUES,
            }),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FieldSet {
    /// Creates a new field set.
    pub fn new<S: ToString>(
        field_type: FieldType,
        fields: impl IntoIterator<Item = S>,
    ) -> FieldSet {
        FieldSet {
            field_type,
            fields: fields.into_iter().map(|field| field.to_string()).collect(),
        }
    }

    /// Creates a new include field set.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::FieldSet;
    ///
    /// let fields = FieldSet::include(["datetime", "cloud_cover"]);
    /// assert_eq!(fields.to_string(), "+datetime,+cloud_cover");
    /// ```
    pub fn include<S: ToString>(fields: impl IntoIterator<Item = S>) -> FieldSet {
        FieldSet::new(FieldType::Include, fields)
    }

    /// Creates a new exclude field set.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::FieldSet;
    ///
    /// let fields = FieldSet::exclude(["datetime", "cloud_cover"]);
    /// assert_eq!(fields.to_string(), "-datetime,-cloud_cover");
    /// ```
    pub fn exclude<S: ToString>(fields: impl IntoIterator<Item = S>) -> FieldSet {
        FieldSet::new(FieldType::Exclude, fields)
    }

    /// Returns this set's type.
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// Returns the field names.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Display for FieldSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = match self.field_type {
            FieldType::Include => '+',
            FieldType::Exclude => '-',
        };
        let fields: Vec<String> = self
            .fields
            .iter()
            .map(|field| format!("{sign}{field}"))
            .collect();
        f.write_str(&fields.join(","))
    }
}

impl ToJsonMap for FieldSet {
    fn to_json_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let _ = map.insert(
            self.field_type.to_string(),
            Value::Array(self.fields.iter().cloned().map(Value::String).collect()),
        );
        map
    }
}

impl Fields {
    /// Parses a compact fields string, e.g. `+datetime,-eo:cloud_cover`.
    ///
    /// A leading `-` excludes the field, a leading `+` or no prefix includes it.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::{FieldSet, Fields};
    ///
    /// let fields = Fields::parse_compact("datetime,-cloud_cover,+id").unwrap();
    /// assert_eq!(fields.include(), Some(&FieldSet::include(["datetime", "id"])));
    /// assert_eq!(fields.exclude(), Some(&FieldSet::exclude(["cloud_cover"])));
    /// ```
    pub fn parse_compact<'a>(s: impl Into<Option<&'a str>>) -> Result<Fields> {
        let s = match s.into() {
            None | Some("") => return Err(Error::EmptyAttribute("fields")),
            Some(s) => s,
        };
        let mut includes = Vec::new();
        let mut excludes = Vec::new();
        for field in s.split(',') {
            if let Some(field) = field.strip_prefix('-') {
                excludes.push(field);
            } else if let Some(field) = field.strip_prefix('+') {
                includes.push(field);
            } else {
                includes.push(field);
            }
        }
        let fields = Fields {
            include: (!includes.is_empty()).then(|| FieldSet::include(includes)),
            exclude: (!excludes.is_empty()).then(|| FieldSet::exclude(excludes)),
        };
        if fields.include.is_none() && fields.exclude.is_none() {
            Err(Error::NoFieldsProvided)
        } else {
            Ok(fields)
        }
    }

    /// Pairs two field sets, which must be of different types.
    ///
    /// The sets can come in any order.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::{FieldSet, Fields};
    ///
    /// let fields =
    ///     Fields::pair(FieldSet::exclude(["geometry"]), FieldSet::include(["id"])).unwrap();
    /// assert_eq!(fields.include(), Some(&FieldSet::include(["id"])));
    /// assert!(Fields::pair(FieldSet::include(["id"]), FieldSet::include(["id"])).is_err());
    /// ```
    pub fn pair(a: FieldSet, b: FieldSet) -> Result<Fields> {
        match (a.field_type, b.field_type) {
            (FieldType::Include, FieldType::Exclude) => Ok(Fields {
                include: Some(a),
                exclude: Some(b),
            }),
            (FieldType::Exclude, FieldType::Include) => Ok(Fields {
                include: Some(b),
                exclude: Some(a),
            }),
            (field_type, _) => Err(Error::DuplicateFieldType(field_type)),
        }
    }

    /// Returns the include set.
    pub fn include(&self) -> Option<&FieldSet> {
        self.include.as_ref()
    }

    /// Returns the exclude set.
    pub fn exclude(&self) -> Option<&FieldSet> {
        self.exclude.as_ref()
    }

    fn sets(&self) -> impl Iterator<Item = &FieldSet> {
        self.include.iter().chain(self.exclude.iter())
    }
}

impl From<FieldSet> for Fields {
    fn from(value: FieldSet) -> Self {
        match value.field_type {
            FieldType::Include => Fields {
                include: Some(value),
                exclude: None,
            },
            FieldType::Exclude => Fields {
                include: None,
                exclude: Some(value),
            },
        }
    }
}

impl Display for Fields {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sets: Vec<String> = self.sets().map(ToString::to_string).collect();
        f.write_str(&sets.join(","))
    }
}

impl ToJsonMap for Fields {
    fn to_json_map(&self) -> Map<String, Value> {
        merge(self.sets())
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_json_map().serialize(serializer)
    }
}
