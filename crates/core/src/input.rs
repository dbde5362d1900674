//! Loosely-typed inputs for each search parameter.
//!
//! Every parameter accepts a handful of shapes. Each shape is a variant, and
//! each input has a `Json` variant for values that arrive as untyped JSON.
//! Inputs are only checked when the search is built.

use crate::{
    Bbox, DatetimeRange, Error, FieldSet, FieldType, Fields, Filter, FilterExpr, FilterLang,
    GeometryValidator, Query, Result, Sortby, geometry,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use geojson::Geometry;
use serde_json::{Map, Value};

/// A bounding box, as numbers or as JSON.
#[derive(Clone, Debug, PartialEq)]
pub enum BboxInput {
    /// Four or six numbers.
    Values(Vec<f64>),

    /// A JSON array of numbers.
    Json(Value),
}

/// An intersects geometry.
#[derive(Clone, Debug, PartialEq)]
pub enum IntersectsInput {
    /// An already-built geometry, still subject to validation.
    Geometry(Geometry),

    /// A GeoJSON-like JSON object.
    Json(Value),
}

/// A datetime, datetime range, or partial date.
#[derive(Clone, Debug, PartialEq)]
pub enum DatetimeInput {
    /// `YYYY`, `YYYY-MM`, `YYYY-MM-DD`, a full timestamp, or two of those separated by `/`.
    Text(String),

    /// A single instant.
    Instant(DateTime<Utc>),

    /// A one- or two-element tuple of instants, where the end may be open.
    Tuple(Vec<Option<DateTime<Utc>>>),

    /// A JSON string, or an array of RFC 3339 strings.
    Json(Value),
}

/// A list of strings, used for `ids` and `collections`.
#[derive(Clone, Debug, PartialEq)]
pub enum StringListInput {
    /// A comma-separated string.
    Text(String),

    /// A list of strings.
    List(Vec<String>),

    /// A JSON string or array of scalars.
    Json(Value),
}

/// One or more queries.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryInput {
    /// Queries and raw `(property, [(operator, value)])` tuples.
    Entries(Vec<QueryEntry>),

    /// JSON, either `{property: {operator: value}}`, a `[property, [[operator, value], ...]]`
    /// tuple, or a list of such tuples.
    Json(Value),
}

/// One query, built or raw.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryEntry {
    /// A built query.
    Query(Query),

    /// A property and its operators, not yet resolved.
    Raw {
        /// The queried property.
        property: String,

        /// Operator symbols and values.
        operators: Vec<(String, Value)>,
    },
}

/// A filter.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterInput {
    /// A built filter.
    Filter(Filter),

    /// JSON, either a cql2-text string, an `[op, args]` tuple, or an `{op, args}` object.
    Json(Value),
}

/// A filter language.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterLangInput {
    /// A known filter language.
    FilterLang(FilterLang),

    /// A language name, e.g. `cql2-json`.
    Text(String),
}

/// One or more sortbys.
#[derive(Clone, Debug, PartialEq)]
pub enum SortbyInput {
    /// A compact sort string, e.g. `+datetime,-id`.
    Text(String),

    /// Sortbys and direction-grouped entries.
    Entries(Vec<SortbyEntry>),

    /// JSON, either a compact string or an array of `{field, direction}`
    /// objects and `[direction, fields]` tuples.
    Json(Value),
}

/// One sortby, built or grouped by direction.
#[derive(Clone, Debug, PartialEq)]
pub enum SortbyEntry {
    /// A built sortby.
    Sortby(Sortby),

    /// A direction and the fields it applies to.
    Grouped {
        /// `asc` or `desc`.
        direction: String,

        /// The fields.
        fields: Vec<String>,
    },
}

/// A field projection.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldsInput {
    /// A compact fields string, e.g. `+id,-geometry`.
    Text(String),

    /// A built projection.
    Fields(Fields),

    /// One or two field sets, built or raw.
    Entries(Vec<FieldsEntry>),

    /// JSON, either a compact string, an `{include, exclude}` object, a
    /// `[type, fields]` tuple, or a list of such tuples.
    Json(Value),
}

/// One field set, built or raw.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldsEntry {
    /// A built field set.
    FieldSet(FieldSet),

    /// A field type and its fields, not yet resolved.
    Raw {
        /// `include` or `exclude`.
        field_type: String,

        /// The fields.
        fields: Vec<String>,
    },
}

/// An optional item limit.
#[derive(Clone, Debug, PartialEq)]
pub enum LimitInput {
    /// A limit, or no limit at all.
    Limit(Option<u64>),

    /// A JSON integer or null.
    Json(Value),
}

impl BboxInput {
    pub(crate) fn resolve(self) -> Result<Bbox> {
        match self {
            BboxInput::Values(values) => values.try_into(),
            BboxInput::Json(value) => {
                let values = as_array(value, "bbox")?
                    .into_iter()
                    .map(|v| {
                        v.as_f64()
                            .ok_or_else(|| Error::shape("bbox", format!("{v} is not a number")))
                    })
                    .collect::<Result<Vec<_>>>()?;
                values.try_into()
            }
        }
    }
}

impl IntersectsInput {
    pub(crate) fn resolve(self, validator: &(impl GeometryValidator + ?Sized)) -> Result<Geometry> {
        match self {
            IntersectsInput::Geometry(geometry) => geometry::check(geometry, validator),
            IntersectsInput::Json(value) => geometry::validate(value, validator),
        }
    }
}

impl DatetimeInput {
    pub(crate) fn resolve(self) -> Result<DatetimeRange> {
        match self {
            DatetimeInput::Text(text) => text.parse(),
            DatetimeInput::Instant(instant) => Ok(DatetimeRange::new(instant, None)),
            DatetimeInput::Tuple(instants) => match instants.as_slice() {
                [None] | [None, _] => Err(Error::InvalidDatetimeType(
                    "invalid datetime tuple, start must be a datetime".to_string(),
                )),
                [Some(start)] => Ok(DatetimeRange::new(*start, None)),
                [Some(start), end] => Ok(DatetimeRange::new(*start, *end)),
                _ => Err(Error::InvalidDatetimeRange(instants.len())),
            },
            DatetimeInput::Json(Value::String(text)) => text.parse(),
            DatetimeInput::Json(Value::Array(values)) => {
                let instants = values
                    .into_iter()
                    .enumerate()
                    .map(|(i, value)| match value {
                        Value::Null if i > 0 => Ok(None),
                        Value::String(s) => DateTime::parse_from_rfc3339(&s)
                            .map(|datetime| Some(datetime.with_timezone(&Utc)))
                            .map_err(|_| tuple_type_error(i)),
                        _ => Err(tuple_type_error(i)),
                    })
                    .collect::<Result<Vec<_>>>()?;
                DatetimeInput::Tuple(instants).resolve()
            }
            DatetimeInput::Json(value) => Err(Error::InvalidDatetimeType(format!(
                "{value}, must be a string, a datetime, or a tuple of datetimes"
            ))),
        }
    }
}

fn tuple_type_error(index: usize) -> Error {
    if index == 0 {
        Error::InvalidDatetimeType("invalid datetime tuple, start must be a datetime".to_string())
    } else {
        Error::InvalidDatetimeType(
            "invalid datetime tuple, end must be a datetime or null".to_string(),
        )
    }
}

impl StringListInput {
    pub(crate) fn resolve(self, attribute: &'static str) -> Result<Vec<String>> {
        match self {
            StringListInput::Text(text) | StringListInput::Json(Value::String(text)) => {
                Ok(split(&text))
            }
            StringListInput::List(list) => Ok(list),
            StringListInput::Json(Value::Array(values)) => values
                .into_iter()
                .map(|value| match value {
                    Value::String(s) => Ok(s),
                    Value::Number(n) => Ok(n.to_string()),
                    Value::Bool(b) => Ok(b.to_string()),
                    value => Err(Error::shape(attribute, format!("{value} is not a scalar"))),
                })
                .collect(),
            StringListInput::Json(value) => Err(Error::shape(
                attribute,
                format!("{value} is not a string or a list of strings"),
            )),
        }
    }
}

impl QueryInput {
    pub(crate) fn resolve(self) -> Result<Vec<Query>> {
        match self {
            QueryInput::Entries(entries) => entries.into_iter().map(QueryEntry::resolve).collect(),
            QueryInput::Json(Value::Object(object)) => object
                .into_iter()
                .map(|(property, operators)| match operators {
                    Value::Object(operators) => Query::new(property, operators),
                    value => Err(Error::shape(
                        "query",
                        format!("operators of {property} are not an object: {value}"),
                    )),
                })
                .collect(),
            QueryInput::Json(Value::Array(values)) => {
                if values.first().is_some_and(Value::is_string) {
                    Ok(vec![raw_query(Value::Array(values))?])
                } else {
                    values.into_iter().map(raw_query).collect()
                }
            }
            QueryInput::Json(value) => Err(Error::shape(
                "query",
                format!("{value} is not an object or a list of queries"),
            )),
        }
    }
}

impl QueryEntry {
    fn resolve(self) -> Result<Query> {
        match self {
            QueryEntry::Query(query) => Ok(query),
            QueryEntry::Raw {
                property,
                operators,
            } => Query::new(property, operators),
        }
    }
}

fn raw_query(value: Value) -> Result<Query> {
    let [property, operators] = pair(value, "query")?;
    let Value::String(property) = property else {
        return Err(Error::shape("query", format!("property {property} is not a string")));
    };
    let operators = as_array(operators, "query")?
        .into_iter()
        .map(|operator| {
            let [symbol, value] = pair(operator, "query")?;
            match symbol {
                Value::String(symbol) => Ok((symbol, value)),
                symbol => Err(Error::shape("query", format!("operator {symbol} is not a string"))),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Query::new(property, operators)
}

impl FilterInput {
    pub(crate) fn resolve(self) -> Result<Filter> {
        match self {
            FilterInput::Filter(filter) => Ok(filter),
            FilterInput::Json(Value::String(text)) => Ok(Filter::Cql2Text(text)),
            FilterInput::Json(Value::Array(values)) => {
                let [op, args] = pair(Value::Array(values), "filter")?;
                filter_expr(op, args)
            }
            FilterInput::Json(Value::Object(mut object)) => {
                let op = object.remove("op").unwrap_or(Value::Null);
                let args = object.remove("args").unwrap_or(Value::Null);
                if let Some(key) = object.keys().next() {
                    return Err(Error::shape("filter", format!("unexpected key {key}")));
                }
                filter_expr(op, args)
            }
            FilterInput::Json(value) => Err(Error::shape(
                "filter",
                format!("{value} is not a string or an (op, args) tuple"),
            )),
        }
    }
}

fn filter_expr(op: Value, args: Value) -> Result<Filter> {
    match (op, args) {
        (Value::String(op), Value::Array(args)) => Ok(Filter::Cql2Json(FilterExpr { op, args })),
        (op, args) => Err(Error::shape(
            "filter",
            format!("op must be a string and args must be a list, got op={op} args={args}"),
        )),
    }
}

impl FilterLangInput {
    pub(crate) fn resolve(self) -> Result<FilterLang> {
        match self {
            FilterLangInput::FilterLang(filter_lang) => Ok(filter_lang),
            FilterLangInput::Text(text) => text.parse(),
        }
    }
}

impl SortbyInput {
    pub(crate) fn resolve(self) -> Result<Vec<Sortby>> {
        match self {
            SortbyInput::Text(text) | SortbyInput::Json(Value::String(text)) => {
                Sortby::parse_compact(text.as_str())
            }
            SortbyInput::Entries(entries) => {
                let mut sortby = Vec::new();
                for entry in entries {
                    match entry {
                        SortbyEntry::Sortby(s) => sortby.push(s),
                        SortbyEntry::Grouped { direction, fields } => {
                            sortby.extend(Sortby::parse_grouped([(direction, fields)])?)
                        }
                    }
                }
                Ok(sortby)
            }
            SortbyInput::Json(Value::Array(values)) => {
                let entries = values
                    .into_iter()
                    .map(sortby_entry)
                    .collect::<Result<Vec<_>>>()?;
                SortbyInput::Entries(entries).resolve()
            }
            SortbyInput::Json(value) => Err(Error::shape(
                "sortby",
                format!("{value} is not a string or a list of sortbys"),
            )),
        }
    }
}

fn sortby_entry(value: Value) -> Result<SortbyEntry> {
    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map(SortbyEntry::Sortby)
            .map_err(|err| Error::shape("sortby", err)),
        value => {
            let [direction, fields] = pair(value, "sortby")?;
            let Value::String(direction) = direction else {
                return Err(Error::shape(
                    "sortby",
                    format!("direction {direction} is not a string"),
                ));
            };
            let fields = match fields {
                Value::String(fields) => split(&fields),
                fields => strings(fields, "sortby")?,
            };
            Ok(SortbyEntry::Grouped { direction, fields })
        }
    }
}

impl FieldsInput {
    pub(crate) fn resolve(self) -> Result<Fields> {
        match self {
            FieldsInput::Text(text) | FieldsInput::Json(Value::String(text)) => {
                Fields::parse_compact(text.as_str())
            }
            FieldsInput::Fields(fields) => Ok(fields),
            FieldsInput::Entries(entries) => {
                let mut sets = entries
                    .into_iter()
                    .map(FieldsEntry::resolve)
                    .collect::<Result<Vec<_>>>()?;
                match (sets.pop(), sets.pop(), sets.len()) {
                    (Some(set), None, _) => Ok(set.into()),
                    (Some(b), Some(a), 0) => Fields::pair(a, b),
                    (None, _, _) => Err(Error::NoFieldsProvided),
                    (_, _, n) => Err(Error::shape(
                        "fields",
                        format!("expected one or two field sets, got {}", n + 2),
                    )),
                }
            }
            FieldsInput::Json(Value::Object(object)) => {
                let entries = object
                    .into_iter()
                    .map(|(field_type, fields)| {
                        Ok(FieldsEntry::Raw {
                            field_type,
                            fields: strings(fields, "fields")?,
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                FieldsInput::Entries(entries).resolve()
            }
            FieldsInput::Json(Value::Array(values)) => {
                let entries = if values.first().is_some_and(Value::is_string) {
                    vec![fields_entry(Value::Array(values))?]
                } else {
                    values
                        .into_iter()
                        .map(fields_entry)
                        .collect::<Result<Vec<_>>>()?
                };
                FieldsInput::Entries(entries).resolve()
            }
            FieldsInput::Json(value) => Err(Error::shape(
                "fields",
                format!("{value} is not a string, an object, or a list of field sets"),
            )),
        }
    }
}

impl FieldsEntry {
    fn resolve(self) -> Result<FieldSet> {
        match self {
            FieldsEntry::FieldSet(set) => Ok(set),
            FieldsEntry::Raw { field_type, fields } => {
                let field_type: FieldType = field_type.parse()?;
                Ok(FieldSet::new(field_type, fields))
            }
        }
    }
}

fn fields_entry(value: Value) -> Result<FieldsEntry> {
    let [field_type, fields] = pair(value, "fields")?;
    let Value::String(field_type) = field_type else {
        return Err(Error::shape("fields", format!("field type {field_type} is not a string")));
    };
    Ok(FieldsEntry::Raw {
        field_type,
        fields: strings(fields, "fields")?,
    })
}

impl LimitInput {
    pub(crate) fn resolve(self) -> Result<Option<u64>> {
        match self {
            LimitInput::Limit(limit) => Ok(limit),
            LimitInput::Json(Value::Null) => Ok(None),
            LimitInput::Json(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| {
                    Error::shape("limit", format!("{value} is not a non-negative integer"))
                }),
        }
    }
}

fn split(s: &str) -> Vec<String> {
    s.split(',').map(String::from).collect()
}

fn as_array(value: Value, attribute: &'static str) -> Result<Vec<Value>> {
    match value {
        Value::Array(values) => Ok(values),
        value => Err(Error::shape(attribute, format!("{value} is not a list"))),
    }
}

fn pair(value: Value, attribute: &'static str) -> Result<[Value; 2]> {
    let values = as_array(value, attribute)?;
    let len = values.len();
    <[Value; 2]>::try_from(values)
        .map_err(|_| Error::shape(attribute, format!("expected a tuple of two values, got {len}")))
}

fn strings(value: Value, attribute: &'static str) -> Result<Vec<String>> {
    as_array(value, attribute)?
        .into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s),
            value => Err(Error::shape(attribute, format!("{value} is not a string"))),
        })
        .collect()
}

impl From<Vec<f64>> for BboxInput {
    fn from(value: Vec<f64>) -> Self {
        BboxInput::Values(value)
    }
}

impl<const N: usize> From<[f64; N]> for BboxInput {
    fn from(value: [f64; N]) -> Self {
        BboxInput::Values(value.to_vec())
    }
}

impl From<Bbox> for BboxInput {
    fn from(value: Bbox) -> Self {
        BboxInput::Values(value.to_vec())
    }
}

impl From<Value> for BboxInput {
    fn from(value: Value) -> Self {
        BboxInput::Json(value)
    }
}

impl From<Geometry> for IntersectsInput {
    fn from(value: Geometry) -> Self {
        IntersectsInput::Geometry(value)
    }
}

impl From<geojson::Value> for IntersectsInput {
    fn from(value: geojson::Value) -> Self {
        IntersectsInput::Geometry(Geometry::new(value))
    }
}

impl From<Value> for IntersectsInput {
    fn from(value: Value) -> Self {
        IntersectsInput::Json(value)
    }
}

impl From<Map<String, Value>> for IntersectsInput {
    fn from(value: Map<String, Value>) -> Self {
        IntersectsInput::Json(Value::Object(value))
    }
}

impl From<&str> for DatetimeInput {
    fn from(value: &str) -> Self {
        DatetimeInput::Text(value.to_string())
    }
}

impl From<String> for DatetimeInput {
    fn from(value: String) -> Self {
        DatetimeInput::Text(value)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for DatetimeInput {
    fn from(value: DateTime<Tz>) -> Self {
        DatetimeInput::Instant(value.with_timezone(&Utc))
    }
}

/// Naive datetimes are assumed to be UTC.
impl From<NaiveDateTime> for DatetimeInput {
    fn from(value: NaiveDateTime) -> Self {
        DatetimeInput::Instant(value.and_utc())
    }
}

impl<Tz: TimeZone> From<(DateTime<Tz>, DateTime<Tz>)> for DatetimeInput {
    fn from((start, end): (DateTime<Tz>, DateTime<Tz>)) -> Self {
        DatetimeInput::Tuple(vec![
            Some(start.with_timezone(&Utc)),
            Some(end.with_timezone(&Utc)),
        ])
    }
}

impl<Tz: TimeZone> From<(DateTime<Tz>, Option<DateTime<Tz>>)> for DatetimeInput {
    fn from((start, end): (DateTime<Tz>, Option<DateTime<Tz>>)) -> Self {
        DatetimeInput::Tuple(vec![
            Some(start.with_timezone(&Utc)),
            end.map(|end| end.with_timezone(&Utc)),
        ])
    }
}

impl From<(NaiveDateTime, Option<NaiveDateTime>)> for DatetimeInput {
    fn from((start, end): (NaiveDateTime, Option<NaiveDateTime>)) -> Self {
        DatetimeInput::Tuple(vec![Some(start.and_utc()), end.map(|end| end.and_utc())])
    }
}

impl From<Vec<Option<DateTime<Utc>>>> for DatetimeInput {
    fn from(value: Vec<Option<DateTime<Utc>>>) -> Self {
        DatetimeInput::Tuple(value)
    }
}

impl From<DatetimeRange> for DatetimeInput {
    fn from(value: DatetimeRange) -> Self {
        DatetimeInput::Tuple(vec![Some(value.start()), value.end()])
    }
}

impl From<Value> for DatetimeInput {
    fn from(value: Value) -> Self {
        DatetimeInput::Json(value)
    }
}

impl From<&str> for StringListInput {
    fn from(value: &str) -> Self {
        StringListInput::Text(value.to_string())
    }
}

impl From<String> for StringListInput {
    fn from(value: String) -> Self {
        StringListInput::Text(value)
    }
}

impl From<Vec<String>> for StringListInput {
    fn from(value: Vec<String>) -> Self {
        StringListInput::List(value)
    }
}

impl From<Vec<&str>> for StringListInput {
    fn from(value: Vec<&str>) -> Self {
        StringListInput::List(value.into_iter().map(String::from).collect())
    }
}

impl<const N: usize> From<[&str; N]> for StringListInput {
    fn from(value: [&str; N]) -> Self {
        StringListInput::List(value.into_iter().map(String::from).collect())
    }
}

impl From<Value> for StringListInput {
    fn from(value: Value) -> Self {
        StringListInput::Json(value)
    }
}

impl From<Query> for QueryInput {
    fn from(value: Query) -> Self {
        QueryInput::Entries(vec![QueryEntry::Query(value)])
    }
}

impl From<Vec<Query>> for QueryInput {
    fn from(value: Vec<Query>) -> Self {
        QueryInput::Entries(value.into_iter().map(QueryEntry::Query).collect())
    }
}

impl<P, O, V> From<(P, Vec<(O, V)>)> for QueryEntry
where
    P: ToString,
    O: ToString,
    V: Into<Value>,
{
    fn from((property, operators): (P, Vec<(O, V)>)) -> Self {
        QueryEntry::Raw {
            property: property.to_string(),
            operators: operators
                .into_iter()
                .map(|(symbol, value)| (symbol.to_string(), value.into()))
                .collect(),
        }
    }
}

impl<P, O, V> From<(P, Vec<(O, V)>)> for QueryInput
where
    P: ToString,
    O: ToString,
    V: Into<Value>,
{
    fn from(value: (P, Vec<(O, V)>)) -> Self {
        QueryInput::Entries(vec![value.into()])
    }
}

impl<P, O, V> From<Vec<(P, Vec<(O, V)>)>> for QueryInput
where
    P: ToString,
    O: ToString,
    V: Into<Value>,
{
    fn from(value: Vec<(P, Vec<(O, V)>)>) -> Self {
        QueryInput::Entries(value.into_iter().map(QueryEntry::from).collect())
    }
}

impl From<Vec<QueryEntry>> for QueryInput {
    fn from(value: Vec<QueryEntry>) -> Self {
        QueryInput::Entries(value)
    }
}

impl From<Value> for QueryInput {
    fn from(value: Value) -> Self {
        QueryInput::Json(value)
    }
}

impl From<Filter> for FilterInput {
    fn from(value: Filter) -> Self {
        FilterInput::Filter(value)
    }
}

impl From<FilterExpr> for FilterInput {
    fn from(value: FilterExpr) -> Self {
        FilterInput::Filter(Filter::Cql2Json(value))
    }
}

impl From<&str> for FilterInput {
    fn from(value: &str) -> Self {
        FilterInput::Filter(value.into())
    }
}

impl From<String> for FilterInput {
    fn from(value: String) -> Self {
        FilterInput::Filter(value.into())
    }
}

impl<O: ToString> From<(O, Vec<Value>)> for FilterInput {
    fn from((op, args): (O, Vec<Value>)) -> Self {
        FilterInput::Filter(Filter::expr(op, args))
    }
}

impl From<Value> for FilterInput {
    fn from(value: Value) -> Self {
        FilterInput::Json(value)
    }
}

impl From<FilterLang> for FilterLangInput {
    fn from(value: FilterLang) -> Self {
        FilterLangInput::FilterLang(value)
    }
}

impl From<&str> for FilterLangInput {
    fn from(value: &str) -> Self {
        FilterLangInput::Text(value.to_string())
    }
}

impl From<String> for FilterLangInput {
    fn from(value: String) -> Self {
        FilterLangInput::Text(value)
    }
}

impl From<&str> for SortbyInput {
    fn from(value: &str) -> Self {
        SortbyInput::Text(value.to_string())
    }
}

impl From<String> for SortbyInput {
    fn from(value: String) -> Self {
        SortbyInput::Text(value)
    }
}

impl From<Sortby> for SortbyInput {
    fn from(value: Sortby) -> Self {
        SortbyInput::Entries(vec![SortbyEntry::Sortby(value)])
    }
}

impl From<Vec<Sortby>> for SortbyInput {
    fn from(value: Vec<Sortby>) -> Self {
        SortbyInput::Entries(value.into_iter().map(SortbyEntry::Sortby).collect())
    }
}

impl<D, F> From<(D, F)> for SortbyEntry
where
    D: ToString,
    F: Into<crate::sort::FieldNames>,
{
    fn from((direction, fields): (D, F)) -> Self {
        SortbyEntry::Grouped {
            direction: direction.to_string(),
            fields: fields.into().into_inner(),
        }
    }
}

impl<D, F> From<Vec<(D, F)>> for SortbyInput
where
    D: ToString,
    F: Into<crate::sort::FieldNames>,
{
    fn from(value: Vec<(D, F)>) -> Self {
        SortbyInput::Entries(value.into_iter().map(SortbyEntry::from).collect())
    }
}

impl From<Vec<SortbyEntry>> for SortbyInput {
    fn from(value: Vec<SortbyEntry>) -> Self {
        SortbyInput::Entries(value)
    }
}

impl From<Value> for SortbyInput {
    fn from(value: Value) -> Self {
        SortbyInput::Json(value)
    }
}

impl From<&str> for FieldsInput {
    fn from(value: &str) -> Self {
        FieldsInput::Text(value.to_string())
    }
}

impl From<String> for FieldsInput {
    fn from(value: String) -> Self {
        FieldsInput::Text(value)
    }
}

impl From<Fields> for FieldsInput {
    fn from(value: Fields) -> Self {
        FieldsInput::Fields(value)
    }
}

impl From<FieldSet> for FieldsInput {
    fn from(value: FieldSet) -> Self {
        FieldsInput::Entries(vec![FieldsEntry::FieldSet(value)])
    }
}

impl From<(FieldSet, FieldSet)> for FieldsInput {
    fn from((a, b): (FieldSet, FieldSet)) -> Self {
        FieldsInput::Entries(vec![FieldsEntry::FieldSet(a), FieldsEntry::FieldSet(b)])
    }
}

impl From<Vec<FieldSet>> for FieldsInput {
    fn from(value: Vec<FieldSet>) -> Self {
        FieldsInput::Entries(value.into_iter().map(FieldsEntry::FieldSet).collect())
    }
}

impl<T, S> From<(T, Vec<S>)> for FieldsEntry
where
    T: ToString,
    S: ToString,
{
    fn from((field_type, fields): (T, Vec<S>)) -> Self {
        FieldsEntry::Raw {
            field_type: field_type.to_string(),
            fields: fields.iter().map(ToString::to_string).collect(),
        }
    }
}

impl<T, S> From<(T, Vec<S>)> for FieldsInput
where
    T: ToString,
    S: ToString,
{
    fn from(value: (T, Vec<S>)) -> Self {
        FieldsInput::Entries(vec![value.into()])
    }
}

impl<T, S> From<Vec<(T, Vec<S>)>> for FieldsInput
where
    T: ToString,
    S: ToString,
{
    fn from(value: Vec<(T, Vec<S>)>) -> Self {
        FieldsInput::Entries(value.into_iter().map(FieldsEntry::from).collect())
    }
}

impl From<Vec<FieldsEntry>> for FieldsInput {
    fn from(value: Vec<FieldsEntry>) -> Self {
        FieldsInput::Entries(value)
    }
}

impl From<Value> for FieldsInput {
    fn from(value: Value) -> Self {
        FieldsInput::Json(value)
    }
}

impl From<u64> for LimitInput {
    fn from(value: u64) -> Self {
        LimitInput::Limit(Some(value))
    }
}

impl From<Option<u64>> for LimitInput {
    fn from(value: Option<u64>) -> Self {
        LimitInput::Limit(value)
    }
}

impl From<Value> for LimitInput {
    fn from(value: Value) -> Self {
        LimitInput::Json(value)
    }
}
