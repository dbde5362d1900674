//! Normalization of STAC API [item search][item-search] parameters.
//!
//! [item-search]: https://github.com/radiantearth/stac-api-spec/tree/main/item-search
//!
//! This crate **is**:
//!
//! - Loosely-typed inputs for every search parameter
//! - Validation and normalization into a [Search]
//! - Serialization into GET parameters or a POST body
//!
//! This crate **is not**:
//!
//! - An HTTP client (see [SearchClient] for the seam)
//! - A paginator
//!
//! # Building a search
//!
//! Every parameter accepts several shapes: compact strings, tuples, lists, or
//! plain JSON. Nothing is checked until the search is built.
//!
//! ```
//! use stac_search::{Search, Sortby};
//!
//! let search = Search::builder("api")
//!     .collections(["sentinel-2-l2a"])
//!     .datetime("2024-02")
//!     .query(("eo:cloud_cover", vec![("<=", 10)]))
//!     .sortby(vec![("desc", "datetime"), ("asc", "id")])
//!     .fields("id,properties.datetime,-geometry")
//!     .limit(10)
//!     .build()
//!     .unwrap();
//! assert_eq!(
//!     search.sortby().unwrap(),
//!     [Sortby::desc("datetime"), Sortby::asc("id")]
//! );
//!
//! let get_search = search.to_get_params().unwrap();
//! assert_eq!(
//!     get_search.datetime.unwrap(),
//!     "2024-02-01T00:00:00Z/2024-02-29T23:59:59Z"
//! );
//! assert_eq!(get_search.sortby.unwrap(), "-datetime,+id");
//! ```
//!
//! Invalid parameters are reported together:
//!
//! ```
//! use stac_search::Search;
//!
//! let error = Search::builder("api")
//!     .bbox(vec![0.0, 0.0, 1.0])
//!     .datetime("2020-13")
//!     .build()
//!     .unwrap_err();
//! assert_eq!(error.field_errors().len(), 2);
//! ```

#![warn(missing_docs, unused_qualifications)]

mod builder;
mod client;
pub mod datetime;
mod error;
mod fields;
mod filter;
mod geometry;
mod input;
pub mod json;
mod query;
mod search;
pub mod sort;

pub use builder::SearchBuilder;
pub use client::{Method, Request, SearchClient};
pub use datetime::DatetimeRange;
pub use error::{Error, FieldError};
pub use fields::{FieldSet, FieldType, Fields};
pub use filter::{Filter, FilterExpr, FilterLang};
pub use geometry::{GeojsonValidator, GeometryValidator};
pub use input::{
    BboxInput, DatetimeInput, FieldsEntry, FieldsInput, FilterInput, FilterLangInput,
    IntersectsInput, LimitInput, QueryEntry, QueryInput, SortbyEntry, SortbyInput,
    StringListInput,
};
pub use json::ToJsonMap;
pub use query::{OPERATORS, Operator, Query, SYNONYMS};
pub use search::{Bbox, DEFAULT_LIMIT, GetSearch, Search, SearchType};
pub use sort::{Direction, FieldNames, Sortby};

/// Crate-specific result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Return this crate's version.
///
/// # Examples
///
/// ```
/// println!("{}", stac_search::version());
/// ```
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
