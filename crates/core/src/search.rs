use crate::{
    DatetimeRange, Error, Fields, Filter, FilterInput, FilterLang, Query, Result, SearchBuilder,
    Sortby, client::{Method, Request}, json::merge, sort::to_compact,
};
use geojson::Geometry;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use std::{fmt::Display, str::FromStr};
use url::Url;

/// The limit used when none is given.
pub const DEFAULT_LIMIT: u64 = 100;

/// Whether a search is run against an API or a static catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// A STAC API `/search` endpoint.
    Api,

    /// A static catalog.
    Static,
}

/// A two- or three-dimensional bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bbox {
    /// `[xmin, ymin, xmax, ymax]`
    TwoDimensional([f64; 4]),

    /// `[xmin, ymin, zmin, xmax, ymax, zmax]`
    ThreeDimensional([f64; 6]),
}

/// Normalized item search parameters.
///
/// A search is built once, with [Search::builder], and never changes
/// afterwards. It can be projected into a POST body with
/// [Search::to_post_body] or into GET parameters with [Search::to_get_params].
///
/// # Examples
///
/// ```
/// use stac_search::Search;
///
/// let search = Search::builder("api")
///     .collections("landsat-8-l1,sentinel-2-l1c")
///     .datetime("2020-01")
///     .sortby("-datetime")
///     .build()
///     .unwrap();
/// let body = search.to_post_body().unwrap();
/// assert_eq!(body["datetime"], "2020-01-01T00:00:00Z/2020-01-31T23:59:59Z");
/// assert_eq!(body["sortby"][0]["direction"], "desc");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Search {
    #[serde(skip)]
    pub(crate) search_type: SearchType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) bbox: Option<Bbox>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) intersects: Option<Geometry>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) datetime: Option<DatetimeRange>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) ids: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) collections: Option<Vec<String>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_queries"
    )]
    pub(crate) query: Option<Vec<Query>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) filter: Option<Filter>,

    #[serde(rename = "filter-lang", skip_serializing_if = "Option::is_none")]
    pub(crate) filter_lang: Option<FilterLang>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sortby: Option<Vec<Sortby>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) fields: Option<Fields>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) limit: Option<u64>,
}

/// GET parameters for the item search endpoint.
///
/// Every value is already flattened into text.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GetSearch {
    /// Comma-delimited bounding box numbers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bbox: Option<String>,

    /// A GeoJSON geometry as JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intersects: Option<String>,

    /// A single datetime or a `start/end` interval.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<String>,

    /// Comma-delimited list of Item ids to return.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<String>,

    /// Comma-delimited list of one or more Collection IDs that each matching Item must be in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collections: Option<String>,

    /// The merged query object as JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,

    /// A cql2-text expression, or a cql2-json expression as JSON text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,

    /// The language of the filter.
    #[serde(rename = "filter-lang", skip_serializing_if = "Option::is_none")]
    pub filter_lang: Option<String>,

    /// A compact sort string, e.g. `+datetime,-id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sortby: Option<String>,

    /// A compact fields string, e.g. `+id,-geometry`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<String>,

    /// The maximum number of results to return (page size).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

impl Search {
    /// Starts building a search.
    ///
    /// The search type, `"api"` or `"static"`, is checked when the search is built.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::{Search, SearchType};
    ///
    /// let search = Search::builder("static").build().unwrap();
    /// assert_eq!(search.search_type(), SearchType::Static);
    /// assert_eq!(search.limit(), Some(100));
    /// ```
    pub fn builder(search_type: impl ToString) -> SearchBuilder {
        SearchBuilder::new(search_type)
    }

    /// Returns the search type.
    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    /// Returns the bounding box.
    ///
    /// This is always `None` when [Search::intersects] is set.
    pub fn bbox(&self) -> Option<&Bbox> {
        self.bbox.as_ref()
    }

    /// Returns the intersects geometry.
    pub fn intersects(&self) -> Option<&Geometry> {
        self.intersects.as_ref()
    }

    /// Returns the datetime range.
    pub fn datetime(&self) -> Option<&DatetimeRange> {
        self.datetime.as_ref()
    }

    /// Returns the item ids.
    pub fn ids(&self) -> Option<&[String]> {
        self.ids.as_deref()
    }

    /// Returns the collection ids.
    pub fn collections(&self) -> Option<&[String]> {
        self.collections.as_deref()
    }

    /// Returns the queries.
    pub fn query(&self) -> Option<&[Query]> {
        self.query.as_deref()
    }

    /// Returns the filter.
    pub fn filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    /// Returns the filter language, either given or inferred from the filter.
    pub fn filter_lang(&self) -> Option<FilterLang> {
        self.filter_lang
    }

    /// Returns the sort order.
    pub fn sortby(&self) -> Option<&[Sortby]> {
        self.sortby.as_deref()
    }

    /// Returns the field projection.
    pub fn fields(&self) -> Option<&Fields> {
        self.fields.as_ref()
    }

    /// Returns the limit.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// Returns the canonical JSON object of this search.
    ///
    /// Only set parameters are included, and the search type never is.
    pub fn to_map(&self) -> Result<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            value => Err(Error::NotAnObject(value)),
        }
    }

    /// Returns the body of a POST search request.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Search;
    ///
    /// let search = Search::builder("api")
    ///     .query(("eo:cloud_cover", vec![("<", 10)]))
    ///     .filter("collection='landsat8_l1tp'")
    ///     .build()
    ///     .unwrap();
    /// let body = search.to_post_body().unwrap();
    /// assert_eq!(body["query"]["eo:cloud_cover"]["lt"], 10);
    /// assert_eq!(body["filter-lang"], "cql2-text");
    /// ```
    pub fn to_post_body(&self) -> Result<Map<String, Value>> {
        self.to_map()
    }

    /// Returns the parameters of a GET search request.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Search;
    ///
    /// let search = Search::builder("api")
    ///     .bbox([-180.0, -90.0, 180.0, 90.0])
    ///     .fields("id,-geometry")
    ///     .build()
    ///     .unwrap();
    /// let get_search = search.to_get_params().unwrap();
    /// assert_eq!(get_search.bbox.unwrap(), "-180,-90,180,90");
    /// assert_eq!(get_search.fields.unwrap(), "+id,-geometry");
    /// ```
    pub fn to_get_params(&self) -> Result<GetSearch> {
        self.try_into()
    }

    /// Returns a transport-ready request for the given method.
    pub fn to_request(&self, method: Method) -> Result<Request> {
        match method {
            Method::Get => self.to_get_params().map(Request::Get),
            Method::Post => self.to_post_body().map(Request::Post),
        }
    }
}

fn serialize_queries<S>(
    queries: &Option<Vec<Query>>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    merge(queries.iter().flatten()).serialize(serializer)
}

impl GetSearch {
    /// Encodes these parameters as a URL query string.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::GetSearch;
    ///
    /// let get_search = GetSearch {
    ///     collections: Some("a,b".to_string()),
    ///     limit: Some(10),
    ///     ..Default::default()
    /// };
    /// assert_eq!(get_search.query_string().unwrap(), "collections=a%2Cb&limit=10");
    /// ```
    pub fn query_string(&self) -> Result<String> {
        serde_urlencoded::to_string(self).map_err(Error::from)
    }

    /// Returns the search endpoint with these parameters as its query.
    ///
    /// Any query already on the endpoint is replaced.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::GetSearch;
    /// use url::Url;
    ///
    /// let endpoint = Url::parse("https://stac.example/api/v1/search").unwrap();
    /// let get_search = GetSearch {
    ///     ids: Some("an-id".to_string()),
    ///     ..Default::default()
    /// };
    /// let url = get_search.url(&endpoint).unwrap();
    /// assert_eq!(url.query(), Some("ids=an-id"));
    /// ```
    pub fn url(&self, endpoint: &Url) -> Result<Url> {
        let query = self.query_string()?;
        let mut url = endpoint.clone();
        if query.is_empty() {
            url.set_query(None);
        } else {
            url.set_query(Some(&query));
        }
        Ok(url)
    }
}

impl TryFrom<&Search> for GetSearch {
    type Error = Error;

    fn try_from(search: &Search) -> Result<GetSearch> {
        let bbox = search.bbox.map(|bbox| {
            bbox.to_vec()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",")
        });
        let intersects = search
            .intersects
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let query = search
            .query
            .as_ref()
            .map(|queries| serde_json::to_string(&merge(queries)))
            .transpose()?;
        let filter = search
            .filter
            .as_ref()
            .map(Filter::to_get_param)
            .transpose()?;
        Ok(GetSearch {
            bbox,
            intersects,
            datetime: search.datetime.map(|datetime| datetime.to_string()),
            ids: search.ids.as_ref().map(|ids| ids.join(",")),
            collections: search
                .collections
                .as_ref()
                .map(|collections| collections.join(",")),
            query,
            filter,
            filter_lang: search
                .filter_lang
                .map(|filter_lang| filter_lang.to_string()),
            sortby: search.sortby.as_deref().map(to_compact),
            fields: search.fields.as_ref().map(ToString::to_string),
            limit: search.limit,
        })
    }
}

impl TryFrom<Search> for GetSearch {
    type Error = Error;

    fn try_from(search: Search) -> Result<GetSearch> {
        (&search).try_into()
    }
}

impl TryFrom<GetSearch> for Search {
    type Error = Error;

    fn try_from(get_search: GetSearch) -> Result<Search> {
        let mut builder = Search::builder("api");
        if let Some(limit) = get_search.limit {
            builder = builder.limit(limit);
        }
        if let Some(bbox) = get_search.bbox {
            let values = bbox
                .split(',')
                .map(|v| v.trim().parse::<f64>().map_or_else(|_| Value::from(v), Value::from))
                .collect::<Vec<_>>();
            builder = builder.bbox(Value::Array(values));
        }
        if let Some(intersects) = get_search.intersects {
            builder = builder.intersects(json_text(intersects));
        }
        if let Some(datetime) = get_search.datetime {
            builder = builder.datetime(datetime);
        }
        if let Some(ids) = get_search.ids {
            builder = builder.ids(ids);
        }
        if let Some(collections) = get_search.collections {
            builder = builder.collections(collections);
        }
        if let Some(query) = get_search.query {
            builder = builder.query(json_text(query));
        }
        if let Some(filter) = get_search.filter {
            let is_json =
                get_search.filter_lang.as_deref() == Some(FilterLang::Cql2Json.as_str());
            let filter = if is_json {
                FilterInput::Json(json_text(filter))
            } else {
                FilterInput::from(filter)
            };
            builder = builder.filter(filter);
        }
        if let Some(filter_lang) = get_search.filter_lang {
            builder = builder.filter_lang(filter_lang);
        }
        if let Some(sortby) = get_search.sortby {
            builder = builder.sortby(sortby);
        }
        if let Some(fields) = get_search.fields {
            builder = builder.fields(fields);
        }
        builder.build()
    }
}

/// Decodes JSON text, keeping the text as a string if it is not JSON.
fn json_text(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

impl SearchType {
    const VALUES: &'static [&'static str] = &["api", "static"];

    /// Returns this type's name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Api => "api",
            SearchType::Static => "static",
        }
    }
}

impl FromStr for SearchType {
    type Err = Error;

    fn from_str(s: &str) -> Result<SearchType> {
        match s {
            "api" => Ok(SearchType::Api),
            "static" => Ok(SearchType::Static),
            _ => Err(Error::InvalidEnumValue {
                attribute: "search_type",
                value: s.to_string(),
                expected: SearchType::VALUES,
            }),
        }
    }
}

impl Display for SearchType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Bbox {
    /// Returns the numbers of this bounding box.
    pub fn to_vec(&self) -> Vec<f64> {
        match self {
            Bbox::TwoDimensional(values) => values.to_vec(),
            Bbox::ThreeDimensional(values) => values.to_vec(),
        }
    }
}

impl TryFrom<Vec<f64>> for Bbox {
    type Error = Error;

    fn try_from(values: Vec<f64>) -> Result<Bbox> {
        match values.len() {
            4 => Ok(Bbox::TwoDimensional([values[0], values[1], values[2], values[3]])),
            6 => Ok(Bbox::ThreeDimensional([
                values[0], values[1], values[2], values[3], values[4], values[5],
            ])),
            n => Err(Error::shape(
                "bbox",
                format!("must have 4 or 6 values, got {n}"),
            )),
        }
    }
}

impl From<[f64; 4]> for Bbox {
    fn from(value: [f64; 4]) -> Self {
        Bbox::TwoDimensional(value)
    }
}

impl From<[f64; 6]> for Bbox {
    fn from(value: [f64; 6]) -> Self {
        Bbox::ThreeDimensional(value)
    }
}
