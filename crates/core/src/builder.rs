use crate::{
    BboxInput, DatetimeInput, Error, FieldError, FieldsInput, FilterInput, FilterLangInput,
    GeojsonValidator, GeometryValidator, IntersectsInput, LimitInput, QueryInput, Result, Search,
    SearchType, SortbyInput, StringListInput, search::DEFAULT_LIMIT,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Collects raw search parameters and checks them all at once.
///
/// Nothing is validated until [SearchBuilder::build]. Every parameter is
/// checked on its own first, and all failures are reported together in
/// [Error::Validation]. Only then are the cross-parameter rules applied:
///
/// - if both `bbox` and `intersects` are set, `bbox` is dropped
/// - if `filter` is set without `filter-lang`, the language is inferred from the filter
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use stac_search::{FilterLang, Search};
///
/// let search = Search::builder("api")
///     .bbox([-180.0, -90.0, 180.0, 90.0])
///     .intersects(json!({"type": "Point", "coordinates": [-105.1, 41.1]}))
///     .filter(json!({"op": "<=", "args": [{"property": "eo:cloud_cover"}, 10]}))
///     .build()
///     .unwrap();
/// assert!(search.bbox().is_none());
/// assert_eq!(search.filter_lang(), Some(FilterLang::Cql2Json));
/// ```
#[derive(Clone, Debug)]
pub struct SearchBuilder {
    search_type: String,
    bbox: Option<BboxInput>,
    intersects: Option<IntersectsInput>,
    datetime: Option<DatetimeInput>,
    ids: Option<StringListInput>,
    collections: Option<StringListInput>,
    query: Option<QueryInput>,
    filter: Option<FilterInput>,
    filter_lang: Option<FilterLangInput>,
    sortby: Option<SortbyInput>,
    fields: Option<FieldsInput>,
    limit: LimitInput,
}

impl SearchBuilder {
    /// Creates a new builder with the default limit.
    pub fn new(search_type: impl ToString) -> SearchBuilder {
        SearchBuilder {
            search_type: search_type.to_string(),
            bbox: None,
            intersects: None,
            datetime: None,
            ids: None,
            collections: None,
            query: None,
            filter: None,
            filter_lang: None,
            sortby: None,
            fields: None,
            limit: LimitInput::Limit(Some(DEFAULT_LIMIT)),
        }
    }

    /// Creates a builder from a JSON object keyed by parameter name.
    ///
    /// `null` values are treated as unset, except for `limit`, where `null`
    /// means no limit. A missing `search_type` means `"api"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use serde_json::json;
    /// use stac_search::SearchBuilder;
    ///
    /// let search = SearchBuilder::from_json(json!({
    ///     "collections": ["sentinel-2-l2a"],
    ///     "sortby": [{"field": "datetime", "direction": "desc"}],
    ///     "bbox": null,
    /// }))
    /// .unwrap()
    /// .build()
    /// .unwrap();
    /// assert_eq!(search.collections().unwrap(), ["sentinel-2-l2a"]);
    /// assert!(SearchBuilder::from_json(json!({"box": [0, 0, 1, 1]})).is_err());
    /// ```
    pub fn from_json(value: Value) -> Result<SearchBuilder> {
        let object = match value {
            Value::Object(object) => object,
            value => return Err(Error::NotAnObject(value)),
        };
        let mut builder = SearchBuilder::new("api");
        for (key, value) in object {
            match key.as_str() {
                "search_type" => {
                    if let Some(value) = present(value) {
                        builder.search_type = match value {
                            Value::String(s) => s,
                            value => value.to_string(),
                        };
                    }
                }
                "bbox" => builder.bbox = present(value).map(BboxInput::Json),
                "intersects" => builder.intersects = present(value).map(IntersectsInput::Json),
                "datetime" => builder.datetime = present(value).map(DatetimeInput::Json),
                "ids" => builder.ids = present(value).map(StringListInput::Json),
                "collections" => builder.collections = present(value).map(StringListInput::Json),
                "query" => builder.query = present(value).map(QueryInput::Json),
                "filter" => builder.filter = present(value).map(FilterInput::Json),
                "filter-lang" | "filter_lang" => {
                    builder.filter_lang = present(value).map(|value| match value {
                        Value::String(s) => FilterLangInput::Text(s),
                        value => FilterLangInput::Text(value.to_string()),
                    })
                }
                "sortby" | "sort_by" => builder.sortby = present(value).map(SortbyInput::Json),
                "fields" => builder.fields = present(value).map(FieldsInput::Json),
                "limit" => builder.limit = LimitInput::Json(value),
                _ => return Err(Error::UnknownParameter(key)),
            }
        }
        Ok(builder)
    }

    /// Sets the bounding box.
    pub fn bbox(mut self, bbox: impl Into<BboxInput>) -> SearchBuilder {
        self.bbox = Some(bbox.into());
        self
    }

    /// Sets the intersects geometry.
    pub fn intersects(mut self, intersects: impl Into<IntersectsInput>) -> SearchBuilder {
        self.intersects = Some(intersects.into());
        self
    }

    /// Sets the datetime.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::Search;
    ///
    /// let search = Search::builder("api").datetime("2019/2018").build().unwrap();
    /// assert_eq!(
    ///     search.datetime().unwrap().to_string(),
    ///     "2018-01-01T00:00:00Z/2019-12-31T23:59:59Z"
    /// );
    /// ```
    pub fn datetime(mut self, datetime: impl Into<DatetimeInput>) -> SearchBuilder {
        self.datetime = Some(datetime.into());
        self
    }

    /// Sets the item ids.
    pub fn ids(mut self, ids: impl Into<StringListInput>) -> SearchBuilder {
        self.ids = Some(ids.into());
        self
    }

    /// Sets the collection ids.
    pub fn collections(mut self, collections: impl Into<StringListInput>) -> SearchBuilder {
        self.collections = Some(collections.into());
        self
    }

    /// Sets the queries.
    pub fn query(mut self, query: impl Into<QueryInput>) -> SearchBuilder {
        self.query = Some(query.into());
        self
    }

    /// Sets the filter.
    pub fn filter(mut self, filter: impl Into<FilterInput>) -> SearchBuilder {
        self.filter = Some(filter.into());
        self
    }

    /// Sets the filter language.
    pub fn filter_lang(mut self, filter_lang: impl Into<FilterLangInput>) -> SearchBuilder {
        self.filter_lang = Some(filter_lang.into());
        self
    }

    /// Sets the sort order.
    pub fn sortby(mut self, sortby: impl Into<SortbyInput>) -> SearchBuilder {
        self.sortby = Some(sortby.into());
        self
    }

    /// Sets the field projection.
    pub fn fields(mut self, fields: impl Into<FieldsInput>) -> SearchBuilder {
        self.fields = Some(fields.into());
        self
    }

    /// Sets the limit. `None` removes it.
    pub fn limit(mut self, limit: impl Into<LimitInput>) -> SearchBuilder {
        self.limit = limit.into();
        self
    }

    /// Builds the search, validating geometries with [GeojsonValidator].
    pub fn build(self) -> Result<Search> {
        self.build_with(&GeojsonValidator)
    }

    /// Builds the search with a custom geometry validator.
    pub fn build_with(self, validator: &(impl GeometryValidator + ?Sized)) -> Result<Search> {
        let mut errors = Vec::new();
        let search_type = check(
            &mut errors,
            "search_type",
            self.search_type.parse::<SearchType>(),
        );
        let bbox = check(&mut errors, "bbox", self.bbox.map(BboxInput::resolve).transpose());
        let intersects = check(
            &mut errors,
            "intersects",
            self.intersects
                .map(|intersects| intersects.resolve(validator))
                .transpose(),
        );
        let datetime = check(
            &mut errors,
            "datetime",
            self.datetime.map(DatetimeInput::resolve).transpose(),
        );
        let ids = check(
            &mut errors,
            "ids",
            self.ids.map(|ids| ids.resolve("ids")).transpose(),
        );
        let collections = check(
            &mut errors,
            "collections",
            self.collections
                .map(|collections| collections.resolve("collections"))
                .transpose(),
        );
        let query = check(&mut errors, "query", self.query.map(QueryInput::resolve).transpose());
        let filter = check(
            &mut errors,
            "filter",
            self.filter.map(FilterInput::resolve).transpose(),
        );
        let filter_lang = check(
            &mut errors,
            "filter-lang",
            self.filter_lang.map(FilterLangInput::resolve).transpose(),
        );
        let sortby = check(
            &mut errors,
            "sortby",
            self.sortby.map(SortbyInput::resolve).transpose(),
        );
        let fields = check(
            &mut errors,
            "fields",
            self.fields.map(FieldsInput::resolve).transpose(),
        );
        let limit = check(&mut errors, "limit", self.limit.resolve());

        let (
            Some(search_type),
            Some(bbox),
            Some(intersects),
            Some(datetime),
            Some(ids),
            Some(collections),
            Some(query),
            Some(filter),
            Some(filter_lang),
            Some(sortby),
            Some(fields),
            Some(limit),
        ) = (
            search_type,
            bbox,
            intersects,
            datetime,
            ids,
            collections,
            query,
            filter,
            filter_lang,
            sortby,
            fields,
            limit,
        )
        else {
            return Err(Error::Validation(errors));
        };

        let bbox = if bbox.is_some() && intersects.is_some() {
            warn!("both bbox and intersects are set, using intersects and dropping bbox");
            None
        } else {
            bbox
        };
        let filter_lang = match (&filter, filter_lang) {
            (Some(filter), None) => {
                let filter_lang = filter.lang();
                debug!("inferred filter-lang={filter_lang} from filter");
                Some(filter_lang)
            }
            (_, filter_lang) => filter_lang,
        };

        Ok(Search {
            search_type,
            bbox,
            intersects,
            datetime,
            ids,
            collections,
            query,
            filter,
            filter_lang,
            sortby,
            fields,
            limit,
        })
    }
}

fn present(value: Value) -> Option<Value> {
    if value.is_null() { None } else { Some(value) }
}

fn check<T>(errors: &mut Vec<FieldError>, field: &'static str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(source) => {
            errors.push(FieldError { field, source });
            None
        }
    }
}
