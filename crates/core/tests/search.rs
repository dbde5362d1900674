use assert_json_diff::assert_json_eq;
use chrono::{DateTime, TimeZone, Utc};
use geojson::Geometry;
use rstest::rstest;
use serde_json::{Value, json};
use stac_search::{
    Error, FieldSet, Filter, FilterLang, GetSearch, Method, Operator, Query, Request, Search,
    SearchBuilder, SearchType, Sortby, datetime::resolve_component, json::merge,
};

fn utc(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn polygon() -> Value {
    json!({
        "type": "Polygon",
        "coordinates": [[
            [-122.308150179, 37.488035566],
            [-122.597502109, 37.538869539],
            [-122.576687533, 37.613537207],
            [-122.288048600, 37.562818007],
            [-122.308150179, 37.488035566]
        ]]
    })
}

#[rstest]
#[case("==", Operator::Eq)]
#[case("!=", Operator::Neq)]
#[case("<", Operator::Lt)]
#[case("<=", Operator::Lte)]
#[case(">", Operator::Gt)]
#[case(">=", Operator::Gte)]
#[case("startsWith", Operator::StartsWith)]
#[case("in", Operator::In)]
fn operator_canonicalization_is_idempotent(#[case] symbol: &str, #[case] expected: Operator) {
    let once: Operator = symbol.parse().unwrap();
    let twice: Operator = once.as_str().parse().unwrap();
    assert_eq!(once, expected);
    assert_eq!(once, twice);
}

#[rstest]
#[case("2022", "2022-01-01T00:00:00Z", Some("2022-12-31T23:59:59Z"))]
#[case("2020", "2020-01-01T00:00:00Z", Some("2020-12-31T23:59:59Z"))]
#[case("2022-03", "2022-03-01T00:00:00Z", Some("2022-03-31T23:59:59Z"))]
#[case("2024-02", "2024-02-01T00:00:00Z", Some("2024-02-29T23:59:59Z"))]
#[case("2023-02", "2023-02-01T00:00:00Z", Some("2023-02-28T23:59:59Z"))]
#[case("1900-02", "1900-02-01T00:00:00Z", Some("1900-02-28T23:59:59Z"))]
#[case("2100", "2100-01-01T00:00:00Z", Some("2100-12-31T23:59:59Z"))]
#[case("2100-02", "2100-02-01T00:00:00Z", Some("2100-02-28T23:59:59Z"))]
#[case("2022-03-15", "2022-03-15T00:00:00Z", Some("2022-03-15T23:59:59Z"))]
#[case("2022-03-15T12:30:45", "2022-03-15T12:30:45Z", None)]
#[case("2022-03-15T12:30:45Z", "2022-03-15T12:30:45Z", None)]
#[case("2022-03-15T12:30:45-07:00", "2022-03-15T19:30:45Z", None)]
#[case("2022-03-15T12:30:45.123Z", "2022-03-15T12:30:45.123Z", None)]
fn resolve_components(#[case] s: &str, #[case] start: &str, #[case] end: Option<&str>) {
    let (actual_start, actual_end) = resolve_component(s).unwrap();
    assert_eq!(actual_start, utc(start));
    assert_eq!(actual_end, end.map(utc));
}

#[rstest]
#[case("22")]
#[case("2022-3")]
#[case("2022-13")]
#[case("2022-02-30")]
#[case("2022-03-15T12")]
#[case("2022T12:00:00Z")]
#[case("last year")]
fn invalid_components(#[case] s: &str) {
    assert!(matches!(
        resolve_component(s).unwrap_err(),
        Error::InvalidDatetimeComponent(_)
    ));
}

#[rstest]
#[case("2019/2018", "2018-01-01T00:00:00Z/2019-12-31T23:59:59Z")]
#[case("2018/2019", "2018-01-01T00:00:00Z/2019-12-31T23:59:59Z")]
#[case("2018-02/2018-03", "2018-02-01T00:00:00Z/2018-03-31T23:59:59Z")]
#[case(
    "2018-01-01T00:00:00Z/2018-01-02T00:00:00Z",
    "2018-01-01T00:00:00Z/2018-01-02T00:00:00Z"
)]
#[case("2018-01-01T00:00:00Z/2018", "2018-01-01T00:00:00Z/2018-12-31T23:59:59Z")]
#[case("2018-06/2018-06-01T00:00:00Z", "2018-06-01T00:00:00Z/2018-06-01T00:00:00Z")]
fn datetime_ranges(#[case] datetime: &str, #[case] expected: &str) {
    let search = Search::builder("api").datetime(datetime).build().unwrap();
    assert_eq!(search.datetime().unwrap().to_string(), expected);
}

#[test]
fn datetime_range_too_long() {
    let error = Search::builder("api")
        .datetime("2018/2019/2020")
        .build()
        .unwrap_err();
    assert_eq!(error.field_errors()[0].field, "datetime");
    assert!(matches!(
        error.field_errors()[0].source,
        Error::InvalidDatetimeRange(3)
    ));
}

#[test]
fn datetime_instants() {
    let start = Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap();
    let search = Search::builder("api").datetime(start).build().unwrap();
    assert_eq!(search.to_post_body().unwrap()["datetime"], "2020-06-01T00:00:00Z");
    let search = Search::builder("api").datetime((start, end)).build().unwrap();
    assert_eq!(
        search.to_post_body().unwrap()["datetime"],
        "2020-05-01T00:00:00Z/2020-06-01T00:00:00Z"
    );
    let offset = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
    let search = Search::builder("api")
        .datetime(offset.with_ymd_and_hms(2020, 6, 1, 2, 0, 0).unwrap())
        .build()
        .unwrap();
    assert_eq!(search.datetime().unwrap().start(), start);
    let error = Search::builder("api").datetime(json!(2020)).build().unwrap_err();
    assert!(matches!(
        error.field_errors()[0].source,
        Error::InvalidDatetimeType(_)
    ));
}

#[test]
fn sort_round_trip() {
    let sortby = vec![
        Sortby::desc("properties.datetime"),
        Sortby::asc("id"),
        Sortby::desc("eo:cloud_cover"),
    ];
    let compact = stac_search::sort::to_compact(&sortby);
    assert_eq!(compact, "-properties.datetime,+id,-eo:cloud_cover");
    assert_eq!(Sortby::parse_compact(compact.as_str()).unwrap(), sortby);
}

#[rstest]
#[case(Value::from(""))]
#[case(json!(null))]
fn empty_compact_strings(#[case] value: Value) {
    let text = value.as_str();
    assert!(matches!(
        Sortby::parse_compact(text).unwrap_err(),
        Error::EmptyAttribute("sortby")
    ));
    assert!(matches!(
        stac_search::Fields::parse_compact(text).unwrap_err(),
        Error::EmptyAttribute("fields")
    ));
}

#[test]
fn bbox_and_intersects() {
    let search = Search::builder("api")
        .bbox([-180.0, -90.0, 180.0, 90.0])
        .intersects(polygon())
        .build()
        .unwrap();
    assert!(search.bbox().is_none());
    assert_eq!(
        search.intersects().unwrap(),
        &Geometry::from_json_value(polygon()).unwrap()
    );
    assert!(!search.to_map().unwrap().contains_key("bbox"));
}

#[test]
fn get_without_limit_uses_default() {
    let search = Search::try_from(GetSearch::default()).unwrap();
    assert_eq!(search.limit(), Some(stac_search::DEFAULT_LIMIT));
    let search = Search::try_from(GetSearch {
        limit: Some(5),
        ..Default::default()
    })
    .unwrap();
    assert_eq!(search.limit(), Some(5));
}

#[test]
fn invalid_intersects() {
    let error = Search::builder("api")
        .intersects(json!({"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 1.0]]]}))
        .build()
        .unwrap_err();
    assert_eq!(error.field_errors()[0].field, "intersects");
    assert!(matches!(
        error.field_errors()[0].source,
        Error::InvalidGeometry(_)
    ));
}

#[rstest]
#[case(Filter::from("id='an-id'"), FilterLang::Cql2Text)]
#[case(Filter::expr("=", vec![json!({"property": "id"}), json!("an-id")]), FilterLang::Cql2Json)]
fn filter_lang_inference(#[case] filter: Filter, #[case] expected: FilterLang) {
    let search = Search::builder("api").filter(filter).build().unwrap();
    assert_eq!(search.filter_lang(), Some(expected));
}

#[rstest]
#[case("api")]
#[case("static")]
fn get_never_has_search_type(#[case] search_type: &str) {
    let search = Search::builder(search_type)
        .ids("an-id")
        .build()
        .unwrap();
    let get_search = search.to_get_params().unwrap();
    let value = serde_json::to_value(&get_search).unwrap();
    assert!(value.get("search_type").is_none());
    assert!(value.get("searchType").is_none());
    assert!(!get_search.query_string().unwrap().contains("search_type"));
    assert!(!search.to_post_body().unwrap().contains_key("search_type"));
}

#[test]
fn query_merge() {
    let queries = vec![
        Query::new("datetime", [("eq", 2)]).unwrap(),
        Query::new("bbox", [("eq", 4)]).unwrap(),
    ];
    assert_json_eq!(
        Value::Object(merge(&queries)),
        json!({"datetime": {"eq": 2}, "bbox": {"eq": 4}})
    );
}

#[test]
fn query_last_operator_wins() {
    let search = Search::builder("api")
        .query(("eo:cloud_cover", vec![("<", 10), ("lt", 5)]))
        .build()
        .unwrap();
    assert_json_eq!(
        search.to_post_body().unwrap()["query"],
        json!({"eo:cloud_cover": {"lt": 5}})
    );
}

#[test]
fn invalid_operator() {
    let error = Query::new("bbox", [("wrong", 2)]).unwrap_err();
    assert!(matches!(&error, Error::InvalidOperator(symbol) if symbol == "wrong"));
    assert!(error.to_string().contains("wrong"));
}

#[test]
fn duplicate_field_types() {
    let error = Search::builder("api")
        .fields((FieldSet::include(["id"]), FieldSet::include(["datetime"])))
        .build()
        .unwrap_err();
    assert!(matches!(
        error.field_errors()[0].source,
        Error::DuplicateFieldType(_)
    ));
}

#[test]
fn fields_tuples() {
    let search = Search::builder("api")
        .fields(vec![("exclude", vec!["geometry"]), ("include", vec!["id", "properties.datetime"])])
        .build()
        .unwrap();
    assert_json_eq!(
        search.to_post_body().unwrap()["fields"],
        json!({"include": ["id", "properties.datetime"], "exclude": ["geometry"]})
    );
    assert_eq!(
        search.to_get_params().unwrap().fields.unwrap(),
        "+id,+properties.datetime,-geometry"
    );
}

fn full_search() -> Search {
    Search::builder("api")
        .bbox([-122.59750209, 37.48803556, -122.2880486, 37.613537207])
        .datetime("2018-02-12T00:00:00Z/2018-03-18T12:31:12Z")
        .ids(vec!["an-id", "another-id"])
        .collections("landsat8_l1tp")
        .query(vec![
            ("eo:cloud_cover", vec![("<=", 10)]),
            ("platform", vec![("==", 8)]),
        ])
        .filter(json!({
            "op": "and",
            "args": [
                {"op": "=", "args": [{"property": "collection"}, "landsat8_l1tp"]},
                {"op": "<=", "args": [{"property": "eo:cloud_cover"}, 10]}
            ]
        }))
        .sortby(vec![("desc", vec!["properties.datetime"]), ("asc", vec!["id"])])
        .fields("id,-geometry")
        .limit(10)
        .build()
        .unwrap()
}

#[test]
fn post_body() {
    assert_json_eq!(
        Value::Object(full_search().to_post_body().unwrap()),
        json!({
            "bbox": [-122.59750209, 37.48803556, -122.2880486, 37.613537207],
            "datetime": "2018-02-12T00:00:00Z/2018-03-18T12:31:12Z",
            "ids": ["an-id", "another-id"],
            "collections": ["landsat8_l1tp"],
            "query": {
                "eo:cloud_cover": {"lte": 10},
                "platform": {"eq": 8}
            },
            "filter": {
                "op": "and",
                "args": [
                    {"op": "=", "args": [{"property": "collection"}, "landsat8_l1tp"]},
                    {"op": "<=", "args": [{"property": "eo:cloud_cover"}, 10]}
                ]
            },
            "filter-lang": "cql2-json",
            "sortby": [
                {"field": "properties.datetime", "direction": "desc"},
                {"field": "id", "direction": "asc"}
            ],
            "fields": {"include": ["id"], "exclude": ["geometry"]},
            "limit": 10
        })
    );
}

#[test]
fn get_params() {
    let get_search = full_search().to_get_params().unwrap();
    assert_eq!(
        get_search,
        GetSearch {
            bbox: Some("-122.59750209,37.48803556,-122.2880486,37.613537207".to_string()),
            intersects: None,
            datetime: Some("2018-02-12T00:00:00Z/2018-03-18T12:31:12Z".to_string()),
            ids: Some("an-id,another-id".to_string()),
            collections: Some("landsat8_l1tp".to_string()),
            query: Some(r#"{"eo:cloud_cover":{"lte":10},"platform":{"eq":8}}"#.to_string()),
            filter: Some(
                concat!(
                    r#"{"op":"and","args":["#,
                    r#"{"op":"=","args":[{"property":"collection"},"landsat8_l1tp"]},"#,
                    r#"{"op":"<=","args":[{"property":"eo:cloud_cover"},10]}]}"#
                )
                .to_string()
            ),
            filter_lang: Some("cql2-json".to_string()),
            sortby: Some("-properties.datetime,+id".to_string()),
            fields: Some("+id,-geometry".to_string()),
            limit: Some(10),
        }
    );
}

#[test]
fn get_round_trip() {
    let search = full_search();
    let get_search = search.to_get_params().unwrap();
    let query_string = get_search.query_string().unwrap();
    let decoded: GetSearch = serde_urlencoded::from_str(&query_string).unwrap();
    assert_eq!(decoded, get_search);
    assert_eq!(Search::try_from(decoded).unwrap(), search);
}

#[test]
fn post_round_trip() {
    let search = Search::builder("api")
        .intersects(polygon())
        .datetime("2020-06")
        .query(("eo:cloud_cover", vec![("<", 10)]))
        .sortby("-datetime")
        .fields("id")
        .build()
        .unwrap();
    let body = search.to_post_body().unwrap();
    let rebuilt = SearchBuilder::from_json(Value::Object(body))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(rebuilt, search);
}

#[test]
fn from_json_every_shape() {
    let search = SearchBuilder::from_json(json!({
        "search_type": "static",
        "bbox": [0, 0, 1, 1, 2, 2],
        "datetime": ["2018-01-01T00:00:00Z", null],
        "ids": "a,b",
        "collections": ["c"],
        "query": [["eo:cloud_cover", [["<", 10]]]],
        "filter": ["and", []],
        "sortby": [["asc", ["id"]]],
        "fields": [["include", ["id"]], ["exclude", ["geometry"]]],
        "limit": 5
    }))
    .unwrap()
    .build()
    .unwrap();
    assert_eq!(search.search_type(), SearchType::Static);
    assert_eq!(search.bbox().unwrap().to_vec(), [0.0, 0.0, 1.0, 1.0, 2.0, 2.0]);
    assert_eq!(search.datetime().unwrap().end(), None);
    assert_eq!(search.ids().unwrap(), ["a", "b"]);
    assert_eq!(search.query().unwrap()[0].operators()[0].0, Operator::Lt);
    assert_eq!(search.filter_lang(), Some(FilterLang::Cql2Json));
    assert_eq!(search.sortby().unwrap(), [Sortby::asc("id")]);
    assert_eq!(search.fields().unwrap().to_string(), "+id,-geometry");
    assert_eq!(search.limit(), Some(5));
}

#[test]
fn requests() {
    let search = Search::builder("api").collections("c").build().unwrap();
    let Request::Get(get_search) = search.to_request(Method::Get).unwrap() else {
        panic!("expected a GET request");
    };
    let endpoint = url::Url::parse("https://stac.example/search?page=2").unwrap();
    assert_eq!(
        get_search.url(&endpoint).unwrap().as_str(),
        "https://stac.example/search?collections=c&limit=100"
    );
    assert!(matches!(
        search.to_request(Method::Post).unwrap(),
        Request::Post(_)
    ));
}
