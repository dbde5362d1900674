//! Conversion of search directives into JSON objects, and merging of those objects.

use serde_json::{Map, Value};

/// Converts a search directive into a JSON object.
pub trait ToJsonMap {
    /// Returns this directive as a JSON object.
    ///
    /// # Examples
    ///
    /// ```
    /// use stac_search::{Query, ToJsonMap};
    ///
    /// let query = Query::new("eo:cloud_cover", [("<", 10)]).unwrap();
    /// assert_eq!(query.to_json_map()["eo:cloud_cover"]["lt"], 10);
    /// ```
    fn to_json_map(&self) -> Map<String, Value>;
}

/// Merges the JSON objects of several directives into one.
///
/// Later directives win when two of them share a key.
///
/// # Examples
///
/// ```
/// use stac_search::{Query, json::merge};
///
/// let queries = vec![
///     Query::new("datetime", [("eq", 2)]).unwrap(),
///     Query::new("bbox", [("eq", 4)]).unwrap(),
/// ];
/// let merged = merge(&queries);
/// assert_eq!(merged.len(), 2);
/// ```
pub fn merge<'a, T>(objects: impl IntoIterator<Item = &'a T>) -> Map<String, Value>
where
    T: ToJsonMap + 'a,
{
    let mut merged = Map::new();
    for object in objects {
        merged.extend(object.to_json_map());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::{ToJsonMap, merge};
    use serde_json::{Map, Value, json};

    struct Entry(&'static str, i64);

    impl ToJsonMap for Entry {
        fn to_json_map(&self) -> Map<String, Value> {
            let mut map = Map::new();
            let _ = map.insert(self.0.to_string(), json!({"eq": self.1}));
            map
        }
    }

    #[test]
    fn distinct_keys() {
        let merged = merge(&[Entry("datetime", 2), Entry("bbox", 4)]);
        assert_eq!(
            Value::Object(merged),
            json!({"datetime": {"eq": 2}, "bbox": {"eq": 4}})
        );
    }

    #[test]
    fn last_wins() {
        let merged = merge(&[Entry("datetime", 2), Entry("datetime", 4)]);
        assert_eq!(Value::Object(merged), json!({"datetime": {"eq": 4}}));
    }

    #[test]
    fn empty() {
        assert!(merge::<Entry>([]).is_empty());
    }
}
