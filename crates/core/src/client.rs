use crate::{Error, GetSearch, Search};
use serde_json::{Map, Value};
use std::future::Future;

/// The HTTP method of a search request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    /// Parameters go in the query string.
    Get,

    /// Parameters go in a JSON body.
    #[default]
    Post,
}

/// A search request, ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub enum Request {
    /// GET parameters.
    Get(GetSearch),

    /// A POST body.
    Post(Map<String, Value>),
}

/// A transport that can send search requests.
///
/// [`SearchClient::send`] is the only required method. [`SearchClient::search`]
/// has a default implementation that serializes the search for the given
/// method and delegates to `send`.
pub trait SearchClient: Send + Sync {
    /// The error type for this client.
    type Error: Send;

    /// Sends a search request, returning the parsed response.
    fn send(&self, request: Request) -> impl Future<Output = Result<Value, Self::Error>> + Send;

    /// Searches with the given parameters.
    fn search(
        &self,
        search: &Search,
        method: Method,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send
    where
        Self::Error: From<Error>,
    {
        let request = search.to_request(method);
        async move { self.send(request?).await }
    }
}

#[cfg(test)]
mod tests {
    use super::{Method, Request, SearchClient};
    use crate::{Error, Search};
    use serde_json::{Value, json};
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder(Mutex<Vec<Request>>);

    impl SearchClient for Recorder {
        type Error = Error;

        async fn send(&self, request: Request) -> Result<Value, Error> {
            if let Ok(mut requests) = self.0.lock() {
                requests.push(request);
            }
            Ok(json!({"type": "FeatureCollection", "features": []}))
        }
    }

    #[test]
    fn search_get_and_post() {
        let client = Recorder::default();
        let search = Search::builder("api").ids("a,b").build().unwrap();
        let response = tokio_test::block_on(client.search(&search, Method::Get)).unwrap();
        assert_eq!(response["type"], "FeatureCollection");
        let _ = tokio_test::block_on(client.search(&search, Method::Post)).unwrap();
        let requests = client.0.lock().unwrap();
        let Request::Get(get_search) = &requests[0] else {
            panic!("expected a GET request");
        };
        assert_eq!(get_search.ids.as_deref(), Some("a,b"));
        let Request::Post(body) = &requests[1] else {
            panic!("expected a POST request");
        };
        assert_eq!(body["ids"], json!(["a", "b"]));
    }
}
