//! `fetch` stand-in: every request succeeds with an empty body.

use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub url: String,
    pub status: u16,
    pub status_text: &'static str,
}

impl Response {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Always an empty JSON object.
    pub fn json(&self) -> Value {
        Value::Object(Map::new())
    }

    /// Always empty.
    pub fn text(&self) -> String {
        String::new()
    }
}

/// Counts requests so a render can report how many it swallowed.
#[derive(Debug, Clone, Default)]
pub struct Fetch {
    count: usize,
}

impl Fetch {
    pub fn fetch(&mut self, url: &str) -> Response {
        self.count += 1;
        Response {
            url: url.to_string(),
            status: 200,
            status_text: "OK",
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_succeeds_with_empty_body() {
        let mut fetch = Fetch::default();
        let response = fetch.fetch("/api/reviews");
        assert!(response.ok());
        assert_eq!(response.status, 200);
        assert_eq!(response.json(), serde_json::json!({}));
        assert_eq!(response.text(), "");
        assert_eq!(response.url, "/api/reviews");
        fetch.fetch("/api/reviews");
        assert_eq!(fetch.count(), 2);
    }
}
