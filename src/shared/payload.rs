//! Response Envelope
//!
//! List and detail endpoints wrap their data in a `Payload`, which can carry
//! side tables ("entities") such as the users who wrote a page of posts:
//!
//! ```json
//! {
//!   "code": 0,
//!   "data": [ { "id": 1, "author_id": 7, ... } ],
//!   "entities": { "users": { "7": { "id": 7, "login": "alice", ... } } },
//!   "has_more": false
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Payload<T> {
    pub code: i32,
    pub data: T,
    #[serde(default)]
    pub entities: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub has_more: bool,
}

impl<T> Payload<T> {
    pub fn new(code: i32, data: T) -> Self {
        Self {
            code,
            data,
            entities: BTreeMap::new(),
            has_more: false,
        }
    }

    pub fn with_more(mut self, has_more: bool) -> Self {
        self.has_more = has_more;
        self
    }

    /// Attach a side table, replacing any previous table with the same name
    pub fn attach<V: Serialize>(&mut self, name: &str, value: V) -> Result<(), serde_json::Error> {
        self.entities.insert(name.to_string(), serde_json::to_value(value)?);
        Ok(())
    }
}

/// A page of search results together with the total match count
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchPage<T> {
    pub data: Vec<T>,
    pub total: i64,
}
