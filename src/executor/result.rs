//! Grid response type

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One page of grid data, in the grid protocol's field names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridResponse {
    /// Echo token from the request
    pub draw: i64,
    /// Rows in the collection before filtering
    pub records_total: u64,
    /// Rows remaining after filtering, before paging
    pub records_filtered: u64,
    /// Projected page rows
    pub data: Vec<Value>,
}

impl GridResponse {
    /// Returns the number of rows on this page
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the page is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_field_names() {
        let resp = GridResponse {
            draw: 2,
            records_total: 10,
            records_filtered: 3,
            data: vec![json!({"name": "a"})],
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["recordsTotal"], 10);
        assert_eq!(json["recordsFiltered"], 3);
        assert_eq!(json["draw"], 2);
        assert_eq!(resp.len(), 1);
    }
}
