//! OData envelope types shared by Graph collection and error responses.

use serde::Deserialize;

/// One page of a Graph collection.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataPage<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
    /// Absolute URL of the next page, absent on the last page.
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
    /// Total item count when `$count=true` was requested.
    #[serde(rename = "@odata.count", default)]
    pub count: Option<u64>,
}

/// Graph error body: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorResponse {
    pub error: GraphErrorDetail,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorDetail {
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl GraphErrorResponse {
    /// `"<code>: <message>"`, or just the code when the message is empty.
    pub fn summary(&self) -> String {
        if self.error.message.is_empty() {
            self.error.code.clone()
        } else {
            format!("{}: {}", self.error.code, self.error.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_with_next_link() {
        let json = r#"{
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#users",
            "@odata.count": 3,
            "@odata.nextLink": "https://graph.microsoft.com/v1.0/users?$skiptoken=abc",
            "value": [1, 2]
        }"#;
        let page: ODataPage<u32> = serde_json::from_str(json).unwrap();
        assert_eq!(page.value, vec![1, 2]);
        assert_eq!(page.count, Some(3));
        assert!(page.next_link.unwrap().contains("skiptoken"));
    }

    #[test]
    fn test_last_page_has_no_next_link() {
        let page: ODataPage<u32> = serde_json::from_str(r#"{"value": []}"#).unwrap();
        assert!(page.value.is_empty());
        assert!(page.next_link.is_none());
    }

    #[test]
    fn test_error_summary() {
        let json = r#"{"error": {"code": "Authorization_RequestDenied", "message": "Insufficient privileges to complete the operation."}}"#;
        let err: GraphErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            err.summary(),
            "Authorization_RequestDenied: Insufficient privileges to complete the operation."
        );
    }
}
