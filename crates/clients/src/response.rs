//! Status and body captured from a service response.

use serde::de::DeserializeOwned;

/// An HTTP response reduced to what the importer inspects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub text: String,
}

impl RawResponse {
    pub fn new(status: u16, text: impl Into<String>) -> Self {
        Self {
            status,
            text: text.into(),
        }
    }

    /// Consume a [`reqwest::Response`], reading the whole body as text.
    pub async fn read(response: reqwest::Response) -> Result<Self, reqwest::Error> {
        let status = response.status().as_u16();
        let text = response.text().await?;
        Ok(Self { status, text })
    }

    /// The body, or `None` when the service sent nothing.
    pub fn body(&self) -> Option<&str> {
        if self.text.trim().is_empty() {
            None
        } else {
            Some(&self.text)
        }
    }

    pub fn json(&self) -> Result<serde_json::Value, String> {
        serde_json::from_str(&self.text).map_err(|e| format!("response body is not JSON: {e}"))
    }

    /// Deserialize one top-level field of a JSON object body.
    pub fn json_field<T: DeserializeOwned>(&self, field: &str) -> Result<T, String> {
        let mut body = self.json()?;
        let value = body
            .get_mut(field)
            .map(serde_json::Value::take)
            .ok_or_else(|| format!("response body has no `{field}` field"))?;
        serde_json::from_value(value)
            .map_err(|e| format!("field `{field}` has unexpected shape: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_body_is_none() {
        assert_eq!(RawResponse::new(200, "").body(), None);
        assert_eq!(RawResponse::new(200, " \n").body(), None);
        assert_eq!(RawResponse::new(500, "boom").body(), Some("boom"));
    }

    #[test]
    fn json_field_extracts_value() {
        let resp = RawResponse::new(200, r#"{"access_token":"abc","expires_in":"3599"}"#);
        let token: String = resp.json_field("access_token").unwrap();
        assert_eq!(token, "abc");
    }

    #[test]
    fn json_field_reports_missing_field() {
        let resp = RawResponse::new(200, r#"{"id":"d1"}"#);
        let err = resp.json_field::<String>("value").unwrap_err();
        assert_eq!(err, "response body has no `value` field");
    }

    #[test]
    fn json_field_reports_non_json() {
        let resp = RawResponse::new(200, "<html></html>");
        let err = resp.json_field::<String>("id").unwrap_err();
        assert!(err.starts_with("response body is not JSON"));
    }

    #[test]
    fn json_field_reports_wrong_shape() {
        let resp = RawResponse::new(200, r#"{"value": 5}"#);
        let err = resp.json_field::<Vec<String>>("value").unwrap_err();
        assert!(err.contains("unexpected shape"));
    }
}
