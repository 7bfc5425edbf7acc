/// A single result record: column name to value. Never interpreted by the
/// pipeline, only forwarded from the query service to the dataset store.
///
/// Columns keep the order the query service sent them in. Numbers are held
/// as `i64`/`u64`/`f64`, so a decimal is re-emitted in its shortest form
/// (`80.0` stays `80.0`, `1.50` becomes `1.5`).
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Power BI dataset identifiers are GUID strings.
pub type DatasetId = String;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_keeps_column_order() {
        let body = r#"{"ObjectUuid":"3f1c","USR_Revenue":1200.5,"USR_Customer":"Contoso"}"#;
        let row: Row = serde_json::from_str(body).unwrap();

        let keys: Vec<&str> = row.keys().map(String::as_str).collect();
        assert_eq!(keys, ["ObjectUuid", "USR_Revenue", "USR_Customer"]);
        assert_eq!(serde_json::to_string(&row).unwrap(), body);
    }
}
