//! Target dataset schema and the import request handed to the pipeline.
//!
//! [`DatasetDefinition`] serializes directly to the body of the Power BI
//! "create dataset" call: `{ name, tables: [{ name, columns: [{ name,
//! dataType }] }] }`.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;

/// Column types accepted by Power BI push datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataType {
    Int64,
    Double,
    Boolean,
    DateTime,
    String,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Int64 => "Int64",
            Self::Double => "Double",
            Self::Boolean => "Boolean",
            Self::DateTime => "DateTime",
            Self::String => "String",
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    #[validate(length(min = 1, message = "column name must not be empty"))]
    pub name: String,
    pub data_type: DataType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TableSpec {
    #[validate(length(min = 1, message = "table name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "table needs at least one column"), nested)]
    pub columns: Vec<ColumnSpec>,
}

/// A named dataset with an ordered list of tables.
///
/// Only the first table is ever purged and loaded; further tables are
/// created with the dataset but left empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DatasetDefinition {
    #[validate(length(min = 1, message = "dataset name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "dataset needs at least one table"), nested)]
    pub tables: Vec<TableSpec>,
}

impl DatasetDefinition {
    /// The table that receives the imported rows (index 0).
    pub fn target_table(&self) -> Option<&TableSpec> {
        self.tables.first()
    }
}

/// A time cockpit query (TCQL) whose result set is imported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuerySpec(String);

impl QuerySpec {
    pub fn new(query: impl Into<String>) -> Self {
        Self(query.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Everything a single import run needs from its caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    pub query: QuerySpec,
    pub dataset: DatasetDefinition,
}

impl ImportRequest {
    pub fn new(query: QuerySpec, dataset: DatasetDefinition) -> Self {
        Self { query, dataset }
    }

    /// Check the request before any network call is made.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.query.as_str().trim().is_empty() {
            return Err(CoreError::Validation("query must not be blank".into()));
        }
        self.dataset.validate()?;
        Ok(())
    }

    /// Name of the table that is purged and loaded.
    pub fn target_table_name(&self) -> Result<&str, CoreError> {
        self.dataset
            .target_table()
            .map(|t| t.name.as_str())
            .ok_or_else(|| CoreError::Validation("dataset needs at least one table".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoices() -> DatasetDefinition {
        DatasetDefinition {
            name: "Invoices".into(),
            tables: vec![TableSpec {
                name: "Invoices".into(),
                columns: vec![
                    ColumnSpec::new("ObjectUuid", DataType::String),
                    ColumnSpec::new("USR_InvoiceYear", DataType::Int64),
                    ColumnSpec::new("USR_Revenue", DataType::Double),
                ],
            }],
        }
    }

    #[test]
    fn definition_serializes_to_create_payload() {
        let json = serde_json::to_value(invoices()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Invoices",
                "tables": [{
                    "name": "Invoices",
                    "columns": [
                        { "name": "ObjectUuid", "dataType": "String" },
                        { "name": "USR_InvoiceYear", "dataType": "Int64" },
                        { "name": "USR_Revenue", "dataType": "Double" },
                    ]
                }]
            })
        );
    }

    #[test]
    fn data_type_display_matches_wire_name() {
        for ty in [
            DataType::Int64,
            DataType::Double,
            DataType::Boolean,
            DataType::DateTime,
            DataType::String,
        ] {
            let wire = serde_json::to_value(ty).unwrap();
            assert_eq!(wire, serde_json::Value::String(ty.to_string()));
        }
    }

    #[test]
    fn query_spec_is_transparent() {
        let json = serde_json::to_value(QuerySpec::new("From I In Invoice Select I")).unwrap();
        assert_eq!(json, "From I In Invoice Select I");
    }

    #[test]
    fn valid_request_passes() {
        let request = ImportRequest::new(QuerySpec::new("From I In Invoice Select I"), invoices());
        assert!(request.validate().is_ok());
        assert_eq!(request.target_table_name().unwrap(), "Invoices");
    }

    #[test]
    fn blank_query_is_rejected() {
        let request = ImportRequest::new(QuerySpec::new("  \n"), invoices());
        let err = request.validate().unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn dataset_without_tables_is_rejected() {
        let mut dataset = invoices();
        dataset.tables.clear();
        let request = ImportRequest::new(QuerySpec::new("q"), dataset);
        assert!(request.validate().is_err());
        assert!(request.target_table_name().is_err());
    }

    #[test]
    fn table_without_columns_is_rejected() {
        let mut dataset = invoices();
        dataset.tables[0].columns.clear();
        assert!(dataset.validate().is_err());
    }

    #[test]
    fn empty_column_name_is_rejected() {
        let mut dataset = invoices();
        dataset.tables[0].columns.push(ColumnSpec::new("", DataType::String));
        let err: CoreError = dataset.validate().unwrap_err().into();
        assert!(err.to_string().contains("column name must not be empty"));
    }

    #[test]
    fn target_table_is_first() {
        let mut dataset = invoices();
        dataset.tables.push(TableSpec {
            name: "Other".into(),
            columns: vec![ColumnSpec::new("Id", DataType::String)],
        });
        assert_eq!(dataset.target_table().unwrap().name, "Invoices");
    }
}
