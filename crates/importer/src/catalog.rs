//! Built-in imports: which time cockpit query feeds which Power BI dataset.

use tcpbi_core::dataset::{
    ColumnSpec, DataType, DatasetDefinition, ImportRequest, QuerySpec, TableSpec,
};

/// A named, ready-to-run import. Entries are identified by their key.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Name used in `IMPORT_DATASETS`.
    pub key: &'static str,
    /// Heading logged before the import starts.
    pub title: &'static str,
    build: fn() -> ImportRequest,
}

impl PartialEq for CatalogEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for CatalogEntry {}

impl CatalogEntry {
    pub fn request(&self) -> ImportRequest {
        (self.build)()
    }
}

pub const INVOICES: CatalogEntry = CatalogEntry {
    key: "invoices",
    title: "Importing Invoices",
    build: invoices,
};

pub const TIMESHEETS: CatalogEntry = CatalogEntry {
    key: "timesheets",
    title: "Importing Time Sheet Records",
    build: timesheets,
};

pub const ENTRIES: [CatalogEntry; 2] = [INVOICES, TIMESHEETS];

/// Find an entry by key, ignoring case.
pub fn lookup(key: &str) -> Option<CatalogEntry> {
    ENTRIES
        .iter()
        .copied()
        .find(|entry| entry.key.eq_ignore_ascii_case(key))
}

/// Monthly revenue per customer, country and project.
pub fn invoices() -> ImportRequest {
    let query = "From I In Invoice Select New With { .InvoiceYear = :Year(I.InvoiceDate), \
        .InvoiceMonth = :Month(I.InvoiceDate), .Revenue = Sum(I.Revenue), \
        .Customer = :DisplayValue(I.Project.Customer), \
        .Country = :DisplayValue(I.Project.Customer.Country), \
        .Project = :DisplayValue(I.Project) }";

    ImportRequest::new(
        QuerySpec::new(query),
        single_table(
            "Invoices",
            vec![
                ColumnSpec::new("ObjectUuid", DataType::String),
                ColumnSpec::new("USR_InvoiceYear", DataType::Int64),
                ColumnSpec::new("USR_InvoiceMonth", DataType::Int64),
                ColumnSpec::new("USR_Customer", DataType::String),
                ColumnSpec::new("USR_Country", DataType::String),
                ColumnSpec::new("USR_Project", DataType::String),
                ColumnSpec::new("USR_Revenue", DataType::Double),
            ],
        ),
    )
}

/// Booked hours per day, employee, customer and project.
pub fn timesheets() -> ImportRequest {
    let query = "From T In Timesheet Select New With { .DurationInHours = Sum(T.DurationInHours), \
        .TimesheetYear = :Year(T.BeginTime), \
        .TimesheetMonth = :Month(T.BeginTime), \
        .TimesheetDay = :Day(T.BeginTime), \
        .Employee = :DisplayValue(T.UserDetail), \
        .Customer = :DisplayValue(T.Project.Customer), \
        .Project = :DisplayValue(T.Project) }";

    ImportRequest::new(
        QuerySpec::new(query),
        single_table(
            "Timesheets",
            vec![
                ColumnSpec::new("ObjectUuid", DataType::String),
                ColumnSpec::new("USR_DurationInHours", DataType::Double),
                ColumnSpec::new("USR_TimesheetYear", DataType::Int64),
                ColumnSpec::new("USR_TimesheetMonth", DataType::Int64),
                ColumnSpec::new("USR_TimesheetDay", DataType::Int64),
                ColumnSpec::new("USR_Employee", DataType::String),
                ColumnSpec::new("USR_Customer", DataType::String),
                ColumnSpec::new("USR_Project", DataType::String),
            ],
        ),
    )
}

/// A dataset holding one table of the same name.
fn single_table(name: &str, columns: Vec<ColumnSpec>) -> DatasetDefinition {
    DatasetDefinition {
        name: name.to_string(),
        tables: vec![TableSpec {
            name: name.to_string(),
            columns,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_is_valid() {
        for entry in ENTRIES {
            let request = entry.request();
            assert!(request.validate().is_ok(), "{}", entry.key);
        }
    }

    #[test]
    fn invoices_targets_invoices_table() {
        let request = invoices();
        assert_eq!(request.dataset.name, "Invoices");
        assert_eq!(request.target_table_name().unwrap(), "Invoices");
        assert_eq!(request.dataset.tables[0].columns.len(), 7);
        assert!(request.query.as_str().starts_with("From I In Invoice"));
    }

    #[test]
    fn timesheets_columns_are_typed() {
        let request = timesheets();
        let columns = &request.dataset.tables[0].columns;
        assert_eq!(columns[1], ColumnSpec::new("USR_DurationInHours", DataType::Double));
        assert_eq!(columns[4], ColumnSpec::new("USR_TimesheetDay", DataType::Int64));
    }

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(lookup("Invoices"), Some(INVOICES));
        assert_eq!(lookup("TIMESHEETS"), Some(TIMESHEETS));
        assert_eq!(lookup("projects"), None);
    }
}
