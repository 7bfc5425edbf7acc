//! The network-performing steps of an import, with the labels used in
//! progress and failure reports and the HTTP status each one expects.

/// Status expected from every call except dataset creation.
pub const STATUS_OK: u16 = 200;

/// Status expected from the dataset creation call.
pub const STATUS_CREATED: u16 = 201;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    StoreToken,
    QueryServiceToken,
    FetchData,
    ResolveDataset,
    CreateDataset,
    PurgeTable,
    LoadTable,
}

impl Stage {
    /// All stages in execution order. The two token stages run together.
    pub const ALL: [Stage; 7] = [
        Stage::StoreToken,
        Stage::QueryServiceToken,
        Stage::FetchData,
        Stage::ResolveDataset,
        Stage::CreateDataset,
        Stage::PurgeTable,
        Stage::LoadTable,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::StoreToken => "Get token from Azure AD",
            Self::QueryServiceToken => "Get token from time cockpit",
            Self::FetchData => "Get data from time cockpit",
            Self::ResolveDataset => "Check if dataset exists",
            Self::CreateDataset => "Create dataset in Power BI",
            Self::PurgeTable => "Delete existing data in Power BI",
            Self::LoadTable => "Loading data in Power BI",
        }
    }

    pub fn expected_status(&self) -> u16 {
        match self {
            Self::CreateDataset => STATUS_CREATED,
            _ => STATUS_OK,
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
