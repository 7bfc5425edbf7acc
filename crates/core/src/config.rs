//! Process-wide configuration read once at startup.
//!
//! Every loader comes in two forms: `from_env()` reads `std::env`, and
//! `from_lookup()` reads through a caller-supplied function so tests can
//! supply values without touching the process environment.

use std::fmt;

use crate::error::CoreError;

/// Default Azure AD authority host.
pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";

/// Resource identifier requested in the Power BI token grant.
pub const DEFAULT_POWERBI_RESOURCE: &str = "https://analysis.windows.net/powerbi/api";

/// Default Power BI REST API root for the signed-in user's workspace.
pub const DEFAULT_POWERBI_API_URL: &str = "https://api.powerbi.com/v1.0/myorg";

/// Default time cockpit web API root.
pub const DEFAULT_TC_API_URL: &str = "https://apipreview.timecockpit.com";

/// Read a required variable. Blank values count as missing.
fn required<F>(lookup: &F, key: &'static str) -> Result<String, CoreError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(CoreError::MissingConfig(key))
}

/// Read an optional base URL, falling back to `default`, without a trailing
/// slash.
fn base_url<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
        .trim()
        .trim_end_matches('/')
        .to_string()
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Credentials for both identity providers.
///
/// | Variable              | Used for                                 |
/// |-----------------------|------------------------------------------|
/// | `AZURE_AD_TENANT`     | Azure AD tenant in the token URL         |
/// | `AZURE_AD_APP_ID`     | OAuth client id                          |
/// | `AZURE_AD_APP_SECRET` | OAuth client secret                      |
/// | `POWERBI_USER`        | Power BI account (password grant)        |
/// | `POWERBI_PASSWORD`    | Power BI account password                |
/// | `TC_USER`             | time cockpit account (basic auth)        |
/// | `TC_PASSWORD`         | time cockpit account password            |
///
/// All variables are required.
#[derive(Clone)]
pub struct Credentials {
    pub tenant: String,
    pub client_id: String,
    pub client_secret: String,
    pub powerbi_user: String,
    pub powerbi_password: String,
    pub tc_user: String,
    pub tc_password: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            tenant: required(&lookup, "AZURE_AD_TENANT")?,
            client_id: required(&lookup, "AZURE_AD_APP_ID")?,
            client_secret: required(&lookup, "AZURE_AD_APP_SECRET")?,
            powerbi_user: required(&lookup, "POWERBI_USER")?,
            powerbi_password: required(&lookup, "POWERBI_PASSWORD")?,
            tc_user: required(&lookup, "TC_USER")?,
            tc_password: required(&lookup, "TC_PASSWORD")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("tenant", &self.tenant)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("powerbi_user", &self.powerbi_user)
            .field("powerbi_password", &"<redacted>")
            .field("tc_user", &self.tc_user)
            .field("tc_password", &"<redacted>")
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

/// Base URLs of the external services, with production defaults.
///
/// | Env Var              | Default                                    |
/// |----------------------|--------------------------------------------|
/// | `AZURE_AD_AUTHORITY` | `https://login.microsoftonline.com`        |
/// | `POWERBI_RESOURCE`   | `https://analysis.windows.net/powerbi/api` |
/// | `POWERBI_API_URL`    | `https://api.powerbi.com/v1.0/myorg`       |
/// | `TC_API_URL`         | `https://apipreview.timecockpit.com`       |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub authority_url: String,
    /// Sent verbatim as the `resource` form field, so no slash trimming.
    pub powerbi_resource: String,
    pub powerbi_api_url: String,
    pub tc_api_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            authority_url: DEFAULT_AUTHORITY_URL.to_string(),
            powerbi_resource: DEFAULT_POWERBI_RESOURCE.to_string(),
            powerbi_api_url: DEFAULT_POWERBI_API_URL.to_string(),
            tc_api_url: DEFAULT_TC_API_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            authority_url: base_url(&lookup, "AZURE_AD_AUTHORITY", DEFAULT_AUTHORITY_URL),
            powerbi_resource: lookup("POWERBI_RESOURCE")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_POWERBI_RESOURCE.to_string()),
            powerbi_api_url: base_url(&lookup, "POWERBI_API_URL", DEFAULT_POWERBI_API_URL),
            tc_api_url: base_url(&lookup, "TC_API_URL", DEFAULT_TC_API_URL),
        }
    }

    /// Point every service at one host. Used when a single mock server
    /// stands in for all of them.
    pub fn single_host(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            authority_url: base.to_string(),
            powerbi_resource: DEFAULT_POWERBI_RESOURCE.to_string(),
            powerbi_api_url: base.to_string(),
            tc_api_url: base.to_string(),
        }
    }
}
