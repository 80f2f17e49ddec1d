use crate::models::TenantId;
use error_common::{BudgetError, Result};
use serde::{Deserialize, Serialize};

/// Identifier of the administrative family that can never be deleted
pub const DEFAULT_RESERVED_TENANT: &str = "default";

/// Age at which a user's amounts stop being visible by default
pub const DEFAULT_ADULT_AGE: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessConfig {
    pub reserved_tenant_id: TenantId,
    pub adult_age: u32,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            reserved_tenant_id: TenantId::new(DEFAULT_RESERVED_TENANT),
            adult_age: DEFAULT_ADULT_AGE,
        }
    }
}

impl AccessConfig {
    /// Parse and validate a YAML document. Missing keys fall back to defaults;
    /// unknown keys are rejected so a misspelled reserved tenant cannot go unnoticed.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AccessConfig = serde_yaml::from_str(yaml)
            .map_err(|e| BudgetError::ConfigError(format!("invalid access config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reserved_tenant_id.as_str().trim().is_empty() {
            return Err(BudgetError::ConfigError(
                "reserved_tenant_id must not be empty".to_string(),
            ));
        }
        if self.adult_age == 0 {
            return Err(BudgetError::ConfigError(
                "adult_age must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
