// Standardized error codes for the Family Budget engine

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
}

pub mod authorization {
    pub const ACCESS_DENIED: &str = "AUTHZ_3001";
    pub const SELF_ACTION_FORBIDDEN: &str = "AUTHZ_3101";
    pub const OUT_OF_SCOPE: &str = "AUTHZ_3102";
    pub const INSUFFICIENT_ROLE: &str = "AUTHZ_3103";
    pub const TARGET_NOT_PENDING: &str = "AUTHZ_3104";
    pub const PROTECTED_TENANT: &str = "AUTHZ_3105";
}

pub mod lifecycle {
    pub const INVALID_STATUS_TRANSITION: &str = "LIFECYCLE_5001";
}

pub mod configuration {
    pub const INVALID_CONFIG: &str = "CONFIG_6001";
}
