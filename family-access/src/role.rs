use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles known to the engine.
///
/// `SuperAdmin > Admin > Manager > Member` form the financial hierarchy.
/// `Translator` only unlocks the translation subsystem and has no rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    Manager,
    Translator,
    Member,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Translator,
        Role::Member,
    ];

    /// Position in the financial hierarchy, `None` for roles outside it
    pub fn rank(self) -> Option<u8> {
        match self {
            Role::SuperAdmin => Some(3),
            Role::Admin => Some(2),
            Role::Manager => Some(1),
            Role::Member => Some(0),
            Role::Translator => None,
        }
    }

    /// `rank(self) >= rank(threshold)`. Unranked roles never satisfy and are never satisfied.
    pub fn at_least(self, threshold: Role) -> bool {
        match (self.rank(), threshold.rank()) {
            (Some(own), Some(required)) => own >= required,
            _ => false,
        }
    }

    pub fn is_translator(self) -> bool {
        matches!(self, Role::Translator)
    }

    /// Roles with cross-family privileges
    pub fn is_administrator(self) -> bool {
        matches!(self, Role::SuperAdmin | Role::Admin)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Translator => "TRANSLATOR",
            Role::Member => "MEMBER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_is_strictly_ordered() {
        assert!(Role::SuperAdmin.rank() > Role::Admin.rank());
        assert!(Role::Admin.rank() > Role::Manager.rank());
        assert!(Role::Manager.rank() > Role::Member.rank());
        assert_eq!(Role::Translator.rank(), None);
    }

    #[test]
    fn test_at_least() {
        assert!(Role::SuperAdmin.at_least(Role::Admin));
        assert!(Role::Manager.at_least(Role::Manager));
        assert!(!Role::Member.at_least(Role::Manager));
        assert!(!Role::Translator.at_least(Role::Member));
        assert!(!Role::Admin.at_least(Role::Translator));
    }

    #[test]
    fn test_translator_is_orthogonal() {
        assert!(Role::Translator.is_translator());
        assert!(!Role::Translator.is_administrator());
        assert!(!Role::SuperAdmin.is_translator());
    }

    #[test]
    fn test_string_round_trip_and_unknown_role() {
        for role in Role::ALL {
            assert_eq!(role.to_string().parse::<Role>().unwrap(), role);
        }
        assert_eq!("OWNER".parse::<Role>(), Err(UnknownRole("OWNER".to_string())));

        let json = serde_json::to_string(&Role::SuperAdmin).unwrap();
        assert_eq!(json, "\"SUPER_ADMIN\"");
        assert!(serde_json::from_str::<Role>("\"superadmin\"").is_err());
    }
}
