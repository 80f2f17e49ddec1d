use crate::role::Role;
use chrono::NaiveDate;
use error_common::{log_error, BudgetError, ErrorContext, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Identifier of a user in the directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a family (tenant)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TenantId(pub String);

impl TenantId {
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TenantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account moderation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    Pending,
    Approved,
    Rejected,
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UserStatus::Pending => "PENDING",
            UserStatus::Approved => "APPROVED",
            UserStatus::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

/// Snapshot of a user as supplied by the user directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub role: Role,
    #[serde(default)]
    pub family_id: Option<TenantId>,
    pub status: UserStatus,
    /// Account that created this one; the "parent" for visibility purposes
    #[serde(default)]
    pub created_by: Option<UserId>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Adult consent for the creator to see this user's amounts
    #[serde(default)]
    pub allow_parent_view: bool,
}

impl User {
    pub fn new(id: &str, role: Role) -> Self {
        Self {
            id: UserId::new(id),
            role,
            family_id: None,
            status: UserStatus::Approved,
            created_by: None,
            birth_date: None,
            allow_parent_view: false,
        }
    }

    pub fn in_family(mut self, family_id: &str) -> Self {
        self.family_id = Some(TenantId::new(family_id));
        self
    }

    pub fn created_by(mut self, creator: &UserId) -> Self {
        self.created_by = Some(creator.clone());
        self
    }

    pub fn born_on(mut self, birth_date: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = status;
        self
    }

    pub fn allowing_parent_view(mut self, allow: bool) -> Self {
        self.allow_parent_view = allow;
        self
    }

    pub fn is_same_user(&self, other: &User) -> bool {
        self.id == other.id
    }
}

/// Direction of money movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordKind {
    Income,
    Expense,
}

/// A transaction as supplied by the record store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialRecord {
    pub id: String,
    pub owner_id: UserId,
    pub amount: Decimal,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: Option<String>,
}

/// Immutable view of the user directory taken for one request
#[derive(Debug, Clone, Default)]
pub struct FamilySnapshot {
    users: HashMap<UserId, User>,
}

impl FamilySnapshot {
    /// Build a snapshot, rejecting duplicate user ids
    pub fn new(users: impl IntoIterator<Item = User>) -> Result<Self> {
        let mut map = HashMap::new();
        for user in users {
            if let Some(previous) = map.insert(user.id.clone(), user) {
                return Err(BudgetError::ValidationError(format!(
                    "duplicate user id in snapshot: {}",
                    previous.id
                )));
            }
        }
        Ok(Self { users: map })
    }

    /// Parse the user directory's JSON array
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed = serde_json::from_str::<Vec<User>>(json)
            .map_err(BudgetError::from)
            .and_then(Self::new);

        if let Err(ref err) = parsed {
            let context = ErrorContext::new().add_context("source", "user_directory");
            log_error(&context, err);
        }
        parsed
    }

    pub fn get(&self, id: &UserId) -> Option<&User> {
        self.users.get(id)
    }

    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn members_of(&self, tenant: &TenantId) -> Vec<&User> {
        let mut members: Vec<&User> = self
            .users
            .values()
            .filter(|user| user.family_id.as_ref() == Some(tenant))
            .collect();
        members.sort_by(|a, b| a.id.cmp(&b.id));
        members
    }

    /// Tenant to member-id mapping. Users without a family are omitted.
    pub fn tenants(&self) -> BTreeMap<&TenantId, Vec<&UserId>> {
        let mut tenants: BTreeMap<&TenantId, Vec<&UserId>> = BTreeMap::new();
        for user in self.users.values() {
            if let Some(ref family_id) = user.family_id {
                tenants.entry(family_id).or_default().push(&user.id);
            }
        }
        for members in tenants.values_mut() {
            members.sort();
        }
        tenants
    }
}
