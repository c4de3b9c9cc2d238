//! Role primitives shared by authorisation checks and reconciliation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::UserId;

/// Application role held by a user.
///
/// Roles are compared and parsed case-insensitively because the external
/// identity provider stores display-cased names ("Caretaker") while the
/// local store keeps the canonical upper-case form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Manages the organisation: anchor administration, all timesheets.
    Manager,
    /// Clocks in and out of shifts; sees only their own timesheet.
    Caretaker,
}

impl Role {
    /// Canonical upper-case name of the role.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Manager => "MANAGER",
            Self::Caretaker => "CARETAKER",
        }
    }

    /// Whether `candidate` names this role, ignoring ASCII case.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Role;
    ///
    /// assert!(Role::Caretaker.matches_name("Caretaker"));
    /// assert!(!Role::Caretaker.matches_name("Manager"));
    /// ```
    pub fn matches_name(&self, candidate: &str) -> bool {
        self.name().eq_ignore_ascii_case(candidate)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown role name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRoleError {
    /// The name that failed to parse.
    pub name: String,
}

impl fmt::Display for UnknownRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown role name: {}", self.name)
    }
}

impl std::error::Error for UnknownRoleError {}

impl FromStr for Role {
    type Err = UnknownRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if Self::Manager.matches_name(trimmed) {
            Ok(Self::Manager)
        } else if Self::Caretaker.matches_name(trimmed) {
            Ok(Self::Caretaker)
        } else {
            Err(UnknownRoleError {
                name: trimmed.to_owned(),
            })
        }
    }
}

/// The locally stored role record for one user.
///
/// One assignment exists per user; it changes only through reconciliation or
/// explicit admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleAssignment {
    /// Owning user.
    pub user_id: UserId,
    /// Locally authoritative role.
    pub role: Role,
}

impl RoleAssignment {
    /// Construct an assignment record.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Opaque identifier of a role object in the external identity system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RemoteRoleId(String);

impl RemoteRoleId {
    /// Wrap a provider-issued role identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RemoteRoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role object as returned by the external identity system.
///
/// The per-user role list is ordered; only the first entry is treated as
/// authoritative during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteRole {
    /// Provider-issued identifier.
    pub id: RemoteRoleId,
    /// Display name, e.g. "Caretaker".
    pub name: String,
    /// Optional human description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RemoteRole {
    /// Construct a remote role without a description.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: RemoteRoleId::new(id),
            name: name.into(),
            description: None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("MANAGER", Role::Manager)]
    #[case("manager", Role::Manager)]
    #[case("Manager", Role::Manager)]
    #[case("CARETAKER", Role::Caretaker)]
    #[case("Caretaker", Role::Caretaker)]
    #[case("  caretaker  ", Role::Caretaker)]
    fn roles_parse_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        let role: Role = raw.parse().expect("role parses");
        assert_eq!(role, expected);
    }

    #[rstest]
    #[case("scheduler")]
    #[case("")]
    fn unknown_roles_fail_to_parse(#[case] raw: &str) {
        let err = raw.parse::<Role>().expect_err("unknown role must fail");
        assert_eq!(err.name, raw.trim());
    }

    #[rstest]
    fn role_serialises_upper_case() {
        let value = serde_json::to_value(Role::Caretaker).expect("role serialises");
        assert_eq!(value, serde_json::json!("CARETAKER"));
    }

    #[rstest]
    fn matches_name_ignores_case_but_not_content() {
        assert!(Role::Manager.matches_name("mAnAgEr"));
        assert!(!Role::Manager.matches_name("CARETAKER"));
    }
}
