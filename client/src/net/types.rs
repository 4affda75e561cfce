//! Wire DTOs shared by the identity provider and backend API calls.
//!
//! DESIGN
//! ======
//! The backend speaks Spanish field names (`rol`, `nombre`). Deserialization
//! accepts those plus the English aliases so both API generations decode into
//! the same types. Roles are a closed enum; anything unexpected is kept
//! verbatim for display but never satisfies an allow-list.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Application role assigned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Employee,
    /// A role name this client does not know about.
    Unrecognized(String),
}

impl Role {
    /// Parse a wire role name. Matching ignores surrounding whitespace and
    /// ASCII case.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_uppercase();
        match normalized.as_str() {
            "ADMIN" => Self::Admin,
            "EMPLEADO" | "EMPLOYEE" => Self::Employee,
            _ => Self::Unrecognized(raw.trim().to_owned()),
        }
    }

    /// Canonical wire name (`ADMIN`, `EMPLEADO`, or the raw unrecognized value).
    pub fn as_str(&self) -> &str {
        match self {
            Self::Admin => "ADMIN",
            Self::Employee => "EMPLEADO",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// The backend returns the role either as a plain string or as the nested
/// role entity (`{"id": 1, "rolUsuario": "ADMIN"}`).
#[derive(Deserialize)]
#[serde(untagged)]
enum RoleRepr {
    Name(String),
    Entity {
        #[serde(rename = "rolUsuario", alias = "nombre", alias = "name")]
        name: String,
    },
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = match RoleRepr::deserialize(deserializer)? {
            RoleRepr::Name(name) | RoleRepr::Entity { name } => name,
        };
        Ok(Self::parse(&name))
    }
}

/// User profile returned by `GET /auth/perfil`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "rol", alias = "role")]
    pub role: Role,
    #[serde(default, alias = "name", skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activo: Option<bool>,
}

/// Identity details reported by the identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityUser {
    /// Provider subject identifier.
    pub sub: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Product row listed on the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    #[serde(alias = "name")]
    pub nombre: String,
}
