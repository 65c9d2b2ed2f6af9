use serde::{Deserialize, Serialize};

use super::de;

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub password: String,
}

/// Account role as understood by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

/// Identity returned by `POST /login` and `GET /me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentityResponse {
    #[serde(rename = "userId", deserialize_with = "de::string_or_number")]
    pub user_id: String,
    pub role: Role,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub wallet: f64,
}

/// User information held by the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserInfo {
    pub id: String,
    /// `None` for the anonymous session.
    pub role: Option<Role>,
    pub wallet: f64,
}

/// Current session as seen by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Session {
    #[serde(rename = "isAuthenticated")]
    pub is_authenticated: bool,
    pub user: UserInfo,
}

impl Session {
    /// The logged-out session: empty id, no role, zero wallet.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user_id: impl Into<String>, role: Role, wallet: f64) -> Self {
        Self {
            is_authenticated: true,
            user: UserInfo {
                id: user_id.into(),
                role: Some(role),
                wallet,
            },
        }
    }

    pub fn is_admin(&self) -> bool {
        self.is_authenticated && self.user.role == Some(Role::Admin)
    }
}

impl From<IdentityResponse> for Session {
    fn from(identity: IdentityResponse) -> Self {
        Session::authenticated(identity.user_id, identity.role, identity.wallet)
    }
}
