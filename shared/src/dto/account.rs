//! Account management DTOs: user creation, password changes, wallet top-up,
//! admin user lookup and the wallet ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth::Role;
use super::catalog::ServiceCatalogEntry;
use super::de;
use super::order::Order;

/// `POST /admin/createUser` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub password: String,
    pub role: Role,
    /// `serviceId`s of the services the new account may order.
    pub services: Vec<String>,
}

/// Echo of the created credentials so the admin can hand them over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUserResponse {
    #[serde(rename = "userId", deserialize_with = "de::string_or_number")]
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// `POST /admin/changeUserPassword` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeUserPasswordRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// `PUT /user/changePassword` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangePasswordRequest {
    #[serde(rename = "currentPassword")]
    pub current_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

/// `PUT /admin/addBalance` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddBalanceRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AddBalanceResponse {
    #[serde(rename = "userId", default, deserialize_with = "de::string_or_number")]
    pub user_id: String,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub amount: f64,
    /// New wallet balance when the backend reports it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<f64>,
}

/// `POST /admin/getUser` body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GetUserRequest {
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// One wallet ledger row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Transaction {
    #[serde(rename = "orderId", default, deserialize_with = "de::opt_string_or_number")]
    pub order_id: Option<String>,
    #[serde(default, deserialize_with = "de::f64_or_string")]
    pub amount: f64,
    /// Ledger entry kind, e.g. `credit` or `order`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_datetime")]
    pub date: Option<DateTime<Utc>>,
}

/// Admin view of one account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UserDetails {
    #[serde(rename = "userId", default, deserialize_with = "de::string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, alias = "wallet", deserialize_with = "de::f64_or_string")]
    pub balance: f64,
    #[serde(default)]
    pub services: Vec<ServiceCatalogEntry>,
    #[serde(default)]
    pub orders: Vec<Order>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_details_accepts_wallet_alias() {
        let json = r#"{
            "userId": "bob",
            "wallet": 75,
            "services": [{"serviceId": "1", "service": "YT-V", "name": "Views", "rate": 3}],
            "transactions": [{"orderId": 12, "amount": "50", "date": "2024-03-02T08:00:00Z"}]
        }"#;
        let user: UserDetails = serde_json::from_str(json).unwrap();

        assert_eq!(user.user_id, "bob");
        assert_eq!(user.role, Role::User);
        assert_eq!(user.balance, 75.0);
        assert_eq!(user.services[0].service, "YT-V");
        assert_eq!(user.transactions[0].order_id.as_deref(), Some("12"));
        assert!(user.transactions[0].date.is_some());
        assert!(user.orders.is_empty());
    }

    #[test]
    fn test_create_user_wire_format() {
        let request = CreateUserRequest {
            user_id: "carol".into(),
            password: "secret1".into(),
            role: Role::Admin,
            services: vec!["IG-F".into()],
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"userId":"carol","password":"secret1","role":"admin","services":["IG-F"]}"#
        );
    }
}
