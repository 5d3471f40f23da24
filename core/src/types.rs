//! Resource models mirroring the remote schema.
//!
//! # Design
//! Flat field sets with optional-field presence as the only invariant.
//! Wire names that differ from the field name (`cust_identifier`,
//! `fb_profile_id`, `custom_field`) are kept as serde renames. The mock
//! server defines its own DTOs independently; integration tests catch
//! schema drift between the two crates.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A contact (user) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default)]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    #[serde(rename = "fb_profile_id", default, skip_serializing_if = "Option::is_none")]
    pub facebook_profile_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "custom_field", default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<HashMap<String, serde_json::Value>>,
}

/// A customer (company) record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(rename = "cust_identifier", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domains: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sla_policy_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(rename = "custom_field", default, skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<HashMap<String, serde_json::Value>>,
}

/// Request payload shape for contact creation: `{"user": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRequest {
    pub user: User,
}

/// Request payload shape for customer creation: `{"customer": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub customer: Customer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_request_wraps_under_user_key() {
        let request = UserRequest {
            user: User {
                name: Some("Super Man".to_string()),
                email: Some("ram@example.com".to_string()),
                ..User::default()
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["user"]["name"], "Super Man");
        assert_eq!(json["user"]["email"], "ram@example.com");
        assert!(json["user"].get("id").is_none());
    }

    #[test]
    fn user_roundtrips_populated_fields() {
        let json = r#"{"id":7,"name":"Ann","email":"a@b.com","active":true,"fb_profile_id":"fb9","created_at":"2024-01-02T03:04:05Z"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, Some(7));
        assert!(user.active);
        assert_eq!(user.facebook_profile_id.as_deref(), Some("fb9"));
        assert!(user.created_at.is_some());

        let back: User = serde_json::from_str(&serde_json::to_string(&user).unwrap()).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn customer_uses_wire_name_for_identifier() {
        let json = r#"{"id":3,"name":"Acme","cust_identifier":"ACME-1","domains":"acme.com"}"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.customer_id.as_deref(), Some("ACME-1"));
        let out = serde_json::to_value(&customer).unwrap();
        assert_eq!(out["cust_identifier"], "ACME-1");
    }

    #[test]
    fn absent_optional_fields_deserialize_to_none() {
        let user: User = serde_json::from_str(r#"{"name":"Bare"}"#).unwrap();
        assert!(user.id.is_none());
        assert!(!user.active);
        assert!(user.custom_fields.is_none());
    }
}
