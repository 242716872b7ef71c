use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Stored role literals. Flat capabilities, deliberately not a ranked enum:
// an admin does not satisfy a moderator check.
pub const ROLE_MODERATOR: &str = "moderator";
pub const ROLE_ADMIN: &str = "admin";

// Acceptance states for a product submission
pub const ACCEPT_PENDING: &str = "pending";
pub const ACCEPT_ACCEPTED: &str = "accepted";
pub const ACCEPT_REJECTED: &str = "rejected";

/// Registered user. `role` is NULL for ordinary users.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Submitted product. `upvotes` holds distinct voter emails.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub owner_email: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub tags: Vec<String>,
    pub external_link: String,
    pub upvotes: Vec<String>,
    pub is_featured: bool,
    pub is_accepted: String,
    pub is_reported: bool,
    pub created_at: DateTime<Utc>,
}

/// Review against a product. Immutable once created; product_id is not
/// referentially enforced.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub product_id: Uuid,
    pub reviewer_name: String,
    pub reviewer_image: String,
    pub body: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
}

/// Promotional coupon. Admin-created, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub code: String,
    pub discount: i32,
    pub description: String,
    pub expires_at: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Request payloads

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub owner_email: String,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub external_link: String,
}

/// Full-field edit payload: every editable field is overwritten as supplied,
/// no diffing or partial update.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductEdit {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub external_link: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: String,
    #[serde(default)]
    pub reviewer_name: String,
    #[serde(default)]
    pub reviewer_image: String,
    pub body: String,
    pub rating: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCoupon {
    pub code: String,
    pub discount: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub expires_at: Option<String>,
}

// Storage acknowledgments, echoed directly as success bodies

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
}

impl UpdateAck {
    pub fn rows(n: u64) -> Self {
        Self { acknowledged: true, matched_count: n, modified_count: n }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_serializes_with_lineage_field_names() {
        let product = Product {
            id: Uuid::new_v4(),
            owner_email: "owner@x.com".to_string(),
            name: "Widget".to_string(),
            image: String::new(),
            description: String::new(),
            tags: vec!["tools".to_string()],
            external_link: String::new(),
            upvotes: vec![],
            is_featured: false,
            is_accepted: ACCEPT_PENDING.to_string(),
            is_reported: false,
            created_at: Utc::now(),
        };

        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("_id").is_some());
        assert!(value.get("ownerEmail").is_some());
        assert!(value.get("isAccepted").is_some());
        assert!(value.get("externalLink").is_some());
        assert_eq!(value["isAccepted"], "pending");
    }

    #[test]
    fn update_ack_carries_row_count() {
        let ack = UpdateAck::rows(1);
        let value = serde_json::to_value(&ack).unwrap();
        assert_eq!(value["matchedCount"], 1);
        assert_eq!(value["modifiedCount"], 1);
        assert_eq!(value["acknowledged"], true);
    }
}
