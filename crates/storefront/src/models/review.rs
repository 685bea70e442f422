//! Customer review documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sportswear_store_core::{ProductId, ReviewId};

/// A customer review of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub user_id: String,
    pub user_name: String,
    #[serde(default)]
    pub user_country: String,
    #[serde(default)]
    pub user_region: String,
    /// Star rating, 1 to 5.
    pub rating: u8,
    pub title: String,
    pub comment: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub videos: Vec<String>,
    #[serde(default)]
    pub verified: bool,
    /// Number of "helpful" votes.
    #[serde(default)]
    pub helpful: u32,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply: Option<AdminReply>,
}

impl Review {
    /// Whether the review carries photos or videos.
    #[must_use]
    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || !self.videos.is_empty()
    }
}

/// A store reply attached to a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReply {
    pub admin_name: String,
    pub message: String,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    pub date: DateTime<Utc>,
}
