//! Catalog Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog product. Prices are a range because herbs are quoted per unit
/// weight and negotiated over WhatsApp.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Herb {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category: String,
    pub min_price: f64,
    pub max_price: f64,
    pub unit: String,
    /// International number as a string, e.g. "919876543210".
    pub whatsapp_number: String,
    pub image_url: String,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Create/update payload for a herb.
#[derive(Debug, Clone, Deserialize)]
pub struct HerbInput {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub min_price: f64,
    pub max_price: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
    pub whatsapp_number: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_category() -> String {
    "general".to_string()
}

fn default_unit() -> String {
    "100 gm".to_string()
}

/// Query parameters for the public listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct HerbListQuery {
    /// Substring match against name and description.
    pub q: Option<String>,
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}
