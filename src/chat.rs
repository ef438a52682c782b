//! WhatsApp Inquiry Links
//! Mission: Build prefilled wa.me chat links for catalog products

use crate::catalog::{api::CatalogApiError, CatalogState};
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use tracing::error;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct ChatLinkResponse {
    pub link: String,
}

/// Public chat link - GET /api/chat/link/:herb_id
pub async fn get_chat_link(
    State(state): State<CatalogState>,
    Path(herb_id): Path<Uuid>,
) -> Result<Json<ChatLinkResponse>, CatalogApiError> {
    let herb = state
        .herbs
        .get(herb_id)
        .map_err(|e| {
            error!("Chat link lookup failed: {}", e);
            CatalogApiError::Internal
        })?
        .ok_or(CatalogApiError::NotFound)?;

    let message = format!(
        "Hi, I'm interested in {} ({} per {}). Is it available?",
        herb.name,
        price_range(herb.min_price, herb.max_price),
        herb.unit
    );

    Ok(Json(ChatLinkResponse {
        link: build_wa_link(&herb.whatsapp_number, &message),
    }))
}

fn price_range(min: f64, max: f64) -> String {
    if (min - max).abs() < f64::EPSILON {
        format!("₹{:.0}", min)
    } else {
        format!("₹{:.0}-₹{:.0}", min, max)
    }
}

/// Build a wa.me URL with the message percent-encoded for a query value.
fn build_wa_link(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}?text={}", digits, encode_query_value(message))
}

fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len() * 3);
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
