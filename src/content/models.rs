//! Content Models

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Pages whose content is editable through the admin surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageType {
    #[serde(rename = "about")]
    About,
    #[serde(rename = "contact")]
    Contact,
}

impl PageType {
    pub fn as_str(&self) -> &str {
        match self {
            PageType::About => "about",
            PageType::Contact => "contact",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "about" => Some(PageType::About),
            "contact" => Some(PageType::Contact),
            _ => None,
        }
    }
}

/// A titled value blurb on the about page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValueItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Editable content for one page, one record per page type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageContent {
    pub page_type: PageType,
    // About page fields
    #[serde(default)]
    pub hero_title: String,
    #[serde(default)]
    pub hero_subtitle: String,
    #[serde(default)]
    pub mission_title: String,
    #[serde(default)]
    pub mission_content: String,
    #[serde(default)]
    pub vision_title: String,
    #[serde(default)]
    pub vision_content: String,
    #[serde(default)]
    pub values: Vec<ValueItem>,
    // Contact page fields
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub business_hours: String,
    // Common
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl PageContent {
    /// Built-in content served when nothing has been stored yet.
    pub fn default_for(page_type: PageType) -> Self {
        let (hero_title, hero_subtitle) = match page_type {
            PageType::About => (
                "About Rising Herb",
                "Your trusted partner in natural wellness and herbal solutions",
            ),
            PageType::Contact => (
                "Contact Us",
                "We'd love to hear from you. Get in touch with us today!",
            ),
        };

        Self {
            page_type,
            hero_title: hero_title.to_string(),
            hero_subtitle: hero_subtitle.to_string(),
            mission_title: String::new(),
            mission_content: String::new(),
            vision_title: String::new(),
            vision_content: String::new(),
            values: Vec::new(),
            address: String::new(),
            phone: String::new(),
            email: String::new(),
            whatsapp: String::new(),
            business_hours: String::new(),
            content: String::new(),
            updated_at: None,
        }
    }

    /// Merge provided fields from an update payload, leaving others as-is.
    pub fn apply(&mut self, update: PageContentUpdate) {
        macro_rules! merge {
            ($($field:ident),*) => {
                $(if let Some(v) = update.$field { self.$field = v; })*
            };
        }
        merge!(
            hero_title,
            hero_subtitle,
            mission_title,
            mission_content,
            vision_title,
            vision_content,
            values,
            address,
            phone,
            email,
            whatsapp,
            business_hours,
            content
        );
    }
}

/// Partial update payload; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
pub struct PageContentUpdate {
    pub hero_title: Option<String>,
    pub hero_subtitle: Option<String>,
    pub mission_title: Option<String>,
    pub mission_content: Option<String>,
    pub vision_title: Option<String>,
    pub vision_content: Option<String>,
    pub values: Option<Vec<ValueItem>>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub whatsapp: Option<String>,
    pub business_hours: Option<String>,
    pub content: Option<String>,
}

/// A homepage carousel slide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselItem {
    pub id: Uuid,
    pub image_url: String,
    pub title: String,
    pub subtitle: String,
    pub order: i64,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// Create payload for a carousel slide.
#[derive(Debug, Deserialize)]
pub struct CarouselInput {
    pub image_url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub order: i64,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Partial update payload for a carousel slide.
#[derive(Debug, Default, Deserialize)]
pub struct CarouselUpdate {
    pub image_url: Option<String>,
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub order: Option<i64>,
    pub is_active: Option<bool>,
}

fn default_true() -> bool {
    true
}
