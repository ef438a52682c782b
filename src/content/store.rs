//! Content Storage
//! Mission: SQLite-backed page content and carousel persistence

use crate::content::models::{CarouselInput, CarouselItem, CarouselUpdate, PageContent, PageType};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::info;
use uuid::Uuid;

/// Page content and carousel storage with SQLite backend.
pub struct ContentStore {
    db_path: String,
}

impl ContentStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        // Page content is one JSON payload per page type.
        conn.execute(
            "CREATE TABLE IF NOT EXISTS page_content (
                page_type TEXT PRIMARY KEY,
                payload TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS carousel_items (
                id TEXT PRIMARY KEY,
                image_url TEXT NOT NULL,
                title TEXT NOT NULL DEFAULT '',
                subtitle TEXT NOT NULL DEFAULT '',
                display_order INTEGER NOT NULL DEFAULT 0,
                is_active INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL,
                updated_at TEXT
            )",
            [],
        )?;

        Ok(())
    }

    // ===== Page content =====

    pub fn get_page(&self, page_type: PageType) -> Result<Option<PageContent>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt =
            conn.prepare("SELECT payload FROM page_content WHERE page_type = ?1")?;

        let result = stmt.query_row(params![page_type.as_str()], |row| {
            row.get::<_, String>(0)
        });

        match result {
            Ok(payload) => {
                let content =
                    serde_json::from_str(&payload).context("Corrupt page content payload")?;
                Ok(Some(content))
            }
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Store the full content for a page, replacing any previous record.
    pub fn save_page(&self, content: &PageContent) -> Result<PageContent> {
        let mut stored = content.clone();
        stored.updated_at = Some(Utc::now().to_rfc3339());

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO page_content (page_type, payload, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(page_type) DO UPDATE SET payload = ?2, updated_at = ?3",
            params![
                stored.page_type.as_str(),
                serde_json::to_string(&stored)?,
                stored.updated_at,
            ],
        )
        .context("Failed to save page content")?;

        info!("Saved page content: {}", stored.page_type.as_str());
        Ok(stored)
    }

    // ===== Carousel =====

    /// Active slides ordered by display order, then newest first.
    pub fn active_carousel_items(&self) -> Result<Vec<CarouselItem>> {
        self.query_carousel("WHERE is_active = 1")
    }

    /// All slides, including inactive ones (admin view).
    pub fn all_carousel_items(&self) -> Result<Vec<CarouselItem>> {
        self.query_carousel("")
    }

    fn query_carousel(&self, where_clause: &str) -> Result<Vec<CarouselItem>> {
        let conn = Connection::open(&self.db_path)?;

        let sql = format!(
            "SELECT id, image_url, title, subtitle, display_order, is_active, created_at, updated_at
             FROM carousel_items {} ORDER BY display_order ASC, created_at DESC",
            where_clause
        );
        let mut stmt = conn.prepare(&sql)?;

        let items = stmt
            .query_map([], row_to_carousel_item)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    pub fn create_carousel_item(&self, input: CarouselInput) -> Result<CarouselItem> {
        let item = CarouselItem {
            id: Uuid::new_v4(),
            image_url: input.image_url,
            title: input.title,
            subtitle: input.subtitle,
            order: input.order,
            is_active: input.is_active,
            created_at: Utc::now().to_rfc3339(),
            updated_at: None,
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO carousel_items (id, image_url, title, subtitle, display_order,
                                         is_active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                item.id.to_string(),
                item.image_url,
                item.title,
                item.subtitle,
                item.order,
                item.is_active,
                item.created_at,
                item.updated_at,
            ],
        )
        .context("Failed to insert carousel item")?;

        info!("Created carousel item: {}", item.id);
        Ok(item)
    }

    /// Apply a partial update; returns None when the id is unknown.
    pub fn update_carousel_item(
        &self,
        id: Uuid,
        update: CarouselUpdate,
    ) -> Result<Option<CarouselItem>> {
        let Some(mut item) = self.get_carousel_item(id)? else {
            return Ok(None);
        };

        if let Some(v) = update.image_url {
            item.image_url = v;
        }
        if let Some(v) = update.title {
            item.title = v;
        }
        if let Some(v) = update.subtitle {
            item.subtitle = v;
        }
        if let Some(v) = update.order {
            item.order = v;
        }
        if let Some(v) = update.is_active {
            item.is_active = v;
        }
        item.updated_at = Some(Utc::now().to_rfc3339());

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "UPDATE carousel_items SET image_url = ?2, title = ?3, subtitle = ?4,
                                       display_order = ?5, is_active = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                id.to_string(),
                item.image_url,
                item.title,
                item.subtitle,
                item.order,
                item.is_active,
                item.updated_at,
            ],
        )?;

        Ok(Some(item))
    }

    /// Delete a slide; returns false when the id is unknown.
    pub fn delete_carousel_item(&self, id: Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute(
            "DELETE FROM carousel_items WHERE id = ?1",
            params![id.to_string()],
        )?;

        if rows > 0 {
            info!("Deleted carousel item: {}", id);
        }
        Ok(rows > 0)
    }

    fn get_carousel_item(&self, id: Uuid) -> Result<Option<CarouselItem>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, image_url, title, subtitle, display_order, is_active, created_at, updated_at
             FROM carousel_items WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], row_to_carousel_item) {
            Ok(item) => Ok(Some(item)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn row_to_carousel_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<CarouselItem> {
    let id_str: String = row.get(0)?;
    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(CarouselItem {
        id,
        image_url: row.get(1)?,
        title: row.get(2)?,
        subtitle: row.get(3)?,
        order: row.get(4)?,
        is_active: row.get(5)?,
        created_at: row.get(6)?,
        updated_at: row.get(7)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::models::PageContentUpdate;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (ContentStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let store = ContentStore::new(temp_file.path().to_str().unwrap()).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_page_content_roundtrip() {
        let (store, _temp) = create_test_store();

        assert!(store.get_page(PageType::About).unwrap().is_none());

        let mut content = PageContent::default_for(PageType::About);
        content.apply(PageContentUpdate {
            mission_content: Some("Natural wellness for all".to_string()),
            ..Default::default()
        });
        store.save_page(&content).unwrap();

        let fetched = store.get_page(PageType::About).unwrap().unwrap();
        assert_eq!(fetched.mission_content, "Natural wellness for all");
        assert!(fetched.updated_at.is_some());

        // Contact page is untouched.
        assert!(store.get_page(PageType::Contact).unwrap().is_none());
    }

    #[test]
    fn test_page_content_upsert_replaces() {
        let (store, _temp) = create_test_store();

        let mut content = PageContent::default_for(PageType::Contact);
        content.address = "Old Street 1".to_string();
        store.save_page(&content).unwrap();

        content.address = "New Street 2".to_string();
        store.save_page(&content).unwrap();

        let fetched = store.get_page(PageType::Contact).unwrap().unwrap();
        assert_eq!(fetched.address, "New Street 2");
    }

    fn slide(order: i64, active: bool) -> CarouselInput {
        CarouselInput {
            image_url: format!("https://cdn.example.com/{}.jpg", order),
            title: String::new(),
            subtitle: String::new(),
            order,
            is_active: active,
        }
    }

    #[test]
    fn test_carousel_active_filter_and_ordering() {
        let (store, _temp) = create_test_store();
        store.create_carousel_item(slide(2, true)).unwrap();
        store.create_carousel_item(slide(1, true)).unwrap();
        store.create_carousel_item(slide(0, false)).unwrap();

        let active = store.active_carousel_items().unwrap();
        assert_eq!(active.len(), 2);
        assert_eq!(active[0].order, 1);
        assert_eq!(active[1].order, 2);

        let all = store.all_carousel_items().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].order, 0);
    }

    #[test]
    fn test_carousel_partial_update() {
        let (store, _temp) = create_test_store();
        let item = store.create_carousel_item(slide(0, true)).unwrap();

        let updated = store
            .update_carousel_item(
                item.id,
                CarouselUpdate {
                    title: Some("Summer Sale".to_string()),
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Summer Sale");
        assert!(!updated.is_active);
        assert_eq!(updated.image_url, item.image_url);
        assert!(updated.updated_at.is_some());
    }

    #[test]
    fn test_carousel_update_unknown_returns_none() {
        let (store, _temp) = create_test_store();
        let result = store
            .update_carousel_item(Uuid::new_v4(), CarouselUpdate::default())
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_carousel_delete() {
        let (store, _temp) = create_test_store();
        let item = store.create_carousel_item(slide(0, true)).unwrap();

        assert!(store.delete_carousel_item(item.id).unwrap());
        assert!(!store.delete_carousel_item(item.id).unwrap());
        assert!(store.all_carousel_items().unwrap().is_empty());
    }
}
