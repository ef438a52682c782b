//! Herb Storage
//! Mission: SQLite-backed catalog persistence with filtered listing

use crate::catalog::models::{Herb, HerbInput, HerbListQuery};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, ToSql};
use tracing::info;
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: u32 = 50;
const MAX_PAGE_SIZE: u32 = 200;

/// Herb storage with SQLite backend.
pub struct HerbStore {
    db_path: String,
}

impl HerbStore {
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS herbs (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                category TEXT NOT NULL DEFAULT 'general',
                min_price REAL NOT NULL,
                max_price REAL NOT NULL,
                unit TEXT NOT NULL DEFAULT '100 gm',
                whatsapp_number TEXT NOT NULL,
                image_url TEXT NOT NULL DEFAULT '',
                tags TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL,
                updated_at TEXT
            )",
            [],
        )?;

        Ok(())
    }

    /// List herbs newest-first with optional substring search, category
    /// filter, and paging.
    pub fn list(&self, query: &HerbListQuery) -> Result<Vec<Herb>> {
        let conn = Connection::open(&self.db_path)?;

        let mut sql = String::from(
            "SELECT id, name, description, category, min_price, max_price, unit,
                    whatsapp_number, image_url, tags, created_at, updated_at
             FROM herbs",
        );
        let mut clauses: Vec<&str> = Vec::new();
        let mut params: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(q) = query.q.as_deref().filter(|q| !q.trim().is_empty()) {
            let pattern = format!("%{}%", q.trim());
            clauses.push("(name LIKE ? OR description LIKE ?)");
            params.push(Box::new(pattern.clone()));
            params.push(Box::new(pattern));
        }
        if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
            clauses.push("category = ?");
            params.push(Box::new(category.to_string()));
        }

        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC LIMIT ? OFFSET ?");

        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        let page = query.page.unwrap_or(1).max(1);
        // Widen before multiplying; page and limit are caller-controlled.
        let offset = u64::from(page - 1) * u64::from(limit);
        params.push(Box::new(limit));
        params.push(Box::new(offset));

        let mut stmt = conn.prepare(&sql)?;
        let herbs = stmt
            .query_map(rusqlite::params_from_iter(params.iter().map(|p| p.as_ref())), row_to_herb)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(herbs)
    }

    pub fn get(&self, id: Uuid) -> Result<Option<Herb>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, category, min_price, max_price, unit,
                    whatsapp_number, image_url, tags, created_at, updated_at
             FROM herbs WHERE id = ?1",
        )?;

        match stmt.query_row(params![id.to_string()], row_to_herb) {
            Ok(herb) => Ok(Some(herb)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn create(&self, input: HerbInput) -> Result<Herb> {
        let herb = Herb {
            id: Uuid::new_v4(),
            name: input.name,
            description: input.description,
            category: input.category,
            min_price: input.min_price,
            max_price: input.max_price,
            unit: input.unit,
            whatsapp_number: input.whatsapp_number,
            image_url: input.image_url,
            tags: input.tags,
            created_at: Utc::now().to_rfc3339(),
            updated_at: None,
        };

        let conn = Connection::open(&self.db_path)?;
        conn.execute(
            "INSERT INTO herbs (id, name, description, category, min_price, max_price,
                                unit, whatsapp_number, image_url, tags, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                herb.id.to_string(),
                herb.name,
                herb.description,
                herb.category,
                herb.min_price,
                herb.max_price,
                herb.unit,
                herb.whatsapp_number,
                herb.image_url,
                serde_json::to_string(&herb.tags)?,
                herb.created_at,
                herb.updated_at,
            ],
        )
        .context("Failed to insert herb")?;

        info!("Created herb: {} ({})", herb.name, herb.id);
        Ok(herb)
    }

    /// Replace a herb's content; returns None when the id is unknown.
    pub fn update(&self, id: Uuid, input: HerbInput) -> Result<Option<Herb>> {
        let conn = Connection::open(&self.db_path)?;

        let updated_at = Utc::now().to_rfc3339();
        let rows = conn.execute(
            "UPDATE herbs SET name = ?2, description = ?3, category = ?4, min_price = ?5,
                              max_price = ?6, unit = ?7, whatsapp_number = ?8, image_url = ?9,
                              tags = ?10, updated_at = ?11
             WHERE id = ?1",
            params![
                id.to_string(),
                input.name,
                input.description,
                input.category,
                input.min_price,
                input.max_price,
                input.unit,
                input.whatsapp_number,
                input.image_url,
                serde_json::to_string(&input.tags)?,
                updated_at,
            ],
        )?;

        if rows == 0 {
            return Ok(None);
        }
        self.get(id)
    }

    /// Delete a herb; returns false when the id is unknown.
    pub fn delete(&self, id: Uuid) -> Result<bool> {
        let conn = Connection::open(&self.db_path)?;
        let rows = conn.execute("DELETE FROM herbs WHERE id = ?1", params![id.to_string()])?;

        if rows > 0 {
            info!("Deleted herb: {}", id);
        }
        Ok(rows > 0)
    }
}

fn row_to_herb(row: &rusqlite::Row<'_>) -> rusqlite::Result<Herb> {
    let id_str: String = row.get(0)?;
    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;
    let tags_json: String = row.get(9)?;
    let tags = serde_json::from_str(&tags_json).unwrap_or_default();

    Ok(Herb {
        id,
        name: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        min_price: row.get(4)?,
        max_price: row.get(5)?,
        unit: row.get(6)?,
        whatsapp_number: row.get(7)?,
        image_url: row.get(8)?,
        tags,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}
