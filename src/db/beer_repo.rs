use chrono::{DateTime, Utc};
use sqlx::{SqliteConnection, SqlitePool};
use uuid::Uuid;

use super::PersistenceError;
use crate::models::{Beer, BeerSubmission, BeerType};
use crate::transfer::ScannedBeer;

/// The only component that writes to the store. Takes its pool at
/// construction; callers run mutating operations one at a time.
pub struct BeerRepository {
    pool: SqlitePool,
}

// Row types for database queries
#[derive(sqlx::FromRow)]
struct BeerRow {
    id: String,
    name: String,
    score: i32,
    note: String,
    image: Option<Vec<u8>>,
    created_at: String,
    type_id: Option<String>,
    type_name: Option<String>,
}

#[derive(sqlx::FromRow)]
struct BeerTypeRow {
    id: String,
    name: String,
}

#[derive(sqlx::FromRow)]
struct BeerTypeCountRow {
    id: String,
    name: String,
    beers: i64,
}

const BEER_COLUMNS: &str = "b.id, b.name, b.score, b.note, b.image, b.created_at, \
                            t.id AS type_id, t.name AS type_name \
                            FROM beers b LEFT JOIN beer_types t ON t.id = b.beer_type_id";

/// Find the beer type with exactly this name, creating it if absent.
///
/// Matching is case-sensitive: `IPA` and `ipa` are distinct types. Runs
/// on the caller's connection so it can take part in a transaction.
pub async fn resolve_beer_type(
    conn: &mut SqliteConnection,
    name: &str,
) -> Result<BeerType, PersistenceError> {
    let existing: Option<BeerTypeRow> =
        sqlx::query_as("SELECT id, name FROM beer_types WHERE name = ? LIMIT 1")
            .bind(name)
            .fetch_optional(&mut *conn)
            .await?;

    if let Some(row) = existing {
        return hydrate_beer_type(row);
    }

    let beer_type = BeerType::new(name);
    sqlx::query("INSERT INTO beer_types (id, name) VALUES (?, ?)")
        .bind(beer_type.id.to_string())
        .bind(&beer_type.name)
        .execute(&mut *conn)
        .await?;
    tracing::debug!("Created beer type '{}'", beer_type.name);

    Ok(beer_type)
}

impl BeerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new beer from a submission, resolving or creating its
    /// beer type, inside a single transaction. Either both the (possibly
    /// new) type and the beer are durably visible afterward, or neither.
    ///
    /// The submission is assumed well-formed; callers validate first.
    pub async fn add_beer(&self, submission: &BeerSubmission) -> Result<Beer, PersistenceError> {
        let mut tx = self.pool.begin().await?;

        let beer_type = resolve_beer_type(&mut tx, &submission.beer_type).await?;
        let type_id = beer_type.id;

        let mut beer = Beer::new(
            submission.name.clone(),
            submission.score,
            submission.note.clone(),
            beer_type,
        );
        if let Some(image) = &submission.image {
            beer = beer.with_image(image.clone());
        }

        sqlx::query(
            r#"
            INSERT INTO beers (id, name, score, note, image, beer_type_id, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(beer.id.to_string())
        .bind(&beer.name)
        .bind(beer.score)
        .bind(&beer.note)
        .bind(&beer.image)
        .bind(type_id.to_string())
        .bind(beer.created_at.to_rfc3339())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::info!("Added beer '{}' ({})", beer.name, beer.id);

        Ok(beer)
    }

    /// Ingest a decoded transfer payload as a new local beer.
    ///
    /// Goes through [`add_beer`](Self::add_beer), so the record gets fresh
    /// local ids and the type is resolved by name like any other
    /// submission. The payload carries no image.
    pub async fn import_scanned(&self, scanned: &ScannedBeer) -> Result<Beer, PersistenceError> {
        tracing::debug!(
            "Importing scanned beer '{}' (wire id {})",
            scanned.name,
            scanned.id
        );

        let submission = BeerSubmission::new(
            scanned.beer_type.name.clone(),
            scanned.name.clone(),
            scanned.score,
            scanned.note.clone(),
        );
        self.add_beer(&submission).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Beer>, PersistenceError> {
        let row: Option<BeerRow> =
            sqlx::query_as(&format!("SELECT {} WHERE b.id = ?", BEER_COLUMNS))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(hydrate_beer).transpose()
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<Beer>, PersistenceError> {
        let row: Option<BeerRow> = sqlx::query_as(&format!(
            "SELECT {} WHERE LOWER(b.name) = LOWER(?) LIMIT 1",
            BEER_COLUMNS
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        row.map(hydrate_beer).transpose()
    }

    pub async fn list(&self) -> Result<Vec<Beer>, PersistenceError> {
        let rows: Vec<BeerRow> =
            sqlx::query_as(&format!("SELECT {} ORDER BY b.name", BEER_COLUMNS))
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(hydrate_beer).collect()
    }

    pub async fn beers_for_type(&self, beer_type: &BeerType) -> Result<Vec<Beer>, PersistenceError> {
        let rows: Vec<BeerRow> = sqlx::query_as(&format!(
            "SELECT {} WHERE b.beer_type_id = ? ORDER BY b.name",
            BEER_COLUMNS
        ))
        .bind(beer_type.id.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(hydrate_beer).collect()
    }

    /// Exact-match lookup, same semantics as [`resolve_beer_type`] minus
    /// the create step.
    pub async fn find_type_by_name(&self, name: &str) -> Result<Option<BeerType>, PersistenceError> {
        let row: Option<BeerTypeRow> =
            sqlx::query_as("SELECT id, name FROM beer_types WHERE name = ? LIMIT 1")
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;

        row.map(hydrate_beer_type).transpose()
    }

    /// All beer types in name order, with the number of beers each owns.
    pub async fn list_types(&self) -> Result<Vec<(BeerType, i64)>, PersistenceError> {
        let rows: Vec<BeerTypeCountRow> = sqlx::query_as(
            r#"
            SELECT t.id, t.name, COUNT(b.id) AS beers
            FROM beer_types t
            LEFT JOIN beers b ON b.beer_type_id = t.id
            GROUP BY t.id, t.name
            ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let count = row.beers;
                hydrate_beer_type(BeerTypeRow {
                    id: row.id,
                    name: row.name,
                })
                .map(|t| (t, count))
            })
            .collect()
    }
}

fn parse_id(raw: &str) -> Result<Uuid, PersistenceError> {
    Uuid::parse_str(raw)
        .map_err(|e| PersistenceError::Corrupt(format!("invalid uuid '{}': {}", raw, e)))
}

fn hydrate_beer_type(row: BeerTypeRow) -> Result<BeerType, PersistenceError> {
    Ok(BeerType {
        id: parse_id(&row.id)?,
        name: row.name,
    })
}

fn hydrate_beer(row: BeerRow) -> Result<Beer, PersistenceError> {
    let beer_type = match (row.type_id, row.type_name) {
        (Some(id), Some(name)) => Some(BeerType {
            id: parse_id(&id)?,
            name,
        }),
        _ => None,
    };

    let created_at = DateTime::parse_from_rfc3339(&row.created_at)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            PersistenceError::Corrupt(format!("invalid timestamp '{}': {}", row.created_at, e))
        })?;

    Ok(Beer {
        id: parse_id(&row.id)?,
        name: row.name,
        score: row.score,
        note: row.note,
        image: row.image,
        beer_type,
        created_at,
    })
}
