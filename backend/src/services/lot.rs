//! Lot management service for stock CRUD and expiry queries

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use shared::models::{Lot, LotStatus};
use shared::types::{Pagination, PaginationMeta};

use crate::error::{AppError, AppResult};

/// Lot service for managing perishable stock
#[derive(Clone)]
pub struct LotService {
    db: PgPool,
}

type LotRow = (
    Uuid,
    String,
    String,
    String,
    Option<NaiveDate>,
    String,
    i32,
    DateTime<Utc>,
    DateTime<Utc>,
);

const SELECT_LOT: &str = r#"
    SELECT id, product_name, part_number, lot_number, expiry_date,
           product_type, quantity, created_at, updated_at
    FROM lots
"#;

fn lot_from_row(row: LotRow) -> Lot {
    Lot {
        id: row.0,
        product_name: row.1,
        part_number: row.2,
        lot_number: row.3,
        expiry_date: row.4,
        product_type: row.5,
        quantity: row.6,
        created_at: row.7,
        updated_at: row.8,
    }
}

/// Lot with its computed expiry status
#[derive(Debug, Clone, Serialize)]
pub struct LotView {
    #[serde(flatten)]
    pub lot: Lot,
    pub status: LotStatus,
}

/// Per-status totals over the search scope, independent of the active
/// status filter so the UI can show all tab badges at once
#[derive(Debug, Clone, Serialize)]
pub struct StatusCounts {
    pub expired: u64,
    pub warning: u64,
    pub valid: u64,
    pub unknown: u64,
    pub total: u64,
}

/// One page of lots plus status totals
#[derive(Debug, Clone, Serialize)]
pub struct LotListPage {
    pub data: Vec<LotView>,
    pub counts: StatusCounts,
    pub pagination: PaginationMeta,
}

/// Filter for listing lots
#[derive(Debug, Clone, Default)]
pub struct LotFilter {
    pub search: Option<String>,
    pub status: Option<LotStatus>,
}

/// Input for creating a lot
#[derive(Debug, Deserialize)]
pub struct CreateLotInput {
    pub product_name: String,
    pub part_number: String,
    pub lot_number: String,
    pub expiry_date: Option<NaiveDate>,
    pub product_type: Option<String>,
    pub quantity: Option<i32>,
}

/// Input for updating a lot. Absent fields keep their stored value;
/// an explicit `"expiry_date": null` clears the date.
#[derive(Debug, Deserialize)]
pub struct UpdateLotInput {
    pub product_name: Option<String>,
    pub part_number: Option<String>,
    pub lot_number: Option<String>,
    #[serde(default, deserialize_with = "present_field")]
    pub expiry_date: Option<Option<NaiveDate>>,
    pub product_type: Option<String>,
    pub quantity: Option<i32>,
}

/// Wraps a field value so a present-but-null field deserializes to
/// `Some(None)` while an absent field stays `None`
fn present_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: serde::Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl LotService {
    /// Create a new LotService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All lots matching the search term, in report order. Statuses are
    /// never stored; they are classified in memory against the reference
    /// date so every surface shares the same buckets.
    async fn fetch_matching(&self, search: Option<&str>) -> AppResult<Vec<Lot>> {
        let pattern = search.map(|q| format!("%{}%", q.trim()));

        let rows = match &pattern {
            Some(pattern) => {
                sqlx::query_as::<_, LotRow>(&format!(
                    "{} WHERE product_name ILIKE $1 OR part_number ILIKE $1 OR lot_number ILIKE $1 \
                     ORDER BY expiry_date ASC NULLS LAST, product_name ASC",
                    SELECT_LOT
                ))
                .bind(pattern)
                .fetch_all(&self.db)
                .await?
            }
            None => {
                sqlx::query_as::<_, LotRow>(&format!(
                    "{} ORDER BY expiry_date ASC NULLS LAST, product_name ASC",
                    SELECT_LOT
                ))
                .fetch_all(&self.db)
                .await?
            }
        };

        Ok(rows.into_iter().map(lot_from_row).collect())
    }

    /// Lots matching both search and status filter, in report order and
    /// without pagination. Feeds the manual document exports.
    pub async fn lots_matching(
        &self,
        filter: &LotFilter,
        reference: NaiveDate,
    ) -> AppResult<Vec<Lot>> {
        let lots = self.fetch_matching(filter.search.as_deref()).await?;
        Ok(match filter.status {
            Some(status) => lots
                .into_iter()
                .filter(|lot| lot.status(reference) == status)
                .collect(),
            None => lots,
        })
    }

    /// List lots with search, status filter and pagination
    pub async fn list_lots(
        &self,
        filter: &LotFilter,
        pagination: &Pagination,
        reference: NaiveDate,
    ) -> AppResult<LotListPage> {
        let views: Vec<LotView> = self
            .fetch_matching(filter.search.as_deref())
            .await?
            .into_iter()
            .map(|lot| {
                let status = lot.status(reference);
                LotView { lot, status }
            })
            .collect();

        let mut counts = StatusCounts {
            expired: 0,
            warning: 0,
            valid: 0,
            unknown: 0,
            total: views.len() as u64,
        };
        for view in &views {
            match view.status {
                LotStatus::Expired => counts.expired += 1,
                LotStatus::Warning => counts.warning += 1,
                LotStatus::Valid => counts.valid += 1,
                LotStatus::Unknown => counts.unknown += 1,
            }
        }

        let filtered: Vec<LotView> = match filter.status {
            Some(status) => views.into_iter().filter(|v| v.status == status).collect(),
            None => views,
        };

        let total_items = filtered.len() as u64;
        let offset = pagination.offset() as usize;
        let data: Vec<LotView> = filtered
            .into_iter()
            .skip(offset)
            .take(pagination.per_page as usize)
            .collect();

        Ok(LotListPage {
            data,
            counts,
            pagination: PaginationMeta::new(pagination, total_items),
        })
    }

    /// Get a lot by ID
    pub async fn get_lot(&self, lot_id: Uuid, reference: NaiveDate) -> AppResult<LotView> {
        let row = sqlx::query_as::<_, LotRow>(&format!("{} WHERE id = $1", SELECT_LOT))
            .bind(lot_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Lot".to_string()))?;

        let lot = lot_from_row(row);
        let status = lot.status(reference);
        Ok(LotView { lot, status })
    }

    /// Create a new lot
    pub async fn create_lot(&self, input: CreateLotInput) -> AppResult<Lot> {
        let product_name = input.product_name.trim();
        if product_name.is_empty() {
            return Err(AppError::Validation {
                field: "product_name".to_string(),
                message: "Product name cannot be empty".to_string(),
                message_fr: "Le nom du produit ne peut pas être vide".to_string(),
            });
        }

        let part_number = input.part_number.trim();
        if part_number.is_empty() {
            return Err(AppError::Validation {
                field: "part_number".to_string(),
                message: "Part number cannot be empty".to_string(),
                message_fr: "La référence ne peut pas être vide".to_string(),
            });
        }

        let lot_number = input.lot_number.trim();
        if lot_number.is_empty() {
            return Err(AppError::Validation {
                field: "lot_number".to_string(),
                message: "Lot number cannot be empty".to_string(),
                message_fr: "Le numéro de lot ne peut pas être vide".to_string(),
            });
        }

        let quantity = input.quantity.unwrap_or(0);
        if quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
                message_fr: "La quantité ne peut pas être négative".to_string(),
            });
        }

        let product_type = input
            .product_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("consumable");

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, LotRow>(
            r#"
            INSERT INTO lots (product_name, part_number, lot_number, expiry_date, product_type, quantity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, product_name, part_number, lot_number, expiry_date,
                      product_type, quantity, created_at, updated_at
            "#,
        )
        .bind(product_name)
        .bind(part_number)
        .bind(lot_number)
        .bind(input.expiry_date)
        .bind(product_type)
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, part_number, lot_number))?;

        sqlx::query("INSERT INTO audit_log (action, user_id) VALUES ($1, NULL)")
            .bind(format!("Lot created: {} ({})", product_name, lot_number))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(lot_from_row(row))
    }

    /// Update an existing lot
    pub async fn update_lot(&self, lot_id: Uuid, input: UpdateLotInput) -> AppResult<Lot> {
        let row = sqlx::query_as::<_, LotRow>(&format!("{} WHERE id = $1", SELECT_LOT))
            .bind(lot_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Lot".to_string()))?;
        let current = lot_from_row(row);

        let product_name = match input.product_name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::Validation {
                        field: "product_name".to_string(),
                        message: "Product name cannot be empty".to_string(),
                        message_fr: "Le nom du produit ne peut pas être vide".to_string(),
                    });
                }
                name
            }
            None => current.product_name,
        };
        let part_number = match input.part_number {
            Some(part) => {
                let part = part.trim().to_string();
                if part.is_empty() {
                    return Err(AppError::Validation {
                        field: "part_number".to_string(),
                        message: "Part number cannot be empty".to_string(),
                        message_fr: "La référence ne peut pas être vide".to_string(),
                    });
                }
                part
            }
            None => current.part_number,
        };
        let lot_number = match input.lot_number {
            Some(lot) => {
                let lot = lot.trim().to_string();
                if lot.is_empty() {
                    return Err(AppError::Validation {
                        field: "lot_number".to_string(),
                        message: "Lot number cannot be empty".to_string(),
                        message_fr: "Le numéro de lot ne peut pas être vide".to_string(),
                    });
                }
                lot
            }
            None => current.lot_number,
        };
        let expiry_date = match input.expiry_date {
            Some(value) => value,
            None => current.expiry_date,
        };
        let product_type = input
            .product_type
            .map(|t| t.trim().to_string())
            .unwrap_or(current.product_type);
        let quantity = input.quantity.unwrap_or(current.quantity);
        if quantity < 0 {
            return Err(AppError::Validation {
                field: "quantity".to_string(),
                message: "Quantity cannot be negative".to_string(),
                message_fr: "La quantité ne peut pas être négative".to_string(),
            });
        }

        let mut tx = self.db.begin().await?;

        let row = sqlx::query_as::<_, LotRow>(
            r#"
            UPDATE lots
            SET product_name = $2, part_number = $3, lot_number = $4,
                expiry_date = $5, product_type = $6, quantity = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, product_name, part_number, lot_number, expiry_date,
                      product_type, quantity, created_at, updated_at
            "#,
        )
        .bind(lot_id)
        .bind(&product_name)
        .bind(&part_number)
        .bind(&lot_number)
        .bind(expiry_date)
        .bind(&product_type)
        .bind(quantity)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, &part_number, &lot_number))?;

        sqlx::query("INSERT INTO audit_log (action, user_id) VALUES ($1, NULL)")
            .bind(format!("Lot updated: {} ({})", product_name, lot_number))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(lot_from_row(row))
    }

    /// Delete a lot
    pub async fn delete_lot(&self, lot_id: Uuid) -> AppResult<()> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT product_name, lot_number FROM lots WHERE id = $1",
        )
        .bind(lot_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Lot".to_string()))?;

        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM lots WHERE id = $1")
            .bind(lot_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("INSERT INTO audit_log (action, user_id) VALUES ($1, NULL)")
            .bind(format!("Lot deleted: {} ({})", row.0, row.1))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

/// Translate unique-constraint violations into a client error naming
/// the offending field
fn map_unique_violation(e: sqlx::Error, part_number: &str, lot_number: &str) -> AppError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            if constraint.contains("part_number") {
                return AppError::DuplicateEntry(format!("part number '{}'", part_number));
            }
            if constraint.contains("lot_number") {
                return AppError::DuplicateEntry(format!("lot number '{}'", lot_number));
            }
            return AppError::DuplicateEntry("lot".to_string());
        }
    }
    AppError::DatabaseError(e)
}
