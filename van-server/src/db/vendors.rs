use shared::error::{AppError, ErrorCode};
use shared::models::Vendor;
use sqlx::SqlitePool;

use crate::error::{ServiceError, ServiceResult};

/// Storage shape: coordinates split into two nullable columns
#[derive(sqlx::FromRow)]
struct VendorRow {
    id: i64,
    van_name: String,
    password_hash: String,
    ready: bool,
    location_string: Option<String>,
    longitude: Option<f64>,
    latitude: Option<f64>,
    time_limit: i64,
}

impl From<VendorRow> for Vendor {
    fn from(row: VendorRow) -> Self {
        let coordinates = match (row.longitude, row.latitude) {
            (Some(lon), Some(lat)) => Some([lon, lat]),
            _ => None,
        };
        Vendor {
            id: row.id,
            van_name: row.van_name,
            password_hash: row.password_hash,
            ready: row.ready,
            location_string: row.location_string,
            coordinates,
            time_limit: row.time_limit,
        }
    }
}

const SELECT_VENDOR: &str = "SELECT id, van_name, password_hash, ready, location_string, \
     longitude, latitude, time_limit FROM vendors";

/// Insert a vendor. A taken van name maps to `VanNameExists`.
pub async fn insert(pool: &SqlitePool, vendor: &Vendor, now: i64) -> ServiceResult<()> {
    sqlx::query(
        "INSERT INTO vendors (id, van_name, password_hash, ready, location_string, longitude, latitude, time_limit, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    )
    .bind(vendor.id)
    .bind(&vendor.van_name)
    .bind(&vendor.password_hash)
    .bind(vendor.ready)
    .bind(&vendor.location_string)
    .bind(vendor.longitude())
    .bind(vendor.latitude())
    .bind(vendor.time_limit)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| -> ServiceError {
        if super::is_unique_violation(&e) {
            AppError::with_message(ErrorCode::VanNameExists, "Vendor with that name already exists")
                .into()
        } else {
            e.into()
        }
    })?;
    Ok(())
}

pub async fn find_by_name(pool: &SqlitePool, van_name: &str) -> Result<Option<Vendor>, sqlx::Error> {
    let row: Option<VendorRow> = sqlx::query_as(&format!("{SELECT_VENDOR} WHERE van_name = ?"))
        .bind(van_name)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Vendor::from))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Vendor>, sqlx::Error> {
    let row: Option<VendorRow> = sqlx::query_as(&format!("{SELECT_VENDOR} WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Vendor::from))
}

/// All vendors in registration order
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<Vendor>, sqlx::Error> {
    let rows: Vec<VendorRow> = sqlx::query_as(&format!("{SELECT_VENDOR} ORDER BY created_at, id"))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(Vendor::from).collect())
}

/// Vendors open for business, in registration order
pub async fn list_ready(pool: &SqlitePool) -> Result<Vec<Vendor>, sqlx::Error> {
    let rows: Vec<VendorRow> =
        sqlx::query_as(&format!("{SELECT_VENDOR} WHERE ready = 1 ORDER BY created_at, id"))
            .fetch_all(pool)
            .await?;
    Ok(rows.into_iter().map(Vendor::from).collect())
}

/// Set readiness and location. `coordinates` is `[longitude, latitude]`.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    ready: bool,
    location_string: &str,
    coordinates: [f64; 2],
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE vendors SET ready = ?1, location_string = ?2, longitude = ?3, latitude = ?4
         WHERE id = ?5",
    )
    .bind(ready)
    .bind(location_string)
    .bind(coordinates[0])
    .bind(coordinates[1])
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn update_password(
    pool: &SqlitePool,
    id: i64,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE vendors SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_vendor(id: i64, name: &str) -> Vendor {
        Vendor {
            id,
            van_name: name.to_string(),
            password_hash: "hash".to_string(),
            ready: false,
            location_string: None,
            coordinates: None,
            time_limit: 30,
        }
    }

    #[tokio::test]
    async fn test_insert_without_location() {
        let pool = crate::db::test_pool().await;
        insert(&pool, &create_vendor(1, "Tasty Trucks"), 0).await.unwrap();

        let found = find_by_name(&pool, "Tasty Trucks").await.unwrap().unwrap();
        assert_eq!(found.coordinates, None);
        assert!(!found.ready);
    }

    #[tokio::test]
    async fn test_duplicate_van_name() {
        let pool = crate::db::test_pool().await;
        insert(&pool, &create_vendor(1, "Tasty Trucks"), 0).await.unwrap();
        let err = insert(&pool, &create_vendor(2, "Tasty Trucks"), 0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::App(ref e) if e.code == ErrorCode::VanNameExists
        ));
    }

    #[tokio::test]
    async fn test_update_status_and_list_ready() {
        let pool = crate::db::test_pool().await;
        insert(&pool, &create_vendor(1, "A"), 0).await.unwrap();
        insert(&pool, &create_vendor(2, "B"), 1).await.unwrap();

        assert!(
            update_status(&pool, 2, true, "Carlton", [144.96, -37.8])
                .await
                .unwrap()
        );

        let ready = list_ready(&pool).await.unwrap();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].id, 2);
        assert_eq!(ready[0].coordinates, Some([144.96, -37.8]));
        assert_eq!(ready[0].location_string.as_deref(), Some("Carlton"));

        let all = list_all(&pool).await.unwrap();
        assert_eq!(all.iter().map(|v| v.id).collect::<Vec<_>>(), vec![1, 2]);
    }
}
