use rust_decimal::Decimal;
use shared::models::Snack;
use sqlx::SqlitePool;
use std::str::FromStr;

#[derive(sqlx::FromRow)]
struct SnackRow {
    id: i64,
    name: String,
    price: String,
    photo: Option<String>,
}

impl TryFrom<SnackRow> for Snack {
    type Error = sqlx::Error;

    fn try_from(row: SnackRow) -> Result<Self, Self::Error> {
        let price =
            Decimal::from_str(&row.price).map_err(|e| super::decode_error("snacks.price", e))?;
        Ok(Snack {
            id: row.id,
            name: row.name,
            price,
            photo: row.photo,
        })
    }
}

/// Full menu, by name
pub async fn list(pool: &SqlitePool) -> Result<Vec<Snack>, sqlx::Error> {
    let rows: Vec<SnackRow> = sqlx::query_as("SELECT id, name, price, photo FROM snacks ORDER BY name")
        .fetch_all(pool)
        .await?;
    rows.into_iter().map(Snack::try_from).collect()
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Snack>, sqlx::Error> {
    let row: Option<SnackRow> =
        sqlx::query_as("SELECT id, name, price, photo FROM snacks WHERE name = ?")
            .bind(name)
            .fetch_optional(pool)
            .await?;
    row.map(Snack::try_from).transpose()
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Snack>, sqlx::Error> {
    let row: Option<SnackRow> =
        sqlx::query_as("SELECT id, name, price, photo FROM snacks WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
    row.map(Snack::try_from).transpose()
}

/// Insert or replace a menu entry (seeding)
pub async fn upsert(pool: &SqlitePool, snack: &Snack) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO snacks (id, name, price, photo) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(name) DO UPDATE SET price = excluded.price, photo = excluded.photo",
    )
    .bind(snack.id)
    .bind(&snack.name)
    .bind(snack.price.to_string())
    .bind(&snack.photo)
    .execute(pool)
    .await?;
    Ok(())
}

/// Menu installed on first start: (name, price)
const DEFAULT_MENU: &[(&str, &str)] = &[
    ("Cappuccino", "4.50"),
    ("Latte", "4.50"),
    ("Flat White", "4.00"),
    ("Long Black", "3.50"),
    ("Plain Biscuit", "2.00"),
    ("Fancy Biscuit", "3.00"),
    ("Small Cake", "5.00"),
    ("Big Cake", "7.50"),
];

/// Install the default menu when the table is empty. Returns how many
/// snacks were added.
pub async fn seed_default_menu(pool: &SqlitePool) -> Result<usize, sqlx::Error> {
    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM snacks")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(0);
    }

    // Consecutive ids from one snowflake so entries cannot collide
    let base_id = shared::util::snowflake_id();
    for (offset, (name, price)) in (0_i64..).zip(DEFAULT_MENU) {
        let snack = Snack {
            id: base_id + offset,
            name: (*name).to_string(),
            price: Decimal::from_str(price).map_err(|e| super::decode_error("snacks.price", e))?,
            photo: None,
        };
        upsert(pool, &snack).await?;
    }
    tracing::info!(count = DEFAULT_MENU.len(), "Default menu installed");
    Ok(DEFAULT_MENU.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_snack(id: i64, name: &str, price: &str) -> Snack {
        Snack {
            id,
            name: name.to_string(),
            price: Decimal::from_str(price).unwrap(),
            photo: None,
        }
    }

    #[tokio::test]
    async fn test_price_round_trips_exactly() {
        let pool = crate::db::test_pool().await;
        upsert(&pool, &create_snack(1, "Latte", "4.50")).await.unwrap();

        let snack = find_by_name(&pool, "Latte").await.unwrap().unwrap();
        assert_eq!(snack.price, Decimal::from_str("4.50").unwrap());
        assert_eq!(find_by_id(&pool, 1).await.unwrap().unwrap().name, "Latte");
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let pool = crate::db::test_pool().await;
        upsert(&pool, &create_snack(1, "Latte", "4.5")).await.unwrap();
        upsert(&pool, &create_snack(2, "Cappuccino", "4")).await.unwrap();

        let names: Vec<_> = list(&pool).await.unwrap().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Cappuccino", "Latte"]);
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let pool = crate::db::test_pool().await;
        assert_eq!(seed_default_menu(&pool).await.unwrap(), DEFAULT_MENU.len());
        assert_eq!(seed_default_menu(&pool).await.unwrap(), 0);
        assert_eq!(list(&pool).await.unwrap().len(), DEFAULT_MENU.len());
    }

    #[tokio::test]
    async fn test_corrupt_price_is_decode_error() {
        let pool = crate::db::test_pool().await;
        sqlx::query("INSERT INTO snacks (id, name, price) VALUES (1, 'Bad', 'free')")
            .execute(&pool)
            .await
            .unwrap();
        assert!(matches!(
            find_by_id(&pool, 1).await,
            Err(sqlx::Error::Decode(_))
        ));
    }
}
