use shared::error::{AppError, ErrorCode};
use shared::models::Customer;
use sqlx::SqlitePool;

use crate::error::{ServiceError, ServiceResult};

/// Insert a customer. A taken email maps to `EmailAlreadyExists`.
pub async fn insert(pool: &SqlitePool, customer: &Customer, now: i64) -> ServiceResult<()> {
    sqlx::query(
        "INSERT INTO customers (id, email, password_hash, given_name, family_name, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )
    .bind(customer.id)
    .bind(&customer.email)
    .bind(&customer.password_hash)
    .bind(&customer.given_name)
    .bind(&customer.family_name)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| -> ServiceError {
        if super::is_unique_violation(&e) {
            AppError::with_message(
                ErrorCode::EmailAlreadyExists,
                "Customer with that email already exists",
            )
            .into()
        } else {
            e.into()
        }
    })?;
    Ok(())
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, email, password_hash, given_name, family_name FROM customers WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Customer>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, email, password_hash, given_name, family_name FROM customers WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn update_password(
    pool: &SqlitePool,
    id: i64,
    password_hash: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE customers SET password_hash = ? WHERE id = ?")
        .bind(password_hash)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Update whichever name parts are given
pub async fn update_name(
    pool: &SqlitePool,
    id: i64,
    given_name: Option<&str>,
    family_name: Option<&str>,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE customers
         SET given_name = COALESCE(?1, given_name), family_name = COALESCE(?2, family_name)
         WHERE id = ?3",
    )
    .bind(given_name)
    .bind(family_name)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_customer(id: i64, email: &str) -> Customer {
        Customer {
            id,
            email: email.to_string(),
            password_hash: "hash".to_string(),
            given_name: "Amy".to_string(),
            family_name: "Lee".to_string(),
        }
    }

    #[tokio::test]
    async fn test_insert_and_find() {
        let pool = crate::db::test_pool().await;
        insert(&pool, &create_customer(1, "amy@example.com"), 0)
            .await
            .unwrap();

        let found = find_by_email(&pool, "amy@example.com").await.unwrap().unwrap();
        assert_eq!(found.id, 1);
        assert!(find_by_id(&pool, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email() {
        let pool = crate::db::test_pool().await;
        insert(&pool, &create_customer(1, "amy@example.com"), 0)
            .await
            .unwrap();
        let err = insert(&pool, &create_customer(2, "amy@example.com"), 0)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ServiceError::App(ref e) if e.code == ErrorCode::EmailAlreadyExists
        ));
    }

    #[tokio::test]
    async fn test_update_name_partial() {
        let pool = crate::db::test_pool().await;
        insert(&pool, &create_customer(1, "amy@example.com"), 0)
            .await
            .unwrap();
        assert!(update_name(&pool, 1, None, Some("Wong")).await.unwrap());

        let found = find_by_id(&pool, 1).await.unwrap().unwrap();
        assert_eq!(found.given_name, "Amy");
        assert_eq!(found.family_name, "Wong");
        assert!(!update_name(&pool, 9, Some("X"), None).await.unwrap());
    }
}
