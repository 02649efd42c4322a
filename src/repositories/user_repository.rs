//! Directorio de usuarios
//!
//! Lecturas mínimas sobre la jerarquía manager/subordinado que consume
//! el resolutor de alcance de acceso.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::User;
use crate::utils::errors::AppResult;

/// Lectura del directorio de usuarios
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// IDs de los usuarios cuyo manager_id es el usuario dado
    async fn find_subordinate_ids(&self, manager_id: Uuid) -> AppResult<Vec<Uuid>>;
}

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_subordinate_ids(&self, manager_id: Uuid) -> AppResult<Vec<Uuid>> {
        let rows: Vec<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE manager_id = $1")
            .bind(manager_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
