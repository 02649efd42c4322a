//! Modelo de User
//!
//! Jerarquía de un solo nivel: un usuario sin manager es manager;
//! los usuarios con manager_id = X son subordinados de X.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User principal - mapea exactamente a la tabla users
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub manager_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
