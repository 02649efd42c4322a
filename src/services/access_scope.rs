//! Resolutor de alcance de acceso
//!
//! Jerarquía manager/subordinado de un solo nivel: un manager ve sus
//! propios registros y los de sus subordinados; cualquier otro usuario
//! ve únicamente los suyos. El conjunto resultante se aplica como
//! predicado sobre owner_id en todas las consultas de listado.

use std::sync::Arc;

use uuid::Uuid;

use crate::repositories::UserDirectory;
use crate::utils::errors::AppResult;

/// Conjunto de propietarios visibles para un usuario
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessScope {
    visible: Vec<Uuid>,
}

impl AccessScope {
    pub fn owner_ids(&self) -> &[Uuid] {
        &self.visible
    }

    pub fn contains(&self, owner_id: Uuid) -> bool {
        self.visible.contains(&owner_id)
    }
}

/// Servicio que calcula el alcance de acceso de un usuario
#[derive(Clone)]
pub struct AccessScopeService {
    users: Arc<dyn UserDirectory>,
}

impl AccessScopeService {
    pub fn new(users: Arc<dyn UserDirectory>) -> Self {
        Self { users }
    }

    /// Resuelve el conjunto de propietarios visibles para el usuario.
    ///
    /// Siempre incluye al propio usuario; un subordinado nunca ve
    /// registros ajenos aunque su manager sí vea los de él.
    pub async fn resolve(&self, caller_id: Uuid) -> AppResult<AccessScope> {
        let mut visible = vec![caller_id];
        visible.extend(self.users.find_subordinate_ids(caller_id).await?);

        Ok(AccessScope { visible })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use crate::repositories::InMemoryDb;
    use chrono::Utc;

    fn user(id: Uuid, manager_id: Option<Uuid>) -> User {
        User {
            id,
            name: "test".to_string(),
            email: format!("{}@flota.test", id),
            role: "driver".to_string(),
            manager_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_manager_sees_own_and_subordinate_records() {
        let db = Arc::new(InMemoryDb::new());
        let manager = Uuid::new_v4();
        let sub_a = Uuid::new_v4();
        let sub_b = Uuid::new_v4();

        db.seed_user(user(manager, None));
        db.seed_user(user(sub_a, Some(manager)));
        db.seed_user(user(sub_b, Some(manager)));

        let scope = AccessScopeService::new(db).resolve(manager).await.unwrap();

        assert_eq!(scope.owner_ids().len(), 3);
        assert!(scope.contains(manager));
        assert!(scope.contains(sub_a));
        assert!(scope.contains(sub_b));
    }

    #[tokio::test]
    async fn test_manager_without_subordinates_sees_only_own_records() {
        let db = Arc::new(InMemoryDb::new());
        let manager = Uuid::new_v4();
        db.seed_user(user(manager, None));

        let scope = AccessScopeService::new(db).resolve(manager).await.unwrap();

        assert_eq!(scope.owner_ids(), &[manager]);
    }

    #[tokio::test]
    async fn test_subordinate_sees_only_own_records() {
        let db = Arc::new(InMemoryDb::new());
        let manager = Uuid::new_v4();
        let subordinate = Uuid::new_v4();

        db.seed_user(user(manager, None));
        db.seed_user(user(subordinate, Some(manager)));

        let scope = AccessScopeService::new(db)
            .resolve(subordinate)
            .await
            .unwrap();

        assert_eq!(scope.owner_ids(), &[subordinate]);
        assert!(!scope.contains(manager));
    }
}
