//! Almacenamiento en memoria
//!
//! Implementa los cinco traits de almacenamiento sobre mapas protegidos
//! por un único RwLock. Pensado para tests y despliegues de proceso
//! único; los datos se pierden al reiniciar.
//!
//! El lock de escritura único cumple aquí el papel que el índice único
//! parcial cumple en PostgreSQL: dos instalaciones concurrentes del
//! mismo neumático no pueden entrelazarse.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    Installation, InstallationDetail, Maintenance, MaintenanceDetail, MaintenanceStatus,
    NewInstallation, NewTire, ReplacementCounts, Tire, TireFilters, TireStatus, TireUpdate, User,
    Vehicle, WearCandidate,
};
use crate::repositories::{
    InstallationStore, MaintenanceStore, TireStore, UserDirectory, VehicleStore,
};
use crate::utils::errors::{AppError, AppResult};

#[derive(Default)]
struct Inner {
    tires: HashMap<Uuid, Tire>,
    installations: HashMap<Uuid, Installation>,
    vehicles: HashMap<Uuid, Vehicle>,
    users: HashMap<Uuid, User>,
    maintenance: HashMap<Uuid, Maintenance>,
}

/// Implementación en memoria de todos los traits de almacenamiento
#[derive(Clone, Default)]
pub struct InMemoryDb {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> AppResult<RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| AppError::Internal("in-memory store lock poisoned".to_string()))
    }

    fn write(&self) -> AppResult<RwLockWriteGuard<'_, Inner>> {
        self.inner
            .write()
            .map_err(|_| AppError::Internal("in-memory store lock poisoned".to_string()))
    }

    /// Carga un usuario directamente, sin pasar por el CRUD externo
    pub fn seed_user(&self, user: User) {
        if let Ok(mut inner) = self.inner.write() {
            inner.users.insert(user.id, user);
        }
    }

    /// Carga un vehículo directamente
    pub fn seed_vehicle(&self, vehicle: Vehicle) {
        if let Ok(mut inner) = self.inner.write() {
            inner.vehicles.insert(vehicle.id, vehicle);
        }
    }

    /// Carga un registro de mantenimiento directamente
    pub fn seed_maintenance(&self, maintenance: Maintenance) {
        if let Ok(mut inner) = self.inner.write() {
            inner.maintenance.insert(maintenance.id, maintenance);
        }
    }

    /// Ajusta el odómetro de un vehículo ya cargado
    pub fn set_vehicle_mileage(&self, vehicle_id: Uuid, mileage: f64) {
        if let Ok(mut inner) = self.inner.write() {
            if let Some(vehicle) = inner.vehicles.get_mut(&vehicle_id) {
                vehicle.current_mileage = mileage;
            }
        }
    }
}

fn matches_filter(value: &str, filter: Option<&str>) -> bool {
    match filter {
        Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

fn detail_row(
    installation: &Installation,
    tire: &Tire,
    vehicle: &Vehicle,
) -> InstallationDetail {
    InstallationDetail {
        id: installation.id,
        vehicle_id: installation.vehicle_id,
        tire_id: installation.tire_id,
        maintenance_id: installation.maintenance_id,
        installation_date: installation.installation_date,
        mileage_at_installation: installation.mileage_at_installation,
        predicted_replacement_mileage: installation.predicted_replacement_mileage,
        to_replace: installation.to_replace,
        mileage_to_replace: installation.mileage_to_replace,
        code: tire.code.clone(),
        brand: tire.brand.clone(),
        model: tire.model.clone(),
        current_mileage: vehicle.current_mileage,
        // Misma expresión que calcula la consulta SQL
        needs_replacement: vehicle.current_mileage
            >= installation.mileage_at_installation + installation.predicted_replacement_mileage,
    }
}

#[async_trait]
impl TireStore for InMemoryDb {
    async fn insert(&self, tire: NewTire) -> AppResult<Tire> {
        let mut inner = self.write()?;

        if inner.tires.values().any(|t| t.code == tire.code) {
            return Err(AppError::DuplicateCode(tire.code));
        }

        let row = Tire {
            id: Uuid::new_v4(),
            code: tire.code,
            brand: tire.brand,
            model: tire.model,
            price: tire.price,
            durability_km: tire.durability_km,
            status: TireStatus::Available,
            owner_id: tire.owner_id,
            created_at: chrono::Utc::now(),
        };

        inner.tires.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Tire>> {
        Ok(self.read()?.tires.get(&id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Tire>> {
        Ok(self.read()?.tires.values().find(|t| t.code == code).cloned())
    }

    async fn code_exists(&self, code: &str) -> AppResult<bool> {
        Ok(self.read()?.tires.values().any(|t| t.code == code))
    }

    async fn list(
        &self,
        filters: &TireFilters,
        scope: &[Uuid],
        page: i64,
        limit: i64,
    ) -> AppResult<(Vec<Tire>, i64)> {
        let inner = self.read()?;

        let mut rows: Vec<Tire> = inner
            .tires
            .values()
            .filter(|t| scope.contains(&t.owner_id))
            .filter(|t| matches_filter(&t.code, filters.code.as_deref()))
            .filter(|t| matches_filter(&t.brand, filters.brand.as_deref()))
            .filter(|t| matches_filter(&t.model, filters.model.as_deref()))
            .filter(|t| filters.status.map_or(true, |s| t.status == s))
            .cloned()
            .collect();

        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = rows.len() as i64;
        let limit = limit.max(1) as usize;
        let offset = (page.max(1) as usize - 1) * limit;
        let page_rows = rows.into_iter().skip(offset).take(limit).collect();

        Ok((page_rows, total))
    }

    async fn update(&self, id: Uuid, changes: TireUpdate) -> AppResult<Tire> {
        let mut inner = self.write()?;

        if let Some(ref new_code) = changes.code {
            if inner
                .tires
                .values()
                .any(|t| t.id != id && &t.code == new_code)
            {
                return Err(AppError::DuplicateCode(new_code.clone()));
            }
        }

        let tire = inner
            .tires
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Tire with id '{}' not found", id)))?;

        if let Some(code) = changes.code {
            tire.code = code;
        }
        if let Some(brand) = changes.brand {
            tire.brand = brand;
        }
        if let Some(model) = changes.model {
            tire.model = model;
        }
        if let Some(price) = changes.price {
            tire.price = price;
        }
        if let Some(durability_km) = changes.durability_km {
            tire.durability_km = durability_km;
        }

        Ok(tire.clone())
    }

    async fn update_status(&self, id: Uuid, status: TireStatus) -> AppResult<()> {
        let mut inner = self.write()?;
        if let Some(tire) = inner.tires.get_mut(&id) {
            tire.status = status;
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.write()?.tires.remove(&id);
        Ok(())
    }
}

#[async_trait]
impl InstallationStore for InMemoryDb {
    async fn install_batch(&self, batch: Vec<NewInstallation>) -> AppResult<Vec<Installation>> {
        let mut inner = self.write()?;

        // Equivalente del índice único parcial: ninguna fila del lote puede
        // chocar con una instalación viva existente ni repetirse en el lote
        let mut staged: Vec<Uuid> = Vec::with_capacity(batch.len());
        for item in &batch {
            let already_live = inner
                .installations
                .values()
                .any(|i| i.tire_id == item.tire_id && !i.to_replace);
            if already_live || staged.contains(&item.tire_id) {
                return Err(AppError::TireAlreadyMounted(item.tire_id));
            }
            staged.push(item.tire_id);
        }

        let mut inserted = Vec::with_capacity(batch.len());
        for item in batch {
            let row = Installation {
                id: Uuid::new_v4(),
                vehicle_id: item.vehicle_id,
                tire_id: item.tire_id,
                owner_id: item.owner_id,
                maintenance_id: item.maintenance_id,
                installation_date: item.installation_date,
                mileage_at_installation: item.mileage_at_installation,
                predicted_replacement_mileage: item.predicted_replacement_mileage,
                to_replace: false,
                mileage_to_replace: None,
            };

            if let Some(tire) = inner.tires.get_mut(&item.tire_id) {
                tire.status = TireStatus::InUse;
            }

            inner.installations.insert(row.id, row.clone());
            inserted.push(row);
        }

        Ok(inserted)
    }

    async fn is_mounted_elsewhere(&self, tire_id: Uuid, vehicle_id: Uuid) -> AppResult<bool> {
        let inner = self.read()?;

        let mounted = inner.installations.values().any(|i| {
            i.tire_id == tire_id
                && i.vehicle_id != vehicle_id
                && inner
                    .tires
                    .get(&tire_id)
                    .map_or(false, |t| t.status != TireStatus::Available)
        });

        Ok(mounted)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Installation>> {
        Ok(self.read()?.installations.get(&id).cloned())
    }

    async fn mark_to_replace(&self, id: Uuid, mileage_to_replace: f64) -> AppResult<Installation> {
        let mut inner = self.write()?;

        let row = {
            let installation = inner
                .installations
                .get_mut(&id)
                .ok_or(AppError::InstallationNotFound(id))?;
            installation.to_replace = true;
            installation.mileage_to_replace = Some(mileage_to_replace);
            installation.clone()
        };

        if let Some(tire) = inner.tires.get_mut(&row.tire_id) {
            tire.status = TireStatus::Available;
        }

        Ok(row)
    }

    async fn discharge_by_tire(&self, tire_id: Uuid) -> AppResult<bool> {
        let mut inner = self.write()?;

        let mut candidates: Vec<(chrono::DateTime<chrono::Utc>, Uuid)> = inner
            .installations
            .values()
            .filter(|i| i.tire_id == tire_id)
            .map(|i| (i.installation_date, i.id))
            .collect();
        candidates.sort();

        let Some(&(_, oldest_id)) = candidates.first() else {
            return Ok(false);
        };

        inner.installations.remove(&oldest_id);
        if let Some(tire) = inner.tires.get_mut(&tire_id) {
            tire.status = TireStatus::Available;
        }

        Ok(true)
    }

    async fn list_for_vehicle(&self, vehicle_id: Uuid) -> AppResult<Vec<InstallationDetail>> {
        let inner = self.read()?;

        let mut rows: Vec<InstallationDetail> = inner
            .installations
            .values()
            .filter(|i| i.vehicle_id == vehicle_id)
            .filter_map(|i| {
                let tire = inner.tires.get(&i.tire_id)?;
                let vehicle = inner.vehicles.get(&i.vehicle_id)?;
                Some(detail_row(i, tire, vehicle))
            })
            .collect();

        rows.sort_by(|a, b| b.installation_date.cmp(&a.installation_date));
        Ok(rows)
    }

    async fn list_for_maintenance(
        &self,
        vehicle_id: Uuid,
        maintenance_id: Uuid,
    ) -> AppResult<Vec<InstallationDetail>> {
        let inner = self.read()?;

        let mut rows: Vec<InstallationDetail> = inner
            .installations
            .values()
            .filter(|i| i.vehicle_id == vehicle_id && i.maintenance_id == Some(maintenance_id))
            .filter_map(|i| {
                let tire = inner.tires.get(&i.tire_id)?;
                let vehicle = inner.vehicles.get(&i.vehicle_id)?;
                Some(detail_row(i, tire, vehicle))
            })
            .collect();

        rows.sort_by(|a, b| b.installation_date.cmp(&a.installation_date));
        Ok(rows)
    }

    async fn list_wear_candidates(&self) -> AppResult<Vec<WearCandidate>> {
        let inner = self.read()?;

        let rows = inner
            .installations
            .values()
            .filter(|i| !i.to_replace)
            .filter_map(|i| {
                let tire = inner.tires.get(&i.tire_id)?;
                let vehicle = inner.vehicles.get(&i.vehicle_id)?;
                let email = inner
                    .users
                    .get(&vehicle.owner_id)
                    .map(|u| u.email.clone());
                Some(WearCandidate {
                    id: i.id,
                    vehicle_id: i.vehicle_id,
                    tire_id: i.tire_id,
                    code: tire.code.clone(),
                    license_plate: vehicle.license_plate.clone(),
                    email,
                    mileage_at_installation: i.mileage_at_installation,
                    predicted_replacement_mileage: i.predicted_replacement_mileage,
                    current_mileage: vehicle.current_mileage,
                })
            })
            .collect();

        Ok(rows)
    }

    async fn replacement_counts(&self, maintenance_id: Uuid) -> AppResult<ReplacementCounts> {
        let inner = self.read()?;

        let linked: Vec<&Installation> = inner
            .installations
            .values()
            .filter(|i| i.maintenance_id == Some(maintenance_id))
            .collect();

        Ok(ReplacementCounts {
            replaced: linked.iter().filter(|i| i.to_replace).count() as i64,
            total: linked.len() as i64,
        })
    }

    async fn count_for_tire(&self, tire_id: Uuid) -> AppResult<i64> {
        let inner = self.read()?;
        Ok(inner
            .installations
            .values()
            .filter(|i| i.tire_id == tire_id)
            .count() as i64)
    }

    async fn count_live_for_tire(&self, tire_id: Uuid) -> AppResult<i64> {
        let inner = self.read()?;
        Ok(inner
            .installations
            .values()
            .filter(|i| i.tire_id == tire_id && !i.to_replace)
            .count() as i64)
    }
}

#[async_trait]
impl VehicleStore for InMemoryDb {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.read()?.vehicles.get(&id).cloned())
    }

    async fn current_mileage(&self, id: Uuid) -> AppResult<Option<f64>> {
        Ok(self.read()?.vehicles.get(&id).map(|v| v.current_mileage))
    }
}

#[async_trait]
impl UserDirectory for InMemoryDb {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn find_subordinate_ids(&self, manager_id: Uuid) -> AppResult<Vec<Uuid>> {
        Ok(self
            .read()?
            .users
            .values()
            .filter(|u| u.manager_id == Some(manager_id))
            .map(|u| u.id)
            .collect())
    }
}

#[async_trait]
impl MaintenanceStore for InMemoryDb {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Maintenance>> {
        Ok(self.read()?.maintenance.get(&id).cloned())
    }

    async fn find_detail(&self, id: Uuid) -> AppResult<Option<MaintenanceDetail>> {
        let inner = self.read()?;

        Ok(inner.maintenance.get(&id).map(|m| {
            let vehicle = inner.vehicles.get(&m.vehicle_id);
            MaintenanceDetail {
                id: m.id,
                vehicle_id: m.vehicle_id,
                owner_id: m.owner_id,
                maintenance_type: m.maintenance_type.clone(),
                status: m.status,
                created_at: m.created_at,
                license_plate: vehicle.and_then(|v| v.license_plate.clone()),
                vehicle_brand: vehicle.and_then(|v| v.brand.clone()),
                vehicle_model: vehicle.and_then(|v| v.model.clone()),
            }
        }))
    }

    async fn set_status(&self, id: Uuid, status: MaintenanceStatus) -> AppResult<()> {
        let mut inner = self.write()?;
        if let Some(row) = inner.maintenance.get_mut(&id) {
            row.status = status;
        }
        Ok(())
    }
}
