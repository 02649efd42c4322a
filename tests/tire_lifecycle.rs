//! Ciclo de vida completo del neumático sobre stores en memoria:
//! registro, montaje, exclusividad, baja, alcance y agregación de
//! mantenimiento.

mod helpers;

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use fleet_maintenance::models::{
    MaintenanceStatus, NewInstallation, TireFilters, TireStatus,
};
use fleet_maintenance::repositories::{
    InMemoryDb, InstallationStore, MaintenanceStore, TireStore,
};
use fleet_maintenance::services::{
    AccessScopeService, InstallationService, MaintenanceStatusService, TireService,
};
use fleet_maintenance::utils::errors::AppError;

use helpers::{seed_maintenance, seed_tire, seed_user, seed_vehicle};

fn tire_service(db: &Arc<InMemoryDb>) -> TireService {
    TireService::new(db.clone(), db.clone(), AccessScopeService::new(db.clone()))
}

fn installation_service(db: &Arc<InMemoryDb>) -> InstallationService {
    InstallationService::new(
        db.clone(),
        db.clone(),
        db.clone(),
        MaintenanceStatusService::new(db.clone(), db.clone()),
    )
}

fn install_request(
    vehicle_id: Uuid,
    tire_id: Uuid,
    owner_id: Uuid,
    maintenance_id: Option<Uuid>,
) -> NewInstallation {
    NewInstallation {
        vehicle_id,
        tire_id,
        owner_id,
        maintenance_id,
        installation_date: Utc::now(),
        mileage_at_installation: 10000.0,
        predicted_replacement_mileage: 10000.0,
    }
}

async fn maintenance_status(db: &Arc<InMemoryDb>, id: Uuid) -> MaintenanceStatus {
    MaintenanceStore::find_by_id(db.as_ref(), id)
        .await
        .unwrap()
        .unwrap()
        .status
}

#[tokio::test]
async fn test_register_install_conflict_discharge_scenario() {
    let db = Arc::new(InMemoryDb::new());
    let tires = tire_service(&db);
    let installations = installation_service(&db);

    let owner = seed_user(&db, "Gestora", "gestora@flota.test", None);
    let vehicle_a = seed_vehicle(&db, owner, "AAA-1111", 10000.0);
    let vehicle_b = seed_vehicle(&db, owner, "BBB-2222", 30000.0);

    // Registro: nace available
    let tire = seed_tire(&db, "P001", owner).await;
    assert_eq!(tire.status, TireStatus::Available);

    // Montaje en el vehículo A: pasa a in_use
    installations
        .install(vec![install_request(vehicle_a, tire.id, owner, None)])
        .await
        .unwrap();

    let mounted = TireStore::find_by_id(db.as_ref(), tire.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(mounted.status, TireStatus::InUse);

    // La búsqueda por código deja de ser una consulta pura: avisa que
    // el neumático ya está asociado a un vehículo
    let err = tires.get_by_code("P001").await.unwrap_err();
    assert!(matches!(err, AppError::TireInUse(code) if code == "P001"));

    // Montarlo en el vehículo B mientras sigue vivo en A se rechaza
    let err = installations
        .install(vec![install_request(vehicle_b, tire.id, owner, None)])
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::TireAlreadyMounted(id) if id == tire.id));

    // Baja: la fila desaparece y el neumático vuelve a available
    let discharged = installations.discharge(tire.id).await.unwrap();
    assert!(discharged);

    let released = TireStore::find_by_id(db.as_ref(), tire.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(released.status, TireStatus::Available);
    assert!(tires.get_by_code("P001").await.is_ok());

    // Ya es elegible para otro vehículo
    installations
        .install(vec![install_request(vehicle_b, tire.id, owner, None)])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_concurrent_installs_leave_at_most_one_live_row() {
    let db = Arc::new(InMemoryDb::new());
    let installations = installation_service(&db);

    let owner = seed_user(&db, "Gestora", "gestora@flota.test", None);
    let vehicle_a = seed_vehicle(&db, owner, "CCC-3333", 5000.0);
    let vehicle_b = seed_vehicle(&db, owner, "DDD-4444", 8000.0);
    let tire = seed_tire(&db, "P002", owner).await;

    let (first, second) = tokio::join!(
        installations.install(vec![install_request(vehicle_a, tire.id, owner, None)]),
        installations.install(vec![install_request(vehicle_b, tire.id, owner, None)]),
    );

    let successes = [first.is_ok(), second.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(successes, 1);

    assert_eq!(
        InstallationStore::count_live_for_tire(db.as_ref(), tire.id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn test_maintenance_status_flips_when_last_tire_is_marked() {
    let db = Arc::new(InMemoryDb::new());
    let installations = installation_service(&db);

    let owner = seed_user(&db, "Gestora", "gestora@flota.test", None);
    let vehicle = seed_vehicle(&db, owner, "EEE-5555", 12000.0);
    let maintenance_id = seed_maintenance(&db, vehicle, owner);

    let tire_a = seed_tire(&db, "M001", owner).await;
    let tire_b = seed_tire(&db, "M002", owner).await;
    let tire_c = seed_tire(&db, "M003", owner).await;

    let rows = installations
        .install(vec![
            install_request(vehicle, tire_a.id, owner, Some(maintenance_id)),
            install_request(vehicle, tire_b.id, owner, Some(maintenance_id)),
            install_request(vehicle, tire_c.id, owner, Some(maintenance_id)),
        ])
        .await
        .unwrap();
    assert_eq!(rows.len(), 3);

    // 2 de 3 marcadas: sigue pendiente
    installations
        .mark_for_replacement(rows[0].id, 21000.0)
        .await
        .unwrap();
    installations
        .mark_for_replacement(rows[1].id, 21500.0)
        .await
        .unwrap();
    assert_eq!(
        maintenance_status(&db, maintenance_id).await,
        MaintenanceStatus::Pendente
    );

    // La tercera completa el conjunto
    installations
        .mark_for_replacement(rows[2].id, 22000.0)
        .await
        .unwrap();
    assert_eq!(
        maintenance_status(&db, maintenance_id).await,
        MaintenanceStatus::Concluida
    );

    // Los neumáticos marcados vuelven a available
    let released = TireStore::find_by_id(db.as_ref(), tire_a.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(released.status, TireStatus::Available);
}

#[tokio::test]
async fn test_marked_installation_survives_as_history() {
    let db = Arc::new(InMemoryDb::new());
    let installations = installation_service(&db);

    let owner = seed_user(&db, "Gestora", "gestora@flota.test", None);
    let vehicle = seed_vehicle(&db, owner, "FFF-6666", 15000.0);
    let maintenance_id = seed_maintenance(&db, vehicle, owner);
    let tire = seed_tire(&db, "H001", owner).await;

    let rows = installations
        .install(vec![install_request(
            vehicle,
            tire.id,
            owner,
            Some(maintenance_id),
        )])
        .await
        .unwrap();

    installations
        .mark_for_replacement(rows[0].id, 20500.0)
        .await
        .unwrap();

    // La fila marcada se conserva como historial del vehículo
    let listed = installations.list_for_vehicle(vehicle).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert!(listed[0].to_replace);
    assert_eq!(listed[0].mileage_to_replace, Some(20500.0));

    // Pero bloquea la eliminación del neumático
    let err = tire_service(&db).destroy(tire.id).await.unwrap_err();
    assert!(matches!(err, AppError::TireReferenced(id) if id == tire.id));
}

#[tokio::test]
async fn test_manager_scope_includes_subordinates_only() {
    let db = Arc::new(InMemoryDb::new());
    let tires = tire_service(&db);

    let manager = seed_user(&db, "Gestora", "gestora@flota.test", None);
    let sub_a = seed_user(&db, "Chofer A", "a@flota.test", Some(manager));
    let sub_b = seed_user(&db, "Chofer B", "b@flota.test", Some(manager));
    let outsider = seed_user(&db, "Externa", "externa@flota.test", None);

    seed_tire(&db, "S001", manager).await;
    seed_tire(&db, "S002", sub_a).await;
    seed_tire(&db, "S003", sub_b).await;
    seed_tire(&db, "S004", outsider).await;

    // El manager ve lo suyo y lo de sus subordinados
    let (rows, total) = tires
        .list(manager, &TireFilters::default(), 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 3);
    assert!(rows.iter().all(|t| t.code != "S004"));

    // Un subordinado solo ve lo propio
    let (rows, total) = tires
        .list(sub_a, &TireFilters::default(), 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].code, "S002");

    // Un manager sin subordinados también
    let (_, total) = tires
        .list(outsider, &TireFilters::default(), 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn test_list_filters_combine_with_scope() {
    let db = Arc::new(InMemoryDb::new());
    let tires = tire_service(&db);

    let manager = seed_user(&db, "Gestora", "gestora@flota.test", None);
    let sub = seed_user(&db, "Chofer", "chofer@flota.test", Some(manager));

    seed_tire(&db, "F-100", manager).await;
    seed_tire(&db, "F-200", sub).await;
    seed_tire(&db, "G-300", sub).await;

    let filters = TireFilters {
        code: Some("F-".to_string()),
        ..TireFilters::default()
    };

    let (rows, total) = tires.list(manager, &filters, 1, 10).await.unwrap();
    assert_eq!(total, 2);
    assert!(rows.iter().all(|t| t.code.starts_with("F-")));

    // El mismo filtro bajo el alcance del subordinado
    let (rows, total) = tires.list(sub, &filters, 1, 10).await.unwrap();
    assert_eq!(total, 1);
    assert_eq!(rows[0].code, "F-200");
}
