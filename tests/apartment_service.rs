use chrono::{NaiveDate, Utc};
use zhilfond::{
    error::{data::DataError, validation::ValidationError, Error},
    model::{ApartmentDraft, FilterOperator, FilterSpec, TenantDraft},
    schema,
    service::{apartment::ApartmentService, lookup::LookupService, record::RecordService},
};
use zhilfond_test_utils::prelude::*;

async fn seed_house(test: &TestSetup) -> Result<i64, TestError> {
    let service_id = factory::service(&test.db, "ЖЭУ-7").await?;
    let department_id = factory::department(&test.db, service_id, "Отдел 2").await?;
    let section_id = factory::section(&test.db, department_id, "Участок 3").await?;
    factory::house(
        &test.db,
        service_id,
        department_id,
        section_id,
        "Набережная",
        "14",
        Some("2"),
        Some(1978),
    )
    .await
}

fn draft(house_id: i64) -> ApartmentDraft {
    ApartmentDraft {
        house_id: Some(house_id),
        apt_number: "12".to_string(),
        floor: "3".to_string(),
        living_area: "40".to_string(),
        total_area: "45".to_string(),
        ..ApartmentDraft::default()
    }
}

fn column_index(entity: &str, column: &str) -> usize {
    schema::lookup(entity)
        .unwrap()
        .columns
        .iter()
        .position(|c| c.name == column)
        .unwrap()
}

/// Expect the apartment and every tenant draft to persist in one unit
#[tokio::test]
async fn creates_apartment_with_tenants() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let house_id = seed_house(&test).await?;
    let apartments = ApartmentService::new(&test.db);

    let tenants = vec![
        TenantDraft {
            full_name: "Иванов Иван Иванович".to_string(),
            passport: "4004 112233".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1975, 3, 9),
            is_responsible: true,
            moved_in: NaiveDate::from_ymd_opt(2020, 1, 15),
        },
        TenantDraft {
            full_name: "Иванова Анна Петровна".to_string(),
            ..TenantDraft::default()
        },
    ];

    let (apartment_id, stored) = apartments
        .create_with_tenants(&draft(house_id), &tenants)
        .await
        .unwrap();
    assert!(apartment_id > 0);
    assert_eq!(stored, 2);

    let records = RecordService::new(&test.db);
    let filter = FilterSpec::new("apartment_id", FilterOperator::Eq, apartment_id.to_string());
    let rows = records.list("apartments", Some(&filter), None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(column_index("apartments", "apt_number")), Some("12"));
    assert_eq!(rows[0].get(column_index("apartments", "cold_water")), Some("Да"));

    let rows = records.list("tenants", Some(&filter), None).await.unwrap();
    assert_eq!(rows.len(), 2);

    // The blank move-in date defaulted to the current date.
    let today = Utc::now().date_naive().to_string();
    let moved_in_index = column_index("tenants", "moved_in");
    assert!(rows.iter().any(|r| r.get(moved_in_index) == Some(today.as_str())));
    assert!(rows.iter().any(|r| r.get(moved_in_index) == Some("2020-01-15")));

    Ok(())
}

/// Expect a failing tenant insert to roll back the apartment and every
/// earlier tenant
#[tokio::test]
async fn tenant_failure_rolls_back_everything() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let house_id = seed_house(&test).await?;
    let apartments = ApartmentService::new(&test.db);

    let tenants = vec![
        TenantDraft {
            full_name: "Иванов".to_string(),
            ..TenantDraft::default()
        },
        // Blank name normalizes to NULL and violates the store constraint.
        TenantDraft::default(),
    ];

    let result = apartments.create_with_tenants(&draft(house_id), &tenants).await;
    assert!(matches!(
        result,
        Err(Error::DataError(DataError::MutationFailed { .. }))
    ));

    let records = RecordService::new(&test.db);
    let apartments_left = records.list("apartments", None, None).await.unwrap();
    let tenants_left = records.list("tenants", None, None).await.unwrap();

    assert!(apartments_left.is_empty());
    assert!(tenants_left.is_empty());

    Ok(())
}

/// Expect precondition failures to reject before any store access
#[tokio::test]
async fn preconditions_reject_before_store() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let house_id = seed_house(&test).await?;
    let apartments = ApartmentService::new(&test.db);

    let no_house = ApartmentDraft {
        house_id: None,
        ..draft(house_id)
    };
    let result = apartments.create_with_tenants(&no_house, &[]).await;
    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::NoHouseSelected))
    ));

    let no_number = ApartmentDraft {
        apt_number: String::new(),
        ..draft(house_id)
    };
    let result = apartments.create_with_tenants(&no_number, &[]).await;
    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::MissingField("apt_number")))
    ));

    let no_area = ApartmentDraft {
        living_area: String::new(),
        ..draft(house_id)
    };
    let result = apartments.create_with_tenants(&no_area, &[]).await;
    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::MissingField("living_area")))
    ));

    // Nothing reached the store.
    let records = RecordService::new(&test.db);
    assert!(records.list("apartments", None, None).await.unwrap().is_empty());

    Ok(())
}

/// Expect the house picker to label houses in street order
#[tokio::test]
async fn house_picker_lists_in_street_order() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let service_id = factory::service(&test.db, "ЖЭУ-8").await?;
    let department_id = factory::department(&test.db, service_id, "Отдел 1").await?;
    let section_id = factory::section(&test.db, department_id, "Участок 1").await?;

    factory::house(
        &test.db, service_id, department_id, section_id, "Цветочная", "2", None, None,
    )
    .await?;
    factory::house(
        &test.db, service_id, department_id, section_id, "Абрикосовая", "7", Some("1"), None,
    )
    .await?;

    let lookups = LookupService::new(&test.db);
    let houses = lookups.houses().await.unwrap();

    assert_eq!(houses.len(), 2);
    assert_eq!(houses[0].street, "Абрикосовая");
    assert_eq!(houses[0].label(), "Абрикосовая 7 корп.1");
    assert_eq!(houses[1].label(), "Цветочная 2");

    let sections = lookups.sections().await.unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].name, "Участок 1");

    Ok(())
}
