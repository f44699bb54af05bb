use std::collections::HashMap;

use zhilfond::{
    error::{data::DataError, schema::SchemaError, validation::ValidationError, Error},
    model::{FieldInput, FieldValues, FilterOperator, FilterSpec, SortDirection, SortSpec},
    schema,
    service::record::RecordService,
};
use zhilfond_test_utils::prelude::*;

fn field(text: &str) -> FieldInput {
    FieldInput::Text(text.to_string())
}

fn service_fields(name: &str, phone: &str) -> FieldValues {
    HashMap::from([
        ("name".to_string(), field(name)),
        ("phone".to_string(), field(phone)),
    ])
}

fn column_index(entity: &str, column: &str) -> usize {
    schema::lookup(entity)
        .unwrap()
        .columns
        .iter()
        .position(|c| c.name == column)
        .unwrap()
}

/// Expect an inserted record to round-trip through a filtered list
#[tokio::test]
async fn insert_then_list_round_trips() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let id = records
        .insert("services", &service_fields("Лифтовая служба", "222-33-44"))
        .await
        .unwrap();
    assert!(id > 0);

    let filter = FilterSpec::new("service_id", FilterOperator::Eq, id.to_string());
    let rows = records.list("services", Some(&filter), None).await.unwrap();

    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.get(column_index("services", "service_id")), Some(id.to_string().as_str()));
    assert_eq!(row.get(column_index("services", "name")), Some("Лифтовая служба"));
    assert_eq!(row.get(column_index("services", "phone")), Some("222-33-44"));
    // Store-assigned creation timestamp is present without being supplied.
    assert_ne!(row.get(column_index("services", "created_at")), Some(""));

    Ok(())
}

/// Expect keys outside the editable set to be ignored rather than rejected
#[tokio::test]
async fn ignores_non_editable_fields() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let mut fields = service_fields("Аварийная служба", "04");
    fields.insert("service_id".to_string(), field("9999"));
    fields.insert("created_at".to_string(), field("2000-01-01 00:00:00"));
    fields.insert("bogus".to_string(), field("x"));

    let id = records.insert("services", &fields).await.unwrap();

    let filter = FilterSpec::new("service_id", FilterOperator::Eq, id.to_string());
    let rows = records.list("services", Some(&filter), None).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_ne!(id, 9999);

    Ok(())
}

/// Expect an unknown entity key to fail before any store access
#[tokio::test]
async fn rejects_unknown_entity() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let result = records.list("users", None, None).await;

    assert!(matches!(
        result,
        Err(Error::SchemaError(SchemaError::UnknownEntity(_)))
    ));

    Ok(())
}

/// Expect empty text inputs to store NULL and display as empty
#[tokio::test]
async fn empty_text_stores_null() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    records
        .insert("services", &service_fields("Диспетчерская", ""))
        .await
        .unwrap();
    records
        .insert("services", &service_fields("Паспортный стол", "555-00-11"))
        .await
        .unwrap();

    let filter = FilterSpec::new("phone", FilterOperator::IsNull, String::new());
    let rows = records.list("services", Some(&filter), None).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(column_index("services", "name")), Some("Диспетчерская"));
    assert_eq!(rows[0].get(column_index("services", "phone")), Some(""));

    let filter = FilterSpec::new("phone", FilterOperator::IsNotNull, String::new());
    let rows = records.list("services", Some(&filter), None).await.unwrap();

    assert_eq!(rows.len(), 1);

    Ok(())
}

/// Expect substring search on a numeric column to match via text cast
#[tokio::test]
async fn contains_matches_numeric_column() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let service_id = factory::service(&test.db, "ЖЭУ-1").await?;
    let department_id = factory::department(&test.db, service_id, "Отдел 1").await?;
    let section_id = factory::section(&test.db, department_id, "Участок 1").await?;
    let house_id = factory::house(
        &test.db, service_id, department_id, section_id, "Садовая", "5", None, None,
    )
    .await?;

    for floor in [1i64, 10, 21, 3] {
        let fixture = factory::ApartmentFixture {
            apt_number: "1",
            floor,
            ..factory::ApartmentFixture::default()
        };
        factory::apartment(&test.db, house_id, &fixture).await?;
    }

    let filter = FilterSpec::new("floor", FilterOperator::Contains, "1");
    let rows = records.list("apartments", Some(&filter), None).await.unwrap();
    assert_eq!(rows.len(), 3);

    let filter = FilterSpec::new("floor", FilterOperator::NotContains, "1");
    let rows = records.list("apartments", Some(&filter), None).await.unwrap();
    assert_eq!(rows.len(), 1);

    Ok(())
}

/// Expect comparison operators to filter against typed values
#[tokio::test]
async fn comparison_filters_apply() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let service_id = factory::service(&test.db, "ЖЭУ-2").await?;
    let department_id = factory::department(&test.db, service_id, "Отдел 1").await?;
    let section_id = factory::section(&test.db, department_id, "Участок 1").await?;
    for (number, year) in [("1", 1957i64), ("2", 1980), ("3", 2004)] {
        factory::house(
            &test.db, service_id, department_id, section_id, "Мира", number, None, Some(year),
        )
        .await?;
    }

    let filter = FilterSpec::new("year_built", FilterOperator::Gte, "1980");
    let rows = records.list("houses", Some(&filter), None).await.unwrap();
    assert_eq!(rows.len(), 2);

    let filter = FilterSpec::new("year_built", FilterOperator::Lt, "1980");
    let rows = records.list("houses", Some(&filter), None).await.unwrap();
    assert_eq!(rows.len(), 1);

    let filter = FilterSpec::new("year_built", FilterOperator::Ne, "1980");
    let rows = records.list("houses", Some(&filter), None).await.unwrap();
    assert_eq!(rows.len(), 2);

    Ok(())
}

/// Expect sorting to order rows by the requested column and direction
#[tokio::test]
async fn sort_orders_rows() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    for name in ["Вторая", "Альфа", "Система"] {
        records
            .insert("services", &service_fields(name, "0"))
            .await
            .unwrap();
    }

    let name_index = column_index("services", "name");
    let sort = SortSpec::new("name", SortDirection::Ascending);
    let rows = records.list("services", None, Some(&sort)).await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.get(name_index).unwrap()).collect();
    assert_eq!(names, ["Альфа", "Вторая", "Система"]);

    let sort = SortSpec::new("name", SortDirection::Descending);
    let rows = records.list("services", None, Some(&sort)).await.unwrap();
    let names: Vec<_> = rows.iter().map(|r| r.get(name_index).unwrap()).collect();
    assert_eq!(names, ["Система", "Вторая", "Альфа"]);

    Ok(())
}

/// Expect a value-bearing operator with an empty value to fail validation
#[tokio::test]
async fn rejects_empty_filter_value() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let filter = FilterSpec::new("name", FilterOperator::Eq, "");
    let result = records.list("services", Some(&filter), None).await;

    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::MissingFilterValue(_)))
    ));

    Ok(())
}

/// Expect boolean columns to display localized yes/no tokens
#[tokio::test]
async fn booleans_display_localized() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let service_id = factory::service(&test.db, "ЖЭУ-3").await?;
    let department_id = factory::department(&test.db, service_id, "Отдел 1").await?;
    let section_id = factory::section(&test.db, department_id, "Участок 1").await?;
    let house_id = factory::house(
        &test.db, service_id, department_id, section_id, "Полевая", "8", None, None,
    )
    .await?;
    let fixture = factory::ApartmentFixture {
        cold_water: true,
        hot_water: false,
        ..factory::ApartmentFixture::default()
    };
    factory::apartment(&test.db, house_id, &fixture).await?;

    let rows = records.list("apartments", None, None).await.unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(column_index("apartments", "cold_water")), Some("Да"));
    assert_eq!(rows[0].get(column_index("apartments", "hot_water")), Some("Нет"));

    Ok(())
}

/// Expect boolean columns to insert from toggle state and reject text
#[tokio::test]
async fn boolean_fields_take_toggles() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let mut fields: FieldValues = HashMap::from([
        ("service_type".to_string(), field("Отопление")),
        ("has_service".to_string(), FieldInput::Toggle(true)),
        ("tariff".to_string(), field("32.10")),
    ]);

    let id = records.insert("tariffs", &fields).await.unwrap();
    let filter = FilterSpec::new("tariff_id", FilterOperator::Eq, id.to_string());
    let rows = records.list("tariffs", Some(&filter), None).await.unwrap();
    assert_eq!(rows[0].get(column_index("tariffs", "has_service")), Some("Да"));

    fields.insert("has_service".to_string(), field("да"));
    let result = records.insert("tariffs", &fields).await;
    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::TextForBoolean(_)))
    ));

    Ok(())
}

/// Expect malformed numeric input to fail validation before the store
#[tokio::test]
async fn rejects_malformed_field_input() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let fields: FieldValues = HashMap::from([
        ("service_type".to_string(), field("Газ")),
        ("tariff".to_string(), field("тридцать")),
    ]);

    let result = records.insert("tariffs", &fields).await;

    assert!(matches!(
        result,
        Err(Error::ValidationError(ValidationError::InvalidNumber { .. }))
    ));

    Ok(())
}

/// Expect update to overwrite exactly the supplied editable columns
#[tokio::test]
async fn update_overwrites_supplied_fields() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let id = records
        .insert("services", &service_fields("Старое имя", "111"))
        .await
        .unwrap();

    let rows_affected = records
        .update("services", id, &service_fields("Новое имя", ""))
        .await
        .unwrap();
    assert_eq!(rows_affected, 1);

    let filter = FilterSpec::new("service_id", FilterOperator::Eq, id.to_string());
    let rows = records.list("services", Some(&filter), None).await.unwrap();
    assert_eq!(rows[0].get(column_index("services", "name")), Some("Новое имя"));
    // Empty input overwrites with NULL rather than keeping the old value.
    assert_eq!(rows[0].get(column_index("services", "phone")), Some(""));

    // Applying the same update twice leaves the same state.
    let rows_affected = records
        .update("services", id, &service_fields("Новое имя", ""))
        .await
        .unwrap();
    assert_eq!(rows_affected, 1);
    let again = records.list("services", Some(&filter), None).await.unwrap();
    assert_eq!(again, rows);

    Ok(())
}

/// Expect updating a missing key to succeed with zero rows affected
#[tokio::test]
async fn update_missing_key_affects_nothing() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let rows_affected = records
        .update("services", 12345, &service_fields("Никто", ""))
        .await
        .unwrap();

    assert_eq!(rows_affected, 0);

    Ok(())
}

/// Expect delete to remove exactly the addressed row
#[tokio::test]
async fn delete_removes_row() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    let keep = records
        .insert("services", &service_fields("Остаётся", "1"))
        .await
        .unwrap();
    let gone = records
        .insert("services", &service_fields("Удаляется", "2"))
        .await
        .unwrap();

    let rows_affected = records.delete("services", gone).await.unwrap();
    assert_eq!(rows_affected, 1);

    let rows = records.list("services", None, None).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].get(column_index("services", "service_id")),
        Some(keep.to_string().as_str())
    );

    // Deleting the same key again is a no-op, not an error.
    let rows_affected = records.delete("services", gone).await.unwrap();
    assert_eq!(rows_affected, 0);

    Ok(())
}

/// Expect a mutation against a broken statement to surface MutationFailed
#[tokio::test]
async fn store_rejection_surfaces_mutation_failed() -> Result<(), TestError> {
    let test = TestSetup::new().await?;
    let records = RecordService::new(&test.db);

    // `name` is NOT NULL in the store; an empty input normalizes to NULL.
    let result = records
        .insert("services", &service_fields("", ""))
        .await;

    assert!(matches!(
        result,
        Err(Error::DataError(DataError::MutationFailed { .. }))
    ));

    Ok(())
}
