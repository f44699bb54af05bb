use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

use crate::{
    data::apartment::{ApartmentRepository, ApartmentRow, TenantRow},
    error::{
        data::{DataError, Operation},
        validation::ValidationError,
        Error,
    },
    model::{ApartmentDraft, TenantDraft},
};

/// Creates apartments together with their initial tenants in one unit of
/// work.
pub struct ApartmentService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ApartmentService<'a> {
    /// Creates a new instance of [`ApartmentService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Atomically insert one apartment and its tenant drafts, in input
    /// order.
    ///
    /// Validation failures reject before any store access. After that a
    /// single transaction covers the apartment insert and every tenant
    /// insert: either all rows exist afterwards or none do. Returns the
    /// apartment's generated identifier and the number of tenants stored.
    pub async fn create_with_tenants(
        &self,
        draft: &ApartmentDraft,
        tenants: &[TenantDraft],
    ) -> Result<(i64, usize), Error> {
        let apartment = validate_apartment(draft)?;
        let today = Utc::now().date_naive();
        let tenant_rows: Vec<TenantRow> = tenants
            .iter()
            .map(|tenant| tenant_row(tenant, today))
            .collect();

        let txn = self.db.begin().await.map_err(insert_failed)?;
        let result = insert_all(&txn, &apartment, &tenant_rows).await;

        match result {
            Ok(apartment_id) => {
                txn.commit().await.map_err(insert_failed)?;
                tracing::info!(
                    apartment_id,
                    tenants = tenant_rows.len(),
                    "apartment created with tenants"
                );
                Ok((apartment_id, tenant_rows.len()))
            }
            Err(source) => {
                // Roll the whole unit back: the apartment row and any
                // tenants already written in this transaction.
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(%rollback_err, "rollback failed");
                }
                Err(insert_failed(source).into())
            }
        }
    }
}

async fn insert_all(
    txn: &DatabaseTransaction,
    apartment: &ApartmentRow,
    tenants: &[TenantRow],
) -> Result<i64, DbErr> {
    let repo = ApartmentRepository::new(txn);
    let apartment_id = repo.insert_apartment(apartment).await?;

    for tenant in tenants {
        repo.insert_tenant(apartment_id, tenant).await?;
    }

    Ok(apartment_id)
}

fn insert_failed(source: DbErr) -> DataError {
    DataError::MutationFailed {
        entity: "apartments",
        operation: Operation::Insert,
        source,
    }
}

fn validate_apartment(draft: &ApartmentDraft) -> Result<ApartmentRow, ValidationError> {
    let Some(house_id) = draft.house_id else {
        return Err(ValidationError::NoHouseSelected);
    };

    let apt_number = draft.apt_number.trim();
    if apt_number.is_empty() {
        return Err(ValidationError::MissingField("apt_number"));
    }

    let living_area = require_decimal("living_area", &draft.living_area)?;
    let total_area = require_decimal("total_area", &draft.total_area)?;
    let floor = optional_integer("floor", &draft.floor)?;

    Ok(ApartmentRow {
        house_id,
        apt_number: apt_number.to_owned(),
        floor,
        living_area,
        total_area,
        privatized: draft.privatized,
        cold_water: draft.cold_water,
        hot_water: draft.hot_water,
        garbage_chute: draft.garbage_chute,
        elevator: draft.elevator,
    })
}

fn require_decimal(field: &'static str, raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    raw.parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidNumber {
            column: field.to_string(),
            value: raw.to_string(),
        })
}

fn optional_integer(field: &'static str, raw: &str) -> Result<Option<i64>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse::<i64>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidNumber {
            column: field.to_string(),
            value: raw.to_string(),
        })
}

/// Blank draft text normalizes to NULL; a blank move-in date becomes today.
fn tenant_row(draft: &TenantDraft, today: NaiveDate) -> TenantRow {
    TenantRow {
        full_name: non_empty(&draft.full_name),
        passport: non_empty(&draft.passport),
        birth_date: draft.birth_date,
        is_responsible: draft.is_responsible,
        moved_in: draft.moved_in.unwrap_or(today),
    }
}

fn non_empty(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> ApartmentDraft {
        ApartmentDraft {
            house_id: Some(1),
            apt_number: "12".to_string(),
            living_area: "40".to_string(),
            total_area: "45".to_string(),
            ..ApartmentDraft::default()
        }
    }

    /// Expect a fully-filled draft to validate into typed column values
    #[test]
    fn validates_complete_draft() {
        let row = validate_apartment(&valid_draft()).unwrap();

        assert_eq!(row.house_id, 1);
        assert_eq!(row.apt_number, "12");
        assert_eq!(row.floor, None);
        assert!(row.cold_water && row.hot_water);
    }

    /// Expect a draft without a selected house to be rejected
    #[test]
    fn rejects_missing_house() {
        let draft = ApartmentDraft {
            house_id: None,
            ..valid_draft()
        };

        assert_eq!(
            validate_apartment(&draft).unwrap_err(),
            ValidationError::NoHouseSelected
        );
    }

    /// Expect an empty apartment number to be rejected
    #[test]
    fn rejects_blank_apartment_number() {
        let draft = ApartmentDraft {
            apt_number: "  ".to_string(),
            ..valid_draft()
        };

        assert_eq!(
            validate_apartment(&draft).unwrap_err(),
            ValidationError::MissingField("apt_number")
        );
    }

    /// Expect a blank area to be rejected as a missing field
    #[test]
    fn rejects_blank_area() {
        let draft = ApartmentDraft {
            total_area: String::new(),
            ..valid_draft()
        };

        assert_eq!(
            validate_apartment(&draft).unwrap_err(),
            ValidationError::MissingField("total_area")
        );
    }

    /// Expect a malformed area to be rejected as an invalid number
    #[test]
    fn rejects_malformed_area() {
        let draft = ApartmentDraft {
            living_area: "40,5".to_string(),
            ..valid_draft()
        };

        assert!(matches!(
            validate_apartment(&draft).unwrap_err(),
            ValidationError::InvalidNumber { .. }
        ));
    }

    /// Expect tenant normalization to null blank fields and default the
    /// move-in date
    #[test]
    fn normalizes_tenant_draft() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let draft = TenantDraft {
            full_name: " Иванов Иван ".to_string(),
            passport: "".to_string(),
            ..TenantDraft::default()
        };

        let row = tenant_row(&draft, today);

        assert_eq!(row.full_name.as_deref(), Some("Иванов Иван"));
        assert_eq!(row.passport, None);
        assert_eq!(row.moved_in, today);
    }

    /// Expect a blank tenant name to normalize to NULL so the store's
    /// constraint can reject it inside the transaction
    #[test]
    fn blank_tenant_name_becomes_null() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 5).unwrap();
        let row = tenant_row(&TenantDraft::default(), today);

        assert_eq!(row.full_name, None);
    }
}
