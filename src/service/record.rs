use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait, Value,
};

use crate::{
    data::record::RecordRepository,
    error::{
        data::{DataError, Operation},
        validation::ValidationError,
        Error,
    },
    model::{FieldValues, FilterSpec, Record, SortSpec},
    query::{build_query_parts, field_input_value},
    schema::{self, EntitySchema},
};

/// Generic list/insert/update/delete over any registry entity.
pub struct RecordService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RecordService<'a> {
    /// Creates a new instance of [`RecordService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load all rows of the entity, filtered and sorted per the caller.
    ///
    /// Always a full projection in schema column order. A failed read
    /// returns an error; a partial result set is never returned. Values come back
    /// display-normalized: NULL as empty text, booleans as localized yes/no
    /// tokens, dates in canonical form.
    pub async fn list(
        &self,
        entity_key: &str,
        filter: Option<&FilterSpec>,
        sort: Option<&SortSpec>,
    ) -> Result<Vec<Record>, Error> {
        let schema = schema::lookup(entity_key)?;
        let parts = build_query_parts(schema, self.db.get_database_backend(), filter, sort)?;

        let records = RecordRepository::new(self.db)
            .select(schema, parts)
            .await
            .map_err(|source| DataError::QueryFailed {
                entity: schema.key,
                source,
            })?;

        Ok(records)
    }

    /// Insert a new row from editable-field input; returns the generated
    /// primary key.
    pub async fn insert(&self, entity_key: &str, fields: &FieldValues) -> Result<i64, Error> {
        let schema = schema::lookup(entity_key)?;
        let (columns, values) = editable_values(schema, fields)?;
        if columns.is_empty() {
            return Err(ValidationError::NoEditableValues(schema.key).into());
        }

        let txn = self.transaction(schema, Operation::Insert).await?;
        let result = RecordRepository::new(&txn)
            .insert(schema, &columns, values)
            .await;

        match result {
            Ok(id) => {
                self.commit(txn, schema, Operation::Insert).await?;
                tracing::info!(entity = schema.key, id, "record inserted");
                Ok(id)
            }
            Err(source) => {
                rollback(txn).await;
                Err(mutation_failed(schema, Operation::Insert, source).into())
            }
        }
    }

    /// Overwrite the editable columns present in `fields` for the row with
    /// the given primary key.
    ///
    /// Every present column is written, with NULL overwriting where the
    /// input was empty. Returns the rows-affected count; updating a missing
    /// key is not an error and reports zero rows.
    pub async fn update(
        &self,
        entity_key: &str,
        pk_value: i64,
        fields: &FieldValues,
    ) -> Result<u64, Error> {
        let schema = schema::lookup(entity_key)?;
        let (columns, values) = editable_values(schema, fields)?;
        if columns.is_empty() {
            return Err(ValidationError::NoEditableValues(schema.key).into());
        }

        let txn = self.transaction(schema, Operation::Update).await?;
        let result = RecordRepository::new(&txn)
            .update(schema, &columns, values, pk_value)
            .await;

        match result {
            Ok(rows_affected) => {
                self.commit(txn, schema, Operation::Update).await?;
                tracing::info!(entity = schema.key, pk_value, rows_affected, "record updated");
                Ok(rows_affected)
            }
            Err(source) => {
                rollback(txn).await;
                Err(mutation_failed(schema, Operation::Update, source).into())
            }
        }
    }

    /// Delete the row with the given primary key.
    ///
    /// Confirmation is the caller's concern. Returns the rows-affected
    /// count; deleting a missing key is not an error and reports zero rows.
    pub async fn delete(&self, entity_key: &str, pk_value: i64) -> Result<u64, Error> {
        let schema = schema::lookup(entity_key)?;

        let txn = self.transaction(schema, Operation::Delete).await?;
        let result = RecordRepository::new(&txn).delete(schema, pk_value).await;

        match result {
            Ok(rows_affected) => {
                self.commit(txn, schema, Operation::Delete).await?;
                tracing::info!(entity = schema.key, pk_value, rows_affected, "record deleted");
                Ok(rows_affected)
            }
            Err(source) => {
                rollback(txn).await;
                Err(mutation_failed(schema, Operation::Delete, source).into())
            }
        }
    }

    async fn transaction(
        &self,
        schema: &EntitySchema,
        operation: Operation,
    ) -> Result<DatabaseTransaction, Error> {
        self.db
            .begin()
            .await
            .map_err(|source| mutation_failed(schema, operation, source).into())
    }

    async fn commit(
        &self,
        txn: DatabaseTransaction,
        schema: &EntitySchema,
        operation: Operation,
    ) -> Result<(), Error> {
        txn.commit()
            .await
            .map_err(|source| mutation_failed(schema, operation, source).into())
    }
}

/// Restrict `fields` to the schema's editable subset, preserving schema
/// order. Unknown and read-only keys are ignored so a UI can round-trip
/// disabled fields unchanged.
fn editable_values(
    schema: &EntitySchema,
    fields: &FieldValues,
) -> Result<(Vec<&'static str>, Vec<Value>), Error> {
    let mut columns = Vec::new();
    let mut values = Vec::new();

    for name in schema.editable {
        let Some(input) = fields.get(*name) else {
            continue;
        };
        let column = schema.require_column(name)?;
        columns.push(*name);
        values.push(field_input_value(column, input)?);
    }

    Ok((columns, values))
}

fn mutation_failed(schema: &EntitySchema, operation: Operation, source: DbErr) -> DataError {
    DataError::MutationFailed {
        entity: schema.key,
        operation,
        source,
    }
}

async fn rollback(txn: DatabaseTransaction) {
    if let Err(source) = txn.rollback().await {
        tracing::error!(%source, "rollback failed");
    }
}
