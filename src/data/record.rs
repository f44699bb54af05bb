use sea_orm::{ConnectionTrait, DbErr, Statement, Value};

use crate::{
    data::row,
    model::Record,
    query::{QueryParts, SqlBinder},
    schema::EntitySchema,
};

/// Generic per-entity repository driven by registry metadata.
///
/// Every method takes an [`EntitySchema`] from the registry; table and
/// column identifiers come exclusively from it, values are always bound.
pub struct RecordRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> RecordRepository<'a, C> {
    /// Creates a new instance of [`RecordRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Full projection of the entity's table, in schema column order, with
    /// the prepared filter and sort fragments applied.
    pub async fn select(
        &self,
        schema: &EntitySchema,
        parts: QueryParts,
    ) -> Result<Vec<Record>, DbErr> {
        let projection = schema
            .column_names()
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {projection} FROM {}{}{}",
            schema.key, parts.where_sql, parts.order_sql
        );

        let stmt =
            Statement::from_sql_and_values(self.db.get_database_backend(), sql, parts.values);
        let rows = self.db.query_all_raw(stmt).await?;

        rows.iter()
            .map(|r| {
                schema
                    .columns
                    .iter()
                    .map(|column| row::display_value(r, column))
                    .collect::<Result<Vec<_>, _>>()
                    .map(|values| Record { values })
            })
            .collect()
    }

    /// Insert one row and return the generated primary key.
    ///
    /// `columns` and `values` are positionally aligned and already
    /// restricted to the entity's editable subset by the caller.
    pub async fn insert(
        &self,
        schema: &EntitySchema,
        columns: &[&str],
        values: Vec<Value>,
    ) -> Result<i64, DbErr> {
        let mut binder = SqlBinder::new(self.db.get_database_backend());
        let placeholders = values
            .into_iter()
            .map(|value| binder.push(value))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            schema.key,
            columns.join(", "),
            placeholders,
            schema.primary_key
        );

        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            binder.into_values(),
        );
        let row = self
            .db
            .query_one_raw(stmt)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("insert into {} returned no row", schema.key)))?;

        row.try_get("", schema.primary_key)
    }

    /// Overwrite the given columns of the row selected by primary key.
    ///
    /// Returns the number of rows affected; zero means no row matched the
    /// key, which is not treated as an error here.
    pub async fn update(
        &self,
        schema: &EntitySchema,
        columns: &[&str],
        values: Vec<Value>,
        pk_value: i64,
    ) -> Result<u64, DbErr> {
        let mut binder = SqlBinder::new(self.db.get_database_backend());
        let assignments = columns
            .iter()
            .zip(values)
            .map(|(column, value)| format!("{column} = {}", binder.push(value)))
            .collect::<Vec<_>>()
            .join(", ");
        let pk_placeholder = binder.push(pk_value);
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {}",
            schema.key, assignments, schema.primary_key, pk_placeholder
        );

        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            binder.into_values(),
        );
        let result = self.db.execute_raw(stmt).await?;

        Ok(result.rows_affected())
    }

    /// Delete the row selected by primary key.
    ///
    /// Returns Ok regardless of the row existing; to distinguish the cases
    /// check the returned rows-affected count.
    pub async fn delete(&self, schema: &EntitySchema, pk_value: i64) -> Result<u64, DbErr> {
        let mut binder = SqlBinder::new(self.db.get_database_backend());
        let pk_placeholder = binder.push(pk_value);
        let sql = format!(
            "DELETE FROM {} WHERE {} = {}",
            schema.key, schema.primary_key, pk_placeholder
        );

        let stmt = Statement::from_sql_and_values(
            self.db.get_database_backend(),
            sql,
            binder.into_values(),
        );
        let result = self.db.execute_raw(stmt).await?;

        Ok(result.rows_affected())
    }
}
