use sea_orm::{ConnectionTrait, DbErr, Statement};

use crate::model::{HouseRef, SectionRef};

/// Read-only selection lists backing form pickers.
pub struct LookupRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LookupRepository<'a, C> {
    /// Creates a new instance of [`LookupRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Houses ordered by street and number.
    pub async fn list_houses(&self) -> Result<Vec<HouseRef>, DbErr> {
        let stmt = Statement::from_string(
            self.db.get_database_backend(),
            "SELECT house_id, street, house_number, building FROM houses ORDER BY street, house_number"
                .to_owned(),
        );
        let rows = self.db.query_all_raw(stmt).await?;

        rows.iter()
            .map(|row| {
                Ok(HouseRef {
                    house_id: row.try_get("", "house_id")?,
                    street: row.try_get("", "street")?,
                    house_number: row.try_get("", "house_number")?,
                    building: row.try_get("", "building")?,
                })
            })
            .collect()
    }

    /// Sections ordered by name.
    pub async fn list_sections(&self) -> Result<Vec<SectionRef>, DbErr> {
        let stmt = Statement::from_string(
            self.db.get_database_backend(),
            "SELECT section_id, name FROM sections ORDER BY name".to_owned(),
        );
        let rows = self.db.query_all_raw(stmt).await?;

        rows.iter()
            .map(|row| {
                Ok(SectionRef {
                    section_id: row.try_get("", "section_id")?,
                    name: row.try_get("", "name")?,
                })
            })
            .collect()
    }
}
