use sea_orm::DatabaseConnection;

use crate::{
    data::lookup::LookupRepository,
    error::{data::DataError, Error},
    model::{HouseRef, SectionRef},
};

/// Selection lists for the form pickers of the embedding UI.
pub struct LookupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LookupService<'a> {
    /// Creates a new instance of [`LookupService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Houses ordered by street and number, for house pickers.
    pub async fn houses(&self) -> Result<Vec<HouseRef>, Error> {
        LookupRepository::new(self.db)
            .list_houses()
            .await
            .map_err(|source| {
                DataError::QueryFailed {
                    entity: "houses",
                    source,
                }
                .into()
            })
    }

    /// Sections ordered by name, for section pickers.
    pub async fn sections(&self) -> Result<Vec<SectionRef>, Error> {
        LookupRepository::new(self.db)
            .list_sections()
            .await
            .map_err(|source| {
                DataError::QueryFailed {
                    entity: "sections",
                    source,
                }
                .into()
            })
    }
}
