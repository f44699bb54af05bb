use serde::{Deserialize, Serialize};

/// One selectable house for picker widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRef {
    /// House primary key.
    pub house_id: i64,
    /// Street name.
    pub street: String,
    /// House number on the street.
    pub house_number: String,
    /// Building (корпус) within the address, if any.
    pub building: Option<String>,
}

impl HouseRef {
    /// Human-readable label, e.g. `Садовая 12 корп.2`.
    pub fn label(&self) -> String {
        match &self.building {
            Some(building) => format!("{} {} корп.{}", self.street, self.house_number, building),
            None => format!("{} {}", self.street, self.house_number),
        }
    }
}

/// One selectable section for picker widgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRef {
    /// Section primary key.
    pub section_id: i64,
    /// Section name.
    pub name: String,
}
