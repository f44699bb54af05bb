//! Static description of the managed entities.
//!
//! The registry is the single source of truth for which tables and columns
//! the engine may touch: every identifier that ends up in generated SQL is
//! taken from here, never from caller input. Column kinds are explicit tags
//! chosen at definition time, never inferred from column names, so a
//! future column named, say, `water_meter_serial` cannot be misclassified
//! as a boolean.
//!
//! Display names are Russian because they are domain content shown to the
//! operators of the system, not code.

use crate::error::schema::SchemaError;

/// How a column stores and presents its values.
///
/// The kind drives three things: widget selection in consuming form
/// generators (toggle vs free entry), parsing of filter and mutation input
/// into typed bind values, and display normalization of query results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Store-generated primary key.
    Identifier,
    /// Reference to another entity's primary key.
    ForeignKey,
    /// Free text.
    Text,
    /// Yes/no flag, edited through a toggle.
    Boolean,
    /// Integer or decimal quantity.
    Numeric,
    /// Calendar date.
    Date,
    /// Store-assigned creation timestamp.
    Timestamp,
}

/// A single column of a managed entity.
#[derive(Debug, Clone, Copy)]
pub struct ColumnDef {
    /// Storage identifier.
    pub name: &'static str,
    /// Localized header shown to users.
    pub display_name: &'static str,
    /// Explicit kind tag, set once at definition time.
    pub kind: ColumnKind,
}

/// Schema description of one managed entity.
///
/// Columns and their display names are positionally aligned by
/// construction: both live on the same [`ColumnDef`].
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    /// Internal key; doubles as the table name in the backing store.
    pub key: &'static str,
    /// Localized entity name for menus.
    pub display_name: &'static str,
    /// All columns, in storage order; the primary key comes first and the
    /// creation timestamp last.
    pub columns: &'static [ColumnDef],
    /// Name of the identifying column.
    pub primary_key: &'static str,
    /// Columns a user-facing edit operation may write, in form order.
    /// Excludes the primary key and the creation timestamp.
    pub editable: &'static [&'static str],
}

impl EntitySchema {
    /// Find a column by storage name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Find a column by storage name, failing with [`SchemaError::UnknownColumn`].
    ///
    /// This is the gate every caller-supplied column name passes before it
    /// is interpolated into query text.
    pub fn require_column(&self, name: &str) -> Result<&ColumnDef, SchemaError> {
        self.column(name).ok_or_else(|| SchemaError::UnknownColumn {
            entity: self.key,
            column: name.to_string(),
        })
    }

    /// True when a user-facing edit operation may write the column.
    pub fn is_editable(&self, name: &str) -> bool {
        self.editable.iter().any(|c| *c == name)
    }

    /// Column storage names in schema order.
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    /// Localized column headers in schema order.
    pub fn display_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.display_name).collect()
    }
}

const fn col(name: &'static str, display_name: &'static str, kind: ColumnKind) -> ColumnDef {
    ColumnDef {
        name,
        display_name,
        kind,
    }
}

use ColumnKind::{Boolean, Date, ForeignKey, Identifier, Numeric, Text, Timestamp};

const SERVICES: EntitySchema = EntitySchema {
    key: "services",
    display_name: "Службы",
    columns: &[
        col("service_id", "ID", Identifier),
        col("name", "Название", Text),
        col("phone", "Телефон", Text),
        col("created_at", "Дата создания", Timestamp),
    ],
    primary_key: "service_id",
    editable: &["name", "phone"],
};

const DEPARTMENTS: EntitySchema = EntitySchema {
    key: "departments",
    display_name: "Отделы",
    columns: &[
        col("department_id", "ID", Identifier),
        col("service_id", "ID службы", ForeignKey),
        col("name", "Название", Text),
        col("address", "Адрес", Text),
        col("phone", "Телефон", Text),
        col("created_at", "Дата создания", Timestamp),
    ],
    primary_key: "department_id",
    editable: &["service_id", "name", "address", "phone"],
};

const SECTIONS: EntitySchema = EntitySchema {
    key: "sections",
    display_name: "Участки",
    columns: &[
        col("section_id", "ID", Identifier),
        col("department_id", "ID отдела", ForeignKey),
        col("name", "Название", Text),
        col("manager", "Управляющий", Text),
        col("created_at", "Дата создания", Timestamp),
    ],
    primary_key: "section_id",
    editable: &["department_id", "name", "manager"],
};

const HOUSES: EntitySchema = EntitySchema {
    key: "houses",
    display_name: "Дома",
    columns: &[
        col("house_id", "ID", Identifier),
        col("service_id", "ID службы", ForeignKey),
        col("department_id", "ID отдела", ForeignKey),
        col("section_id", "ID участка", ForeignKey),
        col("street", "Улица", Text),
        col("house_number", "Номер дома", Text),
        col("building", "Корпус", Text),
        col("year_built", "Год постройки", Numeric),
        col("total_apartments", "Всего квартир", Numeric),
        col("resident_count", "Жильцов", Numeric),
        col("created_at", "Дата создания", Timestamp),
    ],
    primary_key: "house_id",
    editable: &[
        "service_id",
        "department_id",
        "section_id",
        "street",
        "house_number",
        "building",
        "year_built",
    ],
};

const APARTMENTS: EntitySchema = EntitySchema {
    key: "apartments",
    display_name: "Квартиры",
    columns: &[
        col("apartment_id", "ID", Identifier),
        col("house_id", "ID дома", ForeignKey),
        col("apt_number", "Номер кв.", Text),
        col("floor", "Этаж", Numeric),
        col("living_area", "Жилая пл.", Numeric),
        col("total_area", "Общая пл.", Numeric),
        col("privatized", "Приватиз.", Boolean),
        col("cold_water", "Хол. вода", Boolean),
        col("hot_water", "Гор. вода", Boolean),
        col("garbage_chute", "Мусоропровод", Boolean),
        col("elevator", "Лифт", Boolean),
        col("current_residents", "Жильцов", Numeric),
        col("created_at", "Дата создания", Timestamp),
    ],
    primary_key: "apartment_id",
    editable: &[
        "house_id",
        "apt_number",
        "floor",
        "living_area",
        "total_area",
        "privatized",
        "cold_water",
        "hot_water",
        "garbage_chute",
        "elevator",
    ],
};

const TENANTS: EntitySchema = EntitySchema {
    key: "tenants",
    display_name: "Жильцы",
    columns: &[
        col("tenant_id", "ID", Identifier),
        col("apartment_id", "ID квартиры", ForeignKey),
        col("full_name", "ФИО", Text),
        col("inn", "ИНН", Text),
        col("passport", "Паспорт", Text),
        col("birth_date", "Дата рожд.", Date),
        col("is_responsible", "Ответственный", Boolean),
        col("payer_code_id", "ID шифра", ForeignKey),
        col("moved_in", "Дата вселения", Date),
        col("moved_out", "Дата выселения", Date),
        col("created_at", "Дата создания", Timestamp),
    ],
    primary_key: "tenant_id",
    editable: &[
        "apartment_id",
        "full_name",
        "inn",
        "passport",
        "birth_date",
        "is_responsible",
        "payer_code_id",
        "moved_in",
        "moved_out",
    ],
};

const PAYER_CODES: EntitySchema = EntitySchema {
    key: "payer_codes",
    display_name: "Шифры плательщиков",
    columns: &[
        col("payer_code_id", "ID", Identifier),
        col("code", "Код", Text),
        col("name", "Название", Text),
        col("percent_share", "Процент", Numeric),
        col("created_at", "Дата создания", Timestamp),
    ],
    primary_key: "payer_code_id",
    editable: &["code", "name", "percent_share"],
};

const TARIFFS: EntitySchema = EntitySchema {
    key: "tariffs",
    display_name: "Тарифы",
    columns: &[
        col("tariff_id", "ID", Identifier),
        col("service_type", "Тип услуги", Text),
        col("has_service", "Есть услуга", Boolean),
        col("tariff", "Тариф", Numeric),
        col("valid_from", "Действует с", Date),
        col("valid_to", "Действует до", Date),
        col("created_at", "Дата создания", Timestamp),
    ],
    primary_key: "tariff_id",
    editable: &["service_type", "has_service", "tariff", "valid_from", "valid_to"],
};

static ENTITIES: [EntitySchema; 8] = [
    SERVICES,
    DEPARTMENTS,
    SECTIONS,
    HOUSES,
    APARTMENTS,
    TENANTS,
    PAYER_CODES,
    TARIFFS,
];

/// Look up the schema for an entity key.
pub fn lookup(key: &str) -> Result<&'static EntitySchema, SchemaError> {
    ENTITIES
        .iter()
        .find(|e| e.key == key)
        .ok_or_else(|| SchemaError::UnknownEntity(key.to_string()))
}

/// All managed entity schemas, in menu order.
pub fn all() -> &'static [EntitySchema] {
    &ENTITIES
}

/// `(key, display name)` summaries for menu population.
pub fn entries() -> impl Iterator<Item = (&'static str, &'static str)> {
    ENTITIES.iter().map(|e| (e.key, e.display_name))
}
