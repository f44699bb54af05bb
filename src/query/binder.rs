use sea_orm::{DatabaseBackend, Value};

/// Accumulates bound values and hands out backend-appropriate placeholders.
///
/// Postgres placeholders are positional (`$1`, `$2`, ...) while SQLite and
/// MySQL use `?`; the binder keeps SQL text and value order in sync so query
/// code never hand-counts parameters.
#[derive(Debug)]
pub struct SqlBinder {
    backend: DatabaseBackend,
    values: Vec<Value>,
}

impl SqlBinder {
    /// Start an empty binder for the given backend.
    pub fn new(backend: DatabaseBackend) -> Self {
        Self {
            backend,
            values: Vec::new(),
        }
    }

    /// Bind a value and return the placeholder to splice into SQL text.
    pub fn push(&mut self, value: impl Into<Value>) -> String {
        self.values.push(value.into());
        match self.backend {
            DatabaseBackend::Postgres => format!("${}", self.values.len()),
            _ => "?".to_owned(),
        }
    }

    /// Number of values bound so far.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when nothing has been bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The bound values, in placeholder order.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expect sequential positional placeholders on Postgres
    #[test]
    fn numbers_postgres_placeholders() {
        let mut binder = SqlBinder::new(DatabaseBackend::Postgres);

        assert_eq!(binder.push(1i64), "$1");
        assert_eq!(binder.push("two"), "$2");
        assert_eq!(binder.into_values().len(), 2);
    }

    /// Expect anonymous placeholders on SQLite
    #[test]
    fn uses_anonymous_placeholders_on_sqlite() {
        let mut binder = SqlBinder::new(DatabaseBackend::Sqlite);

        assert_eq!(binder.push(1i64), "?");
        assert_eq!(binder.push("two"), "?");
    }
}
