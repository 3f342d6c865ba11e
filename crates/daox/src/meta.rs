//! Table metadata consumed by the builders.

/// Column information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
    /// Column name.
    pub name: String,
    /// Whether this column is the primary key.
    pub is_primary_key: bool,
}

/// Table information, typically produced by schema introspection.
///
/// # Example
///
/// ```rust
/// use daox::meta::TableMeta;
/// use daox::sqlbuilder::Builder;
///
/// let meta = TableMeta::new("user")
///     .with_primary_key("id", true)
///     .with_columns(&["username", "age"]);
///
/// let b = Builder::from_meta(&meta);
/// assert_eq!(
///     b.insert().name_sql().unwrap(),
///     "INSERT INTO `user`(`username`, `age`) VALUES (:username, :age);"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMeta {
    /// Table name.
    pub table_name: String,
    /// Columns in table order.
    pub columns: Vec<ColumnMeta>,
    /// Primary key column, if any.
    pub primary_key: Option<String>,
    /// Whether the primary key is generated by the database.
    pub auto_increment: bool,
}

impl TableMeta {
    pub fn new(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: Vec::new(),
            primary_key: None,
            auto_increment: false,
        }
    }

    /// Add a column.
    pub fn add_column(&mut self, name: impl Into<String>, is_primary_key: bool) {
        let name = name.into();
        if is_primary_key {
            self.primary_key = Some(name.clone());
        }
        self.columns.push(ColumnMeta {
            name,
            is_primary_key,
        });
    }

    /// Add the primary key column.
    pub fn with_primary_key(mut self, name: impl Into<String>, auto_increment: bool) -> Self {
        self.add_column(name, true);
        self.auto_increment = auto_increment;
        self
    }

    /// Add multiple non-key columns.
    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        for col in columns {
            self.add_column(*col, false);
        }
        self
    }

    /// Every column name in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Columns written by INSERT: all of them, minus an auto-increment key.
    pub fn insert_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !(c.is_primary_key && self.auto_increment))
            .map(|c| c.name.clone())
            .collect()
    }

    /// Columns written by UPDATE: everything except the primary key.
    pub fn update_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| !c.is_primary_key)
            .map(|c| c.name.clone())
            .collect()
    }
}
