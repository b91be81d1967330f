//! Untyped category tables of a parsed mmCIF data block.

/// One mmCIF category: named columns over row-major string values.
///
/// Values keep the mmCIF sentinels verbatim: `.` for inapplicable and `?` for
/// unknown.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    values: Vec<String>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            name: name.into(),
            columns,
            values: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn row_count(&self) -> usize {
        if self.columns.is_empty() {
            0
        } else {
            self.values.len() / self.columns.len()
        }
    }

    /// Column position by name, ignoring ASCII case as mmCIF names do.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.eq_ignore_ascii_case(column))
    }

    /// Returns `None` when the column does not exist or the row is out of range.
    pub fn get_value(&self, column: &str, row: usize) -> Option<&str> {
        let col = self.column_index(column)?;
        if row >= self.row_count() {
            return None;
        }
        self.values
            .get(row * self.columns.len() + col)
            .map(String::as_str)
    }

    pub fn column(&self, column: &str) -> Option<impl ExactSizeIterator<Item = &str> + '_> {
        let col = self.column_index(column)?;
        let stride = self.columns.len();
        Some(
            (0..self.row_count()).map(move |row| self.values[row * stride + col].as_str()),
        )
    }

    pub(crate) fn push_row(&mut self, row: impl IntoIterator<Item = String>) {
        self.values.extend(row);
    }

    /// Appends a column to a single-row table built from key/value items.
    pub(crate) fn push_item(&mut self, column: String, value: String) {
        self.columns.push(column);
        self.values.push(value);
    }
}

/// One `data_` block: an ordered set of category tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Container {
    name: String,
    tables: Vec<Table>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a category by name, without the leading underscore.
    pub fn get_obj(&self, category: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(category))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|t| t.name.as_str())
    }

    pub(crate) fn get_obj_mut(&mut self, category: &str) -> Option<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.name.eq_ignore_ascii_case(category))
    }

    pub(crate) fn push_table(&mut self, table: Table) {
        self.tables.push(table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restraint_table() -> Table {
        let mut table = Table::new(
            "ihm_cross_link_restraint",
            vec!["id".into(), "asym_id_1".into(), "seq_id_1".into()],
        );
        table.push_row(["1".to_string(), "A".to_string(), "5".to_string()]);
        table.push_row(["2".to_string(), "B".to_string(), "12".to_string()]);
        table
    }

    #[test]
    fn row_count_follows_value_count() {
        assert_eq!(restraint_table().row_count(), 2);
        assert_eq!(Table::new("empty", vec![]).row_count(), 0);
    }

    #[test]
    fn get_value_is_case_insensitive_on_columns() {
        let table = restraint_table();
        assert_eq!(table.get_value("asym_id_1", 1), Some("B"));
        assert_eq!(table.get_value("ASYM_ID_1", 0), Some("A"));
    }

    #[test]
    fn get_value_returns_none_for_missing_column_or_row() {
        let table = restraint_table();
        assert_eq!(table.get_value("atom_id_1", 0), None);
        assert_eq!(table.get_value("seq_id_1", 2), None);
    }

    #[test]
    fn column_iterates_in_row_order() {
        let table = restraint_table();
        let seq: Vec<_> = table.column("seq_id_1").unwrap().collect();
        assert_eq!(seq, vec!["5", "12"]);
        assert!(table.column("missing").is_none());
    }

    #[test]
    fn container_lookup_ignores_case() {
        let mut container = Container::new("test");
        container.push_table(restraint_table());
        assert!(container.get_obj("IHM_CROSS_LINK_RESTRAINT").is_some());
        assert!(container.get_obj("struct_asym").is_none());
        assert_eq!(
            container.categories().collect::<Vec<_>>(),
            vec!["ihm_cross_link_restraint"]
        );
    }
}
