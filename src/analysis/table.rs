// src/analysis/table.rs
use super::DerivationError;

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(Vec<f64>),
    Int(Vec<i64>),
    Text(Vec<String>),
    FloatList(Vec<Vec<f64>>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(values) => values.len(),
            Column::Int(values) => values.len(),
            Column::Text(values) => values.len(),
            Column::FloatList(values) => values.len(),
        }
    }

    /// Display form of one cell; float lists are joined with `;`.
    pub fn cell(&self, row: usize) -> Option<String> {
        match self {
            Column::Float(values) => values.get(row).map(|v| v.to_string()),
            Column::Int(values) => values.get(row).map(|v| v.to_string()),
            Column::Text(values) => values.get(row).cloned(),
            Column::FloatList(values) => values.get(row).map(|list| {
                list.iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(";")
            }),
        }
    }
}

/// Column-oriented table handed to the presentation layer. All columns have
/// the same length; that is checked as columns are added.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedTable {
    name: String,
    title: Option<String>,
    columns: Vec<(String, Column)>,
    side_tables: Vec<DerivedTable>,
}

impl DerivedTable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            columns: Vec::new(),
            side_tables: Vec::new(),
        }
    }

    pub fn with_column(mut self, name: impl Into<String>, column: Column) -> Result<Self, DerivationError> {
        let name = name.into();
        if let Some((_, first)) = self.columns.first() {
            if first.len() != column.len() {
                return Err(DerivationError::ColumnLength {
                    column: name,
                    expected: first.len(),
                    actual: column.len(),
                });
            }
        }

        match self.columns.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = column,
            None => self.columns.push((name, column)),
        }
        Ok(self)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_side_table(mut self, table: DerivedTable) -> Self {
        self.side_tables.push(table);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |(_, column)| column.len())
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn columns(&self) -> &[(String, Column)] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, column)| column)
    }

    pub fn floats(&self, name: &str) -> Option<&[f64]> {
        match self.column(name)? {
            Column::Float(values) => Some(values),
            _ => None,
        }
    }

    pub fn ints(&self, name: &str) -> Option<&[i64]> {
        match self.column(name)? {
            Column::Int(values) => Some(values),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&[String]> {
        match self.column(name)? {
            Column::Text(values) => Some(values),
            _ => None,
        }
    }

    pub fn float_lists(&self, name: &str) -> Option<&[Vec<f64>]> {
        match self.column(name)? {
            Column::FloatList(values) => Some(values),
            _ => None,
        }
    }

    pub fn side_table(&self, name: &str) -> Option<&DerivedTable> {
        self.side_tables.iter().find(|t| t.name == name)
    }
}
