use crate::config::Config;

/// Ordered survey table: one header row and string cells per record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterTable {
    headers: Vec<String>,
    records: Vec<Vec<String>>,
}

impl RosterTable {
    /// Build a table from already-parsed cells. Short records are padded
    /// with blanks and long ones truncated to the header width.
    pub fn from_rows(headers: Vec<String>, records: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let records = records
            .into_iter()
            .map(|mut record| {
                record.resize(width, String::new());
                record
            })
            .collect();
        Self { headers, records }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.records.iter().map(move |cells| Row {
            headers: &self.headers,
            cells,
        })
    }

    /// Required labels absent from the header row, in declaration order.
    pub fn missing_columns(&self, config: &Config) -> Vec<String> {
        config
            .columns
            .required()
            .iter()
            .filter(|label| self.column_index(label).is_none())
            .map(|label| label.to_string())
            .collect()
    }
}

/// Borrowed view of one roster record.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [String],
}

impl<'a> Row<'a> {
    /// Cell value for `label`, or `None` when the column does not exist.
    pub fn field(&self, label: &str) -> Option<&'a str> {
        self.headers
            .iter()
            .position(|h| h == label)
            .map(|i| self.cells.get(i).map(String::as_str).unwrap_or(""))
    }

    /// Cell value for `label`, blank when missing.
    pub fn get(&self, label: &str) -> &'a str {
        self.field(label).unwrap_or("")
    }

    /// Header label and cell at a column position.
    pub fn at(&self, index: usize) -> Option<(&'a str, &'a str)> {
        let label = self.headers.get(index)?;
        let value = self.cells.get(index).map(String::as_str).unwrap_or("");
        Some((label.as_str(), value))
    }
}
