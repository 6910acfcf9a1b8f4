//! Static table column metadata for presentation layers.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Checkbox,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnAlign {
    Left,
    Center,
    Right,
}

/// Describes one column of a record table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableColumn {
    pub key: &'static str,
    pub label: &'static str,
    pub width: u32,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    pub sortable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align: Option<ColumnAlign>,
}

impl TableColumn {
    const fn selection() -> Self {
        Self {
            key: "checkbox",
            label: "",
            width: 40,
            column_type: ColumnType::Checkbox,
            sortable: false,
            align: None,
        }
    }

    const fn text(
        key: &'static str,
        label: &'static str,
        width: u32,
        sortable: bool,
        align: ColumnAlign,
    ) -> Self {
        Self {
            key,
            label,
            width,
            column_type: ColumnType::Text,
            sortable,
            align: Some(align),
        }
    }
}

pub const PORT_COLUMNS: [TableColumn; 8] = [
    TableColumn::selection(),
    TableColumn::text("port", "Port", 80, true, ColumnAlign::Right),
    TableColumn::text("pid", "PID", 80, true, ColumnAlign::Right),
    TableColumn::text("protocol", "Protocol", 80, true, ColumnAlign::Center),
    TableColumn::text("localAddress", "Local Address", 200, true, ColumnAlign::Left),
    TableColumn::text("remoteAddress", "Remote Address", 200, true, ColumnAlign::Left),
    TableColumn::text("state", "State", 120, true, ColumnAlign::Center),
    TableColumn::text("processName", "Process Name", 150, true, ColumnAlign::Left),
];

pub const PROCESS_COLUMNS: [TableColumn; 8] = [
    TableColumn::selection(),
    TableColumn::text("pid", "PID", 80, true, ColumnAlign::Right),
    TableColumn::text("name", "Process Name", 200, true, ColumnAlign::Left),
    TableColumn::text("user", "User", 120, true, ColumnAlign::Left),
    TableColumn::text("cpuUsage", "CPU %", 80, true, ColumnAlign::Right),
    TableColumn::text("memoryUsage", "Memory", 120, true, ColumnAlign::Right),
    TableColumn::text("status", "Status", 100, true, ColumnAlign::Center),
    TableColumn::text("commandLine", "Command Line", 300, false, ColumnAlign::Left),
];

/// One projected table row: column key to display text, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<(&'static str, String)>,
}

impl TableRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a cell.
    pub fn cell(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.cells.push((key, value.into()));
        self
    }

    /// Look up a cell by column key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn cells(&self) -> &[(&'static str, String)] {
        &self.cells
    }
}

impl Serialize for TableRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (key, value) in &self.cells {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_column_first() {
        for columns in [&PORT_COLUMNS, &PROCESS_COLUMNS] {
            assert_eq!(columns[0].column_type, ColumnType::Checkbox);
            assert!(!columns[0].sortable);
            assert!(columns[0].align.is_none());
        }
    }

    #[test]
    fn test_table_row_keeps_order() {
        let row = TableRow::new().cell("id", "7").cell("pid", "7").cell("name", "init");
        assert_eq!(row.get("name"), Some("init"));
        assert_eq!(row.get("missing"), None);

        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"id":"7","pid":"7","name":"init"}"#);
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(PROCESS_COLUMNS[7]).unwrap();
        assert_eq!(json["key"], "commandLine");
        assert_eq!(json["type"], "text");
        assert_eq!(json["sortable"], false);
        assert_eq!(json["align"], "left");

        let json = serde_json::to_value(PORT_COLUMNS[0]).unwrap();
        assert!(json.get("align").is_none());
    }
}
