//! Column metadata and the inferred-type lattice

use serde::Serialize;

/// Type of a column, decided by the loader's typing pass.
///
/// A column holding only missing markers stays `Null`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellType {
    #[default]
    Null,
    Int,
    Float,
    Bool,
    Text,
}

impl std::fmt::Display for CellType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CellType::Null => "null",
            CellType::Int => "int",
            CellType::Float => "float",
            CellType::Bool => "bool",
            CellType::Text => "text",
        };
        f.write_str(name)
    }
}

/// One column of a table: header name, position, and inferred type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    /// Header name, unique within its table
    pub name: String,
    /// Zero-based position
    pub index: usize,
    /// What the typing pass decided for this column
    pub inferred_type: CellType,
}

impl Column {
    /// A column whose type is not yet known
    pub fn new(name: impl Into<String>, index: usize) -> Self {
        Self {
            name: name.into(),
            index,
            inferred_type: CellType::Null,
        }
    }

    pub fn with_type(name: impl Into<String>, index: usize, cell_type: CellType) -> Self {
        Self {
            name: name.into(),
            index,
            inferred_type: cell_type,
        }
    }
}
