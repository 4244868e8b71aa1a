use convert_case::{Case, Casing};
use serde::Serialize;
use serde_json::Value;

use super::core::{self, Record};

/// Where a column's value comes from
#[derive(Clone, Copy)]
pub enum Accessor {
    /// Row selection checkbox, no record value
    RowSelector,
    /// A record field read by name
    Field(&'static str),
    /// A value derived from the whole record
    Computed(fn(&Record) -> Value),
}

impl std::fmt::Debug for Accessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Accessor::RowSelector => write!(f, "RowSelector"),
            Accessor::Field(name) => write!(f, "Field({})", name),
            Accessor::Computed(_) => write!(f, "Computed"),
        }
    }
}

/// How the view should draw a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CellHint {
    RowSelector,
    /// Plain text, struck through when the record is soft-deleted
    Strikable,
    /// An RFC 3339 timestamp rendered medium-style, struck when deleted
    StrikableDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Start,
    End,
}

#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub id: &'static str,
    pub accessor: Accessor,
    pub cell: CellHint,
    pub align: Align,
    pub sortable: bool,
    pub filterable: bool,
    pub hideable: bool,
}

impl ColumnDef {
    pub fn select() -> Self {
        Self {
            id: "select",
            accessor: Accessor::RowSelector,
            cell: CellHint::RowSelector,
            align: Align::Start,
            sortable: false,
            filterable: false,
            hideable: false,
        }
    }

    pub fn field(id: &'static str) -> Self {
        Self {
            id,
            accessor: Accessor::Field(id),
            cell: CellHint::Strikable,
            align: Align::Start,
            sortable: true,
            filterable: true,
            hideable: true,
        }
    }

    /// `deletedAt` when set, otherwise `createdAt`
    pub fn updated_at() -> Self {
        Self {
            id: "updatedAt",
            accessor: Accessor::Computed(core::updated_at),
            cell: CellHint::StrikableDateTime,
            align: Align::End,
            sortable: true,
            filterable: false,
            hideable: true,
        }
    }

    /// Header label, e.g. `givenName` -> `Given Name`
    pub fn title(&self) -> Option<String> {
        match self.accessor {
            Accessor::RowSelector => None,
            _ => Some(self.id.to_case(Case::Title)),
        }
    }

    pub fn value(&self, record: &Record) -> Value {
        match self.accessor {
            Accessor::RowSelector => Value::Bool(false),
            Accessor::Field(name) => record.get(name).cloned().unwrap_or(Value::Null),
            Accessor::Computed(f) => f(record),
        }
    }
}
