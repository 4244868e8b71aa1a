use serde::Serialize;
use serde_json::Value;

use crate::guard::routes;
use crate::models::core::{display_order, is_deleted};
use crate::models::{
    Align, CellHint, ColumnDef, CoreRecordFields, FieldDefault, FieldKind, FieldRule, ModelDefinition, Record, RecordKey,
};

use super::format::{self, DisplayZone};

/// Header shared by every model page
#[derive(Debug, Clone, Serialize)]
pub struct ModelHeader {
    pub key: &'static str,
    pub title: String,
    pub icon: &'static str,
    pub href: String,
}

impl ModelHeader {
    pub fn of(definition: &ModelDefinition) -> Self {
        Self {
            key: definition.key,
            title: definition.title(),
            icon: definition.icon,
            href: routes::model_href(definition.key),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnView {
    pub id: &'static str,
    pub title: Option<String>,
    pub sortable: bool,
    pub filterable: bool,
    pub hideable: bool,
    pub align: Align,
    pub cell: CellHint,
}

impl From<&ColumnDef> for ColumnView {
    fn from(column: &ColumnDef) -> Self {
        Self {
            id: column.id,
            title: column.title(),
            sortable: column.sortable,
            filterable: column.filterable,
            hideable: column.hideable,
            align: column.align,
            cell: column.cell,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CellView {
    pub column: &'static str,
    pub value: Value,
    /// Rendered text; absent for the row selector
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub struck: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RowView {
    /// Absent when the record lacks its identifying fields
    pub key: Option<RecordKey>,
    pub href: Option<String>,
    pub struck: bool,
    pub cells: Vec<CellView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub kind: &'static str,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
}

impl From<&FieldRule> for FieldView {
    fn from(rule: &FieldRule) -> Self {
        let (kind, min) = match &rule.kind {
            FieldKind::Text { .. } => ("text", None),
            FieldKind::Uuid => ("uuid", None),
            FieldKind::Number { min } => ("number", *min),
        };
        let required = match &rule.kind {
            FieldKind::Text { min_len, .. } => *min_len > 0,
            _ => rule.default == FieldDefault::None,
        };
        Self { name: rule.name, kind, required, min }
    }
}

/// Create/edit form driven by the definition's schema
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub action: String,
    pub fields: Vec<FieldView>,
    pub values: Record,
}

impl FormView {
    fn new(definition: &ModelDefinition, values: Record) -> Self {
        Self {
            action: format!("/api/models/{}", definition.key),
            fields: definition.schema.rules().iter().map(FieldView::from).collect(),
            values,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelListView {
    pub model: ModelHeader,
    pub columns: Vec<ColumnView>,
    pub rows: Vec<RowView>,
    pub form: FormView,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelDetailView {
    pub model: ModelHeader,
    pub columns: Vec<ColumnView>,
    pub row: RowView,
    /// Audit fields, when the record carries valid ones
    pub audit: Option<CoreRecordFields>,
    pub form: FormView,
}

/// Renders any registered model type purely from its definition
pub struct ModelView<'a> {
    definition: &'a ModelDefinition,
    zone: DisplayZone,
}

impl<'a> ModelView<'a> {
    pub fn new(definition: &'a ModelDefinition, zone: DisplayZone) -> Self {
        Self { definition, zone }
    }

    pub fn list(&self, mut records: Vec<Record>) -> ModelListView {
        records.sort_by(display_order);

        ModelListView {
            model: ModelHeader::of(self.definition),
            columns: self.columns(),
            rows: records.iter().map(|record| self.row(record)).collect(),
            form: FormView::new(self.definition, self.definition.new_record()),
        }
    }

    pub fn detail(&self, record: &Record) -> ModelDetailView {
        ModelDetailView {
            model: ModelHeader::of(self.definition),
            columns: self.columns(),
            row: self.row(record),
            audit: CoreRecordFields::from_record(record).ok(),
            form: FormView::new(self.definition, self.editable_values(record)),
        }
    }

    fn columns(&self) -> Vec<ColumnView> {
        self.definition.columns.iter().map(ColumnView::from).collect()
    }

    fn row(&self, record: &Record) -> RowView {
        let struck = is_deleted(record);
        let key = self.definition.record_key(record);
        let href = key
            .as_ref()
            .map(|k| format!("{}/{}/{}", routes::model_href(self.definition.key), k.partition_id, k.sort_id));

        RowView {
            key,
            href,
            struck,
            cells: self.definition.columns.iter().map(|c| self.cell(c, record, struck)).collect(),
        }
    }

    fn cell(&self, column: &ColumnDef, record: &Record, deleted: bool) -> CellView {
        let value = column.value(record);
        let (text, struck) = match column.cell {
            CellHint::RowSelector => (None, false),
            CellHint::Strikable => (Some(format::text(&value)), deleted),
            CellHint::StrikableDateTime => (Some(self.zone.format_medium(&format::text(&value))), deleted),
        };

        CellView { column: column.id, value, text, struck }
    }

    /// Schema fields of `record`, falling back to the definition's defaults
    fn editable_values(&self, record: &Record) -> Record {
        let defaults = self.definition.new_record();
        self.definition
            .schema
            .rules()
            .iter()
            .map(|rule| {
                let value = record
                    .get(rule.name)
                    .or_else(|| defaults.get(rule.name))
                    .cloned()
                    .unwrap_or(Value::Null);
                (rule.name.to_string(), value)
            })
            .collect()
    }
}
