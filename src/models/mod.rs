pub mod column;
pub mod core;
pub mod definition;
pub mod log;
pub mod person_metadata;
pub mod registry;
pub mod schema;

pub use column::{Accessor, Align, CellHint, ColumnDef};
pub use self::core::{CoreRecordFields, Record};
pub use definition::{IdentifyingKeys, ModelDefinition, RecordKey};
pub use registry::{ModelRegistry, RegistryError};
pub use schema::{FieldDefault, FieldKind, FieldRule, ValidationErrors, ValidationSchema};
