use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::guard::routes;
use crate::models::ModelRegistry;

pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let registry = ModelRegistry::builtin();

    match output_format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&describe(&registry))?),
        OutputFormat::Text => {
            for definition in registry.iter() {
                let columns: Vec<&str> = definition.columns.iter().map(|c| c.id).collect();
                println!(
                    "{:<16} {:<16} {:<16} {}",
                    definition.key,
                    definition.title(),
                    definition.keys.entity_type,
                    columns.join(",")
                );
            }
        }
    }

    Ok(())
}

fn describe(registry: &ModelRegistry) -> Value {
    registry
        .iter()
        .map(|definition| {
            json!({
                "key": definition.key,
                "title": definition.title(),
                "icon": definition.icon,
                "href": routes::model_href(definition.key),
                "entity": definition.keys.entity_type,
                "partition": definition.keys.partition_type,
                "fields": definition.schema.rules().iter().map(|r| r.name).collect::<Vec<_>>(),
                "columns": definition.columns.iter().map(|c| c.id).collect::<Vec<_>>(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_lists_builtin_models() {
        let described = describe(&ModelRegistry::builtin());
        let models = described.as_array().unwrap();

        assert_eq!(models.len(), 2);
        assert_eq!(models[1]["key"], json!("person-metadata"));
        assert_eq!(models[1]["entity"], json!("PersonMetadata"));
        assert_eq!(models[1]["fields"], json!(["givenName", "familyName", "personId"]));
    }
}
