use crate::types::{Example, ToolSchema};
use anyhow::Result;
use schemars::{
    generate::SchemaSettings,
    transform::{RecursiveTransform, Transform},
    JsonSchema, Schema,
};
use serde::Serialize;
use serde_json::Value;

/// A tool callable over MCP, executed against shared state
pub trait Tool<State> {
    fn execute(self, state: &mut State) -> Result<String>;
}

pub trait WithExamples: Sized + Serialize {
    fn examples() -> Option<Vec<Example<Self>>> {
        None
    }
}

fn remove_null(schema: &mut Schema) {
    if let Some(Value::Array(types)) = schema.get_mut("type") {
        types.retain(|v| matches!(v, Value::String(s) if s != "null"));
    }
    if let Some(Value::Array(types)) = schema.get("type") {
        if types.len() == 1 {
            let only = types[0].clone();
            schema.insert("type".to_string(), only);
        }
    }

    if let Some(Value::Array(variants)) = schema.get_mut("enum") {
        variants.retain(|v| !v.is_null());
    }
}

pub trait AsToolSchema {
    fn as_tool_schema() -> ToolSchema;
}

impl<T> AsToolSchema for T
where
    T: JsonSchema + WithExamples,
{
    fn as_tool_schema() -> ToolSchema {
        let settings = SchemaSettings::draft2020_12().with(|s| {
            s.meta_schema = None;
            s.inline_subschemas = true;
        });

        let generator = settings.into_generator();
        let mut schema = generator.into_root_schema_for::<Self>();

        RecursiveTransform(remove_null).transform(&mut schema);

        let name = schema
            .remove("title")
            .and_then(|title| title.as_str().map(String::from))
            .unwrap_or_else(|| T::schema_name().into_owned());
        let description = schema
            .remove("description")
            .and_then(|description| description.as_str().map(String::from));
        schema.remove("$schema");

        if let Some(examples) = Self::examples() {
            match serde_json::to_value(examples) {
                Ok(examples) => {
                    schema.insert("examples".to_string(), examples);
                }
                Err(e) => log::error!("could not serialize examples for {name}: {e}"),
            }
        }

        ToolSchema {
            name,
            description,
            input_schema: schema.into(),
        }
    }
}
