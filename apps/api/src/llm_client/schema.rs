//! Schema descriptors: the closed-world JSON shapes a completion must satisfy.
//!
//! One descriptor exists per task kind and lives beside its adapter. The same
//! descriptor is sent to the model as the structured-output contract and used
//! locally to validate the reply before anything is decoded.

use std::fmt;
use std::sync::OnceLock;

use jsonschema::JSONSchema;
use serde_json::Value;

/// A named, closed JSON-shape description.
pub struct SchemaDescriptor {
    name: &'static str,
    schema: Value,
    /// Compiled on first validation, then reused.
    compiled: OnceLock<Result<JSONSchema, String>>,
}

impl fmt::Debug for SchemaDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaDescriptor")
            .field("name", &self.name)
            .field("schema", &self.schema)
            .finish()
    }
}

impl SchemaDescriptor {
    pub fn new(name: &'static str, schema: Value) -> Self {
        Self {
            name,
            schema,
            compiled: OnceLock::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn schema(&self) -> &Value {
        &self.schema
    }

    /// Validates `instance` against the descriptor.
    /// Returns every violation joined into one message on failure.
    pub fn validate(&self, instance: &Value) -> Result<(), String> {
        let compiled = self.compiled()?;

        if let Err(errors) = compiled.validate(instance) {
            let messages: Vec<String> = errors.map(|e| e.to_string()).collect();
            return Err(messages.join("; "));
        }

        Ok(())
    }

    fn compiled(&self) -> Result<&JSONSchema, String> {
        self.compiled
            .get_or_init(|| {
                JSONSchema::compile(&self.schema)
                    .map_err(|e| format!("schema '{}' does not compile: {e}", self.name))
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Dotted paths of every object in the schema that is not closed, i.e. one
    /// that allows additional properties or leaves a declared property out of
    /// its `required` list.
    pub fn open_objects(&self) -> Vec<String> {
        let mut open = Vec::new();
        collect_open_objects(&self.schema, self.name.to_string(), &mut open);
        open
    }
}

fn collect_open_objects(node: &Value, path: String, open: &mut Vec<String>) {
    let Some(obj) = node.as_object() else {
        return;
    };

    if obj.get("type").and_then(Value::as_str) == Some("object") {
        let closed = obj.get("additionalProperties") == Some(&Value::Bool(false));
        let required: Vec<&str> = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let properties = obj.get("properties").and_then(Value::as_object);
        let all_required = properties
            .map(|props| props.keys().all(|k| required.contains(&k.as_str())))
            .unwrap_or(true);

        if !closed || !all_required {
            open.push(path.clone());
        }

        if let Some(props) = properties {
            for (key, child) in props {
                collect_open_objects(child, format!("{path}.{key}"), open);
            }
        }
    }

    if let Some(items) = obj.get("items") {
        collect_open_objects(items, format!("{path}[]"), open);
    }
}
