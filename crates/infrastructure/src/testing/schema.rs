//! JSON Schema validation.
//!
//! Supports the subset of draft-07 used by the bundled schemas: `type`
//! (single or list), `enum`, `properties`, `required`,
//! `additionalProperties` (boolean), `items` (single schema), `minItems`,
//! `maxItems`, `minLength`, `maxLength`, `pattern`, `minimum` and `maximum`.
//! Other keywords are ignored.

use std::collections::HashMap;
use std::fmt;

use regex::Regex;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while loading schemas.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The schema document is not valid JSON.
    #[error("schema '{name}' is not valid JSON: {message}")]
    Parse {
        /// Schema name.
        name: String,
        /// Parser message.
        message: String,
    },

    /// The schema root is not an object.
    #[error("schema '{0}' must be a JSON object")]
    NotAnObject(String),

    /// A `pattern` keyword holds an invalid regular expression.
    #[error("schema '{name}' has an invalid pattern '{pattern}': {message}")]
    Pattern {
        /// Schema name.
        name: String,
        /// The offending expression.
        pattern: String,
        /// Compiler message.
        message: String,
    },
}

/// A single place where an instance does not conform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// Location in the instance, e.g. `$[3].email`.
    pub path: String,
    /// What is wrong there.
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A parsed schema document.
///
/// Every `pattern` in the document is compiled once, when it is parsed.
#[derive(Debug, Clone)]
pub struct JsonSchema {
    root: Value,
    patterns: HashMap<String, Regex>,
}

impl JsonSchema {
    /// Parses a schema document.
    ///
    /// # Errors
    ///
    /// Fails if `text` is not JSON, its root is not an object, or one of
    /// its patterns does not compile.
    pub fn parse(name: &str, text: &str) -> Result<Self, SchemaError> {
        let root: Value = serde_json::from_str(text).map_err(|e| SchemaError::Parse {
            name: name.to_string(),
            message: e.to_string(),
        })?;
        if !root.is_object() {
            return Err(SchemaError::NotAnObject(name.to_string()));
        }

        let mut patterns = HashMap::new();
        compile_patterns(name, &root, &mut patterns)?;
        Ok(Self { root, patterns })
    }

    /// Validates `instance`, returning every violation found.
    #[must_use]
    pub fn validate(&self, instance: &Value) -> Vec<SchemaViolation> {
        let mut validator = Validator {
            patterns: &self.patterns,
            violations: Vec::new(),
        };
        validator.node(&self.root, instance, "$");
        validator.violations
    }
}

fn compile_patterns(
    name: &str,
    schema: &Value,
    patterns: &mut HashMap<String, Regex>,
) -> Result<(), SchemaError> {
    match schema {
        Value::Object(map) => {
            if let Some(pattern) = map.get("pattern").and_then(Value::as_str) {
                if !patterns.contains_key(pattern) {
                    let regex = Regex::new(pattern).map_err(|e| SchemaError::Pattern {
                        name: name.to_string(),
                        pattern: pattern.to_string(),
                        message: e.to_string(),
                    })?;
                    patterns.insert(pattern.to_string(), regex);
                }
            }
            for child in map.values() {
                compile_patterns(name, child, patterns)?;
            }
        }
        Value::Array(items) => {
            for child in items {
                compile_patterns(name, child, patterns)?;
            }
        }
        _ => {}
    }
    Ok(())
}

/// Schemas bundled with the binary.
const BUNDLED: [(&str, &str); 3] = [
    (
        "posts-schema.json",
        include_str!("../../schemas/posts-schema.json"),
    ),
    (
        "comments-schema.json",
        include_str!("../../schemas/comments-schema.json"),
    ),
    (
        "people-schema.json",
        include_str!("../../schemas/people-schema.json"),
    ),
];

/// Named collection of schemas.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: HashMap<String, JsonSchema>,
}

impl SchemaCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the schemas bundled with the binary.
    ///
    /// # Errors
    ///
    /// Fails if a bundled document does not parse.
    pub fn bundled() -> Result<Self, SchemaError> {
        let mut catalog = Self::new();
        for (name, text) in BUNDLED {
            catalog.insert(name, JsonSchema::parse(name, text)?);
        }
        Ok(catalog)
    }

    /// Adds or replaces a schema.
    pub fn insert(&mut self, name: impl Into<String>, schema: JsonSchema) {
        self.schemas.insert(name.into(), schema);
    }

    /// Looks up a schema by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&JsonSchema> {
        self.schemas.get(name)
    }

    /// Names of all schemas, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

struct Validator<'a> {
    patterns: &'a HashMap<String, Regex>,
    violations: Vec<SchemaViolation>,
}

impl Validator<'_> {
    fn node(&mut self, schema: &Value, instance: &Value, path: &str) {
        let Some(schema) = schema.as_object() else {
            return;
        };

        if let Some(expected) = schema.get("type") {
            if !type_matches(expected, instance) {
                self.violations.push(violation(
                    path,
                    format!("expected type {}, found {}", expected, type_name(instance)),
                ));
                return;
            }
        }

        if let Some(Value::Array(allowed)) = schema.get("enum") {
            if !allowed.contains(instance) {
                self.violations.push(violation(
                    path,
                    format!("{instance} is not one of {}", Value::Array(allowed.clone())),
                ));
            }
        }

        match instance {
            Value::Object(object) => self.object(schema, object, path),
            Value::Array(items) => self.array(schema, items, path),
            Value::String(s) => self.string(schema, s, path),
            Value::Number(_) => self.number(schema, instance, path),
            Value::Bool(_) | Value::Null => {}
        }
    }

    fn object(&mut self, schema: &Map<String, Value>, object: &Map<String, Value>, path: &str) {
        if let Some(Value::Array(required)) = schema.get("required") {
            for key in required.iter().filter_map(Value::as_str) {
                if !object.contains_key(key) {
                    self.violations
                        .push(violation(path, format!("missing required property '{key}'")));
                }
            }
        }

        let properties = schema.get("properties").and_then(Value::as_object);
        if let Some(properties) = properties {
            for (key, sub_schema) in properties {
                if let Some(value) = object.get(key) {
                    self.node(sub_schema, value, &format!("{path}.{key}"));
                }
            }
        }

        if schema.get("additionalProperties") == Some(&Value::Bool(false)) {
            for key in object.keys() {
                if !properties.is_some_and(|p| p.contains_key(key)) {
                    self.violations
                        .push(violation(path, format!("unexpected property '{key}'")));
                }
            }
        }
    }

    fn array(&mut self, schema: &Map<String, Value>, items: &[Value], path: &str) {
        if let Some(min) = schema.get("minItems").and_then(Value::as_u64) {
            if (items.len() as u64) < min {
                self.violations.push(violation(
                    path,
                    format!("expected at least {min} items, found {}", items.len()),
                ));
            }
        }
        if let Some(max) = schema.get("maxItems").and_then(Value::as_u64) {
            if (items.len() as u64) > max {
                self.violations.push(violation(
                    path,
                    format!("expected at most {max} items, found {}", items.len()),
                ));
            }
        }
        if let Some(item_schema) = schema.get("items") {
            for (index, item) in items.iter().enumerate() {
                self.node(item_schema, item, &format!("{path}[{index}]"));
            }
        }
    }

    fn string(&mut self, schema: &Map<String, Value>, value: &str, path: &str) {
        let length = value.chars().count() as u64;
        if let Some(min) = schema.get("minLength").and_then(Value::as_u64) {
            if length < min {
                self.violations.push(violation(
                    path,
                    format!("expected at least {min} characters, found {length}"),
                ));
            }
        }
        if let Some(max) = schema.get("maxLength").and_then(Value::as_u64) {
            if length > max {
                self.violations.push(violation(
                    path,
                    format!("expected at most {max} characters, found {length}"),
                ));
            }
        }
        if let Some(pattern) = schema.get("pattern").and_then(Value::as_str) {
            let matched = self
                .patterns
                .get(pattern)
                .is_some_and(|regex| regex.is_match(value));
            if !matched {
                self.violations.push(violation(
                    path,
                    format!("'{value}' does not match pattern '{pattern}'"),
                ));
            }
        }
    }

    fn number(&mut self, schema: &Map<String, Value>, instance: &Value, path: &str) {
        let Some(actual) = instance.as_f64() else {
            return;
        };
        if let Some(min) = schema.get("minimum").and_then(Value::as_f64) {
            if actual < min {
                self.violations.push(violation(path, format!("{instance} is below the minimum {min}")));
            }
        }
        if let Some(max) = schema.get("maximum").and_then(Value::as_f64) {
            if actual > max {
                self.violations.push(violation(path, format!("{instance} is above the maximum {max}")));
            }
        }
    }
}

fn type_matches(expected: &Value, instance: &Value) -> bool {
    match expected {
        Value::String(name) => is_type(name, instance),
        Value::Array(names) => names
            .iter()
            .filter_map(Value::as_str)
            .any(|name| is_type(name, instance)),
        _ => true,
    }
}

fn is_type(name: &str, instance: &Value) -> bool {
    match name {
        "object" => instance.is_object(),
        "array" => instance.is_array(),
        "string" => instance.is_string(),
        "boolean" => instance.is_boolean(),
        "null" => instance.is_null(),
        "number" => instance.is_number(),
        "integer" => {
            instance.is_i64()
                || instance.is_u64()
                || instance.as_f64().is_some_and(|f| f.fract().abs() < f64::EPSILON)
        }
        _ => false,
    }
}

const fn type_name(instance: &Value) -> &'static str {
    match instance {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
        Value::Number(_) => "number",
    }
}

fn violation(path: &str, message: String) -> SchemaViolation {
    SchemaViolation {
        path: path.to_string(),
        message,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema(value: &Value) -> JsonSchema {
        JsonSchema::parse("test", &value.to_string()).unwrap()
    }

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = SchemaCatalog::bundled().unwrap();
        assert_eq!(
            catalog.names(),
            vec!["comments-schema.json", "people-schema.json", "posts-schema.json"]
        );
    }

    #[test]
    fn test_posts_schema_accepts_post_list() {
        let catalog = SchemaCatalog::bundled().unwrap();
        let posts = json!([
            {"userId": 1, "id": 1, "title": "t", "body": "b"},
            {"userId": 1, "id": 2, "title": "u", "body": "c"}
        ]);
        assert_eq!(catalog.get("posts-schema.json").unwrap().validate(&posts), vec![]);
    }

    #[test]
    fn test_posts_schema_rejects_missing_field() {
        let catalog = SchemaCatalog::bundled().unwrap();
        let posts = json!([{"userId": 1, "id": 1, "title": "t"}]);
        let violations = catalog.get("posts-schema.json").unwrap().validate(&posts);
        assert_eq!(
            violations,
            vec![SchemaViolation {
                path: "$[0]".to_string(),
                message: "missing required property 'body'".to_string(),
            }]
        );
    }

    #[test]
    fn test_type_mismatch_stops_descent() {
        let s = schema(&json!({"type": "object", "required": ["id"]}));
        let violations = s.validate(&json!([1]));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, r#"expected type "object", found array"#);
    }

    #[test]
    fn test_type_list_and_null() {
        let s = schema(&json!({"type": ["string", "null"]}));
        assert!(s.validate(&Value::Null).is_empty());
        assert!(s.validate(&json!("x")).is_empty());
        assert_eq!(s.validate(&json!(1)).len(), 1);
    }

    #[test]
    fn test_integer_accepts_whole_floats_only() {
        let s = schema(&json!({"type": "integer", "minimum": 1}));
        assert!(s.validate(&json!(3)).is_empty());
        assert!(s.validate(&json!(3.0)).is_empty());
        assert_eq!(s.validate(&json!(3.5)).len(), 1);
        assert_eq!(
            s.validate(&json!(0))[0].message,
            "0 is below the minimum 1"
        );
    }

    #[test]
    fn test_additional_properties_false() {
        let s = schema(&json!({
            "type": "object",
            "properties": {"id": {"type": "integer"}},
            "additionalProperties": false
        }));
        let violations = s.validate(&json!({"id": 1, "extra": true}));
        assert_eq!(violations[0].message, "unexpected property 'extra'");
    }

    #[test]
    fn test_string_constraints() {
        let s = schema(&json!({"type": "string", "minLength": 3, "pattern": "^\\S+@\\S+$"}));
        assert!(s.validate(&json!("a@b.c")).is_empty());
        let violations = s.validate(&json!("ab"));
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_array_bounds_and_enum() {
        let s = schema(&json!({
            "type": "array",
            "minItems": 1,
            "maxItems": 2,
            "items": {"enum": ["a", "b"]}
        }));
        assert_eq!(s.validate(&json!([])).len(), 1);
        assert_eq!(s.validate(&json!(["a", "b", "a"])).len(), 1);
        let violations = s.validate(&json!(["c"]));
        assert_eq!(violations[0].path, "$[0]");
    }

    #[test]
    fn test_patterns_compile_once_at_parse() {
        let s = schema(&json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": {
                    "email": {"type": "string", "pattern": "^\\S+@\\S+$"},
                    "backup": {"type": "string", "pattern": "^\\S+@\\S+$"}
                }
            }
        }));
        assert_eq!(s.patterns.len(), 1);

        let violations = s.validate(&json!([{"email": "a@b"}, {"email": "nobody"}]));
        assert_eq!(
            violations,
            vec![SchemaViolation {
                path: "$[1].email".to_string(),
                message: r"'nobody' does not match pattern '^\S+@\S+$'".to_string(),
            }]
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            JsonSchema::parse("bad", "{"),
            Err(SchemaError::Parse { .. })
        ));
        assert!(matches!(
            JsonSchema::parse("arr", "[]"),
            Err(SchemaError::NotAnObject(_))
        ));
        assert!(matches!(
            JsonSchema::parse("re", r#"{"pattern": "("}"#),
            Err(SchemaError::Pattern { .. })
        ));
    }
}
