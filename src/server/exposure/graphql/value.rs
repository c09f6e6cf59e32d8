//! Document values and argument coercion
//!
//! Argument literals arrive untyped. They are first lowered to a
//! [`DocumentValue`], then coerced against the field's [`ArgumentDef`]s into
//! typed [`Arguments`]. An optional argument that was left out stays absent
//! from [`Arguments`], which is how resolvers tell "not supplied" apart from
//! "supplied empty".

use super::types::{ArgumentDef, ScalarType};
use graphql_parser::query::{Value as GqlValue, VariableDefinition};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Request variables, keyed by name without the `$`
pub type Variables = HashMap<String, Value>;

/// A literal as written in the document (or bound through a variable)
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentValue {
    Int(i64),
    String(String),
    Null,
    /// Any other kind of literal; carries the kind name for error messages
    Other(&'static str),
}

impl DocumentValue {
    pub fn from_literal(value: &GqlValue<'_, String>, variables: &Variables) -> Self {
        match value {
            GqlValue::Int(number) => match number.as_i64() {
                Some(i) => DocumentValue::Int(i),
                None => DocumentValue::Other("Int"),
            },
            GqlValue::String(s) => DocumentValue::String(s.clone()),
            GqlValue::Null => DocumentValue::Null,
            GqlValue::Variable(name) => variables
                .get(name)
                .map(DocumentValue::from_json)
                .unwrap_or(DocumentValue::Null),
            GqlValue::Float(_) => DocumentValue::Other("Float"),
            GqlValue::Boolean(_) => DocumentValue::Other("Boolean"),
            GqlValue::Enum(_) => DocumentValue::Other("Enum"),
            GqlValue::List(_) => DocumentValue::Other("List"),
            GqlValue::Object(_) => DocumentValue::Other("Object"),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => DocumentValue::Null,
            Value::String(s) => DocumentValue::String(s.clone()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => DocumentValue::Int(i),
                None => DocumentValue::Other("Float"),
            },
            Value::Bool(_) => DocumentValue::Other("Boolean"),
            Value::Array(_) => DocumentValue::Other("List"),
            Value::Object(_) => DocumentValue::Other("Object"),
        }
    }

    fn describe(&self) -> String {
        match self {
            DocumentValue::Int(i) => i.to_string(),
            DocumentValue::String(s) => format!("{:?}", s),
            DocumentValue::Null => "null".to_string(),
            DocumentValue::Other(kind) => format!("a {} value", kind),
        }
    }
}

/// A coerced argument value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentValue {
    Int(i32),
    String(String),
}

/// Coerced arguments of one field; absent entries were not supplied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: HashMap<&'static str, ArgumentValue>,
}

impl Arguments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, value: ArgumentValue) {
        self.values.insert(name, value);
    }

    pub fn with(mut self, name: &'static str, value: ArgumentValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn int(&self, name: &str) -> Option<i32> {
        match self.values.get(name) {
            Some(ArgumentValue::Int(i)) => Some(*i),
            _ => None,
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgumentValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn is_supplied(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

fn coerce_scalar(ty: ScalarType, value: &DocumentValue) -> Option<ArgumentValue> {
    match (ty, value) {
        (ScalarType::Int, DocumentValue::Int(i)) => i32::try_from(*i).ok().map(ArgumentValue::Int),
        (ScalarType::String, DocumentValue::String(s)) => Some(ArgumentValue::String(s.clone())),
        _ => None,
    }
}

/// Coerce one argument
///
/// - required and missing/null/mistyped: error
/// - optional and missing/null/mistyped: `Ok(None)`, i.e. not supplied
pub fn coerce_argument(
    field: &str,
    def: &ArgumentDef,
    value: Option<&DocumentValue>,
) -> Result<Option<ArgumentValue>, String> {
    let null = DocumentValue::Null;
    let value = value.unwrap_or(&null);

    if let Some(coerced) = coerce_scalar(def.ty, value) {
        return Ok(Some(coerced));
    }
    if !def.required {
        return Ok(None);
    }

    match value {
        DocumentValue::Null => Err(format!(
            "Field \"{}\" argument \"{}\" of type \"{}\" is required but not provided.",
            field,
            def.name,
            def.type_name()
        )),
        other => Err(format!(
            "Argument \"{}\" has invalid value {}. Expected type \"{}\".",
            def.name,
            other.describe(),
            def.type_name()
        )),
    }
}

/// Coerce every argument written on a field against its declarations
///
/// All problems are reported, not only the first one.
pub fn coerce_arguments(
    field: &str,
    defs: &[ArgumentDef],
    literals: &[(String, GqlValue<'_, String>)],
    variables: &Variables,
) -> Result<Arguments, Vec<String>> {
    let mut errors = Vec::new();

    for (name, _) in literals {
        if !defs.iter().any(|def| def.name == name.as_str()) {
            errors.push(format!(
                "Unknown argument \"{}\" on field \"{}\".",
                name, field
            ));
        }
    }

    let mut arguments = Arguments::new();
    for def in defs {
        let value = literals
            .iter()
            .find(|(name, _)| name.as_str() == def.name)
            .map(|(_, literal)| DocumentValue::from_literal(literal, variables));

        match coerce_argument(field, def, value.as_ref()) {
            Ok(Some(coerced)) => arguments.insert(def.name, coerced),
            Ok(None) => {}
            Err(message) => errors.push(message),
        }
    }

    if errors.is_empty() {
        Ok(arguments)
    } else {
        Err(errors)
    }
}

/// Fill in declared defaults for variables the request left unbound
pub fn with_defaults(
    variables: &Variables,
    definitions: &[VariableDefinition<'_, String>],
) -> Variables {
    let mut bound = variables.clone();
    for definition in definitions {
        if let Some(default) = &definition.default_value {
            bound
                .entry(definition.name.clone())
                .or_insert_with(|| constant_to_json(default));
        }
    }
    bound
}

fn constant_to_json(value: &GqlValue<'_, String>) -> Value {
    match value {
        GqlValue::Int(number) => number.as_i64().map(Value::from).unwrap_or(Value::Null),
        GqlValue::Float(f) => Value::from(*f),
        GqlValue::String(s) | GqlValue::Enum(s) => Value::String(s.clone()),
        GqlValue::Boolean(b) => Value::Bool(*b),
        GqlValue::List(items) => Value::Array(items.iter().map(constant_to_json).collect()),
        GqlValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(name, field)| (name.clone(), constant_to_json(field)))
                .collect::<Map<_, _>>(),
        ),
        GqlValue::Null | GqlValue::Variable(_) => Value::Null,
    }
}
