//! Selection checking and projection

use graphql_parser::query::{Selection, SelectionSet};
use serde_json::{Map, Value};

use crate::server::exposure::graphql::types::{TypeRef, TypeRegistry};

pub const TYPENAME_FIELD: &str = "__typename";

/// Check a selection set against the type of the field it is written on
///
/// Runs before the resolver so that a bad selection never triggers a write.
/// Every problem found is returned.
pub fn validate_selection(
    registry: &TypeRegistry,
    field_name: &str,
    ty: &TypeRef,
    selection: &SelectionSet<'_, String>,
) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    collect_selection_errors(registry, field_name, ty, selection, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_selection_errors(
    registry: &TypeRegistry,
    field_name: &str,
    ty: &TypeRef,
    selection: &SelectionSet<'_, String>,
    errors: &mut Vec<String>,
) {
    if !ty.is_composite() {
        if !selection.items.is_empty() {
            errors.push(format!(
                "Field \"{}\" must not have a selection since type \"{}\" has no subfields.",
                field_name, ty
            ));
        }
        return;
    }

    let type_name = ty.named();
    let Some(object) = registry.object(type_name) else {
        errors.push(format!("Unknown type \"{}\".", type_name));
        return;
    };

    if selection.items.is_empty() {
        errors.push(format!(
            "Field \"{}\" of type \"{}\" must have a selection of subfields.",
            field_name, ty
        ));
        return;
    }

    for item in &selection.items {
        match item {
            Selection::Field(field) if field.name == TYPENAME_FIELD => {}
            Selection::Field(field) => match object.field_type(&field.name) {
                Some(field_ty) => collect_selection_errors(
                    registry,
                    &field.name,
                    field_ty,
                    &field.selection_set,
                    errors,
                ),
                None => errors.push(format!(
                    "Cannot query field \"{}\" on type \"{}\".",
                    field.name, object.name
                )),
            },
            Selection::FragmentSpread(_) | Selection::InlineFragment(_) => {
                errors.push("Fragments are not supported.".to_string())
            }
        }
    }
}

/// Shape a resolved value down to the requested selection
///
/// Fields missing from the resolved value come out as null. The selection
/// must have passed [`validate_selection`].
pub fn project(
    registry: &TypeRegistry,
    ty: &TypeRef,
    value: Value,
    selection: &SelectionSet<'_, String>,
) -> Value {
    match (ty, value) {
        (_, Value::Null) => Value::Null,
        (TypeRef::Scalar(_), value) => value,
        (TypeRef::List(inner), Value::Array(values)) => Value::Array(
            values
                .into_iter()
                .map(|value| project(registry, inner, value, selection))
                .collect(),
        ),
        (TypeRef::Object(name), Value::Object(fields)) => {
            let Some(object) = registry.object(name) else {
                return Value::Null;
            };

            let mut projected = Map::new();
            for item in &selection.items {
                let Selection::Field(field) = item else {
                    continue;
                };
                let key = field.alias.as_ref().unwrap_or(&field.name).clone();

                if field.name == TYPENAME_FIELD {
                    projected.insert(key, Value::String(object.name.to_string()));
                    continue;
                }

                let value = match object.field_type(&field.name) {
                    Some(field_ty) => {
                        // aliases may select the same field twice
                        let raw = fields.get(&field.name).cloned().unwrap_or(Value::Null);
                        project(registry, field_ty, raw, &field.selection_set)
                    }
                    None => Value::Null,
                };
                projected.insert(key, value);
            }
            Value::Object(projected)
        }
        // The resolver produced something that does not fit the declared type
        _ => Value::Null,
    }
}
