//! Evaluation of `<Name>Filters` arguments against JSON documents.
//!
//! A [`DocumentMatcher`] is compiled from the same argument set the schema
//! generator exposes for an entity, so every accepted argument name has a
//! counterpart in the generated SDL.

use std::cmp::Ordering;
use std::collections::HashMap;

use docql_codegen::{FilterArgument, FilterOp, filter_arguments};
use docql_core::{Catalog, EntityDefinition, TypeDescriptor};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::{Map, Value};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use tracing::trace;

use crate::error::MatchError;

const OR_ARGUMENT: &str = "OR";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Lt,
    Lte,
    Gt,
    Gte,
}

impl Comparison {
    fn from_op(op: FilterOp) -> Option<Self> {
        match op {
            FilterOp::Lt | FilterOp::ElemLt => Some(Self::Lt),
            FilterOp::Lte | FilterOp::ElemLte => Some(Self::Lte),
            FilterOp::Gt | FilterOp::ElemGt => Some(Self::Gt),
            FilterOp::Gte | FilterOp::ElemGte => Some(Self::Gte),
            _ => None,
        }
    }

    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Lt => ordering.is_lt(),
            Self::Lte => ordering.is_le(),
            Self::Gt => ordering.is_gt(),
            Self::Gte => ordering.is_ge(),
        }
    }
}

#[derive(Debug, Clone)]
struct Bound {
    comparison: Comparison,
    value: Value,
    date: bool,
}

impl Bound {
    fn holds(&self, actual: &Value) -> bool {
        compare(actual, &self.value, self.date).is_some_and(|ord| self.comparison.accepts(ord))
    }
}

#[derive(Debug, Clone, Copy)]
enum TextMode {
    Contains,
    StartsWith,
    EndsWith,
}

#[derive(Debug, Clone)]
enum Condition {
    Equals {
        expected: Value,
        date: bool,
        negate: bool,
    },
    OneOf {
        candidates: Vec<Value>,
        date: bool,
    },
    Text {
        needle: String,
        mode: TextMode,
    },
    Pattern(Regex),
    ContainsElement(Value),
    ContainsAny(Vec<Value>),
    Compare(Bound),
    /// Bounds that a single array element must satisfy together.
    ElementMatch(Vec<Bound>),
    Count(u64),
    Nested(Box<DocumentMatcher>),
}

impl Condition {
    fn holds(&self, actual: Option<&Value>) -> bool {
        let Some(actual) = actual else {
            return matches!(self, Self::Equals { negate: true, .. });
        };

        match self {
            Self::Equals {
                expected,
                date,
                negate,
            } => equals(actual, expected, *date) != *negate,
            Self::OneOf { candidates, date } => candidates.iter().any(|c| equals(actual, c, *date)),
            Self::Text { needle, mode } => any_value(actual, |v| {
                v.as_str().is_some_and(|s| match mode {
                    TextMode::Contains => s.contains(needle.as_str()),
                    TextMode::StartsWith => s.starts_with(needle.as_str()),
                    TextMode::EndsWith => s.ends_with(needle.as_str()),
                })
            }),
            Self::Pattern(regex) => any_value(actual, |v| v.as_str().is_some_and(|s| regex.is_match(s))),
            Self::ContainsElement(element) => elements(actual).iter().any(|v| equals(v, element, false)),
            Self::ContainsAny(candidates) => elements(actual)
                .iter()
                .any(|v| candidates.iter().any(|c| equals(v, c, false))),
            Self::Compare(bound) => any_value(actual, |v| bound.holds(v)),
            Self::ElementMatch(bounds) => elements(actual)
                .iter()
                .any(|v| bounds.iter().all(|b| b.holds(v))),
            Self::Count(count) => actual
                .as_array()
                .is_some_and(|items| items.len() as u64 == *count),
            Self::Nested(matcher) => any_value(actual, |v| matcher.matches(v)),
        }
    }
}

/// A compiled filter for one entity.
#[derive(Debug, Clone, Default)]
pub struct DocumentMatcher {
    conditions: Vec<(String, Condition)>,
    any_of: Vec<DocumentMatcher>,
}

impl DocumentMatcher {
    /// Compiles `arguments` as the `<entity>Filters` input of `entity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is unknown, an argument is not part of
    /// the entity's generated filters, a value has the wrong shape, or a
    /// `_regex` pattern does not compile.
    pub fn compile(
        catalog: &Catalog,
        entity: &str,
        arguments: &Map<String, Value>,
    ) -> Result<Self, MatchError> {
        let definition = catalog
            .get(entity)
            .ok_or_else(|| MatchError::UnknownEntity(entity.to_string()))?;
        compile_entity(catalog, definition, arguments)
    }

    /// Whether `document` satisfies every condition and, when `OR` branches
    /// were supplied, at least one of them.
    pub fn matches(&self, document: &Value) -> bool {
        let Some(object) = document.as_object() else {
            return false;
        };

        self.conditions
            .iter()
            .all(|(field, condition)| condition.holds(object.get(field).filter(|v| !v.is_null())))
            && (self.any_of.is_empty() || self.any_of.iter().any(|m| m.matches(document)))
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty() && self.any_of.is_empty()
    }
}

fn compile_entity(
    catalog: &Catalog,
    entity: &EntityDefinition,
    arguments: &Map<String, Value>,
) -> Result<DocumentMatcher, MatchError> {
    let mut available: HashMap<String, (FilterArgument, &TypeDescriptor)> = HashMap::new();
    for (field, descriptor) in &entity.fields {
        for arg in filter_arguments(field, descriptor).unwrap_or_default() {
            available.insert(arg.name(), (arg, descriptor));
        }
    }

    let mut matcher = DocumentMatcher::default();
    let mut element_bounds: IndexMap<String, Vec<Bound>> = IndexMap::new();

    for (name, value) in arguments {
        if name == OR_ARGUMENT {
            let branches = value
                .as_array()
                .ok_or_else(|| MatchError::invalid_value(name, format!("[{}Filters]", entity.name)))?;
            for branch in branches {
                let branch = branch
                    .as_object()
                    .ok_or_else(|| MatchError::invalid_value(name, format!("{}Filters", entity.name)))?;
                matcher.any_of.push(compile_entity(catalog, entity, branch)?);
            }
            continue;
        }

        let (arg, descriptor) = available
            .get(name)
            .ok_or_else(|| MatchError::unknown_argument(&entity.name, name))?;

        // an explicit null is the same as leaving the argument out
        if value.is_null() {
            continue;
        }
        if !conforms(&arg.type_text, value) {
            return Err(MatchError::invalid_value(name, arg.type_text.as_str()));
        }

        let date = descriptor.is_date();
        if date {
            check_dates(name, value)?;
        }

        let condition = match arg.op {
            FilterOp::Eq | FilterOp::Ne => Condition::Equals {
                expected: value.clone(),
                date,
                negate: arg.op == FilterOp::Ne,
            },
            FilterOp::In => Condition::OneOf {
                candidates: items(value),
                date,
            },
            FilterOp::Contains if matches!(descriptor, TypeDescriptor::ArrayOfScalar(_)) => {
                Condition::ContainsElement(value.clone())
            }
            FilterOp::Contains | FilterOp::TextContains => text(value, TextMode::Contains),
            FilterOp::StartsWith => text(value, TextMode::StartsWith),
            FilterOp::EndsWith => text(value, TextMode::EndsWith),
            FilterOp::Regex => {
                let pattern = value.as_str().unwrap_or_default();
                let regex = Regex::new(pattern).map_err(|source| MatchError::InvalidRegex {
                    argument: name.clone(),
                    source,
                })?;
                Condition::Pattern(regex)
            }
            FilterOp::ContainsAny => Condition::ContainsAny(items(value)),
            FilterOp::Count => {
                let count = value
                    .as_u64()
                    .ok_or_else(|| MatchError::invalid_value(name, "non-negative Int"))?;
                Condition::Count(count)
            }
            FilterOp::Lt | FilterOp::Lte | FilterOp::Gt | FilterOp::Gte => {
                Condition::Compare(bound(arg.op, value, date)?)
            }
            FilterOp::ElemLt | FilterOp::ElemLte | FilterOp::ElemGt | FilterOp::ElemGte => {
                element_bounds
                    .entry(arg.field.clone())
                    .or_default()
                    .push(bound(arg.op, value, date)?);
                continue;
            }
            FilterOp::Nested => {
                let target = descriptor.target().unwrap_or_default();
                let target = catalog
                    .get(target)
                    .ok_or_else(|| MatchError::UnknownEntity(target.to_string()))?;
                let nested = value.as_object().cloned().unwrap_or_default();
                Condition::Nested(Box::new(compile_entity(catalog, target, &nested)?))
            }
        };
        matcher.conditions.push((arg.field.clone(), condition));
    }

    matcher.conditions.extend(
        element_bounds
            .into_iter()
            .map(|(field, bounds)| (field, Condition::ElementMatch(bounds))),
    );

    trace!(
        entity = %entity.name,
        conditions = matcher.conditions.len(),
        branches = matcher.any_of.len(),
        "Compiled document matcher"
    );
    Ok(matcher)
}

fn bound(op: FilterOp, value: &Value, date: bool) -> Result<Bound, MatchError> {
    let comparison = Comparison::from_op(op)
        .ok_or_else(|| MatchError::invalid_value(op.suffix(), "a comparison operator"))?;
    Ok(Bound {
        comparison,
        value: value.clone(),
        date,
    })
}

fn text(value: &Value, mode: TextMode) -> Condition {
    Condition::Text {
        needle: value.as_str().unwrap_or_default().to_string(),
        mode,
    }
}

fn items(value: &Value) -> Vec<Value> {
    value.as_array().cloned().unwrap_or_default()
}

fn elements(value: &Value) -> &[Value] {
    value.as_array().map_or(&[], Vec::as_slice)
}

/// Applies `predicate` to every element of an array, or to a scalar itself.
fn any_value(value: &Value, predicate: impl Fn(&Value) -> bool) -> bool {
    match value {
        Value::Array(items) => items.iter().any(predicate),
        other => predicate(other),
    }
}

/// Whether `value` has the shape of the GraphQL type `type_text`.
fn conforms(type_text: &str, value: &Value) -> bool {
    if let Some(inner) = type_text.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        return value
            .as_array()
            .is_some_and(|items| items.iter().all(|v| conforms(inner, v)));
    }
    match type_text {
        "Int" => value.is_i64() || value.is_u64(),
        "Float" => value.is_number(),
        "String" => value.is_string(),
        "Boolean" => value.is_boolean(),
        "JSON" => true,
        _ => value.is_object(),
    }
}

fn check_dates(argument: &str, value: &Value) -> Result<(), MatchError> {
    let valid = match value {
        Value::String(s) => parse_instant(s).is_some(),
        Value::Array(items) => items
            .iter()
            .all(|v| v.as_str().and_then(parse_instant).is_some()),
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(MatchError::invalid_value(argument, "RFC 3339 or YYYY-MM-DD date"))
    }
}

fn parse_instant(text: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(text, &Rfc3339).ok().or_else(|| {
        Date::parse(text, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|date| date.midnight().assume_utc())
    })
}

fn equals(actual: &Value, expected: &Value, date: bool) -> bool {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::String(a), Value::String(b)) if date => match (parse_instant(a), parse_instant(b)) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equals(x, y, date))
        }
        _ => actual == expected,
    }
}

fn compare(actual: &Value, bound: &Value, date: bool) -> Option<Ordering> {
    match (actual, bound) {
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::String(a), Value::String(b)) if date => Some(parse_instant(a)?.cmp(&parse_instant(b)?)),
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}
