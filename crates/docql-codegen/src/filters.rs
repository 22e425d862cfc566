//! Filter operators for entity fields.
//!
//! Each field contributes a set of optional arguments to its entity's
//! `<Name>Filters` input. The arguments are combined as a conjunction; the
//! assembler adds the self-referential `OR` list for disjunction.

use docql_core::{ArrayKind, Resolution, ScalarKind, TypeDescriptor, naming};

use crate::sdl::Argument;

/// A filter operator, identified by the suffix appended to the field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Direct equality (no suffix). On arrays, exact ordered equality.
    Eq,
    Ne,
    In,
    Contains,
    StartsWith,
    EndsWith,
    Regex,
    TextContains,
    Lt,
    Lte,
    Gt,
    Gte,
    ElemLt,
    ElemLte,
    ElemGt,
    ElemGte,
    ContainsAny,
    Count,
    /// Filter through an embedded object using the target's `Filters` input.
    Nested,
}

impl FilterOp {
    /// The suffix appended to the field name.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            Self::Eq | Self::Nested => "",
            Self::Ne => "_ne",
            Self::In => "_in",
            Self::Contains => "_contains",
            Self::StartsWith => "_startsWith",
            Self::EndsWith => "_endsWith",
            Self::Regex => "_regex",
            Self::TextContains => "_textContains",
            Self::Lt => "_lt",
            Self::Lte => "_lte",
            Self::Gt => "_gt",
            Self::Gte => "_gte",
            Self::ElemLt => "_emlt",
            Self::ElemLte => "_emlte",
            Self::ElemGt => "_emgt",
            Self::ElemGte => "_emgte",
            Self::ContainsAny => "_containsAny",
            Self::Count => "_count",
        }
    }
}

/// One generated filter argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterArgument {
    pub field: String,
    pub op: FilterOp,
    pub type_text: String,
}

impl FilterArgument {
    fn new(field: &str, op: FilterOp, type_text: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            op,
            type_text: type_text.into(),
        }
    }

    /// The argument name, e.g. `editions_containsAny`.
    #[must_use]
    pub fn name(&self) -> String {
        format!("{}{}", self.field, self.op.suffix())
    }

    #[must_use]
    pub fn to_argument(&self) -> Argument {
        Argument::new(self.name(), self.type_text.clone())
    }
}

const COMPARISONS: [FilterOp; 4] = [FilterOp::Lt, FilterOp::Lte, FilterOp::Gt, FilterOp::Gte];
const ELEMENT_MATCH: [FilterOp; 4] = [
    FilterOp::ElemLt,
    FilterOp::ElemLte,
    FilterOp::ElemGt,
    FilterOp::ElemGte,
];
const STRING_PATTERNS: [FilterOp; 4] = [
    FilterOp::Contains,
    FilterOp::StartsWith,
    FilterOp::EndsWith,
    FilterOp::Regex,
];
const TEXT_SEARCH: [FilterOp; 4] = [
    FilterOp::TextContains,
    FilterOp::StartsWith,
    FilterOp::EndsWith,
    FilterOp::Regex,
];

/// Generates the filter arguments for one field.
///
/// Literal fields are known but opaque, so they yield an empty set.
pub fn filter_arguments(field: &str, descriptor: &TypeDescriptor) -> Resolution<Vec<FilterArgument>> {
    let mut args = Vec::new();
    let push_all = |ops: &[FilterOp], type_text: &str, args: &mut Vec<FilterArgument>| {
        args.extend(ops.iter().map(|op| FilterArgument::new(field, *op, type_text)));
    };

    match descriptor {
        TypeDescriptor::Scalar(ScalarKind::Bool) => {
            push_universal(field, "Boolean", &mut args);
        }
        TypeDescriptor::Scalar(ScalarKind::String) => {
            push_all(&STRING_PATTERNS, "String", &mut args);
            push_universal(field, "String", &mut args);
        }
        TypeDescriptor::Scalar(kind @ (ScalarKind::Int | ScalarKind::Float)) => {
            push_all(&COMPARISONS, kind.graphql_name(), &mut args);
            push_universal(field, kind.graphql_name(), &mut args);
        }
        TypeDescriptor::Date => {
            push_all(&COMPARISONS, "String", &mut args);
            push_universal(field, "String", &mut args);
        }
        TypeDescriptor::Scalar(ScalarKind::Id) => {
            push_universal(field, "String", &mut args);
        }
        TypeDescriptor::Scalar(ScalarKind::Json) => {
            push_all(&[FilterOp::Eq, FilterOp::Ne], "JSON", &mut args);
        }
        TypeDescriptor::ArrayOfScalar(kind @ (ArrayKind::Int | ArrayKind::Float)) => {
            let elem = kind.element_name();
            args.push(FilterArgument::new(field, FilterOp::Count, "Int"));
            push_all(&COMPARISONS, elem, &mut args);
            push_all(&ELEMENT_MATCH, elem, &mut args);
            push_array_block(field, elem, &mut args);
        }
        TypeDescriptor::ArrayOfScalar(ArrayKind::String) => {
            args.push(FilterArgument::new(field, FilterOp::Count, "Int"));
            push_all(&TEXT_SEARCH, "String", &mut args);
            push_array_block(field, "String", &mut args);
        }
        TypeDescriptor::ArrayOfScalar(ArrayKind::Id) => {
            push_array_block(field, "String", &mut args);
        }
        TypeDescriptor::ObjectRef(target) | TypeDescriptor::ArrayOfObjectRef(target) => {
            args.push(FilterArgument::new(field, FilterOp::Count, "Int"));
            args.push(FilterArgument::new(
                field,
                FilterOp::Nested,
                naming::filters_type(target),
            ));
        }
        TypeDescriptor::Literal(_) => {}
        TypeDescriptor::Unsupported(_) => return Resolution::Unsupported,
    }

    Resolution::Supported(args)
}

/// Equality, inequality and membership on a scalar.
fn push_universal(field: &str, type_text: &str, args: &mut Vec<FilterArgument>) {
    args.push(FilterArgument::new(field, FilterOp::Eq, type_text));
    args.push(FilterArgument::new(field, FilterOp::Ne, type_text));
    args.push(FilterArgument::new(field, FilterOp::In, format!("[{type_text}]")));
}

/// Whole-array equality, membership and element containment.
fn push_array_block(field: &str, elem: &str, args: &mut Vec<FilterArgument>) {
    args.push(FilterArgument::new(field, FilterOp::Eq, format!("[{elem}]")));
    args.push(FilterArgument::new(field, FilterOp::In, format!("[[{elem}]]")));
    args.push(FilterArgument::new(field, FilterOp::Contains, elem));
    args.push(FilterArgument::new(field, FilterOp::ContainsAny, format!("[{elem}]")));
    args.push(FilterArgument::new(field, FilterOp::Ne, format!("[{elem}]")));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(field: &str, descriptor: TypeDescriptor) -> Vec<String> {
        filter_arguments(field, &descriptor)
            .supported()
            .unwrap()
            .iter()
            .map(|a| format!("{}: {}", a.name(), a.type_text))
            .collect()
    }

    #[test]
    fn test_bool_filters() {
        assert_eq!(
            rendered("isRead", TypeDescriptor::BOOL),
            vec!["isRead: Boolean", "isRead_ne: Boolean", "isRead_in: [Boolean]"]
        );
    }

    #[test]
    fn test_string_filters() {
        assert_eq!(
            rendered("title", TypeDescriptor::STRING),
            vec![
                "title_contains: String",
                "title_startsWith: String",
                "title_endsWith: String",
                "title_regex: String",
                "title: String",
                "title_ne: String",
                "title_in: [String]",
            ]
        );
    }

    #[test]
    fn test_numeric_and_date_filters() {
        assert_eq!(
            rendered("weight", TypeDescriptor::FLOAT),
            vec![
                "weight_lt: Float",
                "weight_lte: Float",
                "weight_gt: Float",
                "weight_gte: Float",
                "weight: Float",
                "weight_ne: Float",
                "weight_in: [Float]",
            ]
        );
        assert_eq!(
            rendered("published", TypeDescriptor::Date),
            vec![
                "published_lt: String",
                "published_lte: String",
                "published_gt: String",
                "published_gte: String",
                "published: String",
                "published_ne: String",
                "published_in: [String]",
            ]
        );
    }

    #[test]
    fn test_id_and_json_filters() {
        assert_eq!(
            rendered("_id", TypeDescriptor::ID),
            vec!["_id: String", "_id_ne: String", "_id_in: [String]"]
        );
        assert_eq!(
            rendered("meta", TypeDescriptor::JSON),
            vec!["meta: JSON", "meta_ne: JSON"]
        );
    }

    #[test]
    fn test_int_array_filters() {
        assert_eq!(
            rendered("editions", TypeDescriptor::INT_ARRAY),
            vec![
                "editions_count: Int",
                "editions_lt: Int",
                "editions_lte: Int",
                "editions_gt: Int",
                "editions_gte: Int",
                "editions_emlt: Int",
                "editions_emlte: Int",
                "editions_emgt: Int",
                "editions_emgte: Int",
                "editions: [Int]",
                "editions_in: [[Int]]",
                "editions_contains: Int",
                "editions_containsAny: [Int]",
                "editions_ne: [Int]",
            ]
        );
    }

    #[test]
    fn test_string_array_is_union_of_text_and_array_blocks() {
        assert_eq!(
            rendered("tags", TypeDescriptor::STRING_ARRAY),
            vec![
                "tags_count: Int",
                "tags_textContains: String",
                "tags_startsWith: String",
                "tags_endsWith: String",
                "tags_regex: String",
                "tags: [String]",
                "tags_in: [[String]]",
                "tags_contains: String",
                "tags_containsAny: [String]",
                "tags_ne: [String]",
            ]
        );
        assert_eq!(
            rendered("authorIds", TypeDescriptor::ID_ARRAY),
            vec![
                "authorIds: [String]",
                "authorIds_in: [[String]]",
                "authorIds_contains: String",
                "authorIds_containsAny: [String]",
                "authorIds_ne: [String]",
            ]
        );
    }

    #[test]
    fn test_object_filters_delegate_to_target() {
        let expected = vec!["author_count: Int", "author: AuthorFilters"];
        assert_eq!(rendered("author", TypeDescriptor::object("Author")), expected);
        assert_eq!(rendered("author", TypeDescriptor::array_of("Author")), expected);
    }

    #[test]
    fn test_count_is_always_int() {
        for descriptor in [
            TypeDescriptor::FLOAT_ARRAY,
            TypeDescriptor::STRING_ARRAY,
            TypeDescriptor::array_of("Tag"),
        ] {
            let args = filter_arguments("f", &descriptor).supported().unwrap();
            let count = args.iter().find(|a| a.op == FilterOp::Count).unwrap();
            assert_eq!(count.type_text, "Int");
        }
    }

    #[test]
    fn test_literal_and_unsupported() {
        assert_eq!(
            filter_arguments("shape", &TypeDescriptor::literal("Shape")),
            Resolution::Supported(Vec::new())
        );
        assert_eq!(
            filter_arguments("x", &TypeDescriptor::Unsupported("Decimal".into())),
            Resolution::Unsupported
        );
    }
}
