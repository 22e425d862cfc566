//! End-to-end generation of a small library schema.

use async_graphql_parser::parse_schema;
use async_graphql_parser::types::{ServiceDocument, TypeKind, TypeSystemDefinition};
use docql_codegen::{AuxiliarySchemas, CodegenConfig, NoFragments, Project};
use docql_core::{Catalog, EntityDefinition, RelationshipDescriptor, TypeDescriptor};

fn library() -> Catalog {
    let book = EntityDefinition::builder("Book")
        .table(true)
        .field("title", TypeDescriptor::STRING)
        .field("pages", TypeDescriptor::INT)
        .field("weight", TypeDescriptor::FLOAT)
        .field("isRead", TypeDescriptor::BOOL)
        .field("published", TypeDescriptor::Date)
        .field("editions", TypeDescriptor::INT_ARRAY)
        .field("keywords", TypeDescriptor::STRING_ARRAY)
        .field("prices", TypeDescriptor::FLOAT_ARRAY)
        .field("meta", TypeDescriptor::JSON)
        .field("mainAuthor", TypeDescriptor::object("Author"))
        .field("authors", TypeDescriptor::array_of("Author"))
        .relationship("subjects", RelationshipDescriptor::many("Subject"))
        .relationship("publisher", RelationshipDescriptor::one("Publisher"))
        .resolved_field("score", "Float")
        .manual_query_arg("ManualArg", "String")
        .schema_source("./bookExtras")
        .build();
    let author = EntityDefinition::builder("Author")
        .field("name", TypeDescriptor::STRING)
        .field("birthYear", TypeDescriptor::INT)
        .build();
    let subject = EntityDefinition::builder("Subject")
        .table(true)
        .field("name", TypeDescriptor::STRING)
        .field("relatedIds", TypeDescriptor::ID_ARRAY)
        .build();
    let publisher = EntityDefinition::builder("Publisher")
        .table(true)
        .field("name", TypeDescriptor::STRING)
        .override_operation("deletePublisher")
        .build();

    Catalog::from_entities([book, author, subject, publisher]).expect("catalog should be valid")
}

fn extras() -> AuxiliarySchemas {
    AuxiliarySchemas::new().with_source(
        "./bookExtras",
        Some("  bookStats(_id: String): Int"),
        Some("  reindexBooks: Boolean"),
    )
}

fn generate() -> String {
    Project::new(CodegenConfig::default())
        .build(&library(), &extras())
        .expect("schema generation should succeed")
        .to_sdl()
}

fn parse(sdl: &str) -> ServiceDocument {
    parse_schema(sdl).unwrap_or_else(|e| panic!("generated SDL should parse: {e}\n{sdl}"))
}

fn type_kind<'a>(doc: &'a ServiceDocument, name: &str) -> &'a TypeKind {
    doc.definitions
        .iter()
        .find_map(|def| match def {
            TypeSystemDefinition::Type(ty) if ty.node.name.node.as_str() == name => Some(&ty.node.kind),
            _ => None,
        })
        .unwrap_or_else(|| panic!("type {name} should be declared"))
}

fn object_fields(doc: &ServiceDocument, name: &str) -> Vec<String> {
    match type_kind(doc, name) {
        TypeKind::Object(object) => object
            .fields
            .iter()
            .map(|f| f.node.name.node.as_str().to_string())
            .collect(),
        _ => panic!("{name} should be an object type"),
    }
}

fn field_arguments(doc: &ServiceDocument, type_name: &str, field: &str) -> Vec<String> {
    match type_kind(doc, type_name) {
        TypeKind::Object(object) => object
            .fields
            .iter()
            .find(|f| f.node.name.node.as_str() == field)
            .map(|f| {
                f.node
                    .arguments
                    .iter()
                    .map(|a| a.node.name.node.as_str().to_string())
                    .collect()
            })
            .unwrap_or_else(|| panic!("{type_name}.{field} should exist")),
        _ => panic!("{type_name} should be an object type"),
    }
}

fn input_fields(doc: &ServiceDocument, name: &str) -> Vec<String> {
    match type_kind(doc, name) {
        TypeKind::InputObject(input) => input
            .fields
            .iter()
            .map(|f| f.node.name.node.as_str().to_string())
            .collect(),
        _ => panic!("{name} should be an input type"),
    }
}

#[test]
fn test_generated_schema_parses() {
    let sdl = generate();
    let doc = parse(&sdl);

    for name in [
        "QueryResultsMetadata",
        "Book",
        "BookQueryResults",
        "Author",
        "Subject",
        "Publisher",
        "Query",
        "Mutation",
    ] {
        assert!(matches!(type_kind(&doc, name), TypeKind::Object(_)));
    }
    for name in [
        "IntArrayUpdate",
        "BookInput",
        "BookMutationInput",
        "AuthorArrayMutationInput",
        "BookSort",
        "BookFilters",
    ] {
        assert!(matches!(type_kind(&doc, name), TypeKind::InputObject(_)));
    }
}

#[test]
fn test_relationship_resolver_arguments() {
    let doc = parse(&generate());

    assert_eq!(field_arguments(&doc, "Book", "subjects"), vec!["SORT", "SORTS"]);
    assert!(field_arguments(&doc, "Book", "publisher").is_empty());
}

#[test]
fn test_int_array_filter_arguments() {
    let doc = parse(&generate());
    let editions: Vec<String> = input_fields(&doc, "BookFilters")
        .into_iter()
        .filter(|name| name == "editions" || name.starts_with("editions_"))
        .collect();

    assert_eq!(
        editions,
        vec![
            "editions_count",
            "editions_lt",
            "editions_lte",
            "editions_gt",
            "editions_gte",
            "editions_emlt",
            "editions_emlte",
            "editions_emgt",
            "editions_emgte",
            "editions",
            "editions_in",
            "editions_contains",
            "editions_containsAny",
            "editions_ne",
        ]
    );
}

#[test]
fn test_root_operations() {
    let doc = parse(&generate());

    let queries = object_fields(&doc, "Query");
    assert_eq!(
        queries,
        vec![
            "allBooks",
            "getBook",
            "bookStats",
            "allSubjects",
            "getSubject",
            "allPublishers",
            "getPublisher",
        ]
    );

    let mutations = object_fields(&doc, "Mutation");
    assert!(mutations.contains(&"reindexBooks".to_string()));
    assert!(mutations.contains(&"updateSubjectsBulk".to_string()));
    assert!(mutations.contains(&"createPublisher".to_string()));
    assert!(!mutations.contains(&"deletePublisher".to_string()));

    let all_books = field_arguments(&doc, "Query", "allBooks");
    assert!(all_books.ends_with(&[
        "PAGE_SIZE".to_string(),
        "published_format".to_string(),
        "ManualArg".to_string(),
    ]));
}

#[test]
fn test_embedded_entity_has_no_root_operations() {
    let doc = parse(&generate());

    let queries = object_fields(&doc, "Query");
    assert!(queries.iter().all(|q| !q.contains("Author")));
    assert!(doc.definitions.iter().all(|def| match def {
        TypeSystemDefinition::Type(ty) => ty.node.name.node.as_str() != "AuthorQueryResults",
        _ => true,
    }));
}

#[test]
fn test_generation_is_deterministic() {
    assert_eq!(generate(), generate());
}

#[test]
fn test_entities_decoded_from_json() {
    let entities: Vec<EntityDefinition> = serde_json::from_str(
        r#"[
            {
                "name": "Book",
                "table": true,
                "fields": {
                    "title": "String",
                    "editions": "IntArray",
                    "mainAuthor": { "object": "Author" }
                },
                "relationships": {
                    "subjects": { "target": "Subject", "isArray": true }
                },
                "manualQueryArgs": [{ "name": "ManualArg", "type": "String" }],
                "extras": { "overrides": ["deleteBook"] }
            },
            {
                "name": "Author",
                "fields": { "name": "String" }
            },
            {
                "name": "Subject",
                "table": true,
                "fields": { "name": "String" }
            }
        ]"#,
    )
    .expect("entities should decode");

    let catalog = Catalog::from_entities(entities).expect("catalog should be valid");
    let schema = Project::default()
        .build(&catalog, &NoFragments)
        .expect("schema generation should succeed");

    let book = schema.entity("Book").expect("Book should be generated");
    assert_eq!(
        book.declaration("Book")
            .and_then(|d| d.fields.first())
            .map(|f| f.name.as_str()),
        Some("_id")
    );
    assert!(book.mutation("deleteBook").is_none());
    assert!(book.query("allBooks").and_then(|q| q.argument("ManualArg")).is_some());

    let doc = parse(&schema.to_sdl());
    assert_eq!(field_arguments(&doc, "Book", "subjects"), vec!["SORT", "SORTS"]);
}

#[test]
fn test_unsupported_descriptor_is_reported() {
    let entities: Vec<EntityDefinition> = serde_json::from_str(
        r#"[{ "name": "Book", "table": true, "fields": { "title": "String", "price": "Decimal" } }]"#,
    )
    .expect("entities should decode");
    let catalog = Catalog::from_entities(entities).expect("catalog should be valid");

    let schema = Project::default()
        .build(&catalog, &NoFragments)
        .expect("permissive generation should succeed");
    let diagnostics: Vec<String> = schema.diagnostics().map(ToString::to_string).collect();
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("price"));
    assert!(!schema.to_sdl().contains("price"));

    let strict = Project::new(CodegenConfig {
        strict: true,
        ..Default::default()
    });
    assert!(strict.build(&catalog, &NoFragments).is_err());
}
