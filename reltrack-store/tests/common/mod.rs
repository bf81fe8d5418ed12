//! Shared fixtures for store tests.

#![allow(dead_code)]

use reltrack_model::{
    DocumentSchema, RelationDescriptor, TrackingOptions, TypeRegistry, VERSIONS_RELATION,
};
use reltrack_store::{Collection, Document};
use tracing_subscriber::EnvFilter;

pub const TEST_DOCUMENT: &str = "test_document";
pub const TEST_EMBEDDED_DOCUMENT: &str = "test_embedded_document";
pub const TEST_RELATED_DOCUMENT: &str = "test_related_document";
pub const WITH_ONLY_OPTION: &str = "test_document_with_only_option";
pub const WITH_EXCEPT_OPTION: &str = "test_document_with_except_option";

/// Installs a test-writer subscriber once; `RUST_LOG` controls verbosity.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn registry() -> TypeRegistry {
    init_tracing();
    let mut reg = TypeRegistry::new();
    reg.register(
        DocumentSchema::new(TEST_DOCUMENT)
            .with_relation(RelationDescriptor::embeds_one("one_document"))
            .with_relation(RelationDescriptor::embeds_many("many_documents"))
            .with_relation(RelationDescriptor::has_one("one_related"))
            .with_relation(RelationDescriptor::has_many("many_related"))
            .with_relation(RelationDescriptor::has_and_belongs_to_many("many_to_many_related"))
            .with_relation(RelationDescriptor::has_many(VERSIONS_RELATION)),
    )
    .unwrap();
    reg.register(
        DocumentSchema::new(TEST_EMBEDDED_DOCUMENT)
            .with_relation(RelationDescriptor::embedded_in(TEST_DOCUMENT))
            .with_relation(RelationDescriptor::embeds_one("note")),
    )
    .unwrap();
    reg.register(
        DocumentSchema::new(TEST_RELATED_DOCUMENT)
            .with_relation(RelationDescriptor::belongs_to(TEST_DOCUMENT)),
    )
    .unwrap();

    reg.derive(TEST_DOCUMENT, DocumentSchema::new(WITH_ONLY_OPTION))
        .unwrap();
    reg.track_relations(WITH_ONLY_OPTION, &TrackingOptions::only(["many_documents"]))
        .unwrap();
    reg.derive(TEST_DOCUMENT, DocumentSchema::new(WITH_EXCEPT_OPTION))
        .unwrap();
    reg.track_relations(WITH_EXCEPT_OPTION, &TrackingOptions::except(["many_documents"]))
        .unwrap();
    reg
}

pub struct Fixture {
    pub registry: TypeRegistry,
    pub documents: Collection,
    pub related: Collection,
}

impl Fixture {
    pub fn new() -> Self {
        let registry = registry();
        let documents = Collection::for_type(&registry, TEST_DOCUMENT).unwrap();
        let related = Collection::for_type(&registry, TEST_RELATED_DOCUMENT).unwrap();
        Self {
            registry,
            documents,
            related,
        }
    }

    pub fn embedded(&self) -> Document {
        Document::new(self.registry.require(TEST_EMBEDDED_DOCUMENT).unwrap())
    }

    pub fn related_document(&self) -> Document {
        Document::new(self.registry.require(TEST_RELATED_DOCUMENT).unwrap())
    }
}
