//! Common test utilities and fixtures.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use da_auth::{InMemoryDirectory, PasswordHasherService, PasswordPolicy, UserPassSource};
use da_core::BridgeConfig;
use da_federation::{
    CredentialVerifier, FederationError, FederationResult, UserRecordLoader,
};
use da_model::{
    AggregateItem, FieldValue, LocalizedItem, NestedRecord, ReferenceItem, ReferencedEntity,
    UserRecord, UNDEFINED_LANGUAGE,
};

/// Password shared by all fixture accounts.
pub const PASSWORD: &str = "correct horse battery staple";

/// Initializes tracing once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("da_auth=debug,da_federation=debug")
        .with_test_writer()
        .try_init();
}

/// A fully populated profile exercising every field shape.
pub fn ada() -> UserRecord {
    let mut organization = HashMap::new();
    organization.insert(
        UNDEFINED_LANGUAGE.to_string(),
        vec![LocalizedItem::rendered("Analytical Engines Ltd")],
    );

    UserRecord::new("7", "ada")
        .with_email("ada@example.org")
        .with_display_name("Ada Lovelace")
        .with_role("authenticated")
        .with_role("researcher")
        .with_timezone("Europe/London")
        .with_field("field_first_name", FieldValue::text(["Ada"]))
        .with_field("field_last_name", FieldValue::text(["Lovelace"]))
        .with_field("field_languages", FieldValue::text(["English", "French", "Italian"]))
        .with_field("field_organization", FieldValue::Localized(organization))
        .with_field(
            "field_employer",
            FieldValue::Reference(vec![ReferenceItem::new(
                "node/12",
                ReferencedEntity::titled("Analytical Society"),
            )]),
        )
        .with_field(
            "field_positions",
            FieldValue::Aggregate(vec![
                AggregateItem::new(
                    "paragraph/1",
                    NestedRecord::new()
                        .with_field("field_title", FieldValue::text(["Translator"]))
                        .with_field("field_year", FieldValue::text(["1843"])),
                ),
                AggregateItem::new(
                    "paragraph/2",
                    NestedRecord::new().with_field("field_title", FieldValue::text(["Author"])),
                ),
            ]),
        )
}

/// Builds a directory with fast hashing holding the given accounts.
pub fn directory(records: impl IntoIterator<Item = UserRecord>) -> Arc<InMemoryDirectory> {
    let directory = InMemoryDirectory::new(PasswordHasherService::new(PasswordPolicy {
        memory_cost: 1024,
        time_cost: 1,
        parallelism: 1,
    }));
    for record in records {
        directory
            .add_user(record, PASSWORD)
            .expect("fixture password hashes");
    }
    Arc::new(directory)
}

/// Builds a source backed by an in-memory directory.
pub fn source(config: BridgeConfig, records: impl IntoIterator<Item = UserRecord>) -> UserPassSource {
    let directory = directory(records);
    UserPassSource::new(config, directory.clone(), directory).expect("valid fixture config")
}

/// A configuration exposing every attribute.
pub fn release_all() -> BridgeConfig {
    BridgeConfig::new("/var/www/site")
}

/// Verifier that accepts every password but whose user store is unreachable.
pub struct UnreachableStore;

#[async_trait]
impl CredentialVerifier for UnreachableStore {
    async fn verify(&self, _username: &str, _password: &str) -> FederationResult<Option<String>> {
        Ok(Some("1".to_string()))
    }
}

#[async_trait]
impl UserRecordLoader for UnreachableStore {
    async fn load_active_user(&self, _username: &str) -> FederationResult<Option<UserRecord>> {
        Err(FederationError::Timeout("user store did not answer in 5s".to_string()))
    }
}
