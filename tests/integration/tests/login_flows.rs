//! Login outcome tests.

use std::sync::Arc;

use da_auth::{AuthError, UserPassSource};
use da_model::UserRecord;

use crate::common::{self, ada, release_all, UnreachableStore, PASSWORD};

#[tokio::test]
async fn test_valid_credentials_release_attributes() -> anyhow::Result<()> {
    common::init_tracing();
    let source = common::source(release_all(), [ada()]);

    let attributes = source.login("ada", PASSWORD).await?;

    assert_eq!(attributes.get("username"), Some(&["ada".to_string()][..]));
    assert_eq!(
        attributes.get("roles"),
        Some(&["authenticated".to_string(), "researcher".to_string()][..])
    );
    Ok(())
}

#[tokio::test]
async fn test_blocked_account_looks_like_wrong_password() {
    common::init_tracing();
    let blocked = ada().with_blocked(true);
    let source = common::source(release_all(), [blocked]);

    let blocked_err = source.login("ada", PASSWORD).await.unwrap_err();
    let wrong_password_err = source.login("ada", "wrong").await.unwrap_err();
    let unknown_user_err = source.login("babbage", PASSWORD).await.unwrap_err();

    for err in [&blocked_err, &wrong_password_err, &unknown_user_err] {
        assert!(matches!(err, AuthError::InvalidCredentials));
    }
    assert_eq!(blocked_err.to_string(), wrong_password_err.to_string());
    assert_eq!(blocked_err.to_string(), unknown_user_err.to_string());
}

#[tokio::test]
async fn test_user_store_outage_is_not_wrong_password() {
    common::init_tracing();
    let store = Arc::new(UnreachableStore);
    let source = UserPassSource::new(release_all(), store.clone(), store).unwrap();

    let err = source.login("ada", PASSWORD).await.unwrap_err();

    assert!(matches!(err, AuthError::ServiceUnavailable(_)));
    assert!(!err.is_invalid_credentials());
}

#[tokio::test]
async fn test_accounts_are_isolated() -> anyhow::Result<()> {
    common::init_tracing();
    let charles = UserRecord::new("8", "charles").with_email("charles@example.org");
    let source = common::source(release_all(), [ada(), charles]);

    let attributes = source.login("charles", PASSWORD).await?;

    assert_eq!(attributes.get("email"), Some(&["charles@example.org".to_string()][..]));
    assert!(!attributes.contains_key("field_first_name"));
    Ok(())
}
