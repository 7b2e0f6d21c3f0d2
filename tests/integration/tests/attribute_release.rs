//! Attribute release tests through the full login path.

use da_core::BridgeConfig;

use crate::common::{self, ada, release_all, PASSWORD};

fn values(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}

#[tokio::test]
async fn test_release_all_covers_every_field() -> anyhow::Result<()> {
    common::init_tracing();
    let source = common::source(release_all(), [ada()]);

    let attributes = source.login("ada", PASSWORD).await?;

    let keys: Vec<&str> = attributes.keys().collect();
    assert_eq!(
        keys,
        vec![
            "uuid",
            "id",
            "username",
            "email",
            "displayname",
            "roles",
            "timezone",
            "field_first_name",
            "field_last_name",
            "field_languages",
            "field_organization",
            "field_employer",
            "field_positions",
        ]
    );
    assert!(!attributes.contains_key("pass"));
    Ok(())
}

#[tokio::test]
async fn test_configured_attributes_are_renamed_and_flattened() -> anyhow::Result<()> {
    common::init_tracing();
    let config = BridgeConfig::from_toml_str(
        r#"
        store_root = "/var/www/site"
        debug = true

        [[attributes]]
        drupaluservar = "id"
        callit = "uid"

        [[attributes]]
        source = "username"
        output = "cn"

        [[attributes]]
        source = "field_languages"
        output = "languages"

        [[attributes]]
        source = "field_organization"
        output = "ou"

        [[attributes]]
        source = "field_employer"
        output = "employer"

        [[attributes]]
        source = "field_positions"
        output = "positions"

        [[attributes]]
        source = "pass"
        output = "userPassword"
        "#,
    )?;
    let source = common::source(config, [ada()]);

    let attributes = source.login("ada", PASSWORD).await?;

    assert_eq!(
        attributes.keys().collect::<Vec<_>>(),
        vec!["uid", "cn", "languages", "ou", "employer", "positions"]
    );
    assert_eq!(attributes.get("uid"), Some(values(&["7"]).as_slice()));
    assert_eq!(attributes.get("cn"), Some(values(&["ada"]).as_slice()));
    assert_eq!(
        attributes.get("languages"),
        Some(values(&["English, French, Italian"]).as_slice())
    );
    assert_eq!(
        attributes.get("ou"),
        Some(values(&["Analytical Engines Ltd"]).as_slice())
    );
    assert_eq!(
        attributes.get("employer"),
        Some(values(&["Analytical Society"]).as_slice())
    );
    assert_eq!(
        attributes.get("positions"),
        Some(values(&["Translator : 1843", "Author"]).as_slice())
    );
    assert!(!attributes.contains_key("userPassword"));
    Ok(())
}

#[tokio::test]
async fn test_release_map_serializes_for_assertion_layer() -> anyhow::Result<()> {
    common::init_tracing();
    let config = release_all()
        .with_attribute("username", "cn")
        .with_attribute("email", "mail")
        .with_attribute("email", "cn");
    let source = common::source(config, [ada()]);

    let attributes = source.login("ada", PASSWORD).await?;
    let json = serde_json::to_value(&attributes)?;

    assert_eq!(
        json,
        serde_json::json!({
            "cn": ["ada@example.org"],
            "mail": ["ada@example.org"],
        })
    );
    Ok(())
}
