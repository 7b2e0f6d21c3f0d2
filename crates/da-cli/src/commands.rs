//! Command implementations.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use da_auth::{AuthError, InMemoryDirectory, UserPassSource};
use da_core::BridgeConfig;
use da_federation::{
    AttributeAssembler, AttributeMap, DiagnosticSink, Denylist, MemorySink, ResolutionAnomaly,
    ResolvedValue, SelectionPolicy, TracingSink,
};
use da_model::UserRecord;

use crate::cli::{LoginArgs, ResolveArgs};

/// Forwards to tracing and keeps a copy for the summary line.
struct ReportingSink {
    tracing: TracingSink,
    memory: MemorySink,
}

impl DiagnosticSink for ReportingSink {
    fn anomaly(&self, anomaly: &ResolutionAnomaly) {
        self.tracing.anomaly(anomaly);
        self.memory.anomaly(anomaly);
    }

    fn resolved(&self, key: &str, value: &ResolvedValue) {
        self.tracing.resolved(key, value);
    }
}

/// Resolves a record file under the configured policy.
///
/// Returns the attribute map and the number of anomalies found.
pub fn resolve_record(config: &BridgeConfig, record_path: &Path) -> Result<(AttributeMap, usize)> {
    let content = std::fs::read_to_string(record_path)
        .with_context(|| format!("failed to read {}", record_path.display()))?;
    let record: UserRecord = serde_json::from_str(&content)
        .with_context(|| format!("invalid user record {}", record_path.display()))?;

    let sink = ReportingSink {
        tracing: TracingSink::from_debug_flag(config.debug),
        memory: MemorySink::new(),
    };
    let assembler = AttributeAssembler::new(Denylist::default(), &sink);
    let attributes = assembler.assemble_policy(&record, &SelectionPolicy::from_config(config));

    Ok((attributes, sink.memory.anomalies().len()))
}

/// Runs `da resolve`.
pub fn run_resolve(args: &ResolveArgs, config: &BridgeConfig) -> Result<()> {
    let (attributes, anomalies) = resolve_record(config, &args.record)?;

    println!("{}", serde_json::to_string_pretty(&attributes)?);
    if anomalies > 0 {
        eprintln!("{anomalies} field(s) could not be resolved and were left empty");
    }
    Ok(())
}

/// Runs `da login`. Returns `false` on an authentication failure.
pub async fn run_login(args: &LoginArgs, config: BridgeConfig) -> Result<bool> {
    let directory = Arc::new(
        InMemoryDirectory::load(&args.directory)
            .with_context(|| format!("failed to load {}", args.directory.display()))?,
    );
    let source = UserPassSource::new(config, directory.clone(), directory)?;

    match source.login(&args.username, &args.password).await {
        Ok(attributes) => {
            println!("{}", serde_json::to_string_pretty(&attributes)?);
            Ok(true)
        }
        Err(AuthError::InvalidCredentials) => {
            eprintln!("{}", AuthError::InvalidCredentials);
            Ok(false)
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn resolve_record_counts_anomalies() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "id": "3",
                "uuid": "0191c5a2-8a0e-7c3e-9d43-2f4b8d7e6a10",
                "username": "grace",
                "fields": [
                    {{ "key": "field_team", "value": {{ "type": "scalar", "items": ["compilers", "tools"] }} }},
                    {{ "key": "field_badge", "value": {{ "type": "unsupported", "items": {{ "field_type": "image" }} }} }}
                ]
            }}"#
        )
        .unwrap();

        let config = BridgeConfig::new("/srv/cms")
            .with_attribute("username", "cn")
            .with_attribute("field_team", "ou")
            .with_attribute("field_badge", "badge");

        let (attributes, anomalies) = resolve_record(&config, file.path()).unwrap();

        assert_eq!(anomalies, 1);
        assert_eq!(attributes.get("ou"), Some(&["compilers, tools".to_string()][..]));
        assert_eq!(attributes.get("badge"), Some(&[String::new()][..]));
    }

    #[test]
    fn resolve_record_releases_good_fields_beside_malformed_ones() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "id": "3",
                "uuid": "0191c5a2-8a0e-7c3e-9d43-2f4b8d7e6a10",
                "username": "grace",
                "fields": [
                    {{ "key": "field_team", "value": {{ "type": "scalar", "items": ["compilers"] }} }},
                    {{ "key": "field_born", "value": {{ "type": "datetime", "items": ["1906-12-09"] }} }},
                    {{ "key": "field_bad", "value": {{ "type": "scalar", "items": {{ "oops": 1 }} }} }}
                ]
            }}"#
        )
        .unwrap();

        let config = BridgeConfig::new("/srv/cms")
            .with_attribute("username", "cn")
            .with_attribute("field_team", "ou")
            .with_attribute("field_born", "born")
            .with_attribute("field_bad", "bad");

        let (attributes, anomalies) = resolve_record(&config, file.path()).unwrap();

        assert_eq!(anomalies, 2);
        assert_eq!(attributes.get("cn"), Some(&["grace".to_string()][..]));
        assert_eq!(attributes.get("ou"), Some(&["compilers".to_string()][..]));
        assert_eq!(attributes.get("born"), Some(&[String::new()][..]));
        assert_eq!(attributes.get("bad"), Some(&[String::new()][..]));
    }

    #[test]
    fn resolve_record_reports_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[]").unwrap();

        let err = resolve_record(&BridgeConfig::new("/srv/cms"), file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid user record"));
    }
}
