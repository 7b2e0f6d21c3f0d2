//! Username/password authentication source.
//!
//! ## NIST 800-53 Rev5: IA-6 (Authentication Feedback)
//!
//! Wrong passwords, unknown users and blocked accounts all surface as
//! [`AuthError::InvalidCredentials`]. The real reason is only logged.

use std::sync::Arc;

use da_core::BridgeConfig;
use da_federation::{
    AttributeAssembler, AttributeMap, CredentialVerifier, Denylist, SelectionPolicy, TracingSink,
    UserRecordLoader,
};

use crate::error::{AuthError, AuthResult};

/// Authenticates users against the host application and releases their
/// attributes.
pub struct UserPassSource {
    policy: SelectionPolicy,
    denylist: Denylist,
    sink: TracingSink,
    verifier: Arc<dyn CredentialVerifier>,
    loader: Arc<dyn UserRecordLoader>,
}

impl UserPassSource {
    /// Creates a source from validated configuration and its collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Configuration`] if the configuration is invalid.
    pub fn new(
        config: BridgeConfig,
        verifier: Arc<dyn CredentialVerifier>,
        loader: Arc<dyn UserRecordLoader>,
    ) -> AuthResult<Self> {
        config.validate()?;

        Ok(Self {
            policy: SelectionPolicy::from_config(&config),
            denylist: Denylist::default(),
            sink: TracingSink::from_debug_flag(config.debug),
            verifier,
            loader,
        })
    }

    /// Returns the attribute selection policy in effect.
    #[must_use]
    pub const fn policy(&self) -> &SelectionPolicy {
        &self.policy
    }

    /// Attempts a login and returns the released attributes.
    ///
    /// # Errors
    ///
    /// - [`AuthError::InvalidCredentials`] for any authentication failure.
    /// - [`AuthError::ServiceUnavailable`] if a collaborator fails.
    pub async fn login(&self, username: &str, password: &str) -> AuthResult<AttributeMap> {
        let user_id = match self.verifier.verify(username, password).await {
            Ok(Some(id)) => id,
            Ok(None) => {
                tracing::info!(username = %username, "Login rejected: credentials not accepted");
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(username = %username, error = %e, "Credential service failed");
                return Err(e.into());
            }
        };

        let record = match self.loader.load_active_user(username).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                tracing::info!(
                    username = %username,
                    user_id = %user_id,
                    "Login rejected: no active account"
                );
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => {
                tracing::error!(username = %username, error = %e, "User store lookup failed");
                return Err(e.into());
            }
        };

        if !record.is_active() {
            tracing::info!(username = %username, user_id = %user_id, "Login rejected: account blocked");
            return Err(AuthError::InvalidCredentials);
        }

        let assembler = AttributeAssembler::new(self.denylist.clone(), &self.sink);
        let attributes = assembler.assemble_policy(&record, &self.policy);

        tracing::info!(
            username = %username,
            user_id = %user_id,
            attributes = attributes.len(),
            "Login succeeded"
        );

        Ok(attributes)
    }
}
