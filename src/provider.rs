//! Definition supply seam.
//!
//! A [`DefinitionProvider`] hands the engine the full set of signature
//! definitions for one scan invocation. Providers must return finite,
//! fully-formed sets; anything structurally wrong with a stored
//! definition is a provider failure, never a scan-time surprise.

use crate::api::SignatureDefinition;
use crate::errors::ProviderError;

/// Supplies the definitions evaluated against every target of a scan.
pub trait DefinitionProvider {
    /// Returns the definition set for one scan invocation.
    ///
    /// The returned set may be empty; an empty set makes every scan a
    /// clean result. Errors mean the backing store failed, and abort the
    /// scan with a failure event.
    fn definitions(&self) -> Result<Vec<SignatureDefinition>, ProviderError>;
}

/// Provider over a prebuilt, already-validated set.
#[derive(Clone, Debug, Default)]
pub struct StaticDefinitionProvider {
    definitions: Vec<SignatureDefinition>,
}

impl StaticDefinitionProvider {
    pub fn new(definitions: Vec<SignatureDefinition>) -> Self {
        Self { definitions }
    }

    /// Parses a JSON array of definitions, re-validating every entry.
    ///
    /// Definitions arriving through deserialization bypass
    /// [`DefinitionBuilder`], so build-time invariants are re-checked
    /// here before any of them can reach the matcher.
    ///
    /// [`DefinitionBuilder`]: crate::api::DefinitionBuilder
    pub fn from_json(json: &str) -> Result<Self, ProviderError> {
        let definitions: Vec<SignatureDefinition> =
            serde_json::from_str(json).map_err(|err| ProviderError::Unavailable {
                detail: format!("malformed definition JSON: {err}"),
            })?;
        for def in &definitions {
            def.validate()?;
        }
        Ok(Self { definitions })
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl DefinitionProvider for StaticDefinitionProvider {
    fn definitions(&self) -> Result<Vec<SignatureDefinition>, ProviderError> {
        Ok(self.definitions.clone())
    }
}

/// Development dataset used by `perform_basic_scan` and the test suite.
///
/// Carries one content-hash signature (a base64-encoded SHA-1 digest, the
/// form hash signatures ship in) and two identity signatures for a known
/// sample package: the full identifier at weight 2 and its vendor prefix
/// at weight 1, so a full-identifier hit scores above a prefix-only hit.
#[derive(Clone, Debug)]
pub struct DevDefinitionProvider {
    definitions: Vec<SignatureDefinition>,
}

/// Base64-encoded SHA-1 digest of the dev sample's content.
const DEV_SAMPLE_HASH_B64: &str = "3YnpxrvKu5hZxi0m/FkpE+pUcwQ=";
/// Identity of the dev sample package.
const DEV_SAMPLE_PACKAGE: &str = "com.example.android.softkeyboard";
/// Vendor prefix of the dev sample package.
const DEV_SAMPLE_PREFIX: &str = "com.example";

impl DevDefinitionProvider {
    pub fn new() -> Self {
        // The dataset is static and valid by construction; a failure here
        // is a defect in the embedded constants.
        let definitions = vec![
            SignatureDefinition::content_hash_b64(DEV_SAMPLE_HASH_B64)
                .and_then(|builder| builder.build())
                .expect("embedded dev hash is valid base64"),
            SignatureDefinition::identity(DEV_SAMPLE_PACKAGE)
                .weight(2)
                .build()
                .expect("embedded dev pattern is non-empty"),
            SignatureDefinition::identity(DEV_SAMPLE_PREFIX)
                .build()
                .expect("embedded dev pattern is non-empty"),
        ];
        Self { definitions }
    }
}

impl Default for DevDefinitionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl DefinitionProvider for DevDefinitionProvider {
    fn definitions(&self) -> Result<Vec<SignatureDefinition>, ProviderError> {
        Ok(self.definitions.clone())
    }
}
