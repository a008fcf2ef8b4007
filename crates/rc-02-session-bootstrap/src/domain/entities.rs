//! # Domain Entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Named states of a bootstrap run.
///
/// `Ready` is entered when a session is published; the terminal failure
/// outcomes are not states, they are `Err` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BootstrapStatus {
    /// Nothing in flight.
    Idle,
    /// Fetching the relayer SDK.
    SdkLoading,
    /// SDK present in the registry.
    SdkLoaded,
    /// Running the SDK init routine.
    SdkInitializing,
    /// SDK initialized.
    SdkInitialized,
    /// Building the session.
    Creating,
    /// Session published.
    Ready,
}

impl BootstrapStatus {
    /// Wire name, e.g. `sdk-loading`.
    pub fn as_str(&self) -> &'static str {
        match self {
            BootstrapStatus::Idle => "idle",
            BootstrapStatus::SdkLoading => "sdk-loading",
            BootstrapStatus::SdkLoaded => "sdk-loaded",
            BootstrapStatus::SdkInitializing => "sdk-initializing",
            BootstrapStatus::SdkInitialized => "sdk-initialized",
            BootstrapStatus::Creating => "creating",
            BootstrapStatus::Ready => "ready",
        }
    }
}

impl fmt::Display for BootstrapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations a relayer SDK must offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Capability {
    /// `initSDK`.
    InitSdk,
    /// `createInstance`.
    CreateInstance,
    /// Default network configuration.
    DefaultConfig,
    /// Batched user decrypt on the created instance.
    UserDecrypt,
}

impl Capability {
    /// The required contract, in check order.
    pub const REQUIRED: [Capability; 4] = [
        Capability::InitSdk,
        Capability::CreateInstance,
        Capability::DefaultConfig,
        Capability::UserDecrypt,
    ];
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::InitSdk => "initSDK",
            Capability::CreateInstance => "createInstance",
            Capability::DefaultConfig => "defaultConfig",
            Capability::UserDecrypt => "userDecrypt",
        };
        f.write_str(name)
    }
}

/// Capabilities advertised by a loaded SDK.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    /// Every required capability.
    pub fn full() -> Self {
        Self(Capability::REQUIRED.into_iter().collect())
    }

    /// Builder: drop one capability.
    pub fn without(mut self, capability: Capability) -> Self {
        self.0.remove(&capability);
        self
    }

    /// Returns true if `capability` is advertised.
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    /// First required capability that is missing.
    pub fn first_missing(&self) -> Option<Capability> {
        Capability::REQUIRED
            .into_iter()
            .find(|capability| !self.contains(*capability))
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Options passed to the SDK init routine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkInitOptions {
    /// Relayer API key, if the deployment requires one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}
