// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::path::{Path, PathBuf};

/// Owner assigned to deployed contracts unless configured otherwise.
pub const DEFAULT_OWNER: [u8; 32] = [0u8; 32];
/// Gas available to a contract's `init` during deployment.
pub const DEFAULT_DEPLOY_GAS_LIMIT: u64 = 10_000_000;
/// Gas available to each read or mutating call.
pub const DEFAULT_CALL_GAS_LIMIT: u64 = 1_000_000;

/// Configuration of a [`Harness`].
///
/// Built through [`HarnessConfig::builder`]:
///
/// ```
/// use transactions_harness::HarnessConfig;
///
/// let config = HarnessConfig::builder()
///     .owner([7u8; 32])
///     .call_gas_limit(2_000_000)
///     .build();
///
/// assert_eq!(config.call_gas_limit(), 2_000_000);
/// ```
///
/// [`Harness`]: crate::Harness
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    owner: Vec<u8>,
    deploy_gas_limit: u64,
    call_gas_limit: u64,
    state_dir: Option<PathBuf>,
    artifacts_dir: Option<PathBuf>,
    base: Option<[u8; 32]>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl HarnessConfig {
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder {
            owner: DEFAULT_OWNER.to_vec(),
            deploy_gas_limit: DEFAULT_DEPLOY_GAS_LIMIT,
            call_gas_limit: DEFAULT_CALL_GAS_LIMIT,
            state_dir: None,
            artifacts_dir: None,
            base: None,
        }
    }

    /// Owner of every contract deployed through the harness.
    pub fn owner(&self) -> &[u8] {
        &self.owner
    }

    pub fn deploy_gas_limit(&self) -> u64 {
        self.deploy_gas_limit
    }

    pub fn call_gas_limit(&self) -> u64 {
        self.call_gas_limit
    }

    /// Directory the VM persists its state under, if any.
    pub fn state_dir(&self) -> Option<&Path> {
        self.state_dir.as_deref()
    }

    pub fn artifacts_dir(&self) -> Option<&Path> {
        self.artifacts_dir.as_deref()
    }

    /// Root the harness starts out confirmed on. `None` means genesis.
    pub fn base(&self) -> Option<[u8; 32]> {
        self.base
    }
}

impl From<HarnessConfigBuilder> for HarnessConfig {
    fn from(builder: HarnessConfigBuilder) -> Self {
        builder.build()
    }
}

/// Builder for [`HarnessConfig`].
#[derive(Debug, Clone)]
pub struct HarnessConfigBuilder {
    owner: Vec<u8>,
    deploy_gas_limit: u64,
    call_gas_limit: u64,
    state_dir: Option<PathBuf>,
    artifacts_dir: Option<PathBuf>,
    base: Option<[u8; 32]>,
}

impl HarnessConfigBuilder {
    /// Set the owner of every contract deployed through the harness.
    pub fn owner(mut self, owner: impl Into<Vec<u8>>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Set the gas limit for contract initialization at deployment.
    pub fn deploy_gas_limit(mut self, limit: u64) -> Self {
        self.deploy_gas_limit = limit;
        self
    }

    /// Set the gas limit for reads and mutating calls.
    pub fn call_gas_limit(mut self, limit: u64) -> Self {
        self.call_gas_limit = limit;
        self
    }

    /// Persist VM state under `dir` instead of a temporary directory.
    pub fn state_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.state_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Resolve unregistered contract names to `<dir>/<name>.wasm`.
    pub fn artifacts_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.artifacts_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Resume from a root committed earlier in the VM's `state_dir`.
    pub fn base(mut self, root: [u8; 32]) -> Self {
        self.base = Some(root);
        self
    }

    pub fn build(self) -> HarnessConfig {
        HarnessConfig {
            owner: self.owner,
            deploy_gas_limit: self.deploy_gas_limit,
            call_gas_limit: self.call_gas_limit,
            state_dir: self.state_dir,
            artifacts_dir: self.artifacts_dir,
            base: self.base,
        }
    }
}
