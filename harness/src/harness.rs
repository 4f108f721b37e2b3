// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{self, Debug, Formatter};
use std::fs;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use piecrust::{Session, SessionData, VM};
use piecrust_uplink::ContractId;
use tracing::{debug, info};

use crate::bytecode::{TRANSACTIONS, TRANSACTIONS_BYTECODE};
use crate::config::HarnessConfig;
use crate::contract::Contract;
use crate::error::Error;
use crate::factory::ContractFactory;

/// A contract VM with a single line of confirmed state.
///
/// Reads always observe the *confirmed root*, the root of the last committed
/// session. Deployments and mutating calls run in sessions of their own that
/// are committed on confirmation, at which point their root becomes the
/// confirmed root.
///
/// The greeting contract is registered as [`TRANSACTIONS`] on creation.
pub struct Harness {
    vm: VM,
    config: HarnessConfig,
    templates: BTreeMap<String, Cow<'static, [u8]>>,
    root: Mutex<Option<[u8; 32]>>,
    nonce: AtomicU64,
}

impl Debug for Harness {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Harness")
            .field("config", &self.config)
            .field("templates", &self.templates.keys().collect::<Vec<_>>())
            .field("root", &self.root().map(hex::encode))
            .finish_non_exhaustive()
    }
}

impl Harness {
    /// Creates a harness according to the given `config`.
    ///
    /// The VM is backed by a temporary directory unless
    /// [`HarnessConfig::state_dir`] is set. With a [`HarnessConfig::base`],
    /// the harness resumes from that previously committed root.
    ///
    /// # Errors
    /// [`Error::Vm`] if the VM can't be opened or the base root is not among
    /// its commits.
    pub fn new(config: impl Into<HarnessConfig>) -> Result<Self, Error> {
        let config = config.into();
        let vm = match config.state_dir() {
            Some(dir) => VM::new(dir)?,
            None => VM::ephemeral()?,
        };

        if let Some(base) = config.base() {
            // fails early if the VM holds no such commit
            drop(vm.session(SessionData::builder().base(base))?);
            info!(root = %hex::encode(base), "resuming from commit");
        }

        let mut templates = BTreeMap::new();
        templates.insert(
            String::from(TRANSACTIONS),
            Cow::Borrowed(TRANSACTIONS_BYTECODE),
        );

        Ok(Self {
            vm,
            root: Mutex::new(config.base()),
            config,
            templates,
            nonce: AtomicU64::new(0),
        })
    }

    /// Creates a harness with the default configuration.
    pub fn ephemeral() -> Result<Self, Error> {
        Self::new(HarnessConfig::default())
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Registers `bytecode` under `name`, replacing any previous template of
    /// the same name.
    pub fn register<N, B>(&mut self, name: N, bytecode: B)
    where
        N: Into<String>,
        B: Into<Cow<'static, [u8]>>,
    {
        self.templates.insert(name.into(), bytecode.into());
    }

    /// Returns a factory for the contract template called `name`.
    ///
    /// Registered templates take precedence. Otherwise, if an artifacts
    /// directory is configured, the bytecode is read from
    /// `<artifacts_dir>/<name>.wasm`.
    pub fn get_contract_factory(
        &self,
        name: &str,
    ) -> Result<ContractFactory<'_>, Error> {
        if let Some(bytecode) = self.templates.get(name) {
            return Ok(ContractFactory::new(self, name, bytecode.clone()));
        }

        let dir = match self.config.artifacts_dir() {
            Some(dir) if is_artifact_name(name) => dir,
            _ => return Err(Error::UnknownContract(name.into())),
        };

        let path = dir.join(format!("{name}.wasm"));
        let bytecode = fs::read(&path).map_err(|io| Error::Artifact {
            name: name.into(),
            io: Arc::new(io),
        })?;
        debug!(name, path = %path.display(), "loaded contract artifact");

        Ok(ContractFactory::new(self, name, Cow::Owned(bytecode)))
    }

    /// Returns a handle to a contract already deployed under `id`.
    pub fn contract(&self, id: ContractId) -> Contract<'_> {
        Contract::new(self, id)
    }

    /// The confirmed root, or `None` if nothing has been confirmed yet.
    pub fn root(&self) -> Option<[u8; 32]> {
        *self.root.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Opens a session on the confirmed root, returning it together with the
    /// root it was opened on.
    pub(crate) fn session(
        &self,
    ) -> Result<(Session, Option<[u8; 32]>), Error> {
        let base = self.root();
        let data = match base {
            Some(root) => SessionData::builder().base(root),
            None => SessionData::builder(),
        };
        let session = self.vm.session(data)?;
        Ok((session, base))
    }

    /// Commits `session` and adopts its root as the confirmed root.
    ///
    /// The session must have been opened on the current confirmed root,
    /// otherwise it is discarded and [`Error::StaleBase`] is returned.
    pub(crate) fn confirm(
        &self,
        session: Session,
        base: Option<[u8; 32]>,
    ) -> Result<[u8; 32], Error> {
        let mut root =
            self.root.lock().unwrap_or_else(PoisonError::into_inner);
        if *root != base {
            return Err(Error::StaleBase {
                base,
                confirmed: *root,
            });
        }

        let commit = session.commit()?;
        debug!(root = %hex::encode(commit), "session committed");

        *root = Some(commit);
        Ok(commit)
    }

    /// Picks the id of the next contract deployed with `bytecode` on top of
    /// `base`.
    pub(crate) fn next_contract_id(
        &self,
        bytecode: &[u8],
        base: Option<[u8; 32]>,
    ) -> ContractId {
        let nonce = self.nonce.fetch_add(1, Ordering::Relaxed);
        let id = contract_id(bytecode, self.config.owner(), base, nonce);
        info!(%id, nonce, "assigned contract id");
        id
    }
}

/// Derives a contract id from the deployed bytecode, its owner, the root the
/// deployment builds on and a deployment nonce, so that the same bytecode can
/// be deployed repeatedly, also by harnesses resuming from a commit.
fn contract_id(
    bytecode: &[u8],
    owner: &[u8],
    base: Option<[u8; 32]>,
    nonce: u64,
) -> ContractId {
    let mut hasher = blake3::Hasher::new();
    hasher.update(bytecode);
    hasher.update(owner);
    hasher.update(&base.unwrap_or_default());
    hasher.update(&nonce.to_le_bytes());
    ContractId::from_bytes(hasher.finalize().into())
}

fn is_artifact_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_ids_differ_per_nonce_owner_and_base() {
        let code = b"\0asm";
        let owner = [0u8; 32];

        let first = contract_id(code, &owner, None, 0);
        let second = contract_id(code, &owner, None, 1);
        let other_owner = contract_id(code, &[1u8; 32], None, 0);
        let other_base = contract_id(code, &owner, Some([2u8; 32]), 0);

        assert_ne!(first, second);
        assert_ne!(first, other_owner);
        assert_ne!(first, other_base);
        assert_eq!(first, contract_id(code, &owner, None, 0));
    }

    #[test]
    fn artifact_names() {
        assert!(is_artifact_name("transactions"));
        assert!(is_artifact_name("greeter_v2"));

        assert!(!is_artifact_name(""));
        assert!(!is_artifact_name(".."));
        assert!(!is_artifact_name("../secret"));
        assert!(!is_artifact_name("nested/contract"));
        assert!(!is_artifact_name("nested\\contract"));
    }
}
