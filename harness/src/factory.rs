// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::borrow::Cow;
use std::fmt::{self, Debug, Formatter};

use piecrust::{ContractData, Session};
use piecrust_uplink::{ContractId, StandardBufSerializer};
use rkyv::Serialize;
use tracing::info;

use crate::contract::Contract;
use crate::error::Error;
use crate::harness::Harness;

/// Deploys instances of a named contract template.
///
/// Obtained through [`Harness::get_contract_factory`].
#[derive(Clone)]
pub struct ContractFactory<'h> {
    harness: &'h Harness,
    name: String,
    bytecode: Cow<'static, [u8]>,
}

impl Debug for ContractFactory<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContractFactory")
            .field("name", &self.name)
            .field("bytecode_len", &self.bytecode.len())
            .finish()
    }
}

impl<'h> ContractFactory<'h> {
    pub(crate) fn new(
        harness: &'h Harness,
        name: &str,
        bytecode: Cow<'static, [u8]>,
    ) -> Self {
        Self {
            harness,
            name: name.into(),
            bytecode,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytecode(&self) -> &[u8] {
        &self.bytecode
    }

    /// Deploy a new instance, passing `init_arg` to the contract's `init`.
    ///
    /// The deployment runs in a session of its own and is only visible to
    /// reads once [`PendingDeployment::deployed`] confirms it.
    ///
    /// # Errors
    /// [`Error::DeploymentFailed`] if the VM rejects the bytecode or the
    /// contract's `init` fails.
    pub fn deploy<A>(
        &self,
        init_arg: &A,
    ) -> Result<PendingDeployment<'h>, Error>
    where
        A: for<'b> Serialize<StandardBufSerializer<'b>>,
    {
        let (mut session, base) = self.harness.session()?;
        let id = self.harness.next_contract_id(&self.bytecode, base);
        let config = self.harness.config();

        session
            .deploy(
                &self.bytecode,
                ContractData::builder()
                    .owner(config.owner())
                    .contract_id(id)
                    .init_arg(init_arg),
                config.deploy_gas_limit(),
            )
            .map_err(|source| Error::DeploymentFailed {
                name: self.name.clone(),
                source,
            })?;
        info!(name = %self.name, %id, "deployment submitted");

        Ok(PendingDeployment {
            harness: self.harness,
            session,
            base,
            id,
            name: self.name.clone(),
        })
    }
}

/// A deployment that has been executed but not yet confirmed.
#[derive(Debug)]
pub struct PendingDeployment<'h> {
    harness: &'h Harness,
    session: Session,
    base: Option<[u8; 32]>,
    id: ContractId,
    name: String,
}

impl<'h> PendingDeployment<'h> {
    /// The id the contract will be reachable under once confirmed.
    pub fn id(&self) -> ContractId {
        self.id
    }

    /// Wait for the deployment to be confirmed, returning a handle to the
    /// deployed contract.
    ///
    /// # Errors
    /// [`Error::StaleBase`] if other state was confirmed since the deployment
    /// was submitted, in which case the deployment is discarded.
    pub fn deployed(self) -> Result<Contract<'h>, Error> {
        let root = self.harness.confirm(self.session, self.base)?;
        info!(
            name = %self.name,
            id = %self.id,
            root = %hex::encode(root),
            "deployment confirmed"
        );
        Ok(Contract::new(self.harness, self.id))
    }
}
