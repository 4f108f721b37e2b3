// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use bytecheck::CheckBytes;
use piecrust::Session;
use piecrust_uplink::{ContractId, Event, StandardBufSerializer};
use rkyv::validation::validators::DefaultValidator;
use rkyv::{Archive, Deserialize, Infallible, Serialize};
use tracing::{info, trace};

use crate::error::Error;
use crate::harness::Harness;

/// A handle to a deployed contract.
#[derive(Debug, Clone, Copy)]
pub struct Contract<'h> {
    harness: &'h Harness,
    id: ContractId,
}

impl<'h> Contract<'h> {
    pub(crate) fn new(harness: &'h Harness, id: ContractId) -> Self {
        Self { harness, id }
    }

    pub fn id(&self) -> ContractId {
        self.id
    }

    pub fn harness(&self) -> &'h Harness {
        self.harness
    }

    /// Call `method` on the confirmed state without changing it.
    ///
    /// The call runs in a throwaway session that is never committed.
    ///
    /// # Errors
    /// [`Error::Reverted`] if the call fails, for example because the method
    /// does not exist, the contract panics or the gas limit is exceeded.
    pub fn query<A, R>(&self, method: &str, arg: &A) -> Result<R, Error>
    where
        A: for<'b> Serialize<StandardBufSerializer<'b>>,
        A::Archived: for<'b> CheckBytes<DefaultValidator<'b>>,
        R: Archive,
        R::Archived: Deserialize<R, Infallible>
            + for<'b> CheckBytes<DefaultValidator<'b>>,
    {
        let (mut session, _) = self.harness.session()?;
        let receipt = session
            .call::<A, R>(
                self.id,
                method,
                arg,
                self.harness.config().call_gas_limit(),
            )
            .map_err(|source| Error::Reverted {
                method: method.into(),
                source,
            })?;
        trace!(id = %self.id, method, gas_spent = receipt.gas_spent, "query");

        Ok(receipt.data)
    }

    /// Submit a mutating call to `method`.
    ///
    /// The call is executed immediately in a session of its own, but its
    /// effects are only visible to reads once [`PendingTransaction::wait`]
    /// confirms it.
    ///
    /// # Errors
    /// [`Error::Reverted`] if the call is rejected. Nothing is left pending in
    /// that case.
    pub fn transact<A, R>(
        &self,
        method: &str,
        arg: &A,
    ) -> Result<PendingTransaction<'h, R>, Error>
    where
        A: for<'b> Serialize<StandardBufSerializer<'b>>,
        A::Archived: for<'b> CheckBytes<DefaultValidator<'b>>,
        R: Archive,
        R::Archived: Deserialize<R, Infallible>
            + for<'b> CheckBytes<DefaultValidator<'b>>,
    {
        let (mut session, base) = self.harness.session()?;
        let receipt = session
            .call::<A, R>(
                self.id,
                method,
                arg,
                self.harness.config().call_gas_limit(),
            )
            .map_err(|source| Error::Reverted {
                method: method.into(),
                source,
            })?;
        info!(id = %self.id, method, "transaction submitted");

        Ok(PendingTransaction {
            harness: self.harness,
            session,
            base,
            method: method.into(),
            gas_spent: receipt.gas_spent,
            gas_limit: receipt.gas_limit,
            events: receipt.events,
            data: receipt.data,
        })
    }
}

/// A mutating call that has been executed but not yet confirmed.
#[derive(Debug)]
pub struct PendingTransaction<'h, R> {
    harness: &'h Harness,
    session: Session,
    base: Option<[u8; 32]>,
    method: String,
    gas_spent: u64,
    gas_limit: u64,
    events: Vec<Event>,
    data: R,
}

impl<R> PendingTransaction<'_, R> {
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Events emitted by the call, pending confirmation.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Wait for the transaction to be confirmed.
    ///
    /// # Errors
    /// [`Error::StaleBase`] if other state was confirmed since the transaction
    /// was submitted, in which case the transaction is discarded.
    pub fn wait(self) -> Result<TransactionReceipt<R>, Error> {
        let root = self.harness.confirm(self.session, self.base)?;
        info!(
            method = %self.method,
            root = %hex::encode(root),
            gas_spent = self.gas_spent,
            "transaction confirmed"
        );

        Ok(TransactionReceipt {
            root,
            gas_spent: self.gas_spent,
            gas_limit: self.gas_limit,
            events: self.events,
            data: self.data,
        })
    }
}

/// The outcome of a confirmed transaction.
#[derive(Debug, Clone)]
pub struct TransactionReceipt<R> {
    /// The confirmed root after the transaction.
    pub root: [u8; 32],
    /// The amount of gas spent executing the call.
    pub gas_spent: u64,
    /// The limit the call was executed with.
    pub gas_limit: u64,
    /// The events emitted by the call.
    pub events: Vec<Event>,
    /// The data returned by the call.
    pub data: R,
}
