// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Typed bindings for the `transactions` greeting contract.

use piecrust_uplink::{Event, ARGBUF_LEN};
use rkyv::AlignedVec;

use crate::contract::{Contract, PendingTransaction};
use crate::error::Error;
use crate::factory::{ContractFactory, PendingDeployment};

/// Topic of the event emitted by `set_greeting`.
pub const GREETING_CHANGED: &str = "greeting_changed";

/// Longest greeting the contract accepts, in bytes. Longer greetings are
/// rejected by both `init` and `set_greeting`.
pub const MAX_GREETING_LEN: usize = ARGBUF_LEN / 2 - 64;

/// A deployed greeting contract.
#[derive(Debug, Clone, Copy)]
pub struct Greeter<'h> {
    contract: Contract<'h>,
}

impl<'h> From<Contract<'h>> for Greeter<'h> {
    fn from(contract: Contract<'h>) -> Self {
        Self { contract }
    }
}

impl<'h> Greeter<'h> {
    /// Deploy a greeting contract from `factory`, initialized with `greeting`.
    pub fn deploy(
        factory: &ContractFactory<'h>,
        greeting: &str,
    ) -> Result<PendingDeployment<'h>, Error> {
        factory.deploy(&String::from(greeting))
    }

    pub fn contract(&self) -> Contract<'h> {
        self.contract
    }

    /// Read the current greeting.
    pub fn greet(&self) -> Result<String, Error> {
        self.contract.query::<(), String>("greet", &())
    }

    /// Replace the greeting. The new greeting is observable once the returned
    /// transaction is confirmed.
    pub fn set_greeting(
        &self,
        greeting: &str,
    ) -> Result<PendingTransaction<'h, ()>, Error> {
        self.contract
            .transact::<String, ()>("set_greeting", &String::from(greeting))
    }
}

/// The change announced by `set_greeting`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GreetingChanged {
    pub previous: String,
    pub greeting: String,
}

impl GreetingChanged {
    /// Decode a [`GREETING_CHANGED`] event.
    ///
    /// # Errors
    /// [`Error::InvalidEvent`] if the event has another topic or its data is
    /// not a `(previous, greeting)` pair.
    pub fn from_event(event: &Event) -> Result<Self, Error> {
        if event.topic != GREETING_CHANGED {
            return Err(Error::InvalidEvent(event.topic.clone()));
        }

        // event data carries no alignment guarantees
        let mut data = AlignedVec::with_capacity(event.data.len());
        data.extend_from_slice(&event.data);

        let (previous, greeting) = rkyv::from_bytes::<(String, String)>(&data)
            .map_err(|_| Error::InvalidEvent(event.topic.clone()))?;

        Ok(Self { previous, greeting })
    }
}
