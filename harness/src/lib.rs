// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Deploy and drive the `transactions` greeting contract on Dusk's `piecrust`
//! virtual machine.
//!
//! A [`Harness`] owns a [`piecrust::VM`] together with its *confirmed root*,
//! the state every read observes. Deployments and mutating calls each run in
//! their own session and only become visible once confirmed:
//!
//! ```no_run
//! use transactions_harness::{Error, Greeter, Harness};
//!
//! fn main() -> Result<(), Error> {
//!     let harness = Harness::ephemeral()?;
//!     let factory = harness.get_contract_factory("transactions")?;
//!
//!     let greeter: Greeter =
//!         Greeter::deploy(&factory, "Hello, world!")?.deployed()?.into();
//!     assert_eq!(greeter.greet()?, "Hello, world!");
//!
//!     greeter.set_greeting("Hola, mundo!")?.wait()?;
//!     assert_eq!(greeter.greet()?, "Hola, mundo!");
//!
//!     Ok(())
//! }
//! ```

mod bytecode;
mod config;
mod contract;
mod error;
mod factory;
mod greeter;
mod harness;

pub use bytecode::{TRANSACTIONS, TRANSACTIONS_BYTECODE};
pub use config::{HarnessConfig, HarnessConfigBuilder};
pub use contract::{Contract, PendingTransaction, TransactionReceipt};
pub use error::Error;
pub use factory::{ContractFactory, PendingDeployment};
pub use greeter::{
    Greeter, GreetingChanged, GREETING_CHANGED, MAX_GREETING_LEN,
};
pub use harness::Harness;

// re-exports

pub use piecrust_uplink::{ContractId, Event};
