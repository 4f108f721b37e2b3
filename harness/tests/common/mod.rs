// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

#![allow(dead_code)]

use transactions_harness::{Error, Greeter, Harness, TRANSACTIONS};

pub const HELLO: &str = "Hello, world!";
pub const HOLA: &str = "Hola, mundo!";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Deploys the greeting contract with `greeting` and waits for the deployment
/// to be confirmed.
pub fn deploy_greeter<'h>(
    harness: &'h Harness,
    greeting: &str,
) -> Result<Greeter<'h>, Error> {
    init_tracing();

    let factory = harness.get_contract_factory(TRANSACTIONS)?;
    let contract = Greeter::deploy(&factory, greeting)?.deployed()?;
    Ok(contract.into())
}
