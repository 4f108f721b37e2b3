// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

/// Name the greeting contract is registered under in every [`Harness`].
///
/// [`Harness`]: crate::Harness
pub const TRANSACTIONS: &str = "transactions";

/// WASM bytecode of the greeting contract, built from `contracts/transactions`
/// by this crate's build script.
pub const TRANSACTIONS_BYTECODE: &[u8] =
    include_bytes!(concat!(env!("OUT_DIR"), "/transactions.wasm"));
