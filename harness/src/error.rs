// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

use std::sync::Arc;
use thiserror::Error;

/// The error type returned by the harness.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Artifact for {name} could not be read: {io}")]
    Artifact { name: String, io: Arc<std::io::Error> },
    #[error("Deployment of {name} failed: {source}")]
    DeploymentFailed {
        name: String,
        source: piecrust::Error,
    },
    #[error("Invalid event: {0}")]
    InvalidEvent(String),
    #[error("Call to {method} reverted: {source}")]
    Reverted {
        method: String,
        source: piecrust::Error,
    },
    #[error(
        "Stale base: session opened on {}, confirmed root is {}",
        fmt_root(.base),
        fmt_root(.confirmed)
    )]
    StaleBase {
        base: Option<[u8; 32]>,
        confirmed: Option<[u8; 32]>,
    },
    #[error("Unknown contract: {0}")]
    UnknownContract(String),
    #[error(transparent)]
    Vm(#[from] piecrust::Error),
}

fn fmt_root(root: &Option<[u8; 32]>) -> String {
    match root {
        Some(root) => hex::encode(root),
        None => String::from("genesis"),
    }
}
