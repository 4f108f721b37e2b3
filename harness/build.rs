// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

//! Builds the contracts under `contracts/` to WASM and places the resulting
//! bytecode in `OUT_DIR`, where `bytecode.rs` embeds it.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const CONTRACTS: &[&str] = &["transactions"];
const WASM_TARGET: &str = "wasm32-unknown-unknown";

// Variables cargo sets for the host build that must not leak into the
// nested WASM build.
const HOST_ONLY_ENV: &[&str] = &[
    "CARGO_ENCODED_RUSTFLAGS",
    "CARGO_BUILD_TARGET",
    "CARGO_TARGET_DIR",
    "RUSTFLAGS",
    "RUSTC_WORKSPACE_WRAPPER",
];

fn main() {
    let manifest_dir = PathBuf::from(
        env::var("CARGO_MANIFEST_DIR").expect("cargo sets CARGO_MANIFEST_DIR"),
    );
    let out_dir =
        PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));

    let contracts_dir = manifest_dir.join("..").join("contracts");
    let target_dir = out_dir.join("contracts-target");

    println!("cargo:rerun-if-changed={}", contracts_dir.display());

    for name in CONTRACTS {
        let mut cmd = Command::new("cargo");
        cmd.current_dir(&contracts_dir)
            .args(["build", "--release", "--target", WASM_TARGET])
            .args(["--package", name])
            .arg("--target-dir")
            .arg(&target_dir);
        for var in HOST_ONLY_ENV {
            cmd.env_remove(var);
        }

        let status = cmd
            .status()
            .unwrap_or_else(|err| panic!("failed to invoke cargo: {err}"));
        assert!(status.success(), "building contract `{name}` failed");

        let wasm = format!("{name}.wasm");
        let built = target_dir.join(WASM_TARGET).join("release").join(&wasm);
        fs::copy(&built, out_dir.join(&wasm)).unwrap_or_else(|err| {
            panic!("failed to copy {}: {err}", built.display())
        });
    }
}
