// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
// Copyright (c) DUSK NETWORK. All rights reserved.

mod common;

use std::fs;

use common::{deploy_greeter, HELLO, HOLA};
use transactions_harness::{
    Error, Greeter, Harness, HarnessConfig, TRANSACTIONS_BYTECODE,
};

#[test]
fn unknown_contract() -> Result<(), Error> {
    let harness = Harness::ephemeral()?;

    let result = harness.get_contract_factory("greeter");
    assert!(
        matches!(
            result,
            Err(Error::UnknownContract(ref name)) if name == "greeter"
        ),
        "only registered contracts should be found"
    );

    Ok(())
}

#[test]
fn invalid_bytecode_fails_deployment() -> Result<(), Error> {
    let mut harness = Harness::ephemeral()?;
    harness.register("broken", b"definitely not wasm".as_slice());

    let factory = harness.get_contract_factory("broken")?;
    let result = factory.deploy(&String::from(HELLO));

    assert!(
        matches!(
            result,
            Err(Error::DeploymentFailed { ref name, .. }) if name == "broken"
        ),
        "deploying invalid bytecode should fail"
    );
    assert_eq!(harness.root(), None);

    Ok(())
}

#[test]
fn init_out_of_gas_fails_deployment() -> Result<(), Error> {
    let harness = Harness::new(HarnessConfig::builder().deploy_gas_limit(1))?;

    let factory = harness.get_contract_factory("transactions")?;
    let result = Greeter::deploy(&factory, HELLO);

    assert!(
        matches!(result, Err(Error::DeploymentFailed { .. })),
        "init should not fit in a single unit of gas"
    );

    Ok(())
}

#[test]
fn missing_method_reverts() -> Result<(), Error> {
    let harness = Harness::ephemeral()?;
    let greeter = deploy_greeter(&harness, HELLO)?;
    let contract = greeter.contract();

    let result = contract.transact::<(), ()>("set_farewell", &());
    assert!(
        matches!(
            result,
            Err(Error::Reverted { ref method, .. }) if method == "set_farewell"
        ),
        "calling a missing method should revert"
    );

    let result = contract.query::<(), String>("farewell", &());
    assert!(matches!(result, Err(Error::Reverted { .. })));

    assert_eq!(greeter.greet()?, HELLO);

    Ok(())
}

#[test]
fn init_cannot_be_called_directly() -> Result<(), Error> {
    let harness = Harness::ephemeral()?;
    let greeter = deploy_greeter(&harness, HELLO)?;

    let result = greeter
        .contract()
        .transact::<String, ()>("init", &String::from(HOLA));
    assert!(
        matches!(result, Err(Error::Reverted { .. })),
        "init is reserved for deployment"
    );

    assert_eq!(greeter.greet()?, HELLO);

    Ok(())
}

#[test]
fn call_out_of_gas_reverts() -> Result<(), Error> {
    let harness = Harness::new(HarnessConfig::builder().call_gas_limit(1))?;
    let greeter = deploy_greeter(&harness, HELLO)?;

    let result = greeter.greet();
    assert!(matches!(result, Err(Error::Reverted { .. })));

    Ok(())
}

#[test]
fn factory_from_artifacts_dir() -> Result<(), Error> {
    let dir = tempfile::tempdir().expect("temporary directory");
    fs::write(dir.path().join("greeter.wasm"), TRANSACTIONS_BYTECODE)
        .expect("artifact written");

    let harness =
        Harness::new(HarnessConfig::builder().artifacts_dir(dir.path()))?;

    let factory = harness.get_contract_factory("greeter")?;
    assert_eq!(factory.name(), "greeter");
    assert_eq!(factory.bytecode(), TRANSACTIONS_BYTECODE);

    let greeter: Greeter = Greeter::deploy(&factory, HELLO)?.deployed()?.into();
    greeter.set_greeting(HOLA)?.wait()?;
    assert_eq!(greeter.greet()?, HOLA);

    let result = harness.get_contract_factory("absent");
    assert!(matches!(
        result,
        Err(Error::Artifact { ref name, .. }) if name == "absent"
    ));

    let result = harness.get_contract_factory("../greeter");
    assert!(matches!(result, Err(Error::UnknownContract(_))));

    Ok(())
}

#[test]
fn persistent_state_dir() -> Result<(), Error> {
    let dir = tempfile::tempdir().expect("temporary directory");

    let (root, id) = {
        let harness =
            Harness::new(HarnessConfig::builder().state_dir(dir.path()))?;
        let greeter = deploy_greeter(&harness, HELLO)?;

        assert_eq!(greeter.greet()?, HELLO);
        let receipt = greeter.set_greeting(HOLA)?.wait()?;
        assert_eq!(greeter.greet()?, HOLA);

        (receipt.root, greeter.contract().id())
    };

    let harness = Harness::new(
        HarnessConfig::builder().state_dir(dir.path()).base(root),
    )?;
    assert_eq!(harness.root(), Some(root));

    let greeter = Greeter::from(harness.contract(id));
    assert_eq!(greeter.greet()?, HOLA, "committed state should survive");

    greeter.set_greeting(HELLO)?.wait()?;
    assert_eq!(greeter.greet()?, HELLO);

    let other = deploy_greeter(&harness, HOLA)?;
    assert_ne!(other.contract().id(), id);
    assert_eq!(greeter.greet()?, HELLO);

    Ok(())
}

#[test]
fn unknown_base_is_rejected() {
    let dir = tempfile::tempdir().expect("temporary directory");

    let result = Harness::new(
        HarnessConfig::builder().state_dir(dir.path()).base([0xab; 32]),
    );
    assert!(
        result.is_err(),
        "a base that was never committed cannot be resumed from"
    );
}

#[test]
fn custom_owner() -> Result<(), Error> {
    let harness = Harness::new(HarnessConfig::builder().owner([7u8; 32]))?;
    assert_eq!(harness.config().owner(), [7u8; 32]);

    let greeter = deploy_greeter(&harness, HELLO)?;
    assert_eq!(greeter.greet()?, HELLO);

    Ok(())
}
