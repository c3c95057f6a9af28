//! End-to-end runs against a spawned `anvil`. These need the `anvil` binary
//! on `PATH`; run them with `cargo test -- --ignored`.

use alloy::{
    node_bindings::{
        Anvil,
        AnvilInstance,
    },
    primitives::U256,
};
use lab_core::{
    calldata_gas::{
        ProbeConfig,
        ProbeEvent,
        probe,
    },
    error::ProbeError,
};
use std::path::PathBuf;

fn artifact() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("CalldataGas.json")
}

/// Anvil pinned to Cancun so calldata is priced at 4/16 gas per byte without
/// the EIP-7623 floor.
fn spawn_anvil() -> AnvilInstance {
    Anvil::new().args(["--hardfork", "cancun"]).spawn()
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires the anvil binary"]
async fn all_ones_word_costs_384_more_gas() {
    let anvil = spawn_anvil();
    let config = ProbeConfig {
        rpc_url: anvil.endpoint_url(),
        artifact_path: artifact(),
        ..ProbeConfig::default()
    };

    let mut events = Vec::new();
    let report = probe(&config, &mut |event: &ProbeEvent| events.push(event.clone()))
        .await
        .unwrap();

    assert_eq!(report.account, anvil.addresses()[0]);
    assert_eq!(report.zero.argument, U256::ZERO);
    assert_eq!(report.max.argument, U256::MAX);
    assert_eq!(report.difference(), 384);
    assert_eq!(report.calldata_difference(), 384);

    // deploy, then f(0), then f(MAX_UINT)
    assert_eq!(events.len(), 5);
    assert!(matches!(events[0], ProbeEvent::Connected { .. }));
    assert!(matches!(events[1], ProbeEvent::UsingAccount(_)));
    assert!(matches!(events[2], ProbeEvent::Deployed { address, .. } if address == report.contract));
    assert!(matches!(&events[3], ProbeEvent::Measured(m) if m.label == "f(0)"));
    assert!(matches!(&events[4], ProbeEvent::Measured(m) if m.label == "f(MAX_UINT)"));
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires the anvil binary"]
async fn unknown_function_fails_before_deployment() {
    let anvil = spawn_anvil();
    let config = ProbeConfig {
        rpc_url: anvil.endpoint_url(),
        artifact_path: artifact(),
        function_name: "g".to_string(),
        ..ProbeConfig::default()
    };

    let mut events = Vec::new();
    let err = probe(&config, &mut |event: &ProbeEvent| events.push(event.clone()))
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::Artifact(_)), "{err:?}");
    assert!(!err.is_precondition());
    assert_eq!(events.len(), 1);
}
