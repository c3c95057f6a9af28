//! Empirical check of calldata gas pricing against a development node.
//!
//! The probe deploys a compiled contract and calls one of its functions
//! twice, once with `0` (32 zero argument bytes) and once with `U256::MAX`
//! (32 `0xff` bytes). The difference in gas used is compared with the
//! per-byte pricing in [`crate::pricing`].
//!
//! Every step is awaited before the next one starts, so the deployment is
//! mined before the first call is sent and the first call before the
//! second.

use crate::{
    artifact::ContractArtifact,
    dev_fixtures::{
        ANVIL_DEFAULT_RPC_URL,
        ANVIL_DEV_PRIVATE_KEY,
    },
    error::ProbeError,
    pricing,
};
use alloy::{
    dyn_abi::DynSolValue,
    network::{
        EthereumWallet,
        ReceiptResponse,
        TransactionBuilder,
    },
    primitives::{
        Address,
        B256,
        Bytes,
        U256,
    },
    providers::{
        Provider,
        ProviderBuilder,
    },
    rpc::types::{
        TransactionReceipt,
        TransactionRequest,
    },
    signers::local::PrivateKeySigner,
};
use clap::{
    Parser,
    ValueHint,
};
use colored::Colorize;
use lab_common::{
    args::CliArgs,
    success_json,
};
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing::{
    debug,
    info,
    warn,
};
use url::Url;

/// Artifact written by `forge build` for `CalldataGas.sol`.
pub const DEFAULT_ARTIFACT: &str = "out/CalldataGas.sol/CalldataGas.json";

/// Function called with the zero and max arguments.
pub const DEFAULT_FUNCTION: &str = "f";

/// Gas limit of the deployment and of both calls.
pub const DEFAULT_GAS_LIMIT: u64 = 2_000_000;

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Everything the probe needs; built once and passed in.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub rpc_url: Url,
    /// Hex private key of the sending account. Development fixtures only.
    pub signing_key: String,
    pub artifact_path: PathBuf,
    pub function_name: String,
    pub gas_limit: u64,
    pub gas_price_wei: u128,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            rpc_url: Url::parse(ANVIL_DEFAULT_RPC_URL).expect("default RPC url is valid"),
            signing_key: ANVIL_DEV_PRIVATE_KEY.to_string(),
            artifact_path: PathBuf::from(DEFAULT_ARTIFACT),
            function_name: DEFAULT_FUNCTION.to_string(),
            gas_limit: DEFAULT_GAS_LIMIT,
            gas_price_wei: WEI_PER_GWEI,
        }
    }
}

/// Gas used by one confirmed call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GasMeasurement {
    pub label: String,
    pub argument: U256,
    pub calldata: Bytes,
    pub gas_used: u64,
    pub tx_hash: B256,
}

/// Outcome of a complete probe run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GasReport {
    pub account: Address,
    pub contract: Address,
    pub zero: GasMeasurement,
    pub max: GasMeasurement,
}

impl GasReport {
    /// Measured gas of the max call minus the zero call.
    pub fn difference(&self) -> i128 {
        i128::from(self.max.gas_used) - i128::from(self.zero.gas_used)
    }

    /// Difference predicted by the pricing model for the two payloads sent.
    pub fn calldata_difference(&self) -> i128 {
        pricing::calldata_cost_difference(&self.zero.calldata, &self.max.calldata)
    }

    /// Textbook figure for one word going from all-zero to all-one bytes.
    pub fn expected_difference(&self) -> u64 {
        pricing::expected_word_difference()
    }
}

/// Progress notifications, emitted in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeEvent {
    Connected { block_number: u64 },
    UsingAccount(Address),
    Deployed { address: Address, tx_hash: B256 },
    Measured(GasMeasurement),
}

/// Runs the probe against the node in `config`.
///
/// Fails with [`ProbeError::NodeUnreachable`] or
/// [`ProbeError::ArtifactMissing`] before anything is sent; any later
/// failure aborts the run where it happens.
pub async fn probe(
    config: &ProbeConfig,
    on_event: &mut (dyn FnMut(&ProbeEvent) + Send),
) -> Result<GasReport, ProbeError> {
    let block_number = ProviderBuilder::new()
        .connect_http(config.rpc_url.clone())
        .get_block_number()
        .await
        .map_err(|source| {
            ProbeError::NodeUnreachable {
                url: config.rpc_url.to_string(),
                source,
            }
        })?;
    on_event(&ProbeEvent::Connected { block_number });

    let artifact = ContractArtifact::load(&config.artifact_path)?;
    let deploy_code = artifact.deploy_code()?;
    let zero_calldata = artifact.encode_call(
        &config.function_name,
        &[DynSolValue::Uint(U256::ZERO, 256)],
    )?;
    let max_calldata = artifact.encode_call(
        &config.function_name,
        &[DynSolValue::Uint(U256::MAX, 256)],
    )?;

    let signer: PrivateKeySigner = config
        .signing_key
        .parse()
        .map_err(|err| ProbeError::InvalidSigningKey(format!("{err}")))?;
    let account = signer.address();
    on_event(&ProbeEvent::UsingAccount(account));

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(signer))
        .connect_http(config.rpc_url.clone());

    let deploy_tx = TransactionRequest::default()
        .with_from(account)
        .with_deploy_code(deploy_code)
        .with_gas_limit(config.gas_limit)
        .with_gas_price(config.gas_price_wei);
    let receipt = send_and_confirm(&provider, deploy_tx).await?;
    let contract = receipt
        .contract_address
        .ok_or(ProbeError::NoContractAddress(receipt.transaction_hash))?;
    info!(%contract, "contract deployed");
    on_event(&ProbeEvent::Deployed {
        address: contract,
        tx_hash: receipt.transaction_hash,
    });

    let name = &config.function_name;
    let zero = measure(
        &provider,
        config,
        account,
        contract,
        (format!("{name}(0)"), U256::ZERO, zero_calldata),
    )
    .await?;
    on_event(&ProbeEvent::Measured(zero.clone()));

    let max = measure(
        &provider,
        config,
        account,
        contract,
        (format!("{name}(MAX_UINT)"), U256::MAX, max_calldata),
    )
    .await?;
    on_event(&ProbeEvent::Measured(max.clone()));

    let report = GasReport {
        account,
        contract,
        zero,
        max,
    };
    if report.difference() != report.calldata_difference() {
        warn!(
            measured = report.difference(),
            predicted = report.calldata_difference(),
            "measured gas difference does not match the calldata pricing model"
        );
    }
    Ok(report)
}

/// Calls `contract` with `calldata` and records the gas used.
async fn measure<P: Provider>(
    provider: &P,
    config: &ProbeConfig,
    account: Address,
    contract: Address,
    (label, argument, calldata): (String, U256, Bytes),
) -> Result<GasMeasurement, ProbeError> {
    let tx = TransactionRequest::default()
        .with_from(account)
        .with_to(contract)
        .with_input(calldata.clone())
        .with_gas_limit(config.gas_limit)
        .with_gas_price(config.gas_price_wei);
    let receipt = send_and_confirm(provider, tx).await?;
    info!(%label, gas_used = receipt.gas_used, "call measured");

    Ok(GasMeasurement {
        label,
        argument,
        calldata,
        gas_used: receipt.gas_used,
        tx_hash: receipt.transaction_hash,
    })
}

/// Sends `tx` and waits until it is mined successfully.
async fn send_and_confirm<P: Provider>(
    provider: &P,
    tx: TransactionRequest,
) -> Result<TransactionReceipt, ProbeError> {
    let pending = provider.send_transaction(tx).await?;
    debug!(tx_hash = %pending.tx_hash(), "transaction sent, waiting for receipt");

    let receipt = pending.get_receipt().await?;
    if !receipt.status() {
        return Err(ProbeError::Reverted(receipt.transaction_hash));
    }
    Ok(receipt)
}

/// Command-line arguments for the calldata gas probe.
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "probe-gas",
    about = "Measure the gas cost of non-zero versus zero calldata bytes on a local node",
    long_about = "Deploy a compiled contract to a local development node (e.g. anvil) and call one of its functions with 0 and with 2^256-1. The gas difference is compared with the calldata pricing model (4 gas per zero byte, 16 gas per non-zero byte)."
)]
pub struct ProbeGasArgs {
    /// JSON-RPC endpoint of the development node
    #[clap(
        long,
        env = "LAB_RPC_URL",
        value_hint = ValueHint::Url,
        default_value = ANVIL_DEFAULT_RPC_URL
    )]
    pub rpc_url: Url,

    /// Foundry artifact with `abi` and `bytecode.object`
    #[clap(
        long,
        env = "LAB_ARTIFACT",
        value_hint = ValueHint::FilePath,
        default_value = DEFAULT_ARTIFACT
    )]
    pub artifact: PathBuf,

    /// Function taking a single uint256 argument
    #[clap(long, default_value = DEFAULT_FUNCTION)]
    pub function: String,

    /// Gas limit of every transaction
    #[clap(long, default_value_t = DEFAULT_GAS_LIMIT)]
    pub gas_limit: u64,

    /// Legacy gas price of every transaction, in gwei
    #[clap(long, default_value_t = 1)]
    pub gas_price_gwei: u64,
}

impl ProbeGasArgs {
    pub fn config(&self) -> ProbeConfig {
        ProbeConfig {
            rpc_url: self.rpc_url.clone(),
            artifact_path: self.artifact.clone(),
            function_name: self.function.clone(),
            gas_limit: self.gas_limit,
            gas_price_wei: u128::from(self.gas_price_gwei) * WEI_PER_GWEI,
            ..ProbeConfig::default()
        }
    }

    /// Runs the probe, printing progress unless JSON output is requested.
    pub async fn run(&self, cli_args: &CliArgs) -> Result<GasReport, ProbeError> {
        let json_output = cli_args.json_output();
        let mut on_event = |event: &ProbeEvent| {
            if !json_output {
                Self::display_event(event);
            }
        };

        let report = probe(&self.config(), &mut on_event).await?;
        Self::display_report(&report, json_output);
        Ok(report)
    }

    fn display_event(event: &ProbeEvent) {
        match event {
            ProbeEvent::Connected { block_number } => {
                println!("Connected to node. Block number: {block_number}");
            }
            ProbeEvent::UsingAccount(account) => println!("Using account: {account}"),
            ProbeEvent::Deployed { address, .. } => {
                println!("Contract deployed at: {}", address.to_string().cyan());
            }
            ProbeEvent::Measured(measurement) => {
                println!(
                    "{}: Gas Used = {}",
                    measurement.label, measurement.gas_used
                );
            }
        }
    }

    fn display_report(report: &GasReport, json_output: bool) {
        if json_output {
            println!(
                "{}",
                success_json(json!({
                    "account": report.account,
                    "contract": report.contract,
                    "measurements": [report.zero, report.max],
                    "difference": report.difference(),
                    "calldata_difference": report.calldata_difference(),
                    "expected_difference": report.expected_difference(),
                }))
            );
            return;
        }

        println!(
            "{}",
            format!("Difference: {} gas", report.difference()).bold()
        );
        // 32 argument bytes go from 0x00 (4 gas) to 0xff (16 gas): 32 * 12 = 384.
        println!(
            "Expected Difference (approx): {} gas ({} bytes * {} gas/byte difference)",
            report.expected_difference(),
            pricing::WORD_BYTES,
            pricing::NON_ZERO_BYTE_GAS - pricing::ZERO_BYTE_GAS,
        );
    }
}
