//! Foundry build artifacts.
//!
//! Only the fields the probe needs are read: the JSON ABI and the creation
//! bytecode under `bytecode.object`.

use crate::error::ArtifactError;
use alloy::{
    dyn_abi::{
        DynSolValue,
        JsonAbiExt,
    },
    json_abi::{
        Function,
        JsonAbi,
    },
    primitives::Bytes,
};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct BytecodeObject {
    pub object: Bytes,
}

/// A compiled contract: interface plus creation bytecode.
#[derive(Debug, Clone, Deserialize)]
pub struct ContractArtifact {
    pub abi: JsonAbi,
    pub bytecode: BytecodeObject,
}

impl ContractArtifact {
    /// Reads and parses the artifact at `path`.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.exists() {
            return Err(ArtifactError::Missing(path.to_path_buf()));
        }

        let file = std::fs::File::open(path).map_err(|source| {
            ArtifactError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        let artifact: Self =
            serde_json::from_reader(std::io::BufReader::new(file)).map_err(|source| {
                ArtifactError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?;

        if artifact.bytecode.object.is_empty() {
            return Err(ArtifactError::EmptyBytecode);
        }
        Ok(artifact)
    }

    /// Data of the contract-creation transaction.
    ///
    /// Constructor arguments are not supported, so this is the bare creation
    /// bytecode.
    pub fn deploy_code(&self) -> Result<Bytes, ArtifactError> {
        if let Some(constructor) = self
            .abi
            .constructor
            .as_ref()
            .filter(|constructor| !constructor.inputs.is_empty())
        {
            return Err(ArtifactError::UnsupportedConstructor(
                constructor.inputs.len(),
            ));
        }
        Ok(self.bytecode.object.clone())
    }

    /// The single, non-overloaded function called `name`.
    pub fn function(&self, name: &str) -> Result<&Function, ArtifactError> {
        match self.abi.function(name).map(Vec::as_slice) {
            Some([function]) => Ok(function),
            Some(overloads) if !overloads.is_empty() => {
                Err(ArtifactError::AmbiguousFunction {
                    name: name.to_string(),
                    count: overloads.len(),
                })
            }
            _ => Err(ArtifactError::FunctionNotFound(name.to_string())),
        }
    }

    /// Selector-prefixed calldata calling `name` with `args`.
    pub fn encode_call(&self, name: &str, args: &[DynSolValue]) -> Result<Bytes, ArtifactError> {
        let function = self.function(name)?;
        function
            .abi_encode_input(args)
            .map(Bytes::from)
            .map_err(|source| {
                ArtifactError::Encode {
                    name: name.to_string(),
                    source,
                }
            })
    }
}
