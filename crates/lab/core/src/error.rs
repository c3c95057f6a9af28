use alloy::{
    primitives::B256,
    providers::PendingTransactionError,
    transports::TransportError,
};
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while asking version control for the current commit.
#[derive(Error, Debug)]
pub enum VcsError {
    #[error("`{program}` command not found")]
    ToolNotFound { program: String },
    #[error("`{program} rev-parse` failed: {stderr}. Is this a git repository?")]
    CommandFailed { program: String, stderr: String },
    #[error("`{program} rev-parse` returned empty output")]
    EmptyOutput { program: String },
    #[error("failed to run `{program}`: {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while copying a report into the archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to create reports directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to append commit footer to {path}: {source}")]
    AppendFooter {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading a contract build artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Artifact not found at {0}. Please run `forge build` first.")]
    Missing(PathBuf),
    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("artifact has no creation bytecode")]
    EmptyBytecode,
    #[error("function `{0}` not found in artifact ABI")]
    FunctionNotFound(String),
    #[error("function `{name}` is overloaded {count} times in artifact ABI")]
    AmbiguousFunction { name: String, count: usize },
    #[error("constructor takes {0} arguments, only argument-less constructors can be deployed")]
    UnsupportedConstructor(usize),
    #[error("failed to encode call to `{name}`: {source}")]
    Encode {
        name: String,
        #[source]
        source: alloy::dyn_abi::Error,
    },
}

/// Errors raised by the calldata gas probe.
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Could not connect to node at {url}: {source}")]
    NodeUnreachable {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("Artifact not found at {0}. Please run `forge build` first.")]
    ArtifactMissing(PathBuf),
    #[error(transparent)]
    Artifact(ArtifactError),
    #[error("invalid signing key: {0}")]
    InvalidSigningKey(String),
    #[error("RPC request failed: {0}")]
    Rpc(#[from] TransportError),
    #[error("failed waiting for transaction receipt: {0}")]
    Receipt(#[from] PendingTransactionError),
    #[error("transaction {0} reverted")]
    Reverted(B256),
    #[error("deployment transaction {0} did not create a contract")]
    NoContractAddress(B256),
}

impl From<ArtifactError> for ProbeError {
    fn from(err: ArtifactError) -> Self {
        match err {
            ArtifactError::Missing(path) => Self::ArtifactMissing(path),
            other => Self::Artifact(other),
        }
    }
}

impl ProbeError {
    /// Whether the error is one of the precondition failures checked before
    /// any transaction is sent.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::NodeUnreachable { .. } | Self::ArtifactMissing(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_artifact_maps_to_precondition() {
        let err = ProbeError::from(ArtifactError::Missing(PathBuf::from("out/X.json")));
        assert!(matches!(err, ProbeError::ArtifactMissing(_)));
        assert!(err.is_precondition());
        assert_eq!(
            err.to_string(),
            "Artifact not found at out/X.json. Please run `forge build` first."
        );
    }

    #[test]
    fn other_artifact_errors_are_not_preconditions() {
        let err = ProbeError::from(ArtifactError::EmptyBytecode);
        assert!(matches!(err, ProbeError::Artifact(ArtifactError::EmptyBytecode)));
        assert!(!err.is_precondition());
    }

    #[test]
    fn vcs_error_messages() {
        let err = VcsError::ToolNotFound {
            program: "git".to_string(),
        };
        assert_eq!(err.to_string(), "`git` command not found");
    }
}
