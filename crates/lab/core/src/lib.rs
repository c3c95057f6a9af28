#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod artifact;
pub mod calldata_gas;
pub mod dev_fixtures;
pub mod error;
pub mod pricing;
pub mod report_archive;
pub mod vcs;
