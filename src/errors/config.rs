// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build-time configuration errors.
//!
//! Every variant here is fatal: it surfaces to the operator before a single
//! element is processed, and no partial pipeline is ever started.

use thiserror::Error;

use crate::config::Direction;

/// Errors raised while validating a job configuration or assembling a
/// pipeline from it.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// The job declares no event inputs.
    #[error("Job '{job_name}' declares no event inputs; at least one is required")]
    MissingInputs { job_name: String },

    /// The job declares zero or more than one event output.
    #[error("Job '{job_name}' declares {count} event outputs; exactly one is supported")]
    UnsupportedOutputCount { job_name: String, count: usize },

    /// A stage was constructed against an envelope contract version it does
    /// not understand.
    #[error(
        "Stage '{stage}' does not support envelope contract version {version} \
         declared in the job config (expected {expected})"
    )]
    UnsupportedContractVersion {
        stage: &'static str,
        version: u32,
        expected: u32,
    },

    /// An existence check is enabled for a source or sink that has no data
    /// location to check against.
    #[error("{direction} '{name}' enables existence checks but configures no data location")]
    MissingDataLocation { direction: Direction, name: String },

    /// The process-wide run context was initialized twice.
    #[error("Run context has already been initialized for this process")]
    ContextAlreadyInitialized,

    /// The config file could not be read.
    #[error("Failed to read job config from '{path}': {source}")]
    Unreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The config file could not be deserialized.
    #[error("Failed to parse job config: {0}")]
    Unparseable(#[from] serde_yaml::Error),
}
