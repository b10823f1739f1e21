// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Build-time job config validation.
//!
//! Everything here runs before a pipeline is assembled. A failed validation
//! aborts job submission entirely; no partial pipeline is ever started.

use crate::config::consts::ENVELOPE_CONTRACT_VERSION;
use crate::config::{Direction, JobConfig};
use crate::errors::ConfigurationError;

/// Validate a job config against the constraints the assembler relies on:
/// at least one input, exactly one output, a supported contract version, and
/// a data location for every enabled existence check.
pub fn validate_job_config(cfg: &JobConfig) -> Result<(), ConfigurationError> {
    if cfg.inputs.is_empty() {
        return Err(ConfigurationError::MissingInputs {
            job_name: cfg.job_name.clone(),
        });
    }

    if cfg.outputs.len() != 1 {
        return Err(ConfigurationError::UnsupportedOutputCount {
            job_name: cfg.job_name.clone(),
            count: cfg.outputs.len(),
        });
    }

    if cfg.version != ENVELOPE_CONTRACT_VERSION {
        return Err(ConfigurationError::UnsupportedContractVersion {
            stage: "job",
            version: cfg.version,
            expected: ENVELOPE_CONTRACT_VERSION,
        });
    }

    for input in &cfg.inputs {
        // skip_read inputs bypass the filter chain entirely, so no location
        // is needed even when the existence check is nominally enabled
        if !input.skip_read && !input.skip_existence_check && input.location.is_empty() {
            return Err(ConfigurationError::MissingDataLocation {
                direction: Direction::Input,
                name: input.name.clone(),
            });
        }
    }

    let output = cfg.output();
    if !output.skip_existence_check && output.location.is_empty() {
        return Err(ConfigurationError::MissingDataLocation {
            direction: Direction::Output,
            name: output.name.clone(),
        });
    }

    Ok(())
}
