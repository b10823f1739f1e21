// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pipeline assembly and merge events.

use std::fmt::{Display, Formatter};

/// A pipeline was assembled from a job config.
///
/// # Log Level
/// `info!` - Job lifecycle event
pub struct PipelineAssembled<'a> {
    pub job_name: &'a str,
    pub input_count: usize,
    pub stage_count: usize,
}

impl Display for PipelineAssembled<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Assembled pipeline for job '{}': {} input(s), {} stage(s)",
            self.job_name, self.input_count, self.stage_count
        )
    }
}

/// Pass-thru elements were merged into the transform's output stream.
///
/// # Log Level
/// `info!` - Routine merge event
pub struct PassThruMerged {
    pub count: usize,
}

impl Display for PassThruMerged {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Merged {} pass-thru element(s) into the output stream",
            self.count
        )
    }
}

/// The merged stream was discarded because the sink is configured with
/// `skip_write`.
///
/// # Log Level
/// `info!` - Expected for dry-run jobs
pub struct OutputWriteSkipped<'a> {
    pub sink: &'a str,
    pub discarded: usize,
}

impl Display for OutputWriteSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Output sink '{}' is configured with skip_write; discarding {} element(s)",
            self.sink, self.discarded
        )
    }
}
