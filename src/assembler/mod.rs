// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline assembly: wiring existence checks, force/ping overrides, and
//! multi-input fan-in around the user transform.
//!
//! The assembler reads the job config and produces a [`Pipeline`]: one
//! labeled filter chain per declared input, the user transform, and the final
//! pass-thru merge. All validation happens here, before any element is
//! processed; a bad config aborts assembly with a [`ConfigurationError`] and
//! no partial pipeline is ever started.

mod pipeline;


pub use pipeline::{Pipeline, RunOutcome};

use std::sync::Arc;

use crate::config::{validate_job_config, SourceConfig};
use crate::context::RunContext;
use crate::errors::ConfigurationError;
use crate::lookup::ExistenceLookup;
use crate::observability::messages::pipeline::PipelineAssembled;
use crate::stages::{DropStage, ExistenceCheckStage, ForceFilter, PingFilter};
use crate::traits::StreamTransform;

use pipeline::{FilterChain, InputChain, OutputChain};

/// Builds the branch-and-merge graph for one job.
pub struct PipelineAssembler {
    context: Arc<RunContext>,
    lookup: Arc<dyn ExistenceLookup>,
}

impl PipelineAssembler {
    pub fn new(context: Arc<RunContext>, lookup: Arc<dyn ExistenceLookup>) -> Self {
        Self { context, lookup }
    }

    /// Assemble the full pipeline around a user transform.
    ///
    /// Single input: ping filter -> output filter chain -> input filter chain
    /// -> transform. Multiple inputs: one independently labeled chain per
    /// input, the transform invoked with a record of named streams
    /// (`<name><index>`), and every chain's pass-thru branch merged before
    /// the final output merge.
    pub fn assemble(
        &self,
        transform: Arc<dyn StreamTransform>,
    ) -> Result<Pipeline, ConfigurationError> {
        let config = self.context.config();
        validate_job_config(config)?;

        let multi_input = config.inputs.len() > 1;
        let mut chains = Vec::with_capacity(config.inputs.len());
        for (index, source) in config.inputs.iter().enumerate() {
            // label prefixes keep stage names unique across inputs
            let feed = if multi_input {
                format!("{}{}", source.name, index)
            } else {
                source.name.clone()
            };
            let prefix = multi_input.then(|| feed.clone());
            chains.push(Arc::new(self.build_chain(source, feed, prefix)?));
        }

        let mut labels: Vec<String> = chains
            .iter()
            .flat_map(|chain| chain.labels().iter().cloned())
            .collect();
        let any_filtered = chains
            .iter()
            .any(|chain| !matches!(chain.as_ref(), FilterChain::Raw { .. }));
        if multi_input && any_filtered {
            labels.push("Merge multi-input pass-thrus".to_string());
        }
        if any_filtered {
            labels.push("Flatten to Output".to_string());
        }

        tracing::info!("{}", PipelineAssembled {
            job_name: &config.job_name,
            input_count: config.inputs.len(),
            stage_count: labels.len(),
        });

        Ok(Pipeline::new(
            config.job_name.clone(),
            chains,
            transform,
            Arc::clone(&self.context),
            labels,
            multi_input,
        ))
    }

    fn build_chain(
        &self,
        source: &SourceConfig,
        feed: String,
        prefix: Option<String>,
    ) -> Result<FilterChain, ConfigurationError> {
        if source.skip_read {
            // the transform reads this input itself; no filters, no pass-thru
            return Ok(FilterChain::Raw { feed });
        }

        let lbl = |label: &str| match &prefix {
            Some(p) => format!("[{}] {}", p, label),
            None => label.to_string(),
        };

        let mut labels = vec![lbl("Ping Filter")];
        let ping = PingFilter::new(lbl("Ping Filter"), Arc::clone(&self.context))?;

        let sink = self.context.config().output();
        let output = if !sink.skip_existence_check {
            labels.extend([
                lbl("Output Exists Filter"),
                lbl("Output Force Filter"),
                lbl("Flatten to Pass Thru"),
                lbl("Flatten to Process"),
            ]);
            Some(OutputChain {
                check: ExistenceCheckStage::for_output(
                    lbl("Output Exists Filter"),
                    sink,
                    Arc::clone(&self.context),
                    Arc::clone(&self.lookup),
                )?,
                force: ForceFilter::new(lbl("Output Force Filter"), Arc::clone(&self.context))?,
            })
        } else {
            None
        };

        let input = if !source.skip_existence_check {
            labels.extend([lbl("Input Exists Filter"), lbl("Drop Not Found Data")]);
            Some(InputChain {
                check: ExistenceCheckStage::for_input(
                    lbl("Input Exists Filter"),
                    source,
                    Arc::clone(&self.context),
                    Arc::clone(&self.lookup),
                )?,
                drop: DropStage::new(lbl("Drop Not Found Data"), Arc::clone(&self.context))?,
            })
        } else {
            None
        };

        Ok(FilterChain::Filtered {
            feed,
            ping,
            output,
            input,
            labels,
        })
    }
}
