// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The assembled pipeline and its direct runner.
//!
//! The host execution engine owns real scheduling; this runner is the
//! in-process equivalent used by tests and local jobs. It drives elements
//! through the filter chains concurrently with no ordering guarantee, which
//! the merge semantics tolerate (set union, order insignificant).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::context::RunContext;
use crate::errors::{LookupError, StageError};
use crate::observability::messages::pipeline::{OutputWriteSkipped, PassThruMerged};
use crate::router::{ExistenceState, Route};
use crate::stages::{CheckOutcome, DropStage, ExistenceCheckStage, ForceFilter, PingFilter};
use crate::traits::{StreamTransform, TransformInput};

/// Output-direction filter pair: the existence check plus the force re-split
/// applied to its FOUND branch.
pub(crate) struct OutputChain {
    pub check: ExistenceCheckStage,
    pub force: ForceFilter,
}

/// Input-direction filter pair: the existence check plus the drop stage for
/// its NOT_FOUND branch.
pub(crate) struct InputChain {
    pub check: ExistenceCheckStage,
    pub drop: DropStage,
}

/// Per-input filter chain.
pub(crate) enum FilterChain {
    /// `skip_read`: the raw stream goes straight to the transform.
    Raw { feed: String },
    Filtered {
        feed: String,
        ping: PingFilter,
        output: Option<OutputChain>,
        input: Option<InputChain>,
        labels: Vec<String>,
    },
}

/// Where one element ended up after the chain.
pub(crate) enum Routed {
    Process(Vec<u8>),
    PassThru(Vec<u8>),
    Dropped,
}

impl FilterChain {
    pub(crate) fn feed(&self) -> &str {
        match self {
            FilterChain::Raw { feed } => feed,
            FilterChain::Filtered { feed, .. } => feed,
        }
    }

    pub(crate) fn labels(&self) -> &[String] {
        match self {
            FilterChain::Raw { .. } => &[],
            FilterChain::Filtered { labels, .. } => labels,
        }
    }

    /// Route one element through the chain. Decode drops are contained;
    /// lookup errors bubble.
    pub(crate) async fn route(&self, raw: Vec<u8>) -> Result<Routed, LookupError> {
        let (ping, output, input) = match self {
            FilterChain::Raw { .. } => return Ok(Routed::Process(raw)),
            FilterChain::Filtered {
                ping,
                output,
                input,
                ..
            } => (ping, output, input),
        };

        // ping is decided first, before any existence check
        let Some((route, mut bytes)) = ping.apply(&raw) else {
            return Ok(Routed::Dropped);
        };
        if route == Route::PassThru {
            return Ok(Routed::PassThru(bytes));
        }

        if let Some(chain) = output {
            match chain.check.check(&bytes).await? {
                CheckOutcome::Dropped => return Ok(Routed::Dropped),
                CheckOutcome::Tagged(tagged) => match tagged.state {
                    ExistenceState::NotFound => bytes = tagged.encoded,
                    ExistenceState::Found => {
                        let Some((route, forced)) = chain.force.apply(&tagged.encoded) else {
                            return Ok(Routed::Dropped);
                        };
                        if route == Route::PassThru {
                            return Ok(Routed::PassThru(forced));
                        }
                        bytes = forced;
                    }
                },
            }
        }

        if let Some(chain) = input {
            match chain.check.check(&bytes).await? {
                CheckOutcome::Dropped => return Ok(Routed::Dropped),
                CheckOutcome::Tagged(tagged) => match tagged.state {
                    ExistenceState::NotFound => {
                        chain.drop.apply(&tagged.encoded);
                        return Ok(Routed::Dropped);
                    }
                    ExistenceState::Found => bytes = tagged.encoded,
                },
            }
        }

        Ok(Routed::Process(bytes))
    }
}

/// Summary of one direct run.
#[derive(Debug)]
pub struct RunOutcome {
    /// The merged stream handed to the output stage. Empty when the sink is
    /// configured with `skip_write`.
    pub delivered: Vec<Vec<u8>>,
    /// Whether the output stage was invoked at all.
    pub written: bool,
    pub pass_thru_count: usize,
    pub dropped_count: usize,
}

/// A fully assembled execution graph for one job.
pub struct Pipeline {
    job_name: String,
    chains: Vec<Arc<FilterChain>>,
    transform: Arc<dyn StreamTransform>,
    context: Arc<RunContext>,
    labels: Vec<String>,
    multi_input: bool,
}

impl Pipeline {
    pub(crate) fn new(
        job_name: String,
        chains: Vec<Arc<FilterChain>>,
        transform: Arc<dyn StreamTransform>,
        context: Arc<RunContext>,
        labels: Vec<String>,
        multi_input: bool,
    ) -> Self {
        Self {
            job_name,
            chains,
            transform,
            context,
            labels,
            multi_input,
        }
    }

    pub fn job_name(&self) -> &str {
        &self.job_name
    }

    /// The assembled topology as its ordered stage labels.
    pub fn describe(&self) -> &[String] {
        &self.labels
    }

    /// Drive element feeds (keyed by input name, or `<name><index>` for
    /// multi-input jobs) through the graph and return what the output stage
    /// would receive.
    pub async fn run(
        &self,
        mut feeds: HashMap<String, Vec<Vec<u8>>>,
    ) -> Result<RunOutcome, StageError> {
        let mut per_input: BTreeMap<String, Vec<Vec<u8>>> = BTreeMap::new();
        let mut pass_thru: Vec<Vec<u8>> = Vec::new();
        let mut dropped_count = 0usize;

        for chain in &self.chains {
            let elements = feeds.remove(chain.feed()).unwrap_or_default();

            let mut tasks = JoinSet::new();
            for raw in elements {
                let chain = Arc::clone(chain);
                tasks.spawn(async move { chain.route(raw).await });
            }

            let mut to_process = Vec::new();
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok(routed) => match routed? {
                        Routed::Process(bytes) => to_process.push(bytes),
                        Routed::PassThru(bytes) => pass_thru.push(bytes),
                        Routed::Dropped => dropped_count += 1,
                    },
                    // routing tasks are never cancelled; a join error is a panic
                    Err(join_error) => std::panic::resume_unwind(join_error.into_panic()),
                }
            }

            per_input.insert(chain.feed().to_string(), to_process);
        }

        let input = if self.multi_input {
            TransformInput::Multi(per_input)
        } else {
            TransformInput::Single(per_input.into_values().next().unwrap_or_default())
        };

        let output = self
            .transform
            .process(input, self.context.config())
            .await
            .map_err(StageError::Transform)?;

        let metrics = self.context.metrics();
        metrics.counter(
            "transform-output",
            output.len() as i64,
            &Default::default(),
        );

        let pass_thru_count = pass_thru.len();
        let mut merged = output;
        if pass_thru_count > 0 {
            tracing::info!("{}", PassThruMerged {
                count: pass_thru_count,
            });
            merged.append(&mut pass_thru);
        }

        let sink = self.context.config().output();
        if sink.skip_write {
            tracing::info!("{}", OutputWriteSkipped {
                sink: &sink.name,
                discarded: merged.len(),
            });
            return Ok(RunOutcome {
                delivered: Vec::new(),
                written: false,
                pass_thru_count,
                dropped_count,
            });
        }

        Ok(RunOutcome {
            delivered: merged,
            written: true,
            pass_thru_count,
            dropped_count,
        })
    }
}
