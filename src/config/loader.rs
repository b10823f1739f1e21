// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::ENVELOPE_CONTRACT_VERSION;
use crate::errors::ConfigurationError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main configuration structure for a streaming job.
///
/// Declares the job's event inputs and outputs, the envelope contract version
/// it speaks, and the metrics backends to install. Typically loaded from a
/// YAML job file; owned by the run context and read-only after job start.
///
/// # Example
/// ```yaml
/// job_name: "resample-audio"
/// inputs:
///   - name: "events"
///     location: "gs://my-bucket/input"
///     file_suffix: ".ogg"
/// outputs:
///   - name: "events"
///     location: "gs://my-bucket/output"
///     file_suffix: ".wav"
/// metrics:
///   backends:
///     - name: "logger"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct JobConfig {
    pub job_name: String,
    /// Envelope contract version; defaults to the version this core speaks.
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub inputs: Vec<SourceConfig>,
    #[serde(default)]
    pub outputs: Vec<SinkConfig>,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

fn default_version() -> u32 {
    ENVELOPE_CONTRACT_VERSION
}

impl JobConfig {
    /// The single declared output sink.
    ///
    /// Only valid on a validated config; see
    /// [`validate_job_config`](crate::config::validate_job_config).
    pub fn output(&self) -> &SinkConfig {
        &self.outputs[0]
    }
}

/// One declared event input source.
///
/// # Fields
/// * `name` - Source name, also used to label that input's filter chain
/// * `location` - Data location prefix existence checks resolve against
/// * `file_suffix` - Appended to the element identifier when building keys
/// * `skip_existence_check` - Route all elements as to-process, unchecked
/// * `skip_read` - Hand the raw stream to the transform, no filters at all
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub file_suffix: String,
    #[serde(default)]
    pub skip_existence_check: bool,
    #[serde(default)]
    pub skip_read: bool,
}

/// The declared event output sink.
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub file_suffix: String,
    #[serde(default)]
    pub skip_existence_check: bool,
    /// Discard the merged stream without invoking the output stage. Used for
    /// test and dry-run jobs.
    #[serde(default)]
    pub skip_write: bool,
}

/// Metrics configuration: zero or more named backend clients.
///
/// An empty or missing list installs the default logging backend so metrics
/// are never silently lost.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetricsConfig {
    #[serde(default)]
    pub backends: Vec<MetricsBackendConfig>,
}

/// One metrics backend entry with its backend-specific options.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsBackendConfig {
    pub name: String,
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>,
}

/// Load a job config from a YAML file.
pub fn load_job_config<P: AsRef<Path>>(path: P) -> Result<JobConfig, ConfigurationError> {
    let content = fs::read_to_string(&path).map_err(|source| ConfigurationError::Unreadable {
        path: path.as_ref().display().to_string(),
        source,
    })?;
    let cfg: JobConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

/// Load and validate a job config from a YAML file.
///
/// Validation is fail-fast: any violation aborts before a pipeline can be
/// assembled from the config.
pub fn load_and_validate_job_config<P: AsRef<Path>>(
    path: P,
) -> Result<JobConfig, ConfigurationError> {
    let cfg = load_job_config(path)?;
    crate::config::validate_job_config(&cfg)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
job_name: resample
inputs:
  - name: events
    location: gs://bucket/in
    file_suffix: .ogg
outputs:
  - name: events
    location: gs://bucket/out
    file_suffix: .wav
"#;

        let cfg: JobConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.job_name, "resample");
        assert_eq!(cfg.version, ENVELOPE_CONTRACT_VERSION);
        assert_eq!(cfg.inputs.len(), 1);
        assert!(!cfg.inputs[0].skip_existence_check);
        assert_eq!(cfg.output().location, "gs://bucket/out");
    }

    #[test]
    fn parse_skip_flags_and_metrics() {
        let yaml = r#"
job_name: dry-run
inputs:
  - name: events
    skip_existence_check: true
    skip_read: true
outputs:
  - name: events
    skip_write: true
metrics:
  backends:
    - name: logger
      options:
        level: debug
"#;

        let cfg: JobConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.inputs[0].skip_read);
        assert!(cfg.output().skip_write);
        assert_eq!(cfg.metrics.backends.len(), 1);
        assert!(cfg.metrics.backends[0].options.contains_key("level"));
    }

    #[test]
    fn load_and_validate_valid_file() {
        let yaml = r#"
job_name: from-file
inputs:
  - name: events
    location: gs://bucket/in
outputs:
  - name: events
    location: gs://bucket/out
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let cfg = load_and_validate_job_config(file.path()).unwrap();
        assert_eq!(cfg.job_name, "from-file");
    }

    #[test]
    fn load_missing_file_is_unreadable() {
        let err = load_job_config("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigurationError::Unreadable { .. }));
    }

    #[test]
    fn load_and_validate_rejects_multiple_outputs() {
        let yaml = r#"
job_name: too-many
inputs:
  - name: events
    location: gs://bucket/in
outputs:
  - name: one
    location: gs://bucket/a
  - name: two
    location: gs://bucket/b
"#;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let err = load_and_validate_job_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("exactly one is supported"));
    }
}
