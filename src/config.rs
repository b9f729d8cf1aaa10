//! Run configuration.
//!
//! Settings come from three layers, later ones winning: built-in defaults,
//! an optional YAML file, and command-line overrides.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::manifest::RenderConfig;
use crate::topology::GeneratorParams;

/// Top-level configuration structure that mirrors the YAML configuration
///
/// ```yaml
/// seed: 42
/// num_services: 20
/// percent_edge: 50
/// namespace: kuma-test
/// mesh: default
/// image: nicholasjackson/fake-service:v0.21.1
/// with_generator: true
/// dot_output: topology.dot
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// (Optional) Seed for the topology; current time when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
    /// Number of services in the graph
    pub num_services: i64,
    /// Chance in percent for an edge between two eligible services
    pub percent_edge: i64,
    /// Namespace to deploy to
    pub namespace: String,
    /// Mesh to deploy to
    pub mesh: String,
    /// Image every service runs
    pub image: String,
    /// Add a load generator targeting the first service
    pub with_generator: bool,
    /// Reserved, has no effect on output
    pub with_failure: bool,
    /// (Optional) Where to write the Graphviz description of the topology
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_output: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let render = RenderConfig::default();
        Self {
            seed: None,
            num_services: 20,
            percent_edge: 50,
            namespace: render.namespace,
            mesh: render.mesh,
            image: render.image,
            with_generator: render.with_generator,
            with_failure: render.with_failure,
            dot_output: None,
        }
    }
}

/// Command-line values that take precedence over the file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub seed: Option<i64>,
    pub num_services: Option<i64>,
    pub percent_edge: Option<i64>,
    pub namespace: Option<String>,
    pub mesh: Option<String>,
    pub image: Option<String>,
    /// `Some(false)` turns off a flag the file enabled
    pub with_generator: Option<bool>,
    pub with_failure: Option<bool>,
    pub dot_output: Option<PathBuf>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub generator: GeneratorParams,
    pub render: RenderConfig,
    pub dot_output: Option<PathBuf>,
}

impl Config {
    /// Apply command-line overrides on top of this configuration
    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(seed) = overrides.seed {
            self.seed = Some(seed);
        }
        if let Some(count) = overrides.num_services {
            self.num_services = count;
        }
        if let Some(percent) = overrides.percent_edge {
            self.percent_edge = percent;
        }
        if let Some(namespace) = &overrides.namespace {
            self.namespace = namespace.clone();
        }
        if let Some(mesh) = &overrides.mesh {
            self.mesh = mesh.clone();
        }
        if let Some(image) = &overrides.image {
            self.image = image.clone();
        }
        if let Some(path) = &overrides.dot_output {
            self.dot_output = Some(path.clone());
        }
        if let Some(enabled) = overrides.with_generator {
            self.with_generator = enabled;
        }
        if let Some(enabled) = overrides.with_failure {
            self.with_failure = enabled;
        }
    }

    /// Suspicious but accepted values.
    ///
    /// The generator accepts any input, so nothing here is fatal. Call this
    /// after [`Config::apply_overrides`] so command-line values are covered.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.num_services < 0 {
            warnings.push(format!(
                "num_services is negative ({}); no services will be generated",
                self.num_services
            ));
        }
        if !(0..=100).contains(&self.percent_edge) {
            warnings.push(format!(
                "percent_edge {} is outside 0..=100 and behaves like the nearest bound",
                self.percent_edge
            ));
        }
        if self.with_failure {
            warnings.push("with_failure is reserved and currently has no effect".to_string());
        }
        warnings
    }

    /// Resolve into run settings, calling `default_seed` only when no seed
    /// was configured.
    pub fn resolve(self, default_seed: impl FnOnce() -> i64) -> Settings {
        let seed = self.seed.unwrap_or_else(default_seed);
        Settings {
            generator: GeneratorParams {
                seed,
                num_services: self.num_services,
                percent_edge: self.percent_edge,
            },
            render: RenderConfig {
                namespace: self.namespace,
                mesh: self.mesh,
                image: self.image,
                with_generator: self.with_generator,
                with_failure: self.with_failure,
            },
            dot_output: self.dot_output,
        }
    }
}
