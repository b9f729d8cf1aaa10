//! # MeshGen - Random service-mesh topologies for Kuma test environments
//!
//! This library generates a random service-dependency graph from a seed and
//! renders it as Kubernetes and Kuma manifests, ready to be piped into
//! `kubectl apply -f -`.
//!
//! ## Overview
//!
//! Every run is a pure function of its inputs: the same seed, service count
//! and edge percentage always produce the same topology, which makes the
//! output usable as a reproducible test fixture.
//!
//! ## Architecture
//!
//! - `topology`: Service graph types and the seeded DAG generator
//! - `manifest`: Strict templates and the manifest renderer
//! - `config`: Configuration structures and CLI overrides
//! - `config_loader`: YAML configuration file loading
//! - `orchestrator`: Runs generation and rendering against an output sink
//!
//! ## Example Usage
//!
//! ```rust
//! use meshgen::manifest::{render, RenderConfig};
//! use meshgen::topology::generate;
//!
//! let graph = generate(42, 3, 100);
//! let mut out = Vec::new();
//! render(&graph, &RenderConfig::default(), &mut out)?;
//!
//! let text = String::from_utf8(out)?;
//! assert!(text.contains("name: srv-002"));
//! println!("{}", graph.describe());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Topology Shape
//!
//! Services are indexed `0..N` and edges always point from a lower to a
//! higher index, so the graph is acyclic by construction. Edges between
//! nearby indices are more likely than long-range ones.
//!
//! ## Error Handling
//!
//! Library components return typed errors (`TemplateError`, `RenderError`);
//! the orchestrator and binary use `color_eyre` to add context.

pub mod config;
pub mod config_loader;
pub mod manifest;
pub mod orchestrator;
pub mod topology;
