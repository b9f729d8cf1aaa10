//! # Manifest Rendering Module
//!
//! Turns a [`ServiceGraph`](crate::topology::ServiceGraph) into a stream of
//! Kubernetes/Kuma YAML documents ready for `kubectl apply -f -`.
//!
//! ## Document Order
//!
//! 1. Kuma `Mesh` and the `Namespace` that joins it
//! 2. The `fake-client` load generator, when enabled
//! 3. One `StatefulSet` + `Service` pair per graph service, by index
//!
//! Each service receives the URIs of the services it calls in its
//! `UPSTREAM_URIS` environment variable.
//!
//! ## Templates
//!
//! Documents come from minijinja templates compiled once into
//! [`ManifestTemplates`]. The keys each template needs are looked up in the
//! [`TemplateContext`] before the engine runs, and the engine itself treats
//! undefined variables as errors. A missing key fails the run rather than
//! producing an empty field.

pub mod naming;
pub mod renderer;
pub mod template;
pub mod templates;
pub mod types;

pub use renderer::{render, ManifestRenderer, RenderError};
pub use template::{TemplateContext, TemplateError};
pub use templates::{ManifestTemplates, LOAD_GENERATOR, MESH_NAMESPACE, SERVICE};
pub use types::RenderConfig;
