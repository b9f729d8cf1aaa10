//! Render configuration types.

/// Settings that shape the rendered manifests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Namespace every workload is deployed to
    pub namespace: String,
    /// Kuma mesh the namespace and workloads join
    pub mesh: String,
    /// Container image run by every service
    pub image: String,
    /// Emit the `fake-client` load generator targeting `srv-000`
    pub with_generator: bool,
    /// Reserved; carried through but not used by any document
    pub with_failure: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            namespace: "kuma-test".to_string(),
            mesh: "default".to_string(),
            image: "nicholasjackson/fake-service:v0.21.1".to_string(),
            with_generator: false,
            with_failure: false,
        }
    }
}
