//! Service naming and in-mesh addressing.

use crate::topology::Service;

/// Kubernetes name of the service at `index`, e.g. `srv-007`.
pub fn service_name(index: usize) -> String {
    format!("srv-{:03}", index)
}

/// Mesh-internal URI for the service at `index` in `namespace`.
///
/// ```
/// use meshgen::manifest::naming::service_uri;
///
/// assert_eq!(service_uri(7, "kuma-test"), "http://srv-007_kuma-test_svc_80.mesh:80");
/// ```
pub fn service_uri(index: usize, namespace: &str) -> String {
    format!("http://{}_{}_svc_80.mesh:80", service_name(index), namespace)
}

/// Comma-joined URIs of every service `service` calls, in edge order.
///
/// Empty when the service has no outgoing edges.
pub fn upstream_uris(service: &Service, namespace: &str) -> String {
    service
        .edges()
        .iter()
        .map(|&target| service_uri(target, namespace))
        .collect::<Vec<_>>()
        .join(",")
}
