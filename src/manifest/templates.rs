//! Built-in manifest templates.
//!
//! The document layout here is what downstream tooling (`kubectl apply`)
//! consumes: field names, fixed ports (9090, 80, 5670), resource limits and
//! the load generator image are all part of the output contract.

use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use std::collections::BTreeMap;

use crate::manifest::template::{TemplateContext, TemplateError};

/// Kuma `Mesh` followed by the labelled `Namespace`. Keys: `mesh`, `namespace`.
pub const MESH_NAMESPACE_TEMPLATE: &str = r#"
apiVersion: kuma.io/v1alpha1
kind: Mesh
metadata:
  name: {{ mesh }}
spec:
  metrics:
    backends:
    - conf:
        path: /metrics
        port: 5670
        tags:
          kuma.io/service: dataplane-metrics
      name: prometheus-1
      type: prometheus
    enabledBackend: prometheus-1
  mtls:
    backends:
    - name: ca-1
      type: builtin
    enabledBackend: ca-1
---
apiVersion: v1
kind: Namespace
metadata:
  name: {{ namespace }}
  annotations:
   kuma.io/sidecar-injection: enabled
"#;

/// slow_cooker deployment hammering the first service. Keys: `namespace`,
/// `mesh`, `uri`.
pub const LOAD_GENERATOR_TEMPLATE: &str = r#"
---
apiVersion: apps/v1
kind: Deployment
metadata:
  {% if namespace %}
  namespace: {{ namespace }}
  {% endif %}
  name: "fake-client"
spec:
  replicas: 1
  selector:
    matchLabels:
      app: "fake-client"
  template:
    metadata:
      labels:
        app: "fake-client"
      annotations:
        kuma.io/mesh: {{ mesh }}
    spec:
      containers:
        - name: client
          image: buoyantio/slow_cooker:1.3.0
          args: ["-qps", "1", "-concurrency", "10", "{{ uri }}"]
          resources:
            limits:
              memory: "32Mi"
              cpu: "200m"
"#;

/// Workload and Service pair for one graph node. Keys: `name`, `namespace`,
/// `mesh`, `image`, `uris`.
pub const SERVICE_TEMPLATE: &str = r#"
apiVersion: apps/v1
kind: StatefulSet
metadata:
  name: {{ name }}
  {% if namespace %}
  namespace: {{ namespace }}
  {% endif %}
  labels:
    app: {{ name }}
spec:
  replicas: 1
  selector:
    matchLabels:
      app: {{ name }}
  serviceName: {{ name }}
  template:
    metadata:
      labels:
        app: {{ name }}
      annotations:
        kuma.io/mesh: {{ mesh }}
    spec:
      containers:
        - name: service
          image: {{ image }}
          ports:
            - containerPort: 9090
          env:
            - name: SERVICE
              value: "{{ name }}"
            - name: UPSTREAM_URIS
              value: "{{ uris }}"
          resources:
            limits:
              memory: "64Mi"
              cpu: "100m"
---
apiVersion: v1
kind: Service
metadata:
  name: {{ name }}
  {% if namespace %}
  namespace: {{ namespace }}
  {% endif %}
  annotations:
    80.service.kuma.io/protocol: http
spec:
  selector:
    app: {{ name }}
  ports:
    - protocol: TCP
      port: 80
      targetPort: 9090
"#;

/// Name of the Mesh/Namespace template
pub const MESH_NAMESPACE: &str = "mesh-namespace";
/// Name of the load generator template
pub const LOAD_GENERATOR: &str = "load-generator";
/// Name of the per-service template
pub const SERVICE: &str = "service";

const MESH_NAMESPACE_KEYS: &[&str] = &["mesh", "namespace"];
const LOAD_GENERATOR_KEYS: &[&str] = &["namespace", "mesh", "uri"];
const SERVICE_KEYS: &[&str] = &["name", "namespace", "mesh", "image", "uris"];

/// The template environment used by the renderer.
///
/// Templates are compiled once when the set is built; share it by reference.
pub struct ManifestTemplates {
    env: Environment<'static>,
    keys: BTreeMap<&'static str, &'static [&'static str]>,
}

impl ManifestTemplates {
    /// Compile the built-in templates.
    pub fn builtin() -> Result<Self, TemplateError> {
        let mut templates = Self {
            env: manifest_environment(),
            keys: BTreeMap::new(),
        };
        templates.add(MESH_NAMESPACE, MESH_NAMESPACE_TEMPLATE, MESH_NAMESPACE_KEYS)?;
        templates.add(LOAD_GENERATOR, LOAD_GENERATOR_TEMPLATE, LOAD_GENERATOR_KEYS)?;
        templates.add(SERVICE, SERVICE_TEMPLATE, SERVICE_KEYS)?;
        Ok(templates)
    }

    /// Replace or add a template, along with the keys it requires.
    pub(crate) fn with_template(
        mut self,
        name: &'static str,
        source: &'static str,
        keys: &'static [&'static str],
    ) -> Result<Self, TemplateError> {
        self.add(name, source, keys)?;
        Ok(self)
    }

    fn add(
        &mut self,
        name: &'static str,
        source: &'static str,
        keys: &'static [&'static str],
    ) -> Result<(), TemplateError> {
        self.env.add_template(name, source)?;
        self.keys.insert(name, keys);
        Ok(())
    }

    /// Render template `name`.
    ///
    /// The required keys are resolved from `ctx` first; only those values
    /// reach the engine.
    pub fn render(&self, name: &str, ctx: &TemplateContext) -> Result<String, TemplateError> {
        let keys = self.keys.get(name).copied().unwrap_or_default();
        let values = ctx.resolve(name, keys)?;
        let template = self.env.get_template(name)?;
        Ok(template.render(values)?)
    }
}

/// Plain-text YAML environment: no escaping, strict undefined values, and
/// block tags that consume their whole line.
fn manifest_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.set_keep_trailing_newline(true);
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service_context(namespace: &str) -> TemplateContext {
        TemplateContext::new()
            .with("name", "srv-001")
            .with("namespace", namespace)
            .with("mesh", "default")
            .with("image", "example/app:1.0")
            .with("uris", "")
    }

    #[test]
    fn test_service_template_with_namespace() {
        let templates = ManifestTemplates::builtin().unwrap();
        let doc = templates.render(SERVICE, &service_context("kuma-test")).unwrap();
        assert!(doc.starts_with("\napiVersion: apps/v1\nkind: StatefulSet\n"));
        assert!(doc.contains("metadata:\n  name: srv-001\n  namespace: kuma-test\n  labels:\n"));
        assert!(doc.contains("              value: \"\"\n"));
        assert!(doc.ends_with("      targetPort: 9090\n"));
    }

    #[test]
    fn test_service_template_without_namespace() {
        let templates = ManifestTemplates::builtin().unwrap();
        let doc = templates.render(SERVICE, &service_context("")).unwrap();
        assert!(doc.contains("metadata:\n  name: srv-001\n  labels:\n"));
        assert!(!doc.contains("namespace"));
        assert!(!doc.contains("{%"));
    }

    #[test]
    fn test_missing_context_key_fails_before_rendering() {
        let templates = ManifestTemplates::builtin().unwrap();
        let ctx = TemplateContext::new().with("mesh", "default");
        match templates.render(MESH_NAMESPACE, &ctx) {
            Err(TemplateError::MissingKey { template, key }) => {
                assert_eq!(template, MESH_NAMESPACE);
                assert_eq!(key, "namespace");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_engine_rejects_undeclared_variables() {
        let templates = ManifestTemplates::builtin()
            .unwrap()
            .with_template(SERVICE, "name: {{ name }}\nowner: {{ owner }}\n", &["name"])
            .unwrap();
        let result = templates.render(SERVICE, &TemplateContext::new().with("name", "srv-000"));
        assert!(matches!(result, Err(TemplateError::Engine(_))));
    }
}
