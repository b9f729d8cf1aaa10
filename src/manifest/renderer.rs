//! Manifest rendering.
//!
//! Rendering is one linear pass over the graph. Each document is rendered to
//! a string and written to the sink straight away; the first template or
//! write failure stops the pass and nothing after it is written.

use std::io::Write;

use log::debug;

use crate::manifest::naming::{service_name, service_uri, upstream_uris};
use crate::manifest::template::{TemplateContext, TemplateError};
use crate::manifest::templates::{ManifestTemplates, LOAD_GENERATOR, MESH_NAMESPACE, SERVICE};
use crate::manifest::types::RenderConfig;
use crate::topology::{Service, ServiceGraph};

/// Separator written ahead of every service pair
const DOCUMENT_SEPARATOR: &[u8] = b"---";

/// Errors that abort rendering
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    #[error("failed to write manifest: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders service graphs into manifest streams.
pub struct ManifestRenderer {
    templates: ManifestTemplates,
}

impl ManifestRenderer {
    /// Renderer using the built-in templates
    pub fn new() -> Result<Self, TemplateError> {
        Ok(Self::with_templates(ManifestTemplates::builtin()?))
    }

    pub fn with_templates(templates: ManifestTemplates) -> Self {
        Self { templates }
    }

    /// Write the full document stream for `graph` to `sink`.
    ///
    /// Order: mesh and namespace, the optional load generator, then one
    /// workload/service pair per service in index order.
    pub fn render<W: Write + ?Sized>(
        &self,
        graph: &ServiceGraph,
        config: &RenderConfig,
        sink: &mut W,
    ) -> Result<(), RenderError> {
        self.render_namespace(config, sink)?;

        if config.with_generator {
            self.render_load_generator(config, sink)?;
        }

        for srv in graph.services() {
            sink.write_all(DOCUMENT_SEPARATOR)?;
            self.render_service(srv, config, sink)?;
        }

        debug!("Rendered manifests for {} services", graph.len());
        Ok(())
    }

    fn render_namespace<W: Write + ?Sized>(
        &self,
        config: &RenderConfig,
        sink: &mut W,
    ) -> Result<(), RenderError> {
        let ctx = TemplateContext::new()
            .with("namespace", config.namespace.as_str())
            .with("mesh", config.mesh.as_str());
        let doc = self.templates.render(MESH_NAMESPACE, &ctx)?;
        sink.write_all(doc.as_bytes())?;
        Ok(())
    }

    fn render_load_generator<W: Write + ?Sized>(
        &self,
        config: &RenderConfig,
        sink: &mut W,
    ) -> Result<(), RenderError> {
        let ctx = TemplateContext::new()
            .with("namespace", config.namespace.as_str())
            .with("mesh", config.mesh.as_str())
            .with("uri", service_uri(0, &config.namespace));
        let doc = self.templates.render(LOAD_GENERATOR, &ctx)?;
        sink.write_all(doc.as_bytes())?;
        Ok(())
    }

    fn render_service<W: Write + ?Sized>(
        &self,
        srv: &Service,
        config: &RenderConfig,
        sink: &mut W,
    ) -> Result<(), RenderError> {
        let ctx = TemplateContext::new()
            .with("name", service_name(srv.index()))
            .with("namespace", config.namespace.as_str())
            .with("mesh", config.mesh.as_str())
            .with("image", config.image.as_str())
            .with("uris", upstream_uris(srv, &config.namespace));
        let doc = self.templates.render(SERVICE, &ctx)?;
        sink.write_all(doc.as_bytes())?;
        Ok(())
    }
}

/// Render `graph` with the built-in templates.
pub fn render<W: Write + ?Sized>(
    graph: &ServiceGraph,
    config: &RenderConfig,
    sink: &mut W,
) -> Result<(), RenderError> {
    ManifestRenderer::new()?.render(graph, config, sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::templates::MESH_NAMESPACE_TEMPLATE;
    use crate::topology::generate;
    use std::io;

    /// Accepts `limit` bytes, then fails every write
    struct FailingWriter {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn render_to_string(graph: &ServiceGraph, config: &RenderConfig) -> String {
        let mut out = Vec::new();
        render(graph, config, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_stream_starts_with_mesh_then_namespace() {
        let out = render_to_string(&generate(1, 2, 50), &RenderConfig::default());
        let mesh = out.find("kind: Mesh").unwrap();
        let namespace = out.find("kind: Namespace").unwrap();
        let first_service = out.find("kind: StatefulSet").unwrap();
        assert!(mesh < namespace && namespace < first_service);
        assert!(out.starts_with("\napiVersion: kuma.io/v1alpha1\n"));
    }

    #[test]
    fn test_load_generator_sits_after_namespace() {
        let config = RenderConfig {
            with_generator: true,
            ..RenderConfig::default()
        };
        let out = render_to_string(&generate(1, 4, 50), &config);
        let namespace = out.find("kind: Namespace").unwrap();
        let client = out.find("kind: Deployment").unwrap();
        let first_service = out.find("kind: StatefulSet").unwrap();
        assert!(namespace < client && client < first_service);
        assert!(out.contains(
            r#"args: ["-qps", "1", "-concurrency", "10", "http://srv-000_kuma-test_svc_80.mesh:80"]"#
        ));
        assert_eq!(out.matches("kind: Deployment").count(), 1);
    }

    #[test]
    fn test_load_generator_rendered_for_empty_graph() {
        let config = RenderConfig {
            with_generator: true,
            ..RenderConfig::default()
        };
        let out = render_to_string(&generate(1, 0, 50), &config);
        assert!(out.contains("name: \"fake-client\""));
        assert!(!out.contains("kind: StatefulSet"));
    }

    #[test]
    fn test_no_load_generator_by_default() {
        let out = render_to_string(&generate(1, 4, 50), &RenderConfig::default());
        assert!(!out.contains("fake-client"));
    }

    #[test]
    fn test_service_documents_use_config() {
        let config = RenderConfig {
            namespace: "team-a".to_string(),
            mesh: "blue".to_string(),
            image: "example/app:1.0".to_string(),
            ..RenderConfig::default()
        };
        let out = render_to_string(&generate(5, 1, 50), &config);
        assert!(out.contains("  name: srv-000\n  namespace: team-a\n"));
        assert!(out.contains("kuma.io/mesh: blue"));
        assert!(out.contains("image: example/app:1.0"));
        assert!(out.contains("value: \"srv-000\""));
        assert!(out.contains("value: \"\""));
    }

    #[test]
    fn test_empty_namespace_omits_namespace_lines() {
        let config = RenderConfig {
            namespace: String::new(),
            with_generator: true,
            ..RenderConfig::default()
        };
        let out = render_to_string(&generate(5, 2, 50), &config);
        assert!(!out.contains("  namespace:"));
        assert!(out.contains("metadata:\n  name: srv-000\n  labels:"));
        assert!(out.contains("metadata:\n  name: \"fake-client\""));
    }

    #[test]
    fn test_missing_key_aborts_before_services() {
        let templates = ManifestTemplates::builtin()
            .unwrap()
            .with_template(
                SERVICE,
                "\nkind: StatefulSet\nmetadata:\n  name: {{ name }}\n  owner: {{ owner }}\n",
                &["name", "owner"],
            )
            .unwrap();
        let renderer = ManifestRenderer::with_templates(templates);

        let mut out = Vec::new();
        let err = renderer
            .render(&generate(1, 3, 50), &RenderConfig::default(), &mut out)
            .unwrap_err();

        match err {
            RenderError::Template(TemplateError::MissingKey { template, key }) => {
                assert_eq!(template, "service");
                assert_eq!(key, "owner");
            }
            other => panic!("unexpected error: {other}"),
        }
        let written = String::from_utf8(out).unwrap();
        assert!(written.contains("kind: Namespace"));
        assert!(!written.contains("kind: StatefulSet"));
    }

    #[test]
    fn test_write_failure_stops_rendering() {
        let graph = generate(1, 5, 50);
        let mut full = Vec::new();
        render(&graph, &RenderConfig::default(), &mut full).unwrap();

        let mut sink = FailingWriter {
            written: Vec::new(),
            limit: MESH_NAMESPACE_TEMPLATE.len() + 100,
        };
        let err = render(&graph, &RenderConfig::default(), &mut sink).unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
        assert!(sink.written.len() < full.len());
        assert!(full.starts_with(&sink.written));
    }
}
