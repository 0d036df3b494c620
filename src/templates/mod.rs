//! Test Generation
//!
//! Turns source files into rendered test files:
//! 1. Plan the test path from the configured naming strategy
//! 2. Pick the framework template (component template for JSX sources)
//! 3. Render with `name`, `importPath` and `framework` placeholders
//!
//! Project templates in `.testweave/templates/<name>.tpl` replace built-ins
//! of the same name.

pub mod naming;
pub mod registry;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::config::ConfigV1;
use crate::types::{Result, ScaffoldError};

pub use naming::{component_name, identifier, kebab_case, plan_test_path, relative_import};
pub use registry::{TemplateKind, TemplateRegistry, render_str, template_name};

/// Directory holding project-specific templates
pub const PROJECT_TEMPLATE_DIR: &str = ".testweave/templates";

/// A rendered test file, not yet written
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedTest {
    pub source: PathBuf,
    pub path: PathBuf,
    pub template: String,
    pub content: String,
}

pub struct TestGenerator<'a> {
    root: PathBuf,
    config: &'a ConfigV1,
    registry: TemplateRegistry,
}

impl<'a> TestGenerator<'a> {
    pub fn new(root: impl Into<PathBuf>, config: &'a ConfigV1) -> Self {
        Self {
            root: root.into(),
            config,
            registry: TemplateRegistry::builtin(),
        }
    }

    /// Load `.tpl` files from the project template directory
    pub fn with_project_templates(mut self) -> Result<Self> {
        let dir = self.root.join(PROJECT_TEMPLATE_DIR);
        if !dir.is_dir() {
            return Ok(self);
        }

        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == "tpl")
                && let Some(name) = path.file_stem().and_then(|s| s.to_str())
            {
                debug!("Loading project template {}", path.display());
                let body = std::fs::read_to_string(&path)?;
                self.registry.register(name, body);
            }
        }
        Ok(self)
    }

    /// Plan and render the test for one source file.
    ///
    /// `source` may be absolute or relative to the project root; the planned
    /// path is always relative to the root.
    pub fn plan(&self, source: &Path, template: Option<&str>) -> Result<PlannedTest> {
        let relative = if source.is_absolute() {
            source.strip_prefix(&self.root).map_err(|_| {
                ScaffoldError::file_system(
                    format!(
                        "{} is outside the project root {}",
                        source.display(),
                        self.root.display()
                    ),
                    Some(source),
                )
            })?
        } else {
            source
        };

        let generation = self.config.generation_or_default();
        let path = plan_test_path(relative, &self.config.test_dir, &generation);

        let kind = template_kind(relative);
        let template = match template {
            Some(name) => name.to_string(),
            None => template_name(self.config.framework, kind),
        };

        let stem = relative
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("index");
        let name = match kind {
            TemplateKind::Component => component_name(stem),
            TemplateKind::Unit => identifier(stem),
        };
        let vars = BTreeMap::from([
            ("name".to_string(), name),
            ("importPath".to_string(), relative_import(&path, relative)),
            ("framework".to_string(), self.config.framework.to_string()),
        ]);
        let content = self.registry.render(&template, &vars)?;

        Ok(PlannedTest {
            source: relative.to_path_buf(),
            path,
            template,
            content,
        })
    }
}

/// JSX sources get the component template
pub fn template_kind(source: &Path) -> TemplateKind {
    match source.extension().and_then(|e| e.to_str()) {
        Some("tsx" | "jsx") => TemplateKind::Component,
        _ => TemplateKind::Unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenerationConfig, Naming, default_config};
    use crate::types::{ErrorKind, Framework};
    use tempfile::TempDir;

    #[test]
    fn test_plan_unit_test() {
        let config = default_config();
        let generator = TestGenerator::new("/work/app", &config);

        let planned = generator
            .plan(Path::new("/work/app/src/utils/formatDate.ts"), None)
            .unwrap();
        assert_eq!(planned.path, PathBuf::from("tests/utils/formatDate.test.ts"));
        assert_eq!(planned.template, "vitest-unit");
        assert!(
            planned
                .content
                .contains("import { formatDate } from '../../src/utils/formatDate';")
        );
    }

    #[test]
    fn test_plan_component_colocated() {
        let mut config = default_config();
        config.framework = Framework::Jest;
        config.generation = Some(GenerationConfig {
            colocate: true,
            naming: Naming::Mirror,
        });
        let generator = TestGenerator::new("/work/app", &config);

        let planned = generator
            .plan(Path::new("src/components/user-card.tsx"), None)
            .unwrap();
        assert_eq!(
            planned.path,
            PathBuf::from("src/components/user-card.test.tsx")
        );
        assert_eq!(planned.template, "jest-component");
        assert!(planned.content.contains("import { UserCard } from './user-card';"));
        assert!(planned.content.contains("render(<UserCard />)"));
    }

    #[test]
    fn test_source_outside_root() {
        let config = default_config();
        let generator = TestGenerator::new("/work/app", &config);
        let err = generator.plan(Path::new("/elsewhere/x.ts"), None).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileSystem);
    }

    #[test]
    fn test_project_template_overrides_builtin() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(PROJECT_TEMPLATE_DIR);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("vitest-unit.tpl"), "// custom {{name}}\n").unwrap();

        let config = default_config();
        let generator = TestGenerator::new(temp.path(), &config)
            .with_project_templates()
            .unwrap();
        let planned = generator.plan(Path::new("src/sum.ts"), None).unwrap();
        assert_eq!(planned.content, "// custom sum\n");
    }
}
