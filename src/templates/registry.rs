//! Built-in test templates
//!
//! Templates are plain text with `{{placeholder}}` markers. Rendering is
//! literal substitution: no escaping, no conditionals, and placeholders
//! without a value are left untouched.

use std::collections::BTreeMap;

use crate::types::{Framework, Result, ScaffoldError};

const VITEST_UNIT: &str = r#"import { describe, it, expect } from 'vitest';
import { {{name}} } from '{{importPath}}';

describe('{{name}}', () => {
  it('should be defined', () => {
    expect({{name}}).toBeDefined();
  });
});
"#;

const VITEST_COMPONENT: &str = r#"import { describe, it, expect } from 'vitest';
import { render } from '@testing-library/react';
import { {{name}} } from '{{importPath}}';

describe('{{name}}', () => {
  it('renders without crashing', () => {
    const { container } = render(<{{name}} />);
    expect(container).toBeTruthy();
  });
});
"#;

const JEST_UNIT: &str = r#"import { {{name}} } from '{{importPath}}';

describe('{{name}}', () => {
  it('should be defined', () => {
    expect({{name}}).toBeDefined();
  });
});
"#;

const JEST_COMPONENT: &str = r#"import { render } from '@testing-library/react';
import { {{name}} } from '{{importPath}}';

describe('{{name}}', () => {
  it('renders without crashing', () => {
    const { container } = render(<{{name}} />);
    expect(container).toBeTruthy();
  });
});
"#;

const MOCHA_UNIT: &str = r#"import assert from 'node:assert/strict';
import { {{name}} } from '{{importPath}}';

describe('{{name}}', function () {
  it('should be defined', function () {
    assert.ok({{name}});
  });
});
"#;

const MOCHA_COMPONENT: &str = r#"import assert from 'node:assert/strict';
import { render } from '@testing-library/react';
import { {{name}} } from '{{importPath}}';

describe('{{name}}', function () {
  it('renders without crashing', function () {
    const { container } = render(<{{name}} />);
    assert.ok(container);
  });
});
"#;

/// Kind of test a template produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Unit,
    Component,
}

impl TemplateKind {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Unit => "unit",
            Self::Component => "component",
        }
    }
}

/// Name of the built-in template for a framework and kind
pub fn template_name(framework: Framework, kind: TemplateKind) -> String {
    format!("{}-{}", framework, kind.suffix())
}

pub struct TemplateRegistry {
    templates: BTreeMap<String, String>,
}

impl TemplateRegistry {
    /// Registry holding the built-in unit and component templates
    pub fn builtin() -> Self {
        let builtin = [
            ("vitest-unit", VITEST_UNIT),
            ("vitest-component", VITEST_COMPONENT),
            ("jest-unit", JEST_UNIT),
            ("jest-component", JEST_COMPONENT),
            ("mocha-unit", MOCHA_UNIT),
            ("mocha-component", MOCHA_COMPONENT),
        ];
        Self {
            templates: builtin
                .into_iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
        }
    }

    /// Add or replace a template
    pub fn register(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.templates.insert(name.into(), body.into());
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn get(&self, name: &str) -> Result<&str> {
        self.templates.get(name).map(String::as_str).ok_or_else(|| {
            ScaffoldError::file_system(
                format!(
                    "Unknown template '{}'. Available: {}",
                    name,
                    self.names().collect::<Vec<_>>().join(", ")
                ),
                None,
            )
        })
    }

    pub fn render(&self, name: &str, vars: &BTreeMap<String, String>) -> Result<String> {
        Ok(render_str(self.get(name)?, vars))
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Replace each `{{key}}` with its value in one pass.
///
/// Values are inserted literally; unknown placeholders are kept.
pub fn render_str(template: &str, vars: &BTreeMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        match vars.get(&after[..end]) {
            Some(value) => out.push_str(value),
            None => out.push_str(&rest[start..start + end + 4]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorKind;

    fn vars() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("name".to_string(), "formatDate".to_string()),
            ("importPath".to_string(), "../src/formatDate".to_string()),
        ])
    }

    #[test]
    fn test_render_substitutes_placeholders() {
        let registry = TemplateRegistry::builtin();
        let out = registry.render("vitest-unit", &vars()).unwrap();

        assert!(out.contains("import { formatDate } from '../src/formatDate';"));
        assert!(out.contains("describe('formatDate'"));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn test_unknown_placeholder_left_alone() {
        let out = render_str("{{name}} {{other}}", &vars());
        assert_eq!(out, "formatDate {{other}}");
    }

    #[test]
    fn test_values_are_inserted_literally() {
        let vars = BTreeMap::from([
            ("name".to_string(), "{{importPath}}".to_string()),
            ("importPath".to_string(), "./{{name}}/x".to_string()),
        ]);
        let out = render_str("{{name}} from '{{importPath}}' {{", &vars);
        assert_eq!(out, "{{importPath}} from './{{name}}/x' {{");
    }

    #[test]
    fn test_unknown_template_is_filesystem_error() {
        let registry = TemplateRegistry::builtin();
        let err = registry.render("ava-unit", &vars()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileSystem);
        assert!(err.to_string().contains("vitest-unit"));
    }

    #[test]
    fn test_template_name() {
        assert_eq!(
            template_name(Framework::Jest, TemplateKind::Component),
            "jest-component"
        );
        let registry = TemplateRegistry::builtin();
        for framework in Framework::SUPPORTED {
            for kind in [TemplateKind::Unit, TemplateKind::Component] {
                assert!(registry.get(&template_name(framework, kind)).is_ok());
            }
        }
    }
}
