//! Manifest plugins
//!
//! A manifest plugin is a JSON file:
//!
//! ```json
//! {
//!   "metadata": { "name": "...", "version": "1.0.0", "description": "..." },
//!   "hooks": { "onInit": ["node", "init.js"], "onGenerate": ["./gen.sh"] }
//! }
//! ```
//!
//! Each hook command runs in the project root with the hook context as JSON
//! on stdin. A non-zero exit status fails the hook.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use super::{Hook, Plugin, PluginContext, PluginMetadata};
use crate::types::{Result, ScaffoldError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginManifest {
    pub metadata: PluginMetadata,
    #[serde(default)]
    pub hooks: ManifestHooks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestHooks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_init: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_generate: Option<Vec<String>>,
}

pub struct ManifestPlugin {
    manifest: PluginManifest,
}

impl ManifestPlugin {
    /// Parse and structurally validate a manifest file
    pub fn from_file(path: &Path) -> std::result::Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
        let manifest: PluginManifest = serde_json::from_str(&content)
            .map_err(|e| format!("invalid plugin manifest {}: {}", path.display(), e))?;

        let mut failures = manifest.metadata.validate();
        for (hook, command) in [
            ("onInit", &manifest.hooks.on_init),
            ("onGenerate", &manifest.hooks.on_generate),
        ] {
            if command.as_ref().is_some_and(|c| c.is_empty()) {
                failures.push(format!("hooks.{} must name a command", hook));
            }
        }
        if !failures.is_empty() {
            return Err(format!("{}: {}", path.display(), failures.join("; ")));
        }

        Ok(Self { manifest })
    }

    async fn run_command(&self, hook: Hook, command: &[String], ctx: &PluginContext) -> Result<()> {
        let name = &self.manifest.metadata.name;
        let Some((program, args)) = command.split_first() else {
            return Ok(());
        };
        debug!("Running {} hook of {}: {:?}", hook, name, command);

        let hook_error = |message: String| {
            ScaffoldError::plugin(
                format!("{} hook failed: {}", hook, message),
                Some(name.as_str()),
            )
        };

        let mut child = Command::new(program)
            .args(args)
            .current_dir(&ctx.project_root)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| hook_error(format!("cannot start {}: {}", program, e)))?;

        let payload = serde_json::to_vec(ctx)?;
        if let Some(mut stdin) = child.stdin.take() {
            // A hook that never reads stdin closes the pipe early; not an error
            if let Err(e) = stdin.write_all(&payload).await {
                debug!("{} hook of {} did not read its context: {}", hook, name, e);
            }
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|e| hook_error(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(hook_error(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Plugin for ManifestPlugin {
    fn metadata(&self) -> &PluginMetadata {
        &self.manifest.metadata
    }

    fn hooks(&self) -> Vec<Hook> {
        let mut hooks = Vec::new();
        if self.manifest.hooks.on_init.is_some() {
            hooks.push(Hook::Init);
        }
        if self.manifest.hooks.on_generate.is_some() {
            hooks.push(Hook::Generate);
        }
        hooks
    }

    async fn on_init(&self, ctx: &PluginContext) -> Result<()> {
        match &self.manifest.hooks.on_init {
            Some(command) => self.run_command(Hook::Init, command, ctx).await,
            None => Ok(()),
        }
    }

    async fn on_generate(&self, ctx: &PluginContext) -> Result<()> {
        match &self.manifest.hooks.on_generate {
            Some(command) => self.run_command(Hook::Generate, command, ctx).await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_parse_valid_manifest() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "p.json",
            r#"{"metadata": {"name": "custom", "version": "1.2.0", "description": "d", "author": "me"},
                "hooks": {"onInit": ["true"]}}"#,
        );
        let plugin = ManifestPlugin::from_file(&path).unwrap();
        assert_eq!(plugin.metadata().name, "custom");
        assert_eq!(plugin.metadata().author.as_deref(), Some("me"));
        assert_eq!(plugin.hooks(), vec![Hook::Init]);
    }

    #[test]
    fn test_rejects_incompatible_version() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "p.json",
            r#"{"metadata": {"name": "custom", "version": "2.0.0", "description": "d"}}"#,
        );
        let err = ManifestPlugin::from_file(&path).err().unwrap();
        assert!(err.contains("incompatible"));
    }

    #[test]
    fn test_rejects_bad_shape() {
        let temp = TempDir::new().unwrap();
        let path = write(&temp, "p.json", r#"{"metadata": {"name": "x"}}"#);
        assert!(ManifestPlugin::from_file(&path).is_err());

        let path = write(
            &temp,
            "q.json",
            r#"{"metadata": {"name": "x", "version": "1.0.0", "description": "d"},
                "hooks": {"onGenerate": []}}"#,
        );
        assert!(ManifestPlugin::from_file(&path).is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_hook_exit_status() {
        let temp = TempDir::new().unwrap();
        let path = write(
            &temp,
            "p.json",
            r#"{"metadata": {"name": "custom", "version": "1.0.0", "description": "d"},
                "hooks": {"onInit": ["sh", "-c", "cat > ctx.json"], "onGenerate": ["false"]}}"#,
        );
        let plugin = ManifestPlugin::from_file(&path).unwrap();
        let ctx = PluginContext::new(Hook::Init, temp.path(), default_config());

        plugin.on_init(&ctx).await.unwrap();
        let received = std::fs::read_to_string(temp.path().join("ctx.json")).unwrap();
        assert!(received.contains("\"hook\":\"onInit\""));

        let err = plugin.on_generate(&ctx).await.unwrap_err();
        assert_eq!(err.kind(), crate::types::ErrorKind::Plugin);
    }
}
