//! Signal Detectors
//!
//! Each detector classifies one project attribute from local evidence.
//! Read/parse failures degrade the signal to its unknown/false/default value;
//! only an unexpected task failure surfaces as an error.

use tokio::process::Command;
use tracing::debug;

use super::manifest::read_manifest;
use super::probe::FsProbe;
use super::scanner::SourceScanner;
use crate::constants::markers::{
    BUN_LOCKS, PNPM_LOCK, TSCONFIG, TYPESCRIPT_EXTENSIONS, YARN_LOCK,
};
use crate::types::{BuildTool, Framework, PackageManager, ProjectType, Result, ScaffoldError};

/// `typescript` if a tsconfig exists or any TypeScript source is found,
/// otherwise `javascript`. `unknown` only when the root cannot be listed.
pub async fn detect_project_type(probe: &FsProbe) -> Result<ProjectType> {
    if probe.exists(TSCONFIG).await {
        return Ok(ProjectType::TypeScript);
    }

    let root = probe.root().to_path_buf();
    let scan = tokio::task::spawn_blocking(move || {
        SourceScanner::new(&root)
            .with_extensions(TYPESCRIPT_EXTENSIONS)
            .any_match()
    })
    .await
    .map_err(|e| {
        ScaffoldError::detection(probe.root(), format!("source scan task failed: {}", e))
    })?;

    Ok(match scan {
        Ok(true) => ProjectType::TypeScript,
        Ok(false) => ProjectType::JavaScript,
        Err(e) => {
            debug!("Source scan of {} failed: {}", probe.root().display(), e);
            ProjectType::Unknown
        }
    })
}

/// First of vitest, jest, mocha found among the manifest dependencies
pub async fn detect_framework(probe: &FsProbe) -> Framework {
    let Some(manifest) = read_manifest(probe).await else {
        return Framework::Unknown;
    };

    Framework::SUPPORTED
        .into_iter()
        .find(|framework| manifest.has_dependency(framework.as_str()))
        .unwrap_or(Framework::Unknown)
}

pub async fn detect_typescript(probe: &FsProbe) -> bool {
    if probe.exists(TSCONFIG).await {
        return true;
    }
    read_manifest(probe)
        .await
        .is_some_and(|m| m.has_dependency("typescript"))
}

/// vite, webpack, esbuild, then tsc via the typescript dependency
pub async fn detect_build_tool(probe: &FsProbe) -> Option<BuildTool> {
    let manifest = read_manifest(probe).await?;

    const ORDER: [(&str, BuildTool); 4] = [
        ("vite", BuildTool::Vite),
        ("webpack", BuildTool::Webpack),
        ("esbuild", BuildTool::Esbuild),
        ("typescript", BuildTool::Tsc),
    ];

    ORDER
        .into_iter()
        .find(|(dep, _)| manifest.has_dependency(dep))
        .map(|(_, tool)| tool)
}

/// Lockfile checks run concurrently; pnpm, yarn, bun in priority order
pub async fn detect_package_manager(probe: &FsProbe) -> PackageManager {
    let (pnpm, yarn, bun) = tokio::join!(
        probe.exists(PNPM_LOCK),
        probe.exists(YARN_LOCK),
        probe.find_first(BUN_LOCKS),
    );

    if pnpm {
        PackageManager::Pnpm
    } else if yarn {
        PackageManager::Yarn
    } else if bun.is_some() {
        PackageManager::Bun
    } else {
        PackageManager::Npm
    }
}

/// Version of the `node` binary on PATH, without the leading `v`
pub async fn detect_node_version() -> Option<String> {
    let output = match Command::new("node").arg("--version").output().await {
        Ok(output) if output.status.success() => output,
        Ok(output) => {
            debug!("node --version exited with {}", output.status);
            return None;
        }
        Err(e) => {
            debug!("node runtime not available: {}", e);
            return None;
        }
    };

    let version = String::from_utf8_lossy(&output.stdout);
    let version = version.trim().trim_start_matches('v');
    (!version.is_empty()).then(|| version.to_string())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_manifest(dir: &TempDir, body: &str) {
        fs::write(dir.path().join("package.json"), body).unwrap();
    }

    #[tokio::test]
    async fn test_framework_priority() {
        let temp = TempDir::new().unwrap();
        write_manifest(
            &temp,
            r#"{"dependencies": {"jest": "^29.0.0"}, "devDependencies": {"vitest": "^1.0.0"}}"#,
        );
        let probe = FsProbe::new(temp.path());
        assert_eq!(detect_framework(&probe).await, Framework::Vitest);
    }

    #[tokio::test]
    async fn test_framework_mocha_and_missing() {
        let temp = TempDir::new().unwrap();
        let probe = FsProbe::new(temp.path());
        assert_eq!(detect_framework(&probe).await, Framework::Unknown);

        write_manifest(&temp, r#"{"devDependencies": {"mocha": "^10.0.0"}}"#);
        assert_eq!(detect_framework(&probe).await, Framework::Mocha);

        write_manifest(&temp, "not json");
        assert_eq!(detect_framework(&probe).await, Framework::Unknown);
    }

    #[tokio::test]
    async fn test_package_manager_priority() {
        let temp = TempDir::new().unwrap();
        let probe = FsProbe::new(temp.path());
        assert_eq!(detect_package_manager(&probe).await, PackageManager::Npm);

        fs::write(temp.path().join("bun.lockb"), "").unwrap();
        assert_eq!(detect_package_manager(&probe).await, PackageManager::Bun);

        fs::write(temp.path().join("yarn.lock"), "").unwrap();
        assert_eq!(detect_package_manager(&probe).await, PackageManager::Yarn);

        fs::write(temp.path().join("pnpm-lock.yaml"), "").unwrap();
        assert_eq!(detect_package_manager(&probe).await, PackageManager::Pnpm);
    }

    #[tokio::test]
    async fn test_typescript_usage() {
        let temp = TempDir::new().unwrap();
        let probe = FsProbe::new(temp.path());
        assert!(!detect_typescript(&probe).await);

        write_manifest(&temp, r#"{"devDependencies": {"typescript": "^5.0.0"}}"#);
        assert!(detect_typescript(&probe).await);

        write_manifest(&temp, "{}");
        fs::write(temp.path().join("tsconfig.json"), "{}").unwrap();
        assert!(detect_typescript(&probe).await);
    }

    #[tokio::test]
    async fn test_build_tool_priority() {
        let temp = TempDir::new().unwrap();
        let probe = FsProbe::new(temp.path());
        assert_eq!(detect_build_tool(&probe).await, None);

        write_manifest(&temp, r#"{"devDependencies": {"typescript": "5", "esbuild": "0.20"}}"#);
        assert_eq!(detect_build_tool(&probe).await, Some(BuildTool::Esbuild));

        write_manifest(
            &temp,
            r#"{"devDependencies": {"webpack": "5", "vite": "5", "typescript": "5"}}"#,
        );
        assert_eq!(detect_build_tool(&probe).await, Some(BuildTool::Vite));

        write_manifest(&temp, r#"{"devDependencies": {"typescript": "5"}}"#);
        assert_eq!(detect_build_tool(&probe).await, Some(BuildTool::Tsc));
    }

    #[tokio::test]
    async fn test_project_type() {
        let temp = TempDir::new().unwrap();
        let probe = FsProbe::new(temp.path());
        assert_eq!(
            detect_project_type(&probe).await.unwrap(),
            ProjectType::JavaScript
        );

        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/app.tsx"), "").unwrap();
        assert_eq!(
            detect_project_type(&probe).await.unwrap(),
            ProjectType::TypeScript
        );
    }

    #[tokio::test]
    async fn test_project_type_tsconfig_shortcut() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("tsconfig.json"), "{}").unwrap();
        let probe = FsProbe::new(temp.path());
        assert_eq!(
            detect_project_type(&probe).await.unwrap(),
            ProjectType::TypeScript
        );
    }

    #[tokio::test]
    async fn test_project_type_unreadable_root() {
        let temp = TempDir::new().unwrap();
        let probe = FsProbe::new(temp.path().join("missing"));
        assert_eq!(
            detect_project_type(&probe).await.unwrap(),
            ProjectType::Unknown
        );
    }
}
