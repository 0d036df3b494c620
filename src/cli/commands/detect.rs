//! Detect Command
//!
//! Print the detection report for the project root.
//!
//! Usage:
//!   testweave detect [--format text|json]

use crate::cli::CommandContext;
use crate::detect::ProjectDetector;
use crate::types::{DetectionReport, Result};

pub async fn run(ctx: &CommandContext, format: &str) -> Result<()> {
    let report = ProjectDetector::new(&ctx.project_root)
        .generate_report()
        .await?;

    if format == "json" {
        ctx.output.raw(&serde_json::to_string_pretty(&report)?);
    } else {
        print_report(ctx, &report);
    }
    Ok(())
}

/// Human-readable report; shared with `init`
pub fn print_report(ctx: &CommandContext, report: &DetectionReport) {
    let out = &ctx.output;
    let project = &report.project;

    out.section("Project");
    out.field("Type", project.project_type);
    out.field("Framework", project.framework);
    out.field("TypeScript", if project.typescript { "yes" } else { "no" });
    out.field(
        "Build tool",
        project
            .build_tool
            .map(|t| t.to_string())
            .unwrap_or_else(|| "none".to_string()),
    );
    out.field("Package manager", project.package_manager);
    out.field("Node", &project.node_version);
    out.field("Confidence", format!("{:.0}%", project.confidence * 100.0));

    let found: Vec<_> = report
        .detected_files
        .iter()
        .filter_map(|(key, path)| path.as_ref().map(|p| (key, p)))
        .collect();
    if !found.is_empty() {
        out.section("Detected files");
        for (key, path) in found {
            out.field(key, ctx.display_path(path));
        }
    }

    if !report.recommendations.is_empty() {
        out.section("Recommendations");
        for recommendation in &report.recommendations {
            out.bullet(recommendation);
        }
    }

    for warning in &report.warnings {
        out.warning(warning);
    }
}
