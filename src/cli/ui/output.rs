use console::style;

/// Styled terminal output for command results.
///
/// Progress and diagnostics go through `tracing`; this is for what the user
/// asked to see. `quiet` silences everything except errors.
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn section(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold());
            println!("{}", "─".repeat(40));
        }
    }

    /// Aligned `label: value` line
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        if !self.quiet {
            println!("  {:<18} {}", style(format!("{}:", label)).dim(), value);
        }
    }

    pub fn bullet(&self, message: &str) {
        if !self.quiet {
            println!("  • {}", message);
        }
    }

    /// Raw text, such as JSON documents; printed even when quiet
    pub fn raw(&self, text: &str) {
        println!("{}", text);
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}
