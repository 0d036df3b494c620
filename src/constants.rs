//! Global Constants
//!
//! Centralized constants for detection, configuration and generation.
//! Marker file names and weights live here rather than inline.

/// Marker files probed during detection
pub mod markers {
    pub const PACKAGE_JSON: &str = "package.json";
    pub const TSCONFIG: &str = "tsconfig.json";

    /// Lockfiles in package-manager priority order
    pub const PNPM_LOCK: &str = "pnpm-lock.yaml";
    pub const YARN_LOCK: &str = "yarn.lock";
    pub const BUN_LOCKS: &[&str] = &["bun.lockb", "bun.lock"];

    pub const VITEST_CONFIGS: &[&str] = &[
        "vitest.config.ts",
        "vitest.config.mts",
        "vitest.config.js",
        "vitest.config.mjs",
    ];
    pub const JEST_CONFIGS: &[&str] = &[
        "jest.config.ts",
        "jest.config.js",
        "jest.config.mjs",
        "jest.config.cjs",
        "jest.config.json",
    ];
    pub const MOCHA_CONFIGS: &[&str] = &[
        ".mocharc.json",
        ".mocharc.js",
        ".mocharc.cjs",
        ".mocharc.yml",
        ".mocharc.yaml",
    ];

    /// Directories never descended into when scanning for sources
    pub const SKIP_DIRS: &[&str] = &[
        "node_modules",
        "dist",
        "build",
        "coverage",
        "out",
        ".git",
        ".next",
    ];

    pub const TYPESCRIPT_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts"];

    /// Files `generate` accepts when expanding a directory
    pub const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"];

    /// Stem suffixes that mark a file as a test already
    pub const TEST_SUFFIXES: &[&str] = &[".test", ".spec"];
}

/// Confidence scoring weights (sum to 1.0)
pub mod confidence {
    pub const TYPE_WEIGHT: f64 = 0.3;
    pub const FRAMEWORK_WEIGHT: f64 = 0.5;
    pub const TYPESCRIPT_WEIGHT: f64 = 0.2;

    /// Reports below this score carry a low-confidence warning
    pub const LOW_CONFIDENCE_THRESHOLD: f64 = 0.7;

    /// Oldest Node major release that does not trigger an upgrade hint
    pub const MIN_NODE_MAJOR: u64 = 18;
}

/// Configuration file discovery
pub mod config {
    /// Only accepted configuration schema version
    pub const CONFIG_VERSION: &str = "1.0.0";

    /// Field inside package.json holding embedded configuration
    pub const PACKAGE_JSON_FIELD: &str = "testweave";

    /// Dedicated config files, searched after the package.json field
    pub const SEARCH_FILES: &[&str] = &[
        ".testweaverc",
        ".testweaverc.json",
        ".testweaverc.js",
        "testweave.config.js",
        "testweave.config.ts",
    ];

    /// File written by `init`
    pub const DEFAULT_CONFIG_FILE: &str = ".testweaverc.json";

    pub const DEFAULT_TEST_DIR: &str = "tests";
    pub const DEFAULT_TEST_PATTERN: &str = "**/*.test.{ts,js}";
}

/// Plugin resolution
pub mod plugins {
    /// Per-project directory holding plugin manifests
    pub const LOCAL_PLUGIN_DIR: &str = ".testweave/plugins";

    /// Required major version of the plugin API
    pub const API_MAJOR: u64 = 1;

    pub const PREFIX: &str = "testweave-plugin-";
}
