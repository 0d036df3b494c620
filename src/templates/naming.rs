//! Test file path planning
//!
//! Maps a source file to the location of its test according to the
//! configured naming strategy.

use std::path::{Component, Path, PathBuf};

use crate::config::{GenerationConfig, Naming};

/// Source roots stripped before mirroring into the test directory
const SOURCE_ROOTS: &[&str] = &["src", "lib"];

/// Test file location for `source` (relative to the project root)
pub fn plan_test_path(source: &Path, test_dir: &str, generation: &GenerationConfig) -> PathBuf {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("index");
    let ext = source.extension().and_then(|e| e.to_str()).unwrap_or("js");

    let stem = match generation.naming {
        Naming::Kebab => kebab_case(stem),
        Naming::Mirror | Naming::Flat => stem.to_string(),
    };

    let parent = source.parent().unwrap_or(Path::new(""));

    if generation.colocate {
        return parent.join(format!("{}.test.{}", stem, ext));
    }

    let dirs = mirrored_dirs(parent);
    let test_root = PathBuf::from(test_dir);

    match generation.naming {
        Naming::Flat => {
            let mut parts = dirs;
            parts.push(stem);
            test_root.join(format!("{}.test.{}", parts.join("-"), ext))
        }
        Naming::Mirror | Naming::Kebab => {
            let mut path = test_root;
            for dir in dirs {
                path.push(dir);
            }
            path.join(format!("{}.test.{}", stem, ext))
        }
    }
}

/// Directory components below the source root
fn mirrored_dirs(parent: &Path) -> Vec<String> {
    let mut dirs: Vec<String> = parent
        .components()
        .filter_map(|c| match c {
            Component::Normal(s) => s.to_str().map(String::from),
            _ => None,
        })
        .collect();

    if dirs
        .first()
        .is_some_and(|first| SOURCE_ROOTS.contains(&first.as_str()))
    {
        dirs.remove(0);
    }
    dirs
}

/// `formatDate` -> `format-date`, `HTTPServer` -> `http-server`
pub fn kebab_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == ' ' || c == '-' {
            if !out.ends_with('-') && !out.is_empty() {
                out.push('-');
            }
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let boundary = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_lower);
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.extend(c.to_lowercase());
    }
    out
}

/// `format-date` / `format_date` -> `formatDate`; other stems unchanged
pub fn identifier(stem: &str) -> String {
    let mut out = String::with_capacity(stem.len());
    let mut upper_next = false;
    for c in stem.chars() {
        if c == '-' || c == '_' || c == '.' || c == ' ' {
            upper_next = !out.is_empty();
            continue;
        }
        if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// JSX component name: `user-card` -> `UserCard`
pub fn component_name(stem: &str) -> String {
    let ident = identifier(stem);
    let mut chars = ident.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => ident,
    }
}

/// Import specifier from the test file to the source module, without extension
pub fn relative_import(test_path: &Path, source: &Path) -> String {
    let from: Vec<Component> = test_path
        .parent()
        .unwrap_or(Path::new(""))
        .components()
        .collect();
    let target = source.with_extension("");
    let to: Vec<Component> = target.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<String> = Vec::new();
    for _ in common..from.len() {
        parts.push("..".to_string());
    }
    for component in &to[common..] {
        parts.push(component.as_os_str().to_string_lossy().to_string());
    }

    let joined = parts.join("/");
    if joined.starts_with("..") {
        joined
    } else {
        format!("./{}", joined)
    }
}
