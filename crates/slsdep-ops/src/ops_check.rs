//! Operation: verify the lock file matches freshly resolved dependencies.

use std::collections::BTreeSet;
use std::path::Path;

use slsdep_util::errors::{SlsError, SlsResult};
use slsdep_util::fs::read_optional;

use crate::{print_report, resolve_project};

/// Resolve and compare against `product-dependencies.lock` (check mode).
///
/// Fails on a missing or malformed lock file, and on any byte-level drift.
pub fn check(project_root: &Path) -> SlsResult<()> {
    let project = resolve_project(project_root)?;
    print_report(&project);

    let expected = project.codec.encode(&project.resolution.dependencies);
    let path = project.lockfile_path.display().to_string();

    let Some(actual) = read_optional(&project.lockfile_path).map_err(SlsError::Io)? else {
        return Err(SlsError::LockfileDrift {
            path,
            diff: diff_lines("", &expected),
        }
        .into());
    };

    if actual == expected {
        eprintln!("Lock file is up to date");
        return Ok(());
    }

    // Surface malformed lines before reporting drift.
    project.codec.decode(&actual)?;

    let diff = match diff_lines(&actual, &expected) {
        d if d.is_empty() => "  (entries match, formatting differs)".to_string(),
        d => d,
    };
    Err(SlsError::LockfileDrift { path, diff }.into())
}

/// Lines present only in `actual` (`-`) or only in `expected` (`+`),
/// ignoring comments and blank lines.
fn diff_lines(actual: &str, expected: &str) -> String {
    let entries = |text: &str| -> BTreeSet<String> {
        text.lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect()
    };
    let actual = entries(actual);
    let expected = entries(expected);

    let removed = actual.difference(&expected).map(|l| format!("  - {l}"));
    let added = expected.difference(&actual).map(|l| format!("  + {l}"));
    removed.chain(added).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diff_lists_removed_then_added() {
        let diff = diff_lines(
            "# header\na:b (1.0.0, 1.x.x)\nc:d (1.0.0, 1.x.x)\n",
            "# header\nc:d (1.0.0, 1.x.x)\ne:f (2.0.0, 2.x.x)\n",
        );
        assert_eq!(diff, "  - a:b (1.0.0, 1.x.x)\n  + e:f (2.0.0, 2.x.x)");
    }

    #[test]
    fn diff_ignores_ordering_and_comments() {
        assert!(diff_lines("# x\nb\na\n", "a\nb\n").is_empty());
    }
}
