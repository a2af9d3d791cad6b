// src/inventory.rs

//! Installed package and module stream inventory.
//!
//! The inventory is built from `rpm -qa` output where every line carries a
//! package name and its MODULARITYLABEL (or the literal `(none)` for
//! non-modular packages). Modular packages are grouped by their
//! `name:stream` key; any further label components (module context hash,
//! architecture) are ignored.

use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};

/// Query arguments producing one `<name> <label>` line per installed package
pub const RPM_QUERY_ARGS: [&str; 4] = ["rpm", "-qa", "--qf", "%{NAME} %{MODULARITYLABEL}\\n"];

/// Installed packages split into modular streams and plain packages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inventory {
    /// Module stream key (`name:stream`) to packages installed from it,
    /// in query output order
    pub modules: BTreeMap<String, Vec<String>>,
    /// Non-modular installed package names, sorted and deduplicated
    pub packages: Vec<String>,
}

/// Parse `rpm -qa` modularity output into an [`Inventory`]
pub fn parse_rpm_output(output: &str) -> Result<Inventory> {
    let mut modules: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut packages = BTreeSet::new();

    for line in output.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (package_name, label) = line
            .split_once(' ')
            .map(|(name, label)| (name.trim(), label.trim()))
            .ok_or_else(|| Error::MalformedLine(line.to_string()))?;

        if label == "(none)" {
            packages.insert(package_name.to_string());
            continue;
        }

        let mut label_parts = label.split(':');
        let (name, stream) = (label_parts.next().unwrap_or(""), label_parts.next().unwrap_or(""));
        if name.is_empty() || stream.is_empty() {
            return Err(Error::InvalidModularityLabel {
                package: package_name.to_string(),
                label: label.to_string(),
            });
        }

        modules
            .entry(format!("{name}:{stream}"))
            .or_default()
            .push(package_name.to_string());
    }

    Ok(Inventory {
        modules,
        packages: packages.into_iter().collect(),
    })
}

/// Collect the installed inventory by running the rpm query through the
/// provided command runner
///
/// The runner receives the canonical [`RPM_QUERY_ARGS`] argv and returns the
/// command's stdout; the parser itself never executes anything.
pub fn collect_installed<F>(run_command: F) -> Result<Inventory>
where
    F: FnOnce(&[&str]) -> Result<String>,
{
    let output = run_command(&RPM_QUERY_ARGS)?;
    parse_rpm_output(&output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_output() {
        let output = "\
bash (none)
nodejs nodejs:18:8060020240126234032:ad008a3a
nodejs-libs nodejs:18:8060020240126234032:ad008a3a
zlib (none)
bash (none)
";
        let inventory = parse_rpm_output(output).unwrap();
        assert_eq!(inventory.packages, vec!["bash", "zlib"]);
        assert_eq!(
            inventory.modules.get("nodejs:18").unwrap(),
            &vec!["nodejs".to_string(), "nodejs-libs".to_string()]
        );
    }

    #[test]
    fn test_blank_lines_only_yield_empty_inventory() {
        let inventory = parse_rpm_output("\n\n   \n\n").unwrap();
        assert!(inventory.packages.is_empty());
        assert!(inventory.modules.is_empty());
    }

    #[test]
    fn test_extra_label_components_ignored() {
        let inventory = parse_rpm_output("perl perl:5.32:ctx:x86_64\n").unwrap();
        assert!(inventory.modules.contains_key("perl:5.32"));
    }

    #[test]
    fn test_packages_sorted_and_deduplicated() {
        let inventory = parse_rpm_output("zsh (none)\nbash (none)\nzsh (none)\n").unwrap();
        assert_eq!(inventory.packages, vec!["bash", "zsh"]);
    }

    #[test]
    fn test_module_packages_keep_insertion_order() {
        let output = "b-pkg m:1\na-pkg m:1\n";
        let inventory = parse_rpm_output(output).unwrap();
        assert_eq!(inventory.modules.get("m:1").unwrap(), &vec!["b-pkg", "a-pkg"]);
    }

    #[test]
    fn test_single_column_line_is_malformed() {
        let err = parse_rpm_output("onlyonecolumn\n").unwrap_err();
        match err {
            Error::MalformedLine(line) => assert_eq!(line, "onlyonecolumn"),
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn test_label_without_stream_is_invalid() {
        let err = parse_rpm_output("pkg-a badlabel\n").unwrap_err();
        match err {
            Error::InvalidModularityLabel { package, label } => {
                assert_eq!(package, "pkg-a");
                assert_eq!(label, "badlabel");
            }
            other => panic!("expected InvalidModularityLabel, got {other:?}"),
        }
    }

    #[test]
    fn test_label_with_empty_components_is_invalid() {
        assert!(parse_rpm_output("pkg-a :18\n").is_err());
        assert!(parse_rpm_output("pkg-a nodejs:\n").is_err());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let output = "bash (none)\nnodejs nodejs:18\n";
        assert_eq!(parse_rpm_output(output).unwrap(), parse_rpm_output(output).unwrap());
    }

    #[test]
    fn test_collect_installed_passes_canonical_argv() {
        let inventory = collect_installed(|argv| {
            assert_eq!(argv, RPM_QUERY_ARGS);
            Ok("bash (none)\n".to_string())
        })
        .unwrap();
        assert_eq!(inventory.packages, vec!["bash"]);
    }

    #[test]
    fn test_collect_installed_propagates_runner_failure() {
        let err = collect_installed(|_| Err(Error::Command("rpm exited with 1".to_string())))
            .unwrap_err();
        assert!(matches!(err, Error::Command(_)));
    }
}
