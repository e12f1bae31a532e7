use super::helpers::{stderr, stdout, TestProject, GPL3};

const PASSING_POLICY: &str = "whitelist:
  - BSD-3-Clause
blacklist:
  - GPL-3.0
exceptions:
  - github.com/fake/nested/...
";

#[test]
fn test_list_reports_direct_and_inherited_licenses() {
    let project = TestProject::fake();

    let output = project.run_auditor(&["list", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let listed: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["package"], "github.com/fake/nested/inside/a/package");
    assert_eq!(listed[0]["license"], "MIT");
    assert_eq!(listed[0]["source"]["kind"], "inherited");
    assert_eq!(listed[1]["package"], "github.com/fake/package");
    assert_eq!(listed[1]["license"], "BSD-3-Clause");

    // stdlib imports never show up
    assert!(!stdout(&output).contains("\"fmt\""));
    assert!(stderr(&output).contains("found license"));
}

#[test]
fn test_list_alias_and_table() {
    let project = TestProject::fake();

    let output = project.run_auditor(&["ls"]);
    assert!(output.status.success());
    let table = stdout(&output);
    assert!(table.contains("github.com/fake/package"));
    assert!(table.contains("parent path"));
}

#[test]
fn test_list_warns_on_unlicensed_package() {
    let project = TestProject::fake();
    project.write("main.go", "package main\n\nimport \"github.com/bare/pkg\"\n");
    project.write("vendor/github.com/bare/pkg/pkg.go", "package pkg\n");

    let output = project.run_auditor(&["list", "--format", "json"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("UNKNOWN"));
    assert!(stderr(&output).contains("did not find recognized license"));
}

#[test]
fn test_check_passes_with_exceptions() {
    let project = TestProject::fake();
    project.write(".vendor-license.yml", PASSING_POLICY);

    let output = project.run_auditor(&["check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("No violations found"));

    let logs = stderr(&output);
    assert!(logs.contains("found approved license"));
    assert!(logs.contains("found exceptioned package"));
}

#[test]
fn test_check_quiet_hides_accepted_packages() {
    let project = TestProject::fake();
    project.write(".vendor-license.yml", PASSING_POLICY);

    let output = project.run_auditor(&["check", "-q"]);
    assert!(output.status.success());
    assert!(!stderr(&output).contains("found approved license"));
}

#[test]
fn test_check_fails_on_blacklisted_license() {
    let project = TestProject::fake();
    project.write("vendor/github.com/fake/package/LICENSE", GPL3);
    project.write(".vendor-license.yml", PASSING_POLICY);

    let output = project.run_auditor(&["chk"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("Violations Found"));

    let logs = stderr(&output);
    assert!(logs.contains("found non-approved license"));
    assert!(logs.contains("non-approved license found in 1 package(s)"));
    assert!(logs.contains("github.com/fake/package (GPL-3.0)"));
}

#[test]
fn test_check_exit_zero_and_json_report() {
    let project = TestProject::fake();
    project.write(".vendor-license.yml", "whitelist: [Apache-2.0]\n");

    let output = project.run_auditor(&["check", "--format", "json", "--exit-zero", "-o", "report.json"]);
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_str(&project.read("report.json")).unwrap();
    assert_eq!(report["passed"], false);
    assert_eq!(report["summary"]["violating"], 2);
    assert_eq!(report["violations"].as_array().unwrap().len(), 2);
}

#[test]
fn test_check_wildcard_exception_covers_all_packages() {
    let project = TestProject::fake();
    project.write(".vendor-license.toml", "exceptions = [\"github.com/fake/...\"]\n");

    let output = project.run_auditor(&["check", "-f", ".vendor-license.toml", "--all"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("0 violations"));
    assert!(stdout(&output).contains("Exception"));
}

#[test]
fn test_check_override_replaces_detected_license() {
    let project = TestProject::fake();
    project.write("vendor/github.com/fake/package/LICENSE", GPL3);
    project.write(
        ".vendor-license.yml",
        "whitelist: [MIT, BSD-3-Clause]\noverrides:\n  github.com/fake/package: BSD-3-Clause\n",
    );

    let output = project.run_auditor(&["check"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_check_missing_config() {
    let project = TestProject::fake();

    let output = project.run_auditor(&["check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("can't read config file"));
}

#[test]
fn test_check_botched_config() {
    let project = TestProject::fake();
    project.write(".vendor-license.yml", "whitelist: [MIT\nthis is not yaml: :\n");

    let output = project.run_auditor(&["check"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("can't read config file"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_check_with_root_flag() {
    let project = TestProject::fake();
    project.write(".vendor-license.yml", PASSING_POLICY);
    let config = project.file(".vendor-license.yml");
    let root = project.path().to_str().unwrap();

    let output = std::process::Command::new(&project.binary_path)
        .args(["check", "--root", root, "-f", config.to_str().unwrap()])
        .current_dir(std::env::temp_dir())
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));
}

#[test]
fn test_graph_prints_dot() {
    let project = TestProject::fake();

    let output = project.run_auditor(&["graph"]);
    assert!(output.status.success());
    let dot = stdout(&output);
    assert!(dot.starts_with("digraph {"));
    assert!(dot.contains("\t\".\" [label=\"root\"];"));
    assert!(dot.contains("\".\" -> \"github.com/fake/package\";"));
    assert!(dot.contains("\".\" -> \"github.com/fake/nested/inside/a/package\";"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn test_init_then_check() {
    let project = TestProject::fake();

    let init = project.run_auditor(&["init", "green"]);
    assert!(init.status.success());
    assert!(project.file(".vendor-license.yml").exists());

    // A second init refuses to clobber the file
    let again = project.run_auditor(&["init", "red"]);
    assert!(!again.status.success());
    assert!(stderr(&again).contains("--force"));

    let check = project.run_auditor(&["check"]);
    assert!(check.status.success(), "stderr: {}", stderr(&check));
}

#[test]
fn test_fix_adds_exceptions() {
    let project = TestProject::fake();
    project.write(".vendor-license.yml", "whitelist:\n  - Apache-2.0\n");

    let dry_run = project.run_auditor(&["fix", "--dry-run"]);
    assert!(dry_run.status.success());
    assert!(stdout(&dry_run).contains("Would add 2 exceptions"));
    assert!(!project.read(".vendor-license.yml").contains("github.com/fake/package"));

    let fix = project.run_auditor(&["fix"]);
    assert!(fix.status.success(), "stderr: {}", stderr(&fix));
    assert!(project.read(".vendor-license.yml").contains("github.com/fake/package"));

    let check = project.run_auditor(&["check"]);
    assert!(check.status.success(), "stderr: {}", stderr(&check));
}

#[test]
fn test_config_validate_and_show() {
    let project = TestProject::new();
    project.write(".vendor-license.yml", PASSING_POLICY);

    let validate = project.run_auditor(&["config", "--validate"]);
    assert!(validate.status.success());
    assert!(stdout(&validate).contains("Configuration is valid"));

    let show = project.run_auditor(&["config", "--show"]);
    assert!(show.status.success());
    let policy: serde_json::Value = serde_json::from_str(&stdout(&show)).unwrap();
    assert_eq!(policy["exceptions"][0], "github.com/fake/nested/...");

    project.write(".vendor-license.yml", "whitelist: [MIT]\nunknown_key: true\n");
    let invalid = project.run_auditor(&["config", "--validate"]);
    assert!(!invalid.status.success());
}
