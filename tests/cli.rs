//! CLI-level exit-code tests, grounded on the teacher's `tests! { ... is
//! ERR }` arm (`assert_cmd::Command::cargo_bin`, asserting failure/stderr).
//! Everything else in this suite exercises the library directly through
//! `glint::run`; these are the one or two tests that drive the actual
//! `glint` binary and check the exit codes spec.md §7 leaves to the host.

use std::io::Write;

use assert_cmd::Command;

struct ScriptFile {
    path: std::path::PathBuf,
}

impl ScriptFile {
    fn new(name: &str, source: &str) -> Self {
        let path = std::env::temp_dir().join(format!("glint-cli-test-{}-{}.glint", std::process::id(), name));
        let mut file = std::fs::File::create(&path).expect("create fixture file");
        file.write_all(source.as_bytes()).expect("write fixture file");
        ScriptFile { path }
    }
}

impl Drop for ScriptFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[test]
fn a_well_formed_script_exits_zero_and_prints_its_output() {
    let script = ScriptFile::new("ok", "print \"Hello, world!\";");
    Command::cargo_bin("glint").unwrap().arg(&script.path).assert().success().stdout("Hello, world!\n");
}

#[test]
fn a_script_with_a_parse_error_exits_65() {
    let script = ScriptFile::new("parse-error", "var = 1;");
    Command::cargo_bin("glint").unwrap().arg(&script.path).assert().code(65);
}

#[test]
fn a_script_with_a_runtime_error_exits_70() {
    let script = ScriptFile::new("runtime-error", "print 1 / 0;");
    Command::cargo_bin("glint").unwrap().arg(&script.path).assert().code(70);
}

#[test]
fn too_many_arguments_exits_64() {
    Command::cargo_bin("glint").unwrap().arg("one").arg("two").assert().code(64);
}

#[test]
fn a_missing_script_file_exits_66() {
    let missing = std::env::temp_dir().join(format!("glint-cli-test-{}-missing.glint", std::process::id()));
    Command::cargo_bin("glint").unwrap().arg(&missing).assert().code(66);
}
