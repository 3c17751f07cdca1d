//! End-to-end CLI behaviour tests for `build-command-gate`.
//!
//! These scenarios feed a request to the binary on stdin and check the exit
//! status, the diagnostic line and the two output files.

mod support;

use camino::Utf8PathBuf;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::io::Write;
use std::process::{Command, Output, Stdio};
use support::{armor_with_headers, canonical_armor, envelope, signature_packet};
use tempfile::TempDir;

const SHA256_ID: u8 = 8;
const STALE: &[u8] = b"stale";

struct CliWorld {
    // Keep the directory alive for the lifetime of the scenario.
    _temp_dir: TempDir,
    signature_out: Utf8PathBuf,
    command_out: Utf8PathBuf,
    command: String,
    headers: String,
    print_action: bool,
    output: Option<Output>,
}

impl CliWorld {
    fn output(&self) -> &Output {
        self.output.as_ref().expect("gate was run")
    }

    fn stderr(&self) -> String {
        String::from_utf8(self.output().stderr.clone()).expect("stderr was not UTF-8")
    }
}

#[fixture]
fn world() -> CliWorld {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).expect("UTF-8 temp dir");
    CliWorld {
        signature_out: dir.join("signature.asc"),
        command_out: dir.join("command"),
        _temp_dir: temp_dir,
        command: String::new(),
        headers: String::new(),
        print_action: false,
        output: None,
    }
}

#[given("a signed request for \"{command}\"")]
fn given_request(world: &mut CliWorld, command: String) {
    world.command = command;
}

#[given("the signature carries the armor header \"{header}\"")]
fn given_armor_header(world: &mut CliWorld, header: String) {
    world.headers = format!("{header}\n");
}

#[given("both output files already exist")]
fn given_existing_outputs(world: &mut CliWorld) {
    std::fs::write(&world.signature_out, STALE).expect("seed signature output");
    std::fs::write(&world.command_out, STALE).expect("seed command output");
}

#[given("the gate is asked to print the action")]
fn given_print_action(world: &mut CliWorld) {
    world.print_action = true;
}

#[when("the gate is run")]
fn when_gate_run(world: &mut CliWorld) {
    let armored = armor_with_headers(&signature_packet(SHA256_ID), 64, &world.headers);
    let message = envelope("SHA256", &world.command, &armored);

    let mut command = Command::new(env!("CARGO_BIN_EXE_build-command-gate"));
    if world.print_action {
        command.arg("--print-action");
    }
    let mut child = command
        .arg(world.signature_out.as_str())
        .arg(world.command_out.as_str())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn gate binary");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(&message)
        .expect("write request");
    world.output = Some(child.wait_with_output().expect("wait for gate"));
}

#[then("the gate exits with status \"{code}\"")]
fn then_exit_status(world: &mut CliWorld, code: String) {
    let expected: i32 = code.parse().expect("numeric exit code");
    assert_eq!(
        world.output().status.code(),
        Some(expected),
        "stderr: {}",
        world.stderr()
    );
}

#[then("the command output holds the command")]
fn then_command_output(world: &mut CliWorld) {
    let written = std::fs::read(&world.command_out).expect("read command output");
    assert_eq!(written, world.command.as_bytes());
}

#[then("the signature output holds the canonical armor")]
fn then_signature_output(world: &mut CliWorld) {
    let written = std::fs::read(&world.signature_out).expect("read signature output");
    assert_eq!(written, canonical_armor(&signature_packet(SHA256_ID)));
}

#[then("stderr is empty")]
fn then_stderr_empty(world: &mut CliWorld) {
    assert_eq!(world.stderr(), "");
}

#[then("stderr is the line \"{line}\"")]
fn then_stderr_line(world: &mut CliWorld, line: String) {
    assert_eq!(world.stderr(), format!("{line}\n"));
}

#[then("no output files exist")]
fn then_no_outputs(world: &mut CliWorld) {
    assert!(!world.signature_out.exists());
    assert!(!world.command_out.exists());
}

#[then("the existing output files are unchanged")]
fn then_outputs_unchanged(world: &mut CliWorld) {
    assert_eq!(
        std::fs::read(&world.signature_out).expect("read signature output"),
        STALE
    );
    assert_eq!(
        std::fs::read(&world.command_out).expect("read command output"),
        STALE
    );
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Accepted request writes both outputs"
)]
fn scenario_accepted(world: CliWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Rejected request leaves no outputs"
)]
fn scenario_rejected(world: CliWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Rejected request leaves existing outputs untouched"
)]
fn scenario_existing_untouched(world: CliWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/cli.feature",
    name = "Print action summarises the dispatch"
)]
fn scenario_print_action(world: CliWorld) {
    let _ = world;
}

#[test]
fn missing_output_paths_is_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_build-command-gate"))
        .stdin(Stdio::null())
        .output()
        .expect("run gate binary");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn request_builder_round_trips_through_binary() {
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    let command = format!(
        "Upload-component r4.2 core-qrexec {} security-testing vm-bookworm",
        support::COMMIT_SHA
    );
    let sig = temp_dir.path().join("sig");
    let cmd = temp_dir.path().join("cmd");

    let mut child = Command::new(env!("CARGO_BIN_EXE_build-command-gate"))
        .arg(&sig)
        .arg(&cmd)
        .stdin(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn gate binary");
    child
        .stdin
        .take()
        .expect("piped stdin")
        .write_all(&support::request(&command))
        .expect("write request");
    let output = child.wait_with_output().expect("wait for gate");

    assert!(output.status.success(), "{output:?}");
    assert_eq!(std::fs::read(cmd).expect("read command"), command.as_bytes());
}
