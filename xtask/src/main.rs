// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::process::Command as StdCommand;

use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
struct Command {
    #[clap(subcommand)]
    sub: SubCommand,
}

impl Command {
    fn run(self) {
        match self.sub {
            SubCommand::Build => run_command(make_build_cmd()),
            SubCommand::Lint { fix } => run_command(make_clippy_cmd(fix)),
            SubCommand::Test { no_capture } => run_command(make_test_cmd(no_capture)),
            SubCommand::Format { check } => run_command(make_format_cmd(check)),
        }
    }
}

#[derive(Subcommand)]
enum SubCommand {
    #[clap(about = "Compile workspace packages.")]
    Build,
    #[clap(about = "Run clippy over all targets.")]
    Lint {
        #[arg(long, help = "Automatically apply lint suggestions.")]
        fix: bool,
    },
    #[clap(about = "Run unit and integration tests.")]
    Test {
        #[arg(long, help = "Don't capture test output.")]
        no_capture: bool,
    },
    #[clap(about = "Format the workspace.")]
    Format {
        #[arg(long, help = "Check formatting without changing files.")]
        check: bool,
    },
}

fn find_command(cmd: &str) -> StdCommand {
    match which::which(cmd) {
        Ok(exe) => {
            let mut cmd = StdCommand::new(exe);
            cmd.current_dir(env!("CARGO_WORKSPACE_DIR"));
            cmd
        }
        Err(err) => panic!("{cmd} not found: {err}"),
    }
}

fn ensure_installed(bin: &str, component: &str) {
    if which::which(bin).is_err() {
        let mut cmd = find_command("rustup");
        cmd.args(["component", "add", component]);
        run_command(cmd);
    }
}

fn run_command(mut cmd: StdCommand) {
    println!("{cmd:?}");
    let status = cmd.status().expect("failed to execute process");
    assert!(status.success(), "command failed: {status}");
}

fn make_build_cmd() -> StdCommand {
    let mut cmd = find_command("cargo");
    cmd.args(["build", "--workspace", "--all-features", "--tests"]);
    cmd
}

fn make_test_cmd(no_capture: bool) -> StdCommand {
    let mut cmd = find_command("cargo");
    cmd.args(["test", "--workspace", "--all-features"]);
    if no_capture {
        cmd.args(["--", "--nocapture"]);
    }
    cmd
}

fn make_format_cmd(check: bool) -> StdCommand {
    ensure_installed("rustfmt", "rustfmt");
    let mut cmd = find_command("cargo");
    cmd.args(["fmt", "--all"]);
    if check {
        cmd.arg("--check");
    }
    cmd
}

fn make_clippy_cmd(fix: bool) -> StdCommand {
    ensure_installed("cargo-clippy", "clippy");
    let mut cmd = find_command("cargo");
    cmd.args(["clippy", "--workspace", "--all-targets", "--all-features"]);
    if fix {
        cmd.args(["--allow-staged", "--allow-dirty", "--fix"]);
    }
    cmd.args(["--", "-D", "warnings"]);
    cmd
}

fn main() {
    let cmd = Command::parse();
    cmd.run()
}
