use std::process::Command;

use thiserror::Error;

/// The Windows network-configuration utility every plan targets.
pub const NETSH: &str = "netsh";

/// One step of an apply sequence: a fixed argv plus the status label shown
/// while the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandStep {
    pub label: String,
    pub program: &'static str,
    pub args: Vec<String>,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    /// The configuration utility could not be launched at all.
    #[error("failed to launch {program}: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Captured output of a finished step. A non-zero exit code is data here,
/// not an error; the applier surfaces it and keeps going.
#[derive(Debug, Default)]
pub struct StepOutput {
    /// Exit code, if the process terminated normally.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl StepOutput {
    pub fn reported_error(&self) -> bool {
        self.code != Some(0) || !self.stderr.trim().is_empty()
    }
}

/// Seam between the apply sequence and the OS, so the sequencing logic can
/// be exercised without touching real adapters.
pub trait CommandRunner {
    fn run(&self, step: &CommandStep) -> Result<StepOutput, RunnerError>;
}

/// Runs each step through `std::process::Command`, synchronously, capturing
/// stdout and stderr.
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, step: &CommandStep) -> Result<StepOutput, RunnerError> {
        tracing::debug!("running: {} {}", step.program, step.args.join(" "));

        let output = Command::new(step.program)
            .args(&step.args)
            .output()
            .map_err(|source| RunnerError::Launch {
                program: step.program.to_string(),
                source,
            })?;

        Ok(StepOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
