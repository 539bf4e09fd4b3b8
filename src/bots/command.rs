use std::process::Stdio;

use futures::future::BoxFuture;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;

use crate::error::OracleError;
use crate::oracle::{Oracle, OracleRequest};

/// Oracle backed by an external program. Each decision spawns the program,
/// writes the request as one JSON line to its stdin and takes everything it
/// prints to stdout as the response payload.
///
/// The child is killed if the adapter gives up waiting on it.
pub struct CommandOracle {
    program: String,
    args: Vec<String>,
    label: String,
}

impl CommandOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let program = program.into();
        let label = format!("cmd:{program}");
        Self {
            program,
            args,
            label,
        }
    }

    /// Splits a whitespace separated command line into program and arguments.
    pub fn from_command_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts.next()?;
        Some(Self::new(program, parts.collect()))
    }

    async fn run(&self, request: OracleRequest) -> Result<String, OracleError> {
        let mut line = request.to_json()?;
        line.push('\n');
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| OracleError::Transport(String::from("child stdin unavailable")))?;
        stdin.write_all(line.as_bytes()).await?;
        drop(stdin);

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| OracleError::Transport(String::from("child stdout unavailable")))?;
        let mut payload = String::new();
        stdout.read_to_string(&mut payload).await?;

        let status = child.wait().await?;
        if !status.success() {
            return Err(OracleError::Transport(format!(
                "{} exited with {status}",
                self.program
            )));
        }
        Ok(payload)
    }
}

impl Oracle for CommandOracle {
    fn name(&self) -> &str {
        &self.label
    }

    fn decide(&mut self, request: OracleRequest) -> BoxFuture<'_, Result<String, OracleError>> {
        Box::pin(self.run(request))
    }
}
