//! Child process session with all three standard streams piped.
//!
//! [`CommandSpec`] holds the command before anything runs; [`CommandSpec::spawn`]
//! configures the three pipes and starts the child in one step, returning the
//! running [`Session`] together with its [`SessionPipes`]. A session cannot
//! exist without its pipe handles, so starting a child before the pipes are
//! attached is unrepresentable.

use std::process::{Child, ChildStderr, ChildStdin, ChildStdout, Command, ExitStatus, Stdio};

use crate::error::RelayError;

/// A command to run interactively: program plus arguments.
#[derive(Clone, Debug)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Display form used in errors and logs.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }

    /// Pipe all three standard streams, then start the child.
    ///
    /// Fails with [`RelayError::Spawn`] when the program cannot be started and
    /// [`RelayError::Pipe`] when a stream handle is unavailable.
    pub fn spawn(self) -> Result<(Session, SessionPipes), RelayError> {
        let command = self.display();
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| RelayError::Spawn {
                command: command.clone(),
                source,
            })?;

        let pipes = match (child.stdin.take(), child.stdout.take(), child.stderr.take()) {
            (Some(stdin), Some(stdout), Some(stderr)) => SessionPipes {
                stdin,
                stdout,
                stderr,
            },
            _ => {
                // Unreachable with piped stdio, but never leave a child unreaped.
                let _ = child.kill();
                let _ = child.wait();
                return Err(RelayError::Pipe { command });
            }
        };

        Ok((Session { command, child }, pipes))
    }
}

/// The three exclusive pipe handles, split from the session so each relay
/// task can own its end outright. No other component may touch a given pipe.
#[derive(Debug)]
pub struct SessionPipes {
    pub stdin: ChildStdin,
    pub stdout: ChildStdout,
    pub stderr: ChildStderr,
}

/// A started child. Terminal state is the [`ExitStatus`] from [`Session::wait`];
/// a new spec is needed for a new command.
#[derive(Debug)]
pub struct Session {
    command: String,
    child: Child,
}

impl Session {
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Block until the child exits.
    pub fn wait(&mut self) -> Result<ExitStatus, RelayError> {
        self.child.wait().map_err(|source| RelayError::Wait {
            command: self.command.clone(),
            source,
        })
    }

    /// Non-blocking exit check.
    pub fn try_wait(&mut self) -> Result<Option<ExitStatus>, RelayError> {
        self.child.try_wait().map_err(|source| RelayError::Wait {
            command: self.command.clone(),
            source,
        })
    }

    /// Cancellation path: force-terminate and reap.
    pub fn kill_and_wait(&mut self) -> Result<ExitStatus, RelayError> {
        let _ = self.child.kill();
        self.wait()
    }
}
