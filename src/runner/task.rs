//! The supervising task that owns the assistant process.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::{ExitOutcome, OutputTarget, RunReport, RunRequest, RunState, RunnerError};

/// Read size for the output pipes.
const CHUNK_SIZE: usize = 8 * 1024;

/// A run in progress.
///
/// The process handle lives inside the task; the only thing the caller
/// gets back is the final report.
pub struct RunHandle {
    task: JoinHandle<RunReport>,
}

impl RunHandle {
    /// Wait for the run to finish and its files to be cleaned up.
    pub async fn wait(self) -> Result<RunReport, RunnerError> {
        Ok(self.task.await?)
    }
}

/// Start a run on the current tokio runtime.
pub fn spawn(request: RunRequest) -> RunHandle {
    RunHandle {
        task: tokio::spawn(supervise(request)),
    }
}

/// Run to completion on a private single-threaded runtime.
pub fn run_blocking(request: RunRequest) -> Result<RunReport, RunnerError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(async move { spawn(request).wait().await })
}

/// Records state transitions.
struct Lifecycle {
    states: Vec<RunState>,
}

impl Lifecycle {
    fn new() -> Self {
        Self {
            states: vec![RunState::NotStarted],
        }
    }

    fn enter(&mut self, state: RunState) {
        tracing::debug!(?state, "runner state");
        self.states.push(state);
    }
}

async fn supervise(request: RunRequest) -> RunReport {
    let mut lifecycle = Lifecycle::new();
    lifecycle.enter(RunState::Spawning);

    let log_path = request.output.log_file().cloned();
    let mut log = None;
    let mut outcome = None;

    if let Some(ref path) = log_path {
        match open_log(path).await {
            Ok(file) => log = Some(file),
            Err(e) => {
                outcome = Some(ExitOutcome::SpawnError {
                    message: format!("could not create log file {}: {e}", path.display()),
                    not_found: false,
                });
            }
        }
    }

    let outcome = match outcome {
        Some(outcome) => outcome,
        None => match build_command(&request).spawn() {
            Ok(child) => {
                tracing::debug!(program = %request.program, pid = ?child.id(), "assistant started");
                lifecycle.enter(RunState::Running);
                match log.as_mut() {
                    Some(file) => capture(child, file).await,
                    None => wait_inherited(child).await,
                }
            }
            Err(e) => {
                tracing::debug!(program = %request.program, error = %e, "spawn failed");
                if let Some(file) = log.as_mut() {
                    let line = format!("Error: {e}\n");
                    if let Err(write_err) = file.write_all(line.as_bytes()).await {
                        tracing::warn!(error = %write_err, "failed to write spawn error to log");
                    }
                }
                ExitOutcome::SpawnError {
                    message: e.to_string(),
                    not_found: e.kind() == std::io::ErrorKind::NotFound,
                }
            }
        },
    };
    lifecycle.enter(outcome.state());

    if let Some(mut file) = log {
        if let Err(e) = file.flush().await {
            tracing::warn!(error = %e, "failed to flush log file");
        }
    }
    remove_temp_files(&request.temp_files);
    lifecycle.enter(RunState::Cleaned);

    RunReport {
        outcome,
        log_file: log_path,
        transitions: lifecycle.states,
    }
}

fn build_command(request: &RunRequest) -> Command {
    let mut cmd = Command::new(&request.program);
    cmd.args(&request.args)
        .current_dir(&request.working_dir)
        .envs(request.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    match request.output {
        OutputTarget::Terminal => {
            cmd.stdin(Stdio::inherit())
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit());
        }
        OutputTarget::LogFile(_) => {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::piped())
                .stderr(Stdio::piped());
        }
    }
    cmd
}

async fn open_log(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    File::create(path).await
}

async fn wait_inherited(mut child: Child) -> ExitOutcome {
    exit_outcome(child.wait().await)
}

/// Copy both output streams into `log` as chunks arrive, then wait for exit.
async fn capture(mut child: Child, log: &mut File) -> ExitOutcome {
    let (tx, mut rx) = mpsc::channel::<Vec<u8>>(64);

    let mut readers = Vec::new();
    if let Some(stdout) = child.stdout.take() {
        readers.push(tokio::spawn(forward(stdout, tx.clone(), "stdout")));
    }
    if let Some(stderr) = child.stderr.take() {
        readers.push(tokio::spawn(forward(stderr, tx.clone(), "stderr")));
    }
    drop(tx);

    let mut write_failed = false;
    while let Some(chunk) = rx.recv().await {
        if write_failed {
            continue;
        }
        if let Err(e) = log.write_all(&chunk).await {
            tracing::warn!(error = %e, "failed to write assistant output to log");
            write_failed = true;
        }
    }
    for reader in readers {
        if let Err(e) = reader.await {
            tracing::warn!(error = %e, "output reader task failed");
        }
    }

    exit_outcome(child.wait().await)
}

async fn forward<R>(mut reader: R, tx: mpsc::Sender<Vec<u8>>, stream: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        match reader.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                if tx.send(buf[..n].to_vec()).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::warn!(stream, error = %e, "failed to read assistant output");
                break;
            }
        }
    }
}

fn exit_outcome(status: std::io::Result<std::process::ExitStatus>) -> ExitOutcome {
    match status {
        Ok(status) if status.success() => ExitOutcome::Succeeded,
        Ok(status) => ExitOutcome::Failed {
            code: status.code(),
        },
        Err(e) => {
            tracing::warn!(error = %e, "failed to wait for assistant");
            ExitOutcome::Failed { code: None }
        }
    }
}

/// Remove temporary files; ones that are already gone are fine.
fn remove_temp_files(files: &[PathBuf]) {
    for path in files {
        match std::fs::remove_file(path) {
            Ok(()) => tracing::debug!(path = %path.display(), "removed temp file"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(path = %path.display(), error = %e, "failed to remove temp file"),
        }
    }
}
