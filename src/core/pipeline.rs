//! Process pipeline.
//!
//! Runs the secret generator on its own, or streams its stdout into the
//! sealing utility through an OS pipe. The sealer is started first, its
//! output is drained concurrently, and the generator is waited on before the
//! sealer, so neither side can block on a full pipe that nobody drains.

use std::io::{self, Read, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread::{self, ScopedJoinHandle};

use tracing::{debug, trace};

use crate::core::config::ensure_dir;
use crate::error::{PipelineError, Result};

/// Run `generate` and return its stdout.
///
/// # Errors
///
/// Returns `PipelineError::CommandFailed` with the full command line and
/// captured stderr if the process exits non-zero.
pub fn run(mut generate: Command) -> Result<Vec<u8>> {
    locate(&generate)?;
    let command = command_line(&generate);
    let name = program(&generate);
    debug!(program = %name, "running");

    let output = generate
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|source| PipelineError::Spawn {
            program: name,
            source,
        })?;

    check(command, &output)?;
    trace!(len = output.stdout.len(), "captured output");
    Ok(output.stdout)
}

/// Pipe the stdout of `generate` into `seal` and return the sealer's stdout.
///
/// The sealer's stdout and stderr are drained on their own threads while the
/// generator runs, so a sealer that streams its output cannot fill a pipe
/// and stall both processes.
///
/// # Errors
///
/// A failure of either process is reported with that process's command line
/// and stderr. When both fail the sealer's error comes first, since a sealer
/// that exits early usually takes the generator down with a broken pipe. The
/// sealer is always reaped before returning.
pub fn run_sealed(mut generate: Command, mut seal: Command) -> Result<Vec<u8>> {
    locate(&generate)?;
    locate(&seal)?;
    let generate_line = command_line(&generate);
    let seal_line = command_line(&seal);

    let seal_program = program(&seal);
    debug!(program = %seal_program, "starting sealer");
    let mut sealer = seal
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| PipelineError::Spawn {
            program: seal_program,
            source,
        })?;

    let (Some(pipe), Some(sealed_out), Some(sealed_err)) =
        (sealer.stdin.take(), sealer.stdout.take(), sealer.stderr.take())
    else {
        let _ = sealer.kill();
        let _ = sealer.wait();
        return Err(PipelineError::Pipe {
            from: generate_line,
            to: seal_line,
        }
        .into());
    };

    let generate_program = program(&generate);
    generate
        .stdin(Stdio::null())
        .stdout(Stdio::from(pipe))
        .stderr(Stdio::piped());

    let (generated, sealed) = thread::scope(|s| {
        let stdout = s.spawn(move || drain(sealed_out));
        let stderr = s.spawn(move || drain(sealed_err));

        debug!(program = %generate_program, "running generator");
        let generated = generate.output();
        // `generate` holds the write end of the pipe until dropped; the sealer
        // only sees EOF after this.
        drop(generate);
        if generated.is_err() {
            let _ = sealer.kill();
        }

        let sealed = sealer.wait().and_then(|status| {
            Ok(Output {
                status,
                stdout: join(stdout)?,
                stderr: join(stderr)?,
            })
        });
        (generated, sealed)
    });

    let generated = generated.map_err(|source| PipelineError::Spawn {
        program: generate_program,
        source,
    })?;
    let sealed = sealed?;

    match (check(generate_line, &generated), check(seal_line, &sealed)) {
        (Ok(()), Ok(())) => {}
        (Err(e), Ok(())) | (Ok(()), Err(e)) => return Err(e.into()),
        (Err(generate), Err(seal)) => {
            return Err(PipelineError::BothFailed {
                seal: Box::new(seal),
                generate: Box::new(generate),
            }
            .into())
        }
    }

    trace!(len = sealed.stdout.len(), "captured sealed output");
    Ok(sealed.stdout)
}

fn drain(mut reader: impl Read) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}

fn join(handle: ScopedJoinHandle<'_, io::Result<Vec<u8>>>) -> io::Result<Vec<u8>> {
    handle
        .join()
        .map_err(|_| io::Error::other("sealer output reader panicked"))?
}

/// Write `bytes` to `out`, or to stdout when no path is given.
///
/// Parent directories of `out` are created first.
pub fn write_output(bytes: &[u8], out: Option<&Path>) -> Result<()> {
    let Some(path) = out else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
        return Ok(());
    };

    ensure_parent_dir(path)?;
    std::fs::write(path, bytes).map_err(|source| PipelineError::WriteOutput {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), len = bytes.len(), "wrote output");
    Ok(())
}

/// Create the directory part of `path` (everything before the last segment).
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => ensure_dir(parent),
        None => Ok(()),
    }
}

fn locate(cmd: &Command) -> Result<()> {
    which::which(cmd.get_program()).map_err(|_| PipelineError::NotInstalled {
        program: program(cmd),
    })?;
    Ok(())
}

fn check(command: String, output: &Output) -> std::result::Result<(), PipelineError> {
    if output.status.success() {
        return Ok(());
    }
    Err(PipelineError::CommandFailed {
        command,
        status: output.status,
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

fn program(cmd: &Command) -> String {
    cmd.get_program().to_string_lossy().into_owned()
}

/// Program and arguments joined by spaces.
pub fn command_line(cmd: &Command) -> String {
    std::iter::once(cmd.get_program())
        .chain(cmd.get_args())
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
