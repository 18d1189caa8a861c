// External diff program integration: spawns `diff -u` and streams its output
// through the unified diff parser.

use std::io::{BufReader, Read};
use std::path::Path;
use std::process::{Child, ChildStderr, Command, ExitStatus, Stdio};

use twain_core::ChangeSet;

use crate::error::{Error, Result};
use crate::unified::DiffComputer;

/// Exit status `diff` uses when the inputs differ.
const DIFFERENCES_FOUND: i32 = 1;

/// Runs an external line differ in unified mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOracle {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for DiffOracle {
    fn default() -> Self {
        Self {
            program: "diff".to_string(),
            args: vec!["-u".to_string()],
        }
    }
}

impl DiffOracle {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Diff two files. The changes are only returned if the program exits with
    /// "no differences" or "differences found"; anything else is an error.
    pub fn run(&self, from: &Path, to: &Path) -> Result<ChangeSet> {
        log::debug!("running {} {:?} {} {}", self.program, self.args, from.display(), to.display());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(from)
            .arg(to)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| Error::external(&self.program, format!("failed to start: {e}")))?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            reap(&mut child);
            return Err(Error::external(&self.program, "output not captured"));
        };

        // stderr is drained alongside stdout so a chatty program cannot block
        // on a full pipe while we wait for its diff output.
        let (changes, stderr) = std::thread::scope(|s| {
            let drain = s.spawn(move || drain_stderr(stderr));
            let changes = DiffComputer::new().compute(BufReader::new(stdout));
            if changes.is_err() {
                if let Err(e) = child.kill() {
                    log::warn!("failed to kill diff process: {e}");
                }
            }
            (changes, drain.join().unwrap_or_default())
        });

        let status = child
            .wait()
            .map_err(|e| Error::external(&self.program, format!("failed to wait: {e}")))?;
        let changes = changes
            .map_err(|e| Error::external(&self.program, format!("output unreadable: {e}")))?;

        check_status(&self.program, status, stderr.trim())?;
        Ok(changes)
    }
}

fn reap(child: &mut Child) {
    if let Err(e) = child.kill() {
        log::warn!("failed to kill diff process: {e}");
    }
    let _ = child.wait();
}

fn drain_stderr(mut pipe: ChildStderr) -> String {
    let mut raw = Vec::new();
    if let Err(e) = pipe.read_to_end(&mut raw) {
        log::warn!("failed to read diff stderr: {e}");
    }
    String::from_utf8_lossy(&raw).into_owned()
}

fn check_status(program: &str, status: ExitStatus, stderr: &str) -> Result<()> {
    match status.code() {
        Some(0) | Some(DIFFERENCES_FOUND) => Ok(()),
        Some(code) if stderr.is_empty() => {
            Err(Error::external(program, format!("exited with status {code}")))
        }
        Some(code) => Err(Error::external(
            program,
            format!("exited with status {code}: {stderr}"),
        )),
        None => Err(Error::external(program, "terminated by signal")),
    }
}
