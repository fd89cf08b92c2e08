//! Subprocess boundary to the external CopyQ binary.
//!
//! Two invocations exist, both treated as fixed wire contracts:
//! `<command> tab` lists tab names one per line, and `<command> eval -`
//! runs a script delivered on stdin, emitting sentinel-framed items on
//! stdout. Everything behind them is a black box; this module spawns the
//! tool and hands its line stream to the caller.

use anyhow::{bail, Context, Result};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::process::{Child, ChildStdout, Command};
use tokio::task::JoinHandle;

use crate::config::CopyqConfig;

/// List the tabs the clipboard manager currently holds, sorted.
///
/// A dead or silent tool yields a degenerate list (one empty name) rather
/// than an error here; the failure surfaces downstream when extraction
/// runs on it.
pub async fn list_tabs(copyq: &CopyqConfig) -> Result<Vec<String>> {
    let output = Command::new(&copyq.command)
        .arg("tab")
        .output()
        .await
        .with_context(|| format!("failed to run `{} tab`", copyq.command))?;

    Ok(parse_tab_listing(&String::from_utf8_lossy(&output.stdout)))
}

/// Split a raw tab listing into sorted names, trimming the single
/// trailing newline the tool prints after the last entry.
fn parse_tab_listing(raw: &str) -> Vec<String> {
    let listing = raw.strip_suffix('\n').unwrap_or(raw);
    let mut tabs: Vec<String> = listing.split('\n').map(str::to_string).collect();
    tabs.sort();
    tabs
}

/// A running `copyq eval -` with the extraction script already delivered.
///
/// Read stdout to exhaustion via [`next_line`](ExtractionProcess::next_line),
/// then call [`finish`](ExtractionProcess::finish) to reap the child and
/// surface any interpreter errors.
pub struct ExtractionProcess {
    child: Child,
    lines: Lines<BufReader<ChildStdout>>,
    stderr_task: JoinHandle<String>,
}

/// Spawn the script interpreter for one tab and feed it `script`.
///
/// Stdin is closed after the write; the interpreter does not start
/// evaluating until it sees EOF. Stderr is drained on its own task while
/// the caller reads stdout.
pub async fn run_extraction(copyq: &CopyqConfig, script: &str) -> Result<ExtractionProcess> {
    let mut child = Command::new(&copyq.command)
        .args(["eval", "-"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("failed to spawn `{} eval -`", copyq.command))?;

    let mut stdin = child
        .stdin
        .take()
        .context("failed to open copyq stdin")?;
    stdin
        .write_all(script.as_bytes())
        .await
        .context("failed to deliver extraction script")?;
    stdin
        .shutdown()
        .await
        .context("failed to close copyq stdin")?;
    drop(stdin);

    let stdout = child
        .stdout
        .take()
        .context("failed to capture copyq stdout")?;

    let stderr = child
        .stderr
        .take()
        .context("failed to capture copyq stderr")?;
    let stderr_task = tokio::spawn(async move {
        let mut buf = String::new();
        let _ = BufReader::new(stderr).read_to_string(&mut buf).await;
        buf
    });

    Ok(ExtractionProcess {
        child,
        lines: BufReader::new(stdout).lines(),
        stderr_task,
    })
}

impl ExtractionProcess {
    /// Next line of script output, or `None` once the stream is closed.
    pub async fn next_line(&mut self) -> Result<Option<String>> {
        Ok(self.lines.next_line().await?)
    }

    /// Reap the child. Anything on stderr, or a non-zero exit, is fatal.
    pub async fn finish(mut self) -> Result<()> {
        let status = self
            .child
            .wait()
            .await
            .context("failed waiting for copyq")?;
        let stderr = self.stderr_task.await.unwrap_or_default();

        if !stderr.trim().is_empty() {
            bail!("copyq reported: {}", stderr.trim());
        }
        if !status.success() {
            bail!("copyq eval exited with {}", status);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_is_sorted() {
        assert_eq!(parse_tab_listing("work\ndefault\nnotes\n"), vec![
            "default", "notes", "work"
        ]);
    }

    #[test]
    fn test_only_one_trailing_newline_is_trimmed() {
        assert_eq!(parse_tab_listing("a\n\n"), vec!["", "a"]);
    }

    #[test]
    fn test_silent_tool_yields_degenerate_list() {
        assert_eq!(parse_tab_listing(""), vec![""]);
    }

    #[test]
    fn test_single_tab_without_trailing_newline() {
        assert_eq!(parse_tab_listing("default"), vec!["default"]);
    }
}
