//! Dumping and restoring the benchmark database with the engine's own tools.

use crate::config::Dbms;
use anyhow::Context;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{error, info};

/// An external program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    program: String,
    args: Vec<String>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Writes an SQL dump of `database` to stdout.
    pub fn dump(dbms: Dbms, database: &str) -> Self {
        match dbms {
            Dbms::Cockroach => Self::new("cockroach", &["dump", "--insecure", database]),
            Dbms::Postgres => Self::new("pg_dump", &[database]),
        }
    }

    /// Executes SQL read from stdin against `database`.
    pub fn load(dbms: Dbms, database: &str) -> Self {
        match dbms {
            Dbms::Cockroach => {
                let db_arg = format!("--database={database}");
                Self::new("cockroach", &["sql", "--insecure", &db_arg])
            }
            Dbms::Postgres => Self::new("psql", &[database]),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).kill_on_drop(true);
        cmd
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Run the dump tool and write its stdout verbatim to `path`.
///
/// Returns the number of bytes written.
pub async fn dump_to_file(tool: &ToolCommand, path: &Path) -> anyhow::Result<u64> {
    info!("Dumping to file {} with `{}`", path.display(), tool);
    let output = tool
        .command()
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("Failed to run `{tool}`"))?;

    if !output.status.success() {
        anyhow::bail!(
            "`{}` exited with {}: {}",
            tool,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    tokio::fs::write(path, &output.stdout)
        .await
        .with_context(|| format!("Failed to write dump file {}", path.display()))?;
    info!("Dump to {} complete ({} bytes)", path.display(), output.stdout.len());
    Ok(output.stdout.len() as u64)
}

/// Pipe the contents of `path` verbatim into the load tool's stdin.
pub async fn load_from_file(tool: &ToolCommand, path: &Path) -> anyhow::Result<()> {
    info!("Loading from dump file {}...", path.display());
    let content = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read dump file {}", path.display()))?;

    let mut child = tool
        .command()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .with_context(|| format!("Failed to run `{tool}`"))?;

    let mut stdin = child
        .stdin
        .take()
        .context("Load command has no stdin")?;
    // Feed stdin while output is collected
    let feeder = tokio::spawn(async move {
        let result = stdin.write_all(&content).await;
        drop(stdin);
        result
    });

    let output = child
        .wait_with_output()
        .await
        .with_context(|| format!("Failed to wait for `{tool}`"))?;
    let fed = feeder.await.context("Dump feeder task failed")?;

    if !output.status.success() {
        error!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        anyhow::bail!("`{}` exited with {}", tool, output.status);
    }
    fed.with_context(|| format!("Failed to pipe dump file into `{tool}`"))?;

    info!("Loading from file {} complete", path.display());
    Ok(())
}
