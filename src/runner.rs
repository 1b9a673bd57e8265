//! Runs the project's test and deploy commands.
use async_trait::async_trait;
use log::*;
use std::process::Stdio;
use tokio::process::Command;

#[cfg(test)]
use mockall::automock;

use crate::{Result, config::project::CommandsConfig, error::DevflowError};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ScriptRunner: Send + Sync {
    async fn run_tests(&self) -> Result<()>;
    async fn deploy(&self) -> Result<()>;
}

/// Spawns the configured argv lists with `CI=true` and inherited stdio.
pub struct ProcessRunner {
    commands: CommandsConfig,
}

impl ProcessRunner {
    pub fn new(commands: CommandsConfig) -> Self {
        Self { commands }
    }
}

async fn run_command(argv: &[String]) -> Result<()> {
    let Some((program, args)) = argv.split_first() else {
        return Err(DevflowError::invalid_config("command must not be empty"));
    };

    let command_line = argv.join(" ");
    info!("running {command_line}");

    let status = Command::new(program)
        .args(args)
        .env("CI", "true")
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .await?;

    if !status.success() {
        // killed by a signal
        let code = status.code().unwrap_or(-1);
        return Err(DevflowError::command_failed(command_line, code));
    }

    Ok(())
}

#[async_trait]
impl ScriptRunner for ProcessRunner {
    async fn run_tests(&self) -> Result<()> {
        run_command(&self.commands.test).await
    }

    async fn deploy(&self) -> Result<()> {
        run_command(&self.commands.deploy).await
    }
}
