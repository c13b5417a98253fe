//! Print the command a request assembles to, without running it.

use std::path::PathBuf;

use ffwrap_common::config::AppConfig;

pub fn run(config: &AppConfig, request: PathBuf, json: bool) -> anyhow::Result<()> {
    let cmd = super::assemble(&request)?;

    if json {
        let mut argv = vec![config.runner.binary.display().to_string()];
        argv.extend(cmd.args().iter().cloned());
        println!("{}", serde_json::to_string_pretty(&argv)?);
    } else {
        println!("{}", cmd.command_line(&config.runner.binary));
    }

    Ok(())
}
