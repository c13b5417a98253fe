pub mod check;
pub mod list;
pub mod plan;
pub mod run;

use std::path::Path;

use ffwrap_command::Command;

use crate::request::Request;

/// Load and assemble a request, rendering every configuration error.
pub(crate) fn assemble(path: &Path) -> anyhow::Result<Command> {
    let request = Request::load(path)
        .map_err(|e| anyhow::anyhow!("Failed to load request {}: {e}", path.display()))?;
    let files = request.files.len();
    let cmd = request.build()?;
    tracing::debug!(request = %path.display(), files, "Request assembled");
    Ok(cmd)
}
