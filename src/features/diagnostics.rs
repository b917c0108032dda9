use std::path::{Path, PathBuf};

use super::Remote;
use crate::automation::AutomationChannel;
use crate::automation::reply::trapped_error;
use crate::error::Failure;
use crate::messages::Notice;

const DUMP_FILE: &str = "musictui_upnext.txt";

pub fn default_dump_path() -> PathBuf {
    std::env::temp_dir().join(DUMP_FILE)
}

/// Writes the app's accessibility tree to `path` for debugging the up-next UI probe.
pub async fn dump_ui<C: AutomationChannel>(
    remote: &Remote<C>,
    path: &Path,
) -> Result<Notice, Failure> {
    let out = remote.run(&remote.scripts().dump_ui()).await?;
    if let Some(failure) = trapped_error(&out) {
        tracing::warn!(reply = %out, "accessibility walk failed");
        return Err(failure);
    }
    match tokio::fs::write(path, out.as_bytes()).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), bytes = out.len(), "UI dump written");
            Ok(Notice::UiDumpSaved(path.to_path_buf()))
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), err = %e, "failed to write UI dump");
            Ok(Notice::UiDumpWriteFailed)
        }
    }
}
