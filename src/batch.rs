//! Inspecting several files at once, and bounding one inspection in time.
//!
//! Sessions are single-caller; these helpers give every file a session of its
//! own.
use crate::error::InspectError;
use crate::session::Session;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, warn};

/// Opens every path in its own [`Session`], in parallel on the rayon pool.
/// Results come back in the order of `paths`.
pub fn inspect_many<P>(paths: &[P]) -> Vec<Result<Session, InspectError>>
where
    P: AsRef<Path> + Sync,
{
    debug!(files = paths.len(), "Inspecting files in parallel");
    paths.par_iter().map(Session::open).collect()
}

/// Opens `path` in `session` on tokio's blocking pool and waits at most
/// `limit`. The session comes back loaded.
///
/// Parsing cannot be interrupted. On timeout the blocking task keeps running
/// until it finishes on its own and its session is dropped then.
pub async fn inspect_file_with_timeout(
    mut session: Session,
    path: impl Into<PathBuf>,
    limit: Duration,
) -> Result<Session, InspectError> {
    let path = path.into();
    let span = tracing::debug_span!("inspect", path = %path.display());
    let task = tokio::task::spawn_blocking(move || {
        let _guard = span.enter();
        session.open_path(&path).map(|()| session)
    });
    match timeout(limit, task).await {
        Ok(joined) => joined?,
        Err(_) => {
            warn!(?limit, "Inspection timed out, abandoning it");
            Err(InspectError::Timeout(limit))
        }
    }
}
