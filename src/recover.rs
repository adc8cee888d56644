use {
    crate::{
        namer,
        policy::{ErrorPolicy, Sink},
    },
    anyhow::Context,
    std::path::Path,
    tracing::debug,
};

/// Finalize in-progress files left behind by an earlier run.
///
/// A crashed process leaves its current file under the working name;
/// nothing can still be writing to it, so it is renamed on the spot. A
/// failed rename is gated through the error policy per file, so one bad
/// entry does not stop the scan.
pub async fn finalize_stale(dir: &Path, policy: ErrorPolicy) -> anyhow::Result<()> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .with_context(|| dir.display().to_string())?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .with_context(|| dir.display().to_string())?
    {
        let path = entry.path();
        if !namer::is_working(&path) {
            continue;
        }

        debug!(path = %path.display(), "finalizing stale file");
        let renamed = tokio::fs::rename(&path, namer::final_path(&path)).await;
        policy
            .apply(Sink::File, renamed)
            .with_context(|| path.display().to_string())?;
    }

    Ok(())
}
