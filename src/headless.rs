use anyhow::Context;
use ripple::{Session, SimConfig};
use std::path::Path;
use tracing::info;

/// Run `frames` steps on a synthetic clock and optionally write the last
/// frame as PNG. Returns the session for inspection.
pub(crate) fn run(
    cfg: SimConfig,
    frames: u64,
    fps: u32,
    snapshot: Option<&Path>,
) -> anyhow::Result<Session> {
    let mut session = Session::new(cfg)?;
    let frame_ms = 1000 / fps.max(1) as u64;

    for i in 0..frames {
        session.advance_frame(i * frame_ms);
    }

    let stats = session.stats();
    info!(
        frames,
        min = stats.min,
        max = stats.max,
        energy = stats.energy,
        "headless run finished"
    );

    if let Some(path) = snapshot {
        session
            .frame_image()
            .save_png(path)
            .with_context(|| format!("writing snapshot {}", path.display()))?;
        info!(path = %path.display(), "snapshot written");
    }
    Ok(session)
}
