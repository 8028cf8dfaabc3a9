use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;

use crate::composition::model::{Composition, Item};
use crate::foundation::error::{FramelineError, FramelineResult};

impl Composition {
    /// Parse a composition from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramelineResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FramelineError::serde(format!("parse composition JSON: {e}")))
    }

    /// Parse a composition from a JSON file on disk.
    ///
    /// I/O failures surface as [`FramelineError::Other`] with the path as context.
    pub fn from_path(path: impl AsRef<Path>) -> FramelineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open composition JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check static invariants.
    ///
    /// Evaluators never call this; they tolerate whatever they are given. Loading tools call
    /// it to reject compositions early with a readable message.
    pub fn validate(&self) -> FramelineResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(FramelineError::validation("fps must have num>0 and den>0"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(FramelineError::validation("canvas width/height must be > 0"));
        }
        if self.duration_in_frames == 0 {
            return Err(FramelineError::validation(
                "durationInFrames must be > 0 frames",
            ));
        }

        for track in &self.tracks {
            for item in &track.items {
                validate_item(item)?;
            }
        }

        for scene in &self.scenes {
            if scene.duration_in_frames == 0 {
                return Err(FramelineError::validation(format!(
                    "scene '{}' has zero duration",
                    scene.id
                )));
            }
            if let Some(tr) = &scene.transition
                && !(tr.duration_in_frames > 0.0)
            {
                return Err(FramelineError::validation(format!(
                    "scene '{}' transition durationInFrames must be > 0",
                    scene.id
                )));
            }
        }

        Ok(())
    }
}

fn validate_item(item: &Item) -> FramelineResult<()> {
    if item.duration_in_frames == 0 {
        return Err(FramelineError::validation(format!(
            "item '{}' has zero duration",
            item.id
        )));
    }
    if let Some(path) = &item.motion_path
        && path.points.is_empty()
    {
        return Err(FramelineError::validation(format!(
            "item '{}' motion path has no points",
            item.id
        )));
    }
    let skipped = item.keyframes.iter().filter(|k| !k.frame.is_finite()).count()
        + item
            .cursor_keyframes()
            .iter()
            .filter(|k| !k.frame.is_finite())
            .count();
    if skipped > 0 {
        tracing::warn!(item = %item.id, skipped, "keyframes without a usable frame are ignored");
    }
    Ok(())
}
