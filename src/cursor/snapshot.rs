//! Recorded layout measurements.
//!
//! A [`LayoutSnapshot`] is a static picture of the preview surface: which selectors matched
//! which boxes when the layout was measured. It lets the resolver run without a live UI, for
//! example from the CLI or in tests.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

use crate::cursor::resolver::{ElementContainer, LayoutError, LayoutSurface};
use crate::foundation::error::{FramelineError, FramelineResult};

/// A measured element and the selectors it answers to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeasuredElement {
    /// Selectors matching this element.
    pub selectors: Vec<String>,
    /// Bounding box in preview coordinates.
    pub rect: Rect,
}

/// A container of measured elements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeasuredContainer {
    /// Label for logs.
    #[serde(default)]
    pub name: String,
    /// Elements in document order.
    #[serde(default)]
    pub elements: Vec<MeasuredElement>,
}

/// Preview rect plus containers, loadable from JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    /// Measured preview surface.
    pub preview: Rect,
    /// Containers in search order.
    #[serde(default)]
    pub containers: Vec<MeasuredContainer>,
}

impl LayoutSnapshot {
    /// Parse a snapshot from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FramelineResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FramelineError::serde(format!("parse layout snapshot JSON: {e}")))
    }

    /// Parse a snapshot from a JSON file on disk.
    ///
    /// I/O failures surface as [`FramelineError::Other`] with the path as context.
    pub fn from_path(path: impl AsRef<Path>) -> FramelineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open layout snapshot '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }
}

/// Reject selectors that are empty or have unbalanced brackets or parentheses.
pub fn validate_selector(selector: &str) -> Result<(), LayoutError> {
    let invalid = || LayoutError::InvalidSelector(selector.to_owned());
    if selector.trim().is_empty() {
        return Err(invalid());
    }
    let mut stack = Vec::new();
    for c in selector.chars() {
        match c {
            '[' | '(' => stack.push(c),
            ']' => {
                if stack.pop() != Some('[') {
                    return Err(invalid());
                }
            }
            ')' => {
                if stack.pop() != Some('(') {
                    return Err(invalid());
                }
            }
            _ => {}
        }
    }
    if stack.is_empty() { Ok(()) } else { Err(invalid()) }
}

impl ElementContainer for MeasuredContainer {
    fn query(&self, selector: &str) -> Result<Option<Rect>, LayoutError> {
        validate_selector(selector)?;
        let selector = selector.trim();
        Ok(self
            .elements
            .iter()
            .find(|e| e.selectors.iter().any(|s| s == selector))
            .map(|e| e.rect))
    }
}

impl LayoutSurface for LayoutSnapshot {
    fn preview_rect(&self) -> Option<Rect> {
        Some(self.preview)
    }

    fn containers(&self) -> Vec<&dyn ElementContainer> {
        self.containers
            .iter()
            .map(|c| c as &dyn ElementContainer)
            .collect()
    }
}
