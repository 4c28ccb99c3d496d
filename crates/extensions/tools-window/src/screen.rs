//! Screen geometry source.

use screenshots::Screen;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Failed to query displays: {0}")]
    QueryFailed(String),

    #[error("No display found")]
    NoDisplay,
}

/// Size of the primary display in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

impl ScreenSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Provides the dimensions used to compute target window bounds.
pub trait ScreenGeometry: Send + Sync {
    fn primary_screen(&self) -> Result<ScreenSize, ScreenError>;
}

/// Reads the primary display through the `screenshots` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct PrimaryScreen;

impl ScreenGeometry for PrimaryScreen {
    fn primary_screen(&self) -> Result<ScreenSize, ScreenError> {
        let screens = Screen::all().map_err(|e| ScreenError::QueryFailed(e.to_string()))?;

        let mut fallback = None;
        for screen in screens {
            let info = screen.display_info;
            if info.is_primary {
                return Ok(ScreenSize::new(info.width, info.height));
            }
            if fallback.is_none() {
                fallback = Some(ScreenSize::new(info.width, info.height));
            }
        }

        fallback.ok_or(ScreenError::NoDisplay)
    }
}

/// Fixed size, for headless runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticScreen(pub ScreenSize);

impl ScreenGeometry for StaticScreen {
    fn primary_screen(&self) -> Result<ScreenSize, ScreenError> {
        Ok(self.0)
    }
}
