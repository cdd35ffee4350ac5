//! JSON descriptions consumed by the `arsnap` binary: capture scenes and gesture replay scripts.

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    assets::decode::{PreparedImage, load_image},
    capture::geometry::ScreenGeometry,
    config::SessionConfig,
    foundation::{
        core::{Rgba8, Viewport},
        error::{ArsnapError, ArsnapResult},
    },
    gesture::{
        input::{PointerEvent, WheelEvent},
        state::FlipX,
    },
};

/// Where a layer's pixels come from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImageSourceDef {
    /// Image file; relative paths resolve against the scene file's directory.
    File { path: PathBuf },
    /// Flat color, handy for fixtures.
    Solid {
        width: u32,
        height: u32,
        color: Rgba8,
    },
}

impl ImageSourceDef {
    pub fn load(&self, root: &Path) -> ArsnapResult<PreparedImage> {
        match self {
            Self::File { path } => load_image(&root.join(path)),
            Self::Solid {
                width,
                height,
                color,
            } => Ok(PreparedImage::solid(*width, *height, *color)),
        }
    }
}

/// Sprite placement details that the geometry snapshot does not carry.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneTransform {
    pub rotation_deg: f64,
    pub flip: FlipX,
}

/// One frozen capture moment: geometry plus the image behind every layer.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDef {
    pub viewport: Viewport,
    #[serde(default)]
    pub session: SessionConfig,
    pub geometry: ScreenGeometry,
    pub video: ImageSourceDef,
    #[serde(default)]
    pub beam: Option<ImageSourceDef>,
    #[serde(default)]
    pub ground: Option<ImageSourceDef>,
    #[serde(default)]
    pub sprite: Option<ImageSourceDef>,
    #[serde(default)]
    pub bubble: Option<ImageSourceDef>,
    #[serde(default)]
    pub transform: SceneTransform,
}

/// Decoded images of a [`SceneDef`]. A layer that failed to load is `None`.
#[derive(Clone, Debug, Default)]
pub struct SceneImages {
    pub video: Option<PreparedImage>,
    pub beam: Option<PreparedImage>,
    pub ground: Option<PreparedImage>,
    pub sprite: Option<PreparedImage>,
    pub bubble: Option<PreparedImage>,
}

impl SceneDef {
    pub fn from_reader<R: std::io::Read>(r: R) -> ArsnapResult<Self> {
        serde_json::from_reader(r).map_err(|e| ArsnapError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ArsnapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ArsnapError::validation(format!("open scene '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> ArsnapResult<()> {
        if !(self.viewport.width.is_finite()
            && self.viewport.height.is_finite()
            && self.viewport.width > 0.0
            && self.viewport.height > 0.0)
        {
            return Err(ArsnapError::validation("viewport must be finite and > 0"));
        }
        if self.geometry.video.is_empty() {
            return Err(ArsnapError::validation(
                "geometry.video must have non-zero size",
            ));
        }
        if !self.transform.rotation_deg.is_finite() {
            return Err(ArsnapError::validation("transform.rotation_deg must be finite"));
        }
        self.session.validate()
    }

    /// Decode every layer. The video frame is required; an optional layer that fails to decode is
    /// logged and left out, the way an unloaded image is skipped at capture time.
    pub fn load_images(&self, root: &Path) -> ArsnapResult<SceneImages> {
        let optional = |name: &str, def: &Option<ImageSourceDef>| match def {
            Some(d) => match d.load(root) {
                Ok(img) => Some(img),
                Err(err) => {
                    tracing::warn!(layer = name, error = %err, "layer image failed to load");
                    None
                }
            },
            None => None,
        };
        Ok(SceneImages {
            video: Some(self.video.load(root)?),
            beam: optional("beam", &self.beam),
            ground: optional("ground", &self.ground),
            sprite: optional("sprite", &self.sprite),
            bubble: optional("bubble", &self.bubble),
        })
    }
}

/// One recorded input or lifecycle step.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Down(PointerEvent),
    Move(PointerEvent),
    Up(PointerEvent),
    Cancel,
    Wheel(WheelEvent),
    /// Display-refresh callback.
    Frame,
    CompleteEntry,
    Reset,
    Flip { flip: FlipX },
    Rotate { deg: f64 },
    Resize { viewport: Viewport },
}

/// A gesture recording to replay headlessly.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReplayScript {
    pub viewport: Viewport,
    #[serde(default)]
    pub session: SessionConfig,
    pub events: Vec<ScriptEvent>,
}

impl ReplayScript {
    pub fn from_reader<R: std::io::Read>(r: R) -> ArsnapResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ArsnapError::serde(format!("parse replay script JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ArsnapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ArsnapError::validation(format!("open replay script '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/scene.rs"]
mod tests;
