use std::{fs::File, io::BufReader, path::Path, path::PathBuf, time::Duration};

use crate::{
    capture::{geometry::CapturePolicy, label::LabelStyle},
    foundation::{
        core::Size,
        error::{ArsnapError, ArsnapResult},
    },
    render::target::MemoryTarget,
};

/// Caption drawn onto every base capture.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub text: String,
    /// Font file for the caption text. Relative paths resolve against the config file's directory.
    pub font_path: Option<PathBuf>,
    pub style: LabelStyle,
}

/// Tunables for a photo session. Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    pub capture: CapturePolicy,
    pub label: LabelConfig,
    /// How long a final compose waits for the bubble image to decode before giving up.
    pub bubble_decode_fallback_ms: u64,
    /// Layout size of the sprite element, used by headless targets.
    pub sprite_box: Size,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            capture: CapturePolicy::default(),
            label: LabelConfig::default(),
            bubble_decode_fallback_ms: 500,
            sprite_box: MemoryTarget::DEFAULT_BOX,
        }
    }
}

impl SessionConfig {
    pub fn from_reader<R: std::io::Read>(r: R) -> ArsnapResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ArsnapError::serde(format!("parse session config JSON: {e}")))
    }

    /// Parse a config file; a relative label font path is rebased onto the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> ArsnapResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ArsnapError::validation(format!("open session config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let (Some(font), Some(dir)) = (cfg.label.font_path.as_mut(), path.parent())
            && font.is_relative()
        {
            *font = dir.join(&*font);
        }
        Ok(cfg)
    }

    pub fn validate(&self) -> ArsnapResult<()> {
        self.capture.validate()?;
        let s = &self.label.style;
        if !s.font_size.is_finite() || s.font_size <= 0.0 {
            return Err(ArsnapError::validation(
                "label font_size must be finite and > 0",
            ));
        }
        for (name, v) in [
            ("label box width", s.box_size.width),
            ("label box height", s.box_size.height),
            ("sprite_box width", self.sprite_box.width),
            ("sprite_box height", self.sprite_box.height),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(ArsnapError::validation(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }

    pub fn bubble_decode_fallback(&self) -> Duration {
        Duration::from_millis(self.bubble_decode_fallback_ms)
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
