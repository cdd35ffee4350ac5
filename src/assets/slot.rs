use crate::assets::decode::PreparedImage;

/// Load state of an image that decodes asynchronously in the host.
#[derive(Clone, Debug, Default)]
pub enum ImageSlot {
    /// Decode not finished yet.
    #[default]
    Pending,
    Ready(PreparedImage),
    /// Decode failed; the reason is kept for logging.
    Failed(String),
}

impl ImageSlot {
    /// `true` once the slot will not change any more.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }

    /// The decoded image, when it is usable (non-empty).
    pub fn ready(&self) -> Option<&PreparedImage> {
        match self {
            Self::Ready(img) if !img.is_empty() => Some(img),
            _ => None,
        }
    }
}

impl From<PreparedImage> for ImageSlot {
    fn from(img: PreparedImage) -> Self {
        Self::Ready(img)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/slot.rs"]
mod tests;
