/// Sprite component: the image an entity draws instead of its placeholder box.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteComponent {
    /// Asset key of the image currently shown.
    pub image: String,
    /// Whether the host has finished loading the image.
    /// Unloaded sprites fall back to the placeholder rectangle.
    pub loaded: bool,
}

impl SpriteComponent {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            loaded: false,
        }
    }

    pub fn loaded(mut self) -> Self {
        self.loaded = true;
        self
    }
}
