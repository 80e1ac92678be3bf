#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

/// Tracks whether the drawing surface has taken the background's size yet.
#[derive(Debug, Default)]
pub struct SurfaceSync {
    size: Option<SurfaceSize>,
}

impl SurfaceSync {
    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    /// Takes the rendered size of a freshly loaded background. Only the first
    /// load after a `reset` is honoured.
    pub fn on_image_load(&mut self, offset_width: u32, offset_height: u32) -> Option<SurfaceSize> {
        if self.size.is_some() || offset_width == 0 || offset_height == 0 {
            return None;
        }
        let size = SurfaceSize {
            width: offset_width,
            height: offset_height,
        };
        self.size = Some(size);
        Some(size)
    }

    pub fn reset(&mut self) {
        self.size = None;
    }
}
