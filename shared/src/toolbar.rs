use crate::Tool;

pub const DEFAULT_COLOR: &str = "#000000";
pub const DEFAULT_WIDTH: f32 = 1.0;
pub const MIN_WIDTH: f32 = 0.5;
pub const MAX_WIDTH: f32 = 100.0;
const MAX_COLOR_LEN: usize = 32;

pub fn sanitize_color(mut color: String) -> String {
    if color.is_empty() {
        return DEFAULT_COLOR.to_string();
    }
    if color.len() > MAX_COLOR_LEN {
        let mut end = MAX_COLOR_LEN;
        while !color.is_char_boundary(end) {
            end -= 1;
        }
        color.truncate(end);
    }
    color
}

pub fn clamp_width(width: f32) -> f32 {
    width.max(MIN_WIDTH).min(MAX_WIDTH)
}

/// Tool, width and color picked in the toolbar. Read when a stroke starts and
/// copied into it, so later changes never touch existing strokes.
#[derive(Clone, Debug, PartialEq)]
pub struct ToolState {
    tool: Tool,
    width: f32,
    color: String,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            tool: Tool::Pen,
            width: DEFAULT_WIDTH,
            color: DEFAULT_COLOR.to_string(),
        }
    }
}

impl ToolState {
    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_width(&mut self, width: f32) {
        if !width.is_finite() {
            return;
        }
        self.width = clamp_width(width);
    }

    pub fn set_color(&mut self, color: String) {
        self.color = sanitize_color(color);
    }
}
