use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub mod entry;
pub mod paint;
pub mod recorder;
pub mod surface;
pub mod toolbar;

pub use recorder::StrokeRecorder;
pub use surface::{SurfaceSize, SurfaceSync};
pub use toolbar::ToolState;

pub const EXPORT_FILE_NAME: &str = "stage.png";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

pub fn normalize_point(point: Point) -> Option<Point> {
    if !point.x.is_finite() || !point.y.is_finite() {
        return None;
    }
    Some(point)
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pen,
    Eraser,
}

impl Tool {
    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Pen => "pen",
            Tool::Eraser => "eraser",
        }
    }

    /// Canvas `globalCompositeOperation` used when painting with this tool.
    pub fn composite_operation(self) -> &'static str {
        match self {
            Tool::Pen => "source-over",
            Tool::Eraser => "destination-out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseToolError(pub String);

impl fmt::Display for ParseToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tool: {:?}", self.0)
    }
}

impl std::error::Error for ParseToolError {}

impl FromStr for Tool {
    type Err = ParseToolError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            other => Err(ParseToolError(other.to_string())),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Stroke {
    pub tool: Tool,
    pub points: Vec<Point>,
    #[serde(rename = "strokeWidth")]
    pub width: f32,
    #[serde(rename = "strokeColor")]
    pub color: String,
}
