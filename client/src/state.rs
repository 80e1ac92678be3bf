use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use markup_shared::{StrokeRecorder, SurfaceSync, ToolState};

pub struct Background {
    pub image: HtmlImageElement,
    pub url: Option<String>,
    pub loaded: bool,
}

pub struct State {
    pub canvas: HtmlCanvasElement,
    pub ctx: CanvasRenderingContext2d,
    pub background: Background,
    pub surface: SurfaceSync,
    pub tools: ToolState,
    pub recorder: StrokeRecorder,
    pub active_pointer: Option<i32>,
    pub debug: bool,
}
