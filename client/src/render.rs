use web_sys::CanvasRenderingContext2d;

use markup_shared::paint::{plan_all, Shape, StrokePaint};
use markup_shared::Point;

use crate::state::State;

const SOURCE_OVER: &str = "source-over";

pub fn draw_dot(ctx: &CanvasRenderingContext2d, point: Point, color: &str, width: f64) {
    ctx.set_fill_style_str(color);
    ctx.begin_path();
    let _ = ctx.arc(
        point.x as f64,
        point.y as f64,
        width / 2.0,
        0.0,
        std::f64::consts::PI * 2.0,
    );
    ctx.fill();
}

pub fn draw_polyline(ctx: &CanvasRenderingContext2d, points: &[Point], color: &str, width: f64) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(width);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    ctx.move_to(first.x as f64, first.y as f64);
    for point in rest {
        ctx.line_to(point.x as f64, point.y as f64);
    }
    ctx.stroke();
}

fn draw_paint(ctx: &CanvasRenderingContext2d, paint: &StrokePaint) {
    let _ = ctx.set_global_composite_operation(paint.composite_operation);
    match &paint.shape {
        Shape::Dot(point) => draw_dot(ctx, *point, paint.color, paint.width),
        Shape::Polyline(points) => draw_polyline(ctx, points, paint.color, paint.width),
    }
}

/// Replays the whole surface: background first, then every stroke in order.
/// Background and ink share the canvas, so eraser strokes cut through both.
pub fn redraw(state: &State) {
    let ctx = &state.ctx;
    let width = state.canvas.width() as f64;
    let height = state.canvas.height() as f64;
    let _ = ctx.set_global_composite_operation(SOURCE_OVER);
    ctx.clear_rect(0.0, 0.0, width, height);

    if let Some(size) = state.surface.size().filter(|_| state.background.loaded) {
        let _ = ctx.draw_image_with_html_image_element_and_dw_and_dh(
            &state.background.image,
            0.0,
            0.0,
            size.width as f64,
            size.height as f64,
        );
    }

    for paint in plan_all(state.recorder.strokes()) {
        draw_paint(ctx, &paint);
    }
    let _ = ctx.set_global_composite_operation(SOURCE_OVER);
}
