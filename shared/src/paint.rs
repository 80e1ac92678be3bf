use crate::{Point, Stroke};

#[derive(Debug, PartialEq)]
pub enum Shape<'a> {
    /// Filled disc, diameter equal to the stroke width.
    Dot(Point),
    /// Open path with round caps and joins.
    Polyline(&'a [Point]),
}

#[derive(Debug, PartialEq)]
pub struct StrokePaint<'a> {
    pub composite_operation: &'static str,
    pub color: &'a str,
    pub width: f64,
    pub shape: Shape<'a>,
}

pub fn plan(stroke: &Stroke) -> Option<StrokePaint<'_>> {
    let shape = match stroke.points.as_slice() {
        [] => return None,
        [point] => Shape::Dot(*point),
        points => Shape::Polyline(points),
    };
    Some(StrokePaint {
        composite_operation: stroke.tool.composite_operation(),
        color: &stroke.color,
        width: stroke.width as f64,
        shape,
    })
}

/// Paint plans in render order; later strokes land on top.
pub fn plan_all(strokes: &[Stroke]) -> impl Iterator<Item = StrokePaint<'_>> {
    strokes.iter().filter_map(plan)
}
