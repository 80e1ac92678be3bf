use crate::{normalize_point, Point, Stroke, ToolState};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawMode {
    Idle,
    Drawing { index: usize },
}

/// Turns pointer gestures into the ordered stroke list.
#[derive(Debug)]
pub struct StrokeRecorder {
    strokes: Vec<Stroke>,
    mode: DrawMode,
}

impl Default for StrokeRecorder {
    fn default() -> Self {
        Self {
            strokes: Vec::new(),
            mode: DrawMode::Idle,
        }
    }
}

impl StrokeRecorder {
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.mode, DrawMode::Drawing { .. })
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        match self.mode {
            DrawMode::Drawing { index } => self.strokes.get(index),
            DrawMode::Idle => None,
        }
    }

    /// Starts a stroke with the toolbar settings in effect right now and
    /// returns its index. A stroke still in progress is ended first.
    pub fn pointer_down(&mut self, point: Point, tools: &ToolState) -> Option<usize> {
        let point = normalize_point(point)?;
        self.pointer_up();
        self.strokes.push(Stroke {
            tool: tools.tool(),
            points: vec![point],
            width: tools.width(),
            color: tools.color().to_string(),
        });
        let index = self.strokes.len() - 1;
        self.mode = DrawMode::Drawing { index };
        Some(index)
    }

    /// Appends to the active stroke. Ignored while idle.
    pub fn pointer_move(&mut self, point: Point) -> bool {
        let DrawMode::Drawing { index } = self.mode else {
            return false;
        };
        let Some(point) = normalize_point(point) else {
            return false;
        };
        match self.strokes.get_mut(index) {
            Some(stroke) => {
                stroke.points.push(point);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) -> Option<usize> {
        match std::mem::replace(&mut self.mode, DrawMode::Idle) {
            DrawMode::Drawing { index } => Some(index),
            DrawMode::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tool;

    fn p(x: f32, y: f32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn gesture_records_one_point_per_event() {
        let mut recorder = StrokeRecorder::default();
        let tools = ToolState::default();
        recorder.pointer_down(p(0.0, 0.0), &tools);
        for i in 1..=5 {
            assert!(recorder.pointer_move(p(i as f32, i as f32 * 2.0)));
            assert_eq!(recorder.strokes()[0].points.len(), i + 1);
        }
        assert_eq!(recorder.pointer_up(), Some(0));

        let stroke = &recorder.strokes()[0];
        assert_eq!(stroke.points.len(), 6);
        for (i, point) in stroke.points.iter().enumerate() {
            assert_eq!(*point, p(i as f32, i as f32 * 2.0));
        }
    }

    #[test]
    fn moves_while_idle_are_ignored() {
        let mut recorder = StrokeRecorder::default();
        assert!(!recorder.pointer_move(p(1.0, 1.0)));
        assert!(recorder.strokes().is_empty());

        recorder.pointer_down(p(0.0, 0.0), &ToolState::default());
        recorder.pointer_up();
        assert!(!recorder.pointer_move(p(2.0, 2.0)));
        assert_eq!(recorder.strokes()[0].points.len(), 1);
    }

    #[test]
    fn pointer_up_is_idempotent() {
        let mut recorder = StrokeRecorder::default();
        assert_eq!(recorder.pointer_up(), None);
        recorder.pointer_down(p(0.0, 0.0), &ToolState::default());
        assert_eq!(recorder.pointer_up(), Some(0));
        assert_eq!(recorder.pointer_up(), None);
        assert!(!recorder.is_drawing());
    }

    #[test]
    fn tool_changes_only_affect_later_strokes() {
        let mut recorder = StrokeRecorder::default();
        let mut tools = ToolState::default();
        tools.set_color("#ff0000".to_string());
        tools.set_width(5.0);
        recorder.pointer_down(p(0.0, 0.0), &tools);
        recorder.pointer_move(p(1.0, 0.0));

        tools.set_tool(Tool::Eraser);
        tools.set_width(20.0);
        recorder.pointer_move(p(2.0, 0.0));
        recorder.pointer_up();

        recorder.pointer_down(p(5.0, 5.0), &tools);
        recorder.pointer_up();

        let first = &recorder.strokes()[0];
        assert_eq!(first.tool, Tool::Pen);
        assert_eq!(first.width, 5.0);
        assert_eq!(first.color, "#ff0000");
        assert_eq!(first.points.len(), 3);

        let second = &recorder.strokes()[1];
        assert_eq!(second.tool, Tool::Eraser);
        assert_eq!(second.width, 20.0);
    }

    #[test]
    fn second_down_ends_the_active_stroke() {
        let mut recorder = StrokeRecorder::default();
        let tools = ToolState::default();
        assert_eq!(recorder.pointer_down(p(0.0, 0.0), &tools), Some(0));
        recorder.pointer_move(p(1.0, 1.0));
        assert_eq!(recorder.pointer_down(p(9.0, 9.0), &tools), Some(1));
        recorder.pointer_move(p(10.0, 10.0));
        recorder.pointer_up();

        assert_eq!(recorder.strokes().len(), 2);
        assert_eq!(recorder.strokes()[0].points, vec![p(0.0, 0.0), p(1.0, 1.0)]);
        assert_eq!(recorder.strokes()[1].points, vec![p(9.0, 9.0), p(10.0, 10.0)]);
    }

    #[test]
    fn strokes_keep_insertion_order() {
        let mut recorder = StrokeRecorder::default();
        let tools = ToolState::default();
        for i in 0..4 {
            recorder.pointer_down(p(i as f32, 0.0), &tools);
            recorder.pointer_up();
        }
        let starts: Vec<f32> = recorder.strokes().iter().map(|s| s.points[0].x).collect();
        assert_eq!(starts, vec![0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn non_finite_points_are_dropped() {
        let mut recorder = StrokeRecorder::default();
        let tools = ToolState::default();
        assert_eq!(recorder.pointer_down(p(f32::NAN, 0.0), &tools), None);
        assert!(!recorder.is_drawing());

        recorder.pointer_down(p(0.0, 0.0), &tools);
        assert!(!recorder.pointer_move(p(f32::INFINITY, 0.0)));
        assert_eq!(recorder.active_stroke().map(|s| s.points.len()), Some(1));
    }
}
