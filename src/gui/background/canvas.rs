use crate::geometry::{Point, Rect};
use cairo::Context;
use palette::Srgba;
use std::f64::consts::PI;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrawError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Drawing surface unavailable")]
    SurfaceUnavailable,
}

/// The drawing primitives a background needs from its surface.
pub trait Canvas {
    /// Replaces every pixel with `color`, ignoring what was there before.
    fn clear(&mut self, color: Srgba<f64>) -> Result<(), DrawError>;
    /// Composites `color` over `rect`.
    fn fill_rect(&mut self, rect: Rect, color: Srgba<f64>) -> Result<(), DrawError>;
    fn fill_circle(&mut self, center: Point, radius: f64, color: Srgba<f64>)
    -> Result<(), DrawError>;
    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        color: Srgba<f64>,
    ) -> Result<(), DrawError>;
    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        width: f64,
        color: Srgba<f64>,
    ) -> Result<(), DrawError>;
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

impl Canvas for Context {
    fn clear(&mut self, color: Srgba<f64>) -> Result<(), DrawError> {
        self.save()?;
        self.set_operator(cairo::Operator::Source);
        set_source(self, color);
        self.paint()?;
        self.restore()?;
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Srgba<f64>) -> Result<(), DrawError> {
        set_source(self, color);
        self.rectangle(rect.x, rect.y, rect.width, rect.height);
        Ok(self.fill()?)
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: f64,
        color: Srgba<f64>,
    ) -> Result<(), DrawError> {
        set_source(self, color);
        self.new_sub_path();
        self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        Ok(self.fill()?)
    }

    fn stroke_circle(
        &mut self,
        center: Point,
        radius: f64,
        width: f64,
        color: Srgba<f64>,
    ) -> Result<(), DrawError> {
        set_source(self, color);
        self.set_line_width(width);
        self.new_sub_path();
        self.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        Ok(self.stroke()?)
    }

    fn stroke_line(
        &mut self,
        from: Point,
        to: Point,
        width: f64,
        color: Srgba<f64>,
    ) -> Result<(), DrawError> {
        set_source(self, color);
        self.set_line_width(width);
        self.move_to(from.x, from.y);
        self.line_to(to.x, to.y);
        Ok(self.stroke()?)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Op {
        Clear(Srgba<f64>),
        FillRect(Rect, Srgba<f64>),
        FillCircle {
            center: Point,
            radius: f64,
            color: Srgba<f64>,
        },
        StrokeCircle {
            center: Point,
            radius: f64,
            color: Srgba<f64>,
        },
        StrokeLine {
            from: Point,
            to: Point,
            color: Srgba<f64>,
        },
    }

    /// Records draw calls instead of rasterizing them.
    #[derive(Debug, Default)]
    pub struct RecordingCanvas {
        pub ops: Vec<Op>,
    }

    impl RecordingCanvas {
        pub fn circles(&self) -> usize {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::FillCircle { .. }))
                .count()
        }

        pub fn lines(&self) -> Vec<&Op> {
            self.ops
                .iter()
                .filter(|op| matches!(op, Op::StrokeLine { .. }))
                .collect()
        }
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self, color: Srgba<f64>) -> Result<(), DrawError> {
            self.ops.push(Op::Clear(color));
            Ok(())
        }

        fn fill_rect(&mut self, rect: Rect, color: Srgba<f64>) -> Result<(), DrawError> {
            self.ops.push(Op::FillRect(rect, color));
            Ok(())
        }

        fn fill_circle(
            &mut self,
            center: Point,
            radius: f64,
            color: Srgba<f64>,
        ) -> Result<(), DrawError> {
            self.ops.push(Op::FillCircle {
                center,
                radius,
                color,
            });
            Ok(())
        }

        fn stroke_circle(
            &mut self,
            center: Point,
            radius: f64,
            _width: f64,
            color: Srgba<f64>,
        ) -> Result<(), DrawError> {
            self.ops.push(Op::StrokeCircle {
                center,
                radius,
                color,
            });
            Ok(())
        }

        fn stroke_line(
            &mut self,
            from: Point,
            to: Point,
            _width: f64,
            color: Srgba<f64>,
        ) -> Result<(), DrawError> {
            self.ops.push(Op::StrokeLine { from, to, color });
            Ok(())
        }
    }
}
