use super::{
    BUTTON_HEIGHT, BUTTON_WIDTH, CONTAINER_MAX_WIDTH, CONTAINER_PADDING, DOT_BOTTOM_MARGIN,
    DOT_HIT_RADIUS, DOT_RADIUS, DOT_SPACING, IMAGE_MAX_SIZE,
};
use crate::config::ImagePosition;
use crate::geometry::{Point, Rect, Viewport};

/// Where the parts of a section go at rest, before any motion offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideLayout {
    pub text: Rect,
    pub image: Rect,
    pub button: Rect,
}

impl SlideLayout {
    /// Two columns of 5/12 of the container each, text and image on opposite sides.
    pub fn compute(viewport: Viewport, image_position: ImagePosition) -> Self {
        let container_width = (viewport.width - 2.0 * CONTAINER_PADDING)
            .min(CONTAINER_MAX_WIDTH)
            .max(0.0);
        let left = (viewport.width - container_width) / 2.0;
        let column = container_width * 5.0 / 12.0;
        let right = left + container_width - column;

        let (text_x, image_column_x) = match image_position {
            ImagePosition::Right => (left, right),
            ImagePosition::Left => (right, left),
        };

        let text_height = viewport.height * 0.5;
        let text = Rect::new(
            text_x,
            (viewport.height - text_height) / 2.0,
            column,
            text_height,
        );

        let side = column.min(IMAGE_MAX_SIZE).min(viewport.height * 0.6);
        let image = Rect::new(
            image_column_x + (column - side) / 2.0,
            (viewport.height - side) / 2.0,
            side,
            side,
        );

        let button = Rect::new(
            text.x,
            text.y + text.height - BUTTON_HEIGHT,
            BUTTON_WIDTH.min(column),
            BUTTON_HEIGHT,
        );

        Self {
            text,
            image,
            button,
        }
    }
}

/// Indicator dots, centred along the bottom edge.
pub fn dot_centers(viewport: Viewport, count: usize) -> Vec<Point> {
    let span = count.saturating_sub(1) as f64 * DOT_SPACING;
    let x0 = viewport.width / 2.0 - span / 2.0;
    let y = viewport.height - DOT_BOTTOM_MARGIN - DOT_RADIUS;
    (0..count)
        .map(|i| Point::new(x0 + i as f64 * DOT_SPACING, y))
        .collect()
}

pub fn dot_at(viewport: Viewport, count: usize, point: Point) -> Option<usize> {
    dot_centers(viewport, count)
        .iter()
        .position(|center| center.distance(point) <= DOT_HIT_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        width: 1344.0,
        height: 800.0,
    };

    #[test]
    fn test_columns_swap_with_image_position() {
        let right = SlideLayout::compute(VIEWPORT, ImagePosition::Right);
        let left = SlideLayout::compute(VIEWPORT, ImagePosition::Left);

        assert_eq!(right.text.x, 32.0);
        assert!(right.image.x > right.text.x);
        assert!(left.image.x < left.text.x);
        assert_eq!(left.text.width, 1280.0 * 5.0 / 12.0);
        assert_eq!(right.image.width, IMAGE_MAX_SIZE);
    }

    #[test]
    fn test_button_inside_text_column() {
        let layout = SlideLayout::compute(VIEWPORT, ImagePosition::Right);
        let b = layout.button;
        assert!(layout.text.contains(Point::new(b.x, b.y)));
        assert!(layout.text.contains(Point::new(b.x + b.width, b.y + b.height)));
    }

    #[test]
    fn test_tiny_viewport_does_not_go_negative() {
        let layout = SlideLayout::compute(Viewport::new(40.0, 40.0), ImagePosition::Left);
        assert_eq!(layout.text.width, 0.0);
        assert_eq!(layout.image.width, 0.0);
    }

    #[test]
    fn test_dots_centered() {
        let centers = dot_centers(VIEWPORT, 4);
        assert_eq!(centers.len(), 4);
        let mid = (centers[0].x + centers[3].x) / 2.0;
        assert_eq!(mid, VIEWPORT.width / 2.0);
        assert_eq!(centers[1].x - centers[0].x, DOT_SPACING);
        assert!(dot_centers(VIEWPORT, 0).is_empty());
    }

    #[test]
    fn test_dot_hit() {
        let centers = dot_centers(VIEWPORT, 4);
        assert_eq!(dot_at(VIEWPORT, 4, centers[2]), Some(2));
        assert_eq!(
            dot_at(VIEWPORT, 4, Point::new(centers[2].x + 3.0, centers[2].y - 3.0)),
            Some(2)
        );
        assert_eq!(dot_at(VIEWPORT, 4, Point::new(10.0, 10.0)), None);
    }
}
