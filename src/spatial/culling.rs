use crate::core::{bounds::Bounds, constants::CULL_ICON_FACTOR, geo::Point};

/// Screen-space culling for icons painted on a canvas.
///
/// The test is deliberately coarse: a marker is kept while its anchor point
/// lies within the canvas grown by twice the icon size on every side.
pub struct Culling;

impl Culling {
    /// Area an icon's anchor point must fall in to be painted
    pub fn padded_canvas(canvas_size: Point, icon_size: Point) -> Bounds {
        Bounds::from_origin_and_size(Point::default(), canvas_size.x, canvas_size.y).padded(
            icon_size.x * CULL_ICON_FACTOR,
            icon_size.y * CULL_ICON_FACTOR,
        )
    }

    /// Returns `true` if an icon anchored at `point` cannot be visible
    pub fn is_culled(point: &Point, icon_size: Point, canvas_size: Point) -> bool {
        !Self::padded_canvas(canvas_size, icon_size).contains(point)
    }
}
