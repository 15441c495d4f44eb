use crate::{
    core::{bounds::Bounds, geo::Point},
    layers::marker::Icon,
};

/// Axis-aligned hit testing against marker icons
pub struct HitTest;

impl HitTest {
    /// Box an icon covers when its anchor sits on `point`
    pub fn icon_bounds(point: &Point, icon: &Icon) -> Bounds {
        Bounds::from_origin_and_size(point.subtract(&icon.anchor), icon.size.x, icon.size.y)
    }

    /// Whether `pointer` falls on the icon drawn at `point` (edges inclusive)
    pub fn hits(point: &Point, icon: &Icon, pointer: &Point) -> bool {
        Self::icon_bounds(point, icon).contains(pointer)
    }

    /// Picks the candidate with the highest z-index. Ties keep the first
    /// candidate seen; a missing z-index ranks below every assigned one.
    pub fn topmost<T>(candidates: impl IntoIterator<Item = (Option<u32>, T)>) -> Option<T> {
        let mut best: Option<(Option<u32>, T)> = None;
        for (z_index, candidate) in candidates {
            let higher = match &best {
                Some((best_z, _)) => z_index > *best_z,
                None => true,
            };
            if higher {
                best = Some((z_index, candidate));
            }
        }
        best.map(|(_, candidate)| candidate)
    }
}
