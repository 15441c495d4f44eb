use crate::core::geo::{LatLng, LatLngBounds, Point};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

const EARTH_RADIUS: f64 = 6378137.0;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
    /// Pixel origin for coordinate transformations (to avoid precision issues)
    pixel_origin: Option<Point>,
}

/// CSS-style transform: translate, then scale around `origin`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Translation in pixels
    pub translate: Point,
    /// Scale factor (1.0 = no scaling)
    pub scale: f64,
    /// Transform origin point in pixels
    pub origin: Point,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translate: Point::new(0.0, 0.0),
            scale: 1.0,
            origin: Point::new(0.0, 0.0),
        }
    }
}

impl Transform {
    pub fn new(translate: Point, scale: f64, origin: Point) -> Self {
        Self {
            translate,
            scale,
            origin,
        }
    }

    /// Pure translation, what positioning an element in a pane amounts to
    pub fn translation(translate: Point) -> Self {
        Self::new(translate, 1.0, Point::default())
    }

    /// Create identity transform (no change)
    pub fn identity() -> Self {
        Self::default()
    }

    /// Check if this is effectively an identity transform
    pub fn is_identity(&self) -> bool {
        (self.scale - 1.0).abs() < 0.001
            && self.translate.x.abs() < 0.1
            && self.translate.y.abs() < 0.1
    }

    /// Renders the transform the way a `transform` style attribute would read
    pub fn to_css(&self) -> String {
        let mut css = format!(
            "translate3d({}px,{}px,0)",
            self.translate.x, self.translate.y
        );
        if (self.scale - 1.0).abs() > f64::EPSILON {
            css.push_str(&format!(" scale({})", self.scale));
        }
        css
    }
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
            pixel_origin: None,
        };
        viewport.update_pixel_origin();
        viewport
    }

    /// Sets the center of the viewport, clamped to the projectable world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            LatLng::clamp_lat(center.lat),
            center.lng.clamp(-180.0, 180.0),
        );
        self.update_pixel_origin();
    }

    /// Sets the zoom level, clamping to valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        self.update_pixel_origin();
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
        self.update_pixel_origin();
    }

    /// Sets the zoom limits
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
        self.update_pixel_origin();
    }

    /// Scale factor between `zoom` and the current zoom level
    pub fn zoom_scale(&self, zoom: f64) -> f64 {
        2_f64.powf(zoom - self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// (Web Mercator, EPSG:3857)
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = 256.0 * 2_f64.powf(z);

        let lat = LatLng::clamp_lat(lat_lng.lat);
        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = ((PI / 4.0 + lat.to_radians() / 2.0).tan().ln()) * EARTH_RADIUS;

        let pixel_x = (x + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;
        let pixel_y = (-y + PI * EARTH_RADIUS) / (2.0 * PI * EARTH_RADIUS) * scale;

        Point::new(pixel_x, pixel_y)
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = 256.0 * 2_f64.powf(z);

        let x = (pixel.x / scale) * (2.0 * PI * EARTH_RADIUS) - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * (2.0 * PI * EARTH_RADIUS);

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();

        LatLng::new(lat, lng)
    }

    /// Gets or calculates the pixel origin for this viewport
    pub fn get_pixel_origin(&self) -> Point {
        self.pixel_origin
            .unwrap_or_else(|| self.project(&self.center, None).floor())
    }

    /// Pixel origin the layer space would have if the map settled on
    /// `center` at `zoom`
    pub fn pixel_origin_for(&self, center: &LatLng, zoom: f64) -> Point {
        self.project(center, Some(zoom)).floor()
    }

    fn update_pixel_origin(&mut self) {
        self.pixel_origin = Some(self.project(&self.center, None).floor());
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_container_point(&self, lat_lng: &LatLng) -> Point {
        let layer_point = self.lat_lng_to_layer_point(lat_lng);
        self.layer_point_to_container_point(&layer_point)
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn container_point_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let layer_point = self.container_point_to_layer_point(pixel);
        self.layer_point_to_lat_lng(&layer_point)
    }

    /// Converts LatLng to layer point (relative to pixel origin)
    pub fn lat_lng_to_layer_point(&self, lat_lng: &LatLng) -> Point {
        let projected_point = self.project(lat_lng, None);
        projected_point.subtract(&self.get_pixel_origin())
    }

    /// Converts layer point back to LatLng
    pub fn layer_point_to_lat_lng(&self, point: &Point) -> LatLng {
        let projected_point = point.add(&self.get_pixel_origin());
        self.unproject(&projected_point, None)
    }

    /// Converts layer point to container point (screen coordinates)
    pub fn layer_point_to_container_point(&self, point: &Point) -> Point {
        Point::new(point.x + self.size.x / 2.0, point.y + self.size.y / 2.0)
    }

    /// Converts container point to layer point
    pub fn container_point_to_layer_point(&self, point: &Point) -> Point {
        Point::new(point.x - self.size.x / 2.0, point.y - self.size.y / 2.0)
    }

    /// Pans the viewport by the given container-pixel offset
    pub fn pan_by(&mut self, delta: Point) {
        let center_layer = self.lat_lng_to_layer_point(&self.center);
        let new_center = self.layer_point_to_lat_lng(&center_layer.add(&delta));
        self.set_center(new_center);
    }

    /// Gets the current viewport bounds in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.container_point_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.container_point_to_lat_lng(&Point::new(self.size.x, self.size.y));

        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }

    /// Top-left of the current view, expressed in the layer space the map
    /// will have once it settles on `center` at `zoom`. This is the offset an
    /// element must be translated by while it is scaled through a zoom
    /// animation.
    pub fn zoom_animation_offset(&self, center: &LatLng, zoom: f64) -> Point {
        let top_left = self.project(&self.bounds().north_west(), Some(zoom));
        let new_origin = self.pixel_origin_for(center, zoom);
        top_left.subtract(&new_origin).round()
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::new(0.0, 0.0), 0.0, Point::new(800.0, 600.0))
    }
}
