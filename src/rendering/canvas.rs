use crate::{
    core::{bounds::Bounds, geo::Point, viewport::Transform},
    layers::base::ElementId,
};
use image::{Rgba, RgbaImage};

/// Commands issued to a canvas, kept in order so draw calls can be inspected
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Rectangle reset to transparent
    Clear { area: Bounds },
    /// Image drawn into `dest`, optionally from a `source` sub-rectangle
    DrawImage {
        url: String,
        source: Option<Bounds>,
        dest: Bounds,
        alpha: f64,
    },
}

/// A 2D drawing surface placed in a map pane.
///
/// Pixels live in an RGBA backing store. Like a DOM canvas, resizing
/// reallocates (and therefore clears) the store, and `global_alpha` applies
/// to every image drawn until it is changed again.
#[derive(Debug, Clone)]
pub struct Canvas {
    element: ElementId,
    classes: Vec<String>,
    z_index: i32,
    position: Point,
    transform: Transform,
    global_alpha: f64,
    pixels: RgbaImage,
    commands: Vec<DrawCommand>,
}

impl Canvas {
    pub fn new(element: ElementId, width: u32, height: u32) -> Self {
        Self {
            element,
            classes: Vec::new(),
            z_index: 0,
            position: Point::default(),
            transform: Transform::identity(),
            global_alpha: 1.0,
            pixels: RgbaImage::new(width, height),
            commands: Vec::new(),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn size(&self) -> Point {
        Point::new(self.width() as f64, self.height() as f64)
    }

    /// Reallocate the backing store; all pixels become transparent
    pub fn resize(&mut self, width: u32, height: u32) {
        self.pixels = RgbaImage::new(width, height);
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    pub fn set_z_index(&mut self, z_index: i32) {
        self.z_index = z_index;
    }

    /// Position of the canvas in its pane. Replaces any running transform.
    pub fn set_position(&mut self, position: Point) {
        self.position = position;
        self.transform = Transform::translation(position);
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    pub fn global_alpha(&self) -> f64 {
        self.global_alpha
    }

    /// Reset a rectangle to transparent
    pub fn clear_rect(&mut self, area: Bounds) {
        let (x0, x1) = pixel_span(area.min.x, area.max.x, self.width());
        let (y0, y1) = pixel_span(area.min.y, area.max.y, self.height());
        for y in y0..y1 {
            for x in x0..x1 {
                self.pixels.put_pixel(x, y, Rgba([0, 0, 0, 0]));
            }
        }
        self.commands.push(DrawCommand::Clear { area });
    }

    /// Reset the whole surface to transparent
    pub fn clear(&mut self) {
        let area = Bounds::from_origin_and_size(Point::default(), self.size().x, self.size().y);
        self.clear_rect(area);
    }

    /// Draw `image` scaled into `dest`, sampling `source` (or the whole
    /// image) with nearest-neighbour lookup and blending source-over at the
    /// current global alpha.
    pub fn draw_image(&mut self, url: &str, image: &RgbaImage, source: Option<Bounds>, dest: Bounds) {
        self.commands.push(DrawCommand::DrawImage {
            url: url.to_string(),
            source,
            dest,
            alpha: self.global_alpha,
        });

        if dest.width() <= 0.0 || dest.height() <= 0.0 || self.global_alpha <= 0.0 {
            return;
        }

        let src = source.unwrap_or_else(|| {
            Bounds::from_coords(0.0, 0.0, image.width() as f64, image.height() as f64)
        });
        let (x0, x1) = pixel_span(dest.min.x, dest.max.x, self.width());
        let (y0, y1) = pixel_span(dest.min.y, dest.max.y, self.height());

        for y in y0..y1 {
            let v = (y as f64 + 0.5 - dest.min.y) / dest.height();
            let sy = (src.min.y + v * src.height()).floor();
            if sy < 0.0 || sy >= image.height() as f64 {
                continue;
            }
            for x in x0..x1 {
                let u = (x as f64 + 0.5 - dest.min.x) / dest.width();
                let sx = (src.min.x + u * src.width()).floor();
                if sx < 0.0 || sx >= image.width() as f64 {
                    continue;
                }
                let texel = *image.get_pixel(sx as u32, sy as u32);
                let blended = blend_over(texel, *self.pixels.get_pixel(x, y), self.global_alpha);
                self.pixels.put_pixel(x, y, blended);
            }
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x < self.width() && y < self.height() {
            Some(*self.pixels.get_pixel(x, y))
        } else {
            None
        }
    }

    /// True when no pixel has any coverage
    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p.0[3] == 0)
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of `DrawImage` commands since the command log was last reset
    pub fn draw_call_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::DrawImage { .. }))
            .count()
    }

    pub fn reset_commands(&mut self) {
        self.commands.clear();
    }
}

/// Pixel columns (or rows) whose centers fall inside `[min, max)`,
/// clamped to `[0, limit)`
fn pixel_span(min: f64, max: f64, limit: u32) -> (u32, u32) {
    let start = (min - 0.5).ceil().max(0.0);
    let end = (max - 0.5).ceil().max(0.0);
    let limit = limit as f64;
    (start.min(limit) as u32, end.min(limit) as u32)
}

fn blend_over(src: Rgba<u8>, dst: Rgba<u8>, global_alpha: f64) -> Rgba<u8> {
    let src_a = src.0[3] as f64 / 255.0 * global_alpha;
    let dst_a = dst.0[3] as f64 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let mut out = [0u8; 4];
    for channel in 0..3 {
        let s = src.0[channel] as f64;
        let d = dst.0[channel] as f64;
        out[channel] = ((s * src_a + d * dst_a * (1.0 - src_a)) / out_a).round() as u8;
    }
    out[3] = (out_a * 255.0).round() as u8;
    Rgba(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba(color))
    }

    #[test]
    fn test_new_canvas_is_blank() {
        let canvas = Canvas::new(ElementId(1), 20, 10);
        assert_eq!(canvas.size(), Point::new(20.0, 10.0));
        assert!(canvas.is_blank());
        assert!(canvas.commands().is_empty());
    }

    #[test]
    fn test_draw_image_covers_dest() {
        let mut canvas = Canvas::new(ElementId(1), 20, 20);
        let red = solid(4, 4, [255, 0, 0, 255]);
        canvas.draw_image("red.png", &red, None, Bounds::from_coords(2.0, 2.0, 10.0, 6.0));

        assert_eq!(canvas.pixel(2, 2), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(canvas.pixel(9, 5), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(canvas.pixel(10, 5), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(canvas.pixel(1, 2), Some(Rgba([0, 0, 0, 0])));
        assert_eq!(canvas.draw_call_count(), 1);
    }

    #[test]
    fn test_draw_image_clips_to_canvas() {
        let mut canvas = Canvas::new(ElementId(1), 8, 8);
        let blue = solid(2, 2, [0, 0, 255, 255]);
        canvas.draw_image("blue.png", &blue, None, Bounds::from_coords(-4.0, -4.0, 2.0, 2.0));
        assert_eq!(canvas.pixel(0, 0), Some(Rgba([0, 0, 255, 255])));
        assert_eq!(canvas.pixel(2, 2), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_source_rect_selects_sprite() {
        let mut sheet = solid(4, 2, [255, 0, 0, 255]);
        for y in 0..2 {
            for x in 2..4 {
                sheet.put_pixel(x, y, Rgba([0, 255, 0, 255]));
            }
        }

        let mut canvas = Canvas::new(ElementId(1), 10, 10);
        canvas.draw_image(
            "sheet.png",
            &sheet,
            Some(Bounds::from_coords(2.0, 0.0, 4.0, 2.0)),
            Bounds::from_coords(0.0, 0.0, 4.0, 4.0),
        );
        assert_eq!(canvas.pixel(0, 0), Some(Rgba([0, 255, 0, 255])));
        assert_eq!(canvas.pixel(3, 3), Some(Rgba([0, 255, 0, 255])));
    }

    #[test]
    fn test_global_alpha_blends() {
        let mut canvas = Canvas::new(ElementId(1), 4, 4);
        canvas.set_global_alpha(0.5);
        canvas.draw_image("white.png", &solid(1, 1, [255, 255, 255, 255]), None, Bounds::from_coords(0.0, 0.0, 4.0, 4.0));
        let pixel = canvas.pixel(1, 1).unwrap();
        assert_eq!(pixel.0[3], 128);
        assert_eq!(pixel.0[0], 255);

        canvas.set_global_alpha(0.0);
        canvas.draw_image("white.png", &solid(1, 1, [0, 0, 0, 255]), None, Bounds::from_coords(0.0, 0.0, 4.0, 4.0));
        assert_eq!(canvas.pixel(1, 1), Some(pixel));
    }

    #[test]
    fn test_clear_and_resize() {
        let mut canvas = Canvas::new(ElementId(1), 6, 6);
        canvas.draw_image("x.png", &solid(1, 1, [9, 9, 9, 255]), None, Bounds::from_coords(0.0, 0.0, 6.0, 6.0));
        canvas.clear_rect(Bounds::from_coords(0.0, 0.0, 3.0, 6.0));
        assert_eq!(canvas.pixel(0, 0).unwrap().0[3], 0);
        assert_eq!(canvas.pixel(5, 5).unwrap().0[3], 255);

        canvas.clear();
        assert!(canvas.is_blank());

        canvas.draw_image("x.png", &solid(1, 1, [9, 9, 9, 255]), None, Bounds::from_coords(0.0, 0.0, 6.0, 6.0));
        canvas.resize(3, 2);
        assert!(canvas.is_blank());
        assert_eq!(canvas.size(), Point::new(3.0, 2.0));
    }

    #[test]
    fn test_position_resets_transform() {
        let mut canvas = Canvas::new(ElementId(1), 4, 4);
        canvas.set_transform(Transform::new(Point::new(5.0, 5.0), 2.0, Point::default()));
        canvas.set_position(Point::new(-2.0, -3.0));
        assert_eq!(canvas.position(), Point::new(-2.0, -3.0));
        assert_eq!(canvas.transform(), Transform::translation(Point::new(-2.0, -3.0)));
    }

    #[test]
    fn test_classes_are_unique() {
        let mut canvas = Canvas::new(ElementId(1), 1, 1);
        canvas.add_class("leaflet-layer");
        canvas.add_class("leaflet-layer");
        assert_eq!(canvas.classes().len(), 1);
        assert!(canvas.has_class("leaflet-layer"));
    }
}
