use crate::{
    core::{
        constants::{TOOLTIP_CLASS, TOOLTIP_Z_INDEX},
        geo::Point,
        viewport::Transform,
    },
    layers::base::ElementId,
};

/// Hover tooltip shown next to the marker under the pointer.
///
/// The element is created once and then shown or hidden; it is never
/// destroyed while the layer is attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    element: ElementId,
    pane: String,
    visible: bool,
    position: Point,
    text: String,
    transform: Transform,
}

impl Tooltip {
    pub fn new(element: ElementId, pane: impl Into<String>) -> Self {
        Self {
            element,
            pane: pane.into(),
            visible: false,
            position: Point::default(),
            text: String::new(),
            transform: Transform::identity(),
        }
    }

    /// Show `text` at `position` (container pixels), following the canvas
    /// transform so it stays aligned during zoom animations
    pub fn show(&mut self, text: &str, position: Point, transform: Transform) {
        self.visible = true;
        self.position = position;
        self.transform = transform;
        self.text.clear();
        self.text.push_str(text);
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn transform(&self) -> Transform {
        self.transform
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn pane(&self) -> &str {
        &self.pane
    }

    pub fn set_pane(&mut self, pane: impl Into<String>) {
        self.pane = pane.into();
    }

    pub fn class(&self) -> &'static str {
        TOOLTIP_CLASS
    }

    pub fn z_index(&self) -> i32 {
        TOOLTIP_Z_INDEX
    }
}
