//! Pointer-driven 3D tilt of the enlarged card

use eframe::egui::{pos2, Pos2, Rect};
use std::fmt;

/// Degrees of yaw at the left/right edge are ±half of this
pub const YAW_FACTOR: f32 = 18.0;
/// Degrees of pitch at the top/bottom edge are ±half of this
pub const PITCH_FACTOR: f32 = 12.0;
/// Constant lift towards the viewer, in points
pub const FORWARD_TRANSLATION: f32 = 40.0;
/// Distance from the viewer to the image plane, in points
pub const PERSPECTIVE: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TiltTransform {
    pub rotate_y_deg: f32,
    pub rotate_x_deg: f32,
    pub translate_z: f32,
}

impl TiltTransform {
    /// No rotation, forward translation only
    pub const REST: Self = Self {
        rotate_y_deg: 0.0,
        rotate_x_deg: 0.0,
        translate_z: FORWARD_TRANSLATION,
    };

    /// Map a pointer position over `area` to a rotation. Horizontal offset from
    /// the centre drives yaw, vertical offset drives (inverted) pitch.
    pub fn from_pointer(area: Rect, pointer: Pos2) -> Self {
        if area.width() <= 0.0 || area.height() <= 0.0 {
            return Self::REST;
        }
        let x = (pointer.x - area.left()) / area.width() - 0.5;
        let y = (pointer.y - area.top()) / area.height() - 0.5;
        Self {
            // + 0.0 normalises -0.0
            rotate_y_deg: x * YAW_FACTOR + 0.0,
            rotate_x_deg: -y * PITCH_FACTOR + 0.0,
            translate_z: FORWARD_TRANSLATION,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.rotate_y_deg == 0.0 && self.rotate_x_deg == 0.0
    }

    /// Screen positions of the corners of `rect` after the transform, in the
    /// order top-left, top-right, bottom-right, bottom-left.
    ///
    /// Rotations are about the centre of `rect` (y pointing down, z towards
    /// the viewer): translate, then pitch, then yaw, then perspective divide.
    pub fn project(&self, rect: Rect) -> [Pos2; 4] {
        let center = rect.center();
        let hx = rect.width() / 2.0;
        let hy = rect.height() / 2.0;
        let (sin_y, cos_y) = self.rotate_y_deg.to_radians().sin_cos();
        let (sin_x, cos_x) = self.rotate_x_deg.to_radians().sin_cos();
        let z = self.translate_z;

        [(-hx, -hy), (hx, -hy), (hx, hy), (-hx, hy)].map(|(x, y)| {
            let y1 = y * cos_x - z * sin_x;
            let z1 = y * sin_x + z * cos_x;
            let x2 = x * cos_y + z1 * sin_y;
            let z2 = -x * sin_y + z1 * cos_y;
            let scale = PERSPECTIVE / (PERSPECTIVE - z2);
            pos2(center.x + x2 * scale, center.y + y1 * scale)
        })
    }
}

impl Default for TiltTransform {
    fn default() -> Self {
        Self::REST
    }
}

impl fmt::Display for TiltTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rotateY({}deg) rotateX({}deg) translateZ({}px)",
            self.rotate_y_deg, self.rotate_x_deg, self.translate_z
        )
    }
}

/// Tilt state of the viewer, bound to the selected card
#[derive(Debug, Default)]
pub struct TiltEffect {
    bound: Option<String>,
    transform: TiltTransform,
    hovering: bool,
    /// Viewer bounds from the last frame
    area: Option<Rect>,
}

impl TiltEffect {
    /// Rebind to the selected card. Any change of selection resets the tilt;
    /// `None` tears the effect down.
    pub fn bind(&mut self, card_id: Option<&str>) {
        if self.bound.as_deref() == card_id {
            return;
        }
        match card_id {
            Some(id) => {
                log::debug!("Tilt bound to {}", id);
                self.bound = Some(id.to_string());
                self.transform = TiltTransform::REST;
                self.hovering = false;
                self.area = None;
            }
            None => self.teardown(),
        }
    }

    pub fn teardown(&mut self) {
        *self = Self::default();
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    pub fn transform(&self) -> TiltTransform {
        self.transform
    }

    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = Some(area);
    }

    /// Feed the current pointer position. Movement inside `area` tilts;
    /// leaving it returns to rest.
    pub fn update(&mut self, area: Rect, pointer: Option<Pos2>) -> TiltTransform {
        if !self.is_bound() {
            return TiltTransform::REST;
        }

        match pointer.filter(|p| area.contains(*p)) {
            Some(p) => {
                self.hovering = true;
                self.transform = TiltTransform::from_pointer(area, p);
            }
            None if self.hovering => {
                self.hovering = false;
                self.transform = TiltTransform::REST;
                log::trace!("Pointer left viewer, tilt reset");
            }
            None => {}
        }

        self.transform
    }
}
