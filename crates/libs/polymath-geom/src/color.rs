//! RGBA color with an HSV view.

use crate::{
    macros::impl_components,
    math::{clamp01, lerp},
};
use core::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub, SubAssign};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// An RGBA color with `f64` channels, normally in `[0, 1]`.
///
/// RGB is the ground truth; the HSV accessors convert on every read and
/// write. Channels are never clamped implicitly — out-of-range values
/// survive arithmetic until an explicit [`clamp`](Color::clamp).
///
/// `+`, `-` and `*` between two colors are componentwise over all four
/// channels; scalar `*` and `/` scale RGB only and leave alpha
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color(pub(crate) [f64; 4]);

impl_components!(Color, size: 4, shape: [4], cnames: { r: 0, g: 1, b: 2, a: 3 });

/// Converts an RGB triple to HSV, hue in `[0, 1)`.
pub fn rgb_to_hsv(rgb: [f64; 3]) -> [f64; 3] {
    let [r, g, b] = rgb;
    let maxc = r.max(g).max(b);
    let minc = r.min(g).min(b);
    if maxc == minc {
        return [0.0, 0.0, maxc];
    }
    let s = (maxc - minc) / maxc;
    let rc = (maxc - r) / (maxc - minc);
    let gc = (maxc - g) / (maxc - minc);
    let bc = (maxc - b) / (maxc - minc);
    let h = if r == maxc {
        bc - gc
    } else if g == maxc {
        2.0 + rc - bc
    } else {
        4.0 + gc - rc
    };
    [(h / 6.0).rem_euclid(1.0), s, maxc]
}

/// Converts an HSV triple (hue wraps modulo 1) to RGB.
pub fn hsv_to_rgb(hsv: [f64; 3]) -> [f64; 3] {
    let [h, s, v] = hsv;
    if s == 0.0 {
        return [v, v, v];
    }
    let i = (h * 6.0).floor();
    let f = h * 6.0 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match (i as i64).rem_euclid(6) {
        0 => [v, t, p],
        1 => [q, v, p],
        2 => [p, v, t],
        3 => [p, q, v],
        4 => [t, p, v],
        _ => [v, p, q],
    }
}

impl Color {
    /// Opaque red.
    pub const RED: Self = Self::new(1.0, 0.0, 0.0);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0.0, 1.0, 0.0);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    /// Fully opaque black.
    pub const OPAQUE: Self = Self::new(0.0, 0.0, 0.0);
    /// Fully transparent black.
    pub const CLEAR: Self = Self::with_alpha(0.0, 0.0, 0.0, 0.0);

    /// Creates an opaque color.
    pub const fn new(r: f64, g: f64, b: f64) -> Self { Color([r, g, b, 1.0]) }

    /// Creates a color with an explicit alpha.
    pub const fn with_alpha(r: f64, g: f64, b: f64, a: f64) -> Self { Color([r, g, b, a]) }

    /// Creates an opaque color from an HSV triple.
    pub fn from_hsv(hsv: [f64; 3]) -> Self {
        let [r, g, b] = hsv_to_rgb(hsv);
        Color::new(r, g, b)
    }

    /// Creates a color from HSV plus alpha.
    pub fn from_hsva(hsva: [f64; 4]) -> Self {
        let [r, g, b] = hsv_to_rgb([hsva[0], hsva[1], hsva[2]]);
        Color::with_alpha(r, g, b, hsva[3])
    }

    /// The RGB channels.
    pub const fn rgb(&self) -> [f64; 3] { [self.0[0], self.0[1], self.0[2]] }

    /// The derived HSV triple.
    pub fn hsv(&self) -> [f64; 3] { rgb_to_hsv(self.rgb()) }

    /// The derived HSV triple plus alpha.
    pub fn hsva(&self) -> [f64; 4] {
        let [h, s, v] = self.hsv();
        [h, s, v, self.0[3]]
    }

    /// Hue in `[0, 1)`.
    pub fn h(&self) -> f64 { self.hsv()[0] }

    /// Saturation.
    pub fn s(&self) -> f64 { self.hsv()[1] }

    /// Value (brightness).
    pub fn v(&self) -> f64 { self.hsv()[2] }

    /// Replaces the hue, round-tripping through HSV.
    pub fn set_h(&mut self, h: f64) {
        let [_, s, v] = self.hsv();
        *self = Color::from_hsva([h, s, v, self.0[3]]);
    }

    /// Replaces the saturation, round-tripping through HSV.
    pub fn set_s(&mut self, s: f64) {
        let [h, _, v] = self.hsv();
        *self = Color::from_hsva([h, s, v, self.0[3]]);
    }

    /// Replaces the value, round-tripping through HSV.
    pub fn set_v(&mut self, v: f64) {
        let [h, s, _] = self.hsv();
        *self = Color::from_hsva([h, s, v, self.0[3]]);
    }

    /// Applies gamma correction `g` to the RGB channels; alpha is
    /// untouched.
    pub fn gamma(&self, g: f64) -> Color {
        Color([
            self.0[0].powf(g),
            self.0[1].powf(g),
            self.0[2].powf(g),
            self.0[3],
        ])
    }

    /// Composites `self` over `other` using `self`'s alpha; the result
    /// keeps `other`'s alpha.
    pub fn over(&self, other: &Color) -> Color {
        let a = self.0[3];
        Color([
            lerp(other.0[0], self.0[0], a),
            lerp(other.0[1], self.0[1], a),
            lerp(other.0[2], self.0[2], a),
            other.0[3],
        ])
    }

    /// Premultiplies RGB by alpha and resets alpha to 1.
    pub fn premult(&self) -> Color {
        let a = self.0[3];
        Color([self.0[0] * a, self.0[1] * a, self.0[2] * a, 1.0])
    }

    /// Linear componentwise blend toward `other` by `weight`, alpha
    /// included.
    pub fn blend(&self, other: &Color, weight: f64) -> Color {
        let mut out = [0.0; 4];
        for (i, o) in out.iter_mut().enumerate() {
            *o = lerp(self.0[i], other.0[i], weight);
        }
        Color(out)
    }

    /// Blends toward `other` in HSV space by `weight`, taking the
    /// shortest path around the hue circle. Hues exactly half a turn
    /// apart have no shortest path; both saturations are zeroed so the
    /// blend passes through gray.
    pub fn hsvblend(&self, other: &Color, weight: f64) -> Color {
        let mut c1 = self.hsva();
        let mut c2 = other.hsva();
        if (c2[0] - c1[0]).abs() >= 0.5 {
            if (c2[0] - c1[0]).abs() == 0.5 {
                c1[1] = 0.0;
                c2[1] = 0.0;
            }
            if c1[0] > 0.5 {
                c1[0] -= 1.0;
            }
            if c2[0] > 0.5 {
                c2[0] -= 1.0;
            }
        }
        let mut c = [0.0; 4];
        for (i, o) in c.iter_mut().enumerate() {
            *o = lerp(c1[i], c2[i], weight);
        }
        if c[0] < 0.0 {
            c[0] += 1.0;
        }
        Color::from_hsva(c)
    }

    /// Clamps every channel into `[0, 1]`.
    pub fn clamp(&self) -> Color {
        Color([
            clamp01(self.0[0]),
            clamp01(self.0[1]),
            clamp01(self.0[2]),
            clamp01(self.0[3]),
        ])
    }
}

impl Default for Color {
    fn default() -> Self { Self::BLACK }
}

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}, {}]",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

macro_rules! impl_color_cw_ops {
    ($($trait:ident, $op:ident, $sym:tt;)*) => {
        $(
            impl $trait for Color {
                type Output = Color;

                fn $op(self, rhs: Color) -> Color {
                    Color([
                        self.0[0] $sym rhs.0[0],
                        self.0[1] $sym rhs.0[1],
                        self.0[2] $sym rhs.0[2],
                        self.0[3] $sym rhs.0[3],
                    ])
                }
            }
        )*
    };
}

impl_color_cw_ops! {
    Add, add, +;
    Sub, sub, -;
    Mul, mul, *;
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) { *self = *self + rhs; }
}

impl SubAssign for Color {
    fn sub_assign(&mut self, rhs: Color) { *self = *self - rhs; }
}

impl MulAssign for Color {
    fn mul_assign(&mut self, rhs: Color) { *self = *self * rhs; }
}

/// Scales RGB only; alpha is untouched.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, rhs: f64) -> Color {
        Color([self.0[0] * rhs, self.0[1] * rhs, self.0[2] * rhs, self.0[3]])
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color { rhs * self }
}

/// Scales RGB only; alpha is untouched.
impl Div<f64> for Color {
    type Output = Color;

    fn div(self, rhs: f64) -> Color {
        Color([self.0[0] / rhs, self.0[1] / rhs, self.0[2] / rhs, self.0[3]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_rgb_eq(a: [f64; 3], b: [f64; 3], eps: f64) {
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(x, y, epsilon = eps);
        }
    }

    #[test]
    fn hsv_round_trip() {
        for rgb in [
            [1.0, 0.0, 0.0],
            [0.2, 0.7, 0.3],
            [0.5, 0.5, 0.5],
            [0.0, 0.25, 1.0],
            [0.9, 0.8, 0.1],
        ] {
            assert_rgb_eq(hsv_to_rgb(rgb_to_hsv(rgb)), rgb, 1.0e-12);
        }
        // Primaries land on the expected hues.
        assert_abs_diff_eq!(rgb_to_hsv([1.0, 0.0, 0.0])[0], 0.0);
        assert_abs_diff_eq!(rgb_to_hsv([0.0, 1.0, 0.0])[0], 1.0 / 3.0);
        assert_abs_diff_eq!(rgb_to_hsv([0.0, 0.0, 1.0])[0], 2.0 / 3.0);
    }

    #[test]
    fn hsv_accessors() {
        let mut c = Color::RED;
        assert_eq!(c.hsv(), [0.0, 1.0, 1.0]);
        c.set_h(1.0 / 3.0);
        assert!(c.is_equivalent(&Color::GREEN, 1.0e-12));
        c.set_v(0.5);
        assert_abs_diff_eq!(c.v(), 0.5);
        assert_eq!(c.a(), 1.0);
    }

    #[test]
    fn over_keeps_background_alpha() {
        let fg = Color::with_alpha(1.0, 0.0, 0.0, 0.25);
        let bg = Color::with_alpha(0.0, 0.0, 1.0, 0.8);
        let c = fg.over(&bg);
        assert_abs_diff_eq!(c.r(), 0.25);
        assert_abs_diff_eq!(c.b(), 0.75);
        assert_eq!(c.a(), 0.8);
    }

    #[test]
    fn premult() {
        let c = Color::with_alpha(0.5, 1.0, 0.25, 0.5).premult();
        assert_eq!(c, Color::with_alpha(0.25, 0.5, 0.125, 1.0));
    }

    #[test]
    fn gamma_leaves_alpha() {
        let c = Color::with_alpha(0.25, 1.0, 0.0, 0.5).gamma(0.5);
        assert_abs_diff_eq!(c.r(), 0.5);
        assert_eq!(c.a(), 0.5);
    }

    #[test]
    fn scalar_ops_leave_alpha() {
        let c = Color::with_alpha(0.2, 0.4, 0.6, 0.5);
        assert_eq!(c * 2.0, Color::with_alpha(0.4, 0.8, 1.2, 0.5));
        assert_eq!((c * 2.0) / 2.0, c);
        assert_eq!((c * 2.0).clamp().b(), 1.0);
    }

    #[test]
    fn hue_blend_wraps_around() {
        // Red (h = 0) blended with a violet-ish hue (h = 0.9) should go
        // backwards through h ≈ 0.95, not forward through green.
        let red = Color::RED;
        let violet = Color::from_hsv([0.9, 1.0, 1.0]);
        let mid = red.hsvblend(&violet, 0.5);
        assert_abs_diff_eq!(mid.h(), 0.95, epsilon = 1.0e-9);
        // A blend entirely on one side does not wrap.
        let orange = Color::from_hsv([0.1, 1.0, 1.0]);
        assert_abs_diff_eq!(red.hsvblend(&orange, 0.5).h(), 0.05, epsilon = 1.0e-9);
    }

    #[test]
    fn opposite_hues_desaturate() {
        let a = Color::from_hsv([0.25, 1.0, 1.0]);
        let b = Color::from_hsv([0.75, 1.0, 1.0]);
        let mid = a.hsvblend(&b, 0.5);
        assert_abs_diff_eq!(mid.s(), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn componentwise_arithmetic() {
        let a = Color::with_alpha(0.1, 0.2, 0.3, 0.4);
        let b = Color::with_alpha(0.4, 0.3, 0.2, 0.1);
        assert!((a + b).is_equivalent(&Color::with_alpha(0.5, 0.5, 0.5, 0.5), 1.0e-12));
        assert!((a - b).is_equivalent(&Color::with_alpha(-0.3, -0.1, 0.1, 0.3), 1.0e-12));
        let p = a * b;
        assert_abs_diff_eq!(p.r(), 0.04);
        assert_abs_diff_eq!(p.a(), 0.04);
    }
}
