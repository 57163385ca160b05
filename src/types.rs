#[cfg(feature = "serde")]
use base64::Engine;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Sub};
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
    pub const fn splat(c: u8) -> Self {
        Self { r: c, g: c, b: c }
    }
    fn lerp(self, other: Color, t: f64) -> Self {
        let f = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Self::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }
    #[cfg(feature = "tiny-skia")]
    pub(crate) fn to_col(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}
///stops of the surface color map, lowest value first
pub const GRADIENT: [Color; 5] = [
    Color::new(48, 18, 170),
    Color::new(30, 136, 229),
    Color::new(38, 198, 118),
    Color::new(250, 204, 21),
    Color::new(220, 38, 38),
];
///maps t in [0, 1] onto GRADIENT by interpolating the two bracketing stops,
///out of range values are clamped and NaN maps to the first stop
pub fn gradient(t: f64) -> Color {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let scaled = t * (GRADIENT.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(GRADIENT.len() - 2);
    GRADIENT[i].lerp(GRADIENT[i + 1], scaled - i as f64)
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Pos {
    pub x: f32,
    pub y: f32,
}
impl Pos {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}
impl Add for Pos {
    type Output = Pos;
    fn add(self, rhs: Self) -> Self::Output {
        Pos::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Pos {
    type Output = Pos;
    fn sub(self, rhs: Self) -> Self::Output {
        Pos::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Mul<f32> for Pos {
    type Output = Pos;
    fn mul(self, rhs: f32) -> Self::Output {
        Pos::new(self.x * rhs, self.y * rhs)
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}
impl Vec2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v }
    }
    pub fn norm(&self) -> f64 {
        self.y.hypot(self.x)
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
    pub fn to_pos(self) -> Pos {
        Pos {
            x: self.x as f32,
            y: self.y as f32,
        }
    }
}
impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}
impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}
impl Mul<f64> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}
impl Div<f64> for Vec2 {
    type Output = Vec2;
    fn div(self, rhs: f64) -> Self::Output {
        Vec2::new(self.x / rhs, self.y / rhs)
    }
}
impl From<(f64, f64)> for Vec2 {
    fn from(value: (f64, f64)) -> Self {
        Self::new(value.0, value.1)
    }
}
///a point in model space, rotations and projection return new values
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}
impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
    pub fn splat(v: f64) -> Self {
        Self { x: v, y: v, z: v }
    }
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
    ///right handed rotation about the x axis
    pub fn rotate_x(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x, self.y * c - self.z * s, self.y * s + self.z * c)
    }
    ///right handed rotation about the z axis
    pub fn rotate_z(self, angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new(self.x * c - self.y * s, self.x * s + self.y * c, self.z)
    }
    ///perspective divide along y, the depth axis after rotation,
    ///centered on a canvas of the given size with screen y pointing down
    ///
    ///focal_length + y == 0 is not guarded and yields non finite coordinates
    pub fn project(self, focal_length: f64, canvas: Vec2) -> Vec2 {
        let scale = focal_length / (focal_length + self.y);
        Vec2::new(
            canvas.x * 0.5 + self.x * scale,
            canvas.y * 0.5 - self.z * scale,
        )
    }
    pub fn to_tuple(self) -> (f32, f32, f32) {
        (self.x as f32, self.y as f32, self.z as f32)
    }
}
impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
        self.z += rhs.z;
    }
}
impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, rhs: Self) -> Self::Output {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}
impl MulAssign<f64> for Vec3 {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
        self.z *= rhs;
    }
}
impl Div<f64> for Vec3 {
    type Output = Vec3;
    fn div(self, rhs: f64) -> Self::Output {
        Vec3::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}
impl From<(f32, f32, f32)> for Vec3 {
    fn from(value: (f32, f32, f32)) -> Self {
        Self::new(value.0 as f64, value.1 as f64, value.2 as f64)
    }
}
///closed interval of model coordinates
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Copy, Debug, Clone, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}
impl Default for Range {
    fn default() -> Self {
        Self::new(-5.0, 5.0)
    }
}
impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
    pub fn mid(&self) -> f64 {
        (self.min + self.max) * 0.5
    }
    ///the value t of the way from min to max
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + self.span() * t
    }
    ///inverse of lerp
    pub fn normalize(&self, v: f64) -> f64 {
        (v - self.min) / self.span()
    }
    pub fn clamp(&self, v: f64) -> f64 {
        v.clamp(self.min.min(self.max), self.max.max(self.min))
    }
    pub fn shift(&self, d: f64) -> Self {
        Self::new(self.min + d, self.max + d)
    }
    ///scales the interval about its center
    pub fn scale(&self, factor: f64) -> Self {
        let (mid, half) = (self.mid(), self.span() * 0.5 * factor);
        Self::new(mid - half, mid + half)
    }
    ///evenly spaced round numbers inside the interval, roughly count of them
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let span = self.span();
        if !span.is_finite() || span <= 0.0 || count == 0 {
            return Vec::new();
        }
        let raw = span / count as f64;
        let mag = 10f64.powf(raw.log10().floor());
        let step = [1.0, 2.0, 5.0, 10.0]
            .into_iter()
            .map(|m| m * mag)
            .find(|s| *s >= raw)
            .unwrap_or(10.0 * mag);
        let first = (self.min / step).ceil() as i64;
        let last = (self.max / step).floor() as i64;
        (first..=last).map(|i| i as f64 * step).collect()
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Copy, PartialEq, Eq, Default)]
pub enum ZoomAxis {
    ///zoom every axis together
    #[default]
    Free,
    X,
    Y,
    Z,
}
///view parameters, owned by the caller and passed into every paint
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct View {
    ///rotation about the x axis, applied first
    pub elevation: f64,
    ///rotation about the z axis, applied after elevation
    pub azimuth: f64,
    ///visible x range before panning
    pub x: Range,
    ///visible y range before panning
    pub y: Range,
    ///visible z range before panning, in 2d this is unused
    pub z: Range,
    ///pan offset in model units
    pub offset: Vec3,
    ///which axes zoom acts on
    pub zoom_axis: ZoomAxis,
    ///weather one variable functions are drawn in the 3d box or as a 2d curve
    pub is_3d: bool,
}
impl Default for View {
    fn default() -> Self {
        Self {
            elevation: 0.5,
            azimuth: 0.6,
            x: Range::default(),
            y: Range::default(),
            z: Range::default(),
            offset: Vec3::default(),
            zoom_axis: ZoomAxis::Free,
            is_3d: false,
        }
    }
}
impl View {
    pub fn new_3d() -> Self {
        Self {
            is_3d: true,
            ..Self::default()
        }
    }
    pub fn visible_x(&self) -> Range {
        self.x.shift(self.offset.x)
    }
    pub fn visible_y(&self) -> Range {
        self.y.shift(self.offset.y)
    }
    pub fn visible_z(&self) -> Range {
        self.z.shift(self.offset.z)
    }
    ///the fixed rotation order, elevation then azimuth
    pub fn rotate(&self, p: Vec3) -> Vec3 {
        p.rotate_x(self.elevation).rotate_z(self.azimuth)
    }
    ///maps a model point into the [-1, 1] box of the visible ranges
    pub fn to_box(&self, p: Vec3) -> Vec3 {
        let f = |r: Range, v: f64| r.normalize(v) * 2.0 - 1.0;
        Vec3::new(
            f(self.visible_x(), p.x),
            f(self.visible_y(), p.y),
            f(self.visible_z(), p.z),
        )
    }
    ///factor > 1 zooms out, only the axes picked by zoom_axis change
    pub fn zoom(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        match self.zoom_axis {
            ZoomAxis::Free => {
                self.x = self.x.scale(factor);
                self.y = self.y.scale(factor);
                self.z = self.z.scale(factor);
            }
            ZoomAxis::X => self.x = self.x.scale(factor),
            ZoomAxis::Y => self.y = self.y.scale(factor),
            ZoomAxis::Z => self.z = self.z.scale(factor),
        }
    }
    pub fn pan(&mut self, delta: Vec3) {
        self.offset += delta
    }
    ///elevation is kept within a quarter turn either way
    pub fn turn(&mut self, elevation: f64, azimuth: f64) {
        self.elevation = (self.elevation + elevation).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.azimuth = (self.azimuth + azimuth).rem_euclid(std::f64::consts::TAU);
    }
}
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    ///samples along x for a 2d curve
    pub curve_samples: usize,
    ///samples along x for a one variable function in the 3d box
    pub standing_samples: usize,
    ///vertices per side of the surface grid
    pub grid: usize,
    ///arrows per side for a 2d vector field
    pub field_samples: usize,
    ///arrows per side for a 3d vector field or a three variable function
    pub field_samples_3d: usize,
    ///camera distance in box half widths
    pub focal_length: f64,
    ///box half width as a fraction of half the smaller canvas side
    pub box_scale: f64,
    ///roughly how many grid lines per axis
    pub ticks: usize,
    ///length of tick marks in pixels
    pub tick_size: f32,
    pub line_width: f32,
    pub axis_width: f32,
    pub point_size: f32,
    pub anti_alias: bool,
    pub background_color: Color,
    pub axis_color: Color,
    pub grid_color: Color,
    pub curve_color: Color,
    pub shadow_color: Color,
}
impl Default for Settings {
    fn default() -> Self {
        Self {
            curve_samples: 1000,
            standing_samples: 300,
            grid: 50,
            field_samples: 16,
            field_samples_3d: 6,
            focal_length: 4.0,
            box_scale: 0.55,
            ticks: 10,
            tick_size: 4.0,
            line_width: 2.0,
            axis_width: 1.5,
            point_size: 3.0,
            anti_alias: true,
            background_color: Color::splat(255),
            axis_color: Color::splat(0),
            grid_color: Color::splat(220),
            curve_color: Color::new(255, 85, 85),
            shadow_color: Color::splat(170),
        }
    }
}
impl Settings {
    pub fn set_dark_mode(&mut self) {
        self.axis_color = Color::splat(220);
        self.grid_color = Color::splat(35);
        self.background_color = Color::splat(0);
        self.shadow_color = Color::splat(90);
    }
    pub fn set_light_mode(&mut self) {
        self.axis_color = Color::splat(0);
        self.grid_color = Color::splat(220);
        self.background_color = Color::splat(255);
        self.shadow_color = Color::splat(170);
    }
}
///a drawing command in screen space
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Draw {
    Line(Pos, Pos, f32),
    Quad([Pos; 4]),
    Point(Pos, f32),
}
///one projected surface cell
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Quad {
    pub corners: [Pos; 4],
    ///mean rotated view axis coordinate of the corners, larger is farther
    pub depth: f64,
    ///mean sample value normalized into the visible z range
    pub value: f64,
}
impl Quad {
    pub fn color(&self) -> Color {
        gradient(self.value)
    }
}
///compact share form of a View
#[cfg(feature = "serde")]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewTiny {
    pub angle: (f32, f32),
    pub x: (f32, f32),
    pub y: (f32, f32),
    pub z: Option<(f32, f32)>,
    pub offset: (f32, f32, f32),
    pub zoom_axis: ZoomAxis,
    pub is_3d: bool,
}
#[cfg(feature = "serde")]
impl View {
    pub fn to_tiny(&self) -> ViewTiny {
        let r = |r: Range| (r.min as f32, r.max as f32);
        ViewTiny {
            angle: (self.elevation as f32, self.azimuth as f32),
            x: r(self.x),
            y: r(self.y),
            z: self.is_3d.then_some(r(self.z)),
            offset: self.offset.to_tuple(),
            zoom_axis: self.zoom_axis,
            is_3d: self.is_3d,
        }
    }
    pub fn apply_tiny(&mut self, tiny: ViewTiny) {
        let r = |(a, b): (f32, f32)| Range::new(a as f64, b as f64);
        self.elevation = tiny.angle.0 as f64;
        self.azimuth = tiny.angle.1 as f64;
        self.x = r(tiny.x);
        self.y = r(tiny.y);
        if let Some(z) = tiny.z {
            self.z = r(z)
        }
        self.offset = tiny.offset.into();
        self.zoom_axis = tiny.zoom_axis;
        self.is_3d = tiny.is_3d;
    }
}
#[cfg(feature = "serde")]
impl ViewTiny {
    ///length@payload, both url safe base64, payload is zstd compressed bitcode
    pub fn encode(&self) -> Result<String, crate::error::PlotError> {
        use crate::error::PlotError;
        let seri = bitcode::serialize(self).map_err(|_| PlotError::ViewDecode("serialize"))?;
        let comp =
            zstd::bulk::compress(&seri, 19).map_err(|_| PlotError::ViewDecode("compress"))?;
        let b64 = base64::prelude::BASE64_URL_SAFE_NO_PAD;
        Ok(format!(
            "{}@{}",
            b64.encode(seri.len().to_string()),
            b64.encode(comp)
        ))
    }
}
#[cfg(feature = "serde")]
impl TryFrom<&String> for ViewTiny {
    type Error = crate::error::PlotError;
    fn try_from(value: &String) -> Result<Self, Self::Error> {
        use crate::error::PlotError;
        let b64 = base64::prelude::BASE64_URL_SAFE_NO_PAD;
        let (a, b) = value
            .rsplit_once('@')
            .ok_or(PlotError::ViewDecode("missing separator"))?;
        let l = b64.decode(a).map_err(|_| PlotError::ViewDecode("length"))?;
        let l = String::from_utf8(l)
            .map_err(|_| PlotError::ViewDecode("length"))?
            .parse::<usize>()
            .map_err(|_| PlotError::ViewDecode("length"))?;
        let comp = b64.decode(b).map_err(|_| PlotError::ViewDecode("payload"))?;
        let seri =
            zstd::bulk::decompress(&comp, l).map_err(|_| PlotError::ViewDecode("decompress"))?;
        bitcode::deserialize(&seri).map_err(|_| PlotError::ViewDecode("deserialize"))
    }
}
