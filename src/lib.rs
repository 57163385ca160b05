pub mod clip;
pub mod error;
pub mod expr;
pub mod sample;
pub mod types;
pub mod ui;
pub mod vector;
use crate::clip::{Rect, clip};
use crate::error::PlotError;
use crate::expr::Expression;
use crate::sample::{sample_curve, sample_field, sample_standing, sample_surface, sample_volume};
use crate::types::*;
use crate::ui::Painter;
use crate::vector::{Convention, VectorField, VectorFieldParser};
use log::trace;
#[cfg(feature = "rayon")]
use rayon::slice::ParallelSliceMut;
///what the current expression is drawn as
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlotKind {
    ///one variable function on 2d axes
    Curve,
    ///one variable function upright in the 3d box with a floor shadow
    StandingCurve,
    ///z = f(x, y) height field
    Surface,
    ///f(x, y, z) as colored points
    Volume,
    ///arrows on 2d axes
    Field2D,
    ///arrows in the 3d box
    Field3D,
}
impl PlotKind {
    pub fn is_3d(self) -> bool {
        !matches!(self, PlotKind::Curve | PlotKind::Field2D)
    }
}
///sorts primitives back to front, farthest first, equal depths keep their order
pub fn depth_sort(buffer: &mut [(f64, Draw, Color)]) {
    #[cfg(feature = "rayon")]
    buffer.par_sort_by(|a, b| b.0.total_cmp(&a.0));
    #[cfg(not(feature = "rayon"))]
    buffer.sort_by(|a, b| b.0.total_cmp(&a.0));
}
///model space to screen space for one 3d frame
#[derive(Clone, Copy, Debug)]
pub struct Camera<'a> {
    view: &'a View,
    radius: f64,
    focal: f64,
    screen: Vec2,
}
impl<'a> Camera<'a> {
    pub fn new(view: &'a View, settings: &Settings, screen: Vec2) -> Self {
        let radius = settings.box_scale * screen.x.min(screen.y) * 0.5;
        Self {
            view,
            radius,
            focal: settings.focal_length * radius,
            screen,
        }
    }
    ///projects a point of the [-1, 1] box, returns the screen position and the depth proxy
    pub fn project_box(&self, p: Vec3) -> (Vec2, f64) {
        let r = self.view.rotate(p) * self.radius;
        (r.project(self.focal, self.screen), r.y)
    }
    pub fn project(&self, p: Vec3) -> (Vec2, f64) {
        self.project_box(self.view.to_box(p))
    }
}
///the plot of a single expression
#[derive(Clone)]
pub struct Graph {
    ///view parameters, mutated by the owner between paints
    pub view: View,
    pub settings: Settings,
    expression: Expression,
    field: Option<VectorField>,
    parser: VectorFieldParser,
    #[cfg(feature = "tiny-skia")]
    canvas: Option<tiny_skia::Pixmap>,
}
impl Graph {
    ///creates a graph for expression, rejecting it if it does not parse cleanly
    pub fn new(expression: &str, view: View) -> Result<Self, PlotError> {
        let mut graph = Graph {
            view,
            settings: Settings::default(),
            expression: Expression::default(),
            field: None,
            parser: VectorFieldParser::default(),
            #[cfg(feature = "tiny-skia")]
            canvas: None,
        };
        graph.set_expression(expression)?;
        Ok(graph)
    }
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }
    ///switches the unit vector convention and reparses the current expression
    pub fn set_convention(&mut self, convention: Convention) -> Result<(), PlotError> {
        let old = std::mem::replace(&mut self.parser, VectorFieldParser::new(convention));
        let expression = self.expression.as_str().to_string();
        self.set_expression(&expression).inspect_err(|_| self.parser = old)
    }
    ///replaces the expression, on error the previous one is kept
    pub fn set_expression(&mut self, expression: &str) -> Result<(), PlotError> {
        let field = if self.parser.is_vector_field(expression) {
            self.parser.parse(expression)
        } else {
            None
        };
        let expression = Expression::new(expression);
        match &field {
            Some(field) => {
                for c in field.components() {
                    c.validate()?
                }
            }
            None => expression.validate()?,
        }
        self.expression = expression;
        self.field = field;
        Ok(())
    }
    pub fn expression(&self) -> &Expression {
        &self.expression
    }
    pub fn field(&self) -> Option<&VectorField> {
        self.field.as_ref()
    }
    pub fn kind(&self) -> PlotKind {
        if let Some(field) = &self.field {
            if field.is_3d() || self.view.is_3d {
                PlotKind::Field3D
            } else {
                PlotKind::Field2D
            }
        } else if self.expression.uses_z() {
            PlotKind::Volume
        } else if self.expression.uses_y() {
            PlotKind::Surface
        } else if self.view.is_3d {
            PlotKind::StandingCurve
        } else {
            PlotKind::Curve
        }
    }
    ///samples and draws one frame into a display list
    pub fn paint(&self, width: u32, height: u32) -> Painter {
        let screen = Vec2::new(width as f64, height as f64);
        let rect = Rect::from_size(screen);
        let mut painter = Painter::new(
            self.settings.background_color,
            self.settings.anti_alias,
            screen,
        );
        let kind = self.kind();
        if kind.is_3d() {
            let camera = Camera::new(&self.view, &self.settings, screen);
            self.write_axis_3d(&mut painter, &camera, &rect);
            for (_, draw, color) in self.plot_3d(kind, &camera, &rect) {
                match draw {
                    Draw::Line(a, b, width) => painter.line_segment([a, b], width, &color),
                    Draw::Quad(corners) => painter.quad_filled(corners, &color),
                    Draw::Point(p, size) => painter.rect_filled(p, &color, size),
                }
            }
        } else {
            self.write_axis(&mut painter, &rect);
            match kind {
                PlotKind::Field2D => self.plot_field(&mut painter, &rect),
                _ => self.plot_curve(&mut painter, &rect),
            }
        }
        trace!(
            "painted {kind:?} with {} commands",
            painter.commands().len()
        );
        painter
    }
    ///the depth sorted primitives of a 3d frame, empty for 2d kinds
    pub fn primitives(&self, width: u32, height: u32) -> Vec<(f64, Draw, Color)> {
        let screen = Vec2::new(width as f64, height as f64);
        let kind = self.kind();
        if !kind.is_3d() {
            return Vec::new();
        }
        let camera = Camera::new(&self.view, &self.settings, screen);
        self.plot_3d(kind, &camera, &Rect::from_size(screen))
    }
    #[cfg(feature = "tiny-skia")]
    ///repaints into a 0RGB framebuffer of width * height pixels
    pub fn update(&mut self, width: u32, height: u32, buffer: &mut [u32]) -> Result<(), PlotError> {
        let expected = width as usize * height as usize;
        if buffer.len() != expected {
            return Err(PlotError::Framebuffer {
                got: buffer.len(),
                expected,
            });
        }
        let mut canvas = match std::mem::take(&mut self.canvas) {
            Some(canvas) if (canvas.width(), canvas.height()) == (width, height) => canvas,
            _ => tiny_skia::Pixmap::new(width, height)
                .ok_or(PlotError::EmptyCanvas(width, height))?,
        };
        self.paint(width, height).rasterize(&mut canvas);
        Painter::save(&canvas, buffer);
        self.canvas = Some(canvas);
        Ok(())
    }
    #[cfg(feature = "tiny-skia-png")]
    ///get png data
    pub fn get_png(&self, width: u32, height: u32) -> Result<Vec<u8>, PlotError> {
        let mut canvas =
            tiny_skia::Pixmap::new(width, height).ok_or(PlotError::EmptyCanvas(width, height))?;
        self.paint(width, height).rasterize(&mut canvas);
        canvas
            .encode_png()
            .map_err(|e| PlotError::Png(e.to_string()))
    }
    fn to_screen(&self, p: Vec2, screen: Vec2) -> Vec2 {
        Vec2::new(
            self.view.visible_x().normalize(p.x) * screen.x,
            (1.0 - self.view.visible_y().normalize(p.y)) * screen.y,
        )
    }
    fn write_axis(&self, painter: &mut Painter, rect: &Rect) {
        let screen = rect.max;
        let (vx, vy) = (self.view.visible_x(), self.view.visible_y());
        let s = &self.settings;
        let xs = vx.ticks(s.ticks);
        let ys = vy.ticks(s.ticks);
        for &x in &xs {
            let a = self.to_screen(Vec2::new(x, vy.min), screen);
            let b = self.to_screen(Vec2::new(x, vy.max), screen);
            line(painter, rect, a, b, 1.0, &s.grid_color);
        }
        for &y in &ys {
            let a = self.to_screen(Vec2::new(vx.min, y), screen);
            let b = self.to_screen(Vec2::new(vx.max, y), screen);
            line(painter, rect, a, b, 1.0, &s.grid_color);
        }
        let origin = self.to_screen(Vec2::new(vx.clamp(0.0), vy.clamp(0.0)), screen);
        line(
            painter,
            rect,
            Vec2::new(0.0, origin.y),
            Vec2::new(screen.x, origin.y),
            s.axis_width,
            &s.axis_color,
        );
        line(
            painter,
            rect,
            Vec2::new(origin.x, 0.0),
            Vec2::new(origin.x, screen.y),
            s.axis_width,
            &s.axis_color,
        );
        let t = s.tick_size as f64;
        for &x in &xs {
            let px = self.to_screen(Vec2::new(x, 0.0), screen).x;
            let (a, b) = (Vec2::new(px, origin.y - t), Vec2::new(px, origin.y + t));
            line(painter, rect, a, b, s.axis_width, &s.axis_color);
        }
        for &y in &ys {
            let py = self.to_screen(Vec2::new(0.0, y), screen).y;
            let (a, b) = (Vec2::new(origin.x - t, py), Vec2::new(origin.x + t, py));
            line(painter, rect, a, b, s.axis_width, &s.axis_color);
        }
    }
    fn plot_curve(&self, painter: &mut Painter, rect: &Rect) {
        let segments = sample_curve(
            &self.expression,
            self.view.visible_x(),
            self.view.visible_y(),
            self.settings.curve_samples,
        );
        for segment in segments {
            for w in segment.windows(2) {
                let a = self.to_screen(w[0], rect.max);
                let b = self.to_screen(w[1], rect.max);
                line(
                    painter,
                    rect,
                    a,
                    b,
                    self.settings.line_width,
                    &self.settings.curve_color,
                );
            }
        }
    }
    fn plot_field(&self, painter: &mut Painter, rect: &Rect) {
        let Some(field) = &self.field else {
            return;
        };
        let s = &self.settings;
        let (vx, vy) = (self.view.visible_x(), self.view.visible_y());
        let arrows = sample_field(field, vx, vy, self.view.visible_z(), s.field_samples, false);
        let max = max_value(arrows.iter().map(|a| a.value));
        let len = 0.8 * rect.max.x.min(rect.max.y) / s.field_samples.max(1) as f64;
        for arrow in arrows {
            let from = self.to_screen(Vec2::new(arrow.origin.x, arrow.origin.y), rect.max);
            let color = gradient(arrow.value / max);
            let d = Vec2::new(
                arrow.direction.x / vx.span() * rect.max.x,
                -arrow.direction.y / vy.span() * rect.max.y,
            );
            let n = d.norm();
            if n == 0.0 || !n.is_finite() {
                if rect.contains(from) {
                    painter.rect_filled(from.to_pos(), &color, s.point_size)
                }
                continue;
            }
            let to = from + d * (len / n);
            arrow_line(painter, rect, from, to, s.line_width, &color);
        }
    }
    fn write_axis_3d(&self, painter: &mut Painter, camera: &Camera, rect: &Rect) {
        let s = &self.settings;
        let corner = |i: usize| {
            Vec3::new(
                if i & 1 == 0 { -1.0 } else { 1.0 },
                if i & 2 == 0 { -1.0 } else { 1.0 },
                if i & 4 == 0 { -1.0 } else { 1.0 },
            )
        };
        let vertices: Vec<Vec2> = (0..8).map(|i| camera.project_box(corner(i)).0).collect();
        let edges = [
            (0, 1),
            (0, 2),
            (0, 4),
            (1, 3),
            (1, 5),
            (2, 3),
            (2, 6),
            (3, 7),
            (4, 5),
            (4, 6),
            (5, 7),
            (6, 7),
        ];
        for (k, (i, j)) in edges.into_iter().enumerate() {
            let (width, color) = if k < 3 {
                (s.axis_width, &s.axis_color)
            } else {
                (1.0, &s.grid_color)
            };
            line(painter, rect, vertices[i], vertices[j], width, color);
        }
        let (vx, vy, vz) = (
            self.view.visible_x(),
            self.view.visible_y(),
            self.view.visible_z(),
        );
        let xs = vx.ticks(s.ticks);
        let ys = vy.ticks(s.ticks);
        let zs = vz.ticks(s.ticks);
        let mut model_line = |a: Vec3, b: Vec3, width: f32, color: &Color| {
            line(painter, rect, camera.project(a).0, camera.project(b).0, width, color)
        };
        for &x in &xs {
            model_line(
                Vec3::new(x, vy.min, vz.min),
                Vec3::new(x, vy.max, vz.min),
                1.0,
                &s.grid_color,
            );
        }
        for &y in &ys {
            model_line(
                Vec3::new(vx.min, y, vz.min),
                Vec3::new(vx.max, y, vz.min),
                1.0,
                &s.grid_color,
            );
        }
        let (dx, dy) = (vx.span() * 0.03, vy.span() * 0.03);
        for &x in &xs {
            model_line(
                Vec3::new(x, vy.min, vz.min),
                Vec3::new(x, vy.min - dy, vz.min),
                s.axis_width,
                &s.axis_color,
            );
        }
        for &y in &ys {
            model_line(
                Vec3::new(vx.min, y, vz.min),
                Vec3::new(vx.min - dx, y, vz.min),
                s.axis_width,
                &s.axis_color,
            );
        }
        for &z in &zs {
            model_line(
                Vec3::new(vx.min, vy.min, z),
                Vec3::new(vx.min - dx, vy.min, z),
                s.axis_width,
                &s.axis_color,
            );
        }
    }
    fn plot_3d(&self, kind: PlotKind, camera: &Camera, rect: &Rect) -> Vec<(f64, Draw, Color)> {
        let s = &self.settings;
        let (vx, vy, vz) = (
            self.view.visible_x(),
            self.view.visible_y(),
            self.view.visible_z(),
        );
        let mut buffer = Vec::new();
        match kind {
            PlotKind::Surface => {
                let grid = sample_surface(&self.expression, vx, vy, vz, s.grid);
                buffer.reserve(grid.n * grid.n);
                for cell in grid.cells() {
                    let mut corners = [Pos::default(); 4];
                    let mut depth = 0.0;
                    for (c, p) in corners.iter_mut().zip(cell.corners) {
                        let (pos, d) = camera.project(p);
                        *c = pos.to_pos();
                        depth += d * 0.25;
                    }
                    if !corners.iter().all(Pos::is_finite) {
                        continue;
                    }
                    let quad = Quad {
                        corners,
                        depth,
                        value: vz.normalize(cell.value),
                    };
                    buffer.push((quad.depth, Draw::Quad(quad.corners), quad.color()));
                }
            }
            PlotKind::StandingCurve => {
                let standing =
                    sample_standing(&self.expression, vx, vz, s.standing_samples);
                for (segments, color) in [
                    (&standing.shadow, s.shadow_color),
                    (&standing.curve, s.curve_color),
                ] {
                    for segment in segments {
                        for w in segment.windows(2) {
                            let (a, da) = camera.project(w[0]);
                            let (b, db) = camera.project(w[1]);
                            if let Some((a, b)) = clip(a, b, rect) {
                                let draw = Draw::Line(a.to_pos(), b.to_pos(), s.line_width);
                                buffer.push(((da + db) * 0.5, draw, color));
                            }
                        }
                    }
                }
            }
            PlotKind::Field2D | PlotKind::Field3D => {
                let Some(field) = &self.field else {
                    return buffer;
                };
                let is_3d = field.is_3d();
                let per_axis = if is_3d {
                    s.field_samples_3d
                } else {
                    s.field_samples
                };
                let arrows = sample_field(field, vx, vy, vz, per_axis, is_3d);
                let max = max_value(arrows.iter().map(|a| a.value));
                let len = 1.6 / per_axis.max(1) as f64;
                for arrow in arrows {
                    let color = gradient(arrow.value / max);
                    let origin = self.view.to_box(arrow.origin);
                    let d = arrow.direction;
                    let d = Vec3::new(d.x / vx.span(), d.y / vy.span(), d.z / vz.span());
                    let n = d.norm();
                    let (from, df) = camera.project_box(origin);
                    if n == 0.0 || !n.is_finite() {
                        if rect.contains(from) {
                            buffer.push((df, Draw::Point(from.to_pos(), s.point_size), color));
                        }
                        continue;
                    }
                    let (to, dt) = camera.project_box(origin + d * (len / n));
                    let depth = (df + dt) * 0.5;
                    let mut head = Vec::with_capacity(3);
                    arrow_segments(from, to, |a, b| head.push((a, b)));
                    for (a, b) in head {
                        if let Some((a, b)) = clip(a, b, rect) {
                            let draw = Draw::Line(a.to_pos(), b.to_pos(), s.line_width);
                            buffer.push((depth, draw, color));
                        }
                    }
                }
            }
            PlotKind::Volume => {
                let voxels =
                    sample_volume(&self.expression, vx, vy, vz, s.field_samples_3d * 2);
                let (lo, hi) = voxels
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                        (lo.min(v.value), hi.max(v.value))
                    });
                let range = Range::new(lo, hi);
                for voxel in voxels {
                    let (p, depth) = camera.project(voxel.position);
                    if !rect.contains(p) {
                        continue;
                    }
                    let t = if range.span() > 0.0 {
                        range.normalize(voxel.value)
                    } else {
                        0.5
                    };
                    buffer.push((depth, Draw::Point(p.to_pos(), s.point_size), gradient(t)));
                }
            }
            PlotKind::Curve => {}
        }
        depth_sort(&mut buffer);
        trace!("{} depth sorted primitives", buffer.len());
        buffer
    }
}
fn max_value<I>(values: I) -> f64
where
    I: Iterator<Item = f64>,
{
    let max = values.fold(0.0, f64::max);
    if max > 0.0 { max } else { 1.0 }
}
///clips a b and paints what is left
fn line(painter: &mut Painter, rect: &Rect, a: Vec2, b: Vec2, width: f32, color: &Color) {
    if let Some((a, b)) = clip(a, b, rect) {
        painter.line_segment([a.to_pos(), b.to_pos()], width, color)
    }
}
///the shaft and both head strokes of an arrow from a to b
fn arrow_segments<F>(from: Vec2, to: Vec2, mut f: F)
where
    F: FnMut(Vec2, Vec2),
{
    f(from, to);
    let back = from - to;
    let n = back.norm();
    if n == 0.0 {
        return;
    }
    let back = back * ((0.3 * n).min(12.0) / n);
    let (s, c) = 0.45f64.sin_cos();
    for s in [s, -s] {
        let wing = Vec2::new(back.x * c - back.y * s, back.x * s + back.y * c);
        f(to, to + wing);
    }
}
fn arrow_line(painter: &mut Painter, rect: &Rect, from: Vec2, to: Vec2, width: f32, color: &Color) {
    arrow_segments(from, to, |a, b| line(painter, rect, a, b, width, color))
}
