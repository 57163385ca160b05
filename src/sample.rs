//!turns expressions into model space geometry for one frame
use crate::expr::Expression;
use crate::types::{Range, Vec2, Vec3};
use crate::vector::VectorField;
use log::debug;
#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
///a single evaluation, anything non finite is indeterminate
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Sample {
    Value(f64),
    Indeterminate,
}
impl Sample {
    pub fn new(v: f64) -> Self {
        if v.is_finite() {
            Sample::Value(v)
        } else {
            Sample::Indeterminate
        }
    }
    pub fn value(self) -> Option<f64> {
        match self {
            Sample::Value(v) => Some(v),
            Sample::Indeterminate => None,
        }
    }
}
///x of the ith of count samples spread over range, both ends included
fn step(range: Range, i: usize, count: usize) -> f64 {
    range.lerp(i as f64 / (count - 1) as f64)
}
///walks x over count samples and splits the curve wherever a sample is indeterminate
///or jumps by more than half of the visible value span
fn segments<T, F, P>(x: Range, value: Range, count: usize, f: F, point: P) -> Vec<Vec<T>>
where
    F: Fn(f64) -> f64,
    P: Fn(f64, f64) -> T,
{
    if count < 2 {
        return Vec::new();
    }
    let limit = value.span().abs() * 0.5;
    let mut out = Vec::new();
    let mut current: Vec<T> = Vec::new();
    let mut last: Option<f64> = None;
    let mut dropped = 0;
    for i in 0..count {
        let xi = step(x, i, count);
        match Sample::new(f(xi)) {
            Sample::Value(v) => {
                if last.is_some_and(|l| (v - l).abs() > limit) {
                    out.push(std::mem::take(&mut current));
                }
                current.push(point(xi, v));
                last = Some(v);
            }
            Sample::Indeterminate => {
                dropped += 1;
                out.push(std::mem::take(&mut current));
                last = None;
            }
        }
    }
    out.push(current);
    out.retain(|s| s.len() > 1);
    debug!(
        "sampled {count} points into {} segments, {dropped} indeterminate",
        out.len()
    );
    out
}
///samples a one variable curve over x, each inner vec is a separately strokable path
pub fn sample_curve(expr: &Expression, x: Range, value: Range, count: usize) -> Vec<Vec<Vec2>> {
    segments(x, value, count, |x| expr.evaluate(x, 0.0, 0.0), Vec2::new)
}
///a one variable function drawn upright in the y = 0 plane of the 3d box
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Standing {
    pub curve: Vec<Vec<Vec3>>,
    ///the curve dropped onto the floor of the box
    pub shadow: Vec<Vec<Vec3>>,
}
pub fn sample_standing(expr: &Expression, x: Range, z: Range, count: usize) -> Standing {
    let curve = segments(
        x,
        z,
        count,
        |x| expr.evaluate(x, 0.0, 0.0),
        |x, v| Vec3::new(x, 0.0, v),
    );
    let shadow = curve
        .iter()
        .map(|s| s.iter().map(|p| Vec3::new(p.x, p.y, z.min)).collect())
        .collect();
    Standing { curve, shadow }
}
///n by n surface vertices, values already substituted and clamped
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub n: usize,
    pub x: Range,
    pub y: Range,
    ///row major, index j * n + i where i walks x and j walks y
    pub values: Vec<f64>,
}
///one grid cell in model space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    ///counter clockwise from the low x low y corner
    pub corners: [Vec3; 4],
    ///mean of the corner values
    pub value: f64,
}
impl Grid {
    pub fn vertex(&self, i: usize, j: usize) -> Vec3 {
        Vec3::new(
            step(self.x, i, self.n),
            step(self.y, j, self.n),
            self.values[j * self.n + i],
        )
    }
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let cells = self.n.saturating_sub(1);
        (0..cells).flat_map(move |j| {
            (0..cells).map(move |i| {
                let corners = [
                    self.vertex(i, j),
                    self.vertex(i + 1, j),
                    self.vertex(i + 1, j + 1),
                    self.vertex(i, j + 1),
                ];
                let value = corners.iter().map(|c| c.z).sum::<f64>() / 4.0;
                Cell { corners, value }
            })
        })
    }
}
///evaluates expr on an n by n vertex grid,
///indeterminate values become 0 and every value is clamped into z so the grid keeps its topology
pub fn sample_surface(expr: &Expression, x: Range, y: Range, z: Range, n: usize) -> Grid {
    let n = n.max(2);
    let vertex = |k: usize| {
        let (i, j) = (k % n, k / n);
        let v = Sample::new(expr.evaluate(step(x, i, n), step(y, j, n), 0.0))
            .value()
            .unwrap_or(0.0);
        z.clamp(v)
    };
    #[cfg(feature = "rayon")]
    let values: Vec<f64> = (0..n * n).into_par_iter().map(vertex).collect();
    #[cfg(not(feature = "rayon"))]
    let values: Vec<f64> = (0..n * n).map(vertex).collect();
    debug!("sampled {n}x{n} surface grid");
    Grid { n, x, y, values }
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub origin: Vec3,
    ///unit direction of the field at origin
    pub direction: Vec3,
    ///field magnitude at origin
    pub value: f64,
}
///samples a vector field on the centers of a regular lattice,
///per_axis² arrows in the z = 0 plane when not 3d, per_axis³ otherwise
pub fn sample_field(
    field: &VectorField,
    x: Range,
    y: Range,
    z: Range,
    per_axis: usize,
    is_3d: bool,
) -> Vec<Arrow> {
    let per_axis = per_axis.max(1);
    let center = |r: Range, i: usize| r.lerp((i as f64 + 0.5) / per_axis as f64);
    let layers: Vec<f64> = if is_3d {
        (0..per_axis).map(|k| center(z, k)).collect()
    } else {
        vec![z.clamp(0.0)]
    };
    let mut arrows = Vec::with_capacity(per_axis * per_axis * layers.len());
    for zk in layers {
        for j in 0..per_axis {
            for i in 0..per_axis {
                let origin = Vec3::new(center(x, i), center(y, j), zk);
                let eval_z = if is_3d { zk } else { 0.0 };
                let v = field.evaluate(origin.x, origin.y, eval_z);
                if !v.is_finite() {
                    continue;
                }
                let value = v.norm();
                let direction = if value < crate::vector::EPSILON {
                    Vec3::default()
                } else {
                    v / value
                };
                arrows.push(Arrow {
                    origin,
                    direction,
                    value,
                })
            }
        }
    }
    debug!("sampled {} field arrows", arrows.len());
    arrows
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Voxel {
    pub position: Vec3,
    pub value: f64,
}
///samples a three variable function on lattice centers, indeterminate samples are left out
pub fn sample_volume(
    expr: &Expression,
    x: Range,
    y: Range,
    z: Range,
    per_axis: usize,
) -> Vec<Voxel> {
    let per_axis = per_axis.max(1);
    let center = |r: Range, i: usize| r.lerp((i as f64 + 0.5) / per_axis as f64);
    let mut voxels = Vec::with_capacity(per_axis.pow(3));
    for k in 0..per_axis {
        for j in 0..per_axis {
            for i in 0..per_axis {
                let position = Vec3::new(center(x, i), center(y, j), center(z, k));
                if let Sample::Value(value) =
                    Sample::new(expr.evaluate(position.x, position.y, position.z))
                {
                    voxels.push(Voxel { position, value })
                }
            }
        }
    }
    voxels
}
