use calcplot::expr::Expression;
use calcplot::sample::{
    Sample, sample_curve, sample_field, sample_standing, sample_surface, sample_volume,
};
use calcplot::types::Range;
use calcplot::vector::parse;
use std::f64::consts::FRAC_PI_2;
#[test]
fn samples_classify_non_finite() {
    assert_eq!(Sample::new(1.5), Sample::Value(1.5));
    assert_eq!(Sample::new(f64::NAN), Sample::Indeterminate);
    assert_eq!(Sample::new(f64::NEG_INFINITY).value(), None);
}
#[test]
fn tan_is_split_at_its_poles() {
    let segments = sample_curve(
        &Expression::new("tan(x)"),
        Range::new(-3.0, 3.0),
        Range::new(-5.0, 5.0),
        1000,
    );
    assert!(segments.len() >= 3);
    for segment in &segments {
        assert!(segment.len() > 1);
        for pole in [-FRAC_PI_2, FRAC_PI_2] {
            let below = segment.iter().all(|p| p.x < pole);
            let above = segment.iter().all(|p| p.x > pole);
            assert!(below || above);
        }
    }
}
#[test]
fn indeterminate_points_are_dropped() {
    let segments = sample_curve(
        &Expression::new("1/x"),
        Range::new(-1.0, 1.0),
        Range::new(-5.0, 5.0),
        5,
    );
    assert_eq!(segments.len(), 2);
    assert!(segments.iter().flatten().all(|p| p.y.is_finite()));
    let segments = sample_curve(
        &Expression::new("sqrt(-1)"),
        Range::new(-1.0, 1.0),
        Range::new(-5.0, 5.0),
        100,
    );
    assert!(segments.is_empty());
}
#[test]
fn smooth_curve_is_one_segment() {
    let segments = sample_curve(
        &Expression::new("x^2"),
        Range::new(-2.0, 2.0),
        Range::new(-5.0, 5.0),
        100,
    );
    assert_eq!(segments.len(), 1);
    assert_eq!(segments[0].len(), 100);
    assert_eq!(segments[0][0].x, -2.0);
    assert_eq!(segments[0][99].x, 2.0);
}
#[test]
fn standing_curve_has_a_floor_shadow() {
    let z = Range::new(-2.0, 2.0);
    let standing = sample_standing(&Expression::new("x/5"), Range::new(-5.0, 5.0), z, 11);
    assert_eq!(standing.curve.len(), 1);
    assert_eq!(standing.shadow.len(), 1);
    for (c, s) in standing.curve[0].iter().zip(&standing.shadow[0]) {
        assert_eq!(c.y, 0.0);
        assert_eq!((s.x, s.y, s.z), (c.x, c.y, z.min));
    }
}
#[test]
fn surface_substitutes_and_clamps() {
    let r = Range::new(-1.0, 1.0);
    let grid = sample_surface(&Expression::new("sqrt(x)"), r, r, Range::default(), 2);
    assert_eq!(grid.values, vec![0.0, 1.0, 0.0, 1.0]);
    let grid = sample_surface(&Expression::new("100"), r, r, Range::default(), 3);
    assert!(grid.values.iter().all(|v| *v == 5.0));
}
#[test]
fn surface_grid_cells() {
    let r = Range::new(0.0, 2.0);
    let grid = sample_surface(&Expression::new("x*y"), r, r, Range::default(), 3);
    assert_eq!(grid.values.len(), 9);
    let v = grid.vertex(2, 1);
    assert_eq!((v.x, v.y, v.z), (2.0, 1.0, 2.0));
    let cells: Vec<_> = grid.cells().collect();
    assert_eq!(cells.len(), 4);
    assert_eq!(cells[0].value, 0.25);
    assert_eq!(cells[3].value, (1.0 + 2.0 + 4.0 + 2.0) / 4.0);
    let grid = sample_surface(&Expression::new("x"), r, r, Range::default(), 50);
    assert_eq!(grid.cells().count(), 49 * 49);
}
#[test]
fn field_lattice() {
    let field = parse("-y*i+x*j").unwrap();
    let r = Range::default();
    let arrows = sample_field(&field, r, r, r, 16, false);
    assert_eq!(arrows.len(), 256);
    for a in &arrows {
        assert_eq!(a.origin.z, 0.0);
        assert!((a.direction.norm() - 1.0).abs() < 1e-9);
        assert!((a.value - a.origin.x.hypot(a.origin.y)).abs() < 1e-9);
    }
    let field = parse("i+j+k").unwrap();
    assert_eq!(sample_field(&field, r, r, r, 6, true).len(), 216);
}
#[test]
fn volume_skips_indeterminate() {
    let r = Range::default();
    let voxels = sample_volume(&Expression::new("x+y+z"), r, r, r, 2);
    assert_eq!(voxels.len(), 8);
    assert!(voxels.iter().all(|v| v.value.abs() == 7.5 || v.value.abs() == 2.5));
    assert!(sample_volume(&Expression::new("sqrt(-1)"), r, r, r, 3).is_empty());
}
