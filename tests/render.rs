use calcplot::error::{ExprError, PlotError};
use calcplot::types::{Color, Draw, Pos, Range, Settings, Vec2, Vec3, View, ZoomAxis};
use calcplot::vector::Convention;
use calcplot::{Camera, Graph, PlotKind, depth_sort};
use std::f64::consts::FRAC_PI_2;
fn graph(expr: &str, view: View) -> Graph {
    Graph::new(expr, view).unwrap()
}
fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).norm() < 1e-12
}
fn in_canvas(p: Pos, w: u32, h: u32) -> bool {
    p.x >= 0.0 && p.y >= 0.0 && p.x <= w as f32 && p.y <= h as f32
}
#[test]
fn plot_kinds() {
    assert_eq!(graph("x^2", View::default()).kind(), PlotKind::Curve);
    assert_eq!(graph("x^2", View::new_3d()).kind(), PlotKind::StandingCurve);
    assert_eq!(graph("x*y", View::default()).kind(), PlotKind::Surface);
    assert_eq!(graph("x+y+z", View::default()).kind(), PlotKind::Volume);
    assert_eq!(graph("3i+4j", View::default()).kind(), PlotKind::Field2D);
    assert_eq!(graph("3i+4j", View::new_3d()).kind(), PlotKind::Field3D);
    assert_eq!(graph("i+j+k", View::default()).kind(), PlotKind::Field3D);
    assert!(!PlotKind::Curve.is_3d());
    assert!(PlotKind::Surface.is_3d());
}
#[test]
fn invalid_expressions_are_rejected() {
    assert!(matches!(
        Graph::new("2+", View::default()),
        Err(PlotError::InvalidSyntax(ExprError::MissingOperand(2)))
    ));
    assert!(matches!(
        Graph::new("", View::default()),
        Err(PlotError::InvalidSyntax(ExprError::Empty))
    ));
    let mut g = graph("x^2", View::default());
    assert!(g.set_expression("sin(").is_err());
    assert_eq!(g.expression().as_str(), "x^2");
    assert_eq!(g.kind(), PlotKind::Curve);
}
#[test]
fn convention_switch() {
    let mut g = graph("x", View::default());
    assert!(g.set_expression("-y*e_x+x*e_y").is_err());
    g.set_convention(Convention::Subscript).unwrap();
    g.set_expression("-y*e_x+x*e_y").unwrap();
    assert_eq!(g.kind(), PlotKind::Field2D);
    assert!(g.field().is_some());
    let mut g = graph("3i+4j", View::default());
    assert!(g.set_convention(Convention::Subscript).is_err());
    assert_eq!(g.kind(), PlotKind::Field2D);
}
#[test]
fn depth_sort_is_back_to_front_and_stable() {
    let p = Draw::Point(Pos::new(0.0, 0.0), 1.0);
    let mut buffer = vec![
        (1.0, p, Color::splat(0)),
        (3.0, p, Color::splat(1)),
        (2.0, p, Color::splat(2)),
        (3.0, p, Color::splat(3)),
    ];
    depth_sort(&mut buffer);
    let order: Vec<u8> = buffer.iter().map(|(_, _, c)| c.r).collect();
    assert_eq!(order, vec![1, 3, 2, 0]);
}
#[test]
fn camera_centers_the_box() {
    let view = View::new_3d();
    let settings = Settings::default();
    let camera = Camera::new(&view, &settings, Vec2::new(200.0, 100.0));
    let (p, depth) = camera.project_box(Vec3::splat(0.0));
    assert_eq!((p.x, p.y, depth), (100.0, 50.0, 0.0));
    let (p, _) = camera.project(Vec3::splat(0.0));
    assert_eq!((p.x, p.y), (100.0, 50.0));
}
#[test]
fn quarter_turns() {
    let q = FRAC_PI_2;
    assert!(close(Vec3::new(0.0, 1.0, 0.0).rotate_x(q), Vec3::new(0.0, 0.0, 1.0)));
    assert!(close(Vec3::new(0.0, 0.0, 1.0).rotate_x(q), Vec3::new(0.0, -1.0, 0.0)));
    assert!(close(Vec3::new(1.0, 0.0, 0.0).rotate_x(q), Vec3::new(1.0, 0.0, 0.0)));
    assert!(close(Vec3::new(1.0, 0.0, 0.0).rotate_z(q), Vec3::new(0.0, 1.0, 0.0)));
    assert!(close(Vec3::new(0.0, 1.0, 0.0).rotate_z(q), Vec3::new(-1.0, 0.0, 0.0)));
    assert!(close(Vec3::new(0.0, 0.0, 1.0).rotate_z(q), Vec3::new(0.0, 0.0, 1.0)));
}
#[test]
fn elevation_is_applied_before_azimuth() {
    let view = View {
        elevation: FRAC_PI_2,
        azimuth: FRAC_PI_2,
        ..View::new_3d()
    };
    let p = Vec3::new(0.0, 1.0, 0.0);
    let rotated = view.rotate(p);
    assert!(close(rotated, Vec3::new(0.0, 0.0, 1.0)));
    let other_order = p.rotate_z(view.azimuth).rotate_x(view.elevation);
    assert!(close(other_order, Vec3::new(-1.0, 0.0, 0.0)));
    assert!(!close(rotated, other_order));
}
#[test]
fn perspective_divide() {
    let canvas = Vec2::new(200.0, 100.0);
    assert_eq!(
        Vec3::new(10.0, 0.0, 10.0).project(4.0, canvas),
        Vec2::new(110.0, 40.0)
    );
    assert_eq!(
        Vec3::new(10.0, 4.0, 10.0).project(4.0, canvas),
        Vec2::new(105.0, 45.0)
    );
    assert_eq!(
        Vec3::new(10.0, -2.0, 10.0).project(4.0, canvas),
        Vec2::new(120.0, 30.0)
    );
}
#[test]
fn farther_surface_cells_come_first() {
    let view = View {
        elevation: 0.0,
        azimuth: 0.0,
        ..View::new_3d()
    };
    let g = graph("0*y", view).with_settings(Settings {
        grid: 3,
        ..Settings::default()
    });
    let prims = g.primitives(400, 400);
    let radius = g.settings.box_scale * 400.0 * 0.5;
    let depths: Vec<f64> = prims.iter().map(|(d, _, _)| *d).collect();
    assert_eq!(
        depths,
        vec![radius * 0.5, radius * 0.5, -radius * 0.5, -radius * 0.5]
    );
    let width = |d: &Draw| match d {
        Draw::Quad(c) => {
            let xs = c.iter().map(|p| p.x);
            xs.clone().fold(f32::MIN, f32::max) - xs.fold(f32::MAX, f32::min)
        }
        _ => panic!("surface drew a non quad"),
    };
    assert!(width(&prims[0].1) < width(&prims[3].1));
}
#[test]
fn curve_stays_inside_the_canvas() {
    let mut view = View::default();
    view.y = Range::new(-1.0, 1.0);
    let painter = graph("tan(x)", view).paint(320, 240);
    assert!(!painter.commands().is_empty());
    for (draw, _) in painter.commands() {
        if let Draw::Line(a, b, _) = draw {
            assert!(in_canvas(*a, 320, 240) && in_canvas(*b, 320, 240));
        }
    }
}
#[test]
fn painting_is_deterministic() {
    for (expr, view) in [
        ("sin(x)", View::default()),
        ("x*y", View::new_3d()),
        ("-y*i+x*j", View::default()),
    ] {
        let g = graph(expr, view);
        assert_eq!(g.paint(200, 150).commands(), g.paint(200, 150).commands());
    }
}
#[test]
fn surface_primitives_are_sorted() {
    let g = graph("x*y/5", View::new_3d()).with_settings(Settings {
        grid: 5,
        ..Settings::default()
    });
    let prims = g.primitives(400, 400);
    assert_eq!(prims.len(), 16);
    assert!(prims.iter().all(|(_, d, _)| matches!(d, Draw::Quad(_))));
    assert!(prims.windows(2).all(|w| w[0].0 >= w[1].0));
    assert!(graph("x", View::default()).primitives(400, 400).is_empty());
    let painter = g.paint(400, 400);
    let quads = painter
        .commands()
        .iter()
        .filter(|(d, _)| matches!(d, Draw::Quad(_)))
        .count();
    assert_eq!(quads, 16);
}
#[test]
fn field_and_volume_primitives() {
    let prims = graph("i+j+k", View::default()).primitives(300, 300);
    assert!(!prims.is_empty());
    assert!(prims.iter().all(|(_, d, _)| matches!(d, Draw::Line(..))));
    let prims = graph("x*y*z", View::default()).primitives(300, 300);
    assert!(!prims.is_empty());
    assert!(prims.iter().all(|(_, d, _)| matches!(d, Draw::Point(..))));
    let painter = graph("-y*i+x*j", View::default()).paint(300, 300);
    assert!(painter.commands().len() > 256);
}
#[test]
fn view_controls() {
    let mut view = View::default();
    view.zoom(2.0);
    assert_eq!(view.x, Range::new(-10.0, 10.0));
    assert_eq!(view.z, Range::new(-10.0, 10.0));
    view.zoom_axis = ZoomAxis::Y;
    view.zoom(0.5);
    assert_eq!(view.x, Range::new(-10.0, 10.0));
    assert_eq!(view.y, Range::new(-5.0, 5.0));
    view.zoom(-1.0);
    assert_eq!(view.y, Range::new(-5.0, 5.0));
    view.pan(Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(view.visible_x(), Range::new(-9.0, 11.0));
    view.turn(10.0, 0.0);
    assert_eq!(view.elevation, std::f64::consts::FRAC_PI_2);
}
#[cfg(feature = "tiny-skia")]
#[test]
fn framebuffer_update() {
    let mut g = graph("x^2", View::default());
    let mut buffer = vec![0u32; 10];
    assert!(matches!(
        g.update(4, 4, &mut buffer),
        Err(PlotError::Framebuffer {
            got: 10,
            expected: 16
        })
    ));
    let mut buffer = vec![1u32 << 31; 64 * 48];
    g.update(64, 48, &mut buffer).unwrap();
    assert!(buffer.iter().all(|p| p >> 24 == 0));
    assert!(buffer.contains(&0x00ff_ffff));
    g.update(64, 48, &mut buffer).unwrap();
}
#[cfg(feature = "tiny-skia-png")]
#[test]
fn png_output() {
    let png = graph("x*y", View::new_3d()).get_png(64, 64).unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert!(matches!(
        graph("x", View::default()).get_png(0, 10),
        Err(PlotError::EmptyCanvas(0, 10))
    ));
}
#[cfg(feature = "serde")]
#[test]
fn view_share_string() {
    use calcplot::types::ViewTiny;
    let mut view = View::new_3d();
    view.azimuth = 0.75;
    view.x = Range::new(-2.0, 8.0);
    view.z = Range::new(-0.5, 0.25);
    view.pan(Vec3::new(1.0, -2.0, 0.5));
    view.zoom_axis = ZoomAxis::Z;
    let s = view.to_tiny().encode().unwrap();
    let tiny = ViewTiny::try_from(&s).unwrap();
    let mut back = View::default();
    back.apply_tiny(tiny);
    assert_eq!(back, view);
    assert!(ViewTiny::try_from(&"nonsense".to_string()).is_err());
}
#[test]
fn implicit_products_are_rejected() {
    assert!(matches!(
        Graph::new("2xi", View::default()),
        Err(PlotError::InvalidSyntax(ExprError::TrailingInput(_)))
    ));
    assert_eq!(graph("2*xi", View::default()).kind(), PlotKind::Field2D);
}
