use crate::types::{Color, Draw, Pos, Vec2};
///display list for one frame, commands are painted in insertion order
#[derive(Clone, Debug)]
pub struct Painter {
    background: Color,
    anti_alias: bool,
    size: Vec2,
    commands: Vec<(Draw, Color)>,
}
impl Painter {
    pub fn new(background: Color, anti_alias: bool, size: Vec2) -> Self {
        Self {
            background,
            anti_alias,
            size,
            commands: Vec::new(),
        }
    }
    pub fn background(&self) -> Color {
        self.background
    }
    pub fn size(&self) -> Vec2 {
        self.size
    }
    pub fn commands(&self) -> &[(Draw, Color)] {
        &self.commands
    }
    fn draw(&mut self, draw: Draw, color: Color) {
        self.commands.push((draw, color))
    }
    pub fn line_segment(&mut self, p: [Pos; 2], width: f32, color: &Color) {
        self.draw(Draw::Line(p[0], p[1], width), *color)
    }
    pub fn quad_filled(&mut self, corners: [Pos; 4], color: &Color) {
        self.draw(Draw::Quad(corners), *color)
    }
    pub fn rect_filled(&mut self, p: Pos, color: &Color, size: f32) {
        self.draw(Draw::Point(p, size), *color)
    }
    #[cfg(feature = "tiny-skia")]
    ///paints the display list onto canvas, clearing it first
    pub fn rasterize(&self, canvas: &mut tiny_skia::Pixmap) {
        use tiny_skia::{FillRule, Paint, PathBuilder, Stroke, Transform};
        canvas.fill(self.background.to_col());
        let mut paint = Paint {
            anti_alias: self.anti_alias,
            ..Paint::default()
        };
        for (draw, color) in &self.commands {
            paint.set_color(color.to_col());
            match *draw {
                Draw::Line(a, b, width) => {
                    let mut pb = PathBuilder::new();
                    pb.move_to(a.x, a.y);
                    pb.line_to(b.x, b.y);
                    if let Some(path) = pb.finish() {
                        let stroke = Stroke {
                            width,
                            ..Stroke::default()
                        };
                        canvas.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                    }
                }
                Draw::Quad(c) => {
                    let mut pb = PathBuilder::new();
                    pb.move_to(c[0].x, c[0].y);
                    for p in &c[1..] {
                        pb.line_to(p.x, p.y);
                    }
                    pb.close();
                    if let Some(path) = pb.finish() {
                        canvas.fill_path(
                            &path,
                            &paint,
                            FillRule::Winding,
                            Transform::identity(),
                            None,
                        );
                        //hairline in the fill color hides seams between neighbouring quads
                        let stroke = Stroke {
                            width: 0.5,
                            ..Stroke::default()
                        };
                        canvas.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                    }
                }
                Draw::Point(p, size) => {
                    let half = size * 0.5;
                    let rect = tiny_skia::Rect::from_xywh(p.x - half, p.y - half, size, size);
                    if let Some(rect) = rect {
                        canvas.fill_rect(rect, &paint, Transform::identity(), None);
                    }
                }
            }
        }
    }
    #[cfg(feature = "tiny-skia")]
    ///copies canvas into a 0RGB framebuffer of the same size
    pub fn save(canvas: &tiny_skia::Pixmap, buffer: &mut [u32]) {
        let px: &[[u8; 4]] = bytemuck::cast_slice(canvas.data());
        for (o, [r, g, b, _]) in buffer.iter_mut().zip(px) {
            *o = u32::from_be_bytes([0, *r, *g, *b]);
        }
    }
}
