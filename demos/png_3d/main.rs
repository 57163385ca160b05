use calcplot::Graph;
use calcplot::types::View;
use std::io::Write;
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = (1080, 1080);
    let expr = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sin(x)*cos(y)".to_string());
    let mut view = View::new_3d();
    view.z = calcplot::types::Range::new(-2.0, 2.0);
    view.turn(0.2, 0.3);
    let mut graph = Graph::new(&expr, view)?;
    graph.settings.set_dark_mode();
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&graph.get_png(width, height)?)?;
    stdout.flush()?;
    Ok(())
}
