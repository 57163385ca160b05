use calcplot::Graph;
use calcplot::types::View;
use std::io::Write;
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = (1920, 1080);
    let expr = std::env::args().nth(1).unwrap_or_else(|| "x^3-x".to_string());
    let mut view = View::default();
    view.x = calcplot::types::Range::new(-2.0, 2.0);
    view.y = calcplot::types::Range::new(-2.0, 2.0);
    let graph = Graph::new(&expr, view)?;
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&graph.get_png(width, height)?)?;
    stdout.flush()?;
    Ok(())
}
