use calcplot::Graph;
use calcplot::types::View;
use calcplot::vector::Convention;
use std::io::Write;
fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (width, height) = (1080, 1080);
    let mut args = std::env::args().skip(1);
    let expr = args.next().unwrap_or_else(|| "-y*i+x*j".to_string());
    let mut graph = Graph::new(&expr, View::default())?;
    if args.next().as_deref() == Some("subscript") {
        graph.set_convention(Convention::Subscript)?;
    }
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&graph.get_png(width, height)?)?;
    stdout.flush()?;
    Ok(())
}
