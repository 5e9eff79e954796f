use media_inspector::{Session, StreamKind};
use std::env;

/// Prints a few fields and the full report of the file given as argument.
fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/sample.mp4".to_owned());
    let mut session = Session::default();
    session.open_file(&path)?;

    println!("Format:   {}", session.format()?);
    println!("Duration: {}", session.get("Duration/String")?);
    if session.count(StreamKind::Video) > 0 {
        println!(
            "Size:     {}x{}",
            session.get_stream(StreamKind::Video, "Width")?,
            session.get_stream(StreamKind::Video, "Height")?
        );
    }
    println!();
    println!("{}", session.full_report()?);

    Ok(())
}
