use railyard::{RenderOutcome, parse_blocking};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "^(?<user>[\\w.+-]+)@(\\w+\\.)+[a-z]{2,}$".to_owned());
    let mut session = parse_blocking(text)?;

    let mut last = 0;
    let mut progress = |f: f64| {
        let pct = (f * 100.0) as u32;
        if pct / 25 > last / 25 {
            eprintln!("{pct}%");
        }
        last = pct;
    };
    let outcome = session.render_blocking(&mut progress)?;

    for warning in session.warnings() {
        eprintln!("warning: {warning}");
    }
    match outcome {
        RenderOutcome::Rendered(doc) => println!("{}", doc.markup()),
        RenderOutcome::Cancelled => eprintln!("cancelled"),
    }
    Ok(())
}
