use quakeflow::{ExplorerBuilder, FeedWindow, Locale, RangeFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).init();

    let explorer = ExplorerBuilder::new().build().unwrap();

    if let Err(err) = explorer.set_window(FeedWindow::Daily).await {
        println!("{}", explorer.status_message().unwrap_or_else(|| err.to_string()));
        return;
    }

    explorer.set_range(RangeFilter::Light);
    explorer.set_locale(Locale::new("es"));

    println!("{} ({})", explorer.label("app.title"), explorer.label(FeedWindow::Daily.label_key()));
    for row in explorer.rows() {
        println!("{:>4.1} {:<8} {} | {} | {}", row.magnitude, row.color.as_ref(), row.time, row.place, row.country);
    }
    if explorer.has_more() {
        println!("... {} ({} total)", explorer.label("action.load_more"), explorer.matched());
    }
}
