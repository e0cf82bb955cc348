use anyhow::Result;

mod app;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    println!("=== Revue Roster Demo ===");
    println!("A terminal walk through the adapter seams:");
    println!("  - two row templates resolved per record");
    println!("  - taps toggling presence through request_update");
    println!("  - a full roster refresh reusing existing containers");
    println!();

    app::run()
}
