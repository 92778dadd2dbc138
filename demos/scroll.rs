//! Scroll, search box and flicker grid.
//!
//! Simulates a burst of scroll events hitting the navbar model and a
//! throttled scroll listener, keystrokes hitting a debounced search, and a few frames of
//! the flicker grid.

use form_throttle::{debounce, Interactions};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let page = Interactions::builder()
        .with_grid(Duration::from_millis(250), 2, 4)
        .with_scroll_listener(|y| println!("  [throttled listener] y={}", y))
        .build()?;

    println!("=== Scroll Example ===\n");
    println!("Scrolling down 40px every 16ms, then jumping back to the top:");
    let positions = (1..=15).map(|step| f64::from(step) * 40.0).chain([0.0]);
    for y in positions {
        page.on_scroll(y);
        let navbar = page.navbar();
        println!(
            "  y={:<6} elevated={:<5} hidden={}",
            y, navbar.elevated, navbar.hidden
        );
        tokio::time::sleep(Duration::from_millis(16)).await;
    }

    let stats = page.scroll_metrics().snapshot();
    println!(
        "\n{} scroll events, listener ran {} times, {:.0}% dropped",
        stats.calls,
        stats.invocations,
        stats.drop_rate() * 100.0
    );

    println!("\nTyping 'rust' into a debounced search box (300ms):");
    let search = debounce(
        |query: String| println!("  searching for {:?}", query),
        Duration::from_millis(300),
    );
    for prefix in ["r", "ru", "rus", "rust"] {
        search.call(prefix.to_string());
        tokio::time::sleep(Duration::from_millis(80)).await;
    }
    tokio::time::sleep(Duration::from_millis(400)).await;

    println!("\nFlicker grid, 16 cells:");
    let handle = page.start_grid(16, |frame| println!("  lit: {:?}", frame))?;
    tokio::time::sleep(Duration::from_millis(1100)).await;
    handle.shutdown().await?;

    println!("\n=== Example Complete ===");
    Ok(())
}
