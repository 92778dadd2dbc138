//! Contact form walkthrough.
//!
//! Runs a scripted sequence of form events through `Interactions` and
//! prints what the page would display. Set `RUST_LOG=debug` to see the
//! rejected-field logs.

use form_throttle::{Interactions, SubmitOutcome};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut page = Interactions::builder()
        .with_notice_ttl(Duration::from_secs(1))
        .build()?;

    println!("=== Contact Form Example ===\n");

    // The user tabs through the form too quickly
    let form = page.form_mut();
    form.input("name", "J")?;
    let result = form.blur("name")?;
    println!("name blurred:   {:?}", result.message());

    form.input("email", "test@")?;
    let result = form.blur("email")?;
    println!("email blurred:  {:?}", result.message());

    // Typing into an errored field re-checks it right away
    let result = form.input("name", "Jo")?;
    println!("name corrected: valid = {:?}", result.map(|r| r.is_valid()));

    println!("\nSubmitting with a short message:");
    page.form_mut().input("message", "Hi")?;
    if let SubmitOutcome::Blocked { errors } = page.submit_form()? {
        for error in errors {
            println!("  {:<8} {}", error.field, error.message);
        }
    }

    println!("\nFixing the remaining fields:");
    let form = page.form_mut();
    form.input("email", "jo@example.com")?;
    form.input("message", "Could you send me a quote for the audit?")?;

    match page.submit_form()? {
        SubmitOutcome::Sending => {
            println!("  button label: {:?}", page.form().submit_label());
            println!("  payload: {:?}", page.form().payload());
        }
        SubmitOutcome::Blocked { errors } => println!("  still blocked: {:?}", errors),
    }

    // Pretend the POST took a moment
    tokio::time::sleep(Duration::from_millis(300)).await;
    page.form_sent();
    for notice in page.notices().visible() {
        println!("\nnotice: {}", notice.text);
    }

    tokio::time::sleep(Duration::from_millis(1100)).await;
    println!("notices after ttl: {}", page.notices().visible().len());

    println!("\n=== Example Complete ===");
    Ok(())
}
