//! Status command - probes the server once and prints what it found.

use anyhow::Result;
use apptmpl_client::{ClientContext, User, VersionInfo};
use console::{Style, style};
use serde::Serialize;

use super::Context;

/// Status response for JSON output.
#[derive(Debug, Serialize)]
struct StatusOutput {
    server_url: String,
    healthy: bool,
    version: Option<VersionInfo>,
    user: Option<User>,
    errors: Vec<String>,
}

/// Run the status command.
pub async fn run(ctx: &Context) -> Result<()> {
    let app = ctx.connect()?;
    app.bootstrap().await;

    if ctx.json_output {
        let output = StatusOutput {
            server_url: app.client().base_url().to_string(),
            healthy: app.healthy(),
            version: app.healthy().then(|| app.version()),
            user: app.user(),
            errors: std::iter::from_fn(|| app.ack_err())
                .map(|e| e.to_string())
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&app, ctx.verbose);
    }

    Ok(())
}

/// Print the health/version/identity block.
pub fn print_summary(app: &ClientContext, verbose: bool) {
    let dim = Style::new().dim();

    println!();
    println!("{}", style("app-tmpl").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!("  {} {}", dim.apply_to("Server:"), app.client().base_url());

    if app.healthy() {
        let version = app.version();
        println!(
            "  {} {}",
            dim.apply_to("Status:"),
            Style::new().green().apply_to("● healthy")
        );
        println!("  {} {}", dim.apply_to("Env:"), version.env);
        println!("  {} {}", dim.apply_to("Commit:"), version.last_commit);
        match version.build_time {
            Some(built) => println!("  {} {}", dim.apply_to("Built:"), built.to_rfc3339()),
            None => println!("  {} n/a", dim.apply_to("Built:")),
        }
    } else {
        println!(
            "  {} {}",
            dim.apply_to("Status:"),
            Style::new().red().apply_to("● unreachable")
        );
    }

    match app.user() {
        Some(user) => println!("  {} {} <{}>", dim.apply_to("User:"), user.name, user.email),
        None => println!("  {} {}", dim.apply_to("User:"), dim.apply_to("signed out")),
    }

    let pending = app.pending_errors();
    if pending > 0 {
        println!(
            "  {} {}",
            dim.apply_to("Errors:"),
            Style::new().yellow().apply_to(format!("{} pending", pending))
        );
        if verbose {
            while let Some(err) = app.ack_err() {
                println!("    {}", err);
            }
        }
    }
    println!();
}
