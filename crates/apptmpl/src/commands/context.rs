//! Context command - manages named connections in client.yaml.

use anyhow::Result;
use apptmpl_config::{ClientConfig, Context as Connection};
use clap::{Args, Subcommand};
use console::Style;

use super::Context;

/// Arguments for the context command.
#[derive(Args, Debug)]
pub struct ContextArgs {
    #[command(subcommand)]
    pub command: ContextCommand,
}

#[derive(Subcommand, Debug)]
pub enum ContextCommand {
    /// List configured contexts
    List,

    /// Add or update a context
    Set {
        /// Context name
        name: String,
        /// Server URL
        server: String,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Make a context the default
    Use {
        /// Context name
        name: String,
    },

    /// Delete a context
    Remove {
        /// Context name
        name: String,
    },
}

/// Run the context command.
pub fn run(args: ContextArgs, ctx: &Context) -> Result<()> {
    let mut config = apptmpl_config::load_client_config()?;

    match args.command {
        ContextCommand::List => {
            list(&config, ctx);
            return Ok(());
        }
        ContextCommand::Set {
            name,
            server,
            timeout,
        } => {
            let mut connection = Connection::new(&name, server);
            if let Some(timeout) = timeout {
                connection = connection.with_timeout(timeout);
            }
            config.set_context(connection);
            if config.current_context.is_none() {
                config.use_context(&name)?;
            }
            println!("Context '{}' saved", name);
        }
        ContextCommand::Use { name } => {
            config.use_context(&name)?;
            println!("Switched to context '{}'", name);
        }
        ContextCommand::Remove { name } => match config.remove_context(&name) {
            Some(_) => println!("Context '{}' removed", name),
            None => anyhow::bail!("context '{}' not found", name),
        },
    }

    apptmpl_config::save_client_config(&config)?;
    Ok(())
}

fn list(config: &ClientConfig, ctx: &Context) {
    if ctx.json_output {
        let names = config.context_names();
        println!("{}", serde_json::json!({
            "current": config.current_context,
            "contexts": names,
        }));
        return;
    }

    if config.contexts.is_empty() {
        println!("No contexts configured. Add one with: apptmpl context set <name> <server>");
        return;
    }

    let dim = Style::new().dim();
    for connection in &config.contexts {
        let marker = if config.current_context.as_deref() == Some(connection.name.as_str()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {} {}",
            marker,
            connection.name,
            dim.apply_to(&connection.server)
        );
    }
}
