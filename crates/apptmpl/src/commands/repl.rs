//! Interactive console over one client session.
//!
//! The session lives only as long as the process, so sign-in and the calls
//! that need it happen inside this loop.

use anyhow::Result;
use apptmpl_client::{ClientContext, Error};
use console::{Style, style};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};

use super::{Context, status};

enum ControlFlow {
    Continue,
    Exit,
}

/// REPL state.
pub struct Repl {
    app: ClientContext,
    editor: Editor<(), DefaultHistory>,
    verbose: bool,
}

/// Run the console.
pub async fn run(ctx: &Context) -> Result<()> {
    let app = ctx.connect()?;
    app.bootstrap().await;
    status::print_summary(&app, false);

    let mut repl = Repl::new(app, ctx.verbose)?;
    repl.run().await
}

impl Repl {
    /// Create a new REPL instance.
    pub fn new(app: ClientContext, verbose: bool) -> Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        Ok(Self {
            app,
            editor: Editor::with_config(config)?,
            verbose,
        })
    }

    /// Run the REPL loop.
    pub async fn run(&mut self) -> Result<()> {
        self.print_dim("Type 'help' for commands.");

        loop {
            let prompt = self.format_prompt();

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    match self.handle_command(line).await {
                        Ok(ControlFlow::Continue) => {}
                        Ok(ControlFlow::Exit) => break,
                        Err(e) => self.print_error(&format!("Command error: {}", e)),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!();
                    self.print_dim("(Interrupted - type quit to exit)");
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(e) => {
                    self.print_error(&format!("Input error: {}", e));
                    break;
                }
            }
        }

        self.print_dim("Goodbye!");
        Ok(())
    }

    async fn handle_command(&mut self, input: &str) -> Result<ControlFlow> {
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().copied().unwrap_or("");
        let args = &parts[1..];
        let app = &self.app;

        match cmd {
            "quit" | "q" | "exit" => return Ok(ControlFlow::Exit),
            "help" | "h" | "?" => self.print_help(),
            "status" => status::print_summary(app, self.verbose),
            "health" => {
                if app.refresh_probes().await {
                    println!("{}", Style::new().green().apply_to("healthy"));
                }
            }
            "version" => {
                if let Some(version) = app.refresh_version().await {
                    println!("{}", serde_json::to_string_pretty(&version)?);
                }
            }
            "whoami" => {
                if let Some(user) = app.capture(app.client().auth().whoami().await) {
                    println!("{}", serde_json::to_string_pretty(&user)?);
                }
            }
            "login" => {
                let [username] = args else {
                    self.print_error("usage: login <username>");
                    return Ok(ControlFlow::Continue);
                };
                let password = rpassword::prompt_password("Password: ")?;
                if let Some(user) = app.capture(app.client().auth().login(username, &password).await)
                {
                    println!("Signed in as {} <{}>", user.name, user.email);
                }
            }
            "logout" => {
                if app.capture(app.client().auth().logout().await).is_some() {
                    println!("Signed out");
                }
            }
            "register" => {
                let [username, email] = args else {
                    self.print_error("usage: register <username> <email>");
                    return Ok(ControlFlow::Continue);
                };
                let password = rpassword::prompt_password("Password: ")?;
                let result = app
                    .client()
                    .auth()
                    .register(username, &password, email)
                    .await;
                if let Some(user) = app.capture(result) {
                    println!("Registered {} ({})", user.email, user.id);
                }
            }
            "bomb" => {
                let errors = app.client().errors();
                let result = match args.first().copied() {
                    Some("text") => errors.text().await,
                    Some("payload") => errors.payload().await,
                    Some("basic") => errors.json_basic().await,
                    Some("complete") => errors.json_complete().await,
                    _ => {
                        self.print_error("usage: bomb <text|payload|basic|complete>");
                        return Ok(ControlFlow::Continue);
                    }
                };
                if app.capture(result).is_some() {
                    self.print_dim("(the endpoint did not fail)");
                }
            }
            "errors" => {
                if app.pending_errors() == 0 {
                    self.print_dim("No pending errors.");
                }
                while let Some(err) = app.ack_err() {
                    self.print_err_detail(&err);
                }
            }
            _ => self.print_error(&format!("Unknown command: {} (try 'help')", cmd)),
        }

        Ok(ControlFlow::Continue)
    }

    fn format_prompt(&self) -> String {
        let who = match self.app.user() {
            Some(user) => user.name,
            None => "anonymous".to_string(),
        };
        match self.app.pending_errors() {
            0 => format!("{}> ", who),
            n => format!("{} [{}!]> ", who, n),
        }
    }

    fn print_err_detail(&self, err: &Error) {
        let red = Style::new().red();
        match err.as_response() {
            Some(response) => {
                println!(
                    "{} {}",
                    red.apply_to(format!("{} ({})", response.name(), response.status())),
                    response.message()
                );
                if let Some(request_id) = response.request_id() {
                    self.print_dim(&format!("  request id: {}", request_id));
                }
                if self.verbose {
                    self.print_dim(&format!("  {:?}", response));
                }
            }
            None => println!("{} {}", red.apply_to("Error"), err),
        }
    }

    fn print_help(&self) {
        println!("{}", style("Commands").bold());
        for (cmd, about) in [
            ("status", "show health, version and identity"),
            ("health", "re-run the health and version probes"),
            ("version", "fetch the server version"),
            ("login <user>", "sign in (prompts for password)"),
            ("logout", "sign out"),
            ("whoami", "fetch the signed-in user"),
            ("register <user> <email>", "create an account"),
            ("bomb <text|payload|basic|complete>", "call a failing endpoint"),
            ("errors", "show and acknowledge pending errors"),
            ("quit", "exit"),
        ] {
            println!("  {:<38} {}", cmd, Style::new().dim().apply_to(about));
        }
    }

    fn print_dim(&self, msg: &str) {
        println!("{}", Style::new().dim().apply_to(msg));
    }

    fn print_error(&self, msg: &str) {
        eprintln!("{}", Style::new().red().apply_to(msg));
    }
}
