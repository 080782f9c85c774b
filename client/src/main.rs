//! Contacts API terminal client
//!
//! ```sh
//! # Talk to a local server on the default port
//! contacts-client
//!
//! # Another server, 20 rows per page
//! contacts-client --base-url http://contacts.internal:8081 --per-page 20
//! ```

use async_trait::async_trait;
use clap::Parser;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};

use contacts_client::app::{Confirm, ContactsApp, DEFAULT_PAGE_SIZE};
use contacts_client::commands::{Command, HELP};
use contacts_client::render::{render, render_form};
use contacts_client::HttpContactsApi;

#[derive(Parser, Debug)]
#[command(name = "contacts-client", version, about = "Browse and edit contacts")]
struct Cli {
    /// Server root URL.
    #[arg(long, env = "CONTACTS_API_URL", default_value = "http://127.0.0.1:8081")]
    base_url: String,

    /// Initial page size (5, 10, 20 or 50).
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    per_page: u64,

    /// Log level for diagnostics on stderr.
    #[arg(short, long, default_value = "warn")]
    log_level: String,
}

type InputLines = Lines<BufReader<Stdin>>;

/// Yes/no prompt on the terminal.
struct PromptConfirm<'a> {
    lines: &'a mut InputLines,
}

#[async_trait]
impl Confirm for PromptConfirm<'_> {
    async fn confirm(&mut self, prompt: &str) -> bool {
        println!("{} [y/N]", prompt);
        match self.lines.next_line().await {
            Ok(Some(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            _ => false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let api = HttpContactsApi::new(&cli.base_url)?;
    let mut app = ContactsApp::new(api);
    if !app.set_per_page(cli.per_page).await {
        eprintln!("Unsupported page size {}; using {}.", cli.per_page, DEFAULT_PAGE_SIZE);
        app.refresh().await;
    }
    print!("{}", render(&app));

    let mut lines = BufReader::new(stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", message);
                continue;
            }
        };

        match command {
            Command::Reload => app.refresh().await,
            Command::Next => app.next_page().await,
            Command::Prev => app.prev_page().await,
            Command::Page(n) => app.go_to_page(n).await,
            Command::PerPage(n) => {
                if !app.set_per_page(n).await {
                    println!("Page size must be one of 5, 10, 20, 50.");
                    continue;
                }
            }
            Command::New => {
                app.cancel_edit();
                print!("{}", render_form(app.form(), app.editing()));
                continue;
            }
            Command::Edit(id) => {
                if app.start_edit_by_id(id).await {
                    print!("{}", render_form(app.form(), app.editing()));
                    continue;
                }
            }
            Command::Set(field, value) => {
                app.set_field(field, value);
                continue;
            }
            Command::Show => {
                print!("{}", render_form(app.form(), app.editing()));
                continue;
            }
            Command::Save => {
                app.submit().await;
            }
            Command::Cancel => {
                app.cancel_edit();
                continue;
            }
            Command::Delete(id) => {
                let mut confirm = PromptConfirm { lines: &mut lines };
                app.delete(id, &mut confirm).await;
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        print!("{}", render(&app));
    }

    Ok(())
}
