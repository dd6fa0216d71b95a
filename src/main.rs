mod api;
mod cli;
mod config;
mod dates;
mod model;
mod output;
mod tui;

use std::io::Write as _;

use anyhow::{bail, Result};
use clap::Parser;

use api::{HttpTodoApi, TodoApi};
use cli::{Cli, Command};
use model::Draft;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let base_url = config::resolve_api_url(cli.api_url)?;
    let api = HttpTodoApi::new(&base_url)?;

    match cli.command {
        None | Some(Command::Board) => tui::run(&api)?,

        Some(Command::List { json }) => {
            let env = api.list()?;
            if !env.success {
                bail!(backend_error(env.error));
            }
            let tasks = env.data.unwrap_or_default();
            if json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                print!("{}", output::format_task_list(&tasks));
            }
        }

        Some(Command::Add {
            title,
            desc,
            priority,
            due,
        }) => {
            if title.trim().is_empty() {
                bail!("title must not be empty");
            }
            let draft = Draft {
                title: title.clone(),
                description: desc,
                priority: priority.parse()?,
                due_date: match due {
                    Some(d) => dates::form_date_to_wire(&d)?,
                    None => None,
                },
            };
            let env = api.create(&draft)?;
            if !env.success {
                bail!(backend_error(env.error));
            }
            match env.message {
                Some(message) => eprintln!("{message}"),
                None => eprintln!("Created todo '{title}'"),
            }
        }

        Some(Command::Toggle { id }) => {
            let env = api.toggle(&id)?;
            if !env.success {
                bail!(backend_error(env.error));
            }
            eprintln!("Toggled todo '{id}'");
        }

        Some(Command::Rm { id, force }) => {
            if !force && !confirm_on_stdin(&id)? {
                eprintln!("Aborted");
                return Ok(());
            }
            let env = api.delete(&id)?;
            if !env.success {
                bail!(backend_error(env.error));
            }
            eprintln!("Deleted todo '{id}'");
        }
    }

    Ok(())
}

fn backend_error(error: Option<String>) -> String {
    error.unwrap_or_else(|| "backend reported failure".to_string())
}

/// Interactive y/N prompt matching the board's delete confirmation.
fn confirm_on_stdin(id: &str) -> Result<bool> {
    eprint!("Delete todo '{id}'? [y/N] ");
    std::io::stderr().flush()?;
    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
