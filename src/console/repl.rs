//! Interactive loop over the registrar controller.

use colored::Colorize;
use std::sync::Arc;
use tokio::task::JoinHandle;

use super::input::ConsoleInput;
use super::render::{help, render_notice, render_view};
use crate::application::controller::{Registrar, ViewModel};
use crate::application::services::Registration;
use crate::error::RegistrarError;

type RegistrationTask = JoinHandle<Result<Registration, RegistrarError>>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Login,
    Logout,
    Folder,
    Register,
    Status,
    Help,
    Quit,
    Unknown(String),
    Input(String),
}

impl Command {
    fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            ":login" => Self::Login,
            ":logout" => Self::Logout,
            ":folder" => Self::Folder,
            ":register" => Self::Register,
            ":status" => Self::Status,
            ":help" | ":h" | "?" => Self::Help,
            ":quit" | ":q" | ":exit" => Self::Quit,
            other if other.starts_with(':') => Self::Unknown(other.to_string()),
            _ => Self::Input(line.to_string()),
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

/// Reads commands and candidate names until `:quit` or end of input.
///
/// Availability results and a running registration are handled as they
/// arrive, so the user can keep typing while either is outstanding.
pub struct Repl {
    registrar: Registrar,
    input: Arc<ConsoleInput>,
    registration: Option<RegistrationTask>,
    last_view: Option<ViewModel>,
}

impl Repl {
    pub fn new(registrar: Registrar, input: Arc<ConsoleInput>) -> Self {
        Self {
            registrar,
            input,
            registration: None,
            last_view: None,
        }
    }

    /// Runs until the user quits. An outstanding registration is awaited
    /// before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub async fn run(&mut self) -> Result<(), RegistrarError> {
        println!("{}", help());
        self.registrar.refresh_session().await;
        self.flush(true);

        loop {
            tokio::select! {
                line = self.input.next_line() => {
                    let Some(line) = line? else { break };
                    if let Flow::Quit = self.handle_line(&line).await {
                        break;
                    }
                }
                Some(done) = self.registrar.next_check() => {
                    self.registrar.apply_check(done);
                }
                joined = wait_for(&mut self.registration), if self.registration.is_some() => {
                    self.registration = None;
                    self.finish(joined);
                }
            }

            self.flush(false);
        }

        if let Some(task) = self.registration.take() {
            self.finish(task.await);
            self.flush(false);
        }

        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Flow {
        match Command::parse(line) {
            Command::Login => self.registrar.sign_in().await,
            Command::Logout => self.registrar.sign_out(),
            Command::Folder => {
                if !self.registrar.view().folder_enabled {
                    println!("{}", "Sign in first (:login)".yellow());
                }
                self.registrar.select_folder().await;
            }
            Command::Register => {
                if let Ok(pending) = self.registrar.begin_registration() {
                    tracing::debug!(subdomain = %pending.request().subdomain, "Starting registration");
                    self.registration = Some(tokio::spawn(pending.run()));
                }
            }
            Command::Status => self.flush(true),
            Command::Help => println!("{}", help()),
            Command::Quit => return Flow::Quit,
            Command::Unknown(cmd) => {
                println!("{} {cmd} (try :help)", "Unknown command".yellow());
            }
            Command::Input(raw) => {
                if self.registrar.view().input_enabled {
                    self.registrar.input_changed(&raw);
                } else {
                    println!("{}", "Sign in first (:login)".yellow());
                }
            }
        }

        Flow::Continue
    }

    fn finish(
        &mut self,
        joined: Result<Result<Registration, RegistrarError>, tokio::task::JoinError>,
    ) {
        let result = joined.unwrap_or_else(|e| {
            Err(RegistrarError::internal(format!("Registration task failed: {e}")))
        });
        self.registrar.finish_registration(result);
    }

    /// Prints pending notices, then the view if it changed (or always when `force`).
    fn flush(&mut self, force: bool) {
        for notice in self.registrar.drain_notices() {
            println!("{}", render_notice(&notice));
        }

        let view = self.registrar.view();
        if force || self.last_view.as_ref() != Some(&view) {
            println!("{}", render_view(&view));
            self.last_view = Some(view);
        }
    }
}

async fn wait_for(
    task: &mut Option<RegistrationTask>,
) -> Result<Result<Registration, RegistrarError>, tokio::task::JoinError> {
    match task.as_mut() {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse(":login"), Command::Login);
        assert_eq!(Command::parse("  :register "), Command::Register);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse(":nope"), Command::Unknown(":nope".to_string()));
        assert_eq!(Command::parse("MyBlog"), Command::Input("MyBlog".to_string()));
        assert_eq!(Command::parse(""), Command::Input(String::new()));
    }
}
