//! Line-oriented console driving the dashboard controller.
//!
//! Each line is parsed into a [`Command`], dispatched to the controller or
//! the auth port, and answered with plain text. The visible notification is
//! printed after every command.

mod command;
pub mod render;

use std::io::{self, Write};
use std::sync::Arc;

use clap::Parser;
use clap::error::ErrorKind;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

pub use command::{Command, CommandLine, RowRef, TokenizeError, tokenize};

use crate::domain::ports::{AuthService, RecordService};
use crate::domain::{
    ActionError, ActionOutcome, Credentials, DashboardController, Notification, Record,
    Registration,
};

/// Whether the session keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Read the next line.
    Continue,
    /// Stop the session.
    Quit,
}

/// Interactive session over one dashboard controller.
pub struct ConsoleSession<R, A> {
    dashboard: DashboardController<R>,
    auth: Arc<A>,
}

impl<R, A> ConsoleSession<R, A>
where
    R: RecordService,
    A: AuthService,
{
    /// Create a session around an existing controller.
    pub fn new(dashboard: DashboardController<R>, auth: Arc<A>) -> Self {
        Self { dashboard, auth }
    }

    /// Controller driven by this session.
    pub fn dashboard(&self) -> &DashboardController<R> {
        &self.dashboard
    }

    /// Read commands from `input` until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when reading input or writing output fails.
    pub async fn run<I, W>(&self, input: I, output: &mut W) -> io::Result<()>
    where
        I: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(output, "Type `help` for the list of commands.")?;
        let mut lines = input.lines();
        loop {
            write!(output, "> ")?;
            output.flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            if self.execute(&line, output).await? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    /// Parse and run one input line.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when writing output fails.
    pub async fn execute<W: Write>(&self, line: &str, output: &mut W) -> io::Result<Flow> {
        let tokens = match tokenize(line) {
            Ok(tokens) if tokens.is_empty() => return Ok(Flow::Continue),
            Ok(tokens) => tokens,
            Err(error) => {
                writeln!(output, "error: {error}")?;
                return Ok(Flow::Continue);
            }
        };
        let command = match CommandLine::try_parse_from(tokens) {
            Ok(parsed) => parsed.command,
            Err(error) => {
                if !matches!(
                    error.kind(),
                    ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    debug!(kind = ?error.kind(), "rejected console input");
                }
                write!(output, "{}", error.render())?;
                return Ok(Flow::Continue);
            }
        };

        let flow = self.dispatch(command, output).await?;
        if flow == Flow::Continue {
            if let Some(notification) = self.dashboard.notification() {
                output.write_all(render::notification(&notification).as_bytes())?;
            }
        }
        Ok(flow)
    }

    async fn dispatch<W: Write>(&self, command: Command, output: &mut W) -> io::Result<Flow> {
        match command {
            Command::List => self.print_table(output)?,
            Command::Refresh => {
                if self.dashboard.refresh().await.is_err() {
                    writeln!(output, "Could not refresh; showing the last known records.")?;
                }
                self.print_table(output)?;
            }
            Command::Form => self.print_form(output)?,
            Command::Set { field, value } => {
                self.dashboard.set_field_value(field, value.join(" "));
                self.print_form(output)?;
            }
            Command::Touch { field } => {
                self.dashboard.touch_field(field);
                self.print_form(output)?;
            }
            Command::Submit => {
                let result = self.dashboard.submit().await;
                self.report_action(result, output)?;
            }
            Command::Update => {
                let result = self.dashboard.update().await;
                if result == Ok(ActionOutcome::Skipped) {
                    writeln!(output, "Not editing a record; use `edit <row>` first.")?;
                } else {
                    self.report_action(result, output)?;
                }
            }
            Command::Clear => {
                self.dashboard.clear();
                self.print_form(output)?;
            }
            Command::Edit { row } => match self.resolve(&row) {
                Some(record) if self.dashboard.edit_record(record.id()) => {
                    self.print_form(output)?;
                }
                _ => Self::missing_row(&row, output)?,
            },
            Command::View { row } => match self.resolve(&row) {
                Some(record) if self.dashboard.view_record(record.id()) => {
                    self.print_detail(output)?;
                }
                _ => Self::missing_row(&row, output)?,
            },
            Command::Delete { row } => {
                let id = match &row {
                    RowRef::Id(id) => Some(id.clone()),
                    RowRef::Position(_) => self.resolve(&row).map(|record| record.id().clone()),
                };
                match id {
                    Some(id) => {
                        let result = self.dashboard.delete_record(&id).await;
                        self.report_action(result, output)?;
                    }
                    None => Self::missing_row(&row, output)?,
                }
            }
            Command::Close => self.dashboard.close_detail(),
            Command::Dismiss => self.dashboard.dismiss_notification(),
            Command::Login { email, password } => self.login(&email, &password, output).await?,
            Command::Register {
                name,
                email,
                password,
            } => self.register(&name, &email, &password, output).await?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn resolve(&self, row: &RowRef) -> Option<Record> {
        match row {
            RowRef::Position(position) => self.dashboard.record_at(*position),
            RowRef::Id(id) => self.dashboard.find_record(id),
        }
    }

    fn missing_row<W: Write>(row: &RowRef, output: &mut W) -> io::Result<()> {
        match row {
            RowRef::Position(position) => writeln!(output, "No record at row {position}."),
            RowRef::Id(id) => writeln!(output, "No record with id {id}."),
        }
    }

    fn report_action<W: Write>(
        &self,
        result: Result<ActionOutcome, ActionError>,
        output: &mut W,
    ) -> io::Result<()> {
        match result {
            Ok(_) => self.print_table(output),
            Err(ActionError::Invalid(report)) => {
                output.write_all(render::invalid(&report).as_bytes())?;
                self.print_form(output)
            }
            // The controller has already published a notification.
            Err(ActionError::Service(_)) => Ok(()),
        }
    }

    async fn login<W: Write>(&self, email: &str, password: &str, output: &mut W) -> io::Result<()> {
        let credentials = match Credentials::try_from_parts(email, password) {
            Ok(credentials) => credentials,
            Err(error) => return writeln!(output, "error: {error}"),
        };
        let notification = match self.auth.login(&credentials).await {
            Ok(()) => Notification::success("Login successfully"),
            Err(error) => {
                warn!(error = %error, "login failed");
                Notification::error("Failed to login")
            }
        };
        self.dashboard.show_notification(notification);
        Ok(())
    }

    async fn register<W: Write>(
        &self,
        name: &str,
        email: &str,
        password: &str,
        output: &mut W,
    ) -> io::Result<()> {
        let registration = match Registration::try_from_parts(name, email, password) {
            Ok(registration) => registration,
            Err(error) => return writeln!(output, "error: {error}"),
        };
        let notification = match self.auth.register(&registration).await {
            Ok(()) => Notification::success("Registered successfully"),
            Err(error) => {
                warn!(error = %error, "registration failed");
                Notification::error("Failed to register")
            }
        };
        self.dashboard.show_notification(notification);
        Ok(())
    }

    fn print_table<W: Write>(&self, output: &mut W) -> io::Result<()> {
        output.write_all(render::table(&self.dashboard.view().records).as_bytes())
    }

    fn print_form<W: Write>(&self, output: &mut W) -> io::Result<()> {
        output.write_all(render::form(&self.dashboard.view()).as_bytes())
    }

    fn print_detail<W: Write>(&self, output: &mut W) -> io::Result<()> {
        let view = self.dashboard.view();
        match &view.selected {
            Some(selected) => {
                output.write_all(render::detail(selected, view.detail.as_ref()).as_bytes())
            }
            None => Ok(()),
        }
    }
}
