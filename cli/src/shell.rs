//! Interactive command loop.

use std::io::{self, BufRead, Write};

use todo_core::{Interaction, Outcome, SyncError, TodoId, TodoSession, Transport};

use crate::terminal::Terminal;

pub const HELP: &str = "\
commands:
  add <title> [| <description>]   create a todo
  retry                           resubmit the last add that failed
  toggle <id>                     flip completed
  delete <id>                     delete after confirmation
  list                            show the list again
  reload                          fetch the list from the server
  help                            show this help
  quit                            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Add { title: String, description: String },
    Retry,
    Toggle(String),
    Delete(String),
    List,
    Reload,
    Help,
    Quit,
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let command = match word {
        "add" | "a" => {
            let (title, description) = rest.split_once('|').unwrap_or((rest, ""));
            ShellCommand::Add {
                title: title.to_string(),
                description: description.to_string(),
            }
        }
        "retry" => ShellCommand::Retry,
        "toggle" | "t" => ShellCommand::Toggle(required_id(word, rest)?),
        "delete" | "rm" => ShellCommand::Delete(required_id(word, rest)?),
        "list" | "ls" => ShellCommand::List,
        "reload" => ShellCommand::Reload,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("unknown command `{other}`, try `help`")),
    };
    Ok(Some(command))
}

fn required_id(word: &str, rest: &str) -> Result<String, String> {
    if rest.is_empty() {
        return Err(format!("usage: {word} <id>"));
    }
    Ok(rest.to_string())
}

/// Resolve what the user typed to the id of a local record, falling back to
/// parsing it so the session can report it as unknown.
pub fn resolve_id<T, I>(session: &TodoSession<T, I>, key: &str) -> TodoId
where
    T: Transport,
    I: Interaction,
{
    session
        .state()
        .find_by_key(key)
        .map(|todo| todo.id.clone())
        .unwrap_or_else(|| TodoId::parse(key))
}

pub fn render<T: Transport, I: Interaction>(
    session: &TodoSession<T, I>,
    out: &mut impl Write,
) -> io::Result<()> {
    write!(out, "{}", session.view())?;
    out.flush()
}

/// Load once, then read and execute commands until `quit` or end of input.
pub fn run<T, R, W>(
    session: &mut TodoSession<T, Terminal<R, W>>,
    out: &mut impl Write,
) -> io::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    session.load_all();
    render(session, out)?;

    loop {
        session.interaction_mut().prompt("> ");
        let Some(line) = session.interaction_mut().read_line()? else {
            break;
        };
        match parse(&line) {
            Ok(None) => {}
            Ok(Some(ShellCommand::Quit)) => break,
            Ok(Some(command)) => {
                execute(session, command, out)?;
            }
            Err(message) => session.interaction_mut().say(&message),
        }
    }
    Ok(())
}

/// Load the list, perform one command, and print the list.
///
/// Returns `false` when the gateway rejected the mutation.
pub fn run_once<T, R, W>(
    session: &mut TodoSession<T, Terminal<R, W>>,
    command: ShellCommand,
    out: &mut impl Write,
) -> io::Result<bool>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    session.load_all();
    execute(session, command, out)
}

fn execute<T, R, W>(
    session: &mut TodoSession<T, Terminal<R, W>>,
    command: ShellCommand,
    out: &mut impl Write,
) -> io::Result<bool>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    let result = match command {
        ShellCommand::Add { title, description } => session.create(&title, &description),
        ShellCommand::Retry => session.submit_draft(),
        ShellCommand::Toggle(key) => {
            let id = resolve_id(session, &key);
            session.toggle_complete(&id)
        }
        ShellCommand::Delete(key) => {
            let id = resolve_id(session, &key);
            session.delete(&id)
        }
        ShellCommand::Reload => {
            session.load_all();
            Ok(Outcome::Applied)
        }
        ShellCommand::List => Ok(Outcome::Applied),
        ShellCommand::Help => {
            session.interaction_mut().say(HELP);
            return Ok(true);
        }
        ShellCommand::Quit => return Ok(true),
    };
    let applied = result.is_ok();
    report(session.interaction_mut(), result);
    render(session, out)?;
    Ok(applied)
}

/// Explain outcomes that sent nothing. Failures were already announced by the
/// session.
pub fn report<R, W>(terminal: &mut Terminal<R, W>, result: Result<Outcome, SyncError>)
where
    R: BufRead,
    W: Write,
{
    match result {
        Ok(Outcome::InvalidInput) => terminal.say("a title is required"),
        Ok(Outcome::UnknownId) => terminal.say("no todo with that id"),
        Ok(Outcome::Declined) => terminal.say("kept"),
        Ok(Outcome::Applied) | Err(_) => {}
    }
}
