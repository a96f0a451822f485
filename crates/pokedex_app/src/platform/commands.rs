use pokedex_core::Msg;

pub const HELP: &str = "\
Commands:
  more | <enter>     load the next page
  search [text]      filter by name or number (empty clears)
  type <name>        toggle a type filter
  types              list available types
  retry              retry after an error
  dismiss            hide the notification
  show <name>        open details
  back               close details
  help               show this help
  quit               exit";

/// One line of terminal input, or an engine completion forwarded by the
/// effect runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    ListTypes,
    Help,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match (verb.to_ascii_lowercase().as_str(), rest) {
        ("" | "more", "") => Command::Dispatch(Msg::EndReached),
        ("search", text) => Command::Dispatch(Msg::SearchChanged(text.to_string())),
        ("type", name) if !name.is_empty() => {
            Command::Dispatch(Msg::CategoryTapped(name.to_lowercase()))
        }
        ("types", "") => Command::ListTypes,
        ("retry", "") => Command::Dispatch(Msg::RetryTapped),
        ("dismiss", "") => Command::Dispatch(Msg::NotificationDismissed),
        ("show", name) if !name.is_empty() => {
            Command::Dispatch(Msg::DetailRequested(name.to_lowercase()))
        }
        ("back", "") => Command::Dispatch(Msg::DetailClosed),
        ("help" | "?", "") => Command::Help,
        ("quit" | "exit", "") => Command::Quit,
        _ => Command::Unknown(line.to_string()),
    }
}
