//! REPL command parsing

use crate::model::FormField;

pub const HELP: &str = "\
Commands:
  list | reload          reload the current page
  next | prev            move one page forward / back
  page <n>               jump to page n
  per-page <n>           page size: 5, 10, 20 or 50
  new                    start a new contact
  edit <id>              edit an existing contact
  set <field> <value>    fill a form field (first_name, last_name, email, company)
  show                   show the form
  save                   create or update from the form
  cancel                 clear the form
  delete <id>            delete a contact (asks first)
  help                   this text
  quit                   exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Reload,
    Next,
    Prev,
    Page(u64),
    PerPage(u64),
    New,
    Edit(i64),
    Set(FormField, String),
    Show,
    Save,
    Cancel,
    Delete(i64),
    Help,
    Quit,
}

fn number<T: std::str::FromStr>(arg: Option<&str>, usage: &str) -> Result<T, String> {
    arg.and_then(|a| a.parse().ok())
        .ok_or_else(|| format!("Usage: {}", usage))
}

impl Command {
    /// Parse one input line. Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<Command>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let arg = (!rest.is_empty()).then_some(rest);

        let command = match name.to_ascii_lowercase().as_str() {
            "list" | "reload" => Command::Reload,
            "next" | "n" => Command::Next,
            "prev" | "p" => Command::Prev,
            "page" => Command::Page(number(arg, "page <n>")?),
            "per-page" | "per_page" => Command::PerPage(number(arg, "per-page <n>")?),
            "new" => Command::New,
            "edit" => Command::Edit(number(arg, "edit <id>")?),
            "set" => {
                let (field, value) = match rest.split_once(char::is_whitespace) {
                    Some((field, value)) => (field, value.trim()),
                    None => (rest, ""),
                };
                if field.is_empty() {
                    return Err("Usage: set <field> <value>".to_string());
                }
                Command::Set(field.parse()?, value.to_string())
            }
            "show" => Command::Show,
            "save" => Command::Save,
            "cancel" => Command::Cancel,
            "delete" | "rm" => Command::Delete(number(arg, "delete <id>")?),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line).unwrap().unwrap()
    }

    #[test]
    fn blank_line_is_nothing() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse("list"), Command::Reload);
        assert_eq!(parse("RELOAD"), Command::Reload);
        assert_eq!(parse("next"), Command::Next);
        assert_eq!(parse("quit"), Command::Quit);
    }

    #[test]
    fn numeric_arguments() {
        assert_eq!(parse("page 3"), Command::Page(3));
        assert_eq!(parse("per-page 20"), Command::PerPage(20));
        assert_eq!(parse("edit 12"), Command::Edit(12));
        assert_eq!(parse("delete 7"), Command::Delete(7));
        assert_eq!(
            Command::parse("page x").unwrap_err(),
            "Usage: page <n>"
        );
        assert!(Command::parse("delete").is_err());
    }

    #[test]
    fn set_keeps_spaces_in_value() {
        assert_eq!(
            parse("set company  A Brand new Job! Co. "),
            Command::Set(FormField::Company, "A Brand new Job! Co.".to_string())
        );
        assert_eq!(
            parse("set company"),
            Command::Set(FormField::Company, String::new())
        );
        assert!(Command::parse("set phone 555").is_err());
        assert!(Command::parse("set").is_err());
    }

    #[test]
    fn unknown_command_is_reported() {
        assert!(Command::parse("frobnicate")
            .unwrap_err()
            .starts_with("Unknown command"));
    }
}
