//! Operator commands read from stdin
//!
//! Each line stands in for a user interaction in the admin page.

/// A parsed stdin line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Click the bell
    Toggle,
    /// Click somewhere inside the widget
    ClickInside,
    /// Click elsewhere on the page
    ClickOutside,
    /// Fetch now instead of waiting for the next tick
    Refresh,
    /// Print the widget markup
    Show,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  toggle | t     click the bell
  inside | i     click inside the widget
  outside | o    click elsewhere on the page
  refresh | r    fetch now
  show | s       print the widget markup
  help | ?       show this help
  quit | q       exit";

impl Command {
    pub fn parse(line: &str) -> Self {
        match line.trim().to_ascii_lowercase().as_str() {
            "toggle" | "t" | "bell" => Self::Toggle,
            "inside" | "i" => Self::ClickInside,
            "outside" | "o" | "click" => Self::ClickOutside,
            "refresh" | "r" => Self::Refresh,
            "show" | "s" | "" => Self::Show,
            "help" | "?" | "h" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.trim().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("toggle"), Command::Toggle);
        assert_eq!(Command::parse("  T \n"), Command::Toggle);
        assert_eq!(Command::parse("o"), Command::ClickOutside);
        assert_eq!(Command::parse("inside"), Command::ClickInside);
        assert_eq!(Command::parse("REFRESH"), Command::Refresh);
        assert_eq!(Command::parse(""), Command::Show);
        assert_eq!(Command::parse("q"), Command::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Command::parse(" reply all "),
            Command::Unknown("reply all".to_string())
        );
    }
}
