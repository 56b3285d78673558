//! Line protocol spoken over the control socket. One command per line, one
//! reply line per command.

use crate::geometry::Point;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Toggle,
    Expand,
    Collapse,
    /// Wheel scroll of the option list by `dy` pixels.
    Scroll(f64),
    Leave,
    /// Click on a row of the tripled list.
    Pick(usize),
    /// Press and release without movement.
    Click(Point),
    Swipe {
        from: Point,
        to: Point,
    },
    Prev,
    Next,
    Status,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command '{0}'")]
    Unknown(String),
    #[error("'{command}' expects {expected} argument(s), got {got}")]
    Arity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

fn numbers<T: FromStr>(
    command: &'static str,
    args: &[&str],
    expected: usize,
) -> Result<Vec<T>, CommandParseError> {
    if args.len() != expected {
        return Err(CommandParseError::Arity {
            command,
            expected,
            got: args.len(),
        });
    }
    args.iter()
        .map(|a| {
            a.parse::<T>()
                .map_err(|_| CommandParseError::InvalidNumber(a.to_string()))
        })
        .collect()
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().ok_or(CommandParseError::Empty)?;
        let args: Vec<&str> = parts.collect();

        let bare = |command: &'static str, value: Command| {
            numbers::<f64>(command, &args, 0).map(|_| value)
        };

        match name.to_ascii_lowercase().as_str() {
            "toggle" => bare("toggle", Command::Toggle),
            "expand" => bare("expand", Command::Expand),
            "collapse" => bare("collapse", Command::Collapse),
            "leave" => bare("leave", Command::Leave),
            "prev" => bare("prev", Command::Prev),
            "next" => bare("next", Command::Next),
            "status" => bare("status", Command::Status),
            "scroll" => {
                let n = numbers::<f64>("scroll", &args, 1)?;
                if !n[0].is_finite() {
                    return Err(CommandParseError::InvalidNumber(args[0].to_string()));
                }
                Ok(Command::Scroll(n[0]))
            }
            "pick" => numbers::<usize>("pick", &args, 1).map(|n| Command::Pick(n[0])),
            "click" => {
                let n = numbers::<f64>("click", &args, 2)?;
                Ok(Command::Click(Point::new(n[0], n[1])))
            }
            "swipe" => {
                let n = numbers::<f64>("swipe", &args, 4)?;
                Ok(Command::Swipe {
                    from: Point::new(n[0], n[1]),
                    to: Point::new(n[2], n[3]),
                })
            }
            _ => Err(CommandParseError::Unknown(name.to_string())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Toggle => write!(f, "toggle"),
            Command::Expand => write!(f, "expand"),
            Command::Collapse => write!(f, "collapse"),
            Command::Scroll(dy) => write!(f, "scroll {}", dy),
            Command::Leave => write!(f, "leave"),
            Command::Pick(row) => write!(f, "pick {}", row),
            Command::Click(p) => write!(f, "click {} {}", p.x, p.y),
            Command::Swipe { from, to } => {
                write!(f, "swipe {} {} {} {}", from.x, from.y, to.x, to.y)
            }
            Command::Prev => write!(f, "prev"),
            Command::Next => write!(f, "next"),
            Command::Status => write!(f, "status"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!("toggle".parse::<Command>(), Ok(Command::Toggle));
        assert_eq!("  STATUS ".parse::<Command>(), Ok(Command::Status));
        assert_eq!("scroll -35.5".parse::<Command>(), Ok(Command::Scroll(-35.5)));
        assert_eq!("pick 23".parse::<Command>(), Ok(Command::Pick(23)));
        assert_eq!(
            "click 450 120".parse::<Command>(),
            Ok(Command::Click(Point::new(450.0, 120.0)))
        );
        assert_eq!(
            "swipe 500 300 420 310".parse::<Command>(),
            Ok(Command::Swipe {
                from: Point::new(500.0, 300.0),
                to: Point::new(420.0, 310.0),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandParseError::Empty));
        assert_eq!(
            "jump 3".parse::<Command>(),
            Err(CommandParseError::Unknown("jump".to_string()))
        );
        assert_eq!(
            "scroll".parse::<Command>(),
            Err(CommandParseError::Arity {
                command: "scroll",
                expected: 1,
                got: 0
            })
        );
        assert_eq!(
            "toggle now".parse::<Command>(),
            Err(CommandParseError::Arity {
                command: "toggle",
                expected: 0,
                got: 1
            })
        );
        assert_eq!(
            "pick -1".parse::<Command>(),
            Err(CommandParseError::InvalidNumber("-1".to_string()))
        );
        assert_eq!(
            "scroll NaN".parse::<Command>(),
            Err(CommandParseError::InvalidNumber("NaN".to_string()))
        );
    }

    #[test]
    fn test_display_parses_back() {
        let commands = [
            Command::Scroll(70.0),
            Command::Pick(4),
            Command::Swipe {
                from: Point::new(10.0, 0.0),
                to: Point::new(70.5, 20.0),
            },
        ];
        for command in commands {
            assert_eq!(command.to_string().parse::<Command>(), Ok(command));
        }
    }
}
