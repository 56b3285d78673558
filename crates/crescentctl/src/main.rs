use clap::{Parser, Subcommand};
use crescent::geometry::Point;
use crescent::sys::protocol::Command;
use crescent::sys::server::SOCKET_PATH;
use std::io::{BufRead, BufReader, Write};
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "crescentctl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Expand the menu if collapsed, collapse it otherwise
    Toggle,
    /// Expand the menu
    Expand,
    /// Collapse the menu
    Collapse,
    /// Scroll the option list by DY pixels
    Scroll {
        #[arg(allow_hyphen_values = true)]
        dy: f64,
    },
    /// Pointer leaves the option list
    Leave,
    /// Click a row of the option list
    Pick { row: usize },
    /// Press and release at a point
    Click { x: f64, y: f64 },
    /// Drag from one point to another over the grid
    Swipe { x0: f64, y0: f64, x1: f64, y1: f64 },
    /// Previous grid page
    Prev,
    /// Next grid page
    Next,
    /// Print the menu state
    Status,
}

impl From<Commands> for Command {
    fn from(c: Commands) -> Self {
        match c {
            Commands::Toggle => Command::Toggle,
            Commands::Expand => Command::Expand,
            Commands::Collapse => Command::Collapse,
            Commands::Scroll { dy } => Command::Scroll(dy),
            Commands::Leave => Command::Leave,
            Commands::Pick { row } => Command::Pick(row),
            Commands::Click { x, y } => Command::Click(Point::new(x, y)),
            Commands::Swipe { x0, y0, x1, y1 } => Command::Swipe {
                from: Point::new(x0, y0),
                to: Point::new(x1, y1),
            },
            Commands::Prev => Command::Prev,
            Commands::Next => Command::Next,
            Commands::Status => Command::Status,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let reply = send_command(Command::from(cli.command))?;
    if let Some(err) = reply.strip_prefix("error: ") {
        anyhow::bail!("{}", err);
    }
    println!("{}", reply);
    Ok(())
}

fn send_command(cmd: Command) -> anyhow::Result<String> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to crescent at {}: {}. Is crescent running?",
            SOCKET_PATH,
            e
        )
    })?;

    log::debug!("Sending '{}'", cmd);
    writeln!(stream, "{}", cmd)?;

    let mut reply = String::new();
    BufReader::new(stream).read_line(&mut reply)?;
    Ok(reply.trim_end().to_string())
}
