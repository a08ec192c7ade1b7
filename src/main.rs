use std::path::PathBuf;

use namecheck_tui::app::{self, RunOptions};

const HELP: &str = "NameCheck-TUI — Generate candidate profile links, domains and emails for a username.

  --version, -V          Show version and exit
  --help,    -h          Show this help message
  --list USERNAME        Print every generated link for USERNAME and exit
  --json                 With --list, print JSON instead of text
  --config PATH          Read configuration from PATH";

enum Mode {
    Interactive,
    Exit,
    List { username: String, json: bool },
}

fn main() {
    let mut opts = RunOptions::default();
    let mode = match parse_args(std::env::args().skip(1), &mut opts) {
        Ok(mode) => mode,
        Err(message) => {
            eprintln!("error: {message}\n\n{HELP}");
            std::process::exit(2);
        }
    };

    match mode {
        Mode::Exit => {}
        Mode::List { username, json } => match app::list(&opts, &username, json) {
            Ok(out) if json => println!("{out}"),
            Ok(out) => print!("{out}"),
            Err(err) => {
                eprintln!("error: {err:?}");
                std::process::exit(1);
            }
        },
        Mode::Interactive => {
            if let Err(err) = namecheck_tui::run(opts) {
                eprintln!("error: {err:?}");
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(
    mut args: impl Iterator<Item = String>,
    opts: &mut RunOptions,
) -> Result<Mode, String> {
    let mut exit = false;
    let mut list: Option<String> = None;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("NameCheck-TUI {}", namecheck_tui::VERSION);
                exit = true;
            }
            "--help" | "-h" => {
                println!("{HELP}");
                exit = true;
            }
            "--list" => {
                let username = args.next().ok_or("--list needs a USERNAME")?;
                list = Some(username);
            }
            "--json" => json = true,
            "--config" => {
                let path = args.next().ok_or("--config needs a PATH")?;
                opts.config_file = Some(PathBuf::from(path));
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    if exit {
        return Ok(Mode::Exit);
    }
    match list {
        Some(username) => Ok(Mode::List { username, json }),
        None if json => Err("--json only applies to --list".into()),
        None => Ok(Mode::Interactive),
    }
}
