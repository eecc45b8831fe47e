use {
    anyhow::{Result, bail},
    std::path::PathBuf,
};

pub const USAGE: &str = "\
Usage: profiles [--load FILE]... [--log-dir DIR] COMMAND

Commands:
  list                 list registered profiles
  show ID              print a profile as JSON
  check ID SYMBOL...   split symbols into valid and invalid
  segment ID TEXT      split a phoneme string into the profile's symbols
  find SYMBOL          list profiles that contain SYMBOL
  compat ID ID         compare two phoneme sets";

#[derive(Debug, PartialEq)]
pub enum Command {
    List,
    Show(String),
    Check(String, Vec<String>),
    Segment(String, String),
    Find(String),
    Compat(String, String),
}

#[derive(Debug, PartialEq)]
pub struct Args {
    pub files: Vec<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub command: Command,
}

pub fn parse(args: &[String]) -> Result<Args> {
    let mut files = Vec::new();
    let mut log_dir = None;
    let mut rest = args;
    loop {
        match rest {
            [flag, value, tail @ ..] if flag == "--load" => {
                files.push(PathBuf::from(value));
                rest = tail;
            }
            [flag, value, tail @ ..] if flag == "--log-dir" => {
                log_dir = Some(PathBuf::from(value));
                rest = tail;
            }
            _ => break,
        }
    }

    let command = match rest {
        [cmd] if cmd == "list" => Command::List,
        [cmd, id] if cmd == "show" => Command::Show(id.clone()),
        [cmd, id, symbols @ ..] if cmd == "check" && !symbols.is_empty() => {
            Command::Check(id.clone(), symbols.to_vec())
        }
        [cmd, id, text] if cmd == "segment" => Command::Segment(id.clone(), text.clone()),
        [cmd, symbol] if cmd == "find" => Command::Find(symbol.clone()),
        [cmd, a, b] if cmd == "compat" => Command::Compat(a.clone(), b.clone()),
        [] => bail!("missing command"),
        [cmd, ..] => bail!("bad arguments for {:?}", cmd),
    };

    Ok(Args {
        files,
        log_dir,
        command,
    })
}
