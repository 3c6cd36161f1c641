use lexopt::{Arg, Parser};
use std::path::PathBuf;

pub(crate) const USAGE: &str = "\
Usage: gridsnake [-c|--config <PATH>]

Play Snake in the terminal.

Options:
  -c, --config <PATH>   Read configuration from the given file
  -h, --help            Show this help and exit
  -V, --version         Show the program version and exit
";

/// What the user asked for on the command line
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Invocation {
    Run { config: Option<PathBuf> },
    Help,
    Version,
}

impl Invocation {
    pub(crate) fn from_parser(mut parser: Parser) -> Result<Invocation, lexopt::Error> {
        let mut config = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('h') | Arg::Long("help") => return Ok(Invocation::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Invocation::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Invocation::Run { config })
    }
}
