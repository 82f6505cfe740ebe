use std::fmt::Debug;
use std::io::{self, Read};

use clap::{Arg, ArgAction, ArgMatches, Command};
use curlreq::curl::curl_parsers::remove_curl_cmd_header;
use curlreq::curl::join_continuations;
use curlreq::curl::parser::tokenize;
use curlreq::{CurlError, RequestInfo, Result, parse_curl};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RequestPart {
    Method,
    Url,
    BaseUrl,
    Uri,
    Headers,
    Body,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Debug,
    Json,
}

fn command_arg() -> Arg {
    Arg::new("command")
        .help("The input curl command string, or `-` to read it from stdin")
        .required(true)
        .index(1)
}

fn format_arg() -> Arg {
    Arg::new("format")
        .short('f')
        .long("format")
        .value_name("FORMAT")
        .help("Output format")
        .default_value("debug")
        .value_parser(clap::value_parser!(OutputFormat))
}

fn cli() -> Command {
    Command::new("curlreq")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A CLI tool to turn curl commands into structured HTTP requests")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("parse")
                .about("Parses a curl command into a request description")
                .arg(command_arg())
                .arg(
                    Arg::new("part")
                        .short('p')
                        .long("part")
                        .value_name("PART")
                        .help("Prints only one part of the request")
                        .required(false)
                        .value_parser(clap::value_parser!(RequestPart)),
                )
                .arg(format_arg())
                .arg(
                    Arg::new("join")
                        .short('j')
                        .long("join")
                        .help("Joins backslash line continuations before parsing")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("tokens")
                .about("Prints the tokens of a curl command")
                .arg(command_arg())
                .arg(format_arg()),
        )
}

fn read_command(matches: &ArgMatches) -> Result<String> {
    let command = matches
        .get_one::<String>("command")
        .map(String::as_str)
        .unwrap_or_default();

    if command == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(command.to_string())
    }
}

fn output_format(matches: &ArgMatches) -> OutputFormat {
    matches
        .get_one::<OutputFormat>("format")
        .copied()
        .unwrap_or(OutputFormat::Debug)
}

fn render<T: Serialize + Debug>(value: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Debug => Ok(format!("{:#?}", value)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
    }
}

fn render_part(req: &RequestInfo, part: RequestPart, format: OutputFormat) -> Result<String> {
    match part {
        RequestPart::Method => render(&req.method, format),
        RequestPart::Url => render(&req.url, format),
        RequestPart::BaseUrl => render(&req.base_url, format),
        RequestPart::Uri => render(&req.uri, format),
        RequestPart::Headers => render(&req.headers, format),
        RequestPart::Body => render(&req.body, format),
        RequestPart::Query => render(&req.query_params, format),
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("parse", sub_matches)) => {
            let mut command = read_command(sub_matches)?;
            if sub_matches.get_flag("join") {
                command = join_continuations(&command);
            }
            let format = output_format(sub_matches);

            let req = parse_curl(&command)?;
            let output = match sub_matches.get_one::<RequestPart>("part") {
                Some(part) => render_part(&req, *part, format)?,
                None => render(&req, format)?,
            };
            println!("{}", output);
        }
        Some(("tokens", sub_matches)) => {
            let command = read_command(sub_matches)?;
            let tokens = tokenize(remove_curl_cmd_header(&command)?);
            match output_format(sub_matches) {
                OutputFormat::Debug => {
                    for token in &tokens {
                        println!("{:?}", token);
                    }
                }
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tokens)?),
            }
        }
        _ => {
            cli().print_help()?;
            println!();
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let matches = cli().get_matches();
    if let Err(e) = run(&matches) {
        match e {
            CurlError::NotCurl => eprintln!("Error parsing curl command: {}", e),
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}
