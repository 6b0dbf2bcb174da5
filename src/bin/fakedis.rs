use clap::Parser;
use fakedis::{Config, Error, Server};
use std::path::PathBuf;
use tokio::io::{self, AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader};

/// Replays commands against a fresh in-memory server, one command per line, and prints each
/// reply the way redis-cli would.
#[derive(Parser, Debug)]
struct Args {
    #[command(flatten)]
    config: Config,

    /// File to read commands from; standard input when absent
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init();

    let args = Args::parse();
    let server = Server::with_config(args.config);

    match args.file {
        Some(path) => replay(&server, tokio::fs::File::open(path).await?).await,
        None => replay(&server, io::stdin()).await,
    }
}

async fn replay(server: &Server, input: impl AsyncRead + Unpin) -> Result<(), Error> {
    let mut client = server.client();
    let mut lines = BufReader::new(input).lines();
    let mut stdout = io::stdout();

    while let Some(line) = lines.next_line().await? {
        let argv = match split(&line) {
            Ok(argv) if argv.is_empty() => continue,
            Ok(argv) => argv,
            Err(err) => {
                stdout.write_all(format!("(error) {}\n", err).as_bytes()).await?;
                continue;
            }
        };

        let reply = client.execute(argv).await;
        let mut out = String::new();
        if !matches!(reply, fakedis::Frame::NoReply) {
            out.push_str(&format!("{}\n", reply));
        }
        while let Some(message) = client.try_next_message() {
            out.push_str(&format!("{}\n", message));
        }
        stdout.write_all(out.as_bytes()).await?;
    }

    stdout.flush().await?;
    Ok(())
}

/// Splits a command line on whitespace. Double quotes group an argument and understand the
/// `\"`, `\\`, `\n`, `\r` and `\t` escapes.
fn split(line: &str) -> Result<Vec<String>, &'static str> {
    let mut argv = Vec::new();
    let mut chars = line.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let Some(&first) = chars.peek() else {
            return Ok(argv);
        };

        let mut arg = String::new();
        if first == '"' {
            chars.next();
            loop {
                match chars.next() {
                    None => return Err("unbalanced quotes"),
                    Some('"') => break,
                    Some('\\') => match chars.next() {
                        Some('n') => arg.push('\n'),
                        Some('r') => arg.push('\r'),
                        Some('t') => arg.push('\t'),
                        Some(c) => arg.push(c),
                        None => return Err("unbalanced quotes"),
                    },
                    Some(c) => arg.push(c),
                }
            }
            if chars.peek().is_some_and(|c| !c.is_whitespace()) {
                return Err("closing quote must be followed by a space");
            }
        } else {
            while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                arg.push(c);
            }
        }
        argv.push(arg);
    }
}
