//! Command-line client.
//!
//! Connects, optionally authenticates and selects a database, runs one command and prints the
//! result.

use resp_client::{client, ConnectInfo, DEFAULT_HOST, DEFAULT_PORT};

use bytes::Bytes;
use clap::{Parser, Subcommand};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "resp-cli", version, about = "Issue Redis commands")]
struct Cli {
    /// Server host
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Server port
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Database index, selected before running the command when non-zero
    #[arg(long, default_value_t = 0)]
    db: u32,

    /// Password, sent with AUTH before running the command
    #[arg(long)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    Echo {
        message: String,
    },
    /// Get the value of a hash field
    Hget {
        key: String,
        field: String,
    },
    /// Get all fields and values of a hash
    Hgetall {
        key: String,
    },
    /// Set the value of a hash field
    Hset {
        key: String,
        field: String,
        value: String,
    },
    /// Delete hash fields
    Hdel {
        key: String,
        #[arg(required = true)]
        fields: Vec<String>,
    },
    Hexists {
        key: String,
        field: String,
    },
    Hincrby {
        key: String,
        field: String,
        #[arg(allow_negative_numbers = true)]
        increment: i64,
    },
    Hincrbyfloat {
        key: String,
        field: String,
        #[arg(allow_negative_numbers = true)]
        increment: f64,
    },
    Hkeys {
        key: String,
    },
    Hlen {
        key: String,
    },
    Hvals {
        key: String,
    },
    Hstrlen {
        key: String,
        field: String,
    },
}

#[tokio::main]
async fn main() {
    // Logging goes to stderr so it never mixes with command output.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("(error) {}", err);
        process::exit(1);
    }
}

async fn run(cli: Cli) -> resp_client::Result<()> {
    let mut info = ConnectInfo::new(&cli.host, cli.port).with_database(cli.db);
    if let Some(password) = &cli.password {
        info = info.with_password(password);
    }

    let mut client = client::connect(info).await?;

    if cli.password.is_some() {
        client.auth().await?;
    }

    if client.database() != 0 {
        let db = client.database();
        client.select(db).await?;
    }

    match cli.command {
        Command::Ping => {
            if client.ping().await? {
                println!("PONG");
            }
        }
        Command::Echo { message } => println!("{}", client.echo(&message).await?),
        Command::Hget { key, field } => print_optional(client.hget(&key, &field).await?),
        Command::Hgetall { key } => print_list(&client.hgetall(&key).await?),
        Command::Hset { key, field, value } => {
            let created = client.hset(&key, &field, Bytes::from(value)).await?;
            println!("(integer) {}", created as i64);
        }
        Command::Hdel { key, fields } => {
            let fields: Vec<&str> = fields.iter().map(String::as_str).collect();
            println!("(integer) {}", client.hdel(&key, &fields).await?);
        }
        Command::Hexists { key, field } => {
            println!("(integer) {}", client.hexists(&key, &field).await? as i64)
        }
        Command::Hincrby {
            key,
            field,
            increment,
        } => println!("(integer) {}", client.hincrby(&key, &field, increment).await?),
        Command::Hincrbyfloat {
            key,
            field,
            increment,
        } => println!("{}", client.hincrbyfloat(&key, &field, increment).await?),
        Command::Hkeys { key } => print_list(&client.hkeys(&key).await?),
        Command::Hlen { key } => println!("(integer) {}", client.hlen(&key).await?),
        Command::Hvals { key } => print_list(&client.hvals(&key).await?),
        Command::Hstrlen { key, field } => {
            println!("(integer) {}", client.hstrlen(&key, &field).await?)
        }
    }

    client.close().await
}

fn print_optional(value: Option<String>) {
    match value {
        Some(value) => println!("{:?}", value),
        None => println!("(nil)"),
    }
}

fn print_list(values: &[String]) {
    if values.is_empty() {
        println!("(empty list)");
    }

    for (i, value) in values.iter().enumerate() {
        println!("{}) {:?}", i + 1, value);
    }
}
