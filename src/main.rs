use anyhow::Result;
use chrono::{Local, TimeZone};
use clap::{Arg, ArgMatches, Command};
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod error;
mod identity;
mod mail;
mod remote;

use app::App;
use config::Config;
use mail::{Message, Thread};
use remote::RemoteClient;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("peermail")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Terminal client for a peer-addressed mail daemon")
        .arg(
            Arg::new("host")
                .long("host")
                .value_name("URL")
                .help("Daemon base URL (overrides the config file)"),
        )
        .subcommand_required(true)
        .subcommand(Command::new("inbox").about("List received messages"))
        .subcommand(Command::new("unread").about("List unread messages"))
        .subcommand(
            Command::new("show")
                .about("Show a message with its ancestor chain and direct replies")
                .arg(Arg::new("id").required(true).value_name("MESSAGE_ID")),
        )
        .subcommand(
            Command::new("send")
                .about("Send a new message")
                .arg(Arg::new("recipient").required(true).value_name("ADDRESS"))
                .arg(Arg::new("body").required(true).value_name("TEXT")),
        )
        .subcommand(
            Command::new("reply")
                .about("Reply to a message")
                .arg(Arg::new("parent").required(true).value_name("MESSAGE_ID"))
                .arg(Arg::new("body").required(true).value_name("TEXT")),
        )
        .subcommand(
            Command::new("set-key")
                .about("Install a new private key on the daemon")
                .arg(Arg::new("key").required(true).value_name("HEX_KEY")),
        )
        .subcommand(
            Command::new("set-host")
                .about("Point the client at a different daemon")
                .arg(Arg::new("host").required(true).value_name("URL")),
        )
        .subcommand(Command::new("whoami").about("Print the local address"))
        .get_matches();

    let config = match Config::load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::debug!(error = %e, "no usable config file, using defaults");
            Config::default()
        }
    };
    let host = matches
        .get_one::<String>("host")
        .cloned()
        .unwrap_or_else(|| config.host.clone());

    let remote = RemoteClient::new(host)?;
    let mut app = App::new(remote);
    app.seed_identity().await;

    match matches.subcommand() {
        Some(("inbox", _)) => run_inbox(&mut app).await?,
        Some(("unread", _)) => run_unread(&app).await?,
        Some(("show", sub)) => run_show(&mut app, arg(sub, "id")).await?,
        Some(("send", sub)) => run_send(&mut app, arg(sub, "recipient"), arg(sub, "body")).await?,
        Some(("reply", sub)) => run_reply(&mut app, arg(sub, "parent"), arg(sub, "body")).await?,
        Some(("set-key", sub)) => run_set_key(&mut app, arg(sub, "key")).await?,
        Some(("set-host", sub)) => run_set_host(&mut app, arg(sub, "host")).await?,
        Some(("whoami", _)) => run_whoami(&app),
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}

fn arg<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_default()
}

async fn run_inbox(app: &mut App) -> Result<()> {
    app.refresh().await?;
    let view = app.inbox();
    if view.is_empty() {
        println!("No messages yet");
        return Ok(());
    }
    for message in view {
        print_summary(message);
    }
    Ok(())
}

async fn run_unread(app: &App) -> Result<()> {
    let unread = app.fetch_unread().await?;
    if unread.is_empty() {
        println!("No unread messages");
        return Ok(());
    }
    for message in &unread {
        print_summary(message);
    }
    Ok(())
}

async fn run_show(app: &mut App, id: &str) -> Result<()> {
    app.refresh().await?;
    let Some(thread) = app.thread(id) else {
        println!("Unknown message id: {id}");
        return Ok(());
    };
    print_thread(&thread);

    let replies = app.store.replies_to(id);
    if !replies.is_empty() {
        println!("\nReplies:");
        for reply in replies {
            print_summary(reply);
        }
    }
    Ok(())
}

async fn run_send(app: &mut App, recipient: &str, body: &str) -> Result<()> {
    app.send(recipient, body, None).await?;
    // Only reached after the daemon acknowledged; a compose surface would
    // close here.
    println!("Message sent; it will appear after the next refresh.");
    Ok(())
}

async fn run_reply(app: &mut App, parent_id: &str, body: &str) -> Result<()> {
    app.refresh().await?;
    if app.send_reply(parent_id, body).await? {
        println!("Reply sent; it will appear after the next refresh.");
    } else {
        println!("Unknown message id: {parent_id}");
    }
    Ok(())
}

async fn run_set_key(app: &mut App, key: &str) -> Result<()> {
    app.set_key_and_refresh(key).await?;
    match app.identity.address() {
        Some(address) => println!("Key set; local address is now {address}"),
        None => println!("Key set; daemon did not report an address"),
    }
    Ok(())
}

async fn run_set_host(app: &mut App, host: &str) -> Result<()> {
    app.set_host_and_refresh(host).await?;
    let config = Config {
        host: host.to_string(),
    };
    if let Err(e) = config.save().await {
        warn!(error = %e, "failed to persist host");
    }
    println!("Host set to {host}");
    Ok(())
}

fn run_whoami(app: &App) {
    match app.identity.address() {
        Some(address) => println!("{address}"),
        None => println!("No identity set"),
    }
}

fn print_summary(message: &Message) {
    println!(
        "{}  {}  {}  {}",
        message.id,
        format_timestamp(message.timestamp),
        message.display_sender(),
        preview(&message.content),
    );
}

fn print_thread(thread: &Thread) {
    let chain_len = thread.len();
    for entry in thread.root_to_leaf() {
        let indent = "  ".repeat(chain_len - 1 - entry.depth);
        let author = if entry.author.is_mine() {
            "me"
        } else {
            entry.message.display_sender()
        };
        println!(
            "{indent}{} [{}] {}",
            author,
            format_timestamp(entry.message.timestamp),
            entry.message.content,
        );
    }
    if thread.truncated {
        println!("(thread truncated: parent chain is malformed)");
    }
}

fn format_timestamp(timestamp: u64) -> String {
    match Local.timestamp_opt(timestamp as i64, 0).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => timestamp.to_string(),
    }
}

/// Cut a body down to a one-line preview.
fn preview(text: &str) -> String {
    let one_line = text.replace('\n', " ");
    if one_line.chars().count() > 100 {
        let cut: String = one_line.chars().take(100).collect();
        format!("{cut}...")
    } else {
        one_line
    }
}
