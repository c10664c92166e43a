use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::error;

use meetup_maker_client::client::config::{self, ClientConfig};
use meetup_maker_client::client::cookies::{CookieJar, EMAIL_COOKIE, TOKEN_COOKIE};
use meetup_maker_client::client::session::SessionStore;
use meetup_maker_client::client::{Client, ClientError, ClientResult};

#[derive(Parser)]
#[command(name = "meetup-maker-client", about = "Command-line client for Meetup Maker")]
struct Args {
    /// WebSocket address of the Meetup Maker server
    #[arg(long, default_value = config::DEFAULT_ADDRESS)]
    address: String,

    /// Cookie file (defaults to ~/.cache/meetup-maker/cookies.json)
    #[arg(long)]
    cookie_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new account and store the issued session token
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Exchange credentials for a session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Re-login with the stored email/token cookies
    Resume,
    /// Check that the stored session is still alive
    Heartbeat,
    /// Forget the stored cookies
    Logout,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(err) = run(args).await {
        error!("{}", err);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> ClientResult<()> {
    let config = ClientConfig {
        address: args.address,
        cookie_file: args
            .cookie_file
            .unwrap_or_else(config::default_cookie_file),
        ..ClientConfig::default()
    };
    let mut jar = CookieJar::load(&config.cookie_file);
    let mut session = SessionStore::new();

    // Logout is purely local.
    if let Command::Logout = args.command {
        jar.remove(EMAIL_COOKIE);
        jar.remove(TOKEN_COOKIE);
        jar.store()?;
        session.clear();
        println!("Logged out");
        return Ok(());
    }

    let client = Client::connect(&config);
    println!("Connecting to Meetup Maker at {}", config.address);
    client.wait_connected().await?;

    match args.command {
        Command::Signup {
            first_name,
            last_name,
            email,
            password,
        } => {
            jar.set(EMAIL_COOKIE, &email);
            session.set_email(Some(email.clone()));

            let token = client.signup(&first_name, &last_name, &email, &password).await?;
            session.set_first_name(Some(first_name));
            session.set_token(Some(token.clone()));

            jar.set(TOKEN_COOKIE, &token);
            jar.store()?;
            println!("Hello {}", session.first_name().unwrap_or_default());
        }
        Command::Login { email, password } => {
            jar.set(EMAIL_COOKIE, &email);
            session.set_email(Some(email.clone()));

            let login = client.login(&email, &password).await?;
            session.set_first_name(Some(login.first_name));
            session.set_token(Some(login.token.clone()));

            jar.set(TOKEN_COOKIE, &login.token);
            jar.store()?;
            println!("Hello {}", session.first_name().unwrap_or_default());
        }
        Command::Resume => {
            let (email, token) = match (jar.get(EMAIL_COOKIE), jar.get(TOKEN_COOKIE)) {
                (Some(email), Some(token)) => (email.to_owned(), token.to_owned()),
                _ => return Err(ClientError::from("no stored session; log in first")),
            };
            println!("Resuming as {}", email);

            match client.validate_token(&email, &token).await {
                Ok(first_name) => {
                    session.set_email(Some(email));
                    session.set_first_name(Some(first_name));
                    session.set_token(Some(token));
                    println!("Hello {}", session.first_name().unwrap_or_default());
                }
                Err(ClientError::Refused(reason)) => {
                    // Stale token: the stored session is useless, forget it.
                    jar.remove(EMAIL_COOKIE);
                    jar.remove(TOKEN_COOKIE);
                    jar.store()?;
                    return Err(ClientError::Refused(reason));
                }
                Err(err) => return Err(err),
            }
        }
        Command::Heartbeat => {
            let token = jar
                .get(TOKEN_COOKIE)
                .ok_or_else(|| ClientError::from("no stored session; log in first"))?
                .to_owned();
            client.heartbeat(&token).await?;
            println!("Session alive");
        }
        Command::Logout => unreachable!("handled above"),
    }

    client.disconnect();
    Ok(())
}
