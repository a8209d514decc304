mod repl;

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use chatpad::api::{ApiError, build_chat_api};
use chatpad::auth::{Field, LoginForm, MockAuth, RegisterForm};
use chatpad::chat::ChatStore;
use chatpad::config::{AppConfig, ConfigError};
use chatpad::error::UserFacing;
use chatpad::session::{SessionError, UserSession};
use chatpad::storage::{FileStore, KeyValueStore};
use clap::{Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("not logged in; run `chatpad login` first")]
    NotLoggedIn,
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("chat backend error: {0}")]
    Api(#[from] ApiError),
    #[error("{}", describe_session_error(.0))]
    Session(#[from] SessionError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn describe_session_error(err: &SessionError) -> String {
    match err {
        SessionError::Invalid(fields) => fields
            .iter()
            .map(|f| format!("{}: {}", field_label(f.field), f.message))
            .collect::<Vec<_>>()
            .join("; "),
        SessionError::Auth(auth) => auth.user_message(),
    }
}

fn field_label(field: Field) -> &'static str {
    match field {
        Field::Name => "Name",
        Field::Email => "Email",
        Field::Mobile => "Mobile",
        Field::Password => "Password",
        Field::ConfirmPassword => "Confirm password",
    }
}

#[derive(Parser, Debug)]
#[command(name = "chatpad", about = "Terminal chat client with mock auth and canned replies")]
struct Cli {
    /// JSON file standing in for browser local storage.
    #[arg(long, env = "CHATPAD_STORE", default_value = ".chatpad/store.json")]
    store: PathBuf,

    /// Log at debug level instead of warnings only.
    #[arg(long, short, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        mobile: String,
        #[arg(long, env = "CHATPAD_PASSWORD")]
        password: String,
    },
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "CHATPAD_PASSWORD")]
        password: String,
    },
    Logout,
    Whoami,
    /// Interactive chat; type `/help` for commands.
    Chat,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN })
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::from_env()?;
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(&cli.store));
    let session = UserSession::new(MockAuth::new(store, config.auth_delay));
    session.initialize();

    match cli.command {
        Command::Register { name, email, mobile, password } => {
            let form = RegisterForm { name, email, mobile, confirm_password: password.clone(), password };
            let user = session.register(&form).await?;
            println!("registered {} <{}>; now run `chatpad login`", user.name, user.email);
        }
        Command::Login { email, password } => {
            let user = session.login(&LoginForm { email, password }).await?;
            println!("logged in as {} <{}>", user.name, user.email);
        }
        Command::Logout => {
            session.logout().await;
            println!("logged out");
        }
        Command::Whoami => match session.snapshot().user {
            Some(user) => println!("{} <{}> (mobile {}, since {})", user.name, user.email, user.mobile, user.created_at),
            None => return Err(CliError::NotLoggedIn),
        },
        Command::Chat => {
            let Some(user) = session.snapshot().user else {
                return Err(CliError::NotLoggedIn);
            };
            let chat = ChatStore::new(build_chat_api(&config)?);
            println!("hi {}! type a message, or /help", user.name);
            repl::run(&chat).await?;
        }
    }
    Ok(())
}
