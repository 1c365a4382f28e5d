use std::path::PathBuf;
use std::sync::Arc;

use authgate::prelude::*;
use authgate::{ConfigError, FieldErrors, ReqwestTransport, ENDPOINT_VAR};
use clap::{Parser, Subcommand};

type Client = ApiClient<ReqwestTransport, Arc<dyn SessionStore>>;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{}", describe_fields(.0))]
    Invalid(FieldErrors),
    #[error("{0}")]
    Rejected(String),
    #[error(transparent)]
    Authgate(#[from] AuthgateError),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        Self::Authgate(err.into())
    }
}

fn describe_fields(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "signin-cli", about = "Sign up, sign in, and browse gated routes")]
struct Cli {
    /// API base URL. Defaults to AUTHGATE_ENDPOINT, then http://localhost:5000/api.
    #[arg(long)]
    endpoint: Option<String>,

    /// Where the session survives between runs.
    #[arg(long, env = "AUTHGATE_SESSION_FILE", default_value = ".authgate/session.json")]
    session_file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account.
    Register {
        #[arg(long)]
        id: String,
        #[arg(long, env = "AUTHGATE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: Option<String>,
    },
    /// Sign in and keep the session.
    SignIn {
        #[arg(long)]
        id: String,
        #[arg(long, env = "AUTHGATE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Show the signed-in user.
    Whoami,
    /// Forget the stored session.
    SignOut,
    /// Ask the gate what happens when opening a route.
    Visit { path: String },
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn register(client: &Client, form: SignUpForm) -> Result<(), CliError> {
    let creds = form.validate().map_err(CliError::Invalid)?;
    let state = FormState::new();

    let outcome = state
        .submit(client.register(&creds.identifier, &creds.secret))
        .await;
    if outcome.is_ok() {
        println!("account {} created, you can sign in now", creds.identifier);
        return Ok(());
    }
    Err(rejected(&state))
}

async fn sign_in(client: &Client, form: SignInForm) -> Result<(), CliError> {
    let creds = form.validate().map_err(CliError::Invalid)?;
    let state = FormState::new();

    let outcome = state
        .submit(client.authenticate(&creds.identifier, &creds.secret))
        .await;
    if outcome.is_ok() {
        println!("signed in as {}", creds.identifier);
        return Ok(());
    }
    Err(rejected(&state))
}

fn rejected(state: &FormState) -> CliError {
    let message = state
        .feedback()
        .map(|fb| match fb {
            FormFeedback::Field { field, message } => format!("{field}: {message}"),
            other => other.message().to_string(),
        })
        .unwrap_or_else(|| "request failed".to_string());
    CliError::Rejected(message)
}

async fn whoami(client: &Client) -> Result<(), CliError> {
    match client.current_user().await {
        Ok(profile) => {
            println!("{}", profile.id);
            Ok(())
        }
        Err(err) => Err(CliError::Rejected(
            FormFeedback::from_error(&err).message().to_string(),
        )),
    }
}

fn visit<S: SessionStore>(store: S, path: &str) -> String {
    let nav = Navigator::new(AuthGate::new(store), path);

    if nav.current() == Route::from_path(path) {
        format!("{path} renders")
    } else {
        format!("{path} redirects to {}", nav.current().path())
    }
}

fn sign_up_form(id: String, password: String, confirm_password: Option<String>) -> SignUpForm {
    let confirm_password = confirm_password.unwrap_or_else(|| password.clone());
    SignUpForm {
        id,
        password,
        confirm_password,
    }
}

/// `--endpoint` wins over `AUTHGATE_ENDPOINT`, so a bad variable can be
/// overridden from the command line.
fn load_config(
    endpoint: Option<String>,
    session_file: PathBuf,
    env: impl Fn(&str) -> Option<String>,
) -> Result<ClientConfig, ConfigError> {
    let config = ClientConfig::from_lookup(|name| match (&endpoint, name) {
        (Some(endpoint), ENDPOINT_VAR) => Some(endpoint.clone()),
        _ => env(name),
    })?;
    Ok(config.session_file(session_file))
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.endpoint, cli.session_file, |name| std::env::var(name).ok())?;
    let client = config.build_client()?;

    match cli.command {
        Command::Register {
            id,
            password,
            confirm_password,
        } => register(&client, sign_up_form(id, password, confirm_password)).await,
        Command::SignIn { id, password } => sign_in(&client, SignInForm { id, password }).await,
        Command::Whoami => whoami(&client).await,
        Command::SignOut => {
            client.sign_out();
            println!("signed out");
            Ok(())
        }
        Command::Visit { path } => {
            println!("{}", visit(client.store().clone(), &path));
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    authgate::init_tracing_with("warn");

    if let Err(e) = run(Cli::parse()).await {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
