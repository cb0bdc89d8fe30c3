//! `marketlog`: command-line front end for the adverts marketplace and the
//! cow logger.
//!
//! ```bash
//! marketlog login --identifier farmer@example.com --password secret1
//! marketlog adverts --page 2 --search tractor
//! marketlog add-address --profile <doc id> --street "Main St 1" --city Bern
//! marketlog add-logger --title "Milking" --image cow.jpg
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::sync::watch;

use marketlog::api::AdvertQuery;
use marketlog::config::{Config, CredentialProvider, SessionStore};
use marketlog::context::AppContext;
use marketlog::model::UploadFile;
use marketlog::ui::forms::{
    AddressFormIntent, AdvertFormIntent, FieldErrors, LoggerFormIntent, LoginFormIntent,
    RegisterFormIntent,
};
use marketlog::ui::{settled, ActionStatus};
use marketlog::{logging, view, RequestState};

#[derive(Parser)]
#[command(name = "marketlog")]
#[command(version)]
#[command(about = "Browse adverts and keep the cow logger from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config_dir>/marketlog/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Strapi root URL, overrides the config file and environment
    #[arg(long, global = true)]
    base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session
    Login {
        /// Email or username
        #[arg(long)]
        identifier: String,
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to --password
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// List adverts, newest first
    Adverts {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Category document id
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
    },

    /// Show one advert
    Advert { id: String },

    /// List advert categories
    Categories,

    /// Publish an advert and attach it to a profile
    AddAdvert {
        /// Profile document id
        #[arg(long)]
        profile: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        price: String,
        /// Category document id
        #[arg(long)]
        category: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete an advert
    DeleteAdvert { id: String },

    /// Show a profile with its addresses and adverts
    Profile { id: String },

    /// Create an address and attach it to a profile
    AddAddress {
        /// Profile document id
        #[arg(long)]
        profile: String,
        #[arg(long)]
        street: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        postal_code: Option<String>,
        #[arg(long)]
        country: Option<String>,
    },

    /// List cow logger entries
    Loggers {
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Add a cow logger entry, optionally with a photo
    AddLogger {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init_tracing("warn");
    let cli = Cli::parse();

    let path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = Config::load_with_base_url(&path, cli.base_url)?;

    let session_path = config.session.resolved_path();
    let sessions = SessionStore::open(session_path.clone())
        .with_context(|| format!("Failed to open session file {}", session_path.display()))?;
    let credentials: Arc<dyn CredentialProvider> = Arc::new(sessions);
    let context = AppContext::new(config, credentials)?;

    run(&context, cli.command).await
}

async fn run(context: &AppContext, command: Commands) -> anyhow::Result<ExitCode> {
    let page_size = context.config().ui.page_size;

    match command {
        Commands::Login {
            identifier,
            password,
        } => {
            let holder = context.auth_holder();
            holder.edit_login(LoginFormIntent::Identifier(identifier));
            holder.edit_login(LoginFormIntent::Password(password));
            match holder.login() {
                Ok(()) => Ok(action_result(holder.status()).await),
                Err(errors) => Ok(field_errors(&errors)),
            }
        }
        Commands::Register {
            username,
            email,
            password,
            confirm_password,
        } => {
            let holder = context.auth_holder();
            let confirm = confirm_password.unwrap_or_else(|| password.clone());
            holder.edit_register(RegisterFormIntent::Username(username));
            holder.edit_register(RegisterFormIntent::Email(email));
            holder.edit_register(RegisterFormIntent::Password(password));
            holder.edit_register(RegisterFormIntent::ConfirmPassword(confirm));
            match holder.register() {
                Ok(()) => Ok(action_result(holder.status()).await),
                Err(errors) => Ok(field_errors(&errors)),
            }
        }
        Commands::Logout => {
            context.auth_holder().logout()?;
            println!("Signed out");
            Ok(ExitCode::SUCCESS)
        }
        Commands::Whoami => {
            let holder = context.auth_holder();
            if !holder.is_logged_in() {
                eprintln!("Not signed in");
                return Ok(ExitCode::FAILURE);
            }
            holder.load_me();
            Ok(show(holder.user(), view::user_detail).await)
        }
        Commands::Adverts {
            page,
            category,
            search,
        } => {
            let holder = context.adverts_holder();
            holder.load_adverts(AdvertQuery {
                page,
                page_size,
                category,
                search,
            });
            Ok(show(holder.adverts(), view::advert_list).await)
        }
        Commands::Advert { id } => {
            let holder = context.adverts_holder();
            holder.load_advert(&id);
            Ok(show(holder.advert(), view::advert_detail).await)
        }
        Commands::Categories => {
            let holder = context.adverts_holder();
            holder.load_categories();
            Ok(show(holder.categories(), view::category_list).await)
        }
        Commands::AddAdvert {
            profile,
            title,
            price,
            category,
            description,
            location,
        } => {
            let holder = context.adverts_holder();
            holder.edit_form(AdvertFormIntent::Title(title));
            holder.edit_form(AdvertFormIntent::Price(price));
            holder.edit_form(AdvertFormIntent::Category(Some(category)));
            holder.edit_form(AdvertFormIntent::Description(description.unwrap_or_default()));
            holder.edit_form(AdvertFormIntent::Location(location.unwrap_or_default()));
            match holder.create_advert(&profile) {
                Ok(()) => Ok(action_result(holder.status()).await),
                Err(errors) => Ok(field_errors(&errors)),
            }
        }
        Commands::DeleteAdvert { id } => {
            let holder = context.adverts_holder();
            holder.delete_advert(&id);
            Ok(action_result(holder.status()).await)
        }
        Commands::Profile { id } => {
            let holder = context.profile_holder();
            holder.load_profile(&id);
            Ok(show(holder.profile(), view::profile_detail).await)
        }
        Commands::AddAddress {
            profile,
            street,
            city,
            postal_code,
            country,
        } => {
            let holder = context.profile_holder();
            holder.edit_address(AddressFormIntent::Street(street));
            holder.edit_address(AddressFormIntent::City(city));
            holder.edit_address(AddressFormIntent::PostalCode(postal_code.unwrap_or_default()));
            holder.edit_address(AddressFormIntent::Country(country.unwrap_or_default()));
            match holder.create_address(&profile) {
                Ok(()) => Ok(action_result(holder.status()).await),
                Err(errors) => Ok(field_errors(&errors)),
            }
        }
        Commands::Loggers { page } => {
            let holder = context.logger_holder();
            holder.load_entries(page);
            Ok(show(holder.entries(), view::logger_list).await)
        }
        Commands::AddLogger {
            title,
            description,
            image,
        } => {
            let upload = match image {
                Some(path) => Some(
                    UploadFile::from_path(&path)
                        .with_context(|| format!("Failed to read image {}", path.display()))?,
                ),
                None => None,
            };
            let holder = context.logger_holder();
            holder.edit_form(LoggerFormIntent::Title(title));
            holder.edit_form(LoggerFormIntent::Description(description.unwrap_or_default()));
            match holder.create_entry(upload) {
                Ok(()) => Ok(action_result(holder.status()).await),
                Err(errors) => Ok(field_errors(&errors)),
            }
        }
    }
}

/// Wait for a slot to settle and print it.
async fn show<T, F>(mut slot: watch::Receiver<RequestState<T>>, body: F) -> ExitCode
where
    T: Clone,
    F: FnOnce(&T) -> String,
{
    let state = settled(&mut slot).await;
    print_state(&state, body)
}

async fn action_result(status: &ActionStatus) -> ExitCode {
    let mut outcome = status.outcome();
    let state = settled(&mut outcome).await;
    print_state(&state, String::clone)
}

fn print_state<T>(state: &RequestState<T>, body: impl FnOnce(&T) -> String) -> ExitCode {
    let Some(text) = view::render(state, body) else {
        return ExitCode::SUCCESS;
    };
    if state.error_message().is_some() {
        eprintln!("{}", text);
        ExitCode::FAILURE
    } else {
        println!("{}", text);
        ExitCode::SUCCESS
    }
}

fn field_errors(errors: &FieldErrors) -> ExitCode {
    for (field, message) in errors {
        eprintln!("{}: {}", field, message);
    }
    ExitCode::from(2)
}
