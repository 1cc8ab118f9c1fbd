//! Account commands: login, register, logout, whoami.

use clap::Args;
use secrecy::SecretString;

use bistro_client::forms::RegisterForm;
use bistro_core::UserRole;

use super::App;
use crate::error::CliError;
use crate::output;

#[derive(Args)]
pub struct LoginArgs {
    #[arg(short, long)]
    email: String,

    #[arg(short, long, env = "BISTRO_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args)]
pub struct RegisterArgs {
    #[arg(short, long)]
    username: String,

    #[arg(short, long)]
    email: String,

    #[arg(short, long, env = "BISTRO_PASSWORD", hide_env_values = true)]
    password: String,

    /// Delivery address
    #[arg(short, long)]
    address: Option<String>,

    /// Account role (`customer` or `admin`)
    #[arg(short, long, default_value_t = UserRole::Customer)]
    role: UserRole,
}

pub async fn login(app: &App, args: LoginArgs) -> Result<(), CliError> {
    let password = SecretString::from(args.password);
    let user = app.auth().login(&args.email, &password).await?;
    output::line(format_args!("Logged in as {} ({})", user.username, user.role));
    Ok(())
}

pub async fn register(app: &App, args: RegisterArgs) -> Result<(), CliError> {
    let form = RegisterForm {
        username: args.username,
        email: args.email,
        password: SecretString::from(args.password),
        address: args.address,
        role: args.role,
    };
    let response = app.auth().register(&form).await?;
    output::line(
        response
            .message
            .as_deref()
            .unwrap_or("Registration successful"),
    );
    output::line("You can now log in with `bistro login`.");
    Ok(())
}

pub async fn logout(app: &App) {
    app.auth().logout().await;
    output::line("Logged out.");
}

pub fn whoami(app: &App) {
    let Some(user) = app.api.session().user() else {
        output::line("Not logged in.");
        return;
    };
    output::line(format_args!("{} (#{}, {})", user.username, user.id, user.role));
    if let Some(email) = &user.email {
        output::line(format_args!("Email:   {email}"));
    }
    if let Some(address) = &user.address {
        output::line(format_args!("Address: {address}"));
    }
}
