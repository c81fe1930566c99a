use anyhow::Context;
use autoescola_auth::AdminRole;
use autoescola_cli::{NewAdmin, create_admin};
use autoescola_config::DatabaseConfig;
use autoescola_db::init_db_pool;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password, Select};
use dotenvy::dotenv;

#[derive(Parser)]
#[command(name = "autoescola-cli")]
#[command(about = "Autoescola CLI - Administrative tools for the admin panel", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an admin panel account
    CreateAdmin {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// ADMIN or OPERATOR
        #[arg(short = 'r', long)]
        role: Option<AdminRole>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let config = DatabaseConfig::from_env().context("database configuration")?;
    let pool = init_db_pool(&config)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Commands::CreateAdmin {
            name,
            email,
            password,
            role,
        } => handle_create_admin(&pool, name, email, password, role).await,
    };

    pool.close().await;
    result
}

async fn handle_create_admin(
    pool: &sqlx::PgPool,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<AdminRole>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::new()
            .with_prompt("Name")
            .interact_text()
            .context("Failed to read name")?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    let role = match role {
        Some(role) => role,
        None => {
            let roles = [AdminRole::Admin, AdminRole::Operator];
            let selected = Select::new()
                .with_prompt("Role")
                .items(&roles)
                .default(0)
                .interact()
                .context("Failed to read role")?;
            roles[selected]
        }
    };

    let admin = NewAdmin {
        name,
        email,
        password,
        role,
    };
    let summary = (admin.email.clone(), admin.role);

    let id = create_admin(pool, admin)
        .await
        .context("Error creating admin")?;

    println!("\n✅ Admin created successfully!");
    println!("   ID: {}", id);
    println!("   Email: {}", summary.0.trim().to_lowercase());
    println!("   Role: {}", summary.1);

    Ok(())
}
