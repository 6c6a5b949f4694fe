use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::Input;
use dotenvy::dotenv;

use old_school::modules::users::model::UserRole;
use old_school::modules::users::service::UserService;
use old_school::old_school_config::DatabaseConfig;
use old_school::old_school_db::{PgPool, close_db_pool, init_db_pool, run_migrations};

#[derive(Parser)]
#[command(name = "old-school-cli")]
#[command(about = "Old-school CLI - administrative tools for the old-school API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Give a registered user the admin or instructor role
    Promote {
        /// Email the user registered with (prompted if not provided)
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Role to assign: admin or instructor
        #[arg(short = 'r', long, default_value = "admin")]
        role: UserRole,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;

    let result = match cli.command {
        Commands::Promote { email, role } => handle_promote(&pool, email, role).await,
        Commands::Migrate => run_migrations(&pool)
            .await
            .context("Failed to run migrations")
            .map(|_| println!("✅ Migrations applied")),
    };

    close_db_pool(&pool).await;
    result
}

async fn handle_promote(
    pool: &PgPool,
    email: Option<String>,
    role: UserRole,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let Some(user) = UserService::find_by_email(pool, &email)
        .await
        .map_err(|e| e.error)?
    else {
        bail!("No user registered with email {}", email);
    };

    let result = UserService::set_role(pool, user.id, role)
        .await
        .map_err(|e| e.error)?;

    if result.modified_count == 0 {
        println!("ℹ️  {} already has the {} role", email, role);
    } else {
        println!("✅ {} is now {}", email, role);
    }

    Ok(())
}
