use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use portfolio_client::{base_url_for_host, require_session, AdminSession, PortfolioClient};
use portfolio_content::{
    About, Achievement, Certification, ContactInfo, Experience, Project, Resource, Service, Skill,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ResourceArg {
    Skills,
    Certifications,
    Achievements,
    Projects,
    Experiences,
    Services,
    ContactInfo,
    About,
}

#[derive(Parser)]
#[command(name = "portfolio-cli", version, about = "Portfolio content admin CLI")]
struct Cli {
    /// Deployed API base URL, used unless --host is a loopback name.
    #[arg(long, env = "PORTFOLIO_API_URL", default_value = "http://localhost:4000")]
    api_url: String,
    /// Hostname the client pretends to run on; picks local vs deployed API.
    #[arg(long, env = "PORTFOLIO_HOST", default_value = "localhost")]
    host: String,
    /// Where the admin session is remembered between invocations.
    #[arg(long, default_value = ".portfolio-admin-session")]
    session_file: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a resource as JSON.
    Get { resource: ResourceArg },
    /// Replace a resource with the contents of a JSON file.
    Put {
        resource: ResourceArg,
        /// JSON file: an array for collections, an object for singletons.
        #[arg(long)]
        file: PathBuf,
        /// Bearer token for write requests.
        #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
        token: String,
        /// Admin password the session is checked against.
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        admin_password: String,
    },
    /// Upload an image and print its URL.
    Upload {
        path: PathBuf,
        #[arg(long, env = "ADMIN_TOKEN", hide_env_values = true)]
        token: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        admin_password: String,
    },
    /// Start a one-hour admin session.
    Login {
        /// Password typed by the user.
        #[arg(long)]
        password: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        admin_password: String,
    },
    /// End the admin session.
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    // Default to info-level logs; override via RUST_LOG if needed.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let client = PortfolioClient::new(base_url_for_host(&cli.host, &cli.api_url));

    match cli.command {
        Commands::Get { resource } => print_resource(&client, resource).await,
        Commands::Put {
            resource,
            file,
            token,
            admin_password,
        } => {
            require_session(&cli.session_file, admin_password)?;
            put_resource(&client, resource, &file, &token).await?;
            info!("Saved {} to {}", resource_name(resource), client.base_url());
            Ok(())
        }
        Commands::Upload {
            path,
            token,
            admin_password,
        } => {
            require_session(&cli.session_file, admin_password)?;
            let url = client.upload_file(&path, &token).await?;
            println!("{url}");
            Ok(())
        }
        Commands::Login {
            password,
            admin_password,
        } => {
            let mut session = AdminSession::new(admin_password);
            if !session.login(&password) {
                bail!("Invalid password");
            }
            session.save(&cli.session_file)?;
            info!("Admin session started");
            Ok(())
        }
        Commands::Logout => {
            let mut session = AdminSession::load(&cli.session_file, String::new());
            session.logout();
            session.save(&cli.session_file)?;
            info!("Admin session ended");
            Ok(())
        }
    }
}

async fn print_resource(client: &PortfolioClient, resource: ResourceArg) -> Result<()> {
    match resource {
        ResourceArg::Skills => print_json(&client.fetch_skills().await?),
        ResourceArg::Certifications => print_json(&client.fetch_certifications().await?),
        ResourceArg::Achievements => print_json(&client.fetch_achievements().await?),
        ResourceArg::Projects => print_json(&client.fetch_projects().await?),
        ResourceArg::Experiences => print_json(&client.fetch_experiences().await?),
        ResourceArg::Services => print_json(&client.fetch_services().await?),
        ResourceArg::ContactInfo => print_json(&client.fetch_contact_info().await?),
        ResourceArg::About => print_json(&client.fetch_about().await?),
    }
}

async fn put_resource(
    client: &PortfolioClient,
    resource: ResourceArg,
    file: &Path,
    token: &str,
) -> Result<()> {
    let raw = std::fs::read(file).with_context(|| format!("Failed to read {}", file.display()))?;
    match resource {
        ResourceArg::Skills => client.save_skills(&parse::<Vec<Skill>>(&raw)?, token).await?,
        ResourceArg::Certifications => client.save_certifications(&parse::<Vec<Certification>>(&raw)?, token).await?,
        ResourceArg::Achievements => client.save_achievements(&parse::<Vec<Achievement>>(&raw)?, token).await?,
        ResourceArg::Projects => client.save_projects(&parse::<Vec<Project>>(&raw)?, token).await?,
        ResourceArg::Experiences => client.save_experiences(&parse::<Vec<Experience>>(&raw)?, token).await?,
        ResourceArg::Services => client.save_services(&parse::<Vec<Service>>(&raw)?, token).await?,
        ResourceArg::ContactInfo => client.save_contact_info(&parse::<ContactInfo>(&raw)?, token).await?,
        ResourceArg::About => client.save_about(&parse::<About>(&raw)?, token).await?,
    }
    Ok(())
}

fn parse<T: serde::de::DeserializeOwned>(raw: &[u8]) -> Result<T> {
    serde_json::from_slice(raw).context("File is not valid JSON for this resource")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn resource_name(resource: ResourceArg) -> &'static str {
    match resource {
        ResourceArg::Skills => Skill::NAME,
        ResourceArg::Certifications => Certification::NAME,
        ResourceArg::Achievements => Achievement::NAME,
        ResourceArg::Projects => Project::NAME,
        ResourceArg::Experiences => Experience::NAME,
        ResourceArg::Services => Service::NAME,
        ResourceArg::ContactInfo => ContactInfo::NAME,
        ResourceArg::About => About::NAME,
    }
}
