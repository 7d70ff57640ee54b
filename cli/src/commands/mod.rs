pub mod auth;
pub mod members;
pub mod projects;
pub mod public;
pub mod reports;

use anyhow::Result;

use crate::{
    cli::{Cli, Commands},
    utils,
};

pub async fn run(cli: Cli) -> Result<()> {
    let client = utils::connect(&cli.global)?;
    match cli.command {
        Commands::Login {
            username,
            password,
        } => auth::login(&client, &username, password).await,
        Commands::Logout => auth::logout(&client),
        Commands::Members {
            command,
        } => members::run(client, command).await,
        Commands::Projects {
            command,
        } => projects::run(client, command).await,
        Commands::Reports {
            command,
        } => reports::run(client, command).await,
        Commands::Roster => public::roster(client).await,
        Commands::Showcase {
            category,
            grouped,
        } => public::showcase(client, category, grouped).await,
        Commands::Transparency {
            search,
            sort,
            page,
        } => public::transparency(client, search, sort, page).await,
    }
}
