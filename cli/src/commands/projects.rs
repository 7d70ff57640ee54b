use anyhow::{bail, Context, Result};
use youth_council_client::{ApiClient, ProjectScreen};

use crate::{
    cli::{ProjectCommands, ProjectFields},
    utils::{self, print_json},
};

pub async fn run(client: ApiClient, command: ProjectCommands) -> Result<()> {
    let screen = ProjectScreen::new(client);
    utils::require_session(&screen).await?;

    match command {
        ProjectCommands::List {
            category,
        } => print_json(&screen.filtered(category)),
        ProjectCommands::Add {
            fields,
        } => {
            screen.open_create();
            fill(&screen, fields)?;
            save(&screen).await
        },
        ProjectCommands::Edit {
            id,
            fields,
        } => {
            screen.open_edit(id)?;
            fill(&screen, fields)?;
            save(&screen).await
        },
        ProjectCommands::Delete {
            id,
            yes,
        } => {
            if screen.get(id).is_none() {
                bail!("project not found: {id}")
            }
            if screen.delete(id, &mut utils::confirmer(yes)).await? {
                tracing::info!("Deleted project {id}.");
            } else {
                tracing::info!("Kept project {id}.");
            }
            Ok(())
        },
    }
}

fn fill(screen: &ProjectScreen, fields: ProjectFields) -> Result<()> {
    let image = fields
        .image
        .as_deref()
        .map(utils::load_file_part)
        .transpose()?;

    screen.edit_draft(|draft| {
        if let Some(title) = fields.title {
            draft.title = title;
        }
        if let Some(description) = fields.description {
            draft.description = description;
        }
        if let Some(status) = fields.status {
            draft.status = status;
        }
        if let Some(budget) = fields.budget {
            draft.budget = budget;
        }
        if fields.date.is_some() {
            draft.date = fields.date;
        }
        if fields.category.is_some() {
            draft.category = fields.category;
        }
        if image.is_some() {
            draft.image = image;
        }
    })?;
    Ok(())
}

async fn save(screen: &ProjectScreen) -> Result<()> {
    let project = screen.submit().await.context("failed to save project")?;
    if let Some(notice) = screen.notice() {
        tracing::info!("{}", notice.message());
    }
    print_json(&project)
}
