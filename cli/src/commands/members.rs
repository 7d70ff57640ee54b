use anyhow::{bail, Context, Result};
use youth_council_client::{ApiClient, MemberScreen};
use youth_council_shared::Lenient;

use crate::{
    cli::{MemberCommands, MemberFields},
    utils::{self, print_json},
};

pub async fn run(client: ApiClient, command: MemberCommands) -> Result<()> {
    let screen = MemberScreen::new(client);
    utils::require_session(&screen).await?;

    match command {
        MemberCommands::List => print_json(&screen.items()),
        MemberCommands::Add {
            fields,
        } => {
            screen.open_create();
            fill(&screen, fields)?;
            save(&screen).await
        },
        MemberCommands::Edit {
            id,
            fields,
        } => {
            screen.open_edit(id)?;
            fill(&screen, fields)?;
            save(&screen).await
        },
        MemberCommands::Delete {
            id,
            yes,
        } => {
            if screen.get(id).is_none() {
                bail!("member not found: {id}")
            }
            if screen.delete(id, &mut utils::confirmer(yes)).await? {
                tracing::info!("Deleted member {id}.");
            } else {
                tracing::info!("Kept member {id}.");
            }
            Ok(())
        },
    }
}

fn fill(screen: &MemberScreen, fields: MemberFields) -> Result<()> {
    let committee = fields
        .committee
        .as_deref()
        .map(utils::parse_committee)
        .transpose()?;
    let photo = fields
        .photo
        .as_deref()
        .map(utils::load_file_part)
        .transpose()?;

    screen.edit_draft(|draft| {
        if let Some(name) = fields.name {
            draft.name = name;
        }
        if let Some(position) = fields.position {
            draft.position = position;
        }
        if let Some(committee) = committee {
            draft.committee = committee.map(Lenient::Known);
        }
        if let Some(about) = fields.about {
            draft.about = about;
        }
        if photo.is_some() {
            draft.photo = photo;
        }
    })?;
    Ok(())
}

async fn save(screen: &MemberScreen) -> Result<()> {
    let member = screen.submit().await.context("failed to save member")?;
    if let Some(notice) = screen.notice() {
        tracing::info!("{}", notice.message());
    }
    print_json(&member)
}
