use anyhow::{bail, Context, Result};
use serde::Serialize;
use youth_council_client::{ApiClient, ReportScreen};
use youth_council_shared::{listing::format_file_size, models::ReportFileKind, Report};

use crate::{
    cli::ReportCommands,
    utils::{self, print_json},
};

#[derive(Serialize)]
struct ReportRow<'a> {
    #[serde(flatten)]
    report: &'a Report,
    kind: ReportFileKind,
    download_url: String,
    size: Option<String>,
}

pub async fn run(client: ApiClient, command: ReportCommands) -> Result<()> {
    let screen = ReportScreen::new(client);
    utils::require_session(&screen).await?;

    match command {
        ReportCommands::List => {
            let reports = screen.items();
            let rows: Vec<ReportRow<'_>> = reports
                .iter()
                .map(|report| ReportRow {
                    report,
                    kind: report.kind(),
                    download_url: screen.download_url(report),
                    size: report.file_size.map(format_file_size),
                })
                .collect();
            print_json(&rows)
        },
        ReportCommands::Upload {
            file,
            title,
        } => {
            let part = utils::load_report_part(&file)?;
            screen
                .select_file(part)
                .with_context(|| format!("cannot upload {}", file.display()))?;
            if let Some(title) = title {
                screen.set_title(title);
            }
            let report = screen.upload().await.context("failed to upload report")?;
            tracing::info!("Report uploaded successfully!");
            print_json(&report)
        },
        ReportCommands::Delete {
            id,
            yes,
        } => {
            if screen.get(id).is_none() {
                bail!("report not found: {id}")
            }
            if screen.delete(id, &mut utils::confirmer(yes)).await? {
                tracing::info!("Deleted report {id}.");
            } else {
                tracing::info!("Kept report {id}.");
            }
            Ok(())
        },
    }
}
