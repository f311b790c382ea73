use anyhow::Result;
use colored::Colorize;
use hms_client::api::RecordsApi;

use super::{list_query, read_body};
use crate::cli::{OutputFormat, RecordCommands};
use crate::output::{print_success, print_value};

/// Patients, doctors, departments and wards share one command surface.
pub async fn run(
    api: RecordsApi<'_>,
    label: &str,
    command: &RecordCommands,
    format: OutputFormat,
) -> Result<()> {
    match command {
        RecordCommands::List(args) => {
            let page = api.list(&list_query(args)?).await?;
            print_value(&page, format);
        }
        RecordCommands::Get(args) => {
            let record = api.detail(&args.id).await?;
            print_value(&record, format);
        }
        RecordCommands::Create(args) => {
            let body = read_body(&args.file)?;
            let created = api.add(&body).await?;
            print_success(&format!("Created {}", label.cyan()));
            if !created.is_null() {
                print_value(&created, format);
            }
        }
        RecordCommands::Update(args) => {
            let body = read_body(&args.file)?;
            let updated = api.update(&args.id, &body).await?;
            print_success(&format!("Updated {} {}", label.cyan(), args.id.cyan()));
            if !updated.is_null() {
                print_value(&updated, format);
            }
        }
        RecordCommands::Delete(args) => {
            api.delete(&args.id).await?;
            print_success(&format!("Deleted {} {}", label.cyan(), args.id.cyan()));
        }
    }
    Ok(())
}
