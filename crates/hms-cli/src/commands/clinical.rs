use anyhow::Result;
use colored::Colorize;
use hms_client::Gateway;

use super::{list_query, read_body};
use crate::cli::{AdmissionCommands, OutputFormat, VisitCommands};
use crate::output::{print_success, print_value};

pub async fn visit(gateway: &Gateway, command: &VisitCommands, format: OutputFormat) -> Result<()> {
    let visits = gateway.visits();
    match command {
        VisitCommands::List(args) => {
            print_value(&visits.list(&list_query(args)?).await?, format);
        }
        VisitCommands::Get(args) => {
            print_value(&visits.detail(&args.id).await?, format);
        }
        VisitCommands::Create(args) => {
            let created = visits.add(&read_body(&args.file)?).await?;
            print_success("Visit recorded");
            if !created.is_null() {
                print_value(&created, format);
            }
        }
        VisitCommands::Delete(args) => {
            visits.delete(&args.id).await?;
            print_success(&format!("Deleted visit {}", args.id.cyan()));
        }
        VisitCommands::Prescription(args) => {
            visits
                .update_prescription(&args.id, &read_body(&args.file)?)
                .await?;
            print_success(&format!("Prescription updated for visit {}", args.id.cyan()));
        }
    }
    Ok(())
}

pub async fn admission(
    gateway: &Gateway,
    command: &AdmissionCommands,
    format: OutputFormat,
) -> Result<()> {
    let admissions = gateway.admissions();
    match command {
        AdmissionCommands::Active(args) => {
            print_value(&admissions.list_active(&list_query(args)?).await?, format);
        }
        AdmissionCommands::Admit(args) => {
            let admitted = admissions.add(&read_body(&args.file)?).await?;
            print_success("Patient admitted");
            if !admitted.is_null() {
                print_value(&admitted, format);
            }
        }
        AdmissionCommands::Discharge(args) => {
            admissions
                .discharge(&args.id, &read_body(&args.file)?)
                .await?;
            print_success(&format!("Discharged admission {}", args.id.cyan()));
        }
    }
    Ok(())
}
