use anyhow::Result;
use hms_client::Gateway;

use super::stats_query;
use crate::cli::{OutputFormat, ReportCommands};
use crate::output::print_value;

pub async fn run(gateway: &Gateway, command: &ReportCommands, format: OutputFormat) -> Result<()> {
    let reports = gateway.reports();
    let data = match command {
        ReportCommands::Department { id, window } => {
            reports.department_stats(id, &stats_query(window)).await?
        }
        ReportCommands::Revenue { window } => reports.revenue(&stats_query(window)).await?,
        ReportCommands::Doctor { id, window } => {
            reports.doctor_workload(id, &stats_query(window)).await?
        }
    };
    print_value(&data, format);
    Ok(())
}
