use anyhow::Result;
use colored::Colorize;
use hms_client::Router;

use crate::cli::OutputFormat;
use crate::output::print_value;

pub fn resolve(path: &str, format: OutputFormat) -> Result<()> {
    let router = Router::console();
    let Some(route) = router.resolve(path) else {
        anyhow::bail!("No route matches \"{path}\"");
    };

    if matches!(format, OutputFormat::Table) {
        println!("{}: {}", "Path".cyan(), route.full_path);
        if let Some(from) = &route.redirected_from {
            println!("{}: {}", "Redirected from".cyan(), from);
        }
        println!("{}: {}", "Route".cyan(), route.name.unwrap_or("-"));
        println!("{}: {}", "View".cyan(), route.view);
        for (name, value) in &route.params {
            println!("{}: {} = {}", "Param".cyan(), name, value);
        }
        println!("{}: {}", "Title".cyan(), route.document_title());
    } else {
        let mut value = serde_json::to_value(&route)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert("documentTitle".into(), route.document_title().into());
        }
        print_value(&value, format);
    }
    Ok(())
}
