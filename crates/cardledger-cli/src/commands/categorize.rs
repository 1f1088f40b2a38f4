//! Categorize command - show the category a description maps to.

use clap::Args;
use console::style;

/// Arguments for the categorize command.
#[derive(Args)]
pub struct CategorizeArgs {
    /// Transaction description
    #[arg(required = true)]
    description: Vec<String>,
}

pub async fn run(args: CategorizeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let pipeline = super::build_pipeline(config_path, false)?;
    let description = args.description.join(" ");

    match pipeline.categorizer().categorize(&description) {
        Some(category) => println!("{}", category),
        None => println!("{}", style("uncategorized").dim()),
    }

    Ok(())
}
