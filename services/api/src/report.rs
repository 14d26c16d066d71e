//! Offline analytics over the demo data set, for demos and smoke checks
//! without standing up the HTTP service.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use placement::analytics::AnalyticsService;
use placement::error::AppError;

use crate::infra::InMemoryStore;
use crate::seed;

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Also write the application pipeline as CSV to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let store = Arc::new(InMemoryStore::with_catalog(
        seed::departments(),
        seed::skills(),
    ));
    seed::seed(&store);

    let analytics = AnalyticsService::new(store);
    let report = analytics.report().map_err(AppError::from)?;

    println!("Placement funnel");
    if report.funnel.is_empty() {
        println!("  (no applications)");
    }
    for entry in &report.funnel {
        println!("  {:<12} {}", entry.stage.label(), entry.count);
    }

    println!("\nSkill demand (top {})", report.skill_demand.len());
    for entry in &report.skill_demand {
        println!("  {:<20} {}", entry.skill, entry.count);
    }

    println!("\nPipeline velocity");
    if report.pipeline_velocity.is_empty() {
        println!("  (no completed transitions)");
    }
    for entry in &report.pipeline_velocity {
        println!("  {:<28} {:.1} days", entry.transition, entry.days);
    }

    if let Some(path) = args.export {
        let csv = analytics.export_csv().map_err(AppError::from)?;
        std::fs::write(&path, csv)?;
        println!("\nCSV export written to {}", path.display());
    }

    Ok(())
}
