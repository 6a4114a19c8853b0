//! Report export and dataset upload.

use std::path::Path;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use csv::ReaderBuilder;
use log::info;
use spe_core::api::PricingApi;
use spe_core::client::HttpClient;
use spe_core::controller::Message;
use spe_core::data_source::DataSource;
use spe_core::runtime::Session;

/// `pricing-report-YYYY-MM-DD.csv` for the given date.
pub fn default_report_path(date: NaiveDate) -> String {
    format!("pricing-report-{}.csv", date.format("%Y-%m-%d"))
}

/// Data rows in a CSV report (header excluded).
pub fn count_report_rows(report: &[u8]) -> anyhow::Result<usize> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(report);
    let mut rows = 0;
    for record in rdr.records() {
        record.context("Report is not valid CSV")?;
        rows += 1;
    }
    Ok(rows)
}

pub async fn run_export<A: PricingApi>(
    api: &A,
    source: DataSource,
    output: Option<&str>,
) -> anyhow::Result<()> {
    let report = api
        .export_report(source)
        .await
        .with_context(|| format!("Failed to export {} report", source))?;
    let rows = count_report_rows(&report)?;

    let path = output
        .map(str::to_string)
        .unwrap_or_else(|| default_report_path(Local::now().date_naive()));
    tokio::fs::write(&path, &report)
        .await
        .with_context(|| format!("Failed to write {}", path))?;
    info!("Exported {} rows of {} data to {}", rows, source, path);
    println!("{}", path);
    Ok(())
}

pub async fn run_upload(client: HttpClient, file: &str) -> anyhow::Result<()> {
    let contents = tokio::fs::read(file)
        .await
        .with_context(|| format!("Failed to read {}", file))?;
    let file_name = Path::new(file)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.to_string());

    info!("Uploading {} ({} bytes)", file_name, contents.len());
    let receipt = client
        .upload_dataset(&file_name, contents)
        .await
        .context("Failed to upload data")?;
    if !receipt.success {
        anyhow::bail!(
            "Upload rejected: {}",
            receipt.message.as_deref().unwrap_or("no reason given")
        );
    }

    let mut session = Session::new(client);
    session.send(Message::UploadFinished { success: true }).await;
    let controller = session.controller();
    if let Some(error) = controller.error() {
        anyhow::bail!("Uploaded data could not be loaded: {}", error);
    }
    println!(
        "Now using {} data: {} products",
        controller.source(),
        controller.products().len()
    );
    Ok(())
}
