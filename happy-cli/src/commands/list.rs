//! `happy list` and `happy show <id>`: the listing view.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use happy_api::{HttpApi, OrphanageApi};
use happy_core::Orphanage;

/// Arguments for `happy list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `happy show`.
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Orphanage id.
    pub id: u64,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

impl ListArgs {
    pub fn run(self, api_url: Option<&str>) -> Result<()> {
        let config = super::settings(api_url)?;
        let api = HttpApi::new(&config.api_url).context("failed to build HTTP client")?;
        let orphanages = super::runtime()?
            .block_on(api.list())
            .with_context(|| format!("failed to list orphanages from {}", config.api_url))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&orphanages).context("failed to serialize JSON")?
            );
            return Ok(());
        }
        print_table(&orphanages);
        Ok(())
    }
}

impl ShowArgs {
    pub fn run(self, api_url: Option<&str>) -> Result<()> {
        let config = super::settings(api_url)?;
        let api = HttpApi::new(&config.api_url).context("failed to build HTTP client")?;
        let orphanage = super::runtime()?
            .block_on(api.get(self.id))
            .with_context(|| format!("failed to load orphanage {}", self.id))?;

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&orphanage).context("failed to serialize JSON")?
            );
            return Ok(());
        }
        print_details(&orphanage);
        Ok(())
    }
}

#[derive(Tabled)]
struct OrphanageRow {
    #[tabled(rename = "id")]
    id: u64,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "location")]
    location: String,
    #[tabled(rename = "opening hours")]
    opening_hours: String,
    #[tabled(rename = "weekends")]
    weekends: &'static str,
    #[tabled(rename = "images")]
    images: usize,
}

pub fn print_table(orphanages: &[Orphanage]) {
    if orphanages.is_empty() {
        println!("No orphanages registered.");
        println!("Run: happy create --name <name> ...");
        return;
    }

    let rows: Vec<OrphanageRow> = orphanages
        .iter()
        .map(|o| OrphanageRow {
            id: o.id,
            name: o.name.clone(),
            location: o.position().to_string(),
            opening_hours: o.opening_hours.clone(),
            weekends: weekends_label(o.open_on_weekends),
            images: o.images.len(),
        })
        .collect();
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

fn print_details(orphanage: &Orphanage) {
    println!("{}", orphanage.name.bold());
    println!("  location:      {}", orphanage.position());
    println!("  about:         {}", orphanage.about);
    println!("  instructions:  {}", orphanage.instructions);
    println!("  opening hours: {}", orphanage.opening_hours);
    println!("  weekends:      {}", weekends_label(orphanage.open_on_weekends));
    for image in &orphanage.images {
        println!("  image:         {}", image.url);
    }
}

fn weekends_label(open: bool) -> &'static str {
    if open {
        "open"
    } else {
        "closed"
    }
}
