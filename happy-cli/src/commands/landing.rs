//! `happy landing`

use anyhow::Result;
use colored::Colorize;

const HEADLINE: &str = "Leve felicidade para o mundo";
const TAGLINE: &str = "Visite orfanatos e mude o dia de muitas crianças.";
const CITY: &str = "Curitiba";
const STATE: &str = "Paraná";

pub fn run() -> Result<()> {
    println!("{}", "happy".bold().bright_cyan());
    println!();
    println!("{}", HEADLINE.bold());
    println!("{TAGLINE}");
    println!();
    println!("{} {}", CITY.bold(), STATE);
    println!();
    println!("Run `happy list` to see orphanages or `happy create` to add one.");
    Ok(())
}
