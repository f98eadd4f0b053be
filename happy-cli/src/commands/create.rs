//! `happy create`: fill in the registration form and submit it.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use happy_api::{HttpApi, OrphanageApi};
use happy_core::{
    submission::LISTING_ROUTE, Config, FormState, MapView, PreviewRegistry, SubmitOutcome,
};
use happy_session::{FixedLocation, FormSession, Unavailable};

use crate::terminal::{RouteNavigator, TerminalNotifier};

/// Arguments for `happy create`. Every field may be left out; the API decides
/// what is missing and the command reports the highlighted fields.
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Orphanage name.
    #[arg(long)]
    pub name: Option<String>,

    /// About the orphanage (at most 300 characters are kept).
    #[arg(long)]
    pub about: Option<String>,

    /// Visiting instructions.
    #[arg(long)]
    pub instructions: Option<String>,

    /// Opening hours, free text.
    #[arg(long = "opening-hours", value_name = "HOURS")]
    pub opening_hours: Option<String>,

    /// Mark the orphanage as closed on weekends (open by default).
    #[arg(long)]
    pub closed_on_weekends: bool,

    /// Latitude of the picked map position.
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the picked map position.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Image to upload; repeat for several. Paths that are not files are skipped.
    #[arg(long = "image", short = 'i', value_name = "PATH")]
    pub images: Vec<PathBuf>,

    /// Drop the selected image at this position; repeat to drop several,
    /// applied in order.
    #[arg(long = "remove-image", value_name = "INDEX")]
    pub remove_images: Vec<usize>,
}

impl CreateArgs {
    pub fn run(self, api_url: Option<&str>) -> Result<()> {
        let config = super::settings(api_url)?;
        let api = HttpApi::new(&config.api_url).context("failed to build HTTP client")?;
        super::runtime()?.block_on(self.submit(api, &config))
    }

    async fn submit(self, api: HttpApi, config: &Config) -> Result<()> {
        let mut session = FormSession::new(
            api.clone(),
            TerminalNotifier,
            RouteNavigator::default(),
            PreviewRegistry::new(),
        );
        match config.default_location {
            Some(position) => session.locate(FixedLocation(position)),
            None => session.locate(Unavailable),
        }
        session
            .wait_for_location()
            .await
            .context("failed to read device location")?;

        session.edit(|form| self.fill(form));
        session
            .select_image_paths(self.images.as_slice())
            .context("failed to read selected images")?;
        for &index in &self.remove_images {
            session
                .edit(|form| form.remove_image(index))
                .with_context(|| format!("cannot remove image {index}"))?;
        }
        session.read(|form| print_draft(form, config.map_zoom));

        match session.submit().await {
            SubmitOutcome::Succeeded => {
                if session.navigator().take_route().as_deref() == Some(LISTING_ROUTE) {
                    let orphanages = api
                        .list()
                        .await
                        .context("registered, but failed to load the listing")?;
                    super::list::print_table(&orphanages);
                }
                Ok(())
            }
            SubmitOutcome::Rejected { messages } => {
                let highlighted = session.read(FormState::highlighted_fields);
                if !highlighted.is_empty() {
                    let names: Vec<&str> = highlighted.iter().map(|f| f.key()).collect();
                    eprintln!("  missing: {}", names.join(", "));
                }
                tracing::debug!(?messages, "validation messages");
                bail!("orphanage was not registered")
            }
            SubmitOutcome::Ignored => bail!("a submission is already in progress"),
        }
    }

    fn fill(&self, form: &mut FormState) {
        form.set_name(self.name.clone().unwrap_or_default());
        form.set_about(self.about.clone().unwrap_or_default());
        form.set_instructions(self.instructions.clone().unwrap_or_default());
        form.set_opening_hours(self.opening_hours.clone().unwrap_or_default());
        form.set_open_on_weekends(!self.closed_on_weekends);
        if let (Some(lat), Some(lng)) = (self.lat, self.lng) {
            form.set_position(lat, lng);
        }
    }
}

fn print_draft(form: &FormState, zoom: u8) {
    let map = MapView::from_form(form, zoom);
    let centre = map
        .center
        .map(|c| c.to_string())
        .unwrap_or_else(|| "unknown".to_owned());
    let marker = map
        .marker
        .map(|m| m.to_string())
        .unwrap_or_else(|| "not picked".to_owned());

    println!("Submitting '{}'", form.name());
    println!("  map centre: {centre} (zoom {})", map.zoom);
    println!("  position:   {marker}");
    for preview in form.images().previews() {
        println!("  image:      {preview}");
    }
}
