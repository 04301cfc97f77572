pub mod render;
pub mod repl;

mod error;

pub use error::{Error, Result};

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::{
	render::Renderer,
	repl::{HELP, Input},
};
use sift_domain::ParameterPatch;
use sift_engine::{Providers, SessionController, SessionSettings};

#[derive(Debug, Parser)]
#[command(
	version = sift_cli::VERSION,
	rename_all = "kebab",
	styles = sift_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = sift_config::load(&args.config)?;

	sift_cli::init_tracing(&config.service.log_level);

	let providers = Providers::http(&config.backend)?;
	let settings = SessionSettings::from_config(&config)?;
	let controller = SessionController::spawn(providers, settings);

	tracing::info!(api_base = %config.backend.api_base, "Search session started.");

	let mut snapshots = controller.subscribe();
	let printer = tokio::spawn(async move {
		let mut renderer = Renderer::default();

		loop {
			let snapshot = snapshots.borrow_and_update().clone();

			for line in renderer.render(&snapshot) {
				println!("{line}");
			}

			if snapshots.changed().await.is_err() {
				break;
			}
		}
	});
	let mut lines = BufReader::new(io::stdin()).lines();

	println!("{HELP}");

	while let Some(line) = lines.next_line().await? {
		let input = match repl::parse_line(&line) {
			Ok(Some(input)) => input,
			Ok(None) => continue,
			Err(err) => {
				eprintln!("{err}");

				continue;
			},
		};

		match input {
			Input::Quit => break,
			Input::Help => println!("{HELP}"),
			Input::Show => {
				for line in Renderer::default().render(&controller.snapshot()) {
					println!("{line}");
				}
			},
			input =>
				if let Err(err) = dispatch(&controller, input).await {
					eprintln!("{err}");
				},
		}
	}

	printer.abort();

	Ok(())
}

/// Forwards one parsed input to the session.
pub async fn dispatch(controller: &SessionController, input: Input) -> color_eyre::Result<()> {
	match input {
		Input::Query(query) => controller.update_parameters(ParameterPatch::query(query))?,
		Input::More => controller.load_more()?,
		Input::Retry => controller.retry()?,
		Input::Mode(mode) => controller.update_parameters(ParameterPatch::mode(mode))?,
		Input::Filter { category, values } => {
			let mut filters = controller.snapshot().parameters.filters;

			if values.is_empty() {
				filters.remove(&category);
			} else {
				filters.insert(category, values);
			}

			controller.update_parameters(ParameterPatch::filters(filters))?;
		},
		Input::Category(category) => controller.update_parameters(ParameterPatch {
			category: Some(category),
			..Default::default()
		})?,
		Input::Weight(weight) =>
			controller.update_parameters(ParameterPatch::hybrid_weight(weight))?,
		Input::Distance(distance) =>
			controller.update_parameters(ParameterPatch::max_distance(distance))?,
		Input::Strategy(strategy) => controller.update_parameters(ParameterPatch {
			max_distance_strategy: Some(strategy),
			..Default::default()
		})?,
		Input::Similar(number) => {
			let snapshot = controller.snapshot();
			let Some(anchor) = number.checked_sub(1).and_then(|index| snapshot.results.get(index))
			else {
				return Err(eyre::eyre!("There is no result #{number}."));
			};

			controller.find_similar(anchor).await?;
		},
		Input::Show | Input::Help | Input::Quit => {},
	}

	Ok(())
}
