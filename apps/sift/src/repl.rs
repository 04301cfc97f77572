use std::collections::BTreeSet;

use crate::{Error, Result};
use sift_domain::{BackendMode, DistanceStrategy};

pub const HELP: &str = "\
Type text to search. Commands:
  :more                    load the next page
  :retry                   re-issue the first page
  :mode legacy|cursor      switch the pagination protocol
  :filter NAME [A,B,...]   select values in a filter category; no values clears it
  :category [NAME]         select a top-level category; no name clears it
  :weight W                set the hybrid weight (0.0-1.0)
  :distance D              set the max distance (0.0-1.0)
  :strategy S              max_distance, min_score, or both
  :similar N               search for items similar to result N
  :show                    print the current results again
  :help                    print this help
  :quit                    exit";

/// One line of user input.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
	Query(String),
	More,
	Retry,
	Mode(BackendMode),
	Filter { category: String, values: BTreeSet<String> },
	Category(Option<String>),
	Weight(f32),
	Distance(f32),
	Strategy(DistanceStrategy),
	Similar(usize),
	Show,
	Help,
	Quit,
}

/// Parses a line. Blank lines yield `None`; anything not starting with `:` is a query.
pub fn parse_line(line: &str) -> Result<Option<Input>> {
	let line = line.trim();

	if line.is_empty() {
		return Ok(None);
	}

	let Some(command) = line.strip_prefix(':') else {
		return Ok(Some(Input::Query(line.to_string())));
	};
	let (name, rest) = match command.split_once(char::is_whitespace) {
		Some((name, rest)) => (name, rest.trim()),
		None => (command, ""),
	};
	let input = match name {
		"more" | "m" => Input::More,
		"retry" => Input::Retry,
		"mode" => Input::Mode(rest.parse()?),
		"filter" => parse_filter(rest)?,
		"category" => Input::Category((!rest.is_empty()).then(|| rest.to_string())),
		"weight" => Input::Weight(parse_unit("weight", rest)?),
		"distance" => Input::Distance(parse_unit("distance", rest)?),
		"strategy" => Input::Strategy(rest.parse()?),
		"similar" => Input::Similar(parse_index(rest)?),
		"show" => Input::Show,
		"help" | "h" => Input::Help,
		"quit" | "q" => Input::Quit,
		_ => return Err(Error::UnknownCommand { name: name.to_string() }),
	};

	Ok(Some(input))
}

fn parse_filter(rest: &str) -> Result<Input> {
	let (category, values) = match rest.split_once(char::is_whitespace) {
		Some((category, values)) => (category, values),
		None => (rest, ""),
	};

	if category.is_empty() {
		return Err(Error::InvalidArgument {
			command: "filter",
			message: "a category name is required.".to_string(),
		});
	}

	let values = values
		.split(',')
		.map(str::trim)
		.filter(|value| !value.is_empty())
		.map(str::to_string)
		.collect();

	Ok(Input::Filter { category: category.to_string(), values })
}

fn parse_unit(command: &'static str, rest: &str) -> Result<f32> {
	let value: f32 = rest.parse().map_err(|_| Error::InvalidArgument {
		command,
		message: format!("{rest:?} is not a number."),
	})?;

	if !(0.0..=1.0).contains(&value) {
		return Err(Error::InvalidArgument {
			command,
			message: "value must be in the range 0.0-1.0.".to_string(),
		});
	}

	Ok(value)
}

fn parse_index(rest: &str) -> Result<usize> {
	match rest.parse::<usize>() {
		Ok(index) if index > 0 => Ok(index),
		_ => Err(Error::InvalidArgument {
			command: "similar",
			message: "expected a result number starting at 1.".to_string(),
		}),
	}
}
