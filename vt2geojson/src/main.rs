use anyhow::Result;
use clap::Parser;
use clap_verbosity_flag::{ErrorLevel, Verbosity};
use log::debug;
use vt2geojson::{
	ConvertOptions, convert,
	core::TileCoord,
	geometry::vector_tile::LayerSelector,
	source::parse_header,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Tile to convert: an http(s) URL, a file:// URI or a local path
	#[arg(value_name = "URI")]
	uri: String,

	/// Include only this layer (repeatable)
	#[arg(short, long = "layer", value_name = "LAYER")]
	layers: Vec<String>,

	/// Zoom level of the tile
	#[arg(short)]
	z: Option<u8>,

	/// Column of the tile
	#[arg(short)]
	x: Option<u32>,

	/// Row of the tile
	#[arg(short)]
	y: Option<u32>,

	/// Extra HTTP header "Name: Value" (repeatable)
	#[arg(short = 'H', long = "header", value_name = "HEADER")]
	headers: Vec<String>,

	/// Pretty-print the JSON output
	#[arg(long)]
	pretty: bool,

	/// Round coordinates to N decimal places
	#[arg(long, value_name = "N")]
	precision: Option<u8>,

	#[command(flatten)]
	verbose: Verbosity<ErrorLevel>,
}

impl Cli {
	fn options(&self) -> Result<ConvertOptions> {
		let coord = match (self.z, self.x, self.y) {
			(Some(z), Some(x), Some(y)) => Some(TileCoord::new(z, x, y)?),
			(None, None, None) => None,
			_ => {
				debug!("incomplete tile address options, using the address from the URI");
				None
			}
		};
		Ok(ConvertOptions {
			layers: LayerSelector::from_names(self.layers.clone()),
			coord,
			headers: self.headers.iter().map(|h| parse_header(h)).collect::<Result<_>>()?,
		})
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	let json = run(&cli)?;
	println!("{json}");
	Ok(())
}

#[tokio::main]
async fn run(cli: &Cli) -> Result<String> {
	let collection = convert(&cli.uri, &cli.options()?).await?;
	collection.to_json_string(cli.precision, cli.pretty)
}
