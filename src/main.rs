use anyhow::Result;
use app_icon_gen::icon_gen;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "app-icon-gen",
    about = "Procedurally generate the app launcher icon and its Android density variants"
)]
struct Args {
    /// Directory the asset tree is written under.
    #[clap(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Edge length of the base icon in pixels.
    #[clap(
        short,
        long,
        value_name = "PIXELS",
        default_value_t = 1024,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    size: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    icon_gen::generate_icons(args.size, &args.output)
}
