use seamcarve::{calculate_energy, energy_to_image, Axis, CarveOptions, PixelGrid, SeamCarver};
use std::process;

extern crate clap;
extern crate image;

use clap::{crate_authors, crate_version, value_t, App, AppSettings, Arg, ArgMatches, SubCommand};
use tracing::{info, Level};

fn main() {
    let matches = App::new("seamcarve")
        .version(crate_version!())
        .author(crate_authors!())
        .about("Content-aware image resizing by seam carving")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .global(true)
                .help("Log progress to stderr; repeat for more detail"),
        )
        .subcommand(
            SubCommand::with_name("carve")
                .about("Shrink an image along one axis")
                .arg(
                    Arg::with_name("input")
                        .help("The image to carve")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("output")
                        .help("Where to write the carved image")
                        .required(true)
                        .index(2),
                )
                .arg(
                    Arg::with_name("axis")
                        .short("a")
                        .long("axis")
                        .takes_value(true)
                        .possible_values(&["columns", "rows"])
                        .default_value("columns")
                        .help("Remove columns (narrower) or rows (shorter)"),
                )
                .arg(
                    Arg::with_name("scale")
                        .short("s")
                        .long("scale")
                        .takes_value(true)
                        .default_value("0.9")
                        .help("Fraction of the axis to keep, in (0, 1]"),
                ),
        )
        .subcommand(
            SubCommand::with_name("energy")
                .about("Write an image's energy map as a grayscale image")
                .arg(
                    Arg::with_name("input")
                        .help("The image to measure")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::with_name("output")
                        .help("Where to write the energy map")
                        .required(true)
                        .index(2),
                ),
        )
        .get_matches();

    // -v may land on either side of the subcommand name.
    let verbosity = matches.subcommand().1.map_or(0, |sub| sub.occurrences_of("verbose"));
    let level = match verbosity.max(matches.occurrences_of("verbose")) {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run(&matches) {
        eprintln!("seamcarve: {}", err);
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    match matches.subcommand() {
        ("carve", Some(args)) => carve(args),
        ("energy", Some(args)) => energy(args),
        _ => unreachable!("clap requires a subcommand"),
    }
}

fn load(args: &ArgMatches) -> Result<PixelGrid, failure::Error> {
    let path = args.value_of("input").unwrap_or_default();
    let image = image::open(path)?.to_rgb8();
    info!(path, width = image.width(), height = image.height(), "loaded image");
    Ok(PixelGrid::from_image(&image))
}

fn carve(args: &ArgMatches) -> Result<(), failure::Error> {
    let axis: Axis = value_t!(args, "axis", Axis)?;
    let scale = value_t!(args, "scale", f64)?;
    let options = CarveOptions::new(axis, scale)?;

    let image = load(args)?;
    let carved = SeamCarver::new().carve(&image, &options)?;
    let (width, height) = carved.dimensions();
    info!(width, height, "carved image");

    carved
        .into_image()
        .save(args.value_of("output").unwrap_or_default())?;
    Ok(())
}

fn energy(args: &ArgMatches) -> Result<(), failure::Error> {
    let image = load(args)?;
    let energy = calculate_energy(&image)?;
    energy_to_image(&energy).save(args.value_of("output").unwrap_or_default())?;
    Ok(())
}
