use std::{error::Error, fs::File, path::PathBuf};

use clap::Parser;

use overfit_plot::{
    chart::{render_chart, ChartOptions},
    synthesize_curves, CurveOptions, CurveOptionsError, Curves,
};

/// Draw a synthetic training-vs-validation loss chart that illustrates overfitting. Run without arguments to write `overfitting.png` to the working directory.
#[derive(Parser, Debug, Clone)]
#[command(version)]
struct Cli {
    /// path of the PNG chart to write. An existing file is overwritten
    #[arg(short = 'o', long = "output", default_value = "overfitting.png")]
    output_file: PathBuf,

    /// width of the chart in pixels
    #[arg(long, default_value = "1000")]
    width: u32,

    /// height of the chart in pixels
    #[arg(long, default_value = "500")]
    height: u32,

    #[arg(short = 'e', long = "epochs", default_value = "50")]
    /// number of epochs to draw
    num_epochs: u32,

    #[arg(long = "divergence", default_value = "15")]
    /// the zero-based epoch index at which the validation loss starts rising
    divergence_index: usize,

    #[arg(long = "rise", default_value = "0.3")]
    /// how far the validation loss climbs between the divergence point and the last epoch
    validation_rise: f64,

    /// also write the generated curve data to this file. The format is determined by the file extension. Supported extensions are .pkl, .json, and .cbor
    #[arg(long = "data-out")]
    data_output_file: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();
    log::debug!("Using arguments {cli:?}");
    run(cli)
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    // check the data file extension and the curve options up front.
    // If either is bad, better to fail now than after drawing
    if let Some(data_output_file) = &cli.data_output_file {
        validate_output_file_extension(data_output_file)?;
    }
    let curve_options = build_curve_options(&cli)?;
    let curves = synthesize_curves(&curve_options);

    let chart_options = ChartOptions {
        output_path: cli.output_file,
        width: cli.width,
        height: cli.height,
        ..ChartOptions::default()
    };
    render_chart(&curves, &chart_options)?;
    println!(
        "{} Chart saved to {:?}",
        chrono::Local::now(),
        chart_options.output_path
    );

    if let Some(data_output_file) = &cli.data_output_file {
        serialize_curves(data_output_file, &curves)?;
    }
    Ok(())
}

/// the curve shape requested on the command line. The training loss formula itself is not configurable
fn build_curve_options(cli: &Cli) -> Result<CurveOptions, CurveOptionsError> {
    let defaults = CurveOptions::default();
    CurveOptions::new(
        cli.num_epochs,
        cli.divergence_index,
        defaults.decay_rate,
        defaults.offset,
        cli.validation_rise,
    )
}

const SUPPORTED_EXTENSIONS: [&str; 3] = ["pkl", "json", "cbor"];

fn file_extension(path: &PathBuf) -> Result<&str, Box<dyn Error>> {
    let extension = path
        .extension()
        .ok_or_else(|| {
            format!(
                "No file extension found for {:?} - unable to determine output format",
                path
            )
        })?
        .to_str()
        .ok_or_else(|| {
            format!(
                "Error converting file extension of {:?} to string",
                path
            )
        })?;
    Ok(extension)
}

fn validate_output_file_extension(output_file_path: &PathBuf) -> Result<(), Box<dyn Error>> {
    let extension = file_extension(output_file_path)?;
    if SUPPORTED_EXTENSIONS.contains(&extension) {
        Ok(())
    } else {
        Err(format!(
            "Unsupported file extension: {}. Supported extensions are: {}",
            extension,
            SUPPORTED_EXTENSIONS.join(", ")
        )
        .into())
    }
}

fn serialize_curves(data_output_file: &PathBuf, curves: &Curves) -> Result<(), Box<dyn Error>> {
    println!(
        "{} Saving curve data to file: {:?}",
        chrono::Local::now(),
        data_output_file
    );
    validate_output_file_extension(data_output_file)?;
    let mut out_file = File::create(data_output_file)?;
    match file_extension(data_output_file)? {
        "pkl" => serde_pickle::to_writer(&mut out_file, curves, Default::default())?,
        "json" => serde_json::to_writer(&mut out_file, curves)?,
        "cbor" => ciborium::into_writer(curves, &mut out_file)?,
        other => unreachable!("extension {} passed validation", other),
    }
    Ok(())
}
