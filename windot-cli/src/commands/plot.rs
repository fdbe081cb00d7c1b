//! Plot command: align, detect matches, lay out and write the dot plot

use anyhow::{Context, Result};
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use windot_core::{write_regions, Alignment, IndelScanner};
use windot_render::{
    render_to_file, DotPlot, DotPlotOptions, ExportOptions, OutputFormat, Plot, PlotSet, PostScriptSurface,
};

use super::{load_alignment, resolve_params};
use crate::config::Config;
use crate::error::CliError;
use crate::Preset;

#[derive(Args, Debug, Clone)]
pub struct PlotArgs {
    /// FASTA/FASTQ file; the first and last records are compared
    #[arg(short, long)]
    pub input: PathBuf,

    /// Records are already aligned
    #[arg(long)]
    pub prealigned: bool,

    /// Recommended window and threshold for a sequence type
    #[arg(long)]
    pub preset: Option<Preset>,

    /// Positions compared per grid coordinate
    #[arg(short, long)]
    pub window: Option<usize>,

    /// Equal positions required within a window
    #[arg(short, long)]
    pub threshold: Option<usize>,

    /// Draw axes and tics
    #[arg(long, conflicts_with = "no_axes")]
    pub axes: bool,

    /// Plot without axes
    #[arg(long)]
    pub no_axes: bool,

    /// Marker size
    #[arg(long)]
    pub dot_size: Option<i64>,

    /// Content-to-device scale
    #[arg(long)]
    pub scale: Option<f64>,

    /// Leave sequence names out of the title
    #[arg(long)]
    pub no_names: bool,

    /// Window title, used as the document title
    #[arg(long)]
    pub title: Option<String>,

    /// Output file (.svg, .png, .ps or .eps)
    #[arg(short, long)]
    pub out: PathBuf,

    /// PostScript page scale relative to the canvas
    #[arg(long)]
    pub ps_scale: Option<f64>,

    /// Stamp PostScript output with its creation time
    #[arg(long)]
    pub timestamp: bool,

    /// Write the alignment report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Write indel regions of both aligned rows to this file
    #[arg(long)]
    pub indels: Option<PathBuf>,

    /// Shortest gap run written to --indels
    #[arg(long)]
    pub min_indel: Option<usize>,
}

pub fn execute(config: &Config, args: PlotArgs) -> Result<()> {
    log::info!("Input: {}", args.input.display());
    log::info!("Output file: {}", args.out.display());

    let format = OutputFormat::from_path(&args.out).map_err(|e| CliError::invalid_format(e.to_string()))?;
    log::info!("Output format: {}", format);

    let params = resolve_params(config, args.preset, args.window, args.threshold)?;
    let scanner = match &args.indels {
        Some(_) => Some(indel_scanner(config, args.min_indel)?),
        None => None,
    };
    let ps_scale = args.ps_scale.unwrap_or(config.output.ps_scale);
    if format == OutputFormat::PostScript {
        PostScriptSurface::new(ps_scale).map_err(|e| CliError::validation(e.to_string()))?;
    }

    let alignment = load_alignment(&args.input, args.prealigned || config.alignment.prealigned)?;

    let with_axes = if args.no_axes {
        false
    } else {
        args.axes || config.plot.with_axes
    };
    let (seqname1, seqname2) = if args.no_names || !config.plot.show_names {
        (None, None)
    } else {
        (Some(alignment.id1.clone()), Some(alignment.id2.clone()))
    };
    let options = DotPlotOptions {
        params,
        with_axes,
        dot_size: args.dot_size.unwrap_or(config.plot.dot_size),
        seqname1,
        seqname2,
        primary_color: config.plot.primary_color()?,
        secondary_color: config.plot.secondary_color()?,
        background: config.plot.background()?,
    };

    let content = DotPlot::new(&alignment.aligned1, &alignment.aligned2, options)
        .map_err(|e| CliError::validation(e.to_string()))?;
    let stats = content.matches().statistics();
    log::info!(
        "Found {} matches ({} primary, {} on gap rows)",
        stats.total,
        stats.primary,
        stats.secondary
    );

    let scale = args.scale.unwrap_or(config.plot.scale);
    let plot = Plot::setup(content, scale).map_err(|e| CliError::validation(e.to_string()))?;
    let (w, h) = plot.canvas_size();
    log::debug!("Canvas {}x{}", w, h);

    // nothing is written until layout has succeeded
    if let Some(report) = &args.report {
        std::fs::write(report, alignment.report())
            .with_context(|| format!("Failed to write alignment report: {}", report.display()))?;
        log::info!("wrote {}", report.display());
    }
    if let (Some(scanner), Some(bed)) = (scanner, &args.indels) {
        write_indels(&scanner, &alignment, bed)?;
    }

    let mut plots = PlotSet::new();
    let id = plots.add(plot, args.title.clone());

    let export = ExportOptions {
        ps_scale,
        timestamp: args.timestamp || config.output.timestamp,
        title: plots.title(id).map(str::to_string),
        comment: Some(format!(
            "windot {} | window={} threshold={} | {} vs {}",
            env!("CARGO_PKG_VERSION"),
            params.window,
            params.threshold,
            alignment.id1,
            alignment.id2
        )),
    };
    if let Some(plot) = plots.get(id) {
        render_to_file(plot, &args.out, &export)
            .with_context(|| format!("Failed to render {}", args.out.display()))?;
    }

    for title in plots.close_all() {
        log::debug!("Closed {}", title);
    }
    Ok(())
}

fn indel_scanner(config: &Config, min_indel: Option<usize>) -> Result<IndelScanner> {
    let scanner = IndelScanner::new(min_indel.unwrap_or(config.indel.min_length))
        .map_err(|e| CliError::validation(e.to_string()))?
        .with_gap(config.indel.gap_byte()?);
    Ok(scanner)
}

fn write_indels(scanner: &IndelScanner, alignment: &Alignment, path: &Path) -> Result<()> {
    let regions = scanner.scan_alignment(alignment);
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    write_regions(BufWriter::new(file), &regions)?;
    log::info!("wrote {} indel regions to {}", regions.len(), path.display());
    Ok(())
}
