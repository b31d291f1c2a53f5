//! Command-line interface for enumerating covers of the built-in puzzles

use crate::algorithm::executor::{CoverProblem, SolveReport, SolverConfig};
use crate::algorithm::matrix::CoverMode;
use crate::algorithm::placement::MirrorHandling;
use crate::algorithm::pruning::Clue;
use crate::algorithm::search::SilentMonitor;
use crate::analysis::statistics::{MatrixStatistics, orientation_summary};
use crate::io::configuration::{DEFAULT_RECTANGLE_HEIGHT, DEFAULT_RECTANGLE_WIDTH, OUTPUT_PREFIX};
use crate::io::error::Result;
use crate::io::image::export_cover_as_png;
use crate::io::progress::ProgressManager;
use crate::io::text::render_text;
use crate::spatial::lattice::Lattice;
use crate::spatial::region::Region;
use crate::spatial::shapes::Catalogue;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Built-in piece set and board combinations
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Puzzle {
    /// The twelve hexiamonds on the 114-triangle hexagon-like board
    Hexiamonds,
    /// The twelve pentominoes on a rectangle
    Pentominoes,
}

impl Puzzle {
    /// Display name used in progress output
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hexiamonds => "hexiamonds",
            Self::Pentominoes => "pentominoes",
        }
    }

    /// Mirror handling used when none is given
    ///
    /// The hexiamond board holds 114 triangles, exactly the nineteen
    /// one-sided hexiamonds, so mirror images count as separate pieces there.
    pub const fn default_mirrors(self) -> MirrorHandling {
        match self {
            Self::Hexiamonds => MirrorHandling::Distinct,
            Self::Pentominoes => MirrorHandling::Free,
        }
    }
}

fn parse_clue(text: &str) -> std::result::Result<Clue, String> {
    text.parse::<Clue>().map_err(|e| e.to_string())
}

#[derive(Parser, Debug)]
#[command(name = "polycover")]
#[command(
    author,
    version,
    about = "Enumerate exact covers of lattice regions by polyomino and polyiamond pieces"
)]
/// Command-line arguments for the cover search
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Piece set and board to solve
    #[arg(long, value_enum, default_value_t = Puzzle::Hexiamonds)]
    pub puzzle: Puzzle,

    /// Rectangle width for square-lattice puzzles
    #[arg(short = 'w', long, default_value_t = DEFAULT_RECTANGLE_WIDTH)]
    pub width: usize,

    /// Rectangle height for square-lattice puzzles
    #[arg(short = 'H', long, default_value_t = DEFAULT_RECTANGLE_HEIGHT)]
    pub height: usize,

    /// Stop after this many covers
    #[arg(short = 'n', long)]
    pub max_solutions: Option<usize>,

    /// How mirror images of chiral pieces are used (default depends on the puzzle)
    #[arg(short, long, value_enum)]
    pub mirrors: Option<MirrorHandling>,

    /// Allow region cells to stay uncovered
    #[arg(long)]
    pub packing: bool,

    /// Reject covers with a fully covered 2x2 block
    #[arg(long = "no-2x2")]
    pub no_filled_blocks: bool,

    /// Ray clue NAME:CELL:DX,DY, with CELL as x,y or a,b;c,d;e,f (repeatable)
    #[arg(short, long = "clue", value_parser = parse_clue)]
    pub clues: Vec<Clue>,

    /// Directory receiving one PNG per cover
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print square-lattice covers as text
    #[arg(short, long)]
    pub print: bool,

    /// Print placement and matrix statistics before searching
    #[arg(short, long)]
    pub stats: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Piece catalogue of the selected puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if a built-in outline fails validation
    pub fn catalogue(&self) -> Result<Catalogue> {
        match self.puzzle {
            Puzzle::Hexiamonds => Catalogue::hexiamonds(),
            Puzzle::Pentominoes => Catalogue::pentominoes(),
        }
    }

    /// Region of the selected puzzle
    ///
    /// # Errors
    ///
    /// Returns an error if the rectangle dimensions are zero
    pub fn region(&self) -> Result<Region> {
        match self.puzzle {
            Puzzle::Hexiamonds => Region::hexagonish(),
            Puzzle::Pentominoes => Region::rectangle(self.width, self.height),
        }
    }

    /// Solver configuration from the flags
    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig {
            max_solutions: self.max_solutions,
            mirror_handling: self
                .mirrors
                .unwrap_or_else(|| self.puzzle.default_mirrors()),
            cover_mode: if self.packing {
                CoverMode::Packing
            } else {
                CoverMode::Exact
            },
            forbid_filled_blocks: self.no_filled_blocks,
            clues: self.clues.clone(),
        }
    }
}

/// Path of the PNG for the cover with the given index
pub fn cover_output_path(directory: &Path, index: usize) -> PathBuf {
    directory.join(format!("{OUTPUT_PREFIX}_{index:04}.png"))
}

/// Orchestrates one run: build, report, search and write covers
pub struct CoverRunner {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl CoverRunner {
    /// Create a runner with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli
            .should_show_progress()
            .then(|| ProgressManager::new(cli.puzzle.label()));

        Self {
            cli,
            progress_manager,
        }
    }

    /// Run the search and emit covers as requested
    ///
    /// # Errors
    ///
    /// Returns an error if the problem is misconfigured, an output file
    /// cannot be written, or an internal invariant breaks
    // Allow print for user feedback and requested text output
    #[allow(clippy::print_stdout, clippy::print_stderr)]
    pub fn run(&mut self) -> Result<SolveReport> {
        let catalogue = self.cli.catalogue()?;
        let region = self.cli.region()?;
        let problem = CoverProblem::new(&catalogue, region, self.cli.solver_config())?;

        if self.cli.stats {
            print!("{}", Self::statistics_report(&catalogue, &problem));
        }

        let report = match self.progress_manager {
            Some(ref mut pm) => {
                let report = problem.solve_with_monitor(pm);
                pm.finish();
                report?
            }
            None => problem.solve_with_monitor(&mut SilentMonitor)?,
        };

        if self.cli.print {
            if problem.region().lattice() == Lattice::Square {
                for (index, cover) in report.covers.iter().enumerate() {
                    println!("cover {}", index + 1);
                    println!("{}", render_text(cover, problem.region())?);
                }
            } else if !self.cli.quiet {
                eprintln!("Text output is only available for square-lattice puzzles");
            }
        }

        if let Some(ref directory) = self.cli.output {
            for (index, cover) in report.covers.iter().enumerate() {
                export_cover_as_png(cover, problem.region(), &cover_output_path(directory, index))?;
            }
        }

        if !self.cli.quiet {
            eprintln!(
                "{} covers ({}): {}",
                report.covers.len(),
                report.state,
                report.statistics
            );
        }

        Ok(report)
    }

    /// Orientation and matrix tables for `--stats`
    pub fn statistics_report(catalogue: &Catalogue, problem: &CoverProblem) -> String {
        let header = format!("{:<12} {:>5} {:>7} {:>8}\n", "shape", "cells", "proper", "mirrored");
        let shapes: String = orientation_summary(catalogue)
            .into_iter()
            .map(|summary| {
                format!(
                    "{:<12} {:>5} {:>7} {:>8}\n",
                    summary.name, summary.cells, summary.proper, summary.mirrored
                )
            })
            .collect();
        let matrix = MatrixStatistics::from_matrix(problem.matrix());

        let policies = problem.policy_names();
        let pruning = if policies.is_empty() {
            String::new()
        } else {
            format!("pruning: {}\n", policies.join(", "))
        };

        format!("{header}{shapes}\n{matrix}{pruning}")
    }
}
