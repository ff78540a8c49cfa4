//! shinten-export - Shinten course export tool
//!
//! Converts a Wavefront OBJ export into engine-ready course models: one OBJ
//! per material partition (within the u16 vertex budget), a course.toml
//! manifest, and optionally a .mat material script.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use shinten_export::course;

#[derive(Parser)]
#[command(name = "shinten-export")]
#[command(about = "Shinten course export tool")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an OBJ scene into a course directory
    Convert {
        /// Input .obj file
        input: PathBuf,

        /// Output course directory
        #[arg(short, long, default_value = "Course")]
        output: PathBuf,

        /// Directory textures are resolved against
        #[arg(short, long, default_value = "textures")]
        texture_dir: PathBuf,
    },

    /// Parse and partition without writing output
    Check {
        /// Input .obj file
        input: PathBuf,

        /// Directory textures are resolved against
        #[arg(short, long, default_value = "textures")]
        texture_dir: PathBuf,
    },

    /// Generate a material script (.mat) skeleton from the OBJ's materials
    Materials {
        /// Input .obj file
        input: PathBuf,

        /// Output .mat file (default: input with .mat extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory textures are resolved against
        #[arg(short, long, default_value = "textures")]
        texture_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            texture_dir,
        } => {
            tracing::info!("Converting {:?} -> {:?}", input, output);
            course::convert_course(&input, &output, &texture_dir)?;
            tracing::info!("Done!");
        }

        Commands::Check { input, texture_dir } => {
            tracing::info!("Checking {:?}", input);
            course::check_course(&input, &texture_dir)?;
            tracing::info!("OK");
        }

        Commands::Materials {
            input,
            output,
            texture_dir,
        } => {
            let output = output.unwrap_or_else(|| {
                input.with_extension(course::MATERIAL_SCRIPT_EXTENSION)
            });
            tracing::info!("Generating material script {:?} -> {:?}", input, output);

            let scene = shinten_export::read_obj(&input, &texture_dir)?;
            course::write_material_script(&scene, &output)?;
            tracing::info!("Done!");
        }
    }

    Ok(())
}
