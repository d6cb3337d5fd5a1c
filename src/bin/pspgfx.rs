// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! pspgfx entry point
//!
//! Runs the demo programs headless against the software display and converts
//! images between formats.
//!
//! # Commands
//!
//! - `pspgfx view <IMAGE>`: show an image centered at the top of the screen
//! - `pspgfx move --player <IMAGE> [--background <IMAGE>]`: D-pad sprite movement
//! - `pspgfx calc`: button calculator
//! - `pspgfx convert <IN> <OUT>`: re-encode an image
//!
//! Pad input comes from `--script` (TOML); without a script nothing is
//! pressed and the demo runs until `--frames` is reached.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use pspgfx::core::{Blitter, Display, Image, NoVsync, SaveOptions, VBlank, VBlankClock};
use pspgfx::frontend::{
    AppConfig, Calculator, Demo, IdleInput, ImageViewer, InputSource, PlayerMovement, Runner,
    ScriptedInput,
};

/// Software image store, blitter and display for PSP-style demos
#[derive(Parser)]
#[command(name = "pspgfx")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PSPGFX_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Present frames as fast as possible instead of pacing to vblank
    #[arg(long, global = true)]
    no_vsync: bool,

    /// Stop after this many frames
    #[arg(long, global = true)]
    frames: Option<u64>,

    /// TOML input script to replay
    #[arg(long, global = true)]
    script: Option<PathBuf>,

    /// Save the last displayed frame to this file (.png or .jpg)
    #[arg(long, global = true)]
    screenshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show an image centered at the top of the screen
    View {
        /// PNG or JPEG file
        image: PathBuf,
    },

    /// Move a 32x32 player sprite over a background with the D-pad
    Move {
        /// Player sprite image
        #[arg(long)]
        player: PathBuf,

        /// Background image
        #[arg(long)]
        background: Option<PathBuf>,
    },

    /// Add two numbers picked with the face buttons
    Calc,

    /// Decode an image and encode it again, format chosen by extension
    Convert {
        input: PathBuf,
        output: PathBuf,

        /// Drop the alpha channel
        #[arg(long)]
        no_alpha: bool,

        /// JPEG quality (1-100)
        #[arg(long, default_value_t = 90)]
        quality: u8,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env may set RUST_LOG or name the config file
    dotenvy::dotenv().ok();

    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.config.as_deref())?;

    let mut demo: Box<dyn Demo> = match &cli.command {
        Commands::View { image } => {
            log::info!("Image path: {}", image.display());
            Box::new(ImageViewer::new(Image::open(image)?))
        }
        Commands::Move { player, background } => {
            let background = background.as_deref().map(Image::open).transpose()?;
            Box::new(PlayerMovement::new(Image::open(player)?, background))
        }
        Commands::Calc => {
            log::info!("Square = 1, Triangle = 2, Circle = 3, Cross = Calculate");
            Box::new(Calculator::new())
        }
        Commands::Convert {
            input,
            output,
            no_alpha,
            quality,
        } => {
            let options = SaveOptions {
                save_alpha: !no_alpha,
                jpeg_quality: *quality,
            };
            return convert(input, output, options);
        }
    };

    let vblank: Box<dyn VBlank> = if cli.no_vsync || !config.display.vsync {
        Box::new(NoVsync)
    } else {
        Box::new(VBlankClock::new(config.display.refresh_hz)?)
    };
    let input: Box<dyn InputSource> = match &cli.script {
        Some(path) => Box::new(ScriptedInput::load(path)?),
        None => Box::new(IdleInput),
    };

    let display = Display::new(config.display, vblank)?;
    let blitter = Blitter::from_config(&config.blitter);
    let mut runner = Runner::new(input, display, blitter).with_frame_limit(cli.frames);
    runner.run(demo.as_mut())?;

    if let Some(path) = &cli.screenshot {
        runner.display().screenshot(path, SaveOptions::default())?;
        log::info!("Screenshot saved to {}", path.display());
    }

    Ok(())
}

fn convert(input: &Path, output: &Path, options: SaveOptions) -> Result<(), Box<dyn std::error::Error>> {
    let image = Image::open(input)?;
    image.save(output, options)?;
    log::info!(
        "Converted {} ({}x{}) to {}",
        input.display(),
        image.image_width(),
        image.image_height(),
        output.display()
    );
    Ok(())
}
