mod apple;
mod audio;
mod clock;
mod collision;
mod config;
mod game;
mod geometry;
mod input;
mod logging;
mod sink;
mod snake;
mod term;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::audio::Audio;
use crate::clock::Clock;
use crate::config::GameConfig;
use crate::game::Controller;
use crate::input::TermInput;
use crate::sink::TermSink;
use crate::term::TermRenderer;

pub type TermInt = u16;
pub type Coords = (u16, u16);

#[derive(Parser)]
#[command(author, version, about = "Eat apples, grow, don't hit the walls or yourself", long_about = None)]
struct Cli {
    /// Simulation steps per second
    #[arg(long, default_value_t = 10)]
    tick_rate: u32,

    /// Directory with ding.mp3, crash.mp3 and bg_music.mp3
    #[arg(long, value_name = "DIRECTORY", default_value = "resources")]
    resources: PathBuf,

    /// Play without sound
    #[arg(long)]
    mute: bool,

    /// Turn debugging information on
    #[arg(short, long)]
    debug: bool,

    /// Where to write the log
    #[arg(long, value_name = "FILE", default_value = "/tmp/snake.log")]
    log_file: PathBuf,
}

impl From<Cli> for GameConfig {
    fn from(cli: Cli) -> Self {
        GameConfig {
            tick_rate: cli.tick_rate,
            resources: cli.resources,
            muted: cli.mute,
            debug: cli.debug,
            log_file: cli.log_file,
        }
    }
}

fn main() -> Result<()> {
    let config = GameConfig::from(Cli::parse());
    logging::setup(&config.log_file, config.debug)?;
    log::info!("Starting with {:?}", config);

    let mut renderer = TermRenderer::new()?;
    renderer.setup()?;

    let audio = Audio::new(&config.resources, config.muted);
    log::info!("Sound {}", if audio.is_enabled() {"on"} else {"off"});
    let mut game = Controller::new(TermSink::new(renderer, audio), rand::thread_rng());
    let mut clock = Clock::new(config.tick_rate);

    // The renderer restores the terminal when the game is dropped
    let res = game.run(&mut TermInput, &mut clock);
    drop(game);

    if let Err(e) = &res {
        log::error!("{:#}", e);
    }
    res
}
