//! Totem matrix headless runner
//!
//! Runs one of the simulations with scripted input and writes the encoded
//! frames, back to back, to a file. Handy for feeding a display without a
//! browser and for eyeballing output via a PPM preview.
//!
//! ```text
//! totem-matrix <particles|game> [--frames N] [--out FILE] [--config JSON_FILE] [--ppm FILE]
//! ```

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::fs::File;
    use std::io::{self, BufWriter, Write};
    use std::path::{Path, PathBuf};

    use glam::Vec2;

    use totem_matrix::clock::{Delivery, FrameSink, SendTicket, Simulation, SimulationClock};
    use totem_matrix::consts::{MATRIX_SIZE, SEND_TICK_MS};
    use totem_matrix::session::{FlappySession, ParticleToy};
    use totem_matrix::sim::Lifecycle;
    use totem_matrix::{Config, FrameBuffer};

    const USAGE: &str = "usage: totem-matrix <particles|game> [--frames N] [--out FILE] [--config JSON_FILE] [--ppm FILE]";

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Particles,
        Game,
    }

    #[derive(Debug)]
    struct Args {
        mode: Mode,
        frames: u32,
        out: PathBuf,
        config: Option<PathBuf>,
        ppm: Option<PathBuf>,
    }

    impl Args {
        fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, String> {
            let mode = match args.next().as_deref() {
                Some("particles") => Mode::Particles,
                Some("game") => Mode::Game,
                _ => return Err(USAGE.to_string()),
            };
            let mut parsed = Self {
                mode,
                frames: 100,
                out: PathBuf::from("frames.bin"),
                config: None,
                ppm: None,
            };
            while let Some(flag) = args.next() {
                let value = args
                    .next()
                    .ok_or_else(|| format!("missing value for {}\n{}", flag, USAGE))?;
                match flag.as_str() {
                    "--frames" => {
                        parsed.frames = value
                            .parse()
                            .map_err(|_| format!("--frames expects a number, got '{}'", value))?;
                    }
                    "--out" => parsed.out = PathBuf::from(value),
                    "--config" => parsed.config = Some(PathBuf::from(value)),
                    "--ppm" => parsed.ppm = Some(PathBuf::from(value)),
                    _ => return Err(format!("unknown flag {}\n{}", flag, USAGE)),
                }
            }
            Ok(parsed)
        }
    }

    /// Appends every frame to a file; remembers the first write error
    struct FileSink {
        writer: BufWriter<File>,
        error: Option<io::Error>,
        frames: u32,
    }

    impl FrameSink for FileSink {
        fn send(&mut self, _ticket: SendTicket, frame: &[u8]) -> Delivery {
            if self.error.is_none() {
                match self.writer.write_all(frame) {
                    Ok(()) => self.frames += 1,
                    Err(e) => {
                        log::error!("Failed writing frame: {}", e);
                        self.error = Some(e);
                    }
                }
            }
            Delivery::Completed
        }
    }

    /// Pointer circling the centre, one step per send tick
    fn scripted_pointer(step: u32) -> Vec2 {
        let angle = step as f32 * 0.15;
        let centre = MATRIX_SIZE as f32 / 2.0;
        Vec2::new(centre, centre) + Vec2::new(angle.cos(), angle.sin()) * 18.0
    }

    /// Start immediately and flap whenever the bird sinks below the middle
    fn scripted_flap(session: &mut FlappySession) {
        let state = session.game().state();
        let low = state.bird.y > MATRIX_SIZE as f32 / 2.0 && state.bird.vy >= 0.0;
        if state.lifecycle == Lifecycle::Initial || low {
            session.activate();
        }
    }

    fn drive<S: Simulation>(
        clock: &mut SimulationClock<S>,
        frames: u32,
        sink: &mut FileSink,
        mut script: impl FnMut(&mut S, u32),
    ) {
        for step in 0..frames {
            script(clock.sim_mut(), step);
            clock.advance(SEND_TICK_MS, sink);
            if sink.error.is_some() {
                break;
            }
        }
    }

    /// Binary PPM of the frame as the display would show it
    fn write_ppm(path: &Path, frame: &FrameBuffer) -> io::Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        write!(out, "P6\n{} {}\n255\n", FrameBuffer::WIDTH, FrameBuffer::HEIGHT)?;
        out.write_all(frame.as_rgb_bytes())?;
        out.flush()
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let args = Args::parse(std::env::args().skip(1))?;
        let config = match &args.config {
            Some(path) => Config::from_json(&std::fs::read_to_string(path)?)?,
            None => Config::default(),
        };
        let codec = config.codec;
        log::info!(
            "Running {:?} for {} frames ({} codec) into {}",
            args.mode,
            args.frames,
            codec.as_str(),
            args.out.display()
        );

        let mut sink = FileSink {
            writer: BufWriter::new(File::create(&args.out)?),
            error: None,
            frames: 0,
        };

        let last = match args.mode {
            Mode::Particles => {
                let mut clock = SimulationClock::new(ParticleToy::from_config(&config), codec);
                drive(&mut clock, args.frames, &mut sink, |toy, step| {
                    toy.set_pointer(Some(scripted_pointer(step)));
                });
                codec.encode(clock.frame())
            }
            Mode::Game => {
                let mut clock = SimulationClock::new(FlappySession::from_config(&config), codec);
                drive(&mut clock, args.frames, &mut sink, |session, _| {
                    scripted_flap(session)
                });
                log::info!("Final score {}", clock.sim().game().state().score);
                codec.encode(clock.frame())
            }
        };

        if let Some(e) = sink.error.take() {
            return Err(e.into());
        }
        sink.writer.flush()?;
        log::info!("Wrote {} frames", sink.frames);

        if let Some(path) = &args.ppm {
            write_ppm(path, &codec.decode(&last)?)?;
            log::info!("Preview written to {}", path.display());
        }
        Ok(())
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = native::run() {
        log::error!("{}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser entry point is `platform::web::init`
}
