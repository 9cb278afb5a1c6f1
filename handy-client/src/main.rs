use anyhow::{Context, Result};
use clap::Parser;
use handy_client::{draw_hand, draw_stats, load_calibration, HandTracker, SnapStats, TrackerConfig};
use handy_detector::{DetectorConfig, HandDetector};
use opencv::{
    core::Mat,
    highgui,
    prelude::*,
    videoio::{self, VideoCapture, VideoCaptureAPIs},
};
use std::path::PathBuf;
use std::time::{Duration, Instant};

const WINDOW_NAME: &str = "Hand Detector";

#[derive(Parser, Debug)]
#[command(author, version, about = "Gloved hand fingertip detector", long_about = None)]
struct Args {
    /// Camera device ID
    #[arg(short, long, default_value_t = 0)]
    camera: i32,

    /// File holding the glove's HSV ranges
    #[arg(short = 'f', long, default_value = "gloveHSV.txt")]
    calibration: PathBuf,

    /// Requested capture width
    #[arg(long, default_value_t = 640)]
    width: i32,

    /// Requested capture height
    #[arg(long, default_value_t = 480)]
    height: i32,

    /// Target time between snaps in milliseconds
    #[arg(long, default_value_t = 200)]
    delay_ms: u64,

    /// Log every frame's hand state as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Run without the camera window
    #[arg(long)]
    no_window: bool,
}

struct HandyApp {
    camera: VideoCapture,
    tracker: HandTracker,
    detector: HandDetector,
    stats: SnapStats,
    delay: Duration,
    json: bool,
    show_window: bool,
}

impl HandyApp {
    fn new(args: &Args) -> Result<Self> {
        // Nothing can be segmented without the glove colours
        let calibration = load_calibration(&args.calibration)?;

        log::info!("Opening camera device {}...", args.camera);
        let mut camera = VideoCapture::new(args.camera, VideoCaptureAPIs::CAP_ANY as i32)?;
        if !camera.is_opened()? {
            anyhow::bail!("Failed to open camera device {}", args.camera);
        }
        camera.set(videoio::CAP_PROP_FRAME_WIDTH, args.width as f64)?;
        camera.set(videoio::CAP_PROP_FRAME_HEIGHT, args.height as f64)?;

        let tracker_config = TrackerConfig::default();
        let tracker = HandTracker::new(&calibration, tracker_config)?;
        let detector = HandDetector::with_config(
            DetectorConfig::default().with_image_scale(tracker_config.image_scale),
        );

        Ok(Self {
            camera,
            tracker,
            detector,
            stats: SnapStats::default(),
            delay: Duration::from_millis(args.delay_ms),
            json: args.json,
            show_window: !args.no_window,
        })
    }

    fn run(&mut self) -> Result<()> {
        log::info!("Starting main loop...");

        if self.show_window {
            highgui::named_window(WINDOW_NAME, highgui::WINDOW_AUTOSIZE)?;
        }

        let mut frame = Mat::default();

        loop {
            let start = Instant::now();

            self.camera.read(&mut frame)?;
            if frame.empty() {
                log::warn!("Empty frame received");
                if self.wait(start)? {
                    break;
                }
                continue;
            }

            let state = match self.tracker.process_frame(&frame)? {
                Some(geometry) => self.detector.update(&geometry),
                None => self.detector.skip_frame(),
            };
            self.stats.record(start.elapsed());

            if self.json {
                log::info!("{}", state.to_json()?);
            }

            if self.show_window {
                let mut display_frame = frame.clone();
                draw_hand(&mut display_frame, state)?;
                draw_stats(&mut display_frame, &self.stats)?;
                highgui::imshow(WINDOW_NAME, &display_frame)?;
            }

            if self.wait(start)? {
                log::info!("Quit requested");
                break;
            }
        }

        log::info!("Processed {} frames", self.stats.count());
        Ok(())
    }

    /// Sleep out the rest of the snap delay; true when the user pressed 'q' or Esc
    fn wait(&self, start: Instant) -> Result<bool> {
        let remaining = self.delay.saturating_sub(start.elapsed());
        let key = if self.show_window {
            highgui::wait_key(remaining.as_millis().max(1) as i32)?
        } else {
            std::thread::sleep(remaining);
            -1
        };
        Ok(key == b'q' as i32 || key == 27)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.debug {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();
    }

    log::info!("Handy starting...");
    log::info!("Calibration: {}", args.calibration.display());

    let mut app = HandyApp::new(&args).context("Failed to initialize")?;
    app.run().context("Detector error")?;

    Ok(())
}
