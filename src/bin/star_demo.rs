use anyhow::Context;
use clap::Parser;
use neopixel_star::{CssColor, FrameQueue, NeopixelStar, Rgb, StarConfig, StarLayout};
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

/// Colors cycled through by the static demo
const STATIC_COLORS: [Rgb; 3] = [Rgb::new(1.0, 0.0, 0.0), Rgb::new(0.0, 1.0, 0.0), Rgb::new(0.0, 0.0, 1.0)];

/// Render the neopixel star element.
///
/// By default this runs the full 180 pixel star with its built-in animation
/// and prints the last frame as SVG.
#[derive(Parser, Debug)]
#[command(version)]
struct Cli {
    /// A YAML file with the element properties
    #[arg(long)]
    config: Option<PathBuf>,

    /// A JSON file with a custom pixel layout
    #[arg(long)]
    layout: Option<PathBuf>,

    /// The number of wired pixels
    #[arg(long)]
    pixels: Option<usize>,

    /// The spacing between pixels
    #[arg(long)]
    pixel_spacing: Option<f32>,

    /// The background color
    #[arg(long)]
    background: Option<CssColor>,

    /// Run the built-in animation even if the config file turns it off
    #[arg(long, conflicts_with = "static_colors")]
    animation: bool,

    /// Paint a fixed color pattern through the pixel API instead of animating
    #[arg(long = "static")]
    static_colors: bool,

    /// The number of frames to run
    #[arg(long, default_value_t = 120)]
    frames: usize,

    /// The time between two frames
    #[arg(long, default_value_t = 16)]
    frame_interval_ms: u64,

    /// Write every frame as `frame_NNNN.svg` into this directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the element's pins as JSON and exit
    #[arg(long)]
    pin_info: bool,
}

impl Cli {
    fn star_config(&self) -> anyhow::Result<StarConfig> {
        let mut config = match &self.config {
            Some(path) => {
                StarConfig::load(path).with_context(|| format!("loading config from {}", path.display()))?
            }
            // The default story: every pixel wired, animation on.
            None => StarConfig { pixels: 180, animation: true, ..Default::default() },
        };
        if let Some(pixels) = self.pixels {
            config.pixels = pixels;
        }
        if let Some(spacing) = self.pixel_spacing {
            config.pixel_spacing = spacing;
        }
        if let Some(background) = &self.background {
            config.background = background.clone();
        }
        if self.animation {
            config.animation = true;
        }
        if self.static_colors {
            config.animation = false;
        }
        config.validate()?;
        Ok(config)
    }
}

fn paint_static(star: &mut NeopixelStar, frame: usize) {
    for pixel in 0..star.config().pixels {
        star.set_pixel(pixel, STATIC_COLORS[(pixel + frame) % STATIC_COLORS.len()]);
    }
}

fn write_frame(star: &NeopixelStar, directory: &Path, frame: usize) -> anyhow::Result<()> {
    let Some(svg) = star.to_svg() else {
        return Ok(());
    };
    let path = directory.join(format!("frame_{frame:04}.svg"));
    fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.star_config()?;

    let mut star = match &cli.layout {
        Some(path) => {
            let layout =
                StarLayout::load(path).with_context(|| format!("loading layout from {}", path.display()))?;
            NeopixelStar::with_layout(config, layout)
        }
        None => NeopixelStar::new(config),
    };

    if cli.pin_info {
        println!("{}", serde_json::to_string_pretty(&star.pin_info())?);
        return Ok(());
    }
    if let Some(directory) = &cli.output {
        fs::create_dir_all(directory).with_context(|| format!("creating {}", directory.display()))?;
    }

    let mut queue = FrameQueue::new();
    star.update(&mut queue);
    log::info!(
        "running {} frames with {} pixels, animation {}",
        cli.frames,
        star.rendered_pixels(),
        if star.config().animation { "on" } else { "off" }
    );

    let interval = Duration::from_millis(cli.frame_interval_ms);
    for frame in 0..cli.frames {
        if star.config().animation {
            for handle in queue.take_due() {
                star.animation_frame_now(handle, &mut queue);
            }
        } else {
            paint_static(&mut star, frame);
        }
        if let Some(directory) = &cli.output {
            write_frame(&star, directory, frame)?;
        }
        if frame + 1 < cli.frames {
            thread::sleep(interval);
        }
    }

    if cli.output.is_none() {
        if let Some(svg) = star.to_svg() {
            print!("{svg}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_story() {
        let cli = Cli::try_parse_from(["star-demo"]).expect("failed to parse");
        let config = cli.star_config().expect("invalid config");
        assert_eq!(config.pixels, 180);
        assert!(config.animation);
        assert_eq!(config.background.as_str(), "#363");
    }

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from(["star-demo", "--pixels", "3", "--background", "#000", "--static"])
            .expect("failed to parse");
        let config = cli.star_config().expect("invalid config");
        assert_eq!(config.pixels, 3);
        assert!(!config.animation);
        assert_eq!(config.background.as_str(), "#000");
    }

    #[test]
    fn animation_flag_overrides_config() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create file");
        file.write_all(b"pixels: 5\nanimation: false\n").expect("failed to write");
        let path = file.path().to_str().expect("non utf8 path");

        let cli = Cli::try_parse_from(["star-demo", "--config", path]).expect("failed to parse");
        assert!(!cli.star_config().expect("invalid config").animation);

        let cli = Cli::try_parse_from(["star-demo", "--config", path, "--animation"]).expect("failed to parse");
        let config = cli.star_config().expect("invalid config");
        assert_eq!(config.pixels, 5);
        assert!(config.animation);
    }

    #[test]
    fn animation_conflicts_with_static() {
        assert!(Cli::try_parse_from(["star-demo", "--animation", "--static"]).is_err());
    }

    #[test]
    fn rejects_bad_background() {
        assert!(Cli::try_parse_from(["star-demo", "--background", "url(x)"]).is_err());
    }

    #[test]
    fn rejects_zero_pixels() {
        let cli = Cli::try_parse_from(["star-demo", "--pixels", "0"]).expect("failed to parse");
        assert!(cli.star_config().is_err());
    }

    #[test]
    fn static_pattern() {
        let mut star = NeopixelStar::new(StarConfig { pixels: 4, ..Default::default() });
        star.update(&mut FrameQueue::new());
        paint_static(&mut star, 1);
        assert_eq!(star.pixel_color(0), Some(smart_leds::RGB8::new(0, 255, 0)));
        assert_eq!(star.pixel_color(2), Some(smart_leds::RGB8::new(255, 0, 0)));
    }
}
