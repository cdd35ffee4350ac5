use std::{
    path::{Path, PathBuf},
    task::Poll,
    time::Instant,
};

use anyhow::Context as _;
use arsnap::SpriteTarget as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "arsnap", version)]
struct Cli {
    /// Log debug diagnostics to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene description to a base photo (and optionally the final photo with bubble).
    Capture(CaptureArgs),
    /// Replay a recorded gesture script headlessly and print the resulting transform.
    Replay(ReplayArgs),
}

#[derive(Parser, Debug)]
struct CaptureArgs {
    /// Input scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Output PNG path for the base capture.
    #[arg(long)]
    out: PathBuf,

    /// Output PNG path for the final capture (base + bubble).
    #[arg(long)]
    final_out: Option<PathBuf>,

    /// Session config JSON overriding the scene's embedded one.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ReplayArgs {
    /// Input gesture script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Write the resulting state JSON here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Capture(args) => cmd_capture(args),
        Command::Replay(args) => cmd_replay(args),
    }
}

fn cmd_capture(args: CaptureArgs) -> anyhow::Result<()> {
    let mut scene = arsnap::SceneDef::from_path(&args.scene)?;
    if let Some(path) = &args.config {
        scene.session = arsnap::SessionConfig::from_path(path)?;
    } else if let Some(font) = scene.session.label.font_path.as_mut()
        && font.is_relative()
    {
        *font = scene_root(&args.scene).join(&*font);
    }
    scene.validate()?;

    let images = scene.load_images(scene_root(&args.scene))?;
    let target = arsnap::MemoryTarget::new(scene.session.sprite_box, scene.viewport);
    let mut session = arsnap::PhotoSession::new(scene.session.clone(), scene.viewport, target)?;
    session.complete_entry();
    session.set_flip(scene.transform.flip);
    session.set_rotation(scene.transform.rotation_deg);

    let mut geometry = scene.geometry;
    if geometry.sprite_element.is_none() && images.sprite.is_some() {
        geometry.sprite_element = Some(session.gestures().target().bounding_rect());
    }

    let layers = arsnap::LayerImages {
        video_frame: images.video.as_ref(),
        beam: images.beam.as_ref(),
        ground: images.ground.as_ref(),
        sprite: images.sprite.as_ref(),
    };
    let base = session.capture_photo(geometry, layers)?;
    base.raster.save_png(&args.out)?;
    tracing::info!(
        path = %args.out.display(),
        width = base.width(),
        height = base.height(),
        "base capture written"
    );

    let Some(path) = &args.final_out else {
        return Ok(());
    };
    let request = session.request_final(geometry.bubble.unwrap_or_default(), Instant::now())?;
    let slot = match images.bubble {
        Some(img) => arsnap::ImageSlot::Ready(img),
        None => arsnap::ImageSlot::Failed("scene has no bubble layer".to_owned()),
    };
    let final_photo = match request.poll(&slot, Instant::now()) {
        Poll::Ready(photo) => photo,
        Poll::Pending => anyhow::bail!("bubble slot unexpectedly pending"),
    };
    final_photo.raster.save_png(path)?;
    tracing::info!(path = %path.display(), kind = ?final_photo.kind, "final capture written");
    Ok(())
}

fn cmd_replay(args: ReplayArgs) -> anyhow::Result<()> {
    let script = arsnap::ReplayScript::from_path(&args.script)?;
    script.session.validate()?;

    let target = arsnap::MemoryTarget::new(script.session.sprite_box, script.viewport);
    let mut ctl = arsnap::GestureController::new(script.viewport, target);
    for ev in &script.events {
        match ev {
            arsnap::ScriptEvent::Down(p) => {
                ctl.on_pointer_down(p);
            }
            arsnap::ScriptEvent::Move(p) => {
                ctl.on_pointer_move(p);
            }
            arsnap::ScriptEvent::Up(p) => {
                ctl.on_pointer_up(p);
            }
            arsnap::ScriptEvent::Cancel => ctl.on_pointer_cancel(),
            arsnap::ScriptEvent::Wheel(w) => {
                ctl.on_wheel(w);
            }
            arsnap::ScriptEvent::Frame => {
                ctl.on_animation_frame();
            }
            arsnap::ScriptEvent::CompleteEntry => ctl.complete_entry(),
            arsnap::ScriptEvent::Reset => ctl.reset_transform(),
            arsnap::ScriptEvent::Flip { flip } => ctl.set_flip(*flip),
            arsnap::ScriptEvent::Rotate { deg } => ctl.set_rotation(*deg),
            arsnap::ScriptEvent::Resize { viewport } => ctl.set_viewport(*viewport),
        }
    }
    ctl.flush();

    let report = serde_json::json!({
        "state": ctl.state(),
        "css_transform": ctl.target().css_transform(),
        "bounding_rect": ctl.target().bounding_rect(),
    });
    let text = serde_json::to_string_pretty(&report).context("serialize replay report")?;
    match &args.out {
        Some(path) => std::fs::write(path, text + "\n")
            .with_context(|| format!("write replay report '{}'", path.display()))?,
        None => println!("{text}"),
    }
    Ok(())
}

fn scene_root(scene: &Path) -> &Path {
    scene.parent().unwrap_or_else(|| Path::new("."))
}
