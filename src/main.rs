use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use clap::{Args, Parser, Subcommand};
use raylib::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slideshow_player::constants::*;
use slideshow_player::render::{self, Overlay};
use slideshow_player::slide::{SlideCache, SlideTexture};
use slideshow_player::{
    AudioBackend, DisplayMode, JsonSequenceStore, MusicBackend, PresentationMode, PresentationShell,
    SequenceSource, SequenceStore, ShellInput, ShowConfig, SimulatedBackend, SlideSequence,
    TransitionRegistry,
};

/// Full-screen slideshow player
#[derive(Parser, Debug)]
#[command(name = "slideshow-player")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Play inside a regular window instead of full screen
    #[arg(long, global = true)]
    embedded: bool,

    /// Do not open an audio device
    #[arg(long, global = true)]
    mute: bool,

    /// Base URL of shareable links shown on the end card
    #[arg(long, global = true, env = "SLIDESHOW_SHARE_BASE_URL")]
    share_base_url: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Preview a draft: an image directory or a sequence JSON file
    Preview {
        path: PathBuf,

        #[command(flatten)]
        overrides: Overrides,
    },
    /// Play a stored sequence and count the view
    View {
        id: String,

        /// Directory holding `<id>.json` records
        #[arg(long, default_value = ".")]
        store: PathBuf,
    },
    /// List the available transitions
    Transitions,
}

#[derive(Args, Debug)]
struct Overrides {
    /// Seconds each slide stays on screen
    #[arg(long)]
    duration: Option<f64>,

    /// Transition name, or "random"
    #[arg(long)]
    transition: Option<String>,

    /// Background track
    #[arg(long)]
    audio: Option<String>,

    /// Keep the track playing after the last slide
    #[arg(long)]
    loop_audio: bool,

    #[arg(long)]
    title: Option<String>,

    /// Closing message of the end card
    #[arg(long)]
    message: Option<String>,
}

impl Overrides {
    fn apply(self, sequence: &mut SlideSequence) {
        if let Some(duration) = self.duration {
            sequence.slide_duration_seconds = duration;
        }
        if self.transition.is_some() {
            sequence.transition_id = self.transition;
        }
        if self.audio.is_some() {
            sequence.audio_url = self.audio;
        }
        if self.loop_audio {
            sequence.loop_audio_independently = true;
        }
        if self.title.is_some() {
            sequence.title = self.title;
        }
        if self.message.is_some() {
            sequence.message = self.message;
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "slideshow_player=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let (source, store, mode) = match cli.command {
        Command::Transitions => {
            for name in TransitionRegistry::names() {
                println!("{name}");
            }
            return Ok(());
        }
        Command::Preview { path, overrides } => {
            let mut sequence = load_draft(&path)?;
            overrides.apply(&mut sequence);
            let root = path.parent().unwrap_or(Path::new(".")).to_path_buf();
            (SequenceSource::Draft(sequence), JsonSequenceStore::new(root), PresentationMode::Preview)
        }
        Command::View { id, store } => {
            info!("Store: {}", store.display());
            (SequenceSource::Stored { id }, JsonSequenceStore::new(store), PresentationMode::View)
        }
    };

    let config = ShowConfig {
        mode,
        display: if cli.embedded { DisplayMode::Embedded } else { DisplayMode::Fullscreen },
        share_base_url: cli.share_base_url,
        mute: cli.mute,
    };

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH / 2, RENDER_HEIGHT / 2)
        .title("Slideshow")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);
    if config.display == DisplayMode::Fullscreen {
        rl.toggle_fullscreen();
    }

    if config.mute {
        info!("Audio muted");
        return present(&mut rl, &thread, source, SimulatedBackend::default(), Box::new(store), config);
    }

    // The device must outlive every music stream opened from it
    let device = match RaylibAudio::init_audio_device() {
        Ok(device) => Some(device),
        Err(e) => {
            warn!("No audio device, playing silently: {}", e);
            None
        }
    };
    present(
        &mut rl,
        &thread,
        source,
        MusicBackend::new(device.as_ref()),
        Box::new(store),
        config,
    )
}

fn load_draft(path: &Path) -> Result<SlideSequence> {
    let sequence = if path.is_dir() {
        SlideSequence::from_image_directory(path)
    } else {
        SlideSequence::from_json_file(path)
    };
    sequence.with_context(|| format!("Failed to load draft from {}", path.display()))
}

fn present<B: AudioBackend>(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    source: SequenceSource,
    backend: B,
    store: Box<dyn SequenceStore>,
    config: ShowConfig,
) -> Result<()> {
    let mut shell = PresentationShell::mount(source, backend, store, config).with_ended_handler(|ended| {
        info!("Slideshow \"{}\" ended", ended.name);
        if let Some(link) = ended.shareable_link.as_deref() {
            info!("Share it: {}", link);
        }
    });

    if let Some(title) = shell.sequence().and_then(|s| s.title.as_deref()) {
        rl.set_window_title(thread, title);
    }

    let mut cache: SlideCache<SlideTexture> = SlideCache::new();
    let mut framebuffer = rl
        .load_render_texture(thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("Failed to create render texture: {e}"))?;
    let mut cursor_inside = true;

    // --- Main Loop ---
    while !rl.window_should_close() && !shell.is_closed() {
        // --- Input ---
        for input in poll_input(rl, &mut cursor_inside) {
            shell.handle(input);
        }

        // --- Update Logic ---
        shell.update(rl.get_frame_time());
        let frame = shell.render_state();

        // Load what this frame and the next slide change will show
        if let Some(sequence) = shell.sequence() {
            let wanted = [
                frame.current_index,
                frame.transition.and_then(|t| t.outgoing),
                frame.preload_index,
            ];
            let anchors: Vec<usize> = wanted.into_iter().flatten().collect();
            for &index in &anchors {
                if let Some(url) = sequence.slide_urls.get(index) {
                    cache.ensure(index, url, |url| SlideTexture::load(&mut *rl, thread, url));
                }
            }
            cache.retain_window(&anchors, CACHE_WINDOW);
        }

        // --- Render each frame into fixed size "framebuffer" ---
        let overlay = Overlay {
            title: shell.sequence().and_then(|s| s.title.as_deref()),
            ended: shell.ended(),
        };
        let not_found = shell.not_found();
        rl.draw_texture_mode(thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            d.clear_background(Color::BLACK);
            if let Some(id) = not_found {
                render::draw_not_found(&mut d, id);
                return;
            }
            render::draw_slides(&mut d, &frame, &cache);
            render::draw_overlay(&mut d, &frame, &overlay);
        });

        // Draw inverted copy of framebuffer to the screen
        let mut d = rl.begin_drawing(thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
    }

    shell.handle(ShellInput::Close);
    Ok(())
}

const SEEK_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

fn poll_input(rl: &RaylibHandle, cursor_inside: &mut bool) -> Vec<ShellInput> {
    let mut inputs = Vec::new();

    if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
        inputs.push(ShellInput::TogglePlay);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
        inputs.push(ShellInput::Next);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
        inputs.push(ShellInput::Previous);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_R) {
        inputs.push(ShellInput::Restart);
    }
    if rl.is_key_pressed(KeyboardKey::KEY_Q) {
        inputs.push(ShellInput::Close);
    }
    for (index, key) in SEEK_KEYS.iter().enumerate() {
        if rl.is_key_pressed(*key) {
            inputs.push(ShellInput::Seek(index));
        }
    }

    let on_screen = rl.is_cursor_on_screen();
    if on_screen {
        let delta = rl.get_mouse_delta();
        let clicked = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
        if delta.x != 0.0 || delta.y != 0.0 || clicked || !*cursor_inside {
            inputs.push(ShellInput::PointerMoved);
        }
    } else if *cursor_inside {
        inputs.push(ShellInput::PointerLeft);
    }
    *cursor_inside = on_screen;

    inputs
}
