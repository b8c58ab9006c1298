pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const DEFAULT_SLIDE_DURATION: f64 = 4.0;  // Baseline dwell when a sequence has none (seconds)
pub const EDGE_SLIDE_BONUS: f64 = 1.5;        // Extra dwell for the first and last slide (seconds)
pub const AUDIO_GRACE_DELAY: f64 = 0.1;       // Delay between visual start and audio start (seconds)
pub const IDLE_HIDE_DELAY: f64 = 3.0;         // Quiet time before the controls hide (seconds)
pub const TIMER_EPSILON: f64 = 1e-9;          // Remaining time treated as "due"

pub const FIT_RATIO: f32 = 0.9;               // Slides fill at most 90% of the render surface
pub const CACHE_WINDOW: usize = 2;            // Textures kept resident on each side of the current slide
pub const DRAFT_ID: &str = "draft";           // Sentinel id of unsaved sequences
pub const RANDOM_TRANSITION_ID: &str = "random";
