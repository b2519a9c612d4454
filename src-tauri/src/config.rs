//! Configuration constants and settings for the desk portfolio
//!
//! This module contains all configurable parameters such as render resolution,
//! camera easing, burst timing, and prop placement.

/// Width of the offscreen render target in pixels
pub const RENDER_WIDTH: u32 = 1280;

/// Height of the offscreen render target in pixels
pub const RENDER_HEIGHT: u32 = 720;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Camera rig settings
pub mod camera {
    /// Canonical scripted start position, behind the desk
    pub const START_POSITION: [f32; 3] = [0.0, -0.5, 5.0];

    /// Position the scripted flight eases toward
    pub const TARGET_POSITION: [f32; 3] = [0.0, -0.5, 0.0];

    /// Fraction of the remaining distance covered each frame
    pub const DAMPING: f32 = 0.1;

    /// Seconds of scripted flight before free control is handed over
    pub const SCRIPTED_DURATION: f32 = 4.0;

    /// Vertical field of view in degrees
    pub const FOV_DEGREES: f32 = 110.0;

    /// Free-mode movement speed (world units per second)
    pub const MOVE_SPEED: f32 = 2.5;

    /// Rotation speed multiplier for mouse drag
    pub const ROTATION_SPEED: f32 = 0.005;

    /// Dolly speed multiplier for scroll wheel
    pub const ZOOM_SPEED: f32 = 0.5;

    /// Maximum pitch angle (radians) to prevent camera flipping
    pub const MAX_PITCH: f32 = 1.5;

    /// Minimum pitch angle (radians) to prevent camera flipping
    pub const MIN_PITCH: f32 = -1.5;
}

/// Color burst transition settings
pub mod burst {
    /// Total spawn window in seconds
    pub const DURATION: f32 = 5.0;

    /// Number of rays spawned over the whole window
    pub const MAX_RAYS: usize = 200;

    /// Lifetime of a single ray in seconds
    pub const RAY_LIFETIME: f32 = 0.7;

    /// Radius a ray reaches at the end of its lifetime
    pub const MAX_RADIUS: f32 = 1.2;

    /// Thickness of a ray cylinder
    pub const RAY_RADIUS: f32 = 0.03;

    /// How far rays fly toward the camera over their lifetime
    pub const DEPTH_TRAVEL: f32 = 0.6;

    /// Burst center, just in front of the monitor screen
    pub const ORIGIN: [f32; 3] = [0.0, -0.3, -1.2];

    /// Saturation and lightness of ray colors
    pub const SATURATION: f32 = 0.9;
    pub const LIGHTNESS: f32 = 0.55;
}

/// Interactive prop settings
pub mod props {
    /// Seconds after mount before the resume paper accepts clicks
    pub const PAPER_UNLOCK_DELAY: f32 = 4.0;

    /// Fraction of the remaining pose distance covered each frame
    pub const PAPER_LERP: f32 = 0.1;

    /// Paper resting on the desk
    pub const PAPER_REST_POSITION: [f32; 3] = [-1.2, -1.44, -0.8];

    /// Paper held up in front of the monitor
    pub const PAPER_READING_POSITION: [f32; 3] = [0.0, -0.5, -0.4];

    /// Camera framing pose while the paper is focused
    pub const PAPER_FRAMING_POSITION: [f32; 3] = [0.0, -0.5, 0.55];

    /// Paper size (width, height)
    pub const PAPER_SIZE: [f32; 2] = [0.8, 1.1];

    /// Light switch mounted on the back wall
    pub const SWITCH_POSITION: [f32; 3] = [1.6, -0.4, -1.98];

    /// Keyboard on the desk in front of the monitor
    pub const KEYBOARD_POSITION: [f32; 3] = [0.0, -1.42, -0.6];

    /// Monitor stand position
    pub const MONITOR_POSITION: [f32; 3] = [0.0, -1.1, -1.4];

    /// Keyboard glow time scale
    pub const KEY_GLOW_TIME_SCALE: f32 = 0.8;

    /// Key color used while the room lights are on
    pub const KEY_LIT_COLOR: [f32; 3] = [0.9, 0.9, 0.9];
}

/// Light settings
pub mod lighting {
    /// Room light intensity while the switch is on (lumens)
    pub const ROOM_LIGHT_INTENSITY: f32 = 1_500_000.0;

    /// Fill light that keeps the room barely visible in the dark (lumens)
    pub const NIGHT_LIGHT_INTENSITY: f32 = 60_000.0;

    /// Ambient brightness with the switch on and off (cd/m²)
    pub const AMBIENT_LIT_BRIGHTNESS: f32 = 260.0;
    pub const AMBIENT_DARK_BRIGHTNESS: f32 = 40.0;

    /// Flashlight intensity (lumens)
    pub const FLASHLIGHT_INTENSITY: f32 = 400_000.0;

    /// Flashlight offset in front of the camera
    pub const FLASHLIGHT_OFFSET: f32 = 0.5;

    /// The flashlight aims at the pointer projected onto this plane (back wall)
    pub const FLASHLIGHT_PLANE_Z: f32 = -2.0;
}

/// Projects page settings
pub mod projects {
    /// Seconds the loading counter takes to reach 100%
    pub const LOADING_DURATION: f32 = 1.0;

    /// Category column geometry (CSS pixels)
    pub const PANEL_ORIGIN: [f32; 2] = [32.0, 112.0];
    pub const PANEL_PADDING: f32 = 16.0;
    pub const CATEGORY_ROW_WIDTH: f32 = 176.0;
    pub const CATEGORY_ROW_HEIGHT: f32 = 48.0;

    /// Item column geometry (CSS pixels)
    pub const ITEM_COLUMN_OFFSET: f32 = 240.0;
    pub const ITEM_ROW_WIDTH: f32 = 336.0;
    pub const ITEM_ROW_HEIGHT: f32 = 72.0;

    /// Spacing between rows, including the divider
    pub const ROW_GAP: f32 = 16.0;
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for printing performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}

/// Bundled assets
pub mod assets {
    /// Resume texture, relative to the working directory
    pub const RESUME_TEXTURE: &str = "assets/resume.png";
}
