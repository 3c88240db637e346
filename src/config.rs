//! Centralized configuration constants for the clock app
//!
//! All magic numbers and tunable parameters should be defined here.

/// Layout constants (in logical pixels, will be scaled by DPI)
pub mod layout {
    /// Height of the top bar holding the back button
    pub const TOP_BAR_HEIGHT: f32 = 40.0;
    /// General padding around content areas
    pub const PADDING: f32 = 16.0;
    /// Main menu button size
    pub const MENU_BUTTON_WIDTH: f32 = 180.0;
    pub const MENU_BUTTON_HEIGHT: f32 = 40.0;
    /// Vertical gap between main menu buttons
    pub const MENU_BUTTON_GAP: f32 = 12.0;
    /// Back button size in the clock view
    pub const BACK_BUTTON_WIDTH: f32 = 80.0;
    pub const BACK_BUTTON_HEIGHT: f32 = 28.0;
    /// Settings screen rows
    pub const SETTINGS_ROW_WIDTH: f32 = 280.0;
    pub const SETTINGS_ROW_HEIGHT: f32 = 32.0;
    pub const SETTINGS_ROW_GAP: f32 = 8.0;
    /// Space above the first settings row for the screen title
    pub const SETTINGS_TITLE_HEIGHT: f32 = 56.0;
    /// Console input line height
    pub const CONSOLE_INPUT_HEIGHT: f32 = 30.0;
    /// Console output area height when expanded
    pub const CONSOLE_OUTPUT_HEIGHT: f32 = 140.0;
    /// Console line spacing
    pub const CONSOLE_LINE_HEIGHT: f32 = 16.0;
}

/// Timing constants (in milliseconds)
pub mod timing {
    /// Clock tick period
    pub const TICK_MS: u64 = 1000;
    /// Cursor blink interval for the console input
    pub const CURSOR_BLINK_MS: u64 = 500;
}

/// Rendering constants
pub mod rendering {
    /// Font size for menu and console text
    pub const UI_FONT_SIZE: f32 = 14.0;
    /// Font size for console text
    pub const CONSOLE_FONT_SIZE: f32 = 12.0;
    /// Fallback monospace character width (before font measurement)
    pub const FALLBACK_CHAR_WIDTH: f32 = 7.2;
}

/// Analog clock engine constants
pub mod clock {
    /// Hand length as a fraction of the face radius
    pub const HOUR_SCALE_FACTOR: f32 = 0.4;
    pub const MINUTE_SCALE_FACTOR: f32 = 0.5;
    pub const SECOND_SCALE_FACTOR: f32 = 0.55;

    /// Default pivot ratio for hour/minute hands (center of the round base)
    pub const DEFAULT_HAND_PIVOT: (f32, f32) = (0.5, 0.82);

    /// Scale override bounds in resize mode
    pub const MIN_SCALE: f32 = 0.1;
    pub const MAX_SCALE: f32 = 5.0;
    /// Scale change per resize key press
    pub const RESIZE_STEP: f32 = 0.1;

    /// Pivot ratio clamp used when baking an offset into a pivot
    pub const MIN_BAKED_RATIO: f32 = 0.001;
    pub const MAX_BAKED_RATIO: f32 = 0.999;

    /// Canvas size assumed before the first real layout
    pub const FALLBACK_CANVAS_SIZE: u32 = 300;
    /// Smallest usable face radius
    pub const MIN_RADIUS: u32 = 20;
    /// Smallest face bitmap edge
    pub const MIN_FACE_SIZE: u32 = 10;
    /// Largest face or hand bitmap edge, as a multiple of the canvas diagonal
    pub const MAX_RASTER_FACTOR: f32 = 3.0;

    /// Geometry file written next to the settings file
    pub const GEOMETRY_FILE_NAME: &str = "clock_pivots.json";
    /// Asset base names, searched with the extensions below
    pub const FACE_ASSET: &str = "analog_clock";
    pub const HOUR_ASSET: &str = "analog_clock_hour_hand";
    pub const MINUTE_ASSET: &str = "analog_clock_minute_hand";
    pub const SECOND_ASSET: &str = "analog_clock_second_hand";
    pub const ASSET_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "tif", "tiff", "png"];
}
