pub mod layout;
pub mod model;
pub mod motion;
pub mod view;

pub use layout::SlideLayout;
pub use model::{NavAction, NavCommand, NavKey, Navigator, Section, SectionStyle, Slide};
pub use motion::{Pose, SectionMotion, Tween};
pub use view::draw;

pub const SLIDE_DISTANCE: f64 = 100.0; // vertical travel of the text column
pub const IMAGE_SLIDE_DISTANCE: f64 = 100.0; // horizontal travel of the image
pub const TRANSITION_SECS: f64 = 0.8;
pub const IMAGE_DELAY_SECS: f64 = 0.2;
pub const IMAGE_SIZE: i32 = 500;
pub const REFERENCE_HEIGHT: f64 = 900.0;

pub const CONTAINER_MAX_WIDTH: f64 = 1280.0;
pub const CONTAINER_PADDING: f64 = 32.0;
pub const IMAGE_MAX_SIZE: f64 = 448.0;
pub const BUTTON_WIDTH: f64 = 148.0;
pub const BUTTON_HEIGHT: f64 = 48.0;
pub const TITLE_FONT_SIZE: f64 = 48.0;
pub const SUBTITLE_FONT_SIZE: f64 = 18.0;

pub const DOT_RADIUS: f64 = 4.0;
pub const DOT_SPACING: f64 = 16.0; // centre to centre
pub const DOT_BOTTOM_MARGIN: f64 = 32.0;
pub const DOT_HIT_RADIUS: f64 = 8.0;
