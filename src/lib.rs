mod app;
pub mod canvas;
pub mod clock;
pub mod config;
pub mod geometry;
pub mod hand;
mod registry;
pub mod theme;
pub mod time_state;
mod wayland;

pub use app::AnalogClock;
pub use canvas::Canvas;
pub use clock::{Clock, ClockState, Padding, Painter};
pub use config::Config;
pub use hand::{HandKind, Surface};
pub use theme::{Bgra, Theme};
pub use time_state::{HandAngles, TimeState};
pub use wayland::Wayland;
