pub mod collection;
pub mod lamp;

pub use collection::LampCollection;
pub use lamp::{
    BRIGHTNESS_MAX, BRIGHTNESS_MIN, COLUMNS, GLOW_MAX, GLOW_MIN, LAMP_COUNT, LAMP_SIZE, Lamp, ROWS,
};
