pub mod amount;
pub mod density;
pub mod mass;
pub mod molarity;
pub mod rate;
pub mod time;
pub mod volume;

#[cfg(test)]
mod molarity_test;
#[cfg(test)]
mod volume_test;

pub use amount::Amount;
pub use density::Density;
pub use mass::Mass;
pub use molarity::Molarity;
pub use rate::{AmountRate, VolumeRate};
pub use time::Time;
pub use volume::Volume;
