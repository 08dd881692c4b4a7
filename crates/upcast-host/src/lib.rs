mod error;
mod traits;
mod types;

pub use error::{HostError, NetworkStage};
pub use traits::ReleaseHost;
pub use types::{Asset, Release, Tag};
