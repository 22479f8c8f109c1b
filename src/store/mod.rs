//! Profile storage for hearth-pin.

pub mod memory;
pub mod profile;
pub mod traits;

pub use memory::InMemoryProfileStore;
pub use profile::{NewProfile, Profile, ProfileType, ProfileUpdate};
pub use traits::ProfileStore;
