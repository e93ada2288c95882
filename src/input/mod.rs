pub mod events;
pub mod router;


pub use events::*;
pub use router::*;
