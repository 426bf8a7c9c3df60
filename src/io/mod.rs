pub mod args;
pub mod buffer;
pub mod codec;
pub mod container;
pub mod custom;
pub mod error;
pub mod options;
pub mod persist;
pub mod primitive;
pub mod record;
pub mod stream;
pub mod string;
pub mod tag;

pub use args::*;
pub use buffer::*;
pub use codec::*;
pub use custom::*;
pub use error::*;
pub use options::*;
pub use persist::*;
pub use record::*;
pub use stream::*;
pub use tag::*;
