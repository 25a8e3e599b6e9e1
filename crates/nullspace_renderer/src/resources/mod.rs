pub mod buffer;
pub mod depth;
pub mod object_buffer;

pub use depth::DepthTarget;
pub use object_buffer::{ObjectBuffer, ObjectUniform};
