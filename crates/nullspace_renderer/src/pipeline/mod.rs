pub mod grid;
pub mod layout;
pub mod object;

pub use grid::GridPipeline;
pub use layout::PipelineLayouts;
pub use object::ObjectPipelines;
