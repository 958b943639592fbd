/// Tensor Utilities
pub mod tensors;

/// Renderer Utilities
pub mod renderer;
