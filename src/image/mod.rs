//! 图像处理模块

pub mod bitmap;
pub mod bitplane;
pub mod ham;
pub mod palette;

pub use bitmap::{to_rgba_bytes, to_rgba_image};
pub use bitplane::{
    Bitplanes, BitplanesMut, ContiguousBitplanes, ContiguousBitplanesMut,
    bitplane_memory_to_chunky, bitplanes_to_chunky, chunky_to_bitplane_memory,
    chunky_to_bitplanes,
};
pub use ham::{bitplanes_to_rgb, chunky_to_rgb};
pub use palette::{
    AGA_COLOR_BITS, OCS_COLOR_BITS, OutputColor, SourceColor, colors_from_registers,
    compute_palette,
};
