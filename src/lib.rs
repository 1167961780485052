//! amivideo - Amiga 视频数据转换
//!
//! 提供以下功能:
//! - 位平面 (planar) 与 chunky 像素格式互转
//! - 4/8 位分量调色板扩展为 8 位输出颜色, 支持 Extra-Halfbrite (EHB)
//! - 普通模式和 Hold-and-Modify (HAM) 模式的 RGB 解码
//!
//! 所有函数都是纯函数, 不读写文件, 也不保留调用之间的状态。

pub mod config;
pub mod error;
pub mod geometry;
pub mod image;
pub mod viewport;

pub use config::ScreenConfig;
pub use error::{AmiVideoError, Result};
pub use geometry::{MAX_NUM_OF_BITPLANES, ScreenGeometry, scan_line_size};
pub use crate::image::{
    AGA_COLOR_BITS, Bitplanes, BitplanesMut, ContiguousBitplanes, ContiguousBitplanesMut,
    OCS_COLOR_BITS, OutputColor, SourceColor, bitplane_memory_to_chunky, bitplanes_to_chunky,
    bitplanes_to_rgb, chunky_to_bitplane_memory, chunky_to_bitplanes, chunky_to_rgb,
    colors_from_registers, compute_palette, to_rgba_bytes, to_rgba_image,
};
pub use viewport::{DisplayModeFlags, VIEWPORT_MODE_EHB, VIEWPORT_MODE_HAM, ViewportMode};

/// 测试时初始化日志, 通过 RUST_LOG 控制级别
#[cfg(test)]
pub(crate) fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
