//! 错误类型定义

use thiserror::Error;

/// 转换错误类型
#[derive(Error, Debug)]
pub enum AmiVideoError {
    #[error("无效的屏幕尺寸: width={width}, height={height}, pitch={pitch}")]
    InvalidGeometry {
        width: usize,
        height: usize,
        pitch: usize,
    },

    #[error("无效的位平面深度: {0}")]
    InvalidBitplaneDepth(usize),

    #[error("缓冲区大小不匹配: 需要 {expected}, 实际 {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("无效的颜色位数: {0}")]
    InvalidColorBits(u32),

    #[error("颜色寄存器数据长度必须为偶数, 实际 {0} 字节")]
    OddRegisterData(usize),

    #[error("调色板索引超出范围: {index} (调色板长度 {len})")]
    PaletteIndexOutOfRange { index: usize, len: usize },
}

pub type Result<T> = std::result::Result<T, AmiVideoError>;
