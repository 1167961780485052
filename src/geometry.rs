//! 屏幕尺寸与扫描线计算

use crate::error::{AmiVideoError, Result};
use serde::{Deserialize, Serialize};

/// 最大位平面数量
pub const MAX_NUM_OF_BITPLANES: usize = 8;

/// 计算一条位平面扫描线占用的字节数
///
/// 硬件要求每条扫描线按 16 位字对齐, 所以宽度向上取整到 16 像素。
#[inline]
pub fn scan_line_size(width: usize) -> usize {
    width.div_ceil(16) * 2
}

/// 屏幕几何参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenGeometry {
    /// 宽度 (像素)
    pub width: usize,
    /// 高度 (像素)
    pub height: usize,
    /// 输出缓冲区每行字节数 (>= width)
    pub pitch: usize,
    /// 位平面数量
    pub depth: usize,
}

impl ScreenGeometry {
    /// 创建 pitch 等于 width 的几何参数
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            pitch: width,
            depth,
        }
    }

    /// 设置输出行字节数
    pub const fn with_pitch(mut self, pitch: usize) -> Self {
        self.pitch = pitch;
        self
    }

    /// 每个位平面的字节数
    ///
    /// 以下几个大小只在 [`ScreenGeometry::validate`] 通过后才保证不溢出。
    pub fn bitplane_size(&self) -> usize {
        scan_line_size(self.width) * self.height
    }

    /// 所有位平面连续存放时的总字节数
    pub fn bitplanes_size(&self) -> usize {
        self.bitplane_size() * self.depth
    }

    /// chunky 缓冲区字节数 (包含行尾填充)
    pub fn chunky_size(&self) -> usize {
        self.pitch * self.height
    }

    /// 检查宽高和行字节数, 不检查深度
    ///
    /// 所有缓冲区大小 (包括 4 字节 RGB 输出) 都必须能用 `isize` 表示。
    pub fn validate_dimensions(&self) -> Result<()> {
        let sizes_fit = scan_line_size(self.width)
            .checked_mul(self.height)
            .and_then(|size| size.checked_mul(MAX_NUM_OF_BITPLANES))
            .zip(
                self.pitch
                    .checked_mul(self.height)
                    .and_then(|size| size.checked_mul(std::mem::size_of::<u32>())),
            )
            .is_some_and(|(planar, rgb)| planar.max(rgb) <= isize::MAX as usize);

        if self.width == 0 || self.height == 0 || self.pitch < self.width || !sizes_fit {
            tracing::error!(
                "无效的屏幕尺寸: {}x{}, pitch={}",
                self.width,
                self.height,
                self.pitch
            );
            return Err(AmiVideoError::InvalidGeometry {
                width: self.width,
                height: self.height,
                pitch: self.pitch,
            });
        }

        Ok(())
    }

    /// 检查尺寸和深度
    pub fn validate(&self) -> Result<()> {
        self.validate_dimensions()?;

        if self.depth == 0 || self.depth > MAX_NUM_OF_BITPLANES {
            tracing::error!("无效的位平面深度: {}", self.depth);
            return Err(AmiVideoError::InvalidBitplaneDepth(self.depth));
        }

        Ok(())
    }

    /// HAM 模式至少需要 2 个控制位
    pub fn validate_ham(&self) -> Result<()> {
        self.validate()?;

        if self.depth < 2 {
            tracing::error!("HAM 模式需要至少 2 个位平面, 实际 {}", self.depth);
            return Err(AmiVideoError::InvalidBitplaneDepth(self.depth));
        }

        Ok(())
    }
}

/// 检查缓冲区长度是否足够
pub(crate) fn ensure_len(actual: usize, expected: usize) -> Result<()> {
    if actual < expected {
        tracing::error!("缓冲区过小: 需要 {} 字节, 实际 {} 字节", expected, actual);
        return Err(AmiVideoError::SizeMismatch { expected, actual });
    }
    Ok(())
}
