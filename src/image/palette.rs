//! 调色板定义和扩展

use crate::error::{AmiVideoError, Result};
use crate::viewport::DisplayModeFlags;
use byteorder::{BigEndian, ByteOrder};
use serde::{Deserialize, Serialize};

/// OCS/ECS 芯片组每个颜色分量的位数
pub const OCS_COLOR_BITS: u32 = 4;

/// AGA 芯片组每个颜色分量的位数
pub const AGA_COLOR_BITS: u32 = 8;

/// 原始调色板颜色, 每个分量只使用低 `numOfColorBits` 位
///
/// 与 ILBM 文件的 CMAP 条目结构相同。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SourceColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// 从 12 位颜色寄存器值 (0x0RGB) 创建 4 位分量颜色
    pub const fn from_rgb12(value: u16) -> Self {
        Self {
            r: ((value >> 8) & 0xF) as u8,
            g: ((value >> 4) & 0xF) as u8,
            b: (value & 0xF) as u8,
        }
    }

    /// 每个分量右移一位 (Extra-Halfbrite 的半亮度颜色)
    pub const fn halfbrite(self) -> Self {
        Self {
            r: self.r >> 1,
            g: self.g >> 1,
            b: self.b >> 1,
        }
    }

    /// 将各分量左移扩展为 8 位输出颜色
    fn scale(self, shift: u32) -> OutputColor {
        OutputColor::new(self.r << shift, self.g << shift, self.b << shift)
    }
}

/// 从大端序的 12 位颜色寄存器数据读取调色板, 每个寄存器占 2 字节
pub fn colors_from_registers(data: &[u8]) -> Result<Vec<SourceColor>> {
    if data.len() % 2 != 0 {
        tracing::error!("颜色寄存器数据长度不是偶数: {}", data.len());
        return Err(AmiVideoError::OddRegisterData(data.len()));
    }

    Ok(data
        .chunks_exact(2)
        .map(|word| SourceColor::from_rgb12(BigEndian::read_u16(word)))
        .collect())
}

/// 输出颜色, 布局与 SDL_Color 相同 (r, g, b, 对齐字节)
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutputColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// 仅用于对齐
    pub unused: u8,
}

impl OutputColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, unused: 0 }
    }

    /// 创建黑色
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// 创建白色
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }
}

/// 计算 8 位分量调色板
///
/// 每个分量左移 `8 - num_of_color_bits` 位 (低位补零, 不做线性缩放)。
/// 启用 Extra-Halfbrite 时在末尾追加一半亮度的颜色, 结果长度加倍。
pub fn compute_palette<M: DisplayModeFlags + ?Sized>(
    colors: &[SourceColor],
    num_of_color_bits: u32,
    viewport_mode: &M,
) -> Result<Vec<OutputColor>> {
    if num_of_color_bits == 0 || num_of_color_bits > 8 {
        tracing::error!("无效的颜色位数: {}", num_of_color_bits);
        return Err(AmiVideoError::InvalidColorBits(num_of_color_bits));
    }

    let halfbrite = viewport_mode.is_extra_halfbrite();
    let shift = 8 - num_of_color_bits;

    tracing::debug!(
        "计算调色板: {} 种颜色, {} 位分量, EHB={}",
        colors.len(),
        num_of_color_bits,
        halfbrite
    );

    let result_len = if halfbrite {
        colors.len() * 2
    } else {
        colors.len()
    };
    let mut result = Vec::with_capacity(result_len);

    result.extend(colors.iter().map(|color| color.scale(shift)));

    if halfbrite {
        result.extend(colors.iter().map(|color| color.halfbrite().scale(shift)));
    }

    Ok(result)
}
