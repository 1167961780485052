//! 屏幕配置

use crate::error::Result;
use crate::geometry::ScreenGeometry;
use crate::image::ham::bitplanes_to_rgb;
use crate::image::palette::{OCS_COLOR_BITS, OutputColor, SourceColor, compute_palette};
use crate::viewport::ViewportMode;
use serde::{Deserialize, Serialize};

/// 一个屏幕的完整显示设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenConfig {
    /// 屏幕几何参数
    pub geometry: ScreenGeometry,
    /// 每个颜色分量的位数
    #[serde(default = "default_color_bits")]
    pub num_of_color_bits: u32,
    /// 视口模式寄存器值
    #[serde(default)]
    pub viewport_mode: ViewportMode,
}

fn default_color_bits() -> u32 {
    OCS_COLOR_BITS
}

impl ScreenConfig {
    /// 使用 OCS 颜色位数和普通模式创建配置
    pub fn new(geometry: ScreenGeometry) -> Self {
        Self {
            geometry,
            num_of_color_bits: OCS_COLOR_BITS,
            viewport_mode: ViewportMode::NORMAL,
        }
    }

    /// 设置颜色位数
    pub fn with_color_bits(mut self, num_of_color_bits: u32) -> Self {
        self.num_of_color_bits = num_of_color_bits;
        self
    }

    /// 设置视口模式
    pub fn with_viewport_mode(mut self, viewport_mode: ViewportMode) -> Self {
        self.viewport_mode = viewport_mode;
        self
    }

    /// 计算此配置下的输出调色板
    pub fn palette(&self, colors: &[SourceColor]) -> Result<Vec<OutputColor>> {
        compute_palette(colors, self.num_of_color_bits, &self.viewport_mode)
    }

    /// 将连续存放的位平面解码为 RGB 颜色
    pub fn decode(&self, bitplanes: &[u8], colors: &[SourceColor]) -> Result<Vec<OutputColor>> {
        bitplanes_to_rgb(
            bitplanes,
            &self.geometry,
            colors,
            self.num_of_color_bits,
            &self.viewport_mode,
        )
    }
}
