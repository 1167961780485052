//! 视口模式寄存器

use serde::{Deserialize, Serialize};

/// Extra-Halfbrite 位
pub const VIEWPORT_MODE_EHB: u32 = 0x80;

/// Hold-and-Modify 位
pub const VIEWPORT_MODE_HAM: u32 = 0x800;

/// 提供显示模式标志的来源
pub trait DisplayModeFlags {
    /// 是否启用 Extra-Halfbrite
    fn is_extra_halfbrite(&self) -> bool;

    /// 是否启用 Hold-and-Modify
    fn is_hold_and_modify(&self) -> bool;
}

/// 视口模式寄存器值
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewportMode(pub u32);

impl ViewportMode {
    /// 普通模式
    pub const NORMAL: ViewportMode = ViewportMode(0);
    /// Extra-Halfbrite 模式
    pub const EXTRA_HALFBRITE: ViewportMode = ViewportMode(VIEWPORT_MODE_EHB);
    /// Hold-and-Modify 模式
    pub const HOLD_AND_MODIFY: ViewportMode = ViewportMode(VIEWPORT_MODE_HAM);

    /// 原始寄存器值
    pub const fn bits(self) -> u32 {
        self.0
    }
}

impl From<u32> for ViewportMode {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl std::ops::BitOr for ViewportMode {
    type Output = ViewportMode;

    fn bitor(self, rhs: Self) -> Self::Output {
        ViewportMode(self.0 | rhs.0)
    }
}

impl DisplayModeFlags for ViewportMode {
    fn is_extra_halfbrite(&self) -> bool {
        self.0 & VIEWPORT_MODE_EHB != 0
    }

    fn is_hold_and_modify(&self) -> bool {
        self.0 & VIEWPORT_MODE_HAM != 0
    }
}

impl DisplayModeFlags for u32 {
    fn is_extra_halfbrite(&self) -> bool {
        ViewportMode(*self).is_extra_halfbrite()
    }

    fn is_hold_and_modify(&self) -> bool {
        ViewportMode(*self).is_hold_and_modify()
    }
}
