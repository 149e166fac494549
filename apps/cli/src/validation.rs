//! 输入验证模块
//!
//! 解析命令行给出的关节位置列表

use anyhow::{Context, Result};

/// 解析逗号分隔的关节位置
///
/// # 错误
/// 如果：
/// - 任意一项无法解析为浮点数
/// - 数量不等于 `expected`
/// - 出现 NaN 或无穷大
pub fn parse_joint_list(input: &str, expected: usize) -> Result<Vec<f64>> {
    let positions: Vec<f64> = input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().with_context(|| format!("无法解析关节位置 '{}'", s)))
        .collect::<Result<Vec<_>>>()?;

    if positions.len() != expected {
        anyhow::bail!("需要 {} 个关节位置，得到 {} 个", expected, positions.len());
    }

    for (i, &pos) in positions.iter().enumerate() {
        if !pos.is_finite() {
            anyhow::bail!(
                "关节 {} 位置无效: {}",
                i,
                if pos.is_nan() { "NaN" } else { "无穷大" }
            );
        }
    }

    Ok(positions)
}
