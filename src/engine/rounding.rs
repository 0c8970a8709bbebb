// ==========================================
// 确定性用量解析引擎 - 数值取整规则
// ==========================================
// 红线: 材料不按小数采购,毛用量一律向上取整
// 红线: 浮点噪声不允许多买一个单位 (200 × 1.1 = 220, 不是 221)
// ==========================================

/// 取整前的定点容差刻度（1e-6）
const SNAP_SCALE: f64 = 1_000_000.0;

/// 按 1e-6 吸附,消除二进制浮点尾差
pub fn snap(value: f64) -> f64 {
    let scaled = value * SNAP_SCALE;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / SNAP_SCALE
}

/// 损耗系数 = 1 + waste_percent / 100
pub fn waste_multiplier(waste_percent: f64) -> f64 {
    1.0 + waste_percent / 100.0
}

/// 计算毛用量
///
/// gross = ceil(snap(net × (100 + waste) / 100)),且不低于 net
pub fn gross_with_waste(net: f64, waste_percent: f64) -> f64 {
    let raw = net * (100.0 + waste_percent) / 100.0;
    snap(raw).max(net).ceil()
}

/// 数量格式化（最多 4 位小数,去掉尾随 0）
pub fn format_quantity(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_noise_does_not_round_up() {
        // 200 * 1.1 在浮点下为 220.00000000000003
        assert_eq!(gross_with_waste(200.0, 10.0), 220.0);
        assert_eq!(gross_with_waste(10.0, 10.0), 11.0);
    }

    #[test]
    fn test_fractional_rounds_up() {
        assert_eq!(gross_with_waste(33.3333, 10.0), 37.0);
        assert_eq!(gross_with_waste(0.1, 0.0), 1.0);
        assert_eq!(gross_with_waste(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_gross_never_below_net() {
        // 吸附后略小于 net 时仍取 net 的上整
        let net = 10.000_000_1;
        assert_eq!(gross_with_waste(net, 0.0), 11.0);
    }

    #[test]
    fn test_waste_multiplier() {
        assert_eq!(waste_multiplier(10.0), 1.1);
        assert_eq!(waste_multiplier(0.0), 1.0);
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(10.0), "10");
        assert_eq!(format_quantity(1.1), "1.1");
        assert_eq!(format_quantity(33.333333), "33.3333");
        assert_eq!(format_quantity(0.0), "0");
    }
}
