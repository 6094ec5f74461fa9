//! # 光度法计算
//!
//! Beer–Lambert 定律: A = ε·c·l，即 c = A / (ε·l)。
//!
//! ## 依赖关系
//! - 被 `commands/calc/wetlab.rs` 调用

use crate::error::{LabsolError, Result};

/// Beer–Lambert：由吸光度求浓度（mol/L）
pub fn beer_lambert(absorbance: f64, epsilon: f64, pathlength_cm: f64) -> Result<f64> {
    if absorbance < 0.0 {
        return Err(LabsolError::InvalidInput(
            "Absorbance must not be negative".to_string(),
        ));
    }
    if epsilon <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Extinction coefficient must be positive".to_string(),
        ));
    }
    if pathlength_cm <= 0.0 {
        return Err(LabsolError::InvalidInput(
            "Pathlength must be positive".to_string(),
        ));
    }
    Ok(absorbance / (epsilon * pathlength_cm))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beer_lambert_example() {
        // A = 0.5，ε = 50000 M⁻¹cm⁻¹，l = 1 cm → 1.0e-5 M
        let c = beer_lambert(0.5, 50000.0, 1.0).unwrap();
        assert!((c - 1.0e-5).abs() < 1e-15);
    }

    #[test]
    fn test_beer_lambert_rejects_nonpositive() {
        assert!(beer_lambert(0.5, 0.0, 1.0).is_err());
        assert!(beer_lambert(0.5, 50000.0, 0.0).is_err());
        assert!(beer_lambert(-0.1, 50000.0, 1.0).is_err());
    }
}
