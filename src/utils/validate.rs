use crate::models::entries::requests::UpsertEntryRequest;

/// 课程名、节点名的最大长度（字符数）
pub const MAX_NAME_LENGTH: usize = 255;

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Name must not be empty");
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err("Name must be at most 255 characters");
    }
    Ok(())
}

pub fn validate_year(year: i32) -> Result<(), &'static str> {
    if !(1900..=2200).contains(&year) {
        return Err("Year must be between 1900 and 2200");
    }
    Ok(())
}

/// 权重只在兄弟节点之间相对比较，没有上限
pub fn validate_weight(weight: f64) -> Result<(), &'static str> {
    if !weight.is_finite() {
        return Err("Weight must be a finite number");
    }
    if weight < 0.0 {
        return Err("Weight must not be negative");
    }
    Ok(())
}

pub fn validate_threshold(value: f64) -> Result<(), &'static str> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err("Threshold must be between 0 and 100");
    }
    Ok(())
}

/// 只检查显式给出的字段，省略的字段沿用原值
pub fn validate_entry(req: &UpsertEntryRequest) -> Result<(), &'static str> {
    for value in [req.earned, req.max].into_iter().flatten().flatten() {
        if !value.is_finite() || value < 0.0 {
            return Err("Earned and max points must be non-negative numbers");
        }
    }
    if let Some(Some(rate)) = req.rate
        && (!rate.is_finite() || !(0.0..=100.0).contains(&rate))
    {
        return Err("Rate must be between 0 and 100");
    }
    for value in [req.attended, req.total].into_iter().flatten().flatten() {
        if value < 0 {
            return Err("Attendance counts must be non-negative");
        }
    }
    if let Some(adjustment) = req.adjustment
        && !adjustment.is_finite()
    {
        return Err("Adjustment must be a finite number");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("線形代数").is_ok());
        assert!(validate_name("   ").is_err());
        assert!(validate_name(&"a".repeat(256)).is_err());
        assert!(validate_name(&"あ".repeat(255)).is_ok());
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(0.0).is_ok());
        assert!(validate_weight(100.0).is_ok());
        assert!(validate_weight(-1.0).is_err());
        assert!(validate_weight(250.0).is_ok());
        assert!(validate_weight(-0.5).is_err());
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(60.0).is_ok());
        assert!(validate_threshold(-0.1).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_entry() {
        let ok = UpsertEntryRequest {
            node_id: 1,
            earned: Some(Some(8.0)),
            max: Some(Some(10.0)),
            adjustment: Some(-150.0),
            ..Default::default()
        };
        assert!(validate_entry(&ok).is_ok());

        let cleared = UpsertEntryRequest {
            node_id: 1,
            earned: Some(None),
            rate: Some(None),
            ..Default::default()
        };
        assert!(validate_entry(&cleared).is_ok());

        let negative = UpsertEntryRequest {
            node_id: 1,
            earned: Some(Some(-1.0)),
            ..Default::default()
        };
        assert!(validate_entry(&negative).is_err());

        let bad_rate = UpsertEntryRequest {
            node_id: 1,
            rate: Some(Some(120.0)),
            ..Default::default()
        };
        assert!(validate_entry(&bad_rate).is_err());

        let bad_total = UpsertEntryRequest {
            node_id: 1,
            total: Some(Some(-3)),
            ..Default::default()
        };
        assert!(validate_entry(&bad_total).is_err());

        let nan_adjustment = UpsertEntryRequest {
            node_id: 1,
            adjustment: Some(f64::NAN),
            ..Default::default()
        };
        assert!(validate_entry(&nan_adjustment).is_err());
    }
}
