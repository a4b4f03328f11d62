use crate::domain::model::Percentage;

/// Discount of `(net, gross)` against the list price, rounded to `precision`
/// decimals. An axis with a zero list value, or one whose ratio overflows,
/// reports 0; a list price of zero on both axes yields no percentage at all.
pub fn calculate(
    net: f64,
    gross: f64,
    list_net: f64,
    list_gross: f64,
    precision: u32,
) -> Option<Percentage> {
    if list_net == 0.0 && list_gross == 0.0 {
        return None;
    }

    Some(Percentage {
        net: discount(net, list_net, precision),
        gross: discount(gross, list_gross, precision),
    })
}

fn discount(value: f64, list_value: f64, precision: u32) -> f64 {
    if list_value == 0.0 {
        return 0.0;
    }
    let raw = 100.0 - value / list_value * 100.0;
    // 非有限值無法寫入 JSON，會被存成 null
    if !raw.is_finite() {
        return 0.0;
    }
    round(raw, precision)
}

fn round(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    let rounded = (value * factor).round() / factor;
    if !rounded.is_finite() {
        // too large to carry any fractional digits
        return value + 0.0;
    }
    // `+ 0.0` folds a negative zero into a positive one
    rounded + 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_price() {
        let p = calculate(5.0, 5.0, 10.0, 10.0, 2).unwrap();
        assert_eq!(p, Percentage { net: 50.0, gross: 50.0 });
    }

    #[test]
    fn test_zero_axis() {
        assert_eq!(
            calculate(5.0, 5.0, 0.0, 10.0, 2),
            Some(Percentage { net: 0.0, gross: 50.0 })
        );
        assert_eq!(
            calculate(5.0, 5.0, 10.0, 0.0, 2),
            Some(Percentage { net: 50.0, gross: 0.0 })
        );
        assert_eq!(calculate(5.0, 5.0, 0.0, 0.0, 2), None);
    }

    #[test]
    fn test_rounding() {
        let p = calculate(3.0, 3.0, 7.0, 7.0, 2).unwrap();
        assert_eq!(p.net, 57.14);

        let p = calculate(3.0, 3.0, 7.0, 7.0, 0).unwrap();
        assert_eq!(p.gross, 57.0);
    }

    #[test]
    fn test_price_above_list_price_is_negative() {
        let p = calculate(15.0, 15.0, 10.0, 10.0, 2).unwrap();
        assert_eq!(p.net, -50.0);
    }

    #[test]
    fn test_overflowing_ratio_falls_back_to_zero() {
        let p = calculate(5.0, 5.0, 1e-320, 10.0, 2).unwrap();
        assert_eq!(p, Percentage { net: 0.0, gross: 50.0 });

        let p = calculate(1e300, 1e300, 1e-10, 1e-10, 2).unwrap();
        assert_eq!(p, Percentage { net: 0.0, gross: 0.0 });
    }

    #[test]
    fn test_huge_finite_discount_skips_rounding() {
        let p = calculate(-1e300, 5.0, 1.0, 10.0, 10).unwrap();
        assert!(p.net.is_finite());
        assert_eq!(p.net, 100.0 + 1e302);
        assert_eq!(p.gross, 50.0);
    }

    #[test]
    fn test_no_negative_zero() {
        let p = calculate(10.0, 10.0, 10.0, 10.0, 2).unwrap();
        assert!(p.net.is_sign_positive());
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"net":0.0,"gross":0.0}"#);
    }
}
