//! 展示层使用的数值过滤器
//!
//! 两个操作数都按浮点数解析，任何非法输入都返回空字符串。
//! 结果溢出为无穷大或 NaN 时同样渲染为空字符串。

fn parse(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn render(result: f64) -> String {
    if result.is_finite() {
        result.to_string()
    } else {
        String::new()
    }
}

/// 乘法，结果不是有限数时返回空字符串
pub fn multiply(value: &str, arg: &str) -> String {
    match (parse(value), parse(arg)) {
        (Some(a), Some(b)) => render(a * b),
        _ => String::new(),
    }
}

/// 除法，除数为 0 或结果不是有限数时返回空字符串
pub fn divide(value: &str, arg: &str) -> String {
    match (parse(value), parse(arg)) {
        (Some(_), Some(b)) if b == 0.0 => String::new(),
        (Some(a), Some(b)) => render(a / b),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply() {
        assert_eq!(multiply("2", "3"), "6");
        assert_eq!(multiply("0.5", "85"), "42.5");
        assert_eq!(multiply("abc", "3"), "");
        assert_eq!(multiply("2", ""), "");
    }

    #[test]
    fn test_divide() {
        assert_eq!(divide("85", "100"), "0.85");
        assert_eq!(divide("10", "4"), "2.5");
        assert_eq!(divide("10", "0"), "");
        assert_eq!(divide("10", "-0"), "");
        assert_eq!(divide("x", "2"), "");
    }

    #[test]
    fn test_overflow_yields_empty() {
        assert_eq!(multiply("1e308", "10"), "");
        assert_eq!(divide("1e308", "1e-308"), "");
    }
}
