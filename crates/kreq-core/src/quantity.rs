//! Kubernetes quantity string parsing
//!
//! Converts quantity strings (`500m`, `2`, `128Mi`, `1G`) into canonical
//! integer units: millicores for CPU, bytes for memory. All accumulation
//! downstream happens in these base units; mebibyte/gibibyte/core values
//! exist only as display conversions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Resource dimension a quantity is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Cpu,
    Memory,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::Cpu => write!(f, "cpu"),
            Dimension::Memory => write!(f, "memory"),
        }
    }
}

/// A parsed quantity in its canonical base unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity {
    pub dimension: Dimension,
    /// Millicores for CPU, bytes for memory
    pub canonical: u64,
}

impl Quantity {
    pub fn new(dimension: Dimension, canonical: u64) -> Self {
        Self {
            dimension,
            canonical,
        }
    }

    /// Whole cores, for display only
    pub fn cores(&self) -> f64 {
        self.canonical as f64 / 1000.0
    }

    /// Mebibytes, for display only
    pub fn mebibytes(&self) -> f64 {
        self.canonical as f64 / (1024.0 * 1024.0)
    }

    /// Gibibytes, for display only
    pub fn gibibytes(&self) -> f64 {
        self.canonical as f64 / (1024.0 * 1024.0 * 1024.0)
    }
}

/// Parse a Kubernetes quantity string into its canonical base unit.
///
/// Pure function of the input string; no locale dependence.
pub fn parse(raw: &str, dimension: Dimension) -> Result<Quantity, ParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(ParseError::Negative {
            value: raw.to_string(),
        });
    }

    let (mantissa, suffix) = match trimmed.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => trimmed.split_at(idx),
        None => (trimmed, ""),
    };

    match dimension {
        Dimension::Cpu => parse_cpu(raw, mantissa, suffix),
        Dimension::Memory => parse_memory(raw, mantissa, suffix),
    }
}

/// Suffixless values are whole cores and may be fractional; `m` values are
/// already millicores and must be integral.
fn parse_cpu(raw: &str, mantissa: &str, suffix: &str) -> Result<Quantity, ParseError> {
    match suffix {
        "" => {
            let millicores = scale_decimal(raw, mantissa, 1000)?;
            Ok(Quantity::new(Dimension::Cpu, millicores))
        }
        "m" => {
            if mantissa.contains('.') {
                return Err(ParseError::FractionalWithSuffix {
                    value: raw.to_string(),
                });
            }
            let millicores = mantissa
                .parse::<u64>()
                .map_err(|_| ParseError::InvalidMantissa {
                    value: raw.to_string(),
                })?;
            Ok(Quantity::new(Dimension::Cpu, millicores))
        }
        _ => Err(ParseError::UnknownSuffix {
            value: raw.to_string(),
            suffix: suffix.to_string(),
        }),
    }
}

/// Binary suffixes scale by powers of 1024, decimal suffixes by powers of
/// 1000; suffixless values are raw bytes.
fn parse_memory(raw: &str, mantissa: &str, suffix: &str) -> Result<Quantity, ParseError> {
    let multiplier: u64 = match suffix {
        "" => 1,
        "Ki" => 1 << 10,
        "Mi" => 1 << 20,
        "Gi" => 1 << 30,
        "Ti" => 1 << 40,
        "K" => 1_000,
        "M" => 1_000_000,
        "G" => 1_000_000_000,
        "T" => 1_000_000_000_000,
        _ => {
            return Err(ParseError::UnknownSuffix {
                value: raw.to_string(),
                suffix: suffix.to_string(),
            })
        }
    };

    let bytes = scale_decimal(raw, mantissa, multiplier)?;
    Ok(Quantity::new(Dimension::Memory, bytes))
}

/// Multiply a decimal mantissa by an integer unit multiplier using integer
/// arithmetic, rounding any sub-unit remainder half away from zero.
fn scale_decimal(raw: &str, mantissa: &str, multiplier: u64) -> Result<u64, ParseError> {
    let invalid = || ParseError::InvalidMantissa {
        value: raw.to_string(),
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((int_part, frac_part)) => (int_part, frac_part),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(invalid());
    }
    // A second dot lands in frac_part and fails the digit parse below.
    let int_value: u128 = if int_part.is_empty() {
        0
    } else {
        int_part.parse().map_err(|_| invalid())?
    };

    let frac = frac_part.trim_end_matches('0');
    if frac.len() > 18 {
        return Err(ParseError::PrecisionTooFine {
            value: raw.to_string(),
        });
    }
    let frac_value: u128 = if frac.is_empty() {
        0
    } else {
        frac.parse().map_err(|_| invalid())?
    };

    let multiplier = multiplier as u128;
    let mut scaled = int_value.checked_mul(multiplier).ok_or_else(|| {
        ParseError::Overflow {
            value: raw.to_string(),
        }
    })?;
    if frac_value > 0 {
        let denominator = 10u128.pow(frac.len() as u32);
        scaled = scaled
            .checked_add((frac_value * multiplier + denominator / 2) / denominator)
            .ok_or_else(|| ParseError::Overflow {
                value: raw.to_string(),
            })?;
    }

    u64::try_from(scaled).map_err(|_| ParseError::Overflow {
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_millicore_suffix() {
        assert_eq!(parse("500m", Dimension::Cpu).unwrap().canonical, 500);
        assert_eq!(parse("100m", Dimension::Cpu).unwrap().canonical, 100);
        assert_eq!(parse("0m", Dimension::Cpu).unwrap().canonical, 0);
    }

    #[test]
    fn cpu_whole_cores_scale_to_millicores() {
        assert_eq!(parse("2", Dimension::Cpu).unwrap().canonical, 2000);
        assert_eq!(parse("0", Dimension::Cpu).unwrap().canonical, 0);
    }

    #[test]
    fn cpu_fractional_cores() {
        assert_eq!(parse("0.5", Dimension::Cpu).unwrap().canonical, 500);
        assert_eq!(parse("1.25", Dimension::Cpu).unwrap().canonical, 1250);
        assert_eq!(parse("0.001", Dimension::Cpu).unwrap().canonical, 1);
    }

    #[test]
    fn cpu_sub_millicore_rounds_half_away_from_zero() {
        assert_eq!(parse("0.0005", Dimension::Cpu).unwrap().canonical, 1);
        assert_eq!(parse("0.0004", Dimension::Cpu).unwrap().canonical, 0);
    }

    #[test]
    fn cpu_fractional_millicores_rejected() {
        assert_eq!(
            parse("1.5m", Dimension::Cpu),
            Err(ParseError::FractionalWithSuffix {
                value: "1.5m".to_string()
            })
        );
    }

    #[test]
    fn cpu_unknown_suffix_rejected() {
        assert!(matches!(
            parse("2cores", Dimension::Cpu),
            Err(ParseError::UnknownSuffix { .. })
        ));
        assert!(matches!(
            parse("128Mi", Dimension::Cpu),
            Err(ParseError::UnknownSuffix { .. })
        ));
    }

    #[test]
    fn memory_binary_suffixes() {
        assert_eq!(parse("1Ki", Dimension::Memory).unwrap().canonical, 1024);
        assert_eq!(
            parse("128Mi", Dimension::Memory).unwrap().canonical,
            128 * 1024 * 1024
        );
        assert_eq!(
            parse("2Gi", Dimension::Memory).unwrap().canonical,
            2 * 1024 * 1024 * 1024
        );
        assert_eq!(
            parse("1Ti", Dimension::Memory).unwrap().canonical,
            1u64 << 40
        );
    }

    #[test]
    fn memory_decimal_suffixes() {
        assert_eq!(parse("1K", Dimension::Memory).unwrap().canonical, 1000);
        assert_eq!(
            parse("1G", Dimension::Memory).unwrap().canonical,
            1_000_000_000
        );
        assert_eq!(
            parse("5T", Dimension::Memory).unwrap().canonical,
            5_000_000_000_000
        );
    }

    #[test]
    fn binary_scales_compose() {
        let one_gi = parse("1Gi", Dimension::Memory).unwrap().canonical;
        let one_mi = parse("1Mi", Dimension::Memory).unwrap().canonical;
        assert_eq!(one_gi, 1024 * one_mi);
    }

    #[test]
    fn decimal_scales_compose() {
        let one_g = parse("1G", Dimension::Memory).unwrap().canonical;
        let one_m = parse("1M", Dimension::Memory).unwrap().canonical;
        assert_eq!(one_g, 1000 * one_m);
    }

    #[test]
    fn binary_and_decimal_families_never_cross_equate() {
        let binary = parse("1Gi", Dimension::Memory).unwrap().canonical;
        let decimal = parse("1G", Dimension::Memory).unwrap().canonical;
        assert_ne!(binary, decimal);
    }

    #[test]
    fn memory_suffixless_is_raw_bytes() {
        assert_eq!(
            parse("1048576", Dimension::Memory).unwrap().canonical,
            1024 * 1024
        );
    }

    #[test]
    fn memory_fractional_mantissa_with_suffix() {
        assert_eq!(
            parse("1.5Gi", Dimension::Memory).unwrap().canonical,
            1_610_612_736
        );
        assert_eq!(parse("0.5Ki", Dimension::Memory).unwrap().canonical, 512);
    }

    #[test]
    fn empty_and_negative_rejected() {
        assert_eq!(parse("", Dimension::Cpu), Err(ParseError::Empty));
        assert_eq!(parse("   ", Dimension::Memory), Err(ParseError::Empty));
        assert!(matches!(
            parse("-1", Dimension::Cpu),
            Err(ParseError::Negative { .. })
        ));
        assert!(matches!(
            parse("-128Mi", Dimension::Memory),
            Err(ParseError::Negative { .. })
        ));
    }

    #[test]
    fn garbage_mantissa_rejected() {
        assert!(matches!(
            parse("abc", Dimension::Memory),
            Err(ParseError::UnknownSuffix { .. })
        ));
        assert!(matches!(
            parse("1.2.3", Dimension::Cpu),
            Err(ParseError::InvalidMantissa { .. })
        ));
        assert!(matches!(
            parse(".", Dimension::Cpu),
            Err(ParseError::InvalidMantissa { .. })
        ));
        assert!(matches!(
            parse("m", Dimension::Cpu),
            Err(ParseError::InvalidMantissa { .. })
        ));
    }

    #[test]
    fn excess_fractional_precision_rejected() {
        assert!(matches!(
            parse("0.1234567890123456789Gi", Dimension::Memory),
            Err(ParseError::PrecisionTooFine { .. })
        ));
    }

    #[test]
    fn exponent_notation_rejected() {
        assert!(matches!(
            parse("123e6", Dimension::Memory),
            Err(ParseError::UnknownSuffix { .. })
        ));
    }

    #[test]
    fn display_conversions() {
        let q = parse("1536Mi", Dimension::Memory).unwrap();
        assert_eq!(q.mebibytes(), 1536.0);
        assert_eq!(q.gibibytes(), 1.5);

        let q = parse("2500m", Dimension::Cpu).unwrap();
        assert_eq!(q.cores(), 2.5);
    }
}
