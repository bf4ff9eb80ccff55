//! Display formatting for car values (prices in zł, engine volume in cm³).

use contracts::dashboards::d400_car_statistics::capitalize;
use contracts::domain::a001_car::Fuel;

/// Groups the integer digits by three with spaces: `1234567.5` -> `"1 234 567.5"`.
pub fn group_thousands(value: f64) -> String {
    let text = value.to_string();
    let (integer_part, fraction) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let (sign, digits) = match integer_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integer_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    match fraction {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// `"32 900 zł"`
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return String::new();
    }
    format!("{} zł", group_thousands(price))
}

/// Engine volume in cm³. Values that look like liters (`1.6`) are converted.
pub fn format_vol_engine(volume: f64) -> String {
    if !volume.is_finite() {
        return String::new();
    }
    let cm3 = if volume > 0.1 && volume < 100.0 && volume.fract() != 0.0 {
        (volume * 1000.0).round()
    } else {
        volume
    };
    format!("{} cm³", group_thousands(cm3))
}

/// `"120 000 km"`
pub fn format_mileage(mileage: i64) -> String {
    format!("{} km", group_thousands(mileage as f64))
}

/// `" TOYOTA"` -> `"Toyota"`
pub fn format_brand(brand: &str) -> String {
    capitalize(brand.trim())
}

/// Polish fuel name for a raw server value
pub fn format_fuel(raw: &str) -> String {
    Fuel::display_label(raw)
}

/// Rounded and grouped, for averages on stat cards.
pub fn format_rounded(value: f64) -> String {
    group_thousands(value.round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prices() {
        assert_eq!(format_price(32900.0), "32 900 zł");
        assert_eq!(format_price(1234567.5), "1 234 567.5 zł");
        assert_eq!(format_price(999.0), "999 zł");
        assert_eq!(format_price(f64::NAN), "");
    }

    #[test]
    fn engine_volume() {
        assert_eq!(format_vol_engine(1.6), "1 600 cm³");
        assert_eq!(format_vol_engine(1998.0), "1 998 cm³");
        assert_eq!(format_vol_engine(2.0), "2 cm³");
    }

    #[test]
    fn mileage_and_brand() {
        assert_eq!(format_mileage(120000), "120 000 km");
        assert_eq!(format_mileage(-1500), "-1 500 km");
        assert_eq!(format_brand("bMW"), "Bmw");
        assert_eq!(format_fuel("LPG"), "LPG");
        assert_eq!(format_fuel("hydrogen"), "hydrogen");
    }

    #[test]
    fn rounded_averages() {
        assert_eq!(format_rounded(0.4), "0");
        assert_eq!(format_rounded(87345.2), "87 345");
    }
}
