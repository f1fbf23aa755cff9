//! Generate a synthetic `used_car_dataset.csv` in the working directory.
//!
//! The output mimics the raw export this app is pointed at: prices are
//! rupee strings with Indian digit grouping (`"₹ 4,50,000"`), mileage is
//! `"70,000 km"`, and a small share of cells is left empty so the missing
//! value counters have something to report.

use anyhow::Result;

const OUTPUT_PATH: &str = "used_car_dataset.csv";
const N_ROWS: usize = 2000;

/// (brand, relative weight, typical new price in rupees)
const BRANDS: &[(&str, u64, f64)] = &[
    ("Maruti Suzuki", 28, 700_000.0),
    ("Hyundai", 20, 850_000.0),
    ("Honda", 12, 1_100_000.0),
    ("Tata", 10, 800_000.0),
    ("Mahindra", 8, 1_200_000.0),
    ("Toyota", 7, 1_600_000.0),
    ("Ford", 5, 900_000.0),
    ("Renault", 4, 650_000.0),
    ("Volkswagen", 3, 1_000_000.0),
    ("Kia", 3, 1_150_000.0),
    ("Skoda", 2, 1_300_000.0),
    ("BMW", 1, 4_500_000.0),
];

const FUEL_TYPES: &[&str] = &["Petrol", "Diesel", "CNG", "Hybrid"];
const TRANSMISSIONS: &[&str] = &["Manual", "Automatic"];
const OWNERS: &[&str] = &["first", "second", "third"];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(0xCA7_10AD);
    let mut writer = csv::Writer::from_path(OUTPUT_PATH)?;

    writer.write_record([
        "Brand",
        "Year",
        "kmDriven",
        "Transmission",
        "Owner",
        "FuelType",
        "AskPrice",
    ])?;

    let total_weight: u64 = BRANDS.iter().map(|(_, w, _)| w).sum();

    for _ in 0..N_ROWS {
        let (brand, base_price) = pick_brand(&mut rng, total_weight);
        let year = 2006 + (rng.next_u64() % 18) as i64;
        let age = 2024 - year;

        let km = (age as f64 * 12_000.0 * (0.5 + rng.uniform())).max(1_000.0);
        let wear = 1.0 - (km / 400_000.0).min(0.3);
        let price = base_price * 0.88f64.powi(age as i32) * wear * (0.85 + 0.3 * rng.uniform());

        // ~2% of mileage cells left empty.
        let km_cell = if rng.next_u64() % 50 == 0 {
            String::new()
        } else {
            format!("{} km", western_grouping(km as u64))
        };
        let year_cell = year.to_string();
        let price_cell = format!("₹ {}", indian_grouping(price as u64));

        writer.write_record([
            brand,
            year_cell.as_str(),
            km_cell.as_str(),
            TRANSMISSIONS[(rng.next_u64() % TRANSMISSIONS.len() as u64) as usize],
            OWNERS[(rng.next_u64() % OWNERS.len() as u64) as usize],
            FUEL_TYPES[(rng.next_u64() % FUEL_TYPES.len() as u64) as usize],
            price_cell.as_str(),
        ])?;
    }

    writer.flush()?;
    println!("Wrote {N_ROWS} listings to {OUTPUT_PATH}");
    Ok(())
}

fn pick_brand(rng: &mut SimpleRng, total_weight: u64) -> (&'static str, f64) {
    let mut roll = rng.next_u64() % total_weight;
    for &(name, weight, base) in BRANDS {
        if roll < weight {
            return (name, base);
        }
        roll -= weight;
    }
    let (name, _, base) = BRANDS[0];
    (name, base)
}

/// `450000` → `"4,50,000"`: last three digits, then groups of two.
fn indian_grouping(n: u64) -> String {
    let digits = n.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let head_bytes = head.as_bytes();
    let mut i = head_bytes.len();
    while i > 0 {
        let start = i.saturating_sub(2);
        groups.push(std::str::from_utf8(&head_bytes[start..i]).unwrap());
        i = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}

/// `70000` → `"70,000"`: groups of three.
fn western_grouping(n: u64) -> String {
    let digits = n.to_string();
    let bytes = digits.as_bytes();
    let mut groups = Vec::new();
    let mut i = bytes.len();
    while i > 0 {
        let start = i.saturating_sub(3);
        groups.push(std::str::from_utf8(&bytes[start..i]).unwrap());
        i = start;
    }
    groups.reverse();
    groups.join(",")
}

// ---------------------------------------------------------------------------
// Minimal deterministic PRNG (xoshiro256**)
// ---------------------------------------------------------------------------

struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform draw in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indian_grouping_splits_after_three() {
        assert_eq!(indian_grouping(500), "500");
        assert_eq!(indian_grouping(4500), "4,500");
        assert_eq!(indian_grouping(450_000), "4,50,000");
        assert_eq!(indian_grouping(12_345_678), "1,23,45,678");
    }

    #[test]
    fn western_grouping_splits_by_three() {
        assert_eq!(western_grouping(999), "999");
        assert_eq!(western_grouping(70_000), "70,000");
        assert_eq!(western_grouping(1_234_567), "1,234,567");
    }
}
