use chrono::{Days, NaiveDate};

/// Minimal deterministic PRNG (xoshiro256**)
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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    /// Uniform integer in `[0, n)`.
    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Uniform pick from a slice.
    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    // (country, typical loan amount, spread)
    let countries: [(&str, f64, f64); 12] = [
        ("Philippines", 350.0, 150.0),
        ("Kenya", 450.0, 200.0),
        ("Cambodia", 400.0, 150.0),
        ("Uganda", 300.0, 120.0),
        ("India", 380.0, 140.0),
        ("El Salvador", 600.0, 250.0),
        ("Ecuador", 650.0, 250.0),
        ("Tajikistan", 700.0, 300.0),
        ("Peru", 900.0, 400.0),
        ("Bolivia", 1100.0, 450.0),
        ("Jordan", 1300.0, 500.0),
        ("United States", 5000.0, 2000.0),
    ];
    let sectors = [
        "Agriculture",
        "Food",
        "Retail",
        "Services",
        "Clothing",
        "Transportation",
        "Education",
        "Health",
    ];
    // One categorical value per loan; multi-borrower loans keep the whole
    // delimited list, as in the real export.
    let genders = ["female", "male", "female, female", "female, male", "male, male"];

    let first_day = NaiveDate::from_ymd_opt(2014, 1, 1).expect("valid date");
    let day_span = 3 * 365 + 200; // through mid-2017

    let output_path = "kiva_loans_cleaned.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    writer
        .write_record([
            "country",
            "borrower_genders",
            "loan_amount",
            "date",
            "term_in_months",
            "sector",
        ])
        .expect("Failed to write header");

    let n_loans = 2000;
    for _ in 0..n_loans {
        let &(country, typical, spread) = rng.pick(&countries);

        // Kiva amounts come in $25 steps.
        let amount = (rng.gauss(typical, spread).max(25.0) / 25.0).round() * 25.0;
        let date = first_day
            .checked_add_days(Days::new(rng.below(day_span)))
            .expect("date in range");
        let term = 6 + rng.below(33); // 6..=38 months

        let amount = amount.to_string();
        let date = date.to_string();
        let term = term.to_string();
        writer
            .write_record([
                country,
                *rng.pick(&genders),
                amount.as_str(),
                date.as_str(),
                term.as_str(),
                *rng.pick(&sectors),
            ])
            .expect("Failed to write record");
    }

    writer.flush().expect("Failed to flush output file");
    println!("Wrote {n_loans} loans to {output_path}");
}
