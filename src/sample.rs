//! Deterministic synthetic event records for demos and tests.

use std::f64::consts::PI;

use crate::data::model::{Dataset, FieldValue, Record};
use crate::kinematics::{
    two_body, Lepton, LorentzVector, TwoBodyQuantity, ELECTRON_MASS, JPSI_MASS, MUON_MASS,
};

const UNIT_53: f64 = 1.0 / (1u64 << 53) as f64;

/// xoshiro256** seeded through SplitMix64. Same seed, same stream.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    s: [u64; 4],
    spare_normal: Option<f64>,
}

fn splitmix64(x: &mut u64) -> u64 {
    *x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut x = seed;
        Self {
            s: std::array::from_fn(|_| splitmix64(&mut x)),
            spare_normal: None,
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let [s0, s1, s2, s3] = &mut self.s;
        let out = s1.wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = *s1 << 17;
        *s2 ^= *s0;
        *s3 ^= *s1;
        *s1 ^= *s2;
        *s0 ^= *s3;
        *s2 ^= t;
        *s3 = s3.rotate_left(45);
        out
    }

    /// Uniform in `[0, 1)` with 53 random bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 * UNIT_53
    }

    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Normal deviate (Marsaglia polar method; the second value is cached).
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z = match self.spare_normal.take() {
            Some(z) => z,
            None => loop {
                let u = 2.0 * self.next_f64() - 1.0;
                let v = 2.0 * self.next_f64() - 1.0;
                let r2 = u * u + v * v;
                if r2 > 0.0 && r2 < 1.0 {
                    let k = (-2.0 * r2.ln() / r2).sqrt();
                    self.spare_normal = Some(v * k);
                    break u * k;
                }
            },
        };
        mean + std_dev * z
    }

    pub fn exponential(&mut self, mean: f64) -> f64 {
        -mean * (1.0 - self.next_f64()).ln()
    }
}

/// `n` records with one field drawn uniformly from `[lo, hi)`.
pub fn uniform_dataset(field: &str, n: usize, lo: f64, hi: f64, seed: u64) -> Dataset {
    let mut rng = SimpleRng::new(seed);
    let records = (0..n)
        .map(|_| Record::new().with(field, rng.uniform(lo, hi)))
        .collect();
    Dataset::from_records(records)
}

/// Knobs for [`dilepton_events`].
#[derive(Debug, Clone)]
pub struct DileptonSample {
    pub events: usize,
    pub seed: u64,
    /// Fraction of events from J/ψ decays; the rest is continuum.
    pub resonance_fraction: f64,
    /// Fraction of events with a dimuon (the rest are dielectrons).
    pub muon_fraction: f64,
    /// Fraction of pairs with same-sign charges.
    pub same_sign_fraction: f64,
    pub run: String,
}

impl Default for DileptonSample {
    fn default() -> Self {
        Self {
            events: 20_000,
            seed: 42,
            resonance_fraction: 0.3,
            muon_fraction: 0.7,
            same_sign_fraction: 0.15,
            run: "2024C".into(),
        }
    }
}

/// Dilepton event records with fields `run`, `pdgId1`, `pt1`, `eta1`,
/// `phi1`, the same for lepton 2, and the derived `mll`, `ptll`, `etall`.
pub fn dilepton_events(cfg: &DileptonSample) -> Dataset {
    let mut rng = SimpleRng::new(cfg.seed);
    let records = (0..cfg.events)
        .map(|_| {
            let [l1, l2] = generate_pair(&mut rng, cfg);
            Record::new()
                .with("run", cfg.run.as_str())
                .with("pdgId1", l1.pdg_id)
                .with("pt1", l1.pt)
                .with("eta1", l1.eta)
                .with("phi1", l1.phi)
                .with("pdgId2", l2.pdg_id)
                .with("pt2", l2.pt)
                .with("eta2", l2.eta)
                .with("phi2", l2.phi)
                .with("mll", two_body(&l1, &l2, TwoBodyQuantity::Mass))
                .with("ptll", two_body(&l1, &l2, TwoBodyQuantity::Pt))
                .with("etall", two_body(&l1, &l2, TwoBodyQuantity::Eta))
        })
        .collect();
    Dataset::from_records(records)
}

/// Read the lepton pair written by [`dilepton_events`] back from a record.
pub fn lepton_pair(rec: &Record) -> Option<[Lepton; 2]> {
    let lepton = |i: u8| -> Option<Lepton> {
        let pdg_id = match rec.get(&format!("pdgId{i}"))? {
            FieldValue::Integer(id) => *id,
            other => other.as_f64()? as i64,
        };
        Some(Lepton {
            pdg_id,
            pt: rec.f64(&format!("pt{i}"))?,
            eta: rec.f64(&format!("eta{i}"))?,
            phi: rec.f64(&format!("phi{i}"))?,
        })
    };
    Some([lepton(1)?, lepton(2)?])
}

fn generate_pair(rng: &mut SimpleRng, cfg: &DileptonSample) -> [Lepton; 2] {
    let (flavour, mass) = if rng.next_f64() < cfg.muon_fraction {
        (13, MUON_MASS)
    } else {
        (11, ELECTRON_MASS)
    };

    let parent_mass = if rng.next_f64() < cfg.resonance_fraction {
        rng.gauss(JPSI_MASS, 0.04).max(2.0 * mass + 1e-3)
    } else {
        0.5 + rng.exponential(2.0)
    };
    let parent = LorentzVector::from_pt_eta_phi_m(
        rng.exponential(8.0),
        rng.uniform(-2.4, 2.4),
        rng.uniform(-PI, PI),
        parent_mass,
    );

    // Isotropic two-body decay in the parent rest frame.
    let p_star = (parent_mass * parent_mass / 4.0 - mass * mass).sqrt();
    let cos_theta = rng.uniform(-1.0, 1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();
    let phi = rng.uniform(-PI, PI);
    let e_star = parent_mass / 2.0;
    let d1 = LorentzVector {
        px: p_star * sin_theta * phi.cos(),
        py: p_star * sin_theta * phi.sin(),
        pz: p_star * cos_theta,
        e: e_star,
    };
    let d2 = LorentzVector {
        px: -d1.px,
        py: -d1.py,
        pz: -d1.pz,
        e: e_star,
    };
    let (bx, by, bz) = parent.boost_vector();

    let charge2 = if rng.next_f64() < cfg.same_sign_fraction { 1 } else { -1 };
    let to_lepton = |p: LorentzVector, pdg_id: i64| Lepton {
        pdg_id,
        pt: p.pt(),
        eta: p.eta(),
        phi: p.phi(),
    };
    [
        to_lepton(d1.boost(bx, by, bz), flavour),
        to_lepton(d2.boost(bx, by, bz), charge2 * flavour),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::{dilepton_candidates, DEFAULT_MASS_WINDOW};

    #[test]
    fn rng_is_deterministic_and_in_range() {
        let mut a = SimpleRng::new(7);
        let mut b = SimpleRng::new(7);
        for _ in 0..1000 {
            let x = a.next_f64();
            assert_eq!(x, b.next_f64());
            assert!((0.0..1.0).contains(&x));
        }
        let mut c = SimpleRng::new(8);
        assert_ne!(SimpleRng::new(7).next_u64(), c.next_u64());
    }

    #[test]
    fn gauss_moments() {
        let mut rng = SimpleRng::new(3);
        let n = 20_000;
        let xs: Vec<f64> = (0..n).map(|_| rng.gauss(5.0, 2.0)).collect();
        let mean = xs.iter().sum::<f64>() / n as f64;
        let var = xs.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n as f64;
        assert!((mean - 5.0).abs() < 0.1, "{mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "{var}");
    }

    #[test]
    fn uniform_dataset_shape() {
        let ds = uniform_dataset("mass", 100, 0.0, 10.0, 1);
        assert_eq!(ds.len(), 100);
        assert!(ds
            .records
            .iter()
            .all(|r| r.f64("mass").is_some_and(|m| (0.0..10.0).contains(&m))));
    }

    #[test]
    fn dilepton_records_are_consistent() {
        let cfg = DileptonSample {
            events: 500,
            ..DileptonSample::default()
        };
        let ds = dilepton_events(&cfg);
        assert_eq!(ds.len(), 500);
        for col in ["run", "pdgId1", "pt2", "mll", "ptll", "etall"] {
            assert!(ds.has_field(col), "{col}");
        }

        let mut jpsi = 0;
        for rec in &ds.records {
            let pair = lepton_pair(rec).unwrap();
            let mll = rec.f64("mll").unwrap();
            assert!((two_body(&pair[0], &pair[1], TwoBodyQuantity::Mass) - mll).abs() < 1e-9);
            assert!(mll > 0.0);
            if dilepton_candidates(&pair, JPSI_MASS, DEFAULT_MASS_WINDOW)
                .iter()
                .all(|&c| c)
            {
                jpsi += 1;
            }
        }
        // Resonance plus nearby continuum, minus same-sign pairs.
        assert!(jpsi > 100 && jpsi < 450, "{jpsi}");
    }

    #[test]
    fn decay_reconstructs_parent_mass() {
        let cfg = DileptonSample {
            events: 50,
            resonance_fraction: 1.0,
            same_sign_fraction: 0.0,
            ..DileptonSample::default()
        };
        let ds = dilepton_events(&cfg);
        for rec in &ds.records {
            let mll = rec.f64("mll").unwrap();
            assert!((mll - JPSI_MASS).abs() < 0.5, "{mll}");
        }
    }
}
