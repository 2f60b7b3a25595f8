//! Lepton kinematics used to build event selections.

use std::f64::consts::PI;
use std::ops::Add;

pub const ELECTRON_MASS: f64 = 0.000511;
pub const MUON_MASS: f64 = 0.105658;
/// J/ψ mass in GeV, the default dilepton mass window centre.
pub const JPSI_MASS: f64 = 3.096;
pub const DEFAULT_MASS_WINDOW: f64 = 1.2;
pub const DEFAULT_ISOLATION_CONE: f64 = 0.4;

/// A reconstructed lepton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lepton {
    pub pdg_id: i64,
    pub pt: f64,
    pub eta: f64,
    pub phi: f64,
}

impl Lepton {
    /// Rest mass for electrons and muons, `None` for other flavours.
    pub fn mass(&self) -> Option<f64> {
        match self.pdg_id.abs() {
            11 => Some(ELECTRON_MASS),
            13 => Some(MUON_MASS),
            _ => None,
        }
    }

    pub fn p4(&self, mass: f64) -> LorentzVector {
        LorentzVector::from_pt_eta_phi_m(self.pt, self.eta, self.phi, mass)
    }
}

/// Cartesian four-momentum (px, py, pz, E).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LorentzVector {
    pub px: f64,
    pub py: f64,
    pub pz: f64,
    pub e: f64,
}

impl LorentzVector {
    pub fn from_pt_eta_phi_m(pt: f64, eta: f64, phi: f64, m: f64) -> Self {
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let p2 = px * px + py * py + pz * pz;
        Self {
            px,
            py,
            pz,
            e: (p2 + m * m).sqrt(),
        }
    }

    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Pseudorapidity; ±inf along the beam axis.
    pub fn eta(&self) -> f64 {
        let pt = self.pt();
        if pt == 0.0 {
            return if self.pz >= 0.0 { f64::INFINITY } else { f64::NEG_INFINITY };
        }
        (self.pz / pt).asinh()
    }

    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Invariant mass; negative m² from rounding is reported as -sqrt(|m²|).
    pub fn mass(&self) -> f64 {
        let m2 = self.e * self.e - (self.px * self.px + self.py * self.py + self.pz * self.pz);
        if m2 >= 0.0 {
            m2.sqrt()
        } else {
            -(-m2).sqrt()
        }
    }

    /// Boost by velocity `(bx, by, bz)`.
    pub fn boost(&self, bx: f64, by: f64, bz: f64) -> Self {
        let b2 = bx * bx + by * by + bz * bz;
        if b2 == 0.0 {
            return *self;
        }
        let gamma = 1.0 / (1.0 - b2).sqrt();
        let bp = bx * self.px + by * self.py + bz * self.pz;
        let gamma2 = (gamma - 1.0) / b2;
        Self {
            px: self.px + gamma2 * bp * bx + gamma * bx * self.e,
            py: self.py + gamma2 * bp * by + gamma * by * self.e,
            pz: self.pz + gamma2 * bp * bz + gamma * bz * self.e,
            e: gamma * (self.e + bp),
        }
    }

    /// Velocity of this system, for boosting into the lab frame.
    pub fn boost_vector(&self) -> (f64, f64, f64) {
        (self.px / self.e, self.py / self.e, self.pz / self.e)
    }
}

impl Add for LorentzVector {
    type Output = LorentzVector;

    fn add(self, rhs: Self) -> Self {
        Self {
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
            e: self.e + rhs.e,
        }
    }
}

/// Quantity of a two-body system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwoBodyQuantity {
    Mass,
    Pt,
    Eta,
    Phi,
}

/// Kinematics of the pair `l1 + l2`. Flavours other than electrons get the
/// muon mass.
pub fn two_body(l1: &Lepton, l2: &Lepton, quantity: TwoBodyQuantity) -> f64 {
    let p = l1.p4(l1.mass().unwrap_or(MUON_MASS)) + l2.p4(l2.mass().unwrap_or(MUON_MASS));
    match quantity {
        TwoBodyQuantity::Mass => p.mass(),
        TwoBodyQuantity::Pt => p.pt(),
        TwoBodyQuantity::Eta => p.eta(),
        TwoBodyQuantity::Phi => p.phi(),
    }
}

/// Flag leptons belonging to an opposite-charge, same-flavour pair whose
/// invariant mass lies within `delta_m` of `m0`.
///
/// Pairs of unknown flavour are never candidates.
pub fn dilepton_candidates(leptons: &[Lepton], m0: f64, delta_m: f64) -> Vec<bool> {
    let mut is_cand = vec![false; leptons.len()];
    for (i, li) in leptons.iter().enumerate() {
        for (j, lj) in leptons.iter().enumerate().skip(i + 1) {
            if li.pdg_id.abs() != lj.pdg_id.abs() || li.pdg_id * lj.pdg_id > 0 {
                continue;
            }
            let Some(mass) = li.mass() else {
                continue;
            };
            let mll = (li.p4(mass) + lj.p4(mass)).mass();
            if (mll - m0).abs() > delta_m {
                continue;
            }
            is_cand[i] = true;
            is_cand[j] = true;
        }
    }
    is_cand
}

/// Wrap an azimuthal difference into `[-π, π)`.
pub fn delta_phi(phi1: f64, phi2: f64) -> f64 {
    (phi1 - phi2 + PI).rem_euclid(2.0 * PI) - PI
}

pub fn delta_r(eta1: f64, phi1: f64, eta2: f64, phi2: f64) -> f64 {
    let deta = eta1 - eta2;
    let dphi = delta_phi(phi1, phi2);
    (deta * deta + dphi * dphi).sqrt()
}

/// Flag objects `(eta, phi)` isolated from every reference by more than `cone`.
pub fn cross_clean(objects: &[(f64, f64)], references: &[(f64, f64)], cone: f64) -> Vec<bool> {
    objects
        .iter()
        .map(|&(eta, phi)| {
            references
                .iter()
                .map(|&(eta_ref, phi_ref)| delta_r(eta, phi, eta_ref, phi_ref))
                .fold(f64::INFINITY, f64::min)
                > cone
        })
        .collect()
}
