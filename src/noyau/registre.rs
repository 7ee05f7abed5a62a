//! Noyau : registres figés (fonctions + constantes).
//!
//! Construits à la compilation (`phf`), donc en lecture seule pour toute la vie
//! du processus : aucun verrou, aucun état partagé mutable.

use std::f64::consts;

use num_bigint::BigUint;
use num_traits::{One, ToPrimitive};
use phf::phf_map;

/// Plus grand n tel que n! reste fini en f64.
pub const FACTORIELLE_MAX: u64 = 170;

/// Fonction du registre : arité + calcul + prédicat de domaine.
pub struct Fonction {
    pub arite: usize,
    pub calcul: fn(&[f64]) -> f64,
    pub domaine: fn(&[f64]) -> bool,
    pub domaine_txt: &'static str,
}

fn reel(_: &[f64]) -> bool {
    true
}

fn positif(x: &[f64]) -> bool {
    x[0] >= 0.0
}

fn strict_positif(x: &[f64]) -> bool {
    x[0] > 0.0
}

fn unite(x: &[f64]) -> bool {
    (-1.0..=1.0).contains(&x[0])
}

fn entier_naturel(x: &[f64]) -> bool {
    x[0] >= 0.0 && x[0].fract() == 0.0
}

/// Base négative => exposant entier exigé (sinon résultat complexe).
pub fn puissance_definie(x: &[f64]) -> bool {
    x[0] >= 0.0 || x[1].fract() == 0.0 || !x[1].is_finite()
}

/// n! exact (BigUint) puis conversion ; au-delà de 170, infini (=> dépassement).
fn factorielle(x: &[f64]) -> f64 {
    let n = x[0] as u64;
    if n > FACTORIELLE_MAX {
        return f64::INFINITY;
    }
    let mut acc = BigUint::one();
    for k in 2..=n {
        acc *= k;
    }
    acc.to_f64().unwrap_or(f64::INFINITY)
}

macro_rules! f1 {
    ($calcul:expr, $domaine:expr, $txt:expr) => {
        Fonction {
            arite: 1,
            calcul: |x: &[f64]| ($calcul)(x[0]),
            domaine: $domaine,
            domaine_txt: $txt,
        }
    };
    ($calcul:expr) => {
        f1!($calcul, reel, "ℝ")
    };
}

static FONCTIONS: phf::Map<&'static str, Fonction> = phf_map! {
    "sin" => f1!(f64::sin),
    "cos" => f1!(f64::cos),
    "tan" => f1!(f64::tan),
    "asin" => f1!(f64::asin, unite, "[-1, 1]"),
    "acos" => f1!(f64::acos, unite, "[-1, 1]"),
    "atan" => f1!(f64::atan),
    "sinh" => f1!(f64::sinh),
    "cosh" => f1!(f64::cosh),
    "tanh" => f1!(f64::tanh),
    "sqrt" => f1!(f64::sqrt, positif, "x ≥ 0"),
    // log = base 10, ln = naturel (convention fixée)
    "log" => f1!(f64::log10, strict_positif, "x > 0"),
    "ln" => f1!(f64::ln, strict_positif, "x > 0"),
    "exp" => f1!(f64::exp),
    "abs" => f1!(f64::abs),
    "ceil" => f1!(f64::ceil),
    "floor" => f1!(f64::floor),
    "degrees" => f1!(f64::to_degrees),
    "radians" => f1!(f64::to_radians),
    "factorial" => Fonction {
        arite: 1,
        calcul: factorielle,
        domaine: entier_naturel,
        domaine_txt: "entier ≥ 0",
    },
    "pow" => Fonction {
        arite: 2,
        calcul: |x: &[f64]| x[0].powf(x[1]),
        domaine: puissance_definie,
        domaine_txt: "base ≥ 0 ou exposant entier",
    },
};

static CONSTANTES: phf::Map<&'static str, f64> = phf_map! {
    "pi" => consts::PI,
    "e" => consts::E,
};

pub fn fonction(nom: &str) -> Option<&'static Fonction> {
    FONCTIONS.get(nom)
}

pub fn constante(nom: &str) -> Option<f64> {
    CONSTANTES.get(nom).copied()
}

/// Noms de fonctions, triés (pavé de l’UI, messages).
pub fn noms_fonctions() -> Vec<&'static str> {
    let mut noms: Vec<&'static str> = FONCTIONS.keys().copied().collect();
    noms.sort_unstable();
    noms
}
