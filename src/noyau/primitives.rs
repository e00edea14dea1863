// src/noyau/primitives.rs
//
// Primitives mathématiques (flottant f64)
// ---------------------------------------
// Chaque primitive prend 1 ou 2 `Valeur` et rend une `Valeur`.
// Indéfini est une valeur comme une autre : il entre, il ressort.
// Domaine :
// - division par |b| < EPSILON
// - racine paire d’un négatif, indice nul
// - tan au voisinage d’un pôle (|cos x| < EPSILON)
// - puissance non entière d’une base négative
// - tout résultat non fini (débordement, NaN)

use std::fmt;

use num_traits::ToPrimitive;

/// Seuil sous lequel un flottant est traité comme zéro (division, pôles de tan).
pub const EPSILON: f64 = 1e-10;

/// Indice de racine quand aucun nombre ne précède √.
pub const INDICE_RACINE_DEFAUT: f64 = 2.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Valeur {
    /// Toujours fini (voir `Valeur::depuis`).
    Nombre(f64),
    Indefini,
}

impl Valeur {
    /// Seul point d’entrée depuis un f64 brut : inf / NaN => Indefini.
    pub fn depuis(x: f64) -> Self {
        if x.is_finite() {
            Self::Nombre(x)
        } else {
            Self::Indefini
        }
    }

    pub fn nombre(self) -> Option<f64> {
        match self {
            Self::Nombre(x) => Some(x),
            Self::Indefini => None,
        }
    }

    pub fn est_indefini(self) -> bool {
        matches!(self, Self::Indefini)
    }
}

impl From<f64> for Valeur {
    fn from(x: f64) -> Self {
        Self::depuis(x)
    }
}

/// Rendu texte : "undefined" pour la sentinelle, sinon décimal le plus court
/// qui relit le même f64, avec ".0" conservé pour les entiers ("5.0", "-2.0").
impl fmt::Display for Valeur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nombre(x) => write!(f, "{x:?}"),
            Self::Indefini => f.write_str("undefined"),
        }
    }
}

/* ------------------------ Binaires ------------------------ */

pub fn add(a: Valeur, b: Valeur) -> Valeur {
    binaire(a, b, |a, b| Valeur::depuis(a + b))
}

pub fn subtract(a: Valeur, b: Valeur) -> Valeur {
    binaire(a, b, |a, b| Valeur::depuis(a - b))
}

pub fn multiply(a: Valeur, b: Valeur) -> Valeur {
    binaire(a, b, |a, b| Valeur::depuis(a * b))
}

pub fn divide(a: Valeur, b: Valeur) -> Valeur {
    binaire(a, b, |a, b| {
        if b.abs() < EPSILON {
            return Valeur::Indefini;
        }
        Valeur::depuis(a / b)
    })
}

pub fn power(a: Valeur, b: Valeur) -> Valeur {
    binaire(a, b, |a, b| {
        // base négative + exposant non entier => complexe
        if a < 0.0 && b.fract() != 0.0 {
            return Valeur::Indefini;
        }
        Valeur::depuis(a.powf(b))
    })
}

/// Racine n-ième réelle de `x`.
pub fn nth_root(x: Valeur, n: Valeur) -> Valeur {
    binaire(x, n, |x, n| {
        if n == 0.0 {
            return Valeur::Indefini;
        }
        if x < 0.0 {
            return match parite(n) {
                Some(Parite::Paire) | None => Valeur::Indefini,
                // racine réelle négative, sans passer par les complexes
                Some(Parite::Impaire) => Valeur::depuis(-(-x).powf(1.0 / n)),
            };
        }
        Valeur::depuis(x.powf(1.0 / n))
    })
}

/// Racine carrée (√ sans indice).
pub fn square_root(x: Valeur) -> Valeur {
    nth_root(x, Valeur::Nombre(INDICE_RACINE_DEFAUT))
}

/* ------------------------ Unaires ------------------------ */

pub fn square(a: Valeur) -> Valeur {
    unaire(a, |a| Valeur::depuis(a * a))
}

pub fn negate(a: Valeur) -> Valeur {
    unaire(a, |a| Valeur::depuis(-a))
}

pub fn sin(x: Valeur) -> Valeur {
    unaire(x, |x| Valeur::depuis(x.sin()))
}

pub fn cos(x: Valeur) -> Valeur {
    unaire(x, |x| Valeur::depuis(x.cos()))
}

pub fn tan(x: Valeur) -> Valeur {
    unaire(x, |x| {
        if x.cos().abs() < EPSILON {
            return Valeur::Indefini;
        }
        Valeur::depuis(x.tan())
    })
}

/* ------------------------ Outils ------------------------ */

fn binaire(a: Valeur, b: Valeur, f: impl FnOnce(f64, f64) -> Valeur) -> Valeur {
    match (a, b) {
        (Valeur::Nombre(a), Valeur::Nombre(b)) => f(a, b),
        _ => Valeur::Indefini,
    }
}

fn unaire(a: Valeur, f: impl FnOnce(f64) -> Valeur) -> Valeur {
    match a {
        Valeur::Nombre(a) => f(a),
        Valeur::Indefini => Valeur::Indefini,
    }
}

enum Parite {
    Paire,
    Impaire,
}

/// Parité d’un indice entier ; None si non entier ou hors i64.
fn parite(n: f64) -> Option<Parite> {
    if n.fract() != 0.0 {
        return None;
    }
    let k = n.to_i64()?;
    if k % 2 == 0 {
        Some(Parite::Paire)
    } else {
        Some(Parite::Impaire)
    }
}
