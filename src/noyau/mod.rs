//! Noyau flottant
//!
//! Organisation interne :
//! - normalisation.rs : glyphes abîmés -> alphabet canonique
//! - jetons.rs        : tokenisation (+ multiplication implicite, moins unaire)
//! - operateurs.rs    : table de précédence immuable
//! - primitives.rs    : Valeur (nombre | indéfini) + opérations de domaine
//! - eval.rs          : shunting-yard à deux piles, pipeline complet
//! - cas.rs           : banc de cas "<expression>=<attendu>"

pub mod cas;
pub mod eval;
pub mod jetons;
pub mod normalisation;
pub mod operateurs;
pub mod primitives;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use eval::{eval_detaille, eval_expression, Demarche};
pub use normalisation::normalize;
pub use primitives::Valeur;
