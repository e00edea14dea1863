//! Calculatrice — noyau d’évaluation d’expressions (f64).
//!
//! Le binaire (`src/main.rs`) ajoute la ligne de commande et l’interface eframe.

pub mod noyau;
