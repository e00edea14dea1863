//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, démarche)
//! et offrir des opérations simples (C/CLR/AC/DEL) sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.

use calculatrice_eval::noyau::{Demarche, Valeur};

/// Motifs retirés d’un bloc par DEL.
static MOTIFS_DEL: [&str; 4] = ["sin(", "cos(", "tan(", "√("];

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub resultat: String, // nombre, ou "indéfini"
    pub indefini: bool,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            indefini: false,
            demarche: Demarche::default(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.indefini = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// DEL “intelligent” : retire d’un coup "sin(", "√(", etc., sinon un caractère.
    pub fn backspace_entree(&mut self) {
        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);

        let motif = MOTIFS_DEL.iter().find(|m| self.entree.ends_with(*m));
        match motif {
            Some(m) => self.entree.truncate(self.entree.len() - m.len()),
            None => {
                self.entree.pop();
            }
        }

        let fin = self.entree.trim_end().len();
        self.entree.truncate(fin);
        self.focus_entree = true;
    }

    /// Dépose un résultat complet (valeur + démarche).
    pub fn set_resultat(&mut self, valeur: Valeur, demarche: Demarche) {
        match valeur {
            Valeur::Nombre(_) => {
                self.resultat = valeur.to_string();
                self.indefini = false;
            }
            Valeur::Indefini => {
                self.resultat = "indéfini".to_string();
                self.indefini = true;
            }
        }
        self.demarche = demarche;
        self.focus_entree = true;
    }
}
