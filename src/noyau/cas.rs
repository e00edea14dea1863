// src/noyau/cas.rs
//
// Banc de cas : lignes "<expression>=<attendu>"
// --------------------------------------------
// - <attendu> : un décimal, ou le littéral `undefined`
// - comparaison approchée (rel 1e-6, abs 1e-12)
// - une ligne mal formée compte comme un échec, le banc continue

use approx::relative_eq;
use thiserror::Error;

use super::eval::eval_expression;
use super::primitives::Valeur;

const TOLERANCE_REL: f64 = 1e-6;
const TOLERANCE_ABS: f64 = 1e-12;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurCas {
    #[error("ligne {numero}: il faut exactement un '=' ({ligne:?})")]
    LigneMalformee { numero: usize, ligne: String },

    #[error("ligne {numero}: valeur attendue illisible ({texte:?})")]
    AttenduInvalide { numero: usize, texte: String },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Attendu {
    Nombre(f64),
    Indefini,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Cas {
    pub numero: usize,
    pub expression: String,
    pub attendu: Attendu,
}

#[derive(Clone, Debug)]
pub struct Verdict {
    pub numero: usize,
    pub ligne: String,
    /// None si la ligne elle-même est illisible.
    pub obtenu: Option<Valeur>,
    pub erreur: Option<String>,
}

impl Verdict {
    pub fn reussi(&self) -> bool {
        self.erreur.is_none()
    }
}

#[derive(Clone, Debug, Default)]
pub struct Rapport {
    pub verdicts: Vec<Verdict>,
}

impl Rapport {
    pub fn echecs(&self) -> usize {
        self.verdicts.iter().filter(|v| !v.reussi()).count()
    }

    pub fn tout_reussi(&self) -> bool {
        self.echecs() == 0
    }
}

/// Lit une ligne "<expression>=<attendu>" (numéro 1-based pour les messages).
pub fn lire_cas(numero: usize, ligne: &str) -> Result<Cas, ErreurCas> {
    let ligne = ligne.trim();
    let mut morceaux = ligne.split('=');

    let (Some(expression), Some(attendu), None) =
        (morceaux.next(), morceaux.next(), morceaux.next())
    else {
        return Err(ErreurCas::LigneMalformee {
            numero,
            ligne: ligne.to_string(),
        });
    };

    let attendu = match attendu.trim() {
        "undefined" => Attendu::Indefini,
        texte => texte
            .parse::<f64>()
            .map(Attendu::Nombre)
            .map_err(|_| ErreurCas::AttenduInvalide {
                numero,
                texte: texte.to_string(),
            })?,
    };

    Ok(Cas {
        numero,
        expression: expression.to_string(),
        attendu,
    })
}

/// Compare une valeur obtenue à l’attendu ; Err(message) si ça ne colle pas.
pub fn verifier(attendu: Attendu, obtenu: Valeur) -> Result<(), String> {
    match (attendu, obtenu) {
        (Attendu::Indefini, Valeur::Indefini) => Ok(()),
        (Attendu::Nombre(a), Valeur::Nombre(o))
            if relative_eq!(
                o,
                a,
                epsilon = TOLERANCE_ABS,
                max_relative = TOLERANCE_REL
            ) =>
        {
            Ok(())
        }
        (Attendu::Indefini, o) => Err(format!("attendu undefined, obtenu {o}")),
        (Attendu::Nombre(a), o) => Err(format!("attendu {a:?}, obtenu {o}")),
    }
}

/// Exécute chaque ligne non vide du texte.
pub fn executer_cas(texte: &str) -> Rapport {
    let mut rapport = Rapport::default();

    for (i, ligne) in texte.lines().enumerate() {
        if ligne.trim().is_empty() {
            continue;
        }
        let numero = i + 1;

        let verdict = match lire_cas(numero, ligne) {
            Ok(cas) => {
                let obtenu = eval_expression(&cas.expression);
                Verdict {
                    numero,
                    ligne: ligne.trim().to_string(),
                    obtenu: Some(obtenu),
                    erreur: verifier(cas.attendu, obtenu).err(),
                }
            }
            Err(e) => Verdict {
                numero,
                ligne: ligne.trim().to_string(),
                obtenu: None,
                erreur: Some(e.to_string()),
            },
        };

        rapport.verdicts.push(verdict);
    }

    rapport
}
