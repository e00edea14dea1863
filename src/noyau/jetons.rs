// src/noyau/jetons.rs

use thiserror::Error;

use super::operateurs::{Fonction, Operateur};

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Op(Operateur),
    Fonc(Fonction),

    LPar,
    RPar,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ErreurJeton {
    #[error("caractère inattendu: '{c}' (position {position})")]
    CaractereInattendu { c: char, position: usize },

    #[error("nombre invalide: {texte:?} (position {position})")]
    NombreInvalide { texte: String, position: usize },
}

/// Tokenize une chaîne (déjà normalisée) en jetons.
/// Supporte:
/// - décimaux (ex: 12, 3.40, .5) ; au plus un point par nombre
/// - moins collé au nombre en contexte unaire (début, après opérateur, après '(')
/// - moins unaire devant autre chose qu’un nombre => Op(Oppose)
/// - opérateurs + - * / ✕ ➗ ^ √
/// - fonctions sin cos tan (insensible à la casse)
/// - parenthèses ( )
///
/// Multiplication implicite : ")(" et "<chiffre>(" sont réécrits avant le balayage.
/// Aucune vérification d’équilibre des parenthèses ici : c’est l’affaire de l’évaluateur.
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurJeton> {
    let texte = insere_multiplications(s);
    let chars: Vec<char> = texte.chars().collect();

    let mut out: Vec<Tok> = Vec::new();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Nombre positif
        if c.is_ascii_digit() || c == '.' {
            let (n, suivant) = lire_nombre(&chars, i)?;
            out.push(Tok::Num(n));
            i = suivant;
            continue;
        }

        // Moins : binaire, collé au nombre, ou opposé
        if c == '-' {
            if contexte_unaire(out.last()) {
                let debut_nombre = chars
                    .get(i + 1)
                    .is_some_and(|d| d.is_ascii_digit() || *d == '.');
                if debut_nombre {
                    let (n, suivant) = lire_nombre(&chars, i)?;
                    out.push(Tok::Num(n));
                    i = suivant;
                } else {
                    out.push(Tok::Op(Operateur::Oppose));
                    i += 1;
                }
            } else {
                out.push(Tok::Op(Operateur::Moins));
                i += 1;
            }
            continue;
        }

        // Fonctions : fenêtre de 3 caractères
        if i + 3 <= chars.len() {
            let mot: String = chars[i..i + 3].iter().collect::<String>().to_lowercase();
            if let Some(f) = Fonction::depuis_nom(&mot) {
                out.push(Tok::Fonc(f));
                i += 3;
                continue;
            }
        }

        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        if let Some(op) = Operateur::depuis_char(c) {
            out.push(Tok::Op(op));
            i += 1;
            continue;
        }

        return Err(ErreurJeton::CaractereInattendu { c, position: i });
    }

    Ok(out)
}

/// ")(" => ")*(" ; "<chiffre>(" => "<chiffre>*(".
fn insere_multiplications(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut it = s.chars().peekable();

    while let Some(c) = it.next() {
        out.push(c);
        if (c == ')' || c.is_ascii_digit()) && it.peek() == Some(&'(') {
            out.push('*');
        }
    }

    out
}

/// Le moins se colle au nombre en début d’entrée, après un opérateur ou après '('.
fn contexte_unaire(precedent: Option<&Tok>) -> bool {
    matches!(precedent, None | Some(Tok::Op(_)) | Some(Tok::LPar))
}

/// Lit `-?[0-9]*(\.[0-9]*)?` à partir de `debut` ; retourne (valeur, index suivant).
fn lire_nombre(chars: &[char], debut: usize) -> Result<(f64, usize), ErreurJeton> {
    let mut i = debut;
    if chars[i] == '-' {
        i += 1;
    }

    let mut vu_point = false;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            i += 1;
        } else if c == '.' && !vu_point {
            vu_point = true;
            i += 1;
        } else {
            break;
        }
    }

    let texte: String = chars[debut..i].iter().collect();
    let n = texte
        .parse::<f64>()
        .map_err(|_| ErreurJeton::NombreInvalide {
            texte: texte.clone(),
            position: debut,
        })?;

    Ok((n, i))
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::new();
    for t in tokens {
        let s = match t {
            Tok::Num(n) => format!("{n:?}"),
            Tok::Op(op) => op.to_string(),
            Tok::Fonc(f) => f.to_string(),
            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
