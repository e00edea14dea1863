// src/noyau/operateurs.rs
//
// Table des opérateurs (immuable)
// -------------------------------
// Précédence : + - = 1 ; * / ✕ ➗ = 2 ; sin cos tan √ ^ (et le moins unaire) = 3.
// La parenthèse ouvrante vaut 0 : plancher de pile, jamais comparée.
// Toute la table est un `match` : rien à initialiser, rien à verrouiller.
// L’arité (√ indexée ou non, moins binaire ou opposé) se tranche selon le contexte,
// dans jetons.rs et eval.rs.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    /// √ : binaire (indice, radicande) si un nombre le précède, sinon racine carrée.
    Racine,
    /// Moins unaire devant autre chose qu’un nombre : "-(2+3)", "-sin(1)".
    Oppose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
}

impl Operateur {
    /// Reconnaît un caractère de l’alphabet canonique.
    /// `-` donne toujours `Moins` : le contexte unaire est tranché par le tokenizer.
    pub fn depuis_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Plus),
            '-' => Some(Self::Moins),
            '*' | '✕' => Some(Self::Fois),
            '/' | '➗' => Some(Self::Divise),
            '^' => Some(Self::Puissance),
            '√' => Some(Self::Racine),
            _ => None,
        }
    }

    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Moins => 1,
            Self::Fois | Self::Divise => 2,
            Self::Puissance | Self::Racine | Self::Oppose => 3,
        }
    }

    pub fn symbole(self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Moins => "-",
            Self::Fois => "*",
            Self::Divise => "/",
            Self::Puissance => "^",
            Self::Racine => "√",
            Self::Oppose => "neg",
        }
    }
}

impl Fonction {
    /// Fenêtre de 3 caractères : "sin" | "cos" | "tan".
    pub fn depuis_nom(nom: &str) -> Option<Self> {
        match nom {
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            _ => None,
        }
    }

    pub fn precedence(self) -> u8 {
        3
    }

    pub fn nom(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }
}

impl fmt::Display for Operateur {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbole())
    }
}

impl fmt::Display for Fonction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.nom())
    }
}
