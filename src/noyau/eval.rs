//! Noyau — évaluation (pipeline réel)
//!
//! normalize -> tokenize -> shunting-yard à deux piles (valeurs, opérateurs)
//!
//! Pas d’arbre ni de RPN intermédiaire : chaque opérateur dépilé est appliqué
//! tout de suite sur la pile de valeurs. Les deux piles naissent et meurent
//! dans un appel ; rien ne survit d’un appel à l’autre.
//!
//! Contrat total : toute entrée donne une `Valeur`. Entrée mal formée et
//! résultat hors domaine donnent tous deux `Valeur::Indefini` ; seule la
//! démarche (`eval_detaille`) garde la cause.

use thiserror::Error;
use tracing::{debug, trace};

use super::jetons::{format_tokens, tokenize, ErreurJeton, Tok};
use super::normalisation::normalize;
use super::operateurs::{Fonction, Operateur};
use super::primitives::{self, Valeur};

/// Pourquoi un calcul a fini en indéfini.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CauseIndefini {
    #[error("jeton invalide: {0}")]
    Jeton(#[from] ErreurJeton),

    #[error("hors domaine: {operation}")]
    Domaine { operation: String },

    #[error("nombre trop grand pour un f64")]
    LitteralHorsBornes,

    #[error("')' sans '(' correspondante")]
    ParentheseOrpheline,

    #[error("'(' jamais fermée")]
    ParentheseNonFermee,

    #[error("expression mal formée: {restants} valeur(s) en fin de calcul")]
    PileFinale { restants: usize },
}

#[derive(Default, Clone, Debug)]
pub struct Demarche {
    pub normalise: String,
    pub jetons: String,
    pub etapes: Vec<String>,
    pub note: String,
    pub cause: Option<CauseIndefini>,
}

/// API publique : évalue une expression texte.
pub fn eval_expression(expr_str: &str) -> Valeur {
    Moteur::new(false).executer(expr_str).0
}

/// Même calcul que `eval_expression`, avec la démarche (jetons, étapes, cause).
pub fn eval_detaille(expr_str: &str) -> (Valeur, Demarche) {
    Moteur::new(true).executer(expr_str)
}

/* ------------------------ Entrées de la pile d’opérateurs ------------------------ */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Binaire {
    Plus,
    Moins,
    Fois,
    Divise,
    Puissance,
    /// "3√(27)" : indice à gauche, radicande à droite.
    RacineIndexee,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Unaire {
    Fonc(Fonction),
    RacineCarree,
    Oppose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum EntreePile {
    ParOuvrante,
    Unaire(Unaire),
    Binaire(Binaire),
}

impl Binaire {
    fn operateur(self) -> Operateur {
        match self {
            Self::Plus => Operateur::Plus,
            Self::Moins => Operateur::Moins,
            Self::Fois => Operateur::Fois,
            Self::Divise => Operateur::Divise,
            Self::Puissance => Operateur::Puissance,
            Self::RacineIndexee => Operateur::Racine,
        }
    }

    fn appliquer(self, a: Valeur, b: Valeur) -> Valeur {
        match self {
            Self::Plus => primitives::add(a, b),
            Self::Moins => primitives::subtract(a, b),
            Self::Fois => primitives::multiply(a, b),
            Self::Divise => primitives::divide(a, b),
            Self::Puissance => primitives::power(a, b),
            Self::RacineIndexee => primitives::nth_root(b, a),
        }
    }
}

impl Unaire {
    fn precedence(self) -> u8 {
        match self {
            Self::Fonc(f) => f.precedence(),
            Self::RacineCarree => Operateur::Racine.precedence(),
            Self::Oppose => Operateur::Oppose.precedence(),
        }
    }

    fn symbole(self) -> &'static str {
        match self {
            Self::Fonc(f) => f.nom(),
            Self::RacineCarree => Operateur::Racine.symbole(),
            Self::Oppose => Operateur::Oppose.symbole(),
        }
    }

    fn appliquer(self, x: Valeur) -> Valeur {
        match self {
            Self::Fonc(Fonction::Sin) => primitives::sin(x),
            Self::Fonc(Fonction::Cos) => primitives::cos(x),
            Self::Fonc(Fonction::Tan) => primitives::tan(x),
            Self::RacineCarree => primitives::square_root(x),
            Self::Oppose => primitives::negate(x),
        }
    }
}

impl EntreePile {
    /// Résout un opérateur selon le jeton qui le précède (√ indexée ou non).
    fn depuis_operateur(op: Operateur, precedent: Option<&Tok>) -> Self {
        match op {
            Operateur::Plus => Self::Binaire(Binaire::Plus),
            Operateur::Moins => Self::Binaire(Binaire::Moins),
            Operateur::Fois => Self::Binaire(Binaire::Fois),
            Operateur::Divise => Self::Binaire(Binaire::Divise),
            Operateur::Puissance => Self::Binaire(Binaire::Puissance),
            Operateur::Racine if matches!(precedent, Some(Tok::Num(_))) => {
                Self::Binaire(Binaire::RacineIndexee)
            }
            Operateur::Racine => Self::Unaire(Unaire::RacineCarree),
            Operateur::Oppose => Self::Unaire(Unaire::Oppose),
        }
    }

    fn precedence(self) -> u8 {
        match self {
            Self::ParOuvrante => 0,
            Self::Unaire(u) => u.precedence(),
            Self::Binaire(b) => b.operateur().precedence(),
        }
    }
}

const FOIS_IMPLICITE: EntreePile = EntreePile::Binaire(Binaire::Fois);

/// Multiplication implicite devant '(' / fonction : après un nombre ou ')'.
fn valeur_avant(precedent: Option<&Tok>) -> bool {
    matches!(precedent, Some(Tok::Num(_)) | Some(Tok::RPar))
}

/* ------------------------ Moteur à deux piles ------------------------ */

struct Moteur {
    valeurs: Vec<Valeur>,
    ops: Vec<EntreePile>,
    // Some(..) seulement pour eval_detaille
    etapes: Option<Vec<String>>,
}

impl Moteur {
    fn new(trace: bool) -> Self {
        Self {
            valeurs: Vec::new(),
            ops: Vec::new(),
            etapes: trace.then(Vec::new),
        }
    }

    fn executer(mut self, expr_str: &str) -> (Valeur, Demarche) {
        // 1) Normalisation
        let mut d = Demarche {
            normalise: normalize(expr_str),
            ..Default::default()
        };

        // 2) Jetons  3) Piles
        let resultat = match tokenize(&d.normalise) {
            Ok(jetons) => {
                if self.etapes.is_some() {
                    d.jetons = format_tokens(&jetons);
                }
                self.consommer(&jetons)
            }
            Err(e) => Err(CauseIndefini::from(e)),
        };

        d.etapes = self.etapes.take().unwrap_or_default();

        match resultat {
            Ok(v) => {
                d.note = "Pipeline: normalisation → jetons → shunting-yard (deux piles).".into();
                (v, d)
            }
            Err(cause) => {
                debug!(entree = expr_str, %cause, "résultat indéfini");
                d.note = format!("indéfini : {cause}");
                d.cause = Some(cause);
                (Valeur::Indefini, d)
            }
        }
    }

    /// Consomme les jetons un par un. `Err` dès qu’une valeur devient indéfinie
    /// (court-circuit) ou que l’expression s’avère mal formée.
    fn consommer(&mut self, jetons: &[Tok]) -> Result<Valeur, CauseIndefini> {
        let mut precedent: Option<&Tok> = None;

        for tok in jetons {
            match tok {
                Tok::Num(n) => {
                    // ")3" : filet de sécurité si la réécriture des jetons n’a rien vu
                    if matches!(precedent, Some(Tok::RPar)) {
                        self.pousser(FOIS_IMPLICITE)?;
                    }
                    let v = Valeur::depuis(*n);
                    if v.est_indefini() {
                        return Err(CauseIndefini::LitteralHorsBornes);
                    }
                    self.valeurs.push(v);
                }

                Tok::LPar => {
                    if valeur_avant(precedent) {
                        self.pousser(FOIS_IMPLICITE)?;
                    }
                    self.ops.push(EntreePile::ParOuvrante);
                }

                Tok::RPar => {
                    // dépile jusqu’à '('
                    loop {
                        match self.ops.pop() {
                            Some(EntreePile::ParOuvrante) => break,
                            Some(e) => self.appliquer(e)?,
                            None => return Err(CauseIndefini::ParentheseOrpheline),
                        }
                    }

                    // si une fonction est au sommet, elle prend son argument tout de suite
                    if let Some(e @ EntreePile::Unaire(Unaire::Fonc(_))) = self.ops.last().copied() {
                        self.ops.pop();
                        self.appliquer(e)?;
                    }
                }

                Tok::Fonc(f) => {
                    if valeur_avant(precedent) {
                        self.pousser(FOIS_IMPLICITE)?;
                    }
                    // préfixe : rien à dépiler, l’argument n’existe pas encore
                    self.ops.push(EntreePile::Unaire(Unaire::Fonc(*f)));
                }

                Tok::Op(op) => match EntreePile::depuis_operateur(*op, precedent) {
                    e @ EntreePile::Unaire(_) => {
                        // ")√(4)" : la valeur fermée multiplie la racine
                        if matches!(precedent, Some(Tok::RPar)) {
                            self.pousser(FOIS_IMPLICITE)?;
                        }
                        self.ops.push(e);
                    }
                    e => self.pousser(e)?,
                },
            }

            precedent = Some(tok);
        }

        // vide la pile ops
        while let Some(e) = self.ops.pop() {
            if e == EntreePile::ParOuvrante {
                return Err(CauseIndefini::ParentheseNonFermee);
            }
            self.appliquer(e)?;
        }

        match self.valeurs.as_slice() {
            [v] => Ok(*v),
            reste => Err(CauseIndefini::PileFinale {
                restants: reste.len(),
            }),
        }
    }

    /// Opérateur binaire entrant : dépile tant que le sommet n’est pas '('
    /// et lie au moins aussi fort (gauche -> droite à précédence égale).
    fn pousser(&mut self, entrant: EntreePile) -> Result<(), CauseIndefini> {
        while let Some(&sommet) = self.ops.last() {
            if sommet == EntreePile::ParOuvrante || sommet.precedence() < entrant.precedence() {
                break;
            }
            self.ops.pop();
            self.appliquer(sommet)?;
        }
        self.ops.push(entrant);
        Ok(())
    }

    /// Applique un opérateur dépilé sur la pile de valeurs.
    ///
    /// Sous-dépassement (moins d’opérandes que l’arité) : sans effet, pas d’erreur ;
    /// la vérification finale de la pile tranche.
    fn appliquer(&mut self, e: EntreePile) -> Result<(), CauseIndefini> {
        let (resultat, etape) = match e {
            EntreePile::ParOuvrante => return Ok(()),

            EntreePile::Unaire(u) => {
                let Some(x) = self.valeurs.pop() else {
                    debug!(op = u.symbole(), "pile vide, opérateur ignoré");
                    return Ok(());
                };
                let r = u.appliquer(x);
                (r, format!("{} {x} = {r}", u.symbole()))
            }

            EntreePile::Binaire(b) => {
                let n = self.valeurs.len();
                if n < 2 {
                    debug!(op = b.operateur().symbole(), "opérande manquant, opérateur ignoré");
                    return Ok(());
                }
                let (gauche, droite) = (self.valeurs[n - 2], self.valeurs[n - 1]);
                self.valeurs.truncate(n - 2);
                let r = b.appliquer(gauche, droite);
                (r, format!("{gauche} {} {droite} = {r}", b.operateur()))
            }
        };

        trace!(etape = %etape, "opérateur appliqué");
        if let Some(etapes) = self.etapes.as_mut() {
            etapes.push(etape.clone());
        }

        if resultat.est_indefini() {
            return Err(CauseIndefini::Domaine { operation: etape });
        }
        self.valeurs.push(resultat);
        Ok(())
    }
}
