//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : contrat total (jamais de panique, jamais de non-fini)
//! - invariant clé : eval_detaille et eval_expression rendent la même Valeur

use std::time::{Duration, Instant};

use super::{eval_detaille, eval_expression, normalize, Valeur};

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn check_valeur_totale(expr: &str, v: Valeur) {
    if let Valeur::Nombre(x) = v {
        assert!(x.is_finite(), "valeur non finie: expr={expr:?} v={x}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_nombre(rng: &mut Rng) -> String {
    // inclut 0 (division par zéro) et des négatifs (racines paires)
    let a = rng.pick(10) as i64 - 3;
    if rng.coin() {
        format!("{a}.{}", rng.pick(100))
    } else {
        format!("{a}")
    }
}

fn gen_atom(rng: &mut Rng) -> String {
    match rng.pick(4) {
        0 | 1 => gen_nombre(rng),
        2 => format!("({})", gen_nombre(rng)),
        _ => format!("{}√({})", rng.pick(5) + 1, gen_nombre(rng)),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_atom(rng);
    }

    let a = gen_expr(rng, depth - 1);
    match rng.pick(11) {
        0 => gen_atom(rng),
        1 => format!("({a}+{})", gen_expr(rng, depth - 1)),
        2 => format!("({a}-{})", gen_expr(rng, depth - 1)),
        3 => format!("({a}*{})", gen_expr(rng, depth - 1)),
        4 => format!("({a}/{})", gen_expr(rng, depth - 1)),
        5 => format!("({a})^{}", rng.pick(4)),
        6 => format!("sin({a})"),
        7 => format!("cos({a})"),
        8 => format!("tan({a})"),
        9 => format!("√({a})"),
        _ => format!("{}({a})", rng.pick(9) + 1), // multiplication implicite
    }
}

/// Texte quelconque sur un alphabet qui mélange opérateurs, glyphes abîmés et bruit.
fn gen_bruit(rng: &mut Rng, longueur: usize) -> String {
    const ALPHABET: &[&str] = &[
        "1", "2", ".", "-", "+", "*", "/", "^", "(", ")", " ", "√", "✕", "➗", "sin", "cos",
        "tan", "s", "â", "œ", "•", "ˆ", "š", "’", "ž", "—", "−", "×", "÷", "$",
    ];
    (0..longueur)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Helper somme balancée anti pile ------------------------ */

fn somme_balancee(terme: &str, n: usize) -> String {
    let mut items: Vec<String> = (0..n).map(|_| terme.to_string()).collect();
    while items.len() > 1 {
        let mut next = Vec::new();
        let mut i = 0;
        while i < items.len() {
            if i + 1 < items.len() {
                next.push(format!("({}+{})", items[i], items[i + 1]));
                i += 2;
            } else {
                next.push(items[i].clone());
                i += 1;
            }
        }
        items = next;
    }
    items.pop().unwrap_or_else(|| "0".to_string())
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_determinisme_et_contrat_total() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    // Même seed => mêmes expressions => mêmes sorties (déterminisme)
    let mut rng = Rng::new(0xC0FFEE_u64);

    let mut seen_ok = 0usize;
    let mut seen_indefini = 0usize;

    for _ in 0..150 {
        budget(t0, max);

        let expr = gen_expr(&mut rng, 4);
        let v = eval_expression(&expr);
        check_valeur_totale(&expr, v);

        assert_eq!(v, eval_expression(&expr), "non déterministe: expr={expr:?}");

        if v.est_indefini() {
            seen_indefini += 1;
        } else {
            seen_ok += 1;
        }
    }

    // On veut voir un mix des deux, sinon le fuzz ne “balaye” rien.
    assert!(seen_ok > 10, "trop peu de succès: {seen_ok}");
    assert!(seen_indefini > 0, "aucun indéfini vu: fuzz trop “sage”");
}

#[test]
fn fuzz_safe_detaille_coincide() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xBADC0DE_u64);

    for _ in 0..100 {
        budget(t0, max);

        let expr = if rng.coin() {
            gen_expr(&mut rng, 3)
        } else {
            let n = rng.pick(20) as usize;
            gen_bruit(&mut rng, n)
        };

        let (v, d) = eval_detaille(&expr);
        assert_eq!(v, eval_expression(&expr), "expr={expr:?}");
        // cause présente <=> indéfini
        assert_eq!(d.cause.is_some(), v.est_indefini(), "expr={expr:?}");
    }
}

#[test]
fn fuzz_safe_bruit_ne_panique_pas() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0x5EED_u64);

    for _ in 0..300 {
        budget(t0, max);

        let n = rng.pick(30) as usize;
        let s = gen_bruit(&mut rng, n);
        check_valeur_totale(&s, eval_expression(&s));
    }
}

#[test]
fn fuzz_safe_normalisation_idempotente() {
    let mut rng = Rng::new(0xFACADE_u64);

    for _ in 0..300 {
        let n = rng.pick(25) as usize;
        let s = gen_bruit(&mut rng, n);
        let une = normalize(&s);
        assert_eq!(normalize(&une), une, "s={s:?}");
    }
}

#[test]
fn fuzz_safe_somme_balancee_anti_pile() {
    let t0 = Instant::now();
    let max = Duration::from_millis(300);

    let expr = somme_balancee("0.5", 800);
    let v = eval_expression(&expr);
    budget(t0, max);

    // 800*0.5 = 400
    assert_eq!(v, Valeur::Nombre(400.0));
}

#[test]
fn fuzz_safe_parentheses_profondes() {
    // pile d’opérateurs seulement : aucune récursion dans le moteur
    let profondeur = 5000;
    let expr = format!("{}1{}", "(".repeat(profondeur), ")".repeat(profondeur));
    assert_eq!(eval_expression(&expr), Valeur::Nombre(1.0));

    let ouverte = "(".repeat(profondeur);
    assert_eq!(eval_expression(&ouverte), Valeur::Indefini);
}
